//! Completed parking transactions as stored in the history file.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Amount, Plate, TransactionId, VehicleClass};

/// How a checkout was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Regular fee computed from the parked duration.
    #[serde(rename = "Lunas")]
    Paid,
    /// Fixed penalty charged because the ticket was lost.
    #[serde(rename = "Denda Tiket Hilang")]
    LostTicketPenalty,
}

impl TransactionStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Paid => "Lunas",
            Self::LostTicketPenalty => "Denda Tiket Hilang",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment label recorded with the transaction. Never processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Cash")]
    Cash,
    #[serde(rename = "E-Money")]
    ElectronicMoney,
}

impl PaymentMethod {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::ElectronicMoney => "E-Money",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown payment method {0:?} (expected cash or emoney)")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" | "tunai" => Ok(Self::Cash),
            "emoney" | "e-money" | "cashless" => Ok(Self::ElectronicMoney),
            _ => Err(UnknownPaymentMethod(s.trim().to_string())),
        }
    }
}

/// One finalized checkout.
///
/// Field names on disk are fixed by the history file format; timestamps are
/// written as ISO-8601 without offset (`2025-06-23T10:00:00`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    #[serde(rename = "nopol")]
    pub plate: Plate,
    #[serde(rename = "jenis")]
    pub vehicle_class: VehicleClass,
    #[serde(rename = "waktu_masuk")]
    pub entry_time: NaiveDateTime,
    #[serde(rename = "waktu_keluar")]
    pub exit_time: NaiveDateTime,
    #[serde(rename = "total_biaya")]
    pub amount_due: Amount,
    pub status: TransactionStatus,
    #[serde(rename = "metode_bayar")]
    pub payment_method: PaymentMethod,
}
