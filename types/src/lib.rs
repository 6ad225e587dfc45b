//! Core domain types for Parkir.
//!
//! This crate contains pure domain types with no IO and minimal dependencies.
//! Everything here can be used from any layer of the application: the
//! registry in `parkir-core`, the configuration loader, and the operator
//! session in the binary.

#![allow(clippy::missing_errors_doc)]

mod ids;
mod money;
mod plate;
mod record;
mod tariff;
mod timestamp;
mod vehicle;

pub use ids::TransactionId;
pub use money::Amount;
pub use plate::{Plate, PlateError};
pub use record::{PaymentMethod, TransactionRecord, TransactionStatus, UnknownPaymentMethod};
pub use tariff::{DEFAULT_LOST_TICKET_PENALTY, Tariff, TariffTable};
pub use timestamp::{ExitTime, InvalidDateError, ManualExitTime};
pub use vehicle::{ParkedVehicle, UnknownVehicleClass, VehicleClass};

/// Re-exported so downstream crates name timestamps the same way.
pub use chrono::NaiveDateTime;
