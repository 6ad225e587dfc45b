//! Operator command parsing.
//!
//! One command per input line, words separated by whitespace. Keywords are
//! accepted in Indonesian and English.

use thiserror::Error;

use parkir_types::{
    Amount, ExitTime, ManualExitTime, PaymentMethod, Tariff, UnknownVehicleClass, VehicleClass,
};

pub const CHECK_IN_USAGE: &str = "masuk <wilayah> <nomor> <seri> <mobil|motor>";
pub const CHECK_OUT_USAGE: &str =
    "keluar <wilayah> <nomor> <seri> [hilang] [at <tahun> <bulan> <tanggal> <jam> <menit> <detik>]";
pub const TARIFF_USAGE: &str = "tarif [<mobil|motor> <jam-pertama> <jam-berikutnya>]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CheckIn {
        plate: String,
        vehicle_class: VehicleClass,
    },
    CheckOut {
        plate: String,
        lost_ticket: bool,
        exit_time: ExitTime,
    },
    ListParked,
    ListHistory,
    ShowTariffs,
    SetTariff {
        vehicle_class: VehicleClass,
        tariff: Tariff,
    },
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?} (type help)")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    VehicleClass(#[from] UnknownVehicleClass),
    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },
}

/// Answer to the payment prompt that follows a checkout quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentChoice {
    Pay(PaymentMethod),
    Cancel,
}

impl PaymentChoice {
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "batal" | "cancel" => Some(Self::Cancel),
            other => other.parse().ok().map(Self::Pay),
        }
    }
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match keyword.to_ascii_lowercase().as_str() {
            "masuk" | "in" => parse_check_in(args)?,
            "keluar" | "out" => parse_check_out(args)?,
            "aktif" | "parked" => Self::ListParked,
            "riwayat" | "history" => Self::ListHistory,
            "tarif" | "tariffs" | "tariff" => parse_tariff(args)?,
            "help" | "bantuan" | "?" => Self::Help,
            "quit" | "exit" | "selesai" => Self::Quit,
            _ => return Err(CommandError::Unknown(keyword.to_string())),
        };
        Ok(Some(command))
    }
}

fn parse_check_in(args: &[&str]) -> Result<Command, CommandError> {
    let [region, number, suffix, class] = args else {
        return Err(CommandError::Usage(CHECK_IN_USAGE));
    };
    Ok(Command::CheckIn {
        plate: join_plate(region, number, suffix),
        vehicle_class: class.parse()?,
    })
}

fn parse_check_out(args: &[&str]) -> Result<Command, CommandError> {
    let [region, number, suffix, rest @ ..] = args else {
        return Err(CommandError::Usage(CHECK_OUT_USAGE));
    };

    let (lost_ticket, rest) = match rest.split_first() {
        Some((word, tail)) if matches!(word.to_ascii_lowercase().as_str(), "hilang" | "lost") => {
            (true, tail)
        }
        _ => (false, rest),
    };

    let exit_time = match rest {
        [] => ExitTime::Now,
        [at, year, month, day, hour, minute, second] if at.eq_ignore_ascii_case("at") => {
            ExitTime::Manual(ManualExitTime {
                year: number_arg("year", year)?,
                month: number_arg("month", month)?,
                day: number_arg("day", day)?,
                hour: number_arg("hour", hour)?,
                minute: number_arg("minute", minute)?,
                second: number_arg("second", second)?,
            })
        }
        _ => return Err(CommandError::Usage(CHECK_OUT_USAGE)),
    };

    Ok(Command::CheckOut {
        plate: join_plate(region, number, suffix),
        lost_ticket,
        exit_time,
    })
}

fn parse_tariff(args: &[&str]) -> Result<Command, CommandError> {
    match args {
        [] => Ok(Command::ShowTariffs),
        [class, first, additional] => Ok(Command::SetTariff {
            vehicle_class: class.parse()?,
            tariff: Tariff::new(
                Amount::new(number_arg("first hour", first)?),
                Amount::new(number_arg("additional hour", additional)?),
            ),
        }),
        _ => Err(CommandError::Usage(TARIFF_USAGE)),
    }
}

fn join_plate(region: &str, number: &str, suffix: &str) -> String {
    format!("{region} {number} {suffix}")
}

fn number_arg<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, CommandError> {
    value.parse().map_err(|_| CommandError::NotANumber {
        field,
        value: value.to_string(),
    })
}
