use thiserror::Error;

use parkir_types::{InvalidDateError, NaiveDateTime, Plate, PlateError, TransactionId};

use crate::HistoryError;

/// Everything a registry operation can reject.
///
/// All variants except [`ParkingError::Persist`] are validation failures that
/// leave the registry untouched.
#[derive(Debug, Error)]
pub enum ParkingError {
    #[error("invalid plate: {0}")]
    InvalidPlate(#[from] PlateError),
    #[error("vehicle {plate} is already parked")]
    DuplicateVehicle { plate: Plate },
    #[error("vehicle {plate} not found")]
    VehicleNotFound { plate: Plate },
    #[error("exit time {exit} is earlier than entry time {entry}")]
    InvalidExitTime {
        entry: NaiveDateTime,
        exit: NaiveDateTime,
    },
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),
    #[error("no transaction id left after {last}")]
    IdsExhausted { last: TransactionId },
    #[error("checkout not recorded: {0}")]
    Persist(#[from] HistoryError),
}
