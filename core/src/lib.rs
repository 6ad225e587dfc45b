//! Parking logic for Parkir.
//!
//! Fee calculation, the transaction history file, and the registry that ties
//! them together. Nothing here prints; the binary renders results.

mod clock;
mod error;
pub mod fee;
mod history;
mod registry;

pub use clock::now;
pub use error::ParkingError;
pub use fee::{DurationBreakdown, compute_fee, whole_hours};
pub use history::{HistoryError, HistoryStore};
pub use registry::{CheckoutQuote, ParkingRegistry};
