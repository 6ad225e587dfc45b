//! The parking registry and transaction engine.
//!
//! A plate moves `Absent -> Parked -> Absent`: [`ParkingRegistry::check_in`]
//! parks it, [`ParkingRegistry::finalize_checkout`] records the transaction
//! and releases it. Quotes are computed on demand and never stored.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{info, warn};

use parkir_types::{
    Amount, ExitTime, NaiveDateTime, ParkedVehicle, PaymentMethod, Plate, Tariff, TariffTable,
    TransactionId, TransactionRecord, TransactionStatus, VehicleClass,
};

use crate::fee::{DurationBreakdown, compute_fee, whole_hours};
use crate::{HistoryStore, ParkingError};

/// A priced checkout, ready to be confirmed or abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutQuote {
    pub plate: Plate,
    pub vehicle_class: VehicleClass,
    pub entry_time: NaiveDateTime,
    pub exit_time: NaiveDateTime,
    /// Billed hours. `None` when the lost-ticket penalty replaces the fee.
    pub charged_hours: Option<u32>,
    pub duration: DurationBreakdown,
    pub amount_due: Amount,
    pub status: TransactionStatus,
}

/// Vehicles currently parked plus the completed transaction history.
///
/// The history is a write-through cache of the [`HistoryStore`] file, kept
/// newest first.
#[derive(Debug)]
pub struct ParkingRegistry {
    parked: HashMap<Plate, ParkedVehicle>,
    history: Vec<TransactionRecord>,
    last_id: TransactionId,
    tariffs: TariffTable,
    store: HistoryStore,
}

impl ParkingRegistry {
    /// Load the history from `store` and start with an empty lot.
    #[must_use]
    pub fn open(store: HistoryStore, tariffs: TariffTable) -> Self {
        let history = store.load();
        let last_id = HistoryStore::last_id(&history);
        Self {
            parked: HashMap::new(),
            history,
            last_id,
            tariffs,
            store,
        }
    }

    #[must_use]
    pub fn tariffs(&self) -> &TariffTable {
        &self.tariffs
    }

    pub fn set_tariff(&mut self, class: VehicleClass, tariff: Tariff) {
        self.tariffs.set(class, tariff);
    }

    #[must_use]
    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Id of the most recent transaction, or zero if there is none.
    #[must_use]
    pub fn last_id(&self) -> TransactionId {
        self.last_id
    }

    #[must_use]
    pub fn is_parked(&self, plate: &Plate) -> bool {
        self.parked.contains_key(plate)
    }

    /// Parked vehicles, most recent entry first.
    #[must_use]
    pub fn list_parked(&self) -> Vec<&ParkedVehicle> {
        let mut vehicles: Vec<&ParkedVehicle> = self.parked.values().collect();
        vehicles.sort_by(|a, b| {
            b.entry_time()
                .cmp(&a.entry_time())
                .then_with(|| a.plate().cmp(b.plate()))
        });
        vehicles
    }

    /// Completed transactions, most recent first.
    #[must_use]
    pub fn list_history(&self) -> &[TransactionRecord] {
        &self.history
    }

    /// Park a vehicle.
    ///
    /// `plate` is normalized first, so `" b 1234 xyz"` parks `B 1234 XYZ`.
    pub fn check_in(
        &mut self,
        plate: &str,
        vehicle_class: VehicleClass,
        now: NaiveDateTime,
    ) -> Result<&ParkedVehicle, ParkingError> {
        let plate = Plate::parse(plate)?;
        match self.parked.entry(plate) {
            Entry::Occupied(entry) => Err(ParkingError::DuplicateVehicle {
                plate: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let vehicle = ParkedVehicle::new(entry.key().clone(), vehicle_class, now);
                info!(
                    plate = %vehicle.plate(),
                    class = vehicle_class.label(),
                    entry = %now,
                    "Checked in"
                );
                Ok(entry.insert(vehicle))
            }
        }
    }

    fn parked_vehicle(&self, plate: &str) -> Result<&ParkedVehicle, ParkingError> {
        let plate = Plate::parse(plate)?;
        match self.parked.get(&plate) {
            Some(vehicle) => Ok(vehicle),
            None => Err(ParkingError::VehicleNotFound { plate }),
        }
    }

    /// Price a checkout whose exit time is still unresolved.
    ///
    /// The plate is looked up before a manual exit time is composed, so an
    /// unknown vehicle is reported as [`ParkingError::VehicleNotFound`] even
    /// when the typed date is also invalid.
    pub fn quote_checkout_at(
        &self,
        plate: &str,
        exit_time: ExitTime,
        now: NaiveDateTime,
        lost_ticket: bool,
    ) -> Result<CheckoutQuote, ParkingError> {
        self.parked_vehicle(plate)?;
        let exit_time = exit_time.resolve(now)?;
        self.quote_checkout(plate, exit_time, lost_ticket)
    }

    /// Price a checkout without changing any state.
    pub fn quote_checkout(
        &self,
        plate: &str,
        exit_time: NaiveDateTime,
        lost_ticket: bool,
    ) -> Result<CheckoutQuote, ParkingError> {
        let vehicle = self.parked_vehicle(plate)?;
        let entry_time = vehicle.entry_time();
        if exit_time < entry_time {
            return Err(ParkingError::InvalidExitTime {
                entry: entry_time,
                exit: exit_time,
            });
        }

        let elapsed = exit_time - entry_time;
        let duration = DurationBreakdown::from_elapsed(elapsed);
        let (charged_hours, amount_due, status) = if lost_ticket {
            (
                None,
                self.tariffs.lost_ticket_penalty,
                TransactionStatus::LostTicketPenalty,
            )
        } else {
            let hours = whole_hours(elapsed);
            (
                Some(hours),
                compute_fee(&self.tariffs, vehicle.vehicle_class(), hours),
                TransactionStatus::Paid,
            )
        };

        Ok(CheckoutQuote {
            plate: vehicle.plate().clone(),
            vehicle_class: vehicle.vehicle_class(),
            entry_time,
            exit_time,
            charged_hours,
            duration,
            amount_due,
            status,
        })
    }

    /// Record a completed checkout and release the vehicle.
    ///
    /// The record is prepended to the history and the whole history is saved
    /// before the vehicle leaves the lot. If saving fails nothing changes: the
    /// vehicle stays parked, no id is consumed, and the error is returned.
    pub fn finalize_checkout(
        &mut self,
        plate: &str,
        amount_due: Amount,
        payment_method: PaymentMethod,
        status: TransactionStatus,
        exit_time: NaiveDateTime,
    ) -> Result<&TransactionRecord, ParkingError> {
        let vehicle = self.parked_vehicle(plate)?;
        if exit_time < vehicle.entry_time() {
            return Err(ParkingError::InvalidExitTime {
                entry: vehicle.entry_time(),
                exit: exit_time,
            });
        }

        let id = self
            .last_id
            .checked_next()
            .ok_or(ParkingError::IdsExhausted { last: self.last_id })?;
        let record = TransactionRecord {
            id,
            plate: vehicle.plate().clone(),
            vehicle_class: vehicle.vehicle_class(),
            entry_time: vehicle.entry_time(),
            exit_time,
            amount_due,
            status,
            payment_method,
        };

        self.history.insert(0, record);
        if let Err(err) = self.store.save(&self.history) {
            let record = self.history.remove(0);
            warn!(plate = %record.plate, id = %id, "Checkout rolled back: {err}");
            return Err(err.into());
        }

        self.last_id = id;
        let record = &self.history[0];
        self.parked.remove(&record.plate);
        info!(
            plate = %record.plate,
            id = %id,
            status = record.status.label(),
            amount = record.amount_due.value(),
            method = record.payment_method.label(),
            "Checkout finalized"
        );
        Ok(record)
    }

    /// Finalize exactly what `quote` priced.
    pub fn settle(
        &mut self,
        quote: &CheckoutQuote,
        payment_method: PaymentMethod,
    ) -> Result<&TransactionRecord, ParkingError> {
        self.finalize_checkout(
            quote.plate.as_str(),
            quote.amount_due,
            payment_method,
            quote.status,
            quote.exit_time,
        )
    }
}
