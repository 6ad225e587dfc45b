//! Tariff tables.
//!
//! Values here are defaults only; the configuration layer overrides them.

use crate::{Amount, VehicleClass};

pub const DEFAULT_LOST_TICKET_PENALTY: Amount = Amount::new(50_000);

/// Hourly tariff for one vehicle class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tariff {
    /// Flat fee covering the first hour.
    pub first_hour: Amount,
    /// Flat fee for each started hour after the first.
    pub additional_hour: Amount,
}

impl Tariff {
    #[must_use]
    pub const fn new(first_hour: Amount, additional_hour: Amount) -> Self {
        Self {
            first_hour,
            additional_hour,
        }
    }

    pub const CAR: Tariff = Tariff::new(Amount::new(5000), Amount::new(4000));
    pub const MOTORCYCLE: Tariff = Tariff::new(Amount::new(3000), Amount::new(2000));

    #[must_use]
    pub const fn default_for(class: VehicleClass) -> Self {
        match class {
            VehicleClass::Car => Self::CAR,
            VehicleClass::Motorcycle => Self::MOTORCYCLE,
        }
    }
}

/// Complete pricing configuration: one tariff per class plus the lost-ticket
/// penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TariffTable {
    pub car: Tariff,
    pub motorcycle: Tariff,
    pub lost_ticket_penalty: Amount,
}

impl Default for TariffTable {
    fn default() -> Self {
        Self {
            car: Tariff::CAR,
            motorcycle: Tariff::MOTORCYCLE,
            lost_ticket_penalty: DEFAULT_LOST_TICKET_PENALTY,
        }
    }
}

impl TariffTable {
    #[must_use]
    pub const fn for_class(&self, class: VehicleClass) -> Tariff {
        match class {
            VehicleClass::Car => self.car,
            VehicleClass::Motorcycle => self.motorcycle,
        }
    }

    pub fn set(&mut self, class: VehicleClass, tariff: Tariff) {
        match class {
            VehicleClass::Car => self.car = tariff,
            VehicleClass::Motorcycle => self.motorcycle = tariff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Tariff, TariffTable};
    use crate::{Amount, VehicleClass};

    #[test]
    fn defaults_match_posted_prices() {
        let table = TariffTable::default();
        assert_eq!(table.for_class(VehicleClass::Car).first_hour, Amount::new(5000));
        assert_eq!(table.for_class(VehicleClass::Car).additional_hour, Amount::new(4000));
        assert_eq!(table.for_class(VehicleClass::Motorcycle).first_hour, Amount::new(3000));
        assert_eq!(
            table.for_class(VehicleClass::Motorcycle).additional_hour,
            Amount::new(2000)
        );
        assert_eq!(table.lost_ticket_penalty, Amount::new(50_000));
    }

    #[test]
    fn set_replaces_only_that_class() {
        let mut table = TariffTable::default();
        let custom = Tariff::new(Amount::new(1000), Amount::new(500));
        table.set(VehicleClass::Motorcycle, custom);
        assert_eq!(table.motorcycle, custom);
        assert_eq!(table.car, Tariff::CAR);
    }
}
