use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Plate;

/// Vehicle class, which selects the tariff.
///
/// Serialized with the labels used by the history file (`"Mobil"`, `"Motor"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleClass {
    #[serde(rename = "Mobil")]
    Car,
    #[serde(rename = "Motor")]
    Motorcycle,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 2] = [VehicleClass::Car, VehicleClass::Motorcycle];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Car => "Mobil",
            Self::Motorcycle => "Motor",
        }
    }

    /// Key used for this class in configuration tables.
    #[must_use]
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Motorcycle => "motorcycle",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vehicle class {0:?} (expected mobil or motor)")]
pub struct UnknownVehicleClass(pub String);

impl FromStr for VehicleClass {
    type Err = UnknownVehicleClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobil" | "car" => Ok(Self::Car),
            "motor" | "motorcycle" | "motorbike" => Ok(Self::Motorcycle),
            _ => Err(UnknownVehicleClass(s.trim().to_string())),
        }
    }
}

/// A vehicle currently inside the lot.
///
/// Lives only in memory. The entry time is fixed at check-in and has no setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkedVehicle {
    plate: Plate,
    vehicle_class: VehicleClass,
    entry_time: NaiveDateTime,
}

impl ParkedVehicle {
    #[must_use]
    pub fn new(plate: Plate, vehicle_class: VehicleClass, entry_time: NaiveDateTime) -> Self {
        Self {
            plate,
            vehicle_class,
            entry_time,
        }
    }

    #[must_use]
    pub fn plate(&self) -> &Plate {
        &self.plate
    }

    #[must_use]
    pub fn vehicle_class(&self) -> VehicleClass {
        self.vehicle_class
    }

    #[must_use]
    pub fn entry_time(&self) -> NaiveDateTime {
        self.entry_time
    }
}
