//! Shared test utilities and fixtures

#![allow(dead_code)]

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use parkir_core::{HistoryStore, ParkingRegistry};
use parkir_types::TariffTable;

pub const HISTORY_FILE: &str = "riwayat_parkir.json";

/// A history file as written by earlier installations of the system.
pub const LEGACY_HISTORY: &str = r#"[
    {
        "id": 3,
        "nopol": "D 88 AB",
        "jenis": "Motor",
        "waktu_masuk": "2025-06-23T08:15:00.123456",
        "waktu_keluar": "2025-06-23T09:20:30.654321",
        "total_biaya": 5000,
        "status": "Lunas",
        "metode_bayar": "E-Money"
    },
    {
        "id": 5,
        "nopol": "B 77 CD",
        "jenis": "Mobil",
        "waktu_masuk": "2025-06-22T21:00:00",
        "waktu_keluar": "2025-06-23T07:00:00",
        "total_biaya": 50000,
        "status": "Denda Tiket Hilang",
        "metode_bayar": "Cash"
    },
    {
        "id": 1,
        "nopol": "B 1234 XYZ",
        "jenis": "Mobil",
        "waktu_masuk": "2025-06-23T10:00:00",
        "waktu_keluar": "2025-06-23T12:00:00",
        "total_biaya": 9000,
        "status": "Lunas",
        "metode_bayar": "Cash"
    }
]"#;

pub fn at(day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, day)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

/// 23 June 2025, 10:00:00.
pub fn t0() -> NaiveDateTime {
    at(23, 10, 0, 0)
}

pub fn open_registry(dir: &Path) -> ParkingRegistry {
    open_registry_with(dir, TariffTable::default())
}

pub fn open_registry_with(dir: &Path, tariffs: TariffTable) -> ParkingRegistry {
    ParkingRegistry::open(HistoryStore::new(dir.join(HISTORY_FILE)), tariffs)
}
