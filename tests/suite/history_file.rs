//! On-disk history compatibility.

use chrono::TimeDelta;
use serde_json::Value;

use parkir_core::HistoryStore;
use parkir_types::{PaymentMethod, TransactionStatus, VehicleClass};

use crate::common::{HISTORY_FILE, LEGACY_HISTORY, at, open_registry, t0};

#[test]
fn legacy_history_loads_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(HISTORY_FILE);
    std::fs::write(&path, LEGACY_HISTORY).unwrap();

    let records = HistoryStore::new(&path).load();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].plate.as_str(), "D 88 AB");
    assert_eq!(records[0].vehicle_class, VehicleClass::Motorcycle);
    assert_eq!(records[0].payment_method, PaymentMethod::ElectronicMoney);
    assert_eq!(records[1].status, TransactionStatus::LostTicketPenalty);
    assert_eq!(records[2].exit_time, at(23, 12, 0, 0));
}

#[test]
fn resaved_legacy_history_keeps_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(HISTORY_FILE);
    std::fs::write(&path, LEGACY_HISTORY).unwrap();
    let store = HistoryStore::new(&path);

    store.save(&store.load()).unwrap();

    let before: Value = serde_json::from_str(LEGACY_HISTORY).unwrap();
    let after: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn checkout_writes_record_in_shared_format() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = open_registry(dir.path());
    registry.check_in("B 1234 XYZ", VehicleClass::Car, t0()).unwrap();
    let quote = registry
        .quote_checkout("B 1234 XYZ", t0() + TimeDelta::minutes(90), false)
        .unwrap();
    registry.settle(&quote, PaymentMethod::Cash).unwrap();

    let text = std::fs::read_to_string(dir.path().join(HISTORY_FILE)).unwrap();
    let json: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "id": 1,
            "nopol": "B 1234 XYZ",
            "jenis": "Mobil",
            "waktu_masuk": "2025-06-23T10:00:00",
            "waktu_keluar": "2025-06-23T11:30:00",
            "total_biaya": 9000,
            "status": "Lunas",
            "metode_bayar": "Cash"
        }])
    );
    assert!(text.contains("\n        \"nopol\": \"B 1234 XYZ\","));
}

#[test]
fn history_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut registry = open_registry(dir.path());
        registry.check_in("B 1 A", VehicleClass::Car, t0()).unwrap();
        let quote = registry
            .quote_checkout("B 1 A", t0() + TimeDelta::hours(1), false)
            .unwrap();
        registry.settle(&quote, PaymentMethod::Cash).unwrap();
    }

    let registry = open_registry(dir.path());
    assert_eq!(registry.list_history().len(), 1);
    assert_eq!(registry.last_id().value(), 1);
    assert!(registry.list_parked().is_empty());
}

#[test]
fn malformed_history_starts_empty_and_is_kept_aside() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(HISTORY_FILE);
    std::fs::write(&path, "{ not json").unwrap();

    let mut registry = open_registry(dir.path());
    assert!(registry.list_history().is_empty());

    registry.check_in("B 1 A", VehicleClass::Car, t0()).unwrap();
    let quote = registry.quote_checkout("B 1 A", t0(), false).unwrap();
    let record = registry.settle(&quote, PaymentMethod::Cash).unwrap();
    assert_eq!(record.id.value(), 1);

    let kept = std::fs::read_to_string(registry.store().quarantine_path()).unwrap();
    assert_eq!(kept, "{ not json");
}

#[test]
fn legacy_plates_outside_current_rules_still_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(HISTORY_FILE);
    std::fs::write(
        &path,
        r#"[
    {
        "id": 9,
        "nopol": "b-1  234 x",
        "jenis": "Mobil",
        "waktu_masuk": "2025-06-20T08:00:00",
        "waktu_keluar": "2025-06-20T09:00:00",
        "total_biaya": 5000,
        "status": "Lunas",
        "metode_bayar": "Cash"
    },
    {
        "id": 8,
        "nopol": "D 88 AB",
        "jenis": "Motor",
        "waktu_masuk": "2025-06-19T08:00:00",
        "waktu_keluar": "2025-06-19T09:00:00",
        "total_biaya": 3000,
        "status": "Lunas",
        "metode_bayar": "E-Money"
    }
]"#,
    )
    .unwrap();

    let registry = open_registry(dir.path());

    let plates: Vec<&str> = registry
        .list_history()
        .iter()
        .map(|record| record.plate.as_str())
        .collect();
    assert_eq!(plates, vec!["B-1 234 X", "D 88 AB"]);
    assert_eq!(registry.last_id().value(), 9);
    assert!(path.exists());
    assert!(!registry.store().quarantine_path().exists());
}
