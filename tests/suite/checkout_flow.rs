//! Check-in through finalized checkout, as the operator console drives it.

use chrono::TimeDelta;

use parkir_core::ParkingError;
use parkir_types::{
    Amount, ExitTime, ManualExitTime, PaymentMethod, Plate, TransactionId, TransactionStatus,
    VehicleClass,
};

use crate::common::{LEGACY_HISTORY, open_registry, t0};

#[test]
fn ninety_minute_car_stay_costs_two_hours() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = open_registry(dir.path());

    registry.check_in("B 1234 XYZ", VehicleClass::Car, t0()).unwrap();
    let quote = registry
        .quote_checkout("B 1234 XYZ", t0() + TimeDelta::minutes(90), false)
        .unwrap();
    assert_eq!(quote.charged_hours, Some(2));
    assert_eq!(quote.amount_due, Amount::new(9000));

    let record = registry.settle(&quote, PaymentMethod::Cash).unwrap().clone();

    assert_eq!(record.id, TransactionId::new(1));
    assert_eq!(record.status, TransactionStatus::Paid);
    assert!(!registry.is_parked(&Plate::parse("B 1234 XYZ").unwrap()));
    assert_eq!(registry.list_history(), &[record]);
}

#[test]
fn ids_continue_from_existing_history() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(crate::common::HISTORY_FILE), LEGACY_HISTORY).unwrap();
    let mut registry = open_registry(dir.path());
    assert_eq!(registry.last_id(), TransactionId::new(5));

    for plate in ["F 1 A", "F 2 A"] {
        registry.check_in(plate, VehicleClass::Motorcycle, t0()).unwrap();
        let quote = registry
            .quote_checkout(plate, t0() + TimeDelta::hours(3), false)
            .unwrap();
        assert_eq!(quote.amount_due, Amount::new(7000));
        registry.settle(&quote, PaymentMethod::ElectronicMoney).unwrap();
    }

    let ids: Vec<u64> = registry
        .list_history()
        .iter()
        .map(|record| record.id.value())
        .collect();
    assert_eq!(ids, vec![7, 6, 3, 5, 1]);
}

#[test]
fn unknown_plate_wins_over_impossible_exit_date() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = open_registry(dir.path());
    let february_30 = ExitTime::Manual(ManualExitTime {
        year: 2025,
        month: 2,
        day: 30,
        hour: 10,
        minute: 0,
        second: 0,
    });

    let err = registry
        .quote_checkout_at("B 9 Z", february_30, t0(), false)
        .unwrap_err();
    assert!(matches!(err, ParkingError::VehicleNotFound { .. }));

    registry.check_in("B 9 Z", VehicleClass::Car, t0()).unwrap();
    let err = registry
        .quote_checkout_at("b 9 z", february_30, t0(), false)
        .unwrap_err();
    assert!(matches!(err, ParkingError::InvalidDate(_)));
    assert_eq!(registry.list_parked().len(), 1);
}

#[test]
fn manual_exit_time_prices_checkout() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = open_registry(dir.path());
    registry.check_in("B 1234 XYZ", VehicleClass::Car, t0()).unwrap();

    let exit = ExitTime::Manual(ManualExitTime {
        year: 2025,
        month: 6,
        day: 23,
        hour: 12,
        minute: 30,
        second: 0,
    })
    .resolve(t0())
    .unwrap();
    let quote = registry.quote_checkout("b 1234 xyz", exit, false).unwrap();

    assert_eq!(quote.charged_hours, Some(3));
    assert_eq!(quote.amount_due, Amount::new(13_000));
    assert_eq!(quote.duration.hours, 2);
    assert_eq!(quote.duration.minutes, 30);
}

#[test]
fn lost_ticket_overrides_elapsed_time() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = open_registry(dir.path());
    registry.check_in("B 9 Z", VehicleClass::Motorcycle, t0()).unwrap();

    let quote = registry
        .quote_checkout("B 9 Z", t0() + TimeDelta::days(2), true)
        .unwrap();
    let record = registry.settle(&quote, PaymentMethod::Cash).unwrap();

    assert_eq!(record.amount_due, Amount::new(50_000));
    assert_eq!(record.status, TransactionStatus::LostTicketPenalty);
}

#[test]
fn vehicle_can_park_again_after_checkout() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = open_registry(dir.path());

    registry.check_in("B 1 A", VehicleClass::Car, t0()).unwrap();
    let quote = registry
        .quote_checkout("B 1 A", t0() + TimeDelta::minutes(10), false)
        .unwrap();
    registry.settle(&quote, PaymentMethod::Cash).unwrap();

    let later = t0() + TimeDelta::hours(4);
    let vehicle = registry.check_in("B 1 A", VehicleClass::Car, later).unwrap();
    assert_eq!(vehicle.entry_time(), later);
}

#[test]
fn many_parked_vehicles_are_all_listed() {
    let dir = tempfile::tempdir().unwrap();
    let mut registry = open_registry(dir.path());

    for i in 0..1000 {
        registry
            .check_in(&format!("B {i} XYZ"), VehicleClass::Car, t0())
            .unwrap();
    }

    let parked = registry.list_parked();
    assert_eq!(parked.len(), 1000);
    assert!(
        parked
            .windows(2)
            .all(|pair| pair[0].plate() <= pair[1].plate())
    );
}
