//! Configured tariffs feeding the registry.

use chrono::TimeDelta;

use parkir_config::ParkirConfig;
use parkir_types::{Amount, Tariff, VehicleClass};

use crate::common::{open_registry_with, t0};

#[test]
fn configured_tariffs_price_checkouts() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        r"
[tariffs.car]
first_hour = 8000

[penalty]
lost_ticket = 75000
",
    )
    .unwrap();
    let config = ParkirConfig::load_from(&config_path).unwrap().unwrap();
    let mut registry = open_registry_with(dir.path(), config.tariff_table());

    registry.check_in("B 1 A", VehicleClass::Car, t0()).unwrap();
    registry.check_in("B 2 A", VehicleClass::Motorcycle, t0()).unwrap();

    let car = registry
        .quote_checkout("B 1 A", t0() + TimeDelta::minutes(90), false)
        .unwrap();
    assert_eq!(car.amount_due, Amount::new(12_000));

    let motorcycle = registry
        .quote_checkout("B 2 A", t0() + TimeDelta::minutes(90), false)
        .unwrap();
    assert_eq!(motorcycle.amount_due, Amount::new(5000));

    let lost = registry.quote_checkout("B 2 A", t0(), true).unwrap();
    assert_eq!(lost.amount_due, Amount::new(75_000));
}

#[test]
fn persisted_tariff_is_picked_up_on_next_load() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "# operator settings\n[app]\nsite_name = \"Gambir\"\n").unwrap();

    ParkirConfig::persist_tariff(
        &config_path,
        VehicleClass::Motorcycle,
        Tariff::new(Amount::new(2500), Amount::new(1000)),
    )
    .unwrap();

    let text = std::fs::read_to_string(&config_path).unwrap();
    assert!(text.starts_with("# operator settings"));

    let config = ParkirConfig::load_from(&config_path).unwrap().unwrap();
    assert_eq!(config.site_name(), "Gambir");
    let mut registry = open_registry_with(dir.path(), config.tariff_table());
    registry.check_in("D 1 B", VehicleClass::Motorcycle, t0()).unwrap();
    let quote = registry
        .quote_checkout("D 1 B", t0() + TimeDelta::hours(3), false)
        .unwrap();
    assert_eq!(quote.amount_due, Amount::new(4500));
}
