//! Integration tests for remember-me persistence through a store file.

use chrono::NaiveDate;
use intake_core::clock::FixedClock;
use intake_core::config::Config;
use intake_core::controller::FormController;
use intake_core::host::{intake_page, FormHost, FormSnapshot, MemoryDocument};
use intake_core::persistence::{KeyValueStore, StoreFile, Stores};

fn start(file: &StoreFile) -> (FormController, MemoryDocument) {
    let config = Config::default();
    let mut doc = intake_page(&config);
    let stores = file.load().unwrap();
    let mut controller = FormController::new(&config, stores)
        .with_clock(FixedClock(NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()));
    controller.initialize(&mut doc);
    (controller, doc)
}

#[test]
fn test_round_trip_across_visits() {
    let dir = tempfile::tempdir().unwrap();
    let file = StoreFile::new(dir.path().join("stores.json"));

    let (mut controller, mut doc) = start(&file);
    assert!(!doc.is_checked("remember-me"));
    controller.set_remember_me(&mut doc, true);
    controller.enter_value(&mut doc, "firstname", "Pat");
    controller.enter_value(&mut doc, "tel", "713-555-0100");
    controller.enter_value(&mut doc, "symptoms", "Headache");
    controller.enter_value(&mut doc, "passid", "Abcdef1!");
    file.save(controller.stores()).unwrap();

    let (controller, doc) = start(&file);
    assert!(doc.is_checked("remember-me"));
    assert_eq!(doc.value("firstname").as_deref(), Some("Pat"));
    assert_eq!(doc.value("tel").as_deref(), Some("713-555-0100"));
    assert_eq!(doc.value("symptoms").as_deref(), Some("Headache"));
    assert_eq!(doc.value("passid").as_deref(), Some(""));
    assert_eq!(controller.stores().cookies.get("phone").as_deref(), Some("713-555-0100"));
}

#[test]
fn test_opt_out_erases_persisted_fields() {
    let dir = tempfile::tempdir().unwrap();
    let file = StoreFile::new(dir.path().join("stores.json"));

    let mut stores = Stores::new();
    stores.cookies.set("firstName", "Pat");
    stores.cookies.set("email", "pat@example.com");
    stores.local.set("zip", "77002");
    stores.local.set("unrelated", "kept");
    file.save(&stores).unwrap();

    let (mut controller, mut doc) = start(&file);
    controller.set_remember_me(&mut doc, false);
    file.save(controller.stores()).unwrap();

    let reloaded = file.load().unwrap();
    assert!(reloaded.cookies.is_empty());
    assert!(reloaded.local.get("zip").is_none());
    assert_eq!(reloaded.local.get("unrelated").as_deref(), Some("kept"));

    let (_, doc) = start(&file);
    assert!(!doc.is_checked("remember-me"));
    assert_eq!(doc.value("zip").as_deref(), Some(""));
}

#[test]
fn test_input_without_remember_me_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let file = StoreFile::new(dir.path().join("stores.json"));

    let (mut controller, mut doc) = start(&file);
    controller.enter_value(&mut doc, "firstname", "Pat");
    controller.enter_value(&mut doc, "city", "Houston");

    assert!(controller.stores().cookies.is_empty());
    assert!(controller.stores().local.is_empty());
}

#[test]
fn test_snapshot_without_remember_flag_keeps_profile() {
    let dir = tempfile::tempdir().unwrap();
    let file = StoreFile::new(dir.path().join("stores.json"));

    let mut stores = Stores::new();
    stores.cookies.set("firstName", "Pat");
    stores.local.set("city", "Houston");
    file.save(&stores).unwrap();

    let (mut controller, mut doc) = start(&file);
    let snapshot = FormSnapshot::parse("[values]\nzip = \"77002\"\n", "toml").unwrap();
    assert_eq!(snapshot.remember_me, None);
    controller.fill(&mut doc, &snapshot).unwrap();
    file.save(controller.stores()).unwrap();

    let reloaded = file.load().unwrap();
    assert_eq!(reloaded.cookies.get("firstName").as_deref(), Some("Pat"));
    assert_eq!(reloaded.local.get("city").as_deref(), Some("Houston"));
    assert_eq!(reloaded.local.get("zip").as_deref(), Some("77002"));
    assert!(doc.is_checked("remember-me"));
}
