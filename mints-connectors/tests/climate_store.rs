//! File climate store behaviour against a real directory

use std::fs;

use mints_connectors::{ClimateStore, FileClimateStore, StoreError};
use mints_schemas::{timestamp, ClimateReading};
use proptest::prelude::*;
use tempfile::TempDir;

const NODE: &str = "001e0610c2e7";
const SENSOR: &str = "BME280V2";

fn reading(text: &str, temperature: f64) -> ClimateReading {
    ClimateReading {
        date_time: timestamp::parse(text).unwrap(),
        temperature,
        pressure: 1013.25,
        humidity: 61.3,
        dew_point: 9.87,
    }
}

#[test]
fn missing_reading_is_absent() {
    let dir = TempDir::new().unwrap();
    let store = FileClimateStore::new(dir.path());
    assert_eq!(store.load(NODE, SENSOR).unwrap(), None);
}

#[test]
fn read_after_write_is_exact() {
    let dir = TempDir::new().unwrap();
    let store = FileClimateStore::new(dir.path());
    let written = reading("2024-05-01 12:34:56.789012", 21.123456789);

    store.save(NODE, SENSOR, &written).unwrap();
    assert_eq!(store.load(NODE, SENSOR).unwrap(), Some(written));

    let text = fs::read_to_string(dir.path().join(NODE).join("BME280V2.json")).unwrap();
    assert!(text.contains("\"dateTime\":\"2024-05-01 12:34:56.789012\""));
    assert!(text.contains("\"dewPoint\""));
}

#[test]
fn writing_twice_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = FileClimateStore::new(dir.path());
    let path = store.path_for(NODE, SENSOR).unwrap();
    let written = reading("2024-05-01 12:00:00", 10.0);

    store.save(NODE, SENSOR, &written).unwrap();
    let first = fs::read(&path).unwrap();
    store.save(NODE, SENSOR, &written).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn newer_reading_replaces_older() {
    let dir = TempDir::new().unwrap();
    let store = FileClimateStore::new(dir.path());
    store.save(NODE, SENSOR, &reading("2024-05-01 12:00:00", 10.0)).unwrap();
    store.save(NODE, SENSOR, &reading("2024-05-01 12:01:00", 11.0)).unwrap();

    let latest = store.load(NODE, SENSOR).unwrap().unwrap();
    assert_eq!(latest.temperature, 11.0);
}

#[test]
fn corrupt_file_reads_as_absent() {
    let dir = TempDir::new().unwrap();
    let store = FileClimateStore::new(dir.path());
    let path = store.path_for(NODE, SENSOR).unwrap();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{\"dateTime\": \"not a time\"").unwrap();

    assert_eq!(store.load(NODE, SENSOR).unwrap(), None);
}

#[test]
fn path_like_keys_are_refused() {
    let dir = TempDir::new().unwrap();
    let store = FileClimateStore::new(dir.path());
    let result = store.save("../escape", SENSOR, &reading("2024-05-01 12:00:00", 10.0));
    assert!(matches!(result, Err(StoreError::InvalidKey(_))));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_finite_reading_round_trips(
        micros in 0u32..1_000_000,
        temperature in -20.0f64..50.0,
        humidity in 0.0f64..100.0,
        pressure in 800.0f64..1100.0,
    ) {
        let dir = TempDir::new().unwrap();
        let store = FileClimateStore::new(dir.path());
        let written = ClimateReading {
            date_time: timestamp::parse(&format!("2024-05-01 12:00:00.{micros:06}")).unwrap(),
            temperature,
            pressure,
            humidity,
            dew_point: temperature - 3.0,
        };
        store.save(NODE, SENSOR, &written).unwrap();
        prop_assert_eq!(store.load(NODE, SENSOR).unwrap(), Some(written));
    }
}
