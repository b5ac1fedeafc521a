//! End-to-end scenarios through the orchestrator

use std::io::{self, Cursor};

use chrono::NaiveDateTime;
use mints_connectors::{
    ClimateStore, FileClimateStore, MemoryClimateStore, MemorySink, RecordSink, SinkError,
    StoreError,
};
use mints_core::ValidityFlags;
use mints_ml::{FeatureRow, MlRefiner, MlResult};
use mints_node::{
    replay, CorrectionConfig, CorrectionOrchestrator, NodeError, Outcome, SensorRecord,
};
use mints_schemas::{timestamp, ClimateReading, CorrectedRecord, Fields};
use proptest::prelude::*;
use serde_json::json;
use tempfile::TempDir;

const RAW_COUNTS: [i64; 7] = [100, 50, 30, 20, 10, 5, 2];
const RAW_MASSES: [f64; 7] = [0.5, 1.1, 1.9, 3.2, 4.8, 6.0, 7.5];

fn at(text: &str) -> NaiveDateTime {
    timestamp::parse(text).unwrap()
}

fn pm_fields(counts: [f64; 7]) -> Fields {
    serde_json::from_value(json!({
        "pc0_1": counts[0], "pc0_3": counts[1], "pc0_5": counts[2], "pc1_0": counts[3],
        "pc2_5": counts[4], "pc5_0": counts[5], "pc10_0": counts[6],
        "pm0_1": RAW_MASSES[0], "pm0_3": RAW_MASSES[1], "pm0_5": RAW_MASSES[2],
        "pm1_0": RAW_MASSES[3], "pm2_5": RAW_MASSES[4], "pm5_0": RAW_MASSES[5],
        "pm10_0": RAW_MASSES[6]
    }))
    .unwrap()
}

fn raw_pm_fields() -> Fields {
    pm_fields(RAW_COUNTS.map(|c| c as f64))
}

fn bme280(temperature: f64, humidity: f64, dew_point: f64) -> Fields {
    serde_json::from_value(json!({
        "temperature": temperature, "pressure": 1000.0, "humidity": humidity, "dewPoint": dew_point
    }))
    .unwrap()
}

fn memory_orchestrator(refiner: MlRefiner) -> CorrectionOrchestrator<MemoryClimateStore, MemorySink> {
    CorrectionOrchestrator::new(
        CorrectionConfig::default(),
        MemoryClimateStore::new(),
        MemorySink::new(),
        refiner,
    )
}

/// Store a climate reading, then process one particle record at the same time
fn run(
    orchestrator: &mut CorrectionOrchestrator<MemoryClimateStore, MemorySink>,
    climate: Fields,
) -> CorrectedRecord {
    let now = at("2024-05-01 12:00:00");
    orchestrator.handle("BME280V2", &climate, now).unwrap();
    match orchestrator.handle("IPS7100", &raw_pm_fields(), now).unwrap() {
        Outcome::Emitted(record) => record,
        other => panic!("expected a record, got {other:?}"),
    }
}

fn assert_monotonic(masses: &[f64; 7]) {
    for pair in masses.windows(2) {
        assert!(pair[1] >= pair[0], "masses not monotonic: {masses:?}");
    }
}

#[test]
fn dry_spread_bypasses_correction() {
    let mut orchestrator = memory_orchestrator(MlRefiner::without_model());
    let record = run(&mut orchestrator, bme280(25.0, 60.0, 10.0));

    assert_eq!(record.counts(), RAW_COUNTS);
    assert_eq!(record.masses(), RAW_MASSES);
    assert_eq!(record.pm2_5_ml, RAW_MASSES[4]);
    assert!(record.climate_null_validity);
    assert!(record.climate_validity);
    assert!(record.climate_date_time_validity);
    assert!(record.humidity_validity);
    assert!(!record.dew_point_validity);
    assert!(!record.ml_validity);
    assert_eq!(record.temperature, 25.0);
}

#[test]
fn near_saturation_applies_correction() {
    let mut orchestrator = memory_orchestrator(MlRefiner::without_model());
    let record = run(&mut orchestrator, bme280(10.0, 60.0, 9.0));

    assert!(record.flags().all_pass());
    assert_ne!(record.counts(), RAW_COUNTS);
    assert_eq!(record.counts(), [80, 55, 26, 17, 10, 4, 2]);
    assert_monotonic(&record.masses());
    assert!(record.pm2_5_ml.is_finite());
    assert_eq!(record.pm2_5_ml, record.pm2_5);
    assert!(!record.ml_validity);
    // Carried climate values are the measured ones
    assert_eq!(record.humidity, 60.0);
}

#[test]
fn calibration_model_refines_pm2_5() {
    let model = |row: &FeatureRow| -> MlResult<f64> { Ok(row.values()[0] + row.values()[5]) };
    let mut orchestrator = memory_orchestrator(MlRefiner::new(model));
    let record = run(&mut orchestrator, bme280(10.0, 60.0, 9.0));

    assert!(record.ml_validity);
    assert!((record.pm2_5_ml - (record.pm2_5 + 1.0)).abs() < 1e-12);
}

#[test]
fn missing_climate_uses_sentinels() {
    let mut orchestrator = memory_orchestrator(MlRefiner::without_model());
    let outcome = orchestrator
        .handle("IPS7100", &raw_pm_fields(), at("2024-05-01 12:00:00"))
        .unwrap();
    let Outcome::Emitted(record) = outcome else {
        panic!("expected a record");
    };

    assert_eq!(record.counts(), RAW_COUNTS);
    assert_eq!(record.flags(), ValidityFlags::default());
    assert_eq!(
        [record.temperature, record.pressure, record.humidity, record.dew_point],
        [-100.0; 4]
    );
}

#[test]
fn stale_climate_bypasses_correction() {
    let mut orchestrator = memory_orchestrator(MlRefiner::without_model());
    orchestrator
        .handle("BME280V2", &bme280(10.0, 60.0, 9.0), at("2024-05-01 12:00:00"))
        .unwrap();
    let outcome = orchestrator
        .handle("IPS7100", &raw_pm_fields(), at("2024-05-01 12:05:00"))
        .unwrap();
    let Outcome::Emitted(record) = outcome else {
        panic!("expected a record");
    };

    assert!(record.climate_validity);
    assert!(!record.climate_date_time_validity);
    assert!(!record.humidity_validity && !record.dew_point_validity);
    assert_eq!(record.counts(), RAW_COUNTS);
}

#[test]
fn malformed_pm_record_is_rejected_alone() {
    let mut orchestrator = memory_orchestrator(MlRefiner::without_model());
    let mut fields = raw_pm_fields();
    fields.remove("pc5_0");

    let now = at("2024-05-01 12:00:00");
    assert!(matches!(
        orchestrator.handle("IPS7100", &fields, now),
        Err(NodeError::Record(_))
    ));
    assert!(orchestrator.sink().records.is_empty());

    orchestrator.handle("IPS7100", &raw_pm_fields(), now).unwrap();
    assert_eq!(orchestrator.sink().records.len(), 1);
}

#[test]
fn emitted_under_configured_record_type() {
    let mut orchestrator = memory_orchestrator(MlRefiner::without_model());
    run(&mut orchestrator, bme280(10.0, 60.0, 9.0));

    let (_, sink) = orchestrator.into_parts();
    assert_eq!(sink.records.len(), 1);
    assert_eq!(sink.records[0].record_type, "IPS7100MC");
    assert_eq!(sink.records[0].timestamp, at("2024-05-01 12:00:00"));
}

#[test]
fn weather_station_climate_source() {
    let config = CorrectionConfig {
        climate_sensor_id: "WIMDA".to_string(),
        ..CorrectionConfig::default()
    };
    let mut orchestrator = CorrectionOrchestrator::new(
        config,
        MemoryClimateStore::new(),
        MemorySink::new(),
        MlRefiner::without_model(),
    );
    let wimda: Fields = serde_json::from_value(json!({
        "airTemperature": "10.0", "barrometricPressureBars": "1.0",
        "relativeHumidity": "60.0", "dewPoint": "9.0"
    }))
    .unwrap();

    let now = at("2024-05-01 12:00:00");
    orchestrator.handle("WIMDA", &wimda, now).unwrap();
    let Outcome::Emitted(record) = orchestrator.handle("IPS7100", &raw_pm_fields(), now).unwrap() else {
        panic!("expected a record");
    };

    assert_eq!(record.pressure, 1000.0);
    assert!(record.flags().all_pass());
}

#[test]
fn file_store_pairs_records_across_orchestrators() {
    let dir = TempDir::new().unwrap();
    let config = CorrectionConfig {
        node_id: "00:1E:06:10:C2:E7".to_string(),
        store_dir: dir.path().to_path_buf(),
        ..CorrectionConfig::default()
    };

    // The climate and particle readers run as separate processes on a node
    let mut climate_reader = CorrectionOrchestrator::from_config(config.clone(), MemorySink::new());
    let line = r#"{"sensorID": "BME280V2", "dateTime": "2024-05-01 11:59:30.500000",
                   "fields": {"temperature": "10.0", "pressure": "1000.0", "humidity": "60.0", "dewPoint": "9.0"}}"#;
    climate_reader
        .handle_record(&SensorRecord::from_json_line(line).unwrap())
        .unwrap();

    let stored = FileClimateStore::new(dir.path())
        .load("001e0610c2e7", "BME280V2")
        .unwrap()
        .unwrap();
    assert_eq!(timestamp::format(&stored.date_time), "2024-05-01 11:59:30.500000");

    let mut pm_reader = CorrectionOrchestrator::from_config(config, MemorySink::new());
    let Outcome::Emitted(record) = pm_reader
        .handle("IPS7100", &raw_pm_fields(), at("2024-05-01 12:00:00"))
        .unwrap()
    else {
        panic!("expected a record");
    };
    assert!(record.flags().all_pass());
}

/// Store whose disk can fail on read, write or both
#[derive(Default)]
struct FlakyStore {
    inner: MemoryClimateStore,
    fail_load: bool,
    fail_save: bool,
}

impl ClimateStore for FlakyStore {
    fn load(&self, node_id: &str, sensor_id: &str) -> Result<Option<ClimateReading>, StoreError> {
        if self.fail_load {
            return Err(io::Error::other("disk read failed").into());
        }
        self.inner.load(node_id, sensor_id)
    }

    fn save(&self, node_id: &str, sensor_id: &str, reading: &ClimateReading) -> Result<(), StoreError> {
        if self.fail_save {
            return Err(io::Error::other("disk full").into());
        }
        self.inner.save(node_id, sensor_id, reading)
    }
}

/// Sink whose downstream is gone
struct ClosedSink;

impl RecordSink for ClosedSink {
    fn emit(&mut self, _: &NaiveDateTime, _: &str, _: &CorrectedRecord) -> Result<(), SinkError> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "publisher gone").into())
    }
}

#[test]
fn store_write_failure_is_reported() {
    let store = FlakyStore { fail_save: true, ..FlakyStore::default() };
    let mut orchestrator = CorrectionOrchestrator::new(
        CorrectionConfig::default(),
        store,
        MemorySink::new(),
        MlRefiner::without_model(),
    );

    let result = orchestrator.handle("BME280V2", &bme280(10.0, 60.0, 9.0), at("2024-05-01 12:00:00"));
    assert!(matches!(result, Err(NodeError::Store(StoreError::Io(_)))));
    assert!(orchestrator.sink().records.is_empty());
}

#[test]
fn store_read_failure_counts_as_no_climate() {
    let store = FlakyStore { fail_load: true, ..FlakyStore::default() };
    let mut orchestrator = CorrectionOrchestrator::new(
        CorrectionConfig::default(),
        store,
        MemorySink::new(),
        MlRefiner::without_model(),
    );

    let now = at("2024-05-01 12:00:00");
    orchestrator.handle("BME280V2", &bme280(10.0, 60.0, 9.0), now).unwrap();
    let Outcome::Emitted(record) = orchestrator.handle("IPS7100", &raw_pm_fields(), now).unwrap() else {
        panic!("expected a record");
    };

    assert!(!record.climate_null_validity);
    assert_eq!(record.flags(), ValidityFlags::default());
    assert_eq!(record.counts(), RAW_COUNTS);
    assert_eq!(record.temperature, -100.0);
    assert_eq!(orchestrator.sink().records.len(), 1);
}

#[test]
fn sink_failure_is_reported() {
    let mut orchestrator = CorrectionOrchestrator::new(
        CorrectionConfig::default(),
        MemoryClimateStore::new(),
        ClosedSink,
        MlRefiner::without_model(),
    );

    let result = orchestrator.handle("IPS7100", &raw_pm_fields(), at("2024-05-01 12:00:00"));
    assert!(matches!(result, Err(NodeError::Sink(SinkError::Io(_)))));
}

#[test]
fn sink_failure_stops_replay() {
    let mut orchestrator = CorrectionOrchestrator::new(
        CorrectionConfig::default(),
        MemoryClimateStore::new(),
        ClosedSink,
        MlRefiner::without_model(),
    );
    let input = r#"{"sensorID": "IPS7100", "dateTime": "2024-05-01 12:00:00", "fields": {"pc0_1": 100, "pc0_3": 50, "pc0_5": 30, "pc1_0": 20, "pc2_5": 10, "pc5_0": 5, "pc10_0": 2, "pm0_1": 0.5, "pm0_3": 1.1, "pm0_5": 1.9, "pm1_0": 3.2, "pm2_5": 4.8, "pm5_0": 6.0, "pm10_0": 7.5}}"#;

    let result = replay(Cursor::new(input), &mut orchestrator);
    assert!(matches!(result, Err(NodeError::Sink(_))));
}

#[test]
fn climate_sensor_without_known_shape_is_ignored() {
    let config = CorrectionConfig {
        climate_sensor_id: "SHT31".to_string(),
        ..CorrectionConfig::default()
    };
    let mut orchestrator = CorrectionOrchestrator::new(
        config,
        MemoryClimateStore::new(),
        MemorySink::new(),
        MlRefiner::without_model(),
    );

    let now = at("2024-05-01 12:00:00");
    let outcome = orchestrator.handle("SHT31", &bme280(10.0, 60.0, 9.0), now).unwrap();
    assert_eq!(outcome, Outcome::Ignored);
    assert_eq!(orchestrator.store().load("xxxxxxxx", "SHT31").unwrap(), None);
    assert!(orchestrator.sink().records.is_empty());

    // Particle records still go out, uncorrected
    let Outcome::Emitted(record) = orchestrator.handle("IPS7100", &raw_pm_fields(), now).unwrap() else {
        panic!("expected a record");
    };
    assert!(!record.climate_null_validity);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bypass_conserves_raw_values(
        counts in prop::array::uniform7(0u32..20_000),
        temperature in -20.0f64..50.0,
        humidity in 0.0f64..40.0,
    ) {
        let mut orchestrator = memory_orchestrator(MlRefiner::without_model());
        let now = at("2024-05-01 12:00:00");
        orchestrator.handle("BME280V2", &bme280(temperature, humidity, temperature - 1.0), now).unwrap();

        let Outcome::Emitted(record) = orchestrator.handle("IPS7100", &pm_fields(counts.map(f64::from)), now).unwrap() else {
            panic!("expected a record");
        };
        prop_assert!(!record.humidity_validity);
        prop_assert_eq!(record.counts(), counts.map(i64::from));
        prop_assert_eq!(record.masses(), RAW_MASSES);
    }

    #[test]
    fn corrected_output_is_finite(
        counts in prop::array::uniform7(0u32..20_000),
        humidity in 40.5f64..100.0,
    ) {
        let mut orchestrator = memory_orchestrator(MlRefiner::without_model());
        let now = at("2024-05-01 12:00:00");
        orchestrator.handle("BME280V2", &bme280(15.0, humidity, 14.0), now).unwrap();

        let Outcome::Emitted(record) = orchestrator.handle("IPS7100", &pm_fields(counts.map(f64::from)), now).unwrap() else {
            panic!("expected a record");
        };
        prop_assert!(record.flags().all_pass());
        prop_assert!(record.masses().iter().all(|m| m.is_finite()));
        prop_assert!(record.pm2_5_ml.is_finite());
    }
}
