//! Per-record correction orchestrator
//!
//! Records arrive one at a time from the node's reader loops:
//!
//! ```text
//! climate sensor ──► normalize ──► ClimateStore
//!
//! particle sensor ──► PmReading ──► ValidityGate ──┬─ pass ──► HumidityCorrection ──► MlRefiner ─┐
//!                          ▲                      └─ fail ──► raw counts and masses ───────────┤
//!                          │                                                                   ▼
//!                    ClimateStore                                           CorrectedRecord ──► RecordSink
//!
//! anything else ──► ignored
//! ```
//!
//! The orchestrator holds no per-record state; the only memory between
//! records is the climate store.

use chrono::NaiveDateTime;
use log::{debug, info, warn};
use mints_connectors::{ClimateStore, FileClimateStore, RecordSink};
use mints_core::{HumidityCorrection, ValidityGate};
use mints_ml::{MlRefiner, Refinement};
use mints_schemas::{
    record::RecordParts, timestamp, ClimateReading, ClimateSource, CorrectedRecord, Fields,
    PmReading,
};

use crate::{config::CorrectionConfig, conversion::SensorRecord, errors::NodeResult};

/// What handling one record did
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A climate reading was normalized and stored
    ClimateStored(ClimateReading),
    /// A particle record was processed and emitted
    Emitted(CorrectedRecord),
    /// The sensor is not part of this pipeline
    Ignored,
}

/// Routes sensor records through the correction pipeline
pub struct CorrectionOrchestrator<S, K> {
    config: CorrectionConfig,
    node_id: String,
    gate: ValidityGate,
    correction: HumidityCorrection,
    refiner: MlRefiner,
    store: S,
    sink: K,
}

impl<K: RecordSink> CorrectionOrchestrator<FileClimateStore, K> {
    /// File-backed store and model file taken from the configuration
    pub fn from_config(config: CorrectionConfig, sink: K) -> Self {
        let store = FileClimateStore::new(config.store_dir.clone());
        let refiner = MlRefiner::from_path(config.model_path.as_deref());
        Self::new(config, store, sink, refiner)
    }
}

impl<S: ClimateStore, K: RecordSink> CorrectionOrchestrator<S, K> {
    /// Orchestrator over explicit collaborators
    pub fn new(config: CorrectionConfig, store: S, sink: K, refiner: MlRefiner) -> Self {
        let node_id = config.node_identity();
        info!(
            "Correcting {} against {} for node {} (model loaded: {})",
            config.pm_sensor_id,
            config.climate_sensor_id,
            node_id,
            refiner.has_model()
        );
        Self {
            gate: ValidityGate::new(config.gate_thresholds()),
            correction: HumidityCorrection::default(),
            node_id,
            config,
            refiner,
            store,
            sink,
        }
    }

    /// Configuration in use
    pub fn config(&self) -> &CorrectionConfig {
        &self.config
    }

    /// Climate store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record sink
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Give back the store and sink
    pub fn into_parts(self) -> (S, K) {
        (self.store, self.sink)
    }

    /// Handle a parsed sensor record
    pub fn handle_record(&mut self, record: &SensorRecord) -> NodeResult<Outcome> {
        self.handle(&record.sensor_id, &record.fields, record.date_time)
    }

    /// Handle one sensor reading
    pub fn handle(
        &mut self,
        sensor_id: &str,
        fields: &Fields,
        date_time: NaiveDateTime,
    ) -> NodeResult<Outcome> {
        if sensor_id == self.config.climate_sensor_id {
            self.keep_climate(sensor_id, fields, date_time)
        } else if sensor_id == self.config.pm_sensor_id {
            self.correct(fields, date_time).map(Outcome::Emitted)
        } else {
            Ok(Outcome::Ignored)
        }
    }

    fn keep_climate(
        &mut self,
        sensor_id: &str,
        fields: &Fields,
        date_time: NaiveDateTime,
    ) -> NodeResult<Outcome> {
        let Some(source) = ClimateSource::from_sensor_id(sensor_id) else {
            warn!("No climate shape known for sensor {sensor_id}, reading not stored");
            return Ok(Outcome::Ignored);
        };

        let reading = source.normalize(fields, date_time)?;
        self.store.save(&self.node_id, sensor_id, &reading)?;
        debug!("Stored {sensor_id} reading from {}", timestamp::format(&date_time));
        Ok(Outcome::ClimateStored(reading))
    }

    fn load_climate(&self) -> Option<ClimateReading> {
        match self.store.load(&self.node_id, &self.config.climate_sensor_id) {
            Ok(reading) => reading,
            Err(e) => {
                warn!("Climate reading unavailable: {e}");
                None
            }
        }
    }

    fn correct(&mut self, fields: &Fields, date_time: NaiveDateTime) -> NodeResult<CorrectedRecord> {
        let pm = PmReading::from_fields(fields, date_time)?;
        let climate = self.load_climate();

        let conditions = climate.as_ref().map(ClimateReading::conditions);
        let age_secs = climate.as_ref().map_or(f64::INFINITY, |c| {
            timestamp::seconds_between(&c.date_time, &date_time)
        });
        let flags = self.gate.evaluate(conditions.as_ref(), age_secs);

        let (counts, masses, refinement) = match conditions {
            Some(conditions) if flags.all_pass() => {
                let corrected = self.correction.apply(&pm.counts, conditions.humidity)?;
                let refinement = self.refiner.refine(corrected.masses.pm2_5(), &conditions);
                (corrected.counts, corrected.masses, refinement)
            }
            _ => {
                debug!(
                    "Correction bypassed: {}",
                    flags.bypass_reason().unwrap_or("unknown")
                );
                let refinement = Refinement {
                    pm2_5: pm.masses.pm2_5(),
                    applied: false,
                };
                (*pm.counts.counts(), pm.masses, refinement)
            }
        };

        let record = CorrectedRecord::assemble(RecordParts {
            date_time,
            counts: &counts,
            masses: &masses,
            pm2_5_ml: refinement.pm2_5,
            ml_applied: refinement.applied,
            climate: climate.as_ref(),
            flags,
        });

        self.sink.emit(&date_time, &self.config.record_type, &record)?;
        Ok(record)
    }
}
