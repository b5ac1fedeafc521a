//! Raw optical particle counter records

use chrono::NaiveDateTime;
use mints_core::{constants::bins::BIN_LABELS, MassConcentrations, ParticleCountBins};

use crate::{
    fields::{self, Fields},
    RecordError,
};

/// One raw record from the particle counter
#[derive(Debug, Clone, PartialEq)]
pub struct PmReading {
    /// When the counter produced the record
    pub date_time: NaiveDateTime,
    /// `pc0_1` through `pc10_0`
    pub counts: ParticleCountBins,
    /// `pm0_1` through `pm10_0`, as reported by the counter
    pub masses: MassConcentrations,
}

impl PmReading {
    /// Read all fourteen count and mass fields
    pub fn from_fields(fields: &Fields, date_time: NaiveDateTime) -> Result<Self, RecordError> {
        let mut counts = [0.0; BIN_LABELS.len()];
        let mut masses = [0.0; BIN_LABELS.len()];

        for (i, label) in BIN_LABELS.iter().enumerate() {
            counts[i] = fields::count(fields, &format!("pc{label}"))?;
            masses[i] = fields::number(fields, &format!("pm{label}"))?;
        }

        Ok(Self {
            date_time,
            counts: ParticleCountBins::new(counts)?,
            masses: MassConcentrations::new(masses),
        })
    }
}
