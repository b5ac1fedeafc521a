//! Record Shapes for the MINTS Particulate-Matter Correction
//!
//! ## Overview
//!
//! Sensors on a MINTS node report each reading as an ordered set of named
//! fields. This crate turns those loose field maps into typed records and
//! back again:
//!
//! - [`climate::ClimateReading`]: the one climate shape the correction
//!   consumes, normalized from either an ambient sensor (`BME280V2`) or a
//!   weather-station sentence (`WIMDA`).
//! - [`pm::PmReading`]: seven raw particle counts and seven raw masses from
//!   the optical counter.
//! - [`record::CorrectedRecord`]: the published output, with its field order
//!   fixed so downstream CSV writers produce stable columns.
//!
//! ## Field Values
//!
//! Drivers are not consistent about types. A temperature may arrive as the
//! JSON number `21.5` or as the string `"21.5"`; both are accepted. Anything
//! else (missing, `null`, non-numeric text, NaN) rejects the whole record with
//! a [`RecordError`] naming the field.
//!
//! ## Timestamps
//!
//! Timestamps are naive local times written as `%Y-%m-%d %H:%M:%S.%6f`.
//! They are kept at microsecond resolution so that a persisted climate
//! reading reads back bit-for-bit.
//!
//! ## Usage Example
//!
//! ```rust
//! use mints_schemas::{climate::ClimateSource, timestamp, Fields};
//! use serde_json::json;
//!
//! let fields: Fields = serde_json::from_value(json!({
//!     "temperature": "10.0", "pressure": 1000.0, "humidity": 60.0, "dewPoint": 9.0
//! }))?;
//! let at = timestamp::parse("2024-05-01 12:00:00.000000")?;
//!
//! let reading = ClimateSource::Bme280.normalize(&fields, at)?;
//! assert_eq!(reading.temperature, 10.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod climate;
pub mod fields;
pub mod pm;
pub mod record;
pub mod timestamp;

pub use climate::{ClimateReading, ClimateSource};
pub use fields::Fields;
pub use pm::PmReading;
pub use record::CorrectedRecord;

use thiserror::Error;

/// Reasons a single sensor record is rejected
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Field {field} is not a finite number: {value}")]
    NotNumeric { field: String, value: String },

    #[error("Field {field} holds a negative count: {value}")]
    NegativeCount { field: String, value: f64 },

    #[error("Malformed record: {0}")]
    Malformed(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Rejected by correction engine: {0}")]
    Correction(#[from] mints_core::CorrectionError),
}
