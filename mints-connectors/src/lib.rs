//! Storage and Output for the Correction Pipeline
//!
//! ## Overview
//!
//! The correction itself is pure. Two things around it are not:
//!
//! - The **climate store** remembers the latest climate reading per node and
//!   climate sensor. Climate and particle records arrive independently, often
//!   from different processes, so the pairing goes through durable storage.
//! - The **record sink** receives every finished record. On a node this is
//!   the sensor finisher that writes CSV and publishes; in tests and replay it
//!   is a vector or a JSON-lines stream.
//!
//! ## Climate Store Layout
//!
//! ```text
//! <root>/
//!   001e0610c2e7/
//!     BME280V2.json   {"dateTime": "2024-05-01 12:00:00.000000", "temperature": ..}
//!     WIMDA.json
//! ```
//!
//! One reading per file, overwritten in place. Writers go through a temporary
//! file and a rename, so a reader never sees a half-written reading. A file
//! that is missing or fails to parse reads as "no reading".
//!
//! ## Example Usage
//!
//! ```rust
//! use mints_connectors::{ClimateStore, MemoryClimateStore};
//! use mints_schemas::{timestamp, ClimateReading};
//!
//! let store = MemoryClimateStore::new();
//! let reading = ClimateReading {
//!     date_time: timestamp::parse("2024-05-01 12:00:00")?,
//!     temperature: 10.0,
//!     pressure: 1000.0,
//!     humidity: 60.0,
//!     dew_point: 9.0,
//! };
//!
//! store.save("001e0610c2e7", "BME280V2", &reading)?;
//! assert_eq!(store.load("001e0610c2e7", "BME280V2")?, Some(reading));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod sink;
pub mod store;

// Re-export common types
pub use sink::{EmittedRecord, JsonLinesSink, MemorySink, RecordSink};
pub use store::{ClimateStore, FileClimateStore, MemoryClimateStore};

use thiserror::Error;

/// Climate store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),

    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode reading: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Record sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Sink I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}
