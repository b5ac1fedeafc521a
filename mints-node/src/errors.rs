//! Error Handling for the Node Pipeline
//!
//! Every error here is scoped to one incoming record. The orchestrator
//! returns it for that record and stays usable for the next one; nothing is
//! fatal to the host process.
//!
//! ```text
//! RecordError      → NodeError::Record      (bad fields, record skipped)
//! StoreError       → NodeError::Store       (climate reading not persisted)
//! SinkError        → NodeError::Sink        (corrected record not delivered)
//! CorrectionError  → NodeError::Correction  (growth law refused the humidity)
//! io::Error        → NodeError::Input       (replay input unreadable)
//! ```

use mints_connectors::{SinkError, StoreError};
use mints_core::CorrectionError;
use mints_schemas::RecordError;
use thiserror::Error;

/// Failures while handling one sensor record
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("Rejected record: {0}")]
    Record(#[from] RecordError),

    #[error("Climate store failed: {0}")]
    Store(#[from] StoreError),

    #[error("Record sink failed: {0}")]
    Sink(#[from] SinkError),

    #[error("Correction failed: {0}")]
    Correction(#[from] CorrectionError),

    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for node operations
pub type NodeResult<T> = Result<T, NodeError>;
