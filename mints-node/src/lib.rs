//! MINTS Node Particulate-Matter Correction
//!
//! Glue between a node's sensor reader loops and the correction engine. One
//! call per sensor reading:
//!
//! ```rust,no_run
//! use mints_connectors::JsonLinesSink;
//! use mints_node::{CorrectionConfig, CorrectionOrchestrator, SensorRecord};
//!
//! let config = CorrectionConfig::from_file("correction.json".as_ref())?;
//! let mut orchestrator = CorrectionOrchestrator::from_config(config, JsonLinesSink::new(std::io::stdout()));
//!
//! let line = r#"{"sensorID": "IPS7100", "dateTime": "2024-05-01 12:00:00", "fields": {}}"#;
//! let record = SensorRecord::from_json_line(line)?;
//! orchestrator.handle_record(&record)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Climate readings update the store, particle readings produce a
//! corrected record on the sink, and all other sensors are ignored. See
//! [`orchestrator`] for the flow.

pub mod config;
pub mod conversion;
pub mod errors;
pub mod orchestrator;
pub mod replay;

pub use config::{normalize_node_id, CorrectionConfig};
pub use conversion::SensorRecord;
pub use errors::{NodeError, NodeResult};
pub use orchestrator::{CorrectionOrchestrator, Outcome};
pub use replay::{replay, ReplaySummary};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
