//! Record sinks
//!
//! A sink receives `(timestamp, record type, record)` for every finished
//! particle record. JSON-lines output uses one envelope per line:
//!
//! ```json
//! {"timestamp":"2024-05-01 12:00:00.000000","recordType":"IPS7100MC","record":{"dateTime":..}}
//! ```

use std::io::Write;

use chrono::NaiveDateTime;
use mints_schemas::CorrectedRecord;
use serde::{Deserialize, Serialize};

use crate::SinkError;

/// Downstream consumer of corrected records
pub trait RecordSink {
    /// Deliver one record
    fn emit(
        &mut self,
        timestamp: &NaiveDateTime,
        record_type: &str,
        record: &CorrectedRecord,
    ) -> Result<(), SinkError>;
}

/// A record as delivered to a sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmittedRecord {
    #[serde(with = "mints_schemas::timestamp")]
    pub timestamp: NaiveDateTime,
    pub record_type: String,
    pub record: CorrectedRecord,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    timestamp: String,
    record_type: &'a str,
    record: &'a CorrectedRecord,
}

/// Writes one JSON object per line
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    /// Sink over any writer
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Records written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn emit(
        &mut self,
        timestamp: &NaiveDateTime,
        record_type: &str,
        record: &CorrectedRecord,
    ) -> Result<(), SinkError> {
        let envelope = Envelope {
            timestamp: mints_schemas::timestamp::format(timestamp),
            record_type,
            record,
        };
        serde_json::to_writer(&mut self.writer, &envelope)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }
}

/// Collects records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Everything emitted, in order
    pub records: Vec<EmittedRecord>,
}

impl MemorySink {
    /// Empty sink
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn emit(
        &mut self,
        timestamp: &NaiveDateTime,
        record_type: &str,
        record: &CorrectedRecord,
    ) -> Result<(), SinkError> {
        self.records.push(EmittedRecord {
            timestamp: *timestamp,
            record_type: record_type.to_string(),
            record: record.clone(),
        });
        Ok(())
    }
}
