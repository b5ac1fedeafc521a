//! Replay of recorded sensor output
//!
//! Feeds JSON lines through an orchestrator in file order. A line that fails
//! to parse or is rejected by the pipeline is logged and counted, and the
//! replay moves on. Sink and input failures stop it, since every later
//! record would be lost the same way.

use std::io::BufRead;

use log::warn;
use mints_connectors::{ClimateStore, RecordSink};

use crate::{
    conversion::SensorRecord,
    errors::{NodeError, NodeResult},
    orchestrator::{CorrectionOrchestrator, Outcome},
};

/// What a replay did with its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplaySummary {
    /// Climate readings stored
    pub climate: usize,
    /// Particle records emitted
    pub emitted: usize,
    /// Readings from other sensors
    pub ignored: usize,
    /// Lines skipped because of an error
    pub rejected: usize,
}

/// Push every non-blank line of `input` through `orchestrator`
pub fn replay<R, S, K>(
    input: R,
    orchestrator: &mut CorrectionOrchestrator<S, K>,
) -> NodeResult<ReplaySummary>
where
    R: BufRead,
    S: ClimateStore,
    K: RecordSink,
{
    let mut summary = ReplaySummary::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let result = SensorRecord::from_json_line(&line)
            .map_err(NodeError::from)
            .and_then(|record| orchestrator.handle_record(&record));

        match result {
            Ok(Outcome::ClimateStored(_)) => summary.climate += 1,
            Ok(Outcome::Emitted(_)) => summary.emitted += 1,
            Ok(Outcome::Ignored) => summary.ignored += 1,
            Err(e @ NodeError::Sink(_)) => return Err(e),
            Err(e) => {
                summary.rejected += 1;
                warn!("line {}: {e}", index + 1);
            }
        }
    }

    Ok(summary)
}
