//! Replay sensor records through the correction pipeline
//!
//! Usage:
//!   mints-correct <config.json> [records.jsonl]
//!
//! Reads one `{"sensorID", "dateTime", "fields"}` object per line from the
//! file (or stdin) and writes every corrected record to stdout as JSON lines.
//! Set `RUST_LOG=debug` to see why records were not corrected.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use anyhow::{bail, Context, Result};
use log::info;
use mints_connectors::JsonLinesSink;
use mints_node::{replay, CorrectionConfig, CorrectionOrchestrator};

const USAGE: &str = "usage: mints-correct <config.json> [records.jsonl]";

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().context(USAGE)?;
    let input_path = args.next();
    if args.next().is_some() {
        bail!(USAGE);
    }

    let config = CorrectionConfig::from_file(Path::new(&config_path))
        .with_context(|| format!("loading {config_path}"))?;

    let input: Box<dyn BufRead> = match &input_path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {path}"))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let sink = JsonLinesSink::new(io::stdout().lock());
    let mut orchestrator = CorrectionOrchestrator::from_config(config, sink);

    let summary = replay(input, &mut orchestrator).context("replaying records")?;

    info!(
        "Stored {} climate readings, emitted {} records, ignored {}, rejected {}",
        summary.climate, summary.emitted, summary.ignored, summary.rejected
    );
    Ok(())
}
