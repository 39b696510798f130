use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::routing::TracedPath;
use crate::simulation::RoundReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportFormat {
    /// Classic plain-text tables and message lines.
    Text,
    /// One JSON object per round.
    Json,
}

/// Renders one round in the plain-text format: every router's forwarding
/// table (reachable destinations only, `dest next_hop cost` per line, blank
/// line after each block), then one line per message, each followed by a
/// blank line.
pub fn render_text(round: &RoundReport) -> String {
    let mut out = String::new();

    for table in round.tables.iter() {
        for entry in table.reachable_entries() {
            // Entries filtered to reachable always carry both fields.
            let next_hop = entry.next_hop.unwrap_or(entry.destination);
            let cost = entry.cost.unwrap_or(0);
            writeln!(out, "{} {} {}", entry.destination, next_hop, cost).unwrap();
        }
        writeln!(out).unwrap();
    }

    for trace in &round.traces {
        let message = &trace.message;
        match &trace.path {
            TracedPath::Complete { hops, cost } => {
                let hops = hops
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(
                    out,
                    "from {} to {} cost {} hops {} message {}.",
                    message.source, message.destination, cost, hops, message.text
                )
                .unwrap();
            }
            TracedPath::Unreachable => {
                writeln!(
                    out,
                    "from {} to {} cost infinite hops unreachable message {}.",
                    message.source, message.destination, message.text
                )
                .unwrap();
            }
            TracedPath::LoopDetected { visited } => {
                warn!(
                    "Message {} -> {} caught in a forwarding loop ({:?}), reporting unreachable",
                    message.source, message.destination, visited
                );
                writeln!(
                    out,
                    "from {} to {} cost infinite hops unreachable message {}.",
                    message.source, message.destination, message.text
                )
                .unwrap();
            }
        }
        writeln!(out).unwrap();
    }

    out
}

/// Streams rounds to a file as they complete, in the configured format.
pub struct ReportWriter {
    out: BufWriter<File>,
    format: ReportFormat,
}

impl ReportWriter {
    pub fn create(path: &Path, format: ReportFormat) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create output file {}", path.display()))?;
        Ok(Self {
            out: BufWriter::new(file),
            format,
        })
    }

    pub fn write_round(&mut self, round: &RoundReport) -> Result<()> {
        match self.format {
            ReportFormat::Text => {
                self.out.write_all(render_text(round).as_bytes())?;
            }
            ReportFormat::Json => {
                serde_json::to_writer(&mut self.out, round)?;
                self.out.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.out.flush().context("failed to flush output file")?;
        Ok(())
    }
}
