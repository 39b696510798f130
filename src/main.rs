use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use routelab::algorithms::Protocol;
use routelab::config::SimConfig;
use routelab::input;
use routelab::report::{ReportFormat, ReportWriter};
use routelab::simulation::simulate;

#[derive(Parser)]
#[command(
    name = "routelab",
    about = "Computes per-router forwarding tables and message paths for a static network"
)]
struct Cli {
    /// Topology file, one `a b cost` link per line
    topology: PathBuf,

    /// Message file, one `source destination text` per line
    messages: PathBuf,

    /// Changes file, one `a b cost` change per line (cost -999 removes the link)
    changes: PathBuf,

    /// Routing paradigm to simulate
    #[arg(short, long, value_enum)]
    protocol: Option<Protocol>,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<ReportFormat>,

    /// Report file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON config file supplying defaults for the flags above
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if let Some(protocol) = cli.protocol {
        config.protocol = protocol;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }

    let topology = input::read_topology(&cli.topology)?;
    let messages = input::read_messages(&cli.messages)?;
    let changes = input::read_changes(&cli.changes)?;

    let rounds = simulate(
        &topology,
        &messages,
        &changes,
        config.protocol,
        config.removal_sentinel,
    );

    let mut writer = ReportWriter::create(&config.output, config.format)?;
    for round in &rounds {
        writer.write_round(round)?;
    }
    writer.finish()?;

    info!(
        "Wrote {} rounds to {}",
        rounds.len(),
        config.output.display()
    );
    Ok(())
}
