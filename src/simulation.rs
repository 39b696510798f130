use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::algorithms::Protocol;
use crate::input::Message;
use crate::network::{apply_change, Topology, TopologyChange};
use crate::routing::{trace_route, TableSet, TracedPath};

/// One forwarded message together with where it ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageTrace {
    pub message: Message,
    pub path: TracedPath,
}

/// Everything produced by one convergence round: the tables computed for
/// the topology as it stood, and every message traced through them.
/// Round 0 is the initial topology; round n corresponds to the nth change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: usize,
    pub change: Option<TopologyChange>,
    pub tables: TableSet,
    pub traces: Vec<MessageTrace>,
}

/// Runs the full simulation: one round for the initial topology, then one
/// per change, applied cumulatively. A change that fails validation is
/// logged and skipped, but its round is still recomputed and reported so
/// rounds stay aligned with the change list.
pub fn simulate(
    initial: &Topology,
    messages: &[Message],
    changes: &[TopologyChange],
    protocol: Protocol,
    removal_sentinel: i64,
) -> Vec<RoundReport> {
    let mut topology = initial.clone();
    let mut rounds = Vec::with_capacity(changes.len() + 1);

    info!(
        "Simulating {:?} over {} routers, {} links, {} changes",
        protocol,
        topology.nodes().len(),
        topology.link_count(),
        changes.len()
    );
    rounds.push(run_round(0, None, &topology, messages, protocol));

    for (index, change) in changes.iter().enumerate() {
        let round = index + 1;
        if let Err(e) = apply_change(&mut topology, change, removal_sentinel) {
            warn!("Round {}: skipping invalid change: {}", round, e);
        }
        rounds.push(run_round(round, Some(*change), &topology, messages, protocol));
    }

    rounds
}

fn run_round(
    round: usize,
    change: Option<TopologyChange>,
    topology: &Topology,
    messages: &[Message],
    protocol: Protocol,
) -> RoundReport {
    let tables = protocol.compute_tables(topology);
    let traces = messages
        .iter()
        .map(|message| MessageTrace {
            message: message.clone(),
            path: trace_route(&tables, topology, message.source, message.destination),
        })
        .collect();
    RoundReport {
        round,
        change,
        tables,
        traces,
    }
}
