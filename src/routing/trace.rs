use std::collections::BTreeSet;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::network::Topology;
use crate::routing::table::TableSet;
use crate::{Cost, RouterId};

/// Outcome of forwarding a message hop by hop through a table set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum TracedPath {
    Complete { hops: Vec<RouterId>, cost: Cost },
    Unreachable,
    LoopDetected { visited: Vec<RouterId> },
}

/// Follows next-hop pointers from `source` toward `destination`, summing
/// the cost of each traversed link from the topology itself rather than
/// trusting the tables' cost column.
pub fn trace_route(
    tables: &TableSet,
    topology: &Topology,
    source: RouterId,
    destination: RouterId,
) -> TracedPath {
    if tables.get(source).is_none() {
        return TracedPath::Unreachable;
    }
    if source == destination {
        return TracedPath::Complete {
            hops: vec![source],
            cost: 0,
        };
    }

    let mut visited = BTreeSet::from([source]);
    let mut hops = vec![source];
    let mut cost: Cost = 0;
    let mut current = source;

    while current != destination {
        let next = match tables.get(current).and_then(|t| t.next_hop(destination)) {
            Some(next) => next,
            None => return TracedPath::Unreachable,
        };
        if !visited.insert(next) {
            hops.push(next);
            warn!(
                "Forwarding loop from {} to {}: revisited router {}",
                source, destination, next
            );
            return TracedPath::LoopDetected { visited: hops };
        }
        let Some(link_cost) = topology.link_cost(current, next) else {
            // Tables point across a link the topology no longer has.
            warn!(
                "Table at {} forwards to {} over a missing link",
                current, next
            );
            return TracedPath::Unreachable;
        };
        cost = cost.saturating_add(link_cost);
        hops.push(next);
        current = next;
    }

    TracedPath::Complete { hops, cost }
}
