use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::RouteError;
use crate::network::topology::{LinkUpdate, Topology};
use crate::{Cost, RouterId};

/// One scheduled link-cost change. A cost equal to the configured removal
/// sentinel tears the link down instead of re-pricing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyChange {
    pub a: RouterId,
    pub b: RouterId,
    pub cost: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    LinkAdded,
    LinkUpdated(Cost),
    LinkRemoved(Cost),
    /// Removal aimed at a link that does not exist. The topology is left
    /// untouched and the surrounding round proceeds as usual.
    NoOp,
}

pub fn apply_change(
    topology: &mut Topology,
    change: &TopologyChange,
    removal_sentinel: i64,
) -> Result<ChangeOutcome, RouteError> {
    if change.cost == removal_sentinel {
        return match topology.remove(change.a, change.b) {
            Some(previous) => {
                info!(
                    "Removed link {} <-> {} (previous cost {})",
                    change.a, change.b, previous
                );
                Ok(ChangeOutcome::LinkRemoved(previous))
            }
            None => {
                warn!(
                    "No link {} <-> {} to remove, topology unchanged",
                    change.a, change.b
                );
                Ok(ChangeOutcome::NoOp)
            }
        };
    }

    match topology.upsert(change.a, change.b, change.cost)? {
        LinkUpdate::Added => {
            info!(
                "Added link {} <-> {} with cost {}",
                change.a, change.b, change.cost
            );
            Ok(ChangeOutcome::LinkAdded)
        }
        LinkUpdate::Replaced(previous) => {
            info!(
                "Updated link {} <-> {} cost {} -> {}",
                change.a, change.b, previous, change.cost
            );
            Ok(ChangeOutcome::LinkUpdated(previous))
        }
    }
}
