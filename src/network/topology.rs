use std::collections::{BTreeMap, BTreeSet};

use crate::error::RouteError;
use crate::{Cost, RouterId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub a: RouterId,
    pub b: RouterId,
    pub cost: Cost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkUpdate {
    Added,
    Replaced(Cost),
}

/// Undirected weighted graph of routers. At most one link exists per
/// unordered router pair; links are kept under normalized keys so
/// iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    links: BTreeMap<(RouterId, RouterId), Cost>,
}

fn key(a: RouterId, b: RouterId) -> (RouterId, RouterId) {
    if a <= b { (a, b) } else { (b, a) }
}

impl Topology {
    pub fn new() -> Self {
        Self {
            links: BTreeMap::new(),
        }
    }

    pub fn from_triples(
        triples: impl IntoIterator<Item = (RouterId, RouterId, i64)>,
    ) -> Result<Self, RouteError> {
        let mut topology = Self::new();
        for (a, b, cost) in triples {
            topology.upsert(a, b, cost)?;
        }
        Ok(topology)
    }

    /// Adds the link between `a` and `b`, replacing any existing one.
    /// Negative costs and self-links are rejected; the removal sentinel
    /// is handled upstream and never reaches this boundary.
    pub fn upsert(&mut self, a: RouterId, b: RouterId, cost: i64) -> Result<LinkUpdate, RouteError> {
        if a == b {
            return Err(RouteError::SelfLink(a));
        }
        if cost < 0 {
            return Err(RouteError::InvalidEdgeCost { a, b, cost });
        }

        match self.links.insert(key(a, b), cost as Cost) {
            Some(previous) => Ok(LinkUpdate::Replaced(previous)),
            None => Ok(LinkUpdate::Added),
        }
    }

    /// Removes the link between `a` and `b`, returning its cost, or `None`
    /// if no such link existed.
    pub fn remove(&mut self, a: RouterId, b: RouterId) -> Option<Cost> {
        self.links.remove(&key(a, b))
    }

    pub fn link_cost(&self, a: RouterId, b: RouterId) -> Option<Cost> {
        self.links.get(&key(a, b)).copied()
    }

    /// All links, one per physical connection, ordered by normalized
    /// endpoint pair.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        self.links
            .iter()
            .map(|(&(a, b), &cost)| Link { a, b, cost })
    }

    /// All routers referenced by at least one link, ascending.
    pub fn nodes(&self) -> BTreeSet<RouterId> {
        self.links
            .keys()
            .flat_map(|&(a, b)| [a, b])
            .collect()
    }

    pub fn neighbors(&self, router: RouterId) -> Vec<(RouterId, Cost)> {
        self.links
            .iter()
            .filter_map(|(&(a, b), &cost)| {
                if a == router {
                    Some((b, cost))
                } else if b == router {
                    Some((a, cost))
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn contains_router(&self, router: RouterId) -> bool {
        self.links
            .keys()
            .any(|&(a, b)| a == router || b == router)
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
