use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Cost, RouterId};

/// Route toward one destination. `next_hop` and `cost` are `None` when the
/// destination is unreachable from the table's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub destination: RouterId,
    pub next_hop: Option<RouterId>,
    pub cost: Option<Cost>,
}

impl RouteEntry {
    pub fn reachable(destination: RouterId, next_hop: RouterId, cost: Cost) -> Self {
        Self {
            destination,
            next_hop: Some(next_hop),
            cost: Some(cost),
        }
    }

    pub fn unreachable(destination: RouterId) -> Self {
        Self {
            destination,
            next_hop: None,
            cost: None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.next_hop.is_some() && self.cost.is_some()
    }
}

/// Forwarding table owned by a single router, keyed by destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingTable {
    pub source: RouterId,
    entries: BTreeMap<RouterId, RouteEntry>,
}

impl RoutingTable {
    pub fn new(source: RouterId) -> Self {
        Self {
            source,
            entries: BTreeMap::new(),
        }
    }

    pub fn add_entry(&mut self, entry: RouteEntry) {
        self.entries.insert(entry.destination, entry);
    }

    pub fn get(&self, destination: RouterId) -> Option<&RouteEntry> {
        self.entries.get(&destination)
    }

    pub fn next_hop(&self, destination: RouterId) -> Option<RouterId> {
        self.entries.get(&destination).and_then(|e| e.next_hop)
    }

    pub fn cost(&self, destination: RouterId) -> Option<Cost> {
        self.entries.get(&destination).and_then(|e| e.cost)
    }

    /// Entries in ascending destination order.
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.values()
    }

    pub fn reachable_entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.values().filter(|e| e.is_reachable())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tables for every router in the network after one convergence round,
/// keyed by owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSet {
    tables: BTreeMap<RouterId, RoutingTable>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, table: RoutingTable) {
        self.tables.insert(table.source, table);
    }

    pub fn get(&self, router: RouterId) -> Option<&RoutingTable> {
        self.tables.get(&router)
    }

    /// Tables in ascending owner order.
    pub fn iter(&self) -> impl Iterator<Item = &RoutingTable> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
