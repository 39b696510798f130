use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

use log::debug;

use crate::algorithms::INFINITY;
use crate::network::Topology;
use crate::routing::{RouteEntry, RoutingTable, TableSet};
use crate::{Cost, RouterId};

/// Every router's view of the network once link-state advertisements have
/// flooded. The simulator hands each router the same complete adjacency,
/// keyed by router with neighbor lists in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct LinkStateDatabase {
    adjacency: BTreeMap<RouterId, Vec<(RouterId, Cost)>>,
}

impl LinkStateDatabase {
    pub fn from_topology(topology: &Topology) -> Self {
        let mut adjacency: BTreeMap<RouterId, Vec<(RouterId, Cost)>> = BTreeMap::new();
        for link in topology.links() {
            adjacency.entry(link.a).or_default().push((link.b, link.cost));
            adjacency.entry(link.b).or_default().push((link.a, link.cost));
        }
        Self { adjacency }
    }

    pub fn routers(&self) -> impl Iterator<Item = RouterId> + '_ {
        self.adjacency.keys().copied()
    }

    fn neighbors(&self, router: RouterId) -> &[(RouterId, Cost)] {
        self.adjacency
            .get(&router)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct State {
    cost: Cost,
    router: RouterId,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap; among equal costs the smaller
        // router id pops first, which keeps tie-breaks deterministic.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.router.cmp(&self.router))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn table_for(lsdb: &LinkStateDatabase, source: RouterId) -> RoutingTable {
    let mut distances: BTreeMap<RouterId, Cost> = BTreeMap::new();
    let mut previous: BTreeMap<RouterId, RouterId> = BTreeMap::new();
    let mut heap = BinaryHeap::new();

    distances.insert(source, 0);
    heap.push(State {
        cost: 0,
        router: source,
    });

    while let Some(State { cost, router }) = heap.pop() {
        // Skip stale heap entries for already-settled routers.
        if cost > distances.get(&router).copied().unwrap_or(INFINITY) {
            continue;
        }

        for &(neighbor, link_cost) in lsdb.neighbors(router) {
            let next_cost = cost.saturating_add(link_cost);
            if next_cost < distances.get(&neighbor).copied().unwrap_or(INFINITY) {
                distances.insert(neighbor, next_cost);
                previous.insert(neighbor, router);
                heap.push(State {
                    cost: next_cost,
                    router: neighbor,
                });
            }
        }
    }

    let mut table = RoutingTable::new(source);
    for destination in lsdb.routers() {
        if destination == source {
            table.add_entry(RouteEntry::reachable(source, source, 0));
            continue;
        }
        match distances.get(&destination) {
            Some(&cost) => match find_next_hop(&previous, source, destination) {
                Some(next_hop) => {
                    table.add_entry(RouteEntry::reachable(destination, next_hop, cost));
                }
                None => table.add_entry(RouteEntry::unreachable(destination)),
            },
            None => table.add_entry(RouteEntry::unreachable(destination)),
        }
    }
    table
}

/// Walks the predecessor chain back from `destination` until the router
/// whose predecessor is `source`; that router is the first hop.
fn find_next_hop(
    previous: &BTreeMap<RouterId, RouterId>,
    source: RouterId,
    destination: RouterId,
) -> Option<RouterId> {
    let mut current = destination;
    loop {
        let prev = *previous.get(&current)?;
        if prev == source {
            return Some(current);
        }
        current = prev;
    }
}

pub fn compute_tables(topology: &Topology) -> TableSet {
    let lsdb = LinkStateDatabase::from_topology(topology);
    let mut tables = TableSet::new();
    for source in lsdb.routers() {
        tables.insert(table_for(&lsdb, source));
    }
    debug!(
        "Link-state recompute produced {} tables over {} links",
        tables.len(),
        topology.link_count()
    );
    tables
}
