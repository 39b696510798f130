use std::collections::BTreeMap;

use log::debug;

use crate::algorithms::INFINITY;
use crate::network::{Link, Topology};
use crate::routing::{RouteEntry, RoutingTable, TableSet};
use crate::{Cost, RouterId};

/// Computes `source`'s forwarding table by repeated relaxation over every
/// link. Each distance improvement inherits the first hop it entered the
/// source's neighborhood through, so after convergence the table knows both
/// how far each router is and which direct neighbor starts the path.
pub fn table_for(topology: &Topology, source: RouterId) -> RoutingTable {
    let routers = topology.nodes();
    let links: Vec<Link> = topology.links().collect();

    let mut distance: BTreeMap<RouterId, Cost> = BTreeMap::new();
    let mut first_hop: BTreeMap<RouterId, RouterId> = BTreeMap::new();

    distance.insert(source, 0);
    first_hop.insert(source, source);
    for (neighbor, cost) in topology.neighbors(source) {
        distance.insert(neighbor, cost);
        first_hop.insert(neighbor, neighbor);
    }

    // At most n-1 passes; stop as soon as a full pass changes nothing.
    for _ in 1..routers.len() {
        let mut changed = false;
        for link in &links {
            changed |= relax(&mut distance, &mut first_hop, link.a, link.b, link.cost);
            changed |= relax(&mut distance, &mut first_hop, link.b, link.a, link.cost);
        }
        if !changed {
            break;
        }
    }

    let mut table = RoutingTable::new(source);
    for &destination in &routers {
        match (distance.get(&destination), first_hop.get(&destination)) {
            (Some(&cost), Some(&hop)) => {
                table.add_entry(RouteEntry::reachable(destination, hop, cost));
            }
            _ => table.add_entry(RouteEntry::unreachable(destination)),
        }
    }
    table
}

/// Tries to improve the route to `v` by going through `u`. Strict improvement
/// only, so the first equal-cost route found is kept.
fn relax(
    distance: &mut BTreeMap<RouterId, Cost>,
    first_hop: &mut BTreeMap<RouterId, RouterId>,
    u: RouterId,
    v: RouterId,
    cost: Cost,
) -> bool {
    let through_u = distance
        .get(&u)
        .copied()
        .unwrap_or(INFINITY)
        .saturating_add(cost);
    if through_u < distance.get(&v).copied().unwrap_or(INFINITY) {
        distance.insert(v, through_u);
        let hop = first_hop.get(&u).copied().unwrap_or(u);
        first_hop.insert(v, hop);
        true
    } else {
        false
    }
}

pub fn compute_tables(topology: &Topology) -> TableSet {
    let mut tables = TableSet::new();
    for source in topology.nodes() {
        tables.insert(table_for(topology, source));
    }
    debug!(
        "Distance-vector recompute produced {} tables over {} links",
        tables.len(),
        topology.link_count()
    );
    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_topology() -> Topology {
        Topology::from_triples([(1, 2, 8), (2, 3, 3), (2, 5, 4), (4, 1, 1), (4, 5, 1)]).unwrap()
    }

    fn routes(table: &RoutingTable) -> Vec<(RouterId, Option<RouterId>, Option<Cost>)> {
        table
            .entries()
            .map(|e| (e.destination, e.next_hop, e.cost))
            .collect()
    }

    #[test]
    fn table_prefers_cheap_detour_over_direct_link() {
        let table = table_for(&base_topology(), 1);
        assert_eq!(
            routes(&table),
            vec![
                (1, Some(1), Some(0)),
                (2, Some(4), Some(6)),
                (3, Some(4), Some(9)),
                (4, Some(4), Some(1)),
                (5, Some(4), Some(2)),
            ]
        );
    }

    #[test]
    fn first_hop_points_at_a_direct_neighbor() {
        let topology = base_topology();
        for source in topology.nodes() {
            let table = table_for(&topology, source);
            let neighbors: Vec<RouterId> = topology
                .neighbors(source)
                .into_iter()
                .map(|(n, _)| n)
                .collect();
            for entry in table.entries() {
                if entry.destination == source {
                    assert_eq!(entry.next_hop, Some(source));
                } else {
                    let hop = entry.next_hop.unwrap();
                    assert!(
                        neighbors.contains(&hop),
                        "router {} routes to {} via non-neighbor {}",
                        source,
                        entry.destination,
                        hop
                    );
                }
            }
        }
    }

    #[test]
    fn multi_hop_chain_converges() {
        let topology = Topology::from_triples([(1, 2, 1), (2, 3, 1), (3, 4, 1)]).unwrap();
        let table = table_for(&topology, 1);
        assert_eq!(table.cost(4), Some(3));
        assert_eq!(table.next_hop(4), Some(2));
    }

    #[test]
    fn disconnected_component_is_unreachable() {
        let topology = Topology::from_triples([(1, 2, 5), (3, 4, 2)]).unwrap();
        let table = table_for(&topology, 1);
        assert_eq!(
            routes(&table),
            vec![
                (1, Some(1), Some(0)),
                (2, Some(2), Some(5)),
                (3, None, None),
                (4, None, None),
            ]
        );
    }

    #[test]
    fn zero_cost_links_are_valid() {
        let topology = Topology::from_triples([(1, 2, 0), (2, 3, 0)]).unwrap();
        let table = table_for(&topology, 1);
        assert_eq!(table.cost(3), Some(0));
        assert_eq!(table.next_hop(3), Some(2));
    }

    #[test]
    fn compute_tables_covers_every_router() {
        let topology = base_topology();
        let tables = compute_tables(&topology);
        assert_eq!(tables.len(), 5);
        for router in topology.nodes() {
            let table = tables.get(router).unwrap();
            assert_eq!(table.cost(router), Some(0));
            assert_eq!(table.next_hop(router), Some(router));
            assert_eq!(table.len(), 5);
        }
    }
}
