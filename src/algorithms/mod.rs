pub mod bellman_ford;
pub mod dijkstra;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::network::Topology;
use crate::routing::TableSet;
use crate::Cost;

pub use dijkstra::LinkStateDatabase;

/// Distance assigned to routers no computed path has reached. Cost sums
/// saturate at this value.
pub const INFINITY: Cost = Cost::MAX;

/// Routing paradigm used to fill the forwarding tables. Both produce the
/// same distances on the same topology; they differ in how ties between
/// equal-cost paths fall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Protocol {
    DistanceVector,
    LinkState,
}

impl Protocol {
    /// Recomputes every router's table from scratch for the given topology.
    pub fn compute_tables(self, topology: &Topology) -> TableSet {
        match self {
            Protocol::DistanceVector => bellman_ford::compute_tables(topology),
            Protocol::LinkState => dijkstra::compute_tables(topology),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_matches_direct_engine_calls() {
        let topology =
            Topology::from_triples([(1, 2, 8), (2, 3, 3), (2, 5, 4), (4, 1, 1), (4, 5, 1)])
                .unwrap();
        assert_eq!(
            Protocol::DistanceVector.compute_tables(&topology),
            bellman_ford::compute_tables(&topology)
        );
        assert_eq!(
            Protocol::LinkState.compute_tables(&topology),
            dijkstra::compute_tables(&topology)
        );
    }

    #[test]
    fn protocol_serializes_in_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Protocol::DistanceVector).unwrap(),
            "\"distance-vector\""
        );
        assert_eq!(
            serde_json::to_string(&Protocol::LinkState).unwrap(),
            "\"link-state\""
        );
    }

    mod proptests {
        use super::*;
        use crate::routing::{trace_route, TracedPath};
        use proptest::prelude::*;

        fn topology_strategy() -> impl Strategy<Value = Topology> {
            proptest::collection::vec((1u32..=8, 1u32..=8, 0i64..=100), 1..=14).prop_map(
                |triples| {
                    Topology::from_triples(triples.into_iter().filter(|(a, b, _)| a != b))
                        .expect("filtered triples are valid links")
                },
            )
        }

        proptest! {
            #[test]
            fn engines_agree_on_distances(topology in topology_strategy()) {
                let dv = Protocol::DistanceVector.compute_tables(&topology);
                let ls = Protocol::LinkState.compute_tables(&topology);
                prop_assert_eq!(dv.len(), ls.len());
                for table in dv.iter() {
                    let other = ls.get(table.source).unwrap();
                    for entry in table.entries() {
                        prop_assert_eq!(
                            entry.cost,
                            other.cost(entry.destination),
                            "distance {} -> {} differs between engines",
                            table.source,
                            entry.destination
                        );
                    }
                }
            }

            #[test]
            fn distances_are_symmetric(
                topology in topology_strategy(),
                protocol in prop_oneof![
                    Just(Protocol::DistanceVector),
                    Just(Protocol::LinkState),
                ],
            ) {
                let tables = protocol.compute_tables(&topology);
                for table in tables.iter() {
                    for entry in table.entries() {
                        let back = tables
                            .get(entry.destination)
                            .and_then(|t| t.cost(table.source));
                        prop_assert_eq!(entry.cost, back);
                    }
                }
            }

            #[test]
            fn traced_paths_match_table_costs(
                topology in topology_strategy(),
                protocol in prop_oneof![
                    Just(Protocol::DistanceVector),
                    Just(Protocol::LinkState),
                ],
            ) {
                let tables = protocol.compute_tables(&topology);
                for table in tables.iter() {
                    for entry in table.entries() {
                        let traced =
                            trace_route(&tables, &topology, table.source, entry.destination);
                        match (entry.cost, traced) {
                            (Some(cost), TracedPath::Complete { hops, cost: walked }) => {
                                prop_assert_eq!(walked, cost);
                                prop_assert_eq!(hops.first(), Some(&table.source));
                                prop_assert_eq!(hops.last(), Some(&entry.destination));
                            }
                            (None, TracedPath::Unreachable) => {}
                            (expected, got) => prop_assert!(
                                false,
                                "table {} -> {} has cost {:?} but traced to {:?}",
                                table.source,
                                entry.destination,
                                expected,
                                got
                            ),
                        }
                    }
                }
            }

            #[test]
            fn every_router_reaches_itself_for_free(
                topology in topology_strategy(),
                protocol in prop_oneof![
                    Just(Protocol::DistanceVector),
                    Just(Protocol::LinkState),
                ],
            ) {
                let tables = protocol.compute_tables(&topology);
                for table in tables.iter() {
                    prop_assert_eq!(table.cost(table.source), Some(0));
                    prop_assert_eq!(table.next_hop(table.source), Some(table.source));
                }
            }
        }
    }
}
