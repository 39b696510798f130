pub mod table;
pub mod trace;

pub use table::{RouteEntry, RoutingTable, TableSet};
pub use trace::{trace_route, TracedPath};
