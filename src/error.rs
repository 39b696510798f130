use thiserror::Error;

use crate::RouterId;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid cost {cost} for link {a} <-> {b}: link costs must be non-negative")]
    InvalidEdgeCost { a: RouterId, b: RouterId, cost: i64 },
    #[error("link endpoints must differ, got router {0} on both ends")]
    SelfLink(RouterId),
    #[error("{file}:{line}: {reason}")]
    MalformedRecord {
        file: String,
        line: usize,
        reason: String,
    },
}
