pub mod change;
pub mod topology;

pub use change::{apply_change, ChangeOutcome, TopologyChange};
pub use topology::{Link, LinkUpdate, Topology};
