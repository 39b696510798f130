pub mod algorithms;
pub mod config;
pub mod error;
pub mod input;
pub mod network;
pub mod report;
pub mod routing;
pub mod simulation;

pub type RouterId = u32;
pub type Cost = u64;
