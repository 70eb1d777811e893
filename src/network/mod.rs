//! Station graph, shortest paths and navigation.
//!
//! - [`Graph`] — adjacency and edge distances, plus the ordinal direction hint
//! - [`PathMatrix`] — all-pairs shortest distances (Dijkstra)
//! - [`Navigator`] — next-hop choice and selector distance proxy per [`Navigation`]

mod graph;
mod navigation;
mod paths;

pub use graph::{Direction, Graph};
pub use navigation::{Navigation, Navigator};
pub use paths::PathMatrix;
