//! # u-dispatch
//!
//! Greedy freight dispatch over a station graph: assigns weighted packages
//! to capacity-bounded trains and produces a timed itinerary plus the
//! overall completion time (makespan).
//!
//! ## Modules
//!
//! - [`models`] — Input records, packages, vehicles, moves and itineraries
//! - [`network`] — Station graph, shortest paths and navigation strategies
//! - [`state`] — Fleet state and delivery registry mutated during a run
//! - [`dispatch`] — Candidate selection, routing and the scheduling loop
//! - [`generator`] — Random path-topology instances for testing and benchmarks
//! - [`error`] — Error taxonomy
//!
//! ## Example
//!
//! ```
//! use u_dispatch::dispatch::dispatch;
//! use u_dispatch::models::ProblemDocument;
//!
//! let doc = ProblemDocument {
//!     stations: vec!["A".into(), "B".into(), "C".into(), "D".into()],
//!     edges: vec!["E1,A,B,30".into(), "E2,B,C,10".into(), "E3,C,D,40".into()],
//!     deliveries: vec!["K1,5,A,C".into()],
//!     trains: vec!["Q1,6,B".into()],
//! };
//! let itinerary = dispatch(&doc.parse().unwrap()).unwrap();
//! assert_eq!(itinerary.solution_time(), 70);
//! ```

pub mod dispatch;
pub mod error;
pub mod generator;
pub mod models;
pub mod network;
pub mod state;

pub use error::DispatchError;
