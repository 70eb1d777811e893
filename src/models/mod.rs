//! Domain model types for freight dispatch.
//!
//! Provides the input records and problem document, packages with their
//! delivery status, vehicles with capacity and position, and the move log
//! and itinerary produced by a run.

mod itinerary;
mod movement;
mod package;
mod problem;
mod records;
mod vehicle;

pub use itinerary::{Itinerary, Timeline};
pub use movement::Move;
pub use package::{Package, PackageStatus};
pub use problem::{Problem, ProblemDocument};
pub use records::{DeliveryRecord, EdgeRecord, TrainRecord, MAX_EDGE_DISTANCE};
pub use vehicle::Vehicle;
