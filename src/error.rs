//! Error taxonomy for the dispatch engine.
//!
//! Every variant is fatal: the engine has no retry semantics, so any error
//! aborts the run and names the offending record, package, vehicle or
//! station. Configuration errors are raised while building the problem;
//! invariant violations are raised while the scheduler runs.

use std::fmt;

use thiserror::Error;

use crate::models::PackageStatus;

/// The kind of input record that failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A station identifier.
    Station,
    /// An `id,stationA,stationB,distance` edge record.
    Edge,
    /// An `id,weight,origin,destination` delivery record.
    Delivery,
    /// An `id,capacity,station` train record.
    Train,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Station => "station",
            Self::Edge => "edge",
            Self::Delivery => "delivery",
            Self::Train => "train",
        };
        f.write_str(name)
    }
}

/// The loop whose safety limit was exceeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundScope {
    /// The step loop of a single vehicle leg.
    Route {
        /// Vehicle being routed.
        vehicle: String,
    },
    /// The top-level scheduling loop.
    Schedule,
}

impl fmt::Display for BoundScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Route { vehicle } => write!(f, "route of vehicle {vehicle}"),
            Self::Schedule => f.write_str("scheduler loop"),
        }
    }
}

/// Errors raised while building or running a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A record has the wrong shape or an unparsable field.
    #[error("malformed {kind} record {record:?}: {reason}")]
    MalformedRecord {
        /// Kind of record.
        kind: RecordKind,
        /// Raw record text.
        record: String,
        /// What is wrong with it.
        reason: String,
    },
    /// An edge has a non-positive distance or does not join two stations.
    #[error("malformed edge {edge}: {reason}")]
    MalformedEdge {
        /// Edge identifier.
        edge: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// A record references a station missing from the station list.
    #[error("station {station} referenced by {referenced_by} does not exist")]
    UnknownStation {
        /// The unknown station.
        station: String,
        /// Identifier of the referencing edge, package or vehicle.
        referenced_by: String,
    },
    /// The same identifier was declared twice.
    #[error("duplicate {kind} id {id}")]
    DuplicateId {
        /// Kind of record.
        kind: RecordKind,
        /// The repeated identifier.
        id: String,
    },
    /// Deliveries exist but no vehicle was declared.
    #[error("no vehicles declared for {deliveries} deliveries")]
    EmptyFleet {
        /// Number of pending deliveries.
        deliveries: usize,
    },
    /// A package's destination cannot be reached from its origin.
    #[error("package {package}: destination {destination} is unreachable from {origin}")]
    Unreachable {
        /// Package identifier.
        package: String,
        /// Origin station.
        origin: String,
        /// Destination station.
        destination: String,
    },
    /// Ordinal navigation was requested on a graph with a junction.
    #[error("ordinal navigation requires a path topology, but station {station} has {degree} neighbors")]
    BranchingTopology {
        /// First station found with more than two neighbors.
        station: String,
        /// Its degree.
        degree: usize,
    },
    /// No vehicle's full capacity can ever carry the package.
    #[error("no vehicle can carry package {package} of weight {weight} (largest capacity {max_capacity})")]
    NoVehicle {
        /// Package identifier.
        package: String,
        /// Package weight.
        weight: u32,
        /// Largest capacity in the fleet.
        max_capacity: u32,
    },
    /// Navigation found no next hop from one station toward another.
    #[error("no path from {from} to {to}")]
    NoPath {
        /// Station the vehicle is at.
        from: String,
        /// Station it is heading to.
        to: String,
    },
    /// A safety limit was exceeded; the heuristic is looping.
    #[error("{scope} exceeded its limit of {limit} iterations")]
    BoundExceeded {
        /// Which loop overran.
        scope: BoundScope,
        /// The configured limit.
        limit: usize,
    },
    /// A package status change would move backwards or skip a state.
    #[error("package {package} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        /// Package identifier.
        package: String,
        /// Current status.
        from: PackageStatus,
        /// Requested status.
        to: PackageStatus,
    },
    /// Loading a package would exceed the vehicle's capacity.
    #[error("vehicle {vehicle} cannot load package {package}: weight {weight} exceeds remaining capacity {remaining}")]
    CapacityExceeded {
        /// Vehicle identifier.
        vehicle: String,
        /// Package identifier.
        package: String,
        /// Package weight.
        weight: u32,
        /// Remaining capacity at the time of loading.
        remaining: u32,
    },
    /// A vehicle clock no longer fits in a `u64`.
    #[error("clock of vehicle {vehicle} overflowed")]
    ClockOverflow {
        /// Vehicle identifier.
        vehicle: String,
    },
    /// An in-flight package is not carried by any vehicle.
    #[error("package {package} is in flight but no vehicle holds it")]
    NotHeld {
        /// Package identifier.
        package: String,
    },
}

impl DispatchError {
    /// Returns `true` for errors caused by the input rather than the engine.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            Self::BoundExceeded { .. }
                | Self::InvalidTransition { .. }
                | Self::CapacityExceeded { .. }
                | Self::NotHeld { .. }
                | Self::ClockOverflow { .. }
        )
    }
}
