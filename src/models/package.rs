//! Package and delivery status types.

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// Lifecycle of a package: `AtPickup → InFlight → Delivered`.
///
/// Transitions are strictly forward and one step at a time.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::PackageStatus;
///
/// assert!(PackageStatus::AtPickup.can_advance_to(PackageStatus::InFlight));
/// assert!(!PackageStatus::AtPickup.can_advance_to(PackageStatus::Delivered));
/// assert!(!PackageStatus::Delivered.can_advance_to(PackageStatus::AtPickup));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageStatus {
    /// Waiting at its origin station.
    AtPickup,
    /// Loaded on a vehicle.
    InFlight,
    /// Dropped off at its destination.
    Delivered,
}

impl PackageStatus {
    /// Returns `true` if `next` is the immediate successor of this status.
    pub fn can_advance_to(self, next: PackageStatus) -> bool {
        matches!(
            (self, next),
            (Self::AtPickup, Self::InFlight) | (Self::InFlight, Self::Delivered)
        )
    }
}

/// A package with its route endpoints resolved to station indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    id: String,
    weight: u32,
    origin: usize,
    destination: usize,
    status: PackageStatus,
}

impl Package {
    /// Creates a package waiting at its origin.
    pub fn new(id: &str, weight: u32, origin: usize, destination: usize) -> Self {
        Self {
            id: id.to_string(),
            weight,
            origin,
            destination,
            status: PackageStatus::AtPickup,
        }
    }

    /// Package identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Package weight.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Origin station index.
    pub fn origin(&self) -> usize {
        self.origin
    }

    /// Destination station index.
    pub fn destination(&self) -> usize {
        self.destination
    }

    /// Current status.
    pub fn status(&self) -> PackageStatus {
        self.status
    }

    /// Moves the package to `next`, rejecting backward or skipping moves.
    pub fn advance(&mut self, next: PackageStatus) -> Result<(), DispatchError> {
        if !self.status.can_advance_to(next) {
            return Err(DispatchError::InvalidTransition {
                package: self.id.clone(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
