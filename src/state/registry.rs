//! Registry of packages and the queue of pending deliveries.

use crate::error::DispatchError;
use crate::models::{Package, PackageStatus};

/// Every declared package plus the FIFO list of those not yet delivered.
///
/// Packages are addressed by their declaration index. A package leaves the
/// pending list exactly when it reaches [`PackageStatus::Delivered`].
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Package, PackageStatus};
/// use u_dispatch::state::DeliveryRegistry;
///
/// let mut reg = DeliveryRegistry::new(vec![
///     Package::new("K1", 5, 0, 2),
///     Package::new("K2", 3, 1, 3),
/// ]);
/// assert_eq!(reg.first_pending(), Some(0));
/// reg.mark_in_flight(0).unwrap();
/// reg.mark_delivered(0).unwrap();
/// assert_eq!(reg.first_pending(), Some(1));
/// assert_eq!(reg.get(0).status(), PackageStatus::Delivered);
/// ```
#[derive(Debug, Clone)]
pub struct DeliveryRegistry {
    packages: Vec<Package>,
    pending: Vec<usize>,
}

impl DeliveryRegistry {
    /// Creates a registry with every package pending, in the given order.
    pub fn new(packages: Vec<Package>) -> Self {
        let pending = (0..packages.len()).collect();
        Self { packages, pending }
    }

    /// All packages, including delivered ones.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// The package at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> &Package {
        &self.packages[index]
    }

    /// Indices of undelivered packages in declaration order.
    pub fn pending(&self) -> &[usize] {
        &self.pending
    }

    /// The oldest undelivered package.
    pub fn first_pending(&self) -> Option<usize> {
        self.pending.first().copied()
    }

    /// Returns `true` once every package is delivered.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending packages still waiting at `station`, in declaration order.
    pub fn waiting_at(&self, station: usize) -> impl Iterator<Item = usize> + '_ {
        self.pending.iter().copied().filter(move |&i| {
            let p = &self.packages[i];
            p.status() == PackageStatus::AtPickup && p.origin() == station
        })
    }

    /// Claims a waiting package: `AtPickup → InFlight`.
    ///
    /// Fails if the package was already claimed.
    pub fn mark_in_flight(&mut self, index: usize) -> Result<(), DispatchError> {
        self.packages[index].advance(PackageStatus::InFlight)
    }

    /// Completes a package: `InFlight → Delivered`, removing it from the
    /// pending list.
    pub fn mark_delivered(&mut self, index: usize) -> Result<(), DispatchError> {
        self.packages[index].advance(PackageStatus::Delivered)?;
        self.pending.retain(|&i| i != index);
        Ok(())
    }
}
