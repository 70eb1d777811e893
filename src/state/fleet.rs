//! Fleet state: vehicles and their loads.

use super::DeliveryRegistry;
use crate::error::DispatchError;
use crate::models::Vehicle;

/// All vehicles of a run, addressed by fleet index.
///
/// Loading and unloading change a vehicle's load and the package status in
/// the same call. Both take the registry by `&mut`, so a package claim is a
/// single exclusive state transition.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Package, PackageStatus, Vehicle};
/// use u_dispatch::state::{DeliveryRegistry, FleetState};
///
/// let mut reg = DeliveryRegistry::new(vec![Package::new("K1", 5, 0, 2)]);
/// let mut fleet = FleetState::new(vec![Vehicle::new("Q1", 6, 0)]);
///
/// assert!(fleet.load_package(0, 0, &mut reg).unwrap());
/// assert_eq!(fleet.remaining_capacity(0, &reg), 1);
/// assert_eq!(reg.get(0).status(), PackageStatus::InFlight);
///
/// assert!(fleet.unload_package(0, 0, &mut reg).unwrap());
/// assert!(reg.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct FleetState {
    vehicles: Vec<Vehicle>,
}

impl FleetState {
    /// Creates the fleet from vehicles in declaration order.
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    /// All vehicles.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// The vehicle at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> &Vehicle {
        &self.vehicles[index]
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> &mut Vehicle {
        &mut self.vehicles[index]
    }

    /// Number of vehicles.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Returns `true` if the fleet has no vehicles.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Total weight currently on board a vehicle.
    pub fn load_weight(&self, vehicle: usize, registry: &DeliveryRegistry) -> u32 {
        self.vehicles[vehicle]
            .load()
            .iter()
            .map(|&p| registry.get(p).weight())
            .sum()
    }

    /// Capacity minus the weight currently on board.
    pub fn remaining_capacity(&self, vehicle: usize, registry: &DeliveryRegistry) -> u32 {
        self.vehicles[vehicle]
            .capacity()
            .saturating_sub(self.load_weight(vehicle, registry))
    }

    /// The vehicle currently carrying `package`.
    pub fn holder(&self, package: usize) -> Option<usize> {
        self.vehicles.iter().position(|v| v.holds(package))
    }

    /// Puts a package on board and marks it in flight.
    ///
    /// Returns `Ok(false)` if the vehicle already holds it. Fails with
    /// [`DispatchError::CapacityExceeded`] if it does not fit, and with
    /// [`DispatchError::InvalidTransition`] if it is not waiting for pickup.
    pub fn load_package(
        &mut self,
        vehicle: usize,
        package: usize,
        registry: &mut DeliveryRegistry,
    ) -> Result<bool, DispatchError> {
        if self.vehicles[vehicle].holds(package) {
            return Ok(false);
        }
        let weight = registry.get(package).weight();
        let remaining = self.remaining_capacity(vehicle, registry);
        if weight > remaining {
            return Err(DispatchError::CapacityExceeded {
                vehicle: self.vehicles[vehicle].id().to_string(),
                package: registry.get(package).id().to_string(),
                weight,
                remaining,
            });
        }
        registry.mark_in_flight(package)?;
        self.vehicles[vehicle].push_load(package);
        Ok(true)
    }

    /// Takes a package off a vehicle and marks it delivered.
    ///
    /// Returns `Ok(false)` if the vehicle does not hold it.
    pub fn unload_package(
        &mut self,
        vehicle: usize,
        package: usize,
        registry: &mut DeliveryRegistry,
    ) -> Result<bool, DispatchError> {
        if !self.vehicles[vehicle].holds(package) {
            return Ok(false);
        }
        registry.mark_delivered(package)?;
        self.vehicles[vehicle].remove_load(package);
        Ok(true)
    }
}
