//! Vehicle (train) type with capacity, position, load and clock.

use crate::error::DispatchError;

/// A capacity-bounded vehicle moving over the station graph.
///
/// Holds the vehicle's mutable run state: current station, onboard
/// packages (as package indices, in loading order) and its own elapsed
/// time. Capacity accounting against package weights lives in
/// [`FleetState`](crate::state::FleetState), which owns the fleet.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Vehicle;
///
/// let v = Vehicle::new("Q1", 6, 1);
/// assert_eq!(v.id(), "Q1");
/// assert_eq!(v.capacity(), 6);
/// assert_eq!(v.station(), 1);
/// assert!(v.load().is_empty());
/// assert_eq!(v.elapsed(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    id: String,
    capacity: u32,
    station: usize,
    load: Vec<usize>,
    unlogged_pickups: Vec<usize>,
    elapsed: u64,
}

impl Vehicle {
    /// Creates an empty vehicle at the given station index.
    pub fn new(id: &str, capacity: u32, station: usize) -> Self {
        Self {
            id: id.to_string(),
            capacity,
            station,
            load: Vec::new(),
            unlogged_pickups: Vec::new(),
            elapsed: 0,
        }
    }

    /// Vehicle identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Maximum total weight carried at once.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Current station index.
    pub fn station(&self) -> usize {
        self.station
    }

    /// Onboard package indices in loading order.
    pub fn load(&self) -> &[usize] {
        &self.load
    }

    /// Returns `true` if the package is on board.
    pub fn holds(&self, package: usize) -> bool {
        self.load.contains(&package)
    }

    /// Time this vehicle has spent travelling so far.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub(crate) fn push_load(&mut self, package: usize) {
        self.load.push(package);
        self.unlogged_pickups.push(package);
    }

    pub(crate) fn remove_load(&mut self, package: usize) -> bool {
        match self.load.iter().position(|&p| p == package) {
            Some(i) => {
                self.load.remove(i);
                true
            }
            None => false,
        }
    }

    /// Hands over pickups made since the last emitted move.
    pub(crate) fn take_unlogged_pickups(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.unlogged_pickups)
    }

    /// Moves to `to`, advancing the clock by `distance`.
    pub(crate) fn travel(&mut self, to: usize, distance: u64) -> Result<(), DispatchError> {
        self.elapsed = self
            .elapsed
            .checked_add(distance)
            .ok_or_else(|| DispatchError::ClockOverflow {
                vehicle: self.id.clone(),
            })?;
        self.station = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_load_bookkeeping() {
        let mut v = Vehicle::new("Q1", 10, 0);
        v.push_load(3);
        v.push_load(1);
        assert_eq!(v.load(), &[3, 1]);
        assert!(v.holds(1));
        assert_eq!(v.take_unlogged_pickups(), vec![3, 1]);
        assert!(v.take_unlogged_pickups().is_empty());

        assert!(v.remove_load(3));
        assert!(!v.remove_load(3));
        assert_eq!(v.load(), &[1]);
    }

    #[test]
    fn test_vehicle_travel() {
        let mut v = Vehicle::new("Q1", 10, 0);
        v.travel(1, 30).expect("in range");
        v.travel(2, 10).expect("in range");
        assert_eq!(v.station(), 2);
        assert_eq!(v.elapsed(), 40);
    }

    #[test]
    fn test_vehicle_clock_overflow() {
        let mut v = Vehicle::new("Q1", 10, 0);
        v.travel(1, u64::MAX).expect("in range");
        let err = v.travel(2, 1).unwrap_err();
        assert_eq!(
            err,
            DispatchError::ClockOverflow {
                vehicle: "Q1".into()
            }
        );
        assert_eq!(v.station(), 1);
        assert_eq!(v.elapsed(), u64::MAX);
    }
}
