//! Mutable run state shared by the router and scheduler.

use super::{DeliveryRegistry, FleetState};
use crate::error::DispatchError;
use crate::models::{Package, Problem, Vehicle};
use crate::network::Graph;

/// Fleet and registry of one run, resolved against the graph's station
/// indices.
#[derive(Debug, Clone)]
pub struct DispatchState {
    /// Vehicles with position, load and clock.
    pub fleet: FleetState,
    /// Packages and the pending queue.
    pub registry: DeliveryRegistry,
}

impl DispatchState {
    /// Builds the initial state: all packages waiting, all vehicles empty at
    /// their starting stations with a zero clock.
    pub fn from_problem(problem: &Problem, graph: &Graph) -> Result<Self, DispatchError> {
        let resolve = |station: &str, by: &str| {
            graph
                .station_index(station)
                .ok_or_else(|| DispatchError::UnknownStation {
                    station: station.to_string(),
                    referenced_by: by.to_string(),
                })
        };

        let packages = problem
            .deliveries()
            .iter()
            .map(|d| -> Result<Package, DispatchError> {
                Ok(Package::new(
                    &d.id,
                    d.weight,
                    resolve(&d.origin, &d.id)?,
                    resolve(&d.destination, &d.id)?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let vehicles = problem
            .trains()
            .iter()
            .map(|t| -> Result<Vehicle, DispatchError> {
                Ok(Vehicle::new(&t.id, t.capacity, resolve(&t.station, &t.id)?))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            fleet: FleetState::new(vehicles),
            registry: DeliveryRegistry::new(packages),
        })
    }
}
