//! Stepwise vehicle movement with opportunistic pickups and drop-offs.
//!
//! # Algorithm
//!
//! While the vehicle is not at the target, one step:
//!
//! 1. Load waiting packages at the current station that fit, keeping
//!    enough room for the reserved package the vehicle is on its way to
//!    collect.
//! 2. Choose the next station with the navigator.
//! 3. Unload packages whose destination is that next station.
//! 4. Emit a [`Move`] stamped with the vehicle's clock at departure.
//! 5. Advance the clock by the edge distance and move the vehicle.
//!
//! The step count is bounded; overrunning it means the navigator is
//! looping (an ordinal walk on a badly ordered station list, for instance).

use log::{debug, trace};

use super::PickupPolicy;
use crate::error::{BoundScope, DispatchError};
use crate::models::{Move, PackageStatus};
use crate::network::Navigator;
use crate::state::DispatchState;

/// Walks vehicles toward target stations, recording every move.
#[derive(Debug, Clone, Copy)]
pub struct Router<'a> {
    navigator: Navigator<'a>,
    pickup_policy: PickupPolicy,
    step_limit: usize,
}

impl<'a> Router<'a> {
    /// Creates a router.
    pub fn new(navigator: Navigator<'a>, pickup_policy: PickupPolicy, step_limit: usize) -> Self {
        Self {
            navigator,
            pickup_policy,
            step_limit,
        }
    }

    /// Moves `vehicle` to `target`, appending one move per traversed edge.
    ///
    /// `reserved` names a package the vehicle is committed to collect at
    /// `target`; opportunistic pickups never eat into its weight. Returns
    /// the number of steps taken.
    pub fn route(
        &self,
        state: &mut DispatchState,
        moves: &mut Vec<Move>,
        vehicle: usize,
        target: usize,
        reserved: Option<usize>,
    ) -> Result<usize, DispatchError> {
        let graph = self.navigator.graph();
        debug!(
            "routing {} from {} to {}",
            state.fleet.get(vehicle).id(),
            graph.station_name(state.fleet.get(vehicle).station()),
            graph.station_name(target)
        );

        let mut steps = 0;
        while state.fleet.get(vehicle).station() != target {
            if steps == self.step_limit {
                return Err(DispatchError::BoundExceeded {
                    scope: BoundScope::Route {
                        vehicle: state.fleet.get(vehicle).id().to_string(),
                    },
                    limit: self.step_limit,
                });
            }
            steps += 1;
            self.step(state, moves, vehicle, target, reserved)?;
        }
        Ok(steps)
    }

    fn step(
        &self,
        state: &mut DispatchState,
        moves: &mut Vec<Move>,
        vehicle: usize,
        target: usize,
        reserved: Option<usize>,
    ) -> Result<(), DispatchError> {
        let graph = self.navigator.graph();
        self.pick_up(state, vehicle, reserved)?;

        let current = state.fleet.get(vehicle).station();
        let (next, distance) = self
            .navigator
            .next_hop(current, target)
            .and_then(|n| Some((n, graph.distance(current, n)?)))
            .ok_or_else(|| DispatchError::NoPath {
                from: graph.station_name(current).to_string(),
                to: graph.station_name(target).to_string(),
            })?;

        let DispatchState { fleet, registry } = state;
        let drops: Vec<usize> = fleet
            .get(vehicle)
            .load()
            .iter()
            .copied()
            .filter(|&p| registry.get(p).destination() == next)
            .collect();
        for &p in &drops {
            fleet.unload_package(vehicle, p, registry)?;
        }

        let name = |p: usize| registry.get(p).id().to_string();
        let picked_up = fleet.get_mut(vehicle).take_unlogged_pickups();
        let record = Move {
            time: fleet.get(vehicle).elapsed(),
            vehicle: fleet.get(vehicle).id().to_string(),
            from: graph.station_name(current).to_string(),
            to: graph.station_name(next).to_string(),
            picked_up: picked_up.into_iter().map(name).collect(),
            dropped_off: drops.iter().copied().map(name).collect(),
            load: fleet.get(vehicle).load().iter().copied().map(name).collect(),
        };
        trace!("{record}");
        moves.push(record);

        fleet.get_mut(vehicle).travel(next, distance)
    }

    /// Loads waiting packages at the vehicle's station, in declaration
    /// order, while they fit beside the reserved weight.
    fn pick_up(
        &self,
        state: &mut DispatchState,
        vehicle: usize,
        reserved: Option<usize>,
    ) -> Result<(), DispatchError> {
        let DispatchState { fleet, registry } = state;
        let station = fleet.get(vehicle).station();
        let reserve = reserved
            .map(|p| registry.get(p))
            .filter(|p| p.status() == PackageStatus::AtPickup)
            .map_or(0, |p| p.weight());

        let waiting: Vec<usize> = registry
            .waiting_at(station)
            .filter(|&p| Some(p) != reserved)
            .collect();
        for p in waiting {
            let needed = registry.get(p).weight().saturating_add(reserve);
            if needed > fleet.remaining_capacity(vehicle, registry) {
                continue;
            }
            fleet.load_package(vehicle, p, registry)?;
            debug!(
                "{} picked up {} at {}",
                fleet.get(vehicle).id(),
                registry.get(p).id(),
                self.navigator.graph().station_name(station)
            );
            if self.pickup_policy == PickupPolicy::FirstFit {
                break;
            }
        }
        Ok(())
    }
}
