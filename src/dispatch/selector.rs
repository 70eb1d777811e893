//! Candidate selection: which vehicle should fetch a package.
//!
//! # Algorithm
//!
//! 1. Among vehicles whose remaining capacity fits the package, take the
//!    one closest to the package origin by the navigator's distance proxy.
//!    Ties go to the earlier vehicle in fleet order.
//! 2. Otherwise take the first vehicle whose full capacity fits, ignoring
//!    distance. It will have to drop some of its load first.
//! 3. Otherwise no vehicle can ever carry the package: a configuration
//!    error.
//!
//! Vehicles the proxy cannot measure (unreachable under shortest-path
//! navigation) are never candidates.

use log::{debug, warn};

use crate::error::DispatchError;
use crate::network::Navigator;
use crate::state::DispatchState;

/// Picks the vehicle to assign to a pending package.
#[derive(Debug, Clone, Copy)]
pub struct CandidateSelector<'a> {
    navigator: Navigator<'a>,
}

impl<'a> CandidateSelector<'a> {
    /// Creates a selector using the navigator's distance proxy.
    pub fn new(navigator: Navigator<'a>) -> Self {
        Self { navigator }
    }

    /// Selects a vehicle for `package`.
    ///
    /// The returned vehicle may lack the remaining capacity to load the
    /// package right away (step 2 of the algorithm); callers check
    /// [`FleetState::remaining_capacity`](crate::state::FleetState::remaining_capacity).
    pub fn select_vehicle(
        &self,
        state: &DispatchState,
        package: usize,
    ) -> Result<usize, DispatchError> {
        let fleet = &state.fleet;
        let registry = &state.registry;
        let pkg = registry.get(package);
        let origin = pkg.origin();
        let weight = pkg.weight();

        let mut nearest: Option<(usize, u64)> = None;
        for (i, vehicle) in fleet.vehicles().iter().enumerate() {
            if fleet.remaining_capacity(i, registry) < weight {
                continue;
            }
            let Some(d) = self.navigator.proxy_distance(vehicle.station(), origin) else {
                continue;
            };
            if nearest.is_none_or(|(_, best)| d < best) {
                nearest = Some((i, d));
            }
        }
        if let Some((i, d)) = nearest {
            debug!(
                "selected {} for {} (proxy distance {d})",
                fleet.get(i).id(),
                pkg.id()
            );
            return Ok(i);
        }

        let capable: Vec<usize> = (0..fleet.len())
            .filter(|&i| fleet.get(i).capacity() >= weight)
            .collect();
        let fallback = capable.iter().copied().find(|&i| {
            self.navigator
                .proxy_distance(fleet.get(i).station(), origin)
                .is_some()
        });

        match fallback {
            Some(i) => {
                warn!(
                    "no vehicle has {weight} spare capacity for {}; falling back to {}",
                    pkg.id(),
                    fleet.get(i).id()
                );
                Ok(i)
            }
            None if capable.is_empty() => Err(DispatchError::NoVehicle {
                package: pkg.id().to_string(),
                weight,
                max_capacity: fleet
                    .vehicles()
                    .iter()
                    .map(|v| v.capacity())
                    .max()
                    .unwrap_or(0),
            }),
            None => {
                let graph = self.navigator.graph();
                Err(DispatchError::NoPath {
                    from: graph.station_name(fleet.get(capable[0]).station()).to_string(),
                    to: graph.station_name(origin).to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProblemDocument;
    use crate::network::{Graph, Navigation, PathMatrix};

    struct Fixture {
        graph: Graph,
        paths: PathMatrix,
        state: DispatchState,
    }

    fn fixture(stations: &[&str], edges: &[&str], deliveries: &[&str], trains: &[&str]) -> Fixture {
        let strings = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let problem = ProblemDocument {
            stations: strings(stations),
            edges: strings(edges),
            deliveries: strings(deliveries),
            trains: strings(trains),
        }
        .parse()
        .expect("valid problem");
        let graph = Graph::build(problem.stations(), problem.edges()).expect("valid graph");
        let paths = PathMatrix::from_graph(&graph);
        let state = DispatchState::from_problem(&problem, &graph).expect("valid state");
        Fixture {
            graph,
            paths,
            state,
        }
    }

    fn line(deliveries: &[&str], trains: &[&str]) -> Fixture {
        fixture(
            &["A", "B", "C", "D"],
            &["E1,A,B,30", "E2,B,C,10", "E3,C,D,40"],
            deliveries,
            trains,
        )
    }

    fn select(f: &Fixture, mode: Navigation, package: usize) -> Result<usize, DispatchError> {
        let nav = Navigator::new(&f.graph, &f.paths, mode);
        CandidateSelector::new(nav).select_vehicle(&f.state, package)
    }

    #[test]
    fn test_picks_nearest_feasible() {
        let f = line(&["K1,5,A,C"], &["Q1,10,D", "Q2,10,B"]);
        assert_eq!(select(&f, Navigation::Ordinal, 0), Ok(1));
        assert_eq!(select(&f, Navigation::ShortestPath, 0), Ok(1));
    }

    #[test]
    fn test_tie_goes_to_fleet_order() {
        let f = line(&["K1,5,B,D"], &["Q1,10,A", "Q2,10,C"]);
        // Ordinal proxy: both one position away.
        assert_eq!(select(&f, Navigation::Ordinal, 0), Ok(0));
        // Shortest path: C is 10 from B, A is 30.
        assert_eq!(select(&f, Navigation::ShortestPath, 0), Ok(1));
    }

    #[test]
    fn test_skips_nearest_without_capacity() {
        // Q1 sits on the package but is too small; Q2 is farther.
        let f = line(&["K1,8,A,C"], &["Q1,6,A", "Q2,9,D"]);
        assert_eq!(select(&f, Navigation::Ordinal, 0), Ok(1));
    }

    #[test]
    fn test_falls_back_to_full_capacity() {
        let mut f = line(&["K1,6,A,D", "K2,5,B,D"], &["Q1,8,A"]);
        let DispatchState { fleet, registry } = &mut f.state;
        fleet.load_package(0, 0, registry).expect("fits");
        // Q1 has 2 spare but full capacity 8 covers K2.
        assert_eq!(select(&f, Navigation::Ordinal, 1), Ok(0));
    }

    #[test]
    fn test_no_vehicle_for_heavy_package() {
        let f = line(&["K1,50,A,C"], &["Q1,10,D", "Q2,20,B"]);
        assert_eq!(
            select(&f, Navigation::ShortestPath, 0),
            Err(DispatchError::NoVehicle {
                package: "K1".into(),
                weight: 50,
                max_capacity: 20,
            })
        );
    }

    #[test]
    fn test_unreachable_vehicle_is_not_a_candidate() {
        let f = fixture(
            &["A", "B", "C", "D"],
            &["E1,A,B,5", "E2,C,D,5"],
            &["K1,5,A,B"],
            &["Q1,10,C", "Q2,10,B"],
        );
        assert_eq!(select(&f, Navigation::ShortestPath, 0), Ok(1));

        let f = fixture(
            &["A", "B", "C", "D"],
            &["E1,A,B,5", "E2,C,D,5"],
            &["K1,5,A,B"],
            &["Q1,10,C"],
        );
        assert!(matches!(
            select(&f, Navigation::ShortestPath, 0),
            Err(DispatchError::NoPath { .. })
        ));
    }

    #[test]
    fn test_ordinal_skips_vehicle_in_other_component() {
        // Q1 at B is as close to C by position as Q2 at D, but cannot reach it.
        let f = fixture(
            &["A", "B", "C", "D"],
            &["E1,A,B,1", "E2,C,D,1"],
            &["K1,1,C,D"],
            &["Q1,5,B", "Q2,5,D"],
        );
        assert_eq!(select(&f, Navigation::Ordinal, 0), Ok(1));
        assert_eq!(select(&f, Navigation::ShortestPath, 0), Ok(1));

        let f = fixture(
            &["A", "B", "C", "D"],
            &["E1,A,B,1", "E2,C,D,1"],
            &["K1,1,C,D"],
            &["Q1,5,B"],
        );
        assert!(matches!(
            select(&f, Navigation::Ordinal, 0),
            Err(DispatchError::NoPath { .. })
        ));
    }
}
