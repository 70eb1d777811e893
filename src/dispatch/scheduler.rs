//! Top-level dispatch loop.
//!
//! # Algorithm
//!
//! While packages are pending, take the oldest one:
//!
//! - **Waiting at pickup**: select a vehicle. If it lacks spare capacity
//!   (a fallback choice), send it to drop its oldest onboard package and
//!   start over. Otherwise send it to the origin, reserving room for the
//!   package, load it, and route it to the destination.
//! - **In flight**: route the vehicle holding it to the destination.
//!
//! Each iteration delivers at least one package. Vehicles keep separate
//! clocks, so the makespan is the largest final clock.

use log::{debug, info};

use super::{CandidateSelector, DispatchConfig, Router};
use crate::error::{BoundScope, DispatchError};
use crate::models::{Itinerary, Move, PackageStatus, Problem, Timeline};
use crate::network::{Graph, Navigation, Navigator, PathMatrix};
use crate::state::DispatchState;

/// A validated dispatch run, ready to execute.
///
/// # Examples
///
/// ```
/// use u_dispatch::dispatch::{DispatchConfig, Dispatcher};
/// use u_dispatch::models::ProblemDocument;
///
/// let problem = ProblemDocument {
///     stations: vec!["A".into(), "B".into(), "C".into(), "D".into()],
///     edges: vec!["E1,A,B,30".into(), "E2,B,C,10".into(), "E3,C,D,40".into()],
///     deliveries: vec!["K1,5,A,C".into()],
///     trains: vec!["Q1,6,B".into()],
/// }
/// .parse()
/// .unwrap();
///
/// let itinerary = Dispatcher::new(&problem, DispatchConfig::default())
///     .unwrap()
///     .run()
///     .unwrap();
/// assert_eq!(itinerary.solution_time(), 70);
/// assert_eq!(itinerary.log_lines(), vec![
///     "W=0, T=Q1, N1=B, P1=[], N2=A, P2=[]",
///     "W=30, T=Q1, N1=A, P1=[K1], N2=B, P2=[]",
///     "W=60, T=Q1, N1=B, P1=[], N2=C, P2=[K1]",
/// ]);
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    graph: Graph,
    paths: PathMatrix,
    state: DispatchState,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Builds the graph and initial state, and checks the problem can be
    /// dispatched at all.
    ///
    /// Fails with [`DispatchError::Unreachable`] if some package's
    /// destination is disconnected from its origin, and with
    /// [`DispatchError::BranchingTopology`] if ordinal navigation is
    /// requested on a graph with a junction.
    pub fn new(problem: &Problem, config: DispatchConfig) -> Result<Self, DispatchError> {
        let graph = Graph::build(problem.stations(), problem.edges())?;

        if config.navigation == Navigation::Ordinal {
            if let Some(junction) = graph.first_junction() {
                return Err(DispatchError::BranchingTopology {
                    station: graph.station_name(junction).to_string(),
                    degree: graph.degree(junction),
                });
            }
        }

        let paths = PathMatrix::from_graph(&graph);
        let state = DispatchState::from_problem(problem, &graph)?;
        for pkg in state.registry.packages() {
            if !paths.connected(pkg.origin(), pkg.destination()) {
                return Err(DispatchError::Unreachable {
                    package: pkg.id().to_string(),
                    origin: graph.station_name(pkg.origin()).to_string(),
                    destination: graph.station_name(pkg.destination()).to_string(),
                });
            }
        }

        Ok(Self {
            graph,
            paths,
            state,
            config,
        })
    }

    /// The station graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The current run state.
    pub fn state(&self) -> &DispatchState {
        &self.state
    }

    /// Runs the scheduler until every package is delivered.
    pub fn run(mut self) -> Result<Itinerary, DispatchError> {
        let navigator = Navigator::new(&self.graph, &self.paths, self.config.navigation);
        let selector = CandidateSelector::new(navigator);
        let router = Router::new(
            navigator,
            self.config.pickup_policy,
            self.config
                .route_step_limit_for(self.graph.edge_count()),
        );
        let limit = self.config.iteration_limit_for(
            self.graph.edge_count(),
            self.state.registry.packages().len(),
        );
        let state = &mut self.state;
        let mut moves: Vec<Move> = Vec::new();
        let mut iterations = 0;

        info!(
            "dispatching {} packages with {} vehicles",
            state.registry.pending().len(),
            state.fleet.len()
        );

        while let Some(package) = state.registry.first_pending() {
            if iterations == limit {
                return Err(DispatchError::BoundExceeded {
                    scope: BoundScope::Schedule,
                    limit,
                });
            }
            iterations += 1;

            let pkg = state.registry.get(package);
            let (origin, destination, weight) = (pkg.origin(), pkg.destination(), pkg.weight());
            debug!(
                "iteration {iterations}: {} ({:?}), {} left",
                pkg.id(),
                pkg.status(),
                state.registry.pending().len()
            );

            let vehicle = if pkg.status() == PackageStatus::InFlight {
                state
                    .fleet
                    .holder(package)
                    .ok_or_else(|| DispatchError::NotHeld {
                        package: pkg.id().to_string(),
                    })?
            } else {
                let vehicle = selector.select_vehicle(state, package)?;
                if state.fleet.remaining_capacity(vehicle, &state.registry) < weight {
                    // A non-empty load always fits in full capacity, so
                    // the vehicle holds something to deliver first.
                    let Some(&onboard) = state.fleet.get(vehicle).load().first() else {
                        return Err(DispatchError::CapacityExceeded {
                            vehicle: state.fleet.get(vehicle).id().to_string(),
                            package: state.registry.get(package).id().to_string(),
                            weight,
                            remaining: state.fleet.remaining_capacity(vehicle, &state.registry),
                        });
                    };
                    let target = state.registry.get(onboard).destination();
                    router.route(state, &mut moves, vehicle, target, None)?;
                    continue;
                }
                router.route(state, &mut moves, vehicle, origin, Some(package))?;
                let DispatchState { fleet, registry } = &mut *state;
                fleet.load_package(vehicle, package, registry)?;
                vehicle
            };

            router.route(state, &mut moves, vehicle, destination, None)?;
        }

        let timelines: Vec<Timeline> = state
            .fleet
            .vehicles()
            .iter()
            .map(|v| Timeline {
                vehicle: v.id().to_string(),
                elapsed: v.elapsed(),
            })
            .collect();
        let itinerary = Itinerary::new(moves, timelines);
        info!(
            "dispatch finished after {iterations} iterations: {} moves, solution time {}",
            itinerary.moves().len(),
            itinerary.solution_time()
        );
        Ok(itinerary)
    }
}

/// Dispatches a problem with the default configuration.
pub fn dispatch(problem: &Problem) -> Result<Itinerary, DispatchError> {
    Dispatcher::new(problem, DispatchConfig::default())?.run()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::models::ProblemDocument;

    fn problem(stations: &[&str], edges: &[&str], deliveries: &[&str], trains: &[&str]) -> Problem {
        let strings = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        ProblemDocument {
            stations: strings(stations),
            edges: strings(edges),
            deliveries: strings(deliveries),
            trains: strings(trains),
        }
        .parse()
        .expect("valid problem")
    }

    fn line(deliveries: &[&str], trains: &[&str]) -> Problem {
        problem(
            &["A", "B", "C", "D"],
            &["E1,A,B,30", "E2,B,C,10", "E3,C,D,40"],
            deliveries,
            trains,
        )
    }

    fn run(problem: &Problem, navigation: Navigation) -> Result<Itinerary, DispatchError> {
        Dispatcher::new(problem, DispatchConfig::default().with_navigation(navigation))?.run()
    }

    #[rstest]
    #[case::ordinal(Navigation::Ordinal)]
    #[case::shortest_path(Navigation::ShortestPath)]
    fn test_single_vehicle_single_package(#[case] navigation: Navigation) {
        let p = line(&["K1,5,A,C"], &["Q1,6,B"]);
        let it = run(&p, navigation).expect("solvable");
        let legs: Vec<(&str, &str)> = it
            .moves()
            .iter()
            .map(|m| (m.from.as_str(), m.to.as_str()))
            .collect();
        assert_eq!(legs, vec![("B", "A"), ("A", "B"), ("B", "C")]);
        assert_eq!(it.moves()[1].picked_up, vec!["K1"]);
        assert_eq!(it.moves()[2].dropped_off, vec!["K1"]);
        assert_eq!(it.solution_time(), 70);
        assert!(it.moves().len() <= p.edges().len() * p.deliveries().len());
    }

    #[test]
    fn test_capacity_overflow_uses_farther_vehicle() {
        // Q1 sits at the origin but can never lift K1.
        let p = line(&["K1,8,A,C"], &["Q1,6,A", "Q2,9,D"]);
        let it = run(&p, Navigation::Ordinal).expect("solvable");
        assert!(it.moves().iter().all(|m| m.vehicle == "Q2"));
        let pickup = it
            .moves()
            .iter()
            .find(|m| m.picked_up.contains(&"K1".to_string()))
            .expect("K1 picked up");
        assert_eq!(pickup.from, "A");
        // D→C→B→A is 80, then A→B→C is 40.
        assert_eq!(it.solution_time(), 120);
        assert_eq!(it.timelines()[0].elapsed, 0);
    }

    #[test]
    fn test_opportunistic_co_loading() {
        // Q1 passes B on the way to K1 at A; K2 and K3 wait at B.
        let p = line(&["K1,3,A,D", "K2,2,B,C", "K3,2,B,D"], &["Q1,10,C"]);
        let it = run(&p, Navigation::Ordinal).expect("solvable");
        let at_b = &it.moves()[1];
        assert_eq!((at_b.from.as_str(), at_b.to.as_str()), ("B", "A"));
        assert_eq!(at_b.picked_up, vec!["K2", "K3"]);
        // One sweep back east delivers all three.
        let legs: Vec<String> = it.moves().iter().map(|m| format!("{}{}", m.from, m.to)).collect();
        assert_eq!(legs, vec!["CB", "BA", "AB", "BC", "CD"]);
        assert_eq!(it.moves()[3].dropped_off, vec!["K2"]);
        assert_eq!(it.moves()[4].dropped_off, vec!["K3", "K1"]);
        assert!(it.moves().len() <= p.edges().len() * p.deliveries().len());
    }

    #[test]
    fn test_unliftable_package_is_configuration_error() {
        let p = line(&["K1,50,A,C"], &["Q1,6,B", "Q2,10,D"]);
        let err = run(&p, Navigation::ShortestPath).unwrap_err();
        assert_eq!(
            err,
            DispatchError::NoVehicle {
                package: "K1".into(),
                weight: 50,
                max_capacity: 10,
            }
        );
        assert!(err.is_configuration());
    }

    #[test]
    fn test_busy_fallback_vehicle_delivers_first() {
        // Q1 grabs K3 on its first leg, leaving too little room for K2.
        let p = line(&["K1,1,A,B", "K2,6,C,D", "K3,4,A,D"], &["Q1,8,A"]);
        let it = run(&p, Navigation::ShortestPath).expect("solvable");
        let legs: Vec<String> = it.moves().iter().map(|m| format!("{}{}", m.from, m.to)).collect();
        assert_eq!(legs, vec!["AB", "BC", "CD", "DC", "CD"]);
        assert_eq!(it.moves()[0].picked_up, vec!["K1", "K3"]);
        assert!(it.moves()[1].picked_up.is_empty());
        assert_eq!(it.moves()[2].dropped_off, vec!["K3"]);
        assert_eq!(it.moves()[4].picked_up, vec!["K2"]);
        for m in it.moves() {
            let load: u32 = m.load.iter().filter_map(|k| p.weight_of(k)).sum();
            assert!(load <= 8, "overloaded at {m}");
        }
        assert_eq!(it.solution_time(), 160);
    }

    #[test]
    fn test_vehicles_keep_independent_clocks() {
        let p = line(&["K1,1,A,B", "K2,1,D,C"], &["Q1,5,A", "Q2,5,D"]);
        let it = run(&p, Navigation::ShortestPath).expect("solvable");
        assert_eq!(it.timelines()[0].elapsed, 30);
        assert_eq!(it.timelines()[1].elapsed, 40);
        assert_eq!(it.makespan(), 40);
        assert_eq!(it.total_travel(), 70);
    }

    #[test]
    fn test_no_deliveries() {
        let p = line(&[], &["Q1,5,A"]);
        let it = run(&p, Navigation::Ordinal).expect("trivial");
        assert!(it.moves().is_empty());
        assert_eq!(it.solution_time(), 0);
    }

    #[test]
    fn test_branching_graph_rejected_for_ordinal() {
        let p = problem(
            &["A", "B", "C", "D"],
            &["E1,A,B,1", "E2,B,C,1", "E3,B,D,1"],
            &["K1,1,A,D"],
            &["Q1,5,C"],
        );
        assert_eq!(
            run(&p, Navigation::Ordinal).unwrap_err(),
            DispatchError::BranchingTopology {
                station: "B".into(),
                degree: 3,
            }
        );
        let it = run(&p, Navigation::ShortestPath).expect("solvable");
        let legs: Vec<String> = it.moves().iter().map(|m| format!("{}{}", m.from, m.to)).collect();
        assert_eq!(legs, vec!["CB", "BA", "AB", "BD"]);
        assert_eq!(it.solution_time(), 4);
    }

    #[test]
    fn test_disconnected_package_rejected() {
        let p = problem(
            &["A", "B", "C", "D"],
            &["E1,A,B,1", "E2,C,D,1"],
            &["K1,1,A,D"],
            &["Q1,5,A"],
        );
        assert_eq!(
            run(&p, Navigation::ShortestPath).unwrap_err(),
            DispatchError::Unreachable {
                package: "K1".into(),
                origin: "A".into(),
                destination: "D".into(),
            }
        );
    }

    #[test]
    fn test_misordered_stations_hit_route_bound() {
        // The path runs A-C-B-D but the station list says A, B, C, D.
        let p = problem(
            &["A", "B", "C", "D"],
            &["E1,A,C,1", "E2,C,B,1", "E3,B,D,1"],
            &["K1,1,A,D"],
            &["Q1,5,A"],
        );
        assert!(matches!(
            run(&p, Navigation::Ordinal),
            Err(DispatchError::BoundExceeded {
                scope: BoundScope::Route { .. },
                ..
            })
        ));
        assert_eq!(run(&p, Navigation::ShortestPath).expect("solvable").solution_time(), 3);
    }

    #[test]
    fn test_iteration_bound() {
        let p = line(&["K1,1,A,B", "K2,1,C,D"], &["Q1,5,A"]);
        let err = Dispatcher::new(&p, DispatchConfig::default().with_iteration_limit(1))
            .expect("valid")
            .run()
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::BoundExceeded {
                scope: BoundScope::Schedule,
                limit: 1,
            }
        );
    }

    #[test]
    fn test_dispatch_default_config() {
        let p = line(&["K1,5,A,C"], &["Q1,6,B"]);
        assert_eq!(dispatch(&p).expect("solvable").solution_time(), 70);
    }

    #[rstest]
    #[case::ordinal(Navigation::Ordinal)]
    #[case::shortest_path(Navigation::ShortestPath)]
    fn test_split_network_uses_reachable_vehicle(#[case] navigation: Navigation) {
        let p = problem(
            &["A", "B", "C", "D"],
            &["E1,A,B,1", "E2,C,D,1"],
            &["K1,1,C,D"],
            &["Q1,5,B", "Q2,5,D"],
        );
        let config = DispatchConfig::default().with_navigation(navigation);
        let it = Dispatcher::new(&p, config)
            .and_then(Dispatcher::run)
            .expect("solvable");
        assert_eq!(it.solution_time(), 2);
        assert!(it.moves().iter().all(|m| m.vehicle == "Q2"));
    }

    #[test]
    fn test_longest_edges_do_not_overflow() {
        let p = problem(
            &["A", "B", "C", "D"],
            &["E1,A,B,4294967295", "E2,B,C,4294967295", "E3,C,D,4294967295"],
            &["K1,1,A,D"],
            &["Q1,5,D"],
        );
        let it = dispatch(&p).expect("solvable");
        assert_eq!(it.solution_time(), 6 * 4_294_967_295);
    }

    #[test]
    fn test_oversized_edge_rejected() {
        let doc = ProblemDocument {
            stations: vec!["A".into(), "B".into()],
            edges: vec!["E1,A,B,9223372036854775807".into()],
            deliveries: vec![],
            trains: vec!["Q1,5,A".into()],
        };
        assert!(matches!(
            doc.parse(),
            Err(DispatchError::MalformedEdge { .. })
        ));
    }
}
