//! The result of a dispatch run.

use serde::{Deserialize, Serialize};

use super::Move;

/// Final elapsed time of one vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Vehicle identifier.
    pub vehicle: String,
    /// Total travel time of the vehicle at the end of the run.
    pub elapsed: u64,
}

/// Ordered move log plus per-vehicle timelines.
///
/// Vehicles move concurrently, each on its own clock, so the overall
/// solution time is the latest-finishing vehicle's clock (the makespan),
/// not the sum of all travel.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Itinerary, Timeline};
///
/// let it = Itinerary::new(
///     vec![],
///     vec![
///         Timeline { vehicle: "Q1".into(), elapsed: 70 },
///         Timeline { vehicle: "Q2".into(), elapsed: 40 },
///     ],
/// );
/// assert_eq!(it.makespan(), 70);
/// assert_eq!(it.solution_time(), 70);
/// assert_eq!(it.total_travel(), 110);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ItineraryParts")]
pub struct Itinerary {
    moves: Vec<Move>,
    timelines: Vec<Timeline>,
    solution_time: u64,
}

/// Deserialized form; the makespan is always recomputed.
#[derive(Deserialize)]
struct ItineraryParts {
    moves: Vec<Move>,
    timelines: Vec<Timeline>,
}

impl From<ItineraryParts> for Itinerary {
    fn from(parts: ItineraryParts) -> Self {
        Self::new(parts.moves, parts.timelines)
    }
}

impl Itinerary {
    /// Creates an itinerary, computing the makespan from the timelines.
    pub fn new(moves: Vec<Move>, timelines: Vec<Timeline>) -> Self {
        let solution_time = timelines.iter().map(|t| t.elapsed).max().unwrap_or(0);
        Self {
            moves,
            timelines,
            solution_time,
        }
    }

    /// All moves in the order they were emitted.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Moves made by one vehicle, in order.
    pub fn moves_of<'a>(&'a self, vehicle: &'a str) -> impl Iterator<Item = &'a Move> + 'a {
        self.moves.iter().filter(move |m| m.vehicle == vehicle)
    }

    /// Final clock of every vehicle, in fleet order.
    pub fn timelines(&self) -> &[Timeline] {
        &self.timelines
    }

    /// Completion time of the last-finishing vehicle.
    pub fn makespan(&self) -> u64 {
        self.solution_time
    }

    /// Alias of [`makespan`](Self::makespan), the reported solution time.
    pub fn solution_time(&self) -> u64 {
        self.solution_time
    }

    /// Sum of all vehicles' travel times.
    pub fn total_travel(&self) -> u64 {
        self.timelines.iter().map(|t| t.elapsed).sum()
    }

    /// The move log rendered one line per move.
    pub fn log_lines(&self) -> Vec<String> {
        self.moves.iter().map(ToString::to_string).collect()
    }
}
