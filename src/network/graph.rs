//! Undirected station graph with adjacency and a symmetric distance table.

use std::collections::HashMap;

use crate::error::DispatchError;
use crate::models::EdgeRecord;

/// Whether stepping to a neighbor moves the ordinal coordinate closer to a
/// target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The neighbor's ordinal is strictly closer to the target's.
    Toward,
    /// The neighbor's ordinal is no closer to the target's.
    Away,
}

/// The station graph built from edge records.
///
/// Stations are addressed by their index in the declared station list; the
/// index doubles as the 1-D ordinal coordinate used by
/// [`direction_hint`](Self::direction_hint). Neighbor lists keep edge
/// declaration order. Parallel edges collapse to the shortest one.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::EdgeRecord;
/// use u_dispatch::network::Graph;
///
/// let stations = ["A", "B", "C"].map(String::from);
/// let edges = vec![EdgeRecord::new("E1", "A", "B", 30), EdgeRecord::new("E2", "B", "C", 10)];
/// let g = Graph::build(&stations, &edges).unwrap();
/// let b = g.station_index("B").unwrap();
/// assert_eq!(g.neighbors(b), &[0, 2]);
/// assert_eq!(g.distance(b, 2), Some(10));
/// assert_eq!(g.distance(2, b), Some(10));
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    stations: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<usize>>,
    distances: HashMap<(usize, usize), u64>,
    edge_count: usize,
}

impl Graph {
    /// Builds the graph from an ordered station list and edge records.
    ///
    /// Fails with [`DispatchError::MalformedEdge`] on a non-positive
    /// distance or an edge that does not join two distinct stations, and
    /// with [`DispatchError::UnknownStation`] when an edge names an
    /// undeclared station.
    pub fn build(stations: &[String], edges: &[EdgeRecord]) -> Result<Self, DispatchError> {
        let index: HashMap<String, usize> = stations
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        let mut adjacency = vec![Vec::new(); stations.len()];
        let mut distances = HashMap::new();

        for edge in edges {
            edge.validate()?;
            let resolve = |name: &str| {
                index
                    .get(name)
                    .copied()
                    .ok_or_else(|| DispatchError::UnknownStation {
                        station: name.to_string(),
                        referenced_by: edge.id.clone(),
                    })
            };
            let a = resolve(&edge.a)?;
            let b = resolve(&edge.b)?;

            match distances.get(&(a, b)).copied() {
                Some(existing) if existing <= edge.distance => {}
                Some(_) => {
                    distances.insert((a, b), edge.distance);
                    distances.insert((b, a), edge.distance);
                }
                None => {
                    adjacency[a].push(b);
                    adjacency[b].push(a);
                    distances.insert((a, b), edge.distance);
                    distances.insert((b, a), edge.distance);
                }
            }
        }

        Ok(Self {
            stations: stations.to_vec(),
            index,
            adjacency,
            distances,
            edge_count: edges.len(),
        })
    }

    /// Number of stations.
    pub fn size(&self) -> usize {
        self.stations.len()
    }

    /// Number of edge records the graph was built from.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Index (ordinal) of a station by name.
    pub fn station_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Name of the station at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn station_name(&self, index: usize) -> &str {
        &self.stations[index]
    }

    /// Neighbors of a station in edge declaration order.
    ///
    /// # Panics
    ///
    /// Panics if `station` is out of bounds.
    pub fn neighbors(&self, station: usize) -> &[usize] {
        &self.adjacency[station]
    }

    /// Number of distinct neighbors of a station.
    pub fn degree(&self, station: usize) -> usize {
        self.adjacency[station].len()
    }

    /// Edge distance between two adjacent stations.
    pub fn distance(&self, a: usize, b: usize) -> Option<u64> {
        self.distances.get(&(a, b)).copied()
    }

    /// Returns `true` if no station has more than two neighbors.
    pub fn is_path_topology(&self) -> bool {
        self.first_junction().is_none()
    }

    /// The first station (in declaration order) with more than two neighbors.
    pub fn first_junction(&self) -> Option<usize> {
        (0..self.size()).find(|&s| self.degree(s) > 2)
    }

    /// Compares ordinal gaps to decide whether `candidate` steps toward
    /// `target` from `current`.
    ///
    /// Only meaningful when the station list order follows a simple path.
    pub fn direction_hint(&self, current: usize, target: usize, candidate: usize) -> Direction {
        if candidate.abs_diff(target) < current.abs_diff(target) {
            Direction::Toward
        } else {
            Direction::Away
        }
    }
}
