//! All-pairs shortest path distances.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::Graph;

/// A dense n×n matrix of shortest-path distances stored in row-major order.
///
/// `None` marks an unreachable pair. Built by running Dijkstra from every
/// station, which is cheap for the station counts this engine targets.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::EdgeRecord;
/// use u_dispatch::network::{Graph, PathMatrix};
///
/// let stations = ["A", "B", "C", "D"].map(String::from);
/// let edges = vec![
///     EdgeRecord::new("E1", "A", "B", 30),
///     EdgeRecord::new("E2", "B", "C", 10),
/// ];
/// let g = Graph::build(&stations, &edges).unwrap();
/// let pm = PathMatrix::from_graph(&g);
/// assert_eq!(pm.get(0, 2), Some(40));
/// assert_eq!(pm.get(2, 0), Some(40));
/// assert_eq!(pm.get(0, 3), None);
/// ```
#[derive(Debug, Clone)]
pub struct PathMatrix {
    data: Vec<Option<u64>>,
    size: usize,
}

impl PathMatrix {
    /// Computes shortest distances between every pair of stations.
    pub fn from_graph(graph: &Graph) -> Self {
        let size = graph.size();
        let mut data = Vec::with_capacity(size * size);
        for source in 0..size {
            data.extend(dijkstra(graph, source));
        }
        Self { data, size }
    }

    /// Shortest distance from `from` to `to`, or `None` if unreachable.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> Option<u64> {
        self.data[from * self.size + to]
    }

    /// Returns `true` if a path exists between the two stations.
    pub fn connected(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_some()
    }

    /// Number of stations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}

fn dijkstra(graph: &Graph, source: usize) -> Vec<Option<u64>> {
    let mut dist: Vec<Option<u64>> = vec![None; graph.size()];
    let mut heap = BinaryHeap::new();
    dist[source] = Some(0);
    heap.push(Reverse((0u64, source)));

    while let Some(Reverse((d, node))) = heap.pop() {
        if dist[node].is_some_and(|best| d > best) {
            continue;
        }
        for &next in graph.neighbors(node) {
            let Some(w) = graph.distance(node, next) else {
                continue;
            };
            let Some(candidate) = d.checked_add(w) else {
                continue;
            };
            if dist[next].is_none_or(|best| candidate < best) {
                dist[next] = Some(candidate);
                heap.push(Reverse((candidate, next)));
            }
        }
    }
    dist
}
