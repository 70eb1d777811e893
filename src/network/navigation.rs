//! Next-hop and distance-proxy strategies.

use serde::{Deserialize, Serialize};

use super::{Direction, Graph, PathMatrix};

/// How a vehicle decides which neighbor to step to, and how the candidate
/// selector measures closeness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Navigation {
    /// Station-list position as a 1-D coordinate.
    ///
    /// Only correct on path graphs whose station list follows the path;
    /// rejected on graphs with junctions.
    Ordinal,
    /// True shortest paths by edge distance.
    #[default]
    ShortestPath,
}

/// Applies a [`Navigation`] strategy to a graph.
#[derive(Debug, Clone, Copy)]
pub struct Navigator<'a> {
    graph: &'a Graph,
    paths: &'a PathMatrix,
    mode: Navigation,
}

impl<'a> Navigator<'a> {
    /// Creates a navigator over the given graph and its path matrix.
    pub fn new(graph: &'a Graph, paths: &'a PathMatrix, mode: Navigation) -> Self {
        Self { graph, paths, mode }
    }

    /// The graph being navigated.
    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    /// The neighbor of `current` to step to on the way to `target`.
    ///
    /// Returns `None` when `current` has no neighbors or, for shortest-path
    /// navigation, when `target` is unreachable.
    pub fn next_hop(&self, current: usize, target: usize) -> Option<usize> {
        let neighbors = self.graph.neighbors(current);
        match self.mode {
            Navigation::Ordinal => {
                if neighbors.contains(&target) {
                    return Some(target);
                }
                neighbors
                    .iter()
                    .copied()
                    .filter(|&n| self.graph.direction_hint(current, target, n) == Direction::Toward)
                    .min_by_key(|&n| n.abs_diff(target))
                    .or_else(|| neighbors.first().copied())
            }
            Navigation::ShortestPath => neighbors
                .iter()
                .filter_map(|&n| {
                    let step = self.graph.distance(current, n)?;
                    let rest = self.paths.get(n, target)?;
                    Some((step + rest, n))
                })
                .min_by_key(|&(cost, _)| cost)
                .map(|(_, n)| n),
        }
    }

    /// Closeness of two stations as seen by the candidate selector.
    ///
    /// Ordinal navigation uses the absolute difference of station
    /// positions; shortest-path navigation uses the path distance. Both
    /// return `None` for unreachable pairs.
    pub fn proxy_distance(&self, a: usize, b: usize) -> Option<u64> {
        match self.mode {
            Navigation::Ordinal => self
                .paths
                .connected(a, b)
                .then(|| a.abs_diff(b) as u64),
            Navigation::ShortestPath => self.paths.get(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EdgeRecord;

    fn build(stations: &[&str], edges: &[(&str, &str, u64)]) -> (Graph, PathMatrix) {
        let stations: Vec<String> = stations.iter().map(|s| s.to_string()).collect();
        let edges: Vec<EdgeRecord> = edges
            .iter()
            .enumerate()
            .map(|(i, &(a, b, d))| EdgeRecord::new(&format!("E{}", i + 1), a, b, d))
            .collect();
        let g = Graph::build(&stations, &edges).expect("valid");
        let pm = PathMatrix::from_graph(&g);
        (g, pm)
    }

    #[test]
    fn test_ordinal_walks_line() {
        let (g, pm) = build(&["A", "B", "C", "D"], &[("A", "B", 30), ("B", "C", 10), ("C", "D", 40)]);
        let nav = Navigator::new(&g, &pm, Navigation::Ordinal);
        assert_eq!(nav.next_hop(1, 0), Some(0));
        assert_eq!(nav.next_hop(1, 3), Some(2));
        assert_eq!(nav.next_hop(3, 0), Some(2));
        assert_eq!(nav.proxy_distance(0, 3), Some(3));
    }

    #[test]
    fn test_shortest_path_prefers_cheaper_branch() {
        // A junction at A: the ordinal neighbor B is the long way round.
        let (g, pm) = build(
            &["A", "B", "C", "D"],
            &[("A", "B", 50), ("B", "D", 50), ("A", "C", 5), ("C", "D", 5)],
        );
        let nav = Navigator::new(&g, &pm, Navigation::ShortestPath);
        assert_eq!(nav.next_hop(0, 3), Some(2));
        assert_eq!(nav.next_hop(2, 3), Some(3));
        assert_eq!(nav.proxy_distance(0, 3), Some(10));
    }

    #[test]
    fn test_unreachable_target() {
        let (g, pm) = build(&["A", "B", "C"], &[("A", "B", 1)]);
        let nav = Navigator::new(&g, &pm, Navigation::ShortestPath);
        assert_eq!(nav.next_hop(0, 2), None);
        assert_eq!(nav.proxy_distance(0, 2), None);
        let nav = Navigator::new(&g, &pm, Navigation::Ordinal);
        assert_eq!(nav.next_hop(2, 0), None);
        assert_eq!(nav.proxy_distance(0, 2), None);
        assert_eq!(nav.proxy_distance(0, 1), Some(1));
    }

    #[test]
    fn test_default_is_shortest_path() {
        assert_eq!(Navigation::default(), Navigation::ShortestPath);
    }
}
