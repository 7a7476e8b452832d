//! Tour construction and improvement heuristics.
//!
//! Two stateless procedures over a complete Euclidean graph:
//! - `nearest_neighbor` builds an initial tour greedily, O(n²)
//! - `two_opt` refines a tour to a 2-opt local optimum, O(n²) per pass
//!
//! Neither claims a worst-case approximation ratio; together they produce
//! "good enough, fast" tours for routing and sequencing workloads.

use crate::graph::Graph;
use crate::tour::Tour;
use ordered_float::OrderedFloat;

/// Improvement threshold guarding against floating-point noise: a 2-opt move
/// is only applied when it shortens the tour by more than this.
pub const EPSILON: f64 = 1e-9;

/// Nearest-Neighbor construction: start at `start`, repeatedly extend to the
/// closest unvisited node until all nodes are visited.
///
/// Ties on distance are broken toward the lowest node index, so the result
/// is deterministic for a given graph and start node. Requires
/// `start < graph.size()` unless the graph is empty, in which case the empty
/// tour is returned. O(n²) time, O(n) extra space.
pub fn nearest_neighbor(graph: &Graph, start: usize) -> Tour {
    let n = graph.size();
    if n == 0 {
        return Tour::new(0);
    }

    let mut visited = vec![false; n];
    let mut tour = Tour::new(n);
    let route = tour.route_mut();

    let mut current = start;
    route[0] = current;
    visited[current] = true;

    for slot in route.iter_mut().skip(1) {
        // min_by_key keeps the first minimal element, so equidistant
        // candidates resolve to the lowest index.
        let next = (0..n)
            .filter(|&j| !visited[j])
            .min_by_key(|&j| OrderedFloat(graph.distance(current, j)))
            .unwrap();

        *slot = next;
        visited[next] = true;
        current = next;
    }

    tour
}

/// 2-opt local search: repeatedly apply the best segment reversal until no
/// reversal shortens the tour by more than `EPSILON`.
///
/// Each pass scans every pair `(i, k)` with `1 <= i < k <= n-1` and commits
/// only the single most negative delta found (best-improvement; sometimes
/// loosely called first-improvement, but the whole pass is evaluated before
/// any move is applied). Each applied move strictly decreases the length,
/// so the search terminates at a 2-opt-local optimum, not necessarily a
/// global one. Passes cost O(n²); the input tour is left untouched.
pub fn two_opt(graph: &Graph, initial: &Tour) -> Tour {
    let mut tour = initial.clone();
    let n = tour.size();

    let mut improvement = true;
    while improvement {
        improvement = false;
        let mut best_delta = 0.0;
        let mut best_i = 0;
        let mut best_k = 0;

        let route = tour.route();
        for i in 1..n.saturating_sub(1) {
            for k in i + 1..n {
                let a = route[i - 1];
                let b = route[i];
                let c = route[k];
                let d = route[(k + 1) % n];

                // Current edges (a-b) + (c-d) vs. crossed edges (a-c) + (b-d)
                let delta = (graph.distance(a, c) + graph.distance(b, d))
                    - (graph.distance(a, b) + graph.distance(c, d));

                if delta < best_delta {
                    best_delta = delta;
                    best_i = i;
                    best_k = k;
                }
            }
        }

        if best_delta < -EPSILON {
            tour.two_opt_swap(best_i, best_k);
            improvement = true;
        }
    }

    tour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Point;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    fn unit_square() -> Graph {
        Graph::new(vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 1.0, 0.0),
            Point::new(2, 1.0, 1.0),
            Point::new(3, 0.0, 1.0),
        ])
    }

    fn random_graph(n: usize, seed: u64) -> Graph {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let points = (0..n)
            .map(|id| Point::new(id, rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
            .collect();
        Graph::new(points)
    }

    /// Exhaustively verify that no segment reversal still improves the tour
    fn is_two_opt_optimal(graph: &Graph, tour: &Tour) -> bool {
        let n = tour.size();
        let route = tour.route();
        for i in 1..n.saturating_sub(1) {
            for k in i + 1..n {
                let a = route[i - 1];
                let b = route[i];
                let c = route[k];
                let d = route[(k + 1) % n];
                let delta = (graph.distance(a, c) + graph.distance(b, d))
                    - (graph.distance(a, b) + graph.distance(c, d));
                if delta < -EPSILON {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_unit_square_nn_quality() {
        let g = unit_square();
        let nn = nearest_neighbor(&g, 0);
        assert!(nn.is_permutation());
        // NN on a unit square stays within 1.5x of the optimal cycle (4.0)
        assert!(nn.length(&g) <= 6.0);
    }

    #[test]
    fn test_unit_square_two_opt_optimal_from_any_corner() {
        let g = unit_square();
        for start in 0..4 {
            let nn = nearest_neighbor(&g, start);
            let opt = two_opt(&g, &nn);
            assert!(opt.is_permutation());
            assert!(
                (opt.length(&g) - 4.0).abs() < 1e-6,
                "start {} gave length {}",
                start,
                opt.length(&g)
            );
        }
    }

    #[test]
    fn test_permutation_invariant_random() {
        for seed in 0..5 {
            let g = random_graph(40, seed);
            let nn = nearest_neighbor(&g, (seed as usize * 7) % 40);
            assert!(nn.is_permutation());
            let opt = two_opt(&g, &nn);
            assert!(opt.is_permutation());
        }
    }

    #[test]
    fn test_monotonic_improvement() {
        let g = random_graph(30, 42);
        // Worst-case starting point: the identity tour, not an NN tour
        let initial = Tour::new(30);
        let improved = two_opt(&g, &initial);
        assert!(improved.length(&g) <= initial.length(&g));

        let nn = nearest_neighbor(&g, 0);
        let refined = two_opt(&g, &nn);
        assert!(refined.length(&g) <= nn.length(&g));
    }

    #[test]
    fn test_local_optimality_after_convergence() {
        for seed in [1, 17, 99] {
            let g = random_graph(25, seed);
            let opt = two_opt(&g, &nearest_neighbor(&g, 0));
            assert!(is_two_opt_optimal(&g, &opt));
        }
    }

    #[test]
    fn test_two_opt_idempotent() {
        let g = random_graph(20, 7);
        let first = two_opt(&g, &nearest_neighbor(&g, 0));
        let second = two_opt(&g, &first);
        assert_eq!(first.route(), second.route());
        assert_eq!(first.length(&g), second.length(&g));
    }

    #[test]
    fn test_two_opt_leaves_input_untouched() {
        let g = random_graph(15, 3);
        let initial = Tour::new(15);
        let snapshot = initial.clone();
        let _ = two_opt(&g, &initial);
        assert_eq!(initial, snapshot);
    }

    #[test]
    fn test_degenerate_sizes() {
        let empty = Graph::new(Vec::new());
        let tour = nearest_neighbor(&empty, 0);
        assert_eq!(tour.size(), 0);
        assert_eq!(two_opt(&empty, &tour).length(&empty), 0.0);

        let single = Graph::new(vec![Point::new(0, 2.0, 3.0)]);
        let tour = nearest_neighbor(&single, 0);
        assert_eq!(tour.route(), &[0]);
        let opt = two_opt(&single, &tour);
        assert_eq!(opt.route(), &[0]);
        assert_eq!(opt.length(&single), 0.0);

        let pair = Graph::new(vec![Point::new(0, 0.0, 0.0), Point::new(1, 1.0, 0.0)]);
        let tour = nearest_neighbor(&pair, 1);
        assert_eq!(tour.route(), &[1, 0]);
        assert!((tour.length(&pair) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_nn_tie_break_is_lowest_index() {
        // Nodes 1 and 2 are equidistant from node 0; the scan must pick 1.
        let g = Graph::new(vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 1.0, 0.0),
            Point::new(2, -1.0, 0.0),
            Point::new(3, 5.0, 0.0),
        ]);
        let tour = nearest_neighbor(&g, 0);
        assert_eq!(tour.route()[1], 1);
    }

    #[test]
    fn test_nn_starts_where_asked() {
        let g = random_graph(12, 11);
        for start in [0, 5, 11] {
            assert_eq!(nearest_neighbor(&g, start).route()[0], start);
        }
    }
}
