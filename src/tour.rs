//! Tour representation and manipulation.
//!
//! A `Tour` is a permutation of node positions `0..n-1`, read as a cycle:
//! the last node connects back to the first. Every observable state is a
//! full permutation; the only mutation is segment reversal (the 2-opt move).

use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A candidate TSP tour (cycle) over node positions `0..n-1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tour {
    route: Vec<usize>,
}

impl Tour {
    /// The trivial tour `[0, 1, ..., n-1]`; empty for `n = 0`
    pub fn new(n: usize) -> Self {
        Tour {
            route: (0..n).collect(),
        }
    }

    /// Wrap an existing visiting order
    pub fn from_route(route: Vec<usize>) -> Self {
        Tour { route }
    }

    /// The visiting order
    pub fn route(&self) -> &[usize] {
        &self.route
    }

    /// Mutable access for construction heuristics
    pub fn route_mut(&mut self) -> &mut [usize] {
        &mut self.route
    }

    /// Number of nodes in the tour
    pub fn size(&self) -> usize {
        self.route.len()
    }

    /// Total cycle length: edges between consecutive nodes plus the closing
    /// edge back to the start. Returns 0.0 for fewer than two nodes.
    pub fn length(&self, graph: &Graph) -> f64 {
        let n = self.route.len();
        if n < 2 {
            return 0.0;
        }

        let mut sum = 0.0;
        for i in 0..n - 1 {
            sum += graph.distance(self.route[i], self.route[i + 1]);
        }
        sum + graph.distance(self.route[n - 1], self.route[0])
    }

    /// The fundamental 2-opt move: reverse `route[i..=k]` in place.
    ///
    /// Removing the two edges entering and leaving the segment and
    /// reconnecting them crossed is equivalent to reversing the segment's
    /// internal order. Applying the same reversal twice restores the route.
    pub fn two_opt_swap(&mut self, i: usize, k: usize) {
        self.route[i..=k].reverse();
    }

    /// Check that the route visits every position `0..n-1` exactly once
    pub fn is_permutation(&self) -> bool {
        let n = self.route.len();
        let unique: HashSet<usize> = self.route.iter().cloned().collect();
        unique.len() == n && self.route.iter().all(|&v| v < n)
    }
}
