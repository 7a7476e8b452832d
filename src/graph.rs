//! Geometric model: points and the complete distance graph.
//!
//! A `Graph` owns a set of 2D points and a precomputed matrix of all pairwise
//! Euclidean distances. The O(n²) memory cost buys O(1) distance lookups in
//! the optimization loops, which dominate runtime.

use serde::{Deserialize, Serialize};

/// A 2D point with a stable identifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Caller-assigned identifier, unique within a graph's point set
    pub id: usize,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Point { id, x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }
}

/// A complete graph over a set of points.
///
/// Node indices everywhere in the solver are positions `0..n-1` into the
/// owned point sequence, not the external `Point::id`. The distance matrix
/// is computed once at construction and never mutated.
#[derive(Debug, Clone)]
pub struct Graph {
    points: Vec<Point>,
    /// Flat row-major n*n matrix: distance(i, j) = matrix[i * n + j]
    matrix: Vec<f64>,
}

impl Graph {
    /// Build the complete distance graph from a point set. O(n²) time and space.
    pub fn new(points: Vec<Point>) -> Self {
        let n = points.len();
        let mut matrix = vec![0.0; n * n];

        for i in 0..n {
            for j in i + 1..n {
                let d = points[i].distance_to(&points[j]);
                matrix[i * n + j] = d;
                matrix[j * n + i] = d;
            }
        }

        Graph { points, matrix }
    }

    /// Number of nodes in the graph
    #[inline]
    pub fn size(&self) -> usize {
        self.points.len()
    }

    /// Precomputed distance between node positions `i` and `j`.
    /// Valid for `0 <= i, j < size()`; the caller validates indices.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.matrix[i * self.points.len() + j]
    }

    /// The stored point at position `i`
    #[inline]
    pub fn point(&self, i: usize) -> &Point {
        &self.points[i]
    }

    /// All stored points, in position order
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_calculation() {
        let g = Graph::new(vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 3.0, 4.0),
        ]);

        assert!((g.distance(0, 1) - 5.0).abs() < 1e-10);
        assert!((g.distance(1, 0) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_symmetry_and_zero_diagonal() {
        let g = Graph::new(vec![
            Point::new(0, 0.0, 0.0),
            Point::new(1, 1.0, 2.0),
            Point::new(2, -3.5, 0.25),
            Point::new(3, 7.0, -1.0),
        ]);

        for i in 0..g.size() {
            assert_eq!(g.distance(i, i), 0.0);
            for j in 0..g.size() {
                assert_eq!(g.distance(i, j), g.distance(j, i));
                assert!(g.distance(i, j) >= 0.0);
            }
        }
    }

    #[test]
    fn test_empty_graph() {
        let g = Graph::new(Vec::new());
        assert_eq!(g.size(), 0);
        assert!(g.points().is_empty());
    }

    #[test]
    fn test_point_accessor() {
        let g = Graph::new(vec![Point::new(7, 1.5, -2.5)]);
        assert_eq!(g.size(), 1);
        assert_eq!(g.point(0).id, 7);
        assert_eq!(g.point(0).x, 1.5);
        assert_eq!(g.point(0).y, -2.5);
    }
}
