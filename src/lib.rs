//! TSP Solver Library
//!
//! An approximate solver for the symmetric Euclidean Traveling Salesman
//! Problem, aimed at workloads that need good route orderings fast rather
//! than provable optimality.
//!
//! # Features
//!
//! - Complete-graph model with a precomputed pairwise distance matrix
//! - Nearest-Neighbor greedy tour construction
//! - 2-opt local search refinement (best-improvement per pass)
//! - Point-list parsing, ID re-indexing and CSV route output
//!
//! # Example
//!
//! ```
//! use tsp_solver::graph::{Graph, Point};
//! use tsp_solver::solver;
//!
//! let graph = Graph::new(vec![
//!     Point::new(0, 0.0, 0.0),
//!     Point::new(1, 1.0, 0.0),
//!     Point::new(2, 1.0, 1.0),
//!     Point::new(3, 0.0, 1.0),
//! ]);
//!
//! let initial = solver::nearest_neighbor(&graph, 0);
//! let refined = solver::two_opt(&graph, &initial);
//!
//! assert!(refined.length(&graph) <= initial.length(&graph));
//! ```

pub mod graph;
pub mod io;
pub mod solver;
pub mod timing;
pub mod tour;

pub use graph::{Graph, Point};
pub use tour::Tour;
