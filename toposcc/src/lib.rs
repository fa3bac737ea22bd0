//! Topological sorting of directed graphs with a fallback to strongly
//! connected components.
//!
//! A [`DirectedGraph`] is built with [`add_vertex`](DirectedGraph::add_vertex)
//! and [`add_edges`](DirectedGraph::add_edges) and then passed to [`solve`].
//! If the graph is acyclic, the [`Solution`] is its topological order.
//! Otherwise it is the sequence of its strongly connected components.
//!
//! ```
//! use toposcc::{solve, DirectedGraph};
//!
//! let mut graph = DirectedGraph::new();
//!
//! graph.add_edges(1, [2]);
//! graph.add_edges(2, [3]);
//!
//! assert_eq!(solve(&graph).to_string(), "[1, 2, 3]");
//!
//! graph.add_edges(3, [2]);
//!
//! assert_eq!(solve(&graph).to_string(), "[1, [2, 3]]");
//! ```
//!
//! The algorithms are available on their own in [`algo`].

pub mod adapt;
pub mod algo;
pub mod core;
pub mod infra;
pub mod visit;

pub use crate::{
    algo::{solve, Outcome, Solution},
    core::{DirectedGraph, Either},
};

pub mod prelude {
    #[doc(hidden)]
    pub use crate::visit::Visitor;
}
