//! Find a [topologically sorted] sequence of vertices on a [directed acyclic
//! graph] (DAG).
//!
//! The algorithm is a variation on the [depth-first
//! search](https://en.wikipedia.org/wiki/Depth-first_search) traversal: every
//! vertex is prepended to the result at the moment all its successors are
//! explored. Reaching a vertex that is still being explored means a cycle, in
//! which case the whole sort fails.
//!
//! Roots of the traversal are taken in the insertion order of the graph, and
//! successors in their adjacency order, so the result is deterministic.
//!
//! [topologically sorted]: https://en.wikipedia.org/wiki/Topological_sorting
//! [directed acyclic graph]:
//!     https://en.wikipedia.org/wiki/Directed_acyclic_graph
//!
//! # Examples
//!
//! ```
//! use toposcc::{algo::TopoSort, core::DirectedGraph};
//!
//! let mut dependency_tree = DirectedGraph::new();
//!
//! // Edge direction in "must be compiled before" relation.
//! dependency_tree.add_edges("serde", ["cargo_credential", "serde_json", "time"]);
//! dependency_tree.add_edges("serde_json", ["cargo_credential"]);
//! dependency_tree.add_edges("time", ["cargo_credential"]);
//! dependency_tree.add_edges("libc", ["time", "cargo_util"]);
//! dependency_tree.add_edges("cargo_credential", ["cargo"]);
//! dependency_tree.add_edges("cargo_util", ["cargo"]);
//!
//! let order = TopoSort::on(&dependency_tree).run().unwrap();
//!
//! for package in order.iter() {
//!     // Compile package
//! }
//! ```

use thiserror::Error;

use crate::core::{DirectedGraph, VertexIndex};

mod builder;
pub(crate) mod dfs;

pub use builder::TopoSortBuilder;

/// Topologically sorted sequence of all vertices of a directed acyclic graph.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug)]
pub struct TopoSort<'a, V> {
    graph: &'a DirectedGraph<V>,
    order: Vec<VertexIndex>,
}

impl<'a, V> TopoSort<'a, V> {
    /// Returns the number of vertices.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns an iterator over the sorted vertices.
    pub fn iter(&self) -> impl Iterator<Item = &'a V> + '_ {
        let graph = self.graph;
        self.order.iter().map(move |index| graph.vertex_at(*index))
    }

    /// Returns the indices of the sorted vertices.
    pub fn indices(&self) -> &[VertexIndex] {
        &self.order
    }

    /// Returns the sorted vertices as [`Vec`].
    pub fn into_vec(self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().cloned().collect()
    }
}

/// The error encountered during a [`TopoSort`] run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error<V> {
    /// The graph contains a cycle.
    ///
    /// Graphs with cycles don't have a topological order. The edge is the back
    /// edge through which the cycle was discovered; for a self-loop, `from`
    /// and `to` are the same vertex.
    #[error("graph contains cycle")]
    Cycle { from: V, to: V },
}
