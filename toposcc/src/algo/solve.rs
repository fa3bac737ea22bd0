//! Decide whether a directed graph is acyclic and describe it accordingly.
//!
//! The [topological sort](super::toposort) is tried first. If it succeeds,
//! the solution is the topological order with every vertex as a
//! [singleton](Either::Singleton). If it finds a cycle, whatever it has
//! collected is thrown away and the graph is decomposed into [strongly
//! connected components](super::connected_components) instead.
//!
//! Both algorithms are linear in the size of the graph and deterministic, so
//! solving the same graph twice gives the same solution.
//!
//! # Examples
//!
//! ```
//! use toposcc::{algo::{solve, Outcome}, core::{DirectedGraph, Either}};
//!
//! let mut graph = DirectedGraph::new();
//!
//! graph.add_edges(1, [2]);
//! graph.add_edges(2, [3]);
//! graph.add_edges(3, [1, 4]);
//!
//! let solution = solve(&graph);
//!
//! assert_eq!(solution.outcome(), Outcome::Cyclic);
//! assert_eq!(
//!     solution.as_slice(),
//!     &[Either::Component(vec![1, 3, 2]), Either::Singleton(4)]
//! );
//! assert_eq!(solution.to_string(), "[[1, 3, 2], 4]");
//! ```

use std::{fmt, slice, vec};

use crate::core::{DirectedGraph, Either};

use super::{connected_components::kosaraju::kosaraju, toposort::dfs::dfs};

/// Which of the algorithms produced a [`Solution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The graph has no cycle, the solution is its topological order.
    Acyclic,
    /// The graph has a cycle, the solution lists its strongly connected
    /// components.
    ///
    /// A self-loop is a cycle, too, even though its vertex forms a component
    /// of its own.
    Cyclic,
}

/// Result of [`solve`].
///
/// For an [acyclic](Outcome::Acyclic) graph, it contains exactly one
/// singleton for every vertex, in topological order. For a
/// [cyclic](Outcome::Cyclic) graph, it contains one element for every
/// strongly connected component, in the order the components were discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution<V> {
    items: Vec<Either<V>>,
    outcome: Outcome,
}

impl<V> Solution<V> {
    pub(crate) fn new(items: Vec<Either<V>>, outcome: Outcome) -> Self {
        Self { items, outcome }
    }

    /// Returns which algorithm produced the solution.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns `true` if the solution is a topological order.
    pub fn is_acyclic(&self) -> bool {
        self.outcome == Outcome::Acyclic
    }

    /// Returns `true` if the solution lists strongly connected components.
    pub fn is_cyclic(&self) -> bool {
        self.outcome == Outcome::Cyclic
    }

    /// Returns the number of elements, not vertices.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the solved graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns an iterator over the elements in order.
    pub fn iter(&self) -> slice::Iter<'_, Either<V>> {
        self.items.iter()
    }

    /// Returns the elements as a slice.
    pub fn as_slice(&self) -> &[Either<V>] {
        &self.items
    }

    /// Consumes the solution, returning its elements.
    pub fn into_vec(self) -> Vec<Either<V>> {
        self.items
    }
}

impl<V> IntoIterator for Solution<V> {
    type Item = Either<V>;
    type IntoIter = vec::IntoIter<Either<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a Solution<V> {
    type Item = &'a Either<V>;
    type IntoIter = slice::Iter<'a, Either<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Display> fmt::Display for Solution<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(item, f)?;
        }
        f.write_str("]")
    }
}

/// Topological sort with a fallback to strongly connected components.
///
/// See [module](self) documentation for more details and example.
pub struct Solve<'a, V> {
    graph: &'a DirectedGraph<V>,
}

impl<V> Solve<'_, V> {
    /// Starts configuring the algorithm on given graph.
    pub fn on(graph: &DirectedGraph<V>) -> Solve<'_, V> {
        Solve { graph }
    }

    /// Runs the algorithm.
    pub fn run(self) -> Solution<V>
    where
        V: Clone,
    {
        let graph = self.graph;

        match dfs(graph) {
            Ok(order) => Solution::new(
                order
                    .into_iter()
                    .map(|index| Either::Singleton(graph.vertex_at(index).clone()))
                    .collect(),
                Outcome::Acyclic,
            ),
            Err(_) => Solution::new(
                kosaraju(graph)
                    .into_iter()
                    .map(|component| {
                        Either::from_component(
                            component
                                .into_iter()
                                .map(|index| graph.vertex_at(index).clone())
                                .collect(),
                        )
                    })
                    .collect(),
                Outcome::Cyclic,
            ),
        }
    }
}

/// Shorthand for `Solve::on(graph).run()`.
pub fn solve<V: Clone>(graph: &DirectedGraph<V>) -> Solution<V> {
    Solve::on(graph).run()
}
