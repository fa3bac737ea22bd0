//! Find [strongly connected components] in a directed graph.
//!
//! The components are found by the [Kosaraju's
//! algorithm](https://en.wikipedia.org/wiki/Kosaraju%27s_algorithm), an
//! iterative algorithm with two passes: one DFS pass on the graph collecting
//! the sequence of closed vertices and one DFS pass on the transposed graph
//! traversing the graph in the reversed order of vertices collected in the
//! first pass.
//!
//! The components are reported in the order they are discovered by the second
//! pass. This order is a topological order of the condensation of the graph:
//! if there is an edge from a vertex in one component to a vertex in another,
//! the former component comes first.
//!
//! [strongly connected components]:
//!     https://en.wikipedia.org/wiki/Strongly_connected_component
//!
//! # Examples
//!
//! ```
//! use toposcc::{algo::StronglyConnectedComponents, core::{DirectedGraph, Either}};
//!
//! let mut graph = DirectedGraph::new();
//!
//! graph.add_edges("a", ["b"]);
//! graph.add_edges("b", ["c"]);
//! graph.add_edges("c", ["a", "d"]);
//!
//! let components = StronglyConnectedComponents::on(&graph).run();
//!
//! assert_eq!(components.len(), 2);
//! assert_eq!(
//!     components.iter().collect::<Vec<_>>(),
//!     vec![Either::Component(vec![&"a", &"c", &"b"]), Either::Singleton(&"d")]
//! );
//! ```

use crate::core::{DirectedGraph, Either, VertexIndex};

mod builder;
pub(crate) mod kosaraju;

pub use builder::StronglyConnectedComponentsBuilder;

/// Strongly connected components of a directed graph.
///
/// See [module](self) documentation for more details and example.
#[derive(Debug)]
pub struct StronglyConnectedComponents<'a, V> {
    graph: &'a DirectedGraph<V>,
    components: Vec<Vec<VertexIndex>>,
}

impl<'a, V> StronglyConnectedComponents<'a, V> {
    /// Returns the number of components.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns an iterator of the components, single-vertex components being
    /// [singletons](Either::Singleton).
    pub fn iter(&self) -> impl Iterator<Item = Either<&'a V>> + '_ {
        let graph = self.graph;
        self.components.iter().map(move |component| {
            Either::from_component(component.iter().map(|index| graph.vertex_at(*index)).collect())
        })
    }

    /// Returns the indices of the vertices of each component.
    pub fn indices(&self) -> impl Iterator<Item = &[VertexIndex]> {
        self.components.iter().map(Vec::as_slice)
    }

    /// Returns the components as [`Vec`].
    pub fn into_vec(self) -> Vec<Either<V>>
    where
        V: Clone,
    {
        self.iter().map(Either::cloned).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;

    use crate::infra::proptest::graph_directed;

    fn reachable(graph: &DirectedGraph<u32>, from: u32, within: &BTreeSet<u32>) -> BTreeSet<u32> {
        let mut reached = BTreeSet::from([from]);
        let mut stack = vec![from];

        while let Some(vertex) = stack.pop() {
            for next in graph.adjacent_vertices_of(&vertex).unwrap() {
                if within.contains(next) && reached.insert(*next) {
                    stack.push(*next);
                }
            }
        }

        reached
    }

    fn assert_valid(components: StronglyConnectedComponents<'_, u32>, graph: &DirectedGraph<u32>) {
        let components = components
            .iter()
            .map(|component| component.iter().copied().copied().collect::<BTreeSet<_>>())
            .collect::<Vec<_>>();

        assert_eq!(
            components.iter().map(BTreeSet::len).sum::<usize>(),
            graph.vertex_count(),
            "a vertex is in more than one component"
        );
        assert_eq!(
            components.iter().flatten().copied().collect::<BTreeSet<_>>(),
            graph.vertices().copied().collect::<BTreeSet<_>>(),
            "vertices of components are not corresponding to graph vertices"
        );

        for component in components.iter() {
            assert_ne!(component.len(), 0, "component is empty");

            for &vertex in component {
                assert_eq!(
                    &reachable(graph, vertex, component),
                    component,
                    "component is actually not strongly connected"
                );
            }
        }

        // Edges between components never go back in the sequence, which also
        // makes the components maximal.
        let position = |vertex: &u32| {
            components
                .iter()
                .position(|component| component.contains(vertex))
                .unwrap()
        };

        for (from, adjacent) in graph.iter() {
            for to in adjacent {
                assert!(
                    position(from) <= position(to),
                    "components not in topological order for {from} -> {to}"
                );
            }
        }
    }

    fn create_strongly_connected_graph() -> DirectedGraph<u32> {
        let mut graph = DirectedGraph::new();

        graph.add_edges(0, [1]);
        graph.add_edges(1, [2]);
        graph.add_edges(2, [0]);

        graph
    }

    fn create_strongly_disconnected_graph() -> DirectedGraph<u32> {
        let mut graph = DirectedGraph::new();

        graph.add_edges(0, [1]);
        graph.add_edges(1, [2]);
        graph.add_edges(2, [0, 3]);
        graph.add_edges(3, [4]);
        graph.add_edges(4, [3]);
        graph.add_vertex(5);

        graph
    }

    #[test]
    fn kosaraju_empty() {
        let graph = DirectedGraph::new();
        let components = StronglyConnectedComponents::on(&graph).run();

        assert_eq!(components.len(), 0);
        assert_valid(components, &graph);
    }

    #[test]
    fn kosaraju_connected() {
        let graph = create_strongly_connected_graph();
        let components = StronglyConnectedComponents::on(&graph).run();

        assert_eq!(components.len(), 1);
        assert_valid(components, &graph);
    }

    #[test]
    fn kosaraju_disconnected() {
        let graph = create_strongly_disconnected_graph();
        let components = StronglyConnectedComponents::on(&graph).run();

        assert_eq!(components.len(), 3);
        assert_valid(components, &graph);
    }

    #[test]
    fn kosaraju_discovery_order() {
        let graph = create_strongly_disconnected_graph();
        let components = StronglyConnectedComponents::on(&graph).run().into_vec();

        // First pass closes 4, 3, 2, 1, 0 and 5. The second pass starts from 5,
        // then 0 (reaching 2 and 1 backwards), then 3 (reaching 4).
        assert_eq!(
            components,
            vec![
                Either::Singleton(5),
                Either::Component(vec![0, 2, 1]),
                Either::Component(vec![3, 4]),
            ]
        );
    }

    #[test]
    fn kosaraju_self_loop_is_singleton() {
        let mut graph = DirectedGraph::new();
        graph.add_edges(1u32, [1, 2]);
        graph.add_edges(2, [2]);

        let components = StronglyConnectedComponents::on(&graph).run().into_vec();

        assert_eq!(components, vec![Either::Singleton(1), Either::Singleton(2)]);
    }

    #[test]
    fn kosaraju_indices() {
        let graph = create_strongly_connected_graph();
        let components = StronglyConnectedComponents::on(&graph).run();

        let indices = components
            .indices()
            .map(|component| component.iter().map(|index| index.as_usize()).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        assert_eq!(indices, vec![vec![0, 2, 1]]);
    }

    proptest! {
        #[test]
        #[ignore = "run property-based tests with `cargo test proptest_ -- --ignored`"]
        fn proptest_connected_components_kosaraju(graph in graph_directed().allow_loops()) {
            let components = StronglyConnectedComponents::on(&graph).run();
            assert_valid(components, &graph);
        }
    }
}
