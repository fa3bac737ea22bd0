use std::hash::Hash;

use crate::core::{DirectedGraph, Neighbors, VertexIndex};

/// The graph with all edges reversed.
///
/// Only the reversed adjacency is materialized, the vertices are borrowed
/// from the original graph and keep their indices. For every vertex, its
/// predecessors are listed in the order of the original graph's iteration,
/// that is, by the insertion order of the predecessor first and by its
/// adjacency order second.
#[derive(Debug)]
pub struct Transpose<'a, V> {
    graph: &'a DirectedGraph<V>,
    adjacency: Vec<Vec<VertexIndex>>,
}

impl<'a, V> Transpose<'a, V> {
    pub fn new(graph: &'a DirectedGraph<V>) -> Self {
        let mut adjacency = vec![Vec::new(); graph.vertex_bound()];

        for from in (0..graph.vertex_bound()).map(VertexIndex::from) {
            for to in graph.neighbors(from) {
                adjacency[to.as_usize()].push(from);
            }
        }

        Self { graph, adjacency }
    }

    /// Returns the original graph.
    pub fn into_inner(self) -> &'a DirectedGraph<V> {
        self.graph
    }

    /// Materializes the transposed graph as a standalone graph.
    pub fn apply(self) -> DirectedGraph<V>
    where
        V: Eq + Hash + Clone,
    {
        let mut transposed = DirectedGraph::with_capacity(self.graph.vertex_count());

        // Every vertex is added up front, even those without incoming edges in
        // the original graph, so that the indices stay the same.
        for vertex in self.graph.vertices() {
            transposed.add_vertex(vertex.clone());
        }

        for (from, adjacency) in self.adjacency.iter().enumerate() {
            for to in adjacency {
                transposed.add_edge_by_index(VertexIndex::from(from), *to);
            }
        }

        transposed
    }
}

impl<V> Neighbors for Transpose<'_, V> {
    fn vertex_bound(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, from: VertexIndex) -> &[VertexIndex] {
        &self.adjacency[from.as_usize()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_neighbors() {
        let mut graph = DirectedGraph::new();
        graph.add_edges(1u32, [2, 3]);
        graph.add_edges(3, [2, 1]);
        graph.add_vertex(4);

        let transpose = Transpose::new(&graph);
        let neighbors = |vertex: u32| {
            transpose
                .neighbors(graph.index_of(&vertex).unwrap())
                .iter()
                .map(|index| *graph.vertex(*index).unwrap())
                .collect::<Vec<_>>()
        };

        assert_eq!(transpose.vertex_bound(), 4);
        assert_eq!(neighbors(1), vec![3]);
        assert_eq!(neighbors(2), vec![1, 3]);
        assert_eq!(neighbors(3), vec![1]);
        assert_eq!(neighbors(4), Vec::<u32>::new());
    }
}
