use crate::core::DirectedGraph;

use super::{kosaraju::kosaraju, StronglyConnectedComponents};

pub struct StronglyConnectedComponentsBuilder<'a, V> {
    graph: &'a DirectedGraph<V>,
}

impl<V> StronglyConnectedComponents<'_, V> {
    /// Starts configuring the algorithm on given graph.
    pub fn on(graph: &DirectedGraph<V>) -> StronglyConnectedComponentsBuilder<'_, V> {
        StronglyConnectedComponentsBuilder { graph }
    }
}

impl<'a, V> StronglyConnectedComponentsBuilder<'a, V> {
    /// Runs the Kosaraju's algorithm.
    pub fn run(self) -> StronglyConnectedComponents<'a, V> {
        StronglyConnectedComponents {
            graph: self.graph,
            components: kosaraju(self.graph),
        }
    }
}
