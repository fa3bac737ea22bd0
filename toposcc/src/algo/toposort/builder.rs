use crate::core::DirectedGraph;

use super::{dfs::dfs, Error, TopoSort};

pub struct TopoSortBuilder<'a, V> {
    graph: &'a DirectedGraph<V>,
}

impl<V> TopoSort<'_, V> {
    /// Starts configuring the algorithm on given graph.
    pub fn on(graph: &DirectedGraph<V>) -> TopoSortBuilder<'_, V> {
        TopoSortBuilder { graph }
    }
}

impl<'a, V> TopoSortBuilder<'a, V> {
    /// Runs the algorithm.
    ///
    /// Fails with [`Error::Cycle`] on the first back edge found.
    pub fn run(self) -> Result<TopoSort<'a, V>, Error<V>>
    where
        V: Clone,
    {
        let graph = self.graph;

        match dfs(graph) {
            Ok(order) => Ok(TopoSort { graph, order }),
            Err(edge) => Err(Error::Cycle {
                from: graph.vertex_at(edge.from).clone(),
                to: graph.vertex_at(edge.to).clone(),
            }),
        }
    }
}
