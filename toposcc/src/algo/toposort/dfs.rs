use crate::{
    core::{Neighbors, VertexIndex},
    visit::{DfsEvent, DfsEvents, Visitor},
};

/// An edge closing a cycle, found as a back edge of the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BackEdge {
    pub from: VertexIndex,
    pub to: VertexIndex,
}

// Classic DFS algorithm for topological sorting. Vertices are collected when
// they are being closed and the sequence is reversed at the end, which is the
// same as prepending each closed vertex. The first back edge aborts the whole
// sort, nothing collected until then is reported.
pub(crate) fn dfs<G>(graph: &G) -> Result<Vec<VertexIndex>, BackEdge>
where
    G: Neighbors,
{
    let mut traversal = DfsEvents::new(graph);
    let mut sorted = Vec::with_capacity(graph.vertex_bound());

    for event in traversal.start_all().iter(graph) {
        match event {
            DfsEvent::Open(_) => {}
            DfsEvent::BackEdge { from, to } => return Err(BackEdge { from, to }),
            DfsEvent::Close(vertex) => sorted.push(vertex),
        }
    }

    sorted.reverse();
    Ok(sorted)
}
