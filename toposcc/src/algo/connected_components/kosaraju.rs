use crate::{
    adapt::Transpose,
    core::{DirectedGraph, VertexIndex},
    visit::{finish_order, DfsEvent, DfsEvents, Visitor},
};

pub(crate) fn kosaraju<V>(graph: &DirectedGraph<V>) -> Vec<Vec<VertexIndex>> {
    // First pass: the order in which vertices are closed, no cycle checking.
    let finished = finish_order(graph);

    let transposed = Transpose::new(graph);
    let mut traversal = DfsEvents::new(&transposed);

    let mut components = Vec::new();

    // Second pass: the last closed vertex first. Everything reachable from it
    // in the transposed graph that was not claimed yet forms its component.
    for root in finished.into_iter().rev() {
        if !traversal.colors().is_unvisited(root) {
            continue;
        }

        let mut component = Vec::new();

        for event in traversal.start(root).iter(&transposed) {
            if let DfsEvent::Close(vertex) = event {
                component.push(vertex);
            }
        }

        // Vertices are listed as if each was prepended when closed.
        component.reverse();
        components.push(component);
    }

    components
}
