use std::hash::Hash;

use fixedbitset::FixedBitSet;
use thiserror::Error;

use crate::{
    adapt::Transpose,
    algo::{Outcome, Solution},
    core::{DirectedGraph, Either, Neighbors, VertexIndex},
};

pub fn create_path(vertex_count: u32) -> DirectedGraph<u32> {
    let mut graph = DirectedGraph::with_capacity(vertex_count as usize);

    for v in 0..vertex_count {
        if v + 1 < vertex_count {
            graph.add_edges(v, [v + 1]);
        } else {
            graph.add_vertex(v);
        }
    }

    graph
}

pub fn create_cycle(vertex_count: u32) -> DirectedGraph<u32> {
    let mut graph = create_path(vertex_count);

    if vertex_count > 0 {
        graph.add_edges(vertex_count - 1, [0]);
    }

    graph
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolutionCheckError {
    #[error("solution contains a vertex which is not in the graph")]
    VertexUnknown,
    #[error("vertex #{0} (zero-based) is in more than one element")]
    VertexDuplicated(usize),
    #[error("vertex #{0} (zero-based) is not in any element")]
    VertexMissing(usize),
    #[error("element #{0} is a component with less than two vertices")]
    ComponentTooSmall(usize),
    #[error("element #{0} is a component in an acyclic solution")]
    AcyclicComponent(usize),
    #[error("element #{0} is not strongly connected")]
    NotStronglyConnected(usize),
    #[error("edge from element #{0} goes back to element #{1}")]
    BackwardEdge(usize, usize),
    #[error("acyclic solution for graph with a self-loop on element #{0}")]
    AcyclicSelfLoop(usize),
    #[error("cyclic solution for graph without a cycle")]
    NoCycle,
}

// Checks that the solution partitions the vertices of the graph, that every
// element is strongly connected and that edges between elements only go
// forward in the sequence. The last condition makes the elements maximal,
// because two elements reachable from each other would need an edge going
// back.
pub fn check_solution<V>(
    graph: &DirectedGraph<V>,
    solution: &Solution<V>,
) -> Result<(), SolutionCheckError>
where
    V: Eq + Hash,
{
    let mut position = vec![None; graph.vertex_count()];

    for (i, item) in solution.iter().enumerate() {
        if let Either::Component(vertices) = item {
            if vertices.len() < 2 {
                return Err(SolutionCheckError::ComponentTooSmall(i));
            }

            if solution.outcome() == Outcome::Acyclic {
                return Err(SolutionCheckError::AcyclicComponent(i));
            }
        }

        for vertex in item.iter() {
            let index = graph
                .index_of(vertex)
                .ok_or(SolutionCheckError::VertexUnknown)?;

            if position[index.as_usize()].replace(i).is_some() {
                return Err(SolutionCheckError::VertexDuplicated(index.as_usize()));
            }
        }
    }

    let position = position
        .into_iter()
        .enumerate()
        .map(|(v, i)| i.ok_or(SolutionCheckError::VertexMissing(v)))
        .collect::<Result<Vec<_>, _>>()?;

    let mut has_cycle = false;

    for from in (0..graph.vertex_bound()).map(VertexIndex::from) {
        for to in graph.neighbors(from) {
            let i = position[from.as_usize()];
            let j = position[to.as_usize()];

            if i > j {
                return Err(SolutionCheckError::BackwardEdge(i, j));
            }

            if i == j {
                if solution.outcome() == Outcome::Acyclic {
                    return Err(SolutionCheckError::AcyclicSelfLoop(i));
                }

                has_cycle = true;
            }
        }
    }

    if solution.outcome() == Outcome::Cyclic && !has_cycle {
        return Err(SolutionCheckError::NoCycle);
    }

    let transposed = Transpose::new(graph);

    for (i, item) in solution.iter().enumerate() {
        if item.is_singleton() {
            continue;
        }

        let root = item
            .iter()
            .next()
            .and_then(|vertex| graph.index_of(vertex))
            .ok_or(SolutionCheckError::VertexUnknown)?;

        // Strongly connected if the root reaches every vertex of the element
        // and every vertex reaches the root.
        if reached_within(graph, root, &position) != item.len()
            || reached_within(&transposed, root, &position) != item.len()
        {
            return Err(SolutionCheckError::NotStronglyConnected(i));
        }
    }

    Ok(())
}

fn reached_within<G: Neighbors>(graph: &G, root: VertexIndex, position: &[usize]) -> usize {
    let element = position[root.as_usize()];
    let mut visited = FixedBitSet::with_capacity(graph.vertex_bound());
    let mut stack = vec![root];
    visited.insert(root.as_usize());

    while let Some(vertex) = stack.pop() {
        for next in graph.neighbors(vertex) {
            if position[next.as_usize()] == element && !visited.put(next.as_usize()) {
                stack.push(*next);
            }
        }
    }

    visited.count_ones(..)
}
