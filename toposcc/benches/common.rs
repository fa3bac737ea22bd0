#![allow(dead_code)]

use fastrand::Rng;
use petgraph::prelude::*;

pub const RANDOM_SEED: u64 = 0xef6f79ed30ba75a;

pub struct RandomEdges {
    v: usize,
    w: usize,
    n: usize,
    p: f32,
}

impl RandomEdges {
    pub fn new(vertex_bound: usize, p: f32) -> Self {
        Self {
            v: 1,
            w: usize::MAX,
            n: vertex_bound,
            p,
        }
    }

    // Pairs with `v > w`, each at most once.
    pub fn next_edge(&mut self, rng: &mut Rng) -> Option<(usize, usize)> {
        // Based on the implementation in toposcc::infra::proptest.

        let Self { v, w, .. } = self;
        let n = self.n;
        let p = self.p;

        if *v >= n {
            return None;
        }

        let r = rng.f32();
        *w = w.wrapping_add(1) + ((1.0 - r).log10() / (1.0 - p).log10()).floor() as usize;

        while *w >= *v && *v < n {
            *w -= *v;
            *v += 1;
        }

        if *v < n {
            Some((*v, *w))
        } else {
            None
        }
    }
}

// With `cyclic`, half of the edges point from the smaller vertex to the
// greater, otherwise all of them point down and the graph is acyclic.
fn random_edges(
    vertex_count: usize,
    density: f32,
    cyclic: bool,
    rng: &mut Rng,
) -> Vec<(usize, usize)> {
    let mut edges = RandomEdges::new(vertex_count, density);
    let mut collected = Vec::new();

    while let Some((u, v)) = edges.next_edge(rng) {
        if cyclic && rng.bool() {
            collected.push((v, u));
        } else {
            collected.push((u, v));
        }
    }

    collected
}

pub fn toposcc_random(
    vertex_count: usize,
    density: f32,
    cyclic: bool,
    rng: &mut Rng,
) -> toposcc::DirectedGraph<u32> {
    let mut graph = toposcc::DirectedGraph::with_capacity(vertex_count);

    for v in 0..vertex_count {
        graph.add_vertex(v as u32);
    }

    for (u, v) in random_edges(vertex_count, density, cyclic, rng) {
        graph.add_edges(u as u32, [v as u32]);
    }

    graph
}

pub fn petgraph_random(
    vertex_count: usize,
    density: f32,
    cyclic: bool,
    rng: &mut Rng,
) -> petgraph::Graph<u32, (), petgraph::Directed> {
    let mut graph = petgraph::Graph::with_capacity(vertex_count, 0);

    for v in 0..vertex_count {
        graph.add_node(v as u32);
    }

    for (u, v) in random_edges(vertex_count, density, cyclic, rng) {
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
    }

    graph
}
