//! Random graphs for test files.

use std::io::{self, Write};

use fastrand::Rng;
use toposcc::DirectedGraph;

use crate::format;

/// Generator of random graphs with vertices `1..=n`.
///
/// Every vertex gets a small number of adjacent vertices, growing
/// logarithmically with `n`, which makes sparse graphs that are still likely to
/// have cycles.
#[derive(Debug, Clone)]
pub struct RandomGraphGenerator {
    vertex_count: u32,
    max_quantity: u32,
    probability: f64,
}

impl RandomGraphGenerator {
    pub fn new(vertex_count: u32) -> Self {
        let log2 = (vertex_count as f64).log2();

        let mut max_quantity = (log2 as u32).max(1);
        if max_quantity == 1 && vertex_count > 1 {
            max_quantity = 2;
        }

        Self {
            vertex_count,
            max_quantity,
            probability: 2.0 / log2,
        }
    }

    pub fn generate(&self, rng: &mut Rng) -> DirectedGraph<u32> {
        let mut graph = DirectedGraph::with_capacity(self.vertex_count as usize);

        for vertex in 1..=self.vertex_count {
            graph.add_vertex(vertex);
        }

        // Destinations are drawn from a shuffled pool of all vertices which is
        // refilled only when exhausted.
        let mut pool = Vec::new();

        for vertex in 1..=self.vertex_count {
            let destinations = self.destinations(vertex, &mut pool, rng);
            graph.add_edges(vertex, destinations);
        }

        graph
    }

    fn destinations(&self, vertex: u32, pool: &mut Vec<u32>, rng: &mut Rng) -> Vec<u32> {
        let divisor = if rng.f64() < self.probability { 1 } else { 2 };
        let quantity = rng.u32(0..self.max_quantity) / divisor;

        let mut destinations = Vec::with_capacity(quantity as usize);

        for _ in 0..quantity {
            if pool.is_empty() {
                pool.extend(1..=self.vertex_count);
                rng.shuffle(pool);
            }

            // A draw of the vertex itself is spent without an edge.
            match pool.pop() {
                Some(destination) if destination != vertex => destinations.push(destination),
                _ => {}
            }
        }

        destinations
    }
}

/// Creator of a test file with `cases` random graphs of `vertices` vertices
/// each.
#[derive(Debug, Clone, Copy)]
pub struct RandomTestCreator {
    cases: usize,
    vertices: u32,
}

impl RandomTestCreator {
    pub fn new(cases: usize, vertices: u32) -> Self {
        Self { cases, vertices }
    }

    pub fn write<W: Write>(&self, writer: &mut W, rng: &mut Rng) -> io::Result<()> {
        let generator = RandomGraphGenerator::new(self.vertices);

        for _ in 0..self.cases {
            format::write(writer, &generator.generate(rng))?;
        }

        Ok(())
    }
}

/// Graph sizes of the big test: 1 to 9, 10 to 90, 100 to 900 and 1000 to
/// 9000.
pub fn big_test_sizes() -> impl Iterator<Item = u32> {
    [1, 10, 100, 1000]
        .into_iter()
        .flat_map(|magnitude| (1..10).map(move |i| i * magnitude))
}

/// Writes one random graph for every size in [`big_test_sizes`].
pub fn write_big_test<W: Write>(writer: &mut W, rng: &mut Rng) -> io::Result<()> {
    for size in big_test_sizes() {
        format::write(writer, &RandomGraphGenerator::new(size).generate(rng))?;
    }

    Ok(())
}
