use proptest::{
    prelude::Rng,
    strategy::{NewTree, Strategy, ValueTree},
    test_runner::TestRunner,
};
use rustc_hash::FxHashSet;

use crate::core::DirectedGraph;

pub fn graph_directed() -> GraphStrategy {
    GraphStrategy::new()
}

/// Strategy for directed graphs over `u32` vertices.
///
/// Vertices are `0..n` inserted in a random order, so that the insertion
/// order of the graph has nothing to do with the numeric order.
#[derive(Debug, Clone, Default)]
pub struct GraphStrategy {
    params: StrategyParams,
}

macro_rules! delegate_builder_fn {
    ($name:ident$(, $param:ident: $param_type:ty)*) => {
        #[doc = concat!("See [StrategyParams::", stringify!($name), "](StrategyParams::", stringify!($name), ") for details.")]
        pub fn $name(self, $($param: $param_type),*) -> Self {
            Self {
                params: self.params.$name($($param,)*),
            }
        }
    }
}

impl GraphStrategy {
    pub fn new() -> Self {
        Self::with_params(StrategyParams::default())
    }

    pub fn with_params(params: StrategyParams) -> Self {
        Self { params }
    }

    delegate_builder_fn!(max_size, max_size: usize);
    delegate_builder_fn!(acyclic);
    delegate_builder_fn!(allow_loops);
    delegate_builder_fn!(density, density: f32);
    delegate_builder_fn!(sparse);
}

#[derive(Debug, Clone)]
pub struct StrategyParams {
    max_size: usize,
    acyclic: bool,
    allow_loops: bool,
    // Upper bound of the edge probability, in (0, 1].
    density: f32,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            max_size: 256,
            acyclic: false,
            allow_loops: false,
            density: 1.0,
        }
    }
}

impl StrategyParams {
    /// Maximum number of vertices.
    pub fn max_size(self, max_size: usize) -> Self {
        Self { max_size, ..self }
    }

    /// Only edges from a smaller to a greater vertex are generated, which
    /// excludes loops as well.
    pub fn acyclic(self) -> Self {
        Self {
            acyclic: true,
            ..self
        }
    }

    pub fn allow_loops(self) -> Self {
        Self {
            allow_loops: true,
            ..self
        }
    }

    /// The edge probability of a generated graph is chosen uniformly from `[0,
    /// density)`.
    pub fn density(self, density: f32) -> Self {
        assert!(
            density > 0.0 && density <= 1.0,
            "density must be in (0, 1] range"
        );
        Self { density, ..self }
    }

    pub fn sparse(self) -> Self {
        self.density(0.05)
    }
}

impl Strategy for GraphStrategy {
    type Tree = GraphValueTree;
    type Value = DirectedGraph<u32>;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        let n = runner.rng().gen_range(0..=self.params.max_size);
        let p = runner.rng().gen::<f32>() * self.params.density;

        let mut order = (0..n as u32).collect::<Vec<_>>();

        // Fisher-Yates.
        for i in (1..n).rev() {
            let j = runner.rng().gen_range(0..=i);
            order.swap(i, j);
        }

        // Geometric skipping over the pairs (w, v) with w < v (or w <= v when
        // loops are allowed), see "Efficient generation of large random
        // networks" by Batagelj and Brandes.
        let loops = self.params.allow_loops && !self.params.acyclic;
        let mut edges = Vec::new();

        let mut v = 1;
        let mut w = usize::MAX;

        while v < n {
            let r: f32 = runner.rng().gen();
            w = w.wrapping_add(1) + ((1.0 - r).log10() / (1.0 - p).log10()).floor() as usize;

            while v < n && (w > v || (w == v && !loops)) {
                w -= v;
                v += 1;
            }

            if v < n {
                let edge = if self.params.acyclic || runner.rng().gen_bool(0.5) {
                    (w, v)
                } else {
                    (v, w)
                };

                edges.push(edge);
            }
        }

        Ok(GraphValueTree {
            order,
            edges,
            removed: Removed::default(),
            previous: None,
            step: Some(ShrinkStep::LowestDegree),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShrinkStep {
    // All vertices with the lowest degree at once.
    LowestDegree,
    Vertex(usize),
    Edge(usize),
}

#[derive(Debug, Clone, Default)]
struct Removed {
    vertices: FxHashSet<usize>,
    edges: FxHashSet<usize>,
}

/// Shrinks by removing whole groups of lowest-degree vertices while the test
/// keeps failing, then single vertices, then single edges.
#[derive(Debug, Clone)]
pub struct GraphValueTree {
    // Vertex `v` is the value `v as u32`.
    order: Vec<u32>,
    edges: Vec<(usize, usize)>,
    removed: Removed,
    // State before the last simplification, restored by `complicate`.
    previous: Option<Removed>,
    step: Option<ShrinkStep>,
}

impl GraphValueTree {
    fn vertex_exists(&self, v: usize) -> bool {
        !self.removed.vertices.contains(&v)
    }

    fn edge_exists(&self, e: usize) -> bool {
        let (src, dst) = self.edges[e];
        !self.removed.edges.contains(&e) && self.vertex_exists(src) && self.vertex_exists(dst)
    }

    // Degrees over the current graph, `None` for removed vertices.
    fn degrees(&self) -> Vec<Option<usize>> {
        let mut degrees = (0..self.order.len())
            .map(|v| self.vertex_exists(v).then_some(0))
            .collect::<Vec<_>>();

        for e in (0..self.edges.len()).filter(|&e| self.edge_exists(e)) {
            let (src, dst) = self.edges[e];
            for v in [src, dst] {
                if let Some(degree) = degrees[v].as_mut() {
                    *degree += 1;
                }
            }
        }

        degrees
    }

    fn next_step(&self, step: ShrinkStep) -> Option<ShrinkStep> {
        let first_edge = |from: usize| {
            (from..self.edges.len())
                .find(|&e| self.edge_exists(e))
                .map(ShrinkStep::Edge)
        };

        match step {
            ShrinkStep::LowestDegree => (0..self.order.len())
                .find(|&v| self.vertex_exists(v))
                .map(ShrinkStep::Vertex)
                .or_else(|| first_edge(0)),
            ShrinkStep::Vertex(v) => ((v + 1)..self.order.len())
                .find(|&w| self.vertex_exists(w))
                .map(ShrinkStep::Vertex)
                .or_else(|| first_edge(0)),
            ShrinkStep::Edge(e) => first_edge(e + 1),
        }
    }
}

impl ValueTree for GraphValueTree {
    type Value = DirectedGraph<u32>;

    fn current(&self) -> Self::Value {
        let mut graph = DirectedGraph::with_capacity(self.order.len());

        for &vertex in self.order.iter() {
            if self.vertex_exists(vertex as usize) {
                graph.add_vertex(vertex);
            }
        }

        for e in (0..self.edges.len()).filter(|&e| self.edge_exists(e)) {
            let (src, dst) = self.edges[e];
            graph.add_edges(src as u32, [dst as u32]);
        }

        graph
    }

    fn simplify(&mut self) -> bool {
        let step = match self.step {
            Some(step) => step,
            None => return false,
        };

        if self.removed.vertices.len() == self.order.len() {
            return false;
        }

        self.previous = Some(self.removed.clone());

        match step {
            ShrinkStep::LowestDegree => {
                let degrees = self.degrees();
                let lowest = degrees.iter().flatten().min().copied();

                for (v, degree) in degrees.into_iter().enumerate() {
                    if degree.is_some() && degree == lowest {
                        self.removed.vertices.insert(v);
                    }
                }
            }
            ShrinkStep::Vertex(v) => {
                self.step = self.next_step(step);
                self.removed.vertices.insert(v);
            }
            ShrinkStep::Edge(e) => {
                self.step = self.next_step(step);
                self.removed.edges.insert(e);
            }
        }

        true
    }

    fn complicate(&mut self) -> bool {
        self.removed = match self.previous.take() {
            Some(previous) => previous,
            None => return false,
        };

        if self.step == Some(ShrinkStep::LowestDegree) {
            self.step = self.next_step(ShrinkStep::LowestDegree);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use proptest::{strategy::check_strategy_sanity, test_runner::TestRunner};

    use super::*;

    #[test]
    #[ignore = "takes too long, run it only when the strategy is changed"]
    fn graph_strategy_sanity() {
        check_strategy_sanity(graph_directed().max_size(16), None);
    }

    #[test]
    fn acyclic_edges_go_up() {
        let strategy = graph_directed().max_size(64).acyclic();
        let mut runner = TestRunner::deterministic();

        for _ in 0..16 {
            let graph = strategy.new_tree(&mut runner).unwrap().current();

            for (from, adjacent) in graph.iter() {
                for to in adjacent {
                    assert!(from < to, "edge {from} -> {to} may close a cycle");
                }
            }
        }
    }

    #[test]
    fn sparse_has_fewer_edges() {
        let dense = graph_directed().max_size(64).density(1.0);
        let sparse = GraphStrategy::with_params(StrategyParams::default().max_size(64).sparse());

        let mut runner = TestRunner::deterministic();

        let mut edges = |strategy: &GraphStrategy| {
            (0..32)
                .map(|_| strategy.new_tree(&mut runner).unwrap().current().edge_count())
                .sum::<usize>()
        };

        let dense_edges = edges(&dense);
        let sparse_edges = edges(&sparse);

        assert!(
            sparse_edges < dense_edges,
            "sparse {sparse_edges} vs dense {dense_edges}"
        );
    }

    #[test]
    #[should_panic]
    fn density_out_of_range() {
        graph_directed().density(0.0);
    }

    #[test]
    fn simplifies_structure() {
        let strategy = graph_directed().max_size(64);
        let mut runner = TestRunner::deterministic();

        let mut tree = loop {
            let tree = strategy.new_tree(&mut runner).unwrap();
            if tree.current().edge_count() > 0 {
                break tree;
            }
        };

        loop {
            let graph = tree.current();

            if graph.edge_count() < 1 {
                if !tree.complicate() {
                    break;
                }
            } else if !tree.simplify() {
                break;
            }
        }

        let graph = tree.current();

        // No loops => two vertices connected with one edge.
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn rejected_step_is_undone() {
        // 0 -> 1 -> 2 plus isolated 3, in this insertion order.
        let mut tree = GraphValueTree {
            order: vec![0, 1, 2, 3],
            edges: vec![(0, 1), (1, 2)],
            removed: Removed::default(),
            previous: None,
            step: Some(ShrinkStep::LowestDegree),
        };

        // Isolated vertex 3 first.
        assert!(tree.simplify());
        assert_eq!(tree.current().vertex_count(), 3);

        // Then 0 and 2 (degree 1), which leaves no edge.
        assert!(tree.simplify());
        assert_eq!(tree.current().edge_count(), 0);

        // Undoing restores the degrees of 0 and 2 as well, so the next steps
        // see the path again.
        assert!(tree.complicate());
        assert_eq!(tree.current().edge_count(), 2);
        assert_eq!(tree.degrees(), vec![Some(1), Some(2), Some(1), None]);
        assert_eq!(tree.step, Some(ShrinkStep::Vertex(0)));

        assert!(tree.simplify());
        assert_eq!(tree.current().edge_count(), 1);
        assert_eq!(tree.step, Some(ShrinkStep::Vertex(1)));
    }
}
