use std::{fmt, hash::Hash};

use arbitrary::{Arbitrary, Unstructured};

use crate::core::{DirectedGraph, VertexIndex};

#[derive(Debug, Arbitrary, Clone)]
pub enum MutOp<V> {
    AddVertex(V),
    AddEdges(V, Vec<V>),
}

impl<V> MutOp<V>
where
    V: Eq + Hash + Clone,
{
    pub fn apply(self, graph: &mut DirectedGraph<V>) -> VertexIndex {
        match self {
            MutOp::AddVertex(vertex) => graph.add_vertex(vertex),
            MutOp::AddEdges(vertex, destinations) => graph.add_edges(vertex, destinations),
        }
    }
}

pub struct MutOpsSeq<V>(pub Vec<MutOp<V>>);

impl<V> IntoIterator for MutOpsSeq<V> {
    type Item = MutOp<V>;
    type IntoIter = std::vec::IntoIter<MutOp<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<V> MutOpsSeq<V>
where
    V: Eq + Hash + Clone,
{
    pub fn apply(self, graph: &mut DirectedGraph<V>) {
        for op in self {
            op.apply(graph);
        }
    }

    pub fn replay(self, graph: &mut DirectedGraph<V>)
    where
        V: fmt::Debug,
    {
        println!("let mut graph = DirectedGraph::new();");
        println!();

        for op in self {
            match &op {
                MutOp::AddVertex(vertex) => println!("graph.add_vertex({vertex:?});"),
                MutOp::AddEdges(vertex, destinations) => {
                    println!("graph.add_edges({vertex:?}, {destinations:?});")
                }
            }

            op.apply(graph);
        }

        println!();
        println!("check_solution(&graph, &solve(&graph)).unwrap();");
    }
}

impl<V: fmt::Debug> fmt::Debug for MutOpsSeq<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MutOpsSeq(vec![")?;

        for op in self.0.iter() {
            writeln!(f, "    MutOp::{:?},", op)?;
        }

        writeln!(f, "])")?;
        writeln!(f, ".replay(&mut graph);")?;
        writeln!(f)?;
        writeln!(f, "// use `cargo test fuzz_replay_mut_ops_seq`")
    }
}

impl<'a, V> Arbitrary<'a> for MutOpsSeq<V>
where
    V: Arbitrary<'a>,
{
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let total = u.len();
        let mut seq = Vec::new();

        while !u.is_empty() {
            let r = (total - u.len()) as f64 / total as f64;

            let op = match arbitrary_op(u, r) {
                Ok(op) => op,
                Err(_) => break,
            };

            seq.push(op);
        }

        Ok(MutOpsSeq(seq))
    }
}

impl<'a, V> Arbitrary<'a> for DirectedGraph<V>
where
    V: Arbitrary<'a> + Eq + Hash + Clone,
{
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut graph = DirectedGraph::new();
        MutOpsSeq::arbitrary(u)?.apply(&mut graph);
        Ok(graph)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum OpKind {
    AddVertex,
    AddEdges,
}

fn arbitrary_op<'a, V>(u: &mut Unstructured<'a>, r: f64) -> arbitrary::Result<MutOp<V>>
where
    V: Arbitrary<'a>,
{
    // Isolated vertices are interesting only at the beginning, later on the
    // edges are what makes the structure.
    let wv = non_linear_decrease(r);

    u.choose_weighted(&[OpKind::AddVertex, OpKind::AddEdges], &[wv, 1.0])
        .and_then(|kind| match kind {
            OpKind::AddVertex => Ok(MutOp::AddVertex(u.arbitrary()?)),
            OpKind::AddEdges => {
                let vertex = u.arbitrary()?;
                let count = u.int_in_range(0..=4)?;
                let destinations = (0..count)
                    .map(|_| u.arbitrary())
                    .collect::<arbitrary::Result<Vec<_>>>()?;
                Ok(MutOp::AddEdges(vertex, destinations))
            }
        })
}

trait UnstructuredExt {
    fn nice_f64(&mut self) -> arbitrary::Result<f64>;
    fn choose_weighted<'b, T>(
        &mut self,
        choices: &'b [T],
        weights: &'b [f64],
    ) -> arbitrary::Result<&'b T>;
}

impl<'a> UnstructuredExt for Unstructured<'a> {
    fn nice_f64(&mut self) -> arbitrary::Result<f64> {
        const RESOLUTION: u8 = 100;
        let int = self.int_in_range(0..=RESOLUTION)?;
        Ok(int as f64 / RESOLUTION as f64)
    }

    fn choose_weighted<'b, T>(
        &mut self,
        choices: &'b [T],
        weights: &'b [f64],
    ) -> arbitrary::Result<&'b T> {
        if choices.is_empty() || choices.len() != weights.len() {
            return Err(arbitrary::Error::EmptyChoose);
        }

        let weight_sum = weights.iter().copied().sum::<f64>();

        let random = self.nice_f64()?;
        let bound = random * weight_sum;

        let mut acc = 0.0;
        for (choice, weight) in choices.iter().zip(weights.iter().copied()) {
            acc += weight;

            if acc >= bound {
                return Ok(choice);
            }
        }

        // Rounding errors.
        Ok(&choices[choices.len() - 1])
    }
}

// f(0) = 1, f(1) ~= 0.152
fn non_linear_decrease(x: f64) -> f64 {
    1.0 / (x + 1.0).powf(std::f64::consts::E)
}
