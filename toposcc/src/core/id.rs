//! Dense identifiers of vertices inside a [`DirectedGraph`].
//!
//! Vertices are numbered in the order they were first added to the graph,
//! starting from zero and without holes (there is no removal). This makes the
//! index usable for addressing contiguous arrays and bit sets in the
//! algorithms, and comparing two indices is the same as comparing the
//! insertion order of the vertices.
//!
//! [`DirectedGraph`]: crate::core::DirectedGraph

use std::fmt;

/// Position of a vertex in the insertion order of its graph.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexIndex(usize);

impl VertexIndex {
    /// Converts the index into the corresponding `usize`.
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl From<usize> for VertexIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl From<VertexIndex> for usize {
    fn from(index: VertexIndex) -> Self {
        index.0
    }
}

impl fmt::Debug for VertexIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for VertexIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
