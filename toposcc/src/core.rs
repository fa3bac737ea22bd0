//! Core data structures: the graph, the result element type and the seam the
//! traversals are generic over.

pub mod either;
pub mod error;
pub mod graph;
pub mod id;

pub use either::Either;
pub use error::VertexNotFound;
pub use graph::DirectedGraph;
pub use id::VertexIndex;

/// Outgoing neighbors of vertices addressed by their [`VertexIndex`].
///
/// Implemented by [`DirectedGraph`] and by derived views such as
/// [`Transpose`](crate::adapt::Transpose), so that a single traversal
/// implementation serves both of them.
pub trait Neighbors {
    /// Returns the exclusive upper bound of vertex indices, i.e., the number of
    /// vertices.
    fn vertex_bound(&self) -> usize;

    /// Returns the indices of the successors of given vertex, in adjacency
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if the index is not less than
    /// [`vertex_bound`](Neighbors::vertex_bound).
    fn neighbors(&self, from: VertexIndex) -> &[VertexIndex];
}

impl<G: Neighbors + ?Sized> Neighbors for &G {
    fn vertex_bound(&self) -> usize {
        (**self).vertex_bound()
    }

    fn neighbors(&self, from: VertexIndex) -> &[VertexIndex] {
        (**self).neighbors(from)
    }
}
