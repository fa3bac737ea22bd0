//! Derived views of a graph.

mod transpose;

pub use transpose::Transpose;
