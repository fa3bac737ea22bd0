use thiserror::Error;

/// The queried vertex was never added to the graph.
///
/// The algorithms only ever query vertices they obtained from the graph
/// itself, so this error always indicates a bug on the caller side.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("vertex does not exist")]
pub struct VertexNotFound;
