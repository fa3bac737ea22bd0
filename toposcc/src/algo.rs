pub mod connected_components;
pub mod solve;
pub mod toposort;

pub use connected_components::StronglyConnectedComponents;
pub use solve::{solve, Outcome, Solution, Solve};
pub use toposort::TopoSort;
