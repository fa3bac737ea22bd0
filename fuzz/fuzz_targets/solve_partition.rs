#![no_main]

use libfuzzer_sys::fuzz_target;

use toposcc::{algo::solve, core::DirectedGraph, infra::testing::check_solution};

fuzz_target!(|graph: DirectedGraph<u8>| {
    let solution = solve(&graph);

    check_solution(&graph, &solution)
        .as_ref()
        .map_err(ToString::to_string)
        .unwrap();
});
