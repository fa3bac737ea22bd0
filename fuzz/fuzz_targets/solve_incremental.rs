#![no_main]

use libfuzzer_sys::fuzz_target;

use toposcc::{
    algo::solve,
    core::DirectedGraph,
    infra::{arbitrary::MutOpsSeq, testing::check_solution},
};

fuzz_target!(|ops: MutOpsSeq<u8>| {
    let mut graph = DirectedGraph::new();

    for op in ops {
        op.apply(&mut graph);
        check_solution(&graph, &solve(&graph))
            .as_ref()
            .map_err(ToString::to_string)
            .unwrap();
    }
});
