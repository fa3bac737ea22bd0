use toposcc::{solve, DirectedGraph, Either};

fn main() {
    // Edge direction in "must be built before" relation.
    let mut graph = DirectedGraph::new();

    graph.add_edges("libc", ["openssl-sys", "mio"]);
    graph.add_edges("openssl-sys", ["openssl"]);
    graph.add_edges("mio", ["tokio"]);
    graph.add_edges("openssl", ["native-tls"]);
    graph.add_edges("tokio", ["hyper", "native-tls"]);

    let solution = solve(&graph);
    println!("{solution}");
    // [libc, mio, tokio, hyper, openssl-sys, openssl, native-tls]

    // A dependency going back makes a cycle.
    graph.add_edges("native-tls", ["mio"]);

    for item in solve(&graph) {
        match item {
            Either::Singleton(package) => println!("{package}"),
            Either::Component(packages) => println!("cycle: {}", packages.join(" -> ")),
        }
    }
}
