//! Text format of test files.
//!
//! A file holds any number of graphs. Each graph starts with a line containing
//! only `graph:` and continues with pairs of lines: a vertex id, then the ids
//! of its adjacent vertices separated by spaces (possibly none).
//!
//! ```text
//! graph:
//! 1
//! 2 3
//! 2
//! 3
//! 3
//!
//! ```
//!
//! Lines before the first `graph:` are ignored, as are blank lines where a
//! vertex id is expected.
//!
//! The pairs are added to the graph in the order of the lines, so a vertex is
//! inserted where it is first mentioned, be it on its own id line or as an
//! adjacent vertex.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use toposcc::DirectedGraph;

pub const START_OF_GRAPH: &str = "graph:";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot read test file")]
    Io(#[from] io::Error),
    #[error("line {line}: `{token}` is not a vertex id")]
    InvalidVertex { line: usize, token: String },
    #[error("line {line}: vertex id is not followed by a line with adjacent vertices")]
    MissingAdjacency { line: usize },
}

#[derive(Debug, Default)]
struct GraphLines {
    graph: DirectedGraph<u32>,
    // Line number of a vertex id still waiting for its adjacency line.
    pending: Option<(usize, u32)>,
}

impl GraphLines {
    fn finish(self) -> Result<DirectedGraph<u32>, ParseError> {
        match self.pending {
            Some((line, _)) => Err(ParseError::MissingAdjacency { line }),
            None => Ok(self.graph),
        }
    }
}

fn parse_vertex(token: &str, line: usize) -> Result<u32, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidVertex {
        line,
        token: token.to_string(),
    })
}

/// Reads all graphs from a test file.
///
/// A graph is returned only if all its lines are valid.
pub fn parse<R: BufRead>(reader: R) -> Result<Vec<DirectedGraph<u32>>, ParseError> {
    let mut graphs = Vec::new();
    let mut current: Option<GraphLines> = None;

    for (index, line) in reader.lines().enumerate() {
        let number = index + 1;
        let line = line?;
        let line = line.trim();

        if line == START_OF_GRAPH {
            if let Some(finished) = current.replace(GraphLines::default()) {
                graphs.push(finished.finish()?);
            }
            continue;
        }

        let lines = match current.as_mut() {
            Some(lines) => lines,
            None => continue,
        };

        match lines.pending.take() {
            Some((_, vertex)) => {
                let adjacent = line
                    .split_whitespace()
                    .map(|token| parse_vertex(token, number))
                    .collect::<Result<Vec<_>, _>>()?;

                lines.graph.add_edges(vertex, adjacent);
            }
            None if line.is_empty() => {}
            None => lines.pending = Some((number, parse_vertex(line, number)?)),
        }
    }

    if let Some(finished) = current {
        graphs.push(finished.finish()?);
    }

    Ok(graphs)
}

#[cfg(test)]
pub fn parse_str(input: &str) -> Result<Vec<DirectedGraph<u32>>, ParseError> {
    parse(input.as_bytes())
}

/// Writes a graph in the format read by [`parse`].
///
/// Every vertex gets its own pair of lines, in the insertion order. The graph
/// is read back equal if every vertex is inserted no later than it is first
/// mentioned as an adjacent vertex, which holds for graphs built by
/// [`parse`].
pub fn write<W: Write>(writer: &mut W, graph: &DirectedGraph<u32>) -> io::Result<()> {
    writeln!(writer, "{START_OF_GRAPH}")?;

    for (vertex, adjacent) in graph {
        writeln!(writer, "{vertex}")?;

        for (i, to) in adjacent.enumerate() {
            if i > 0 {
                write!(writer, " ")?;
            }
            write!(writer, "{to}")?;
        }

        writeln!(writer)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use toposcc::solve;

    use super::*;

    fn adjacent(graph: &DirectedGraph<u32>, vertex: u32) -> Vec<u32> {
        graph
            .adjacent_vertices_of(&vertex)
            .unwrap()
            .copied()
            .collect()
    }

    #[test]
    fn parse_two_graphs() {
        let input = "\
comment before the first graph
graph:
1
2 3
2

3
1
 graph:
4
4
";
        let graphs = parse_str(input).unwrap();

        assert_eq!(graphs.len(), 2);

        let first = &graphs[0];
        assert_eq!(
            first.vertices().copied().collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(adjacent(first, 1), vec![2, 3]);
        assert_eq!(adjacent(first, 2), Vec::<u32>::new());
        assert_eq!(adjacent(first, 3), vec![1]);

        let second = &graphs[1];
        assert_eq!(adjacent(second, 4), vec![4]);
    }

    #[test]
    fn parse_empty_graph() {
        let graphs = parse_str("graph:\ngraph:\n").unwrap();

        assert_eq!(graphs.len(), 2);
        assert!(graphs.iter().all(DirectedGraph::is_empty));
    }

    #[test]
    fn parse_no_graph() {
        assert_eq!(parse_str("").unwrap().len(), 0);
        assert_eq!(parse_str("1\n2\n").unwrap().len(), 0);
    }

    #[test]
    fn parse_inserts_at_first_mention() {
        let graphs = parse_str("graph:\n1\n3\n2\n3\n3\n2\n").unwrap();
        let graph = &graphs[0];

        assert_eq!(graph.vertices().copied().collect::<Vec<_>>(), vec![1, 3, 2]);

        // The order of insertion decides the order inside a component.
        assert_eq!(solve(graph).to_string(), "[1, [3, 2]]");
    }

    #[test]
    fn parse_then_write_is_identity() {
        let input = "graph:\n4\n2 4\n1\n\n2\n1 3\n3\n4\n";
        let graphs = parse_str(input).unwrap();

        let mut output = Vec::new();
        write(&mut output, &graphs[0]).unwrap();

        assert_eq!(parse(output.as_slice()).unwrap(), graphs);
    }

    #[test]
    fn parse_invalid_vertex() {
        assert_matches!(
            parse_str("graph:\n1\n2 x\n"),
            Err(ParseError::InvalidVertex { line: 3, token }) if token == "x"
        );
        assert_matches!(
            parse_str("graph:\n-1\n\n"),
            Err(ParseError::InvalidVertex { line: 2, .. })
        );
    }

    #[test]
    fn parse_missing_adjacency() {
        assert_matches!(
            parse_str("graph:\n1\n2\n3\n"),
            Err(ParseError::MissingAdjacency { line: 4 })
        );
        assert_matches!(
            parse_str("graph:\n1\ngraph:\n"),
            Err(ParseError::MissingAdjacency { line: 2 })
        );
    }

    #[test]
    fn write_format() {
        let mut graph = DirectedGraph::new();
        graph.add_edges(1, [2, 3]);
        graph.add_edges(3, [1]);

        let mut output = Vec::new();
        write(&mut output, &graph).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "graph:\n1\n2 3\n2\n\n3\n1\n"
        );
    }

    #[test]
    fn write_then_parse() {
        let mut graph = DirectedGraph::new();
        graph.add_vertex(5);
        graph.add_edges(1, [7, 5]);
        graph.add_edges(7, [7, 1]);
        graph.add_vertex(2);

        let mut output = Vec::new();
        write(&mut output, &graph).unwrap();
        write(&mut output, &DirectedGraph::new()).unwrap();

        let parsed = parse(output.as_slice()).unwrap();

        assert_eq!(parsed, vec![graph, DirectedGraph::new()]);
    }
}
