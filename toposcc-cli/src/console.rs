//! Interactive line-oriented console over a single graph.

use std::{
    fmt,
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
    time::Instant,
};

use fastrand::Rng;
use toposcc::{solve, DirectedGraph};
use tracing::{debug, warn};

use crate::{
    format,
    generate::RandomTestCreator,
    report,
    runner::TestRunner,
};

const PROMPT: &str = ">>> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    AddNode,
    AddEdges,
    Reset,
    Help,
    Show,
    Solve,
    Test,
    CreateTest,
    Exit,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::AddNode,
        Command::AddEdges,
        Command::Reset,
        Command::Help,
        Command::Show,
        Command::Solve,
        Command::Test,
        Command::CreateTest,
        Command::Exit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Command::AddNode => "add node",
            Command::AddEdges => "add edges",
            Command::Reset => "reset",
            Command::Help => "help",
            Command::Show => "show",
            Command::Solve => "solve",
            Command::Test => "test",
            Command::CreateTest => "create test",
            Command::Exit => "exit",
        }
    }

    pub fn help(&self) -> &'static str {
        match self {
            Command::AddNode => "Adds a node to the graph without any adjacent nodes.",
            Command::AddEdges => {
                "Creates directed edges that go from a source node to other nodes. Neither the \
                 source nor the destination nodes have to exist already in the graph. The \
                 destination nodes are separated by spaces."
            }
            Command::Reset => "Resets the graph. It will have no nodes.",
            Command::Help => "Shows this message.",
            Command::Show => "Shows the nodes and their adjacent nodes in the graph.",
            Command::Solve => {
                "If the graph is acyclic, lists its nodes in topological order. Otherwise, lists \
                 its strongly connected components."
            }
            Command::Test => {
                "Reads a file with several graphs and solves all of them. The solutions and the \
                 execution times are saved in the working directory."
            }
            Command::CreateTest => {
                "Creates a random test file. Asks for the number of cases, the number of nodes \
                 per graph and the name of the file."
            }
            Command::Exit => "Leaves the console.",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand;

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or(UnknownCommand)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// The console reads commands from `input`, writes regular output to `output`
/// and error messages to `errors`.
///
/// File names are resolved against the working directory, which is also
/// where the reports of `test` are written.
pub struct Console<R, W, E> {
    input: R,
    output: W,
    errors: E,
    graph: DirectedGraph<u32>,
    rng: Rng,
    runner: TestRunner,
    working_dir: PathBuf,
}

impl<R, W, E> Console<R, W, E>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    pub fn new(input: R, output: W, errors: E) -> Self {
        Self {
            input,
            output,
            errors,
            graph: DirectedGraph::new(),
            rng: Rng::new(),
            runner: TestRunner::default(),
            working_dir: PathBuf::from("."),
        }
    }

    pub fn rng(self, rng: Rng) -> Self {
        Self { rng, ..self }
    }

    pub fn runner(self, runner: TestRunner) -> Self {
        Self { runner, ..self }
    }

    pub fn working_dir(self, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            ..self
        }
    }

    #[cfg(test)]
    pub fn graph(&self) -> &DirectedGraph<u32> {
        &self.graph
    }

    /// Runs the command loop until `exit` or the end of input.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "This program allows you to create a graph manually, read test cases from a file, \
             and even create random test files."
        )?;
        writeln!(self.output, "Write \"{}\" for help.\n", Command::Help)?;

        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => break,
            };

            if line.is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => {
                    debug!(%command, "executing command");

                    if self.execute(command)? == Flow::Exit {
                        break;
                    }
                }
                Err(UnknownCommand) => {
                    writeln!(self.errors, "Error: this command doesn't exist.")?;
                    writeln!(
                        self.errors,
                        "Write {} to see the commands available.",
                        Command::Help
                    )?;
                }
            }
        }

        self.output.flush()
    }

    fn execute(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::AddNode => self.add_node(),
            Command::AddEdges => self.add_edges(),
            Command::Reset => {
                self.graph = DirectedGraph::new();
                Ok(Flow::Continue)
            }
            Command::Help => self.show_help(),
            Command::Show => self.show_graph(),
            Command::Solve => self.solve(),
            Command::Test => self.run_test(),
            Command::CreateTest => self.create_test(),
            Command::Exit => Ok(Flow::Exit),
        }
    }

    fn add_node(&mut self) -> io::Result<Flow> {
        let vertex = match self.read_number::<u32>("Node: ")? {
            Some(vertex) => vertex,
            None => return Ok(Flow::Exit),
        };

        self.graph.add_vertex(vertex);
        Ok(Flow::Continue)
    }

    fn add_edges(&mut self) -> io::Result<Flow> {
        let vertex = match self.read_number::<u32>("Node: ")? {
            Some(vertex) => vertex,
            None => return Ok(Flow::Exit),
        };

        let adjacent = match self.read_vertices("Adjacent nodes: ")? {
            Some(adjacent) => adjacent,
            None => return Ok(Flow::Exit),
        };

        self.graph.add_edges(vertex, adjacent);
        Ok(Flow::Continue)
    }

    fn show_help(&mut self) -> io::Result<Flow> {
        for command in Command::ALL {
            writeln!(self.output, "> {}\n{}\n", command, command.help())?;
        }

        Ok(Flow::Continue)
    }

    fn show_graph(&mut self) -> io::Result<Flow> {
        if self.graph.is_empty() {
            writeln!(self.output, "Graph is empty")?;
            return Ok(Flow::Continue);
        }

        for (vertex, adjacent) in self.graph.iter() {
            let adjacent = adjacent.map(u32::to_string).collect::<Vec<_>>();
            writeln!(
                self.output,
                "Node: {}\t -> [{}]",
                vertex,
                adjacent.join(", ")
            )?;
        }

        Ok(Flow::Continue)
    }

    fn solve(&mut self) -> io::Result<Flow> {
        let start = Instant::now();
        let solution = solve(&self.graph);
        let elapsed = start.elapsed();

        debug!(outcome = ?solution.outcome(), "graph solved");

        writeln!(self.output, "{solution}")?;
        writeln!(
            self.output,
            "Elapsed time: {} ms",
            elapsed.as_secs_f64() * 1000.0
        )?;

        Ok(Flow::Continue)
    }

    fn run_test(&mut self) -> io::Result<Flow> {
        let file_name = match self.read_file_name("Name of file: ")? {
            Some(file_name) => file_name,
            None => return Ok(Flow::Exit),
        };

        let path = self.working_dir.join(&file_name);

        if !path.is_file() {
            writeln!(
                self.errors,
                "File does not exist in {}",
                self.working_dir.display()
            )?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "Executing test...")?;

        let start = Instant::now();

        let graphs = match File::open(&path)
            .map_err(format::ParseError::from)
            .and_then(|file| format::parse(BufReader::new(file)))
        {
            Ok(graphs) => graphs,
            Err(error) => {
                writeln!(self.errors, "Error: {error}")?;
                return Ok(Flow::Continue);
            }
        };

        let results = self.runner.run(&graphs);
        let elapsed = start.elapsed();

        writeln!(
            self.output,
            "Total number of cases: {}",
            results.case_count()
        )?;
        writeln!(
            self.output,
            "Medium elapsed time per graph: {} ms",
            results.mean_per_case_ms()
        )?;
        writeln!(
            self.output,
            "Total medium elapsed time: {} ms",
            results.total_elapsed_ms()
        )?;
        writeln!(
            self.output,
            "Actual elapsed time: {} ms",
            elapsed.as_millis()
        )?;

        match report::save(&results, &path, &self.working_dir) {
            Ok(reports) => {
                writeln!(
                    self.output,
                    "Solutions saved to {}",
                    reports.results.display()
                )?;
                writeln!(
                    self.output,
                    "Execution times saved to {}",
                    reports.times.display()
                )?;
            }
            Err(error) => {
                warn!(%error, "cannot write reports");
                writeln!(self.errors, "Error: cannot write results: {error}")?;
            }
        }

        Ok(Flow::Continue)
    }

    fn create_test(&mut self) -> io::Result<Flow> {
        let cases = match self.read_number::<usize>("Number of random tests: ")? {
            Some(cases) => cases,
            None => return Ok(Flow::Exit),
        };

        let vertices = match self.read_number::<u32>("Number of nodes per graph: ")? {
            Some(vertices) => vertices,
            None => return Ok(Flow::Exit),
        };

        let file_name = match self.read_file_name("Name of file: ")? {
            Some(file_name) => file_name,
            None => return Ok(Flow::Exit),
        };

        let path = self.working_dir.join(&file_name);

        if let Err(error) = self.write_test(&path, RandomTestCreator::new(cases, vertices)) {
            writeln!(
                self.errors,
                "Error: the file cannot be created or written: {error}"
            )?;
            return Ok(Flow::Continue);
        }

        writeln!(self.output, "Test created in file {file_name}.")?;
        Ok(Flow::Continue)
    }

    fn write_test(&mut self, path: &Path, creator: RandomTestCreator) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        creator.write(&mut writer, &mut self.rng)?;
        writer.flush()
    }

    // Returns `None` at the end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();

        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    // Asks until the answer is accepted by `accept`.
    fn ask<T, F>(&mut self, prompt: &str, invalid: &str, mut accept: F) -> io::Result<Option<T>>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let line = match self.read_line()? {
                Some(line) => line,
                None => return Ok(None),
            };

            match accept(&line) {
                Some(value) => return Ok(Some(value)),
                None => writeln!(self.errors, "Invalid input: {invalid}")?,
            }
        }
    }

    fn read_number<T: FromStr>(&mut self, prompt: &str) -> io::Result<Option<T>> {
        self.ask(prompt, "write a number.", |line| line.parse().ok())
    }

    fn read_vertices(&mut self, prompt: &str) -> io::Result<Option<Vec<u32>>> {
        self.ask(prompt, "write a list of numbers.", |line| {
            line.split_whitespace()
                .map(|token| token.parse().ok())
                .collect()
        })
    }

    fn read_file_name(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.ask(
            prompt,
            "file name shouldn't be blank nor have whitespaces.",
            |line| {
                (!line.is_empty() && !line.contains(char::is_whitespace))
                    .then(|| line.to_string())
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use assert_matches::assert_matches;
    use toposcc::Either;

    use super::*;

    use crate::runner::RunnerConfig;

    struct Session {
        output: String,
        errors: String,
        graph: DirectedGraph<u32>,
    }

    fn run_in(input: &str, working_dir: &Path) -> Session {
        let mut output = Vec::new();
        let mut errors = Vec::new();

        let mut console = Console::new(input.as_bytes(), &mut output, &mut errors)
            .rng(Rng::with_seed(42))
            .runner(TestRunner::new(
                RunnerConfig::default().min_runs(1).fast_runs(1),
            ))
            .working_dir(working_dir);

        console.run().unwrap();
        let graph = console.graph().clone();
        drop(console);

        Session {
            output: String::from_utf8(output).unwrap(),
            errors: String::from_utf8(errors).unwrap(),
            graph,
        }
    }

    fn run(input: &str) -> Session {
        run_in(input, Path::new("."))
    }

    #[test]
    fn command_names() {
        for command in Command::ALL {
            assert_eq!(command.name().parse::<Command>(), Ok(command));
        }

        assert_matches!("add_node".parse::<Command>(), Err(UnknownCommand));
        assert_matches!("ADD NODE".parse::<Command>(), Err(UnknownCommand));
    }

    #[test]
    fn help_describes_every_command() {
        let session = run("help\n");

        for command in Command::ALL {
            assert!(session
                .output
                .contains(&format!("> {}\n{}\n", command, command.help())));
        }
        assert!(Command::Test.help().ends_with("saved in the working directory."));
    }

    #[test]
    fn build_and_show() {
        let session = run("add edges\n1\n2 3\nadd node\n4\nshow\nexit\n");

        assert!(session
            .output
            .contains("Node: 1\t -> [2, 3]\nNode: 2\t -> []\nNode: 3\t -> []\nNode: 4\t -> []\n"));
        assert_eq!(session.graph.vertex_count(), 4);
        assert_eq!(session.errors, "");
    }

    #[test]
    fn show_empty_and_reset() {
        let session = run("add node\n1\nreset\nshow\n");

        assert!(session.output.contains("Graph is empty\n"));
        assert!(session.graph.is_empty());
    }

    #[test]
    fn solve_prints_solution() {
        let session = run("add edges\n1\n2\nadd edges\n2\n1 3\nsolve\n");

        assert!(session.output.contains("[[1, 2], 3]\nElapsed time: "));
    }

    #[test]
    fn invalid_input_asks_again() {
        let session = run("add node\nx\n\n5\nadd edges\n1\n2 y\n2 3\n");

        assert_eq!(
            session.errors,
            "Invalid input: write a number.\n\
             Invalid input: write a number.\n\
             Invalid input: write a list of numbers.\n"
        );
        assert_eq!(
            session.graph.vertices().copied().collect::<Vec<_>>(),
            vec![5, 1, 2, 3]
        );
    }

    #[test]
    fn unknown_command() {
        let session = run("solvee\n\nhelp\n");

        assert_eq!(
            session.errors,
            "Error: this command doesn't exist.\nWrite help to see the commands available.\n"
        );
        assert!(session.output.contains("> create test\n"));
    }

    #[test]
    fn end_of_input_inside_prompt() {
        let session = run("add edges\n1\n");

        assert!(session.graph.is_empty());
        assert!(session.output.ends_with("Adjacent nodes: "));
    }

    #[test]
    fn create_and_run_test() {
        let dir = tempfile::tempdir().unwrap();

        let session = run_in(
            "create test\n3\n10\ncases.txt\ntest\ncases.txt\nexit\n",
            dir.path(),
        );

        assert_eq!(session.errors, "");
        assert!(session.output.contains("Test created in file cases.txt."));
        assert!(session.output.contains("Total number of cases: 3\n"));

        let results = fs::read_to_string(dir.path().join("cases-result.txt")).unwrap();
        assert_eq!(results.matches("Result: ").count(), 3);

        let times = fs::read_to_string(dir.path().join("cases-times.txt")).unwrap();
        assert_eq!(times.lines().skip(1).filter(|line| line.starts_with("10\t")).count(), 3);
    }

    #[test]
    fn run_test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_in("test\nmissing.txt\n", dir.path());

        assert!(session.errors.starts_with("File does not exist in "));
    }

    #[test]
    fn run_test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.txt"), "graph:\n1\n").unwrap();

        let session = run_in("test\nbad.txt\n", dir.path());

        assert!(session.errors.contains("line 2"));
        assert!(!dir.path().join("bad-result.txt").exists());
    }

    #[test]
    fn file_name_without_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_in("create test\n1\n1\nmy file\nok.txt\n", dir.path());

        assert!(session.errors.starts_with("Invalid input: file name"));

        let graphs = format::parse_str(&fs::read_to_string(dir.path().join("ok.txt")).unwrap())
            .unwrap();
        let solution = solve(&graphs[0]);
        assert_eq!(solution.as_slice(), &[Either::Singleton(1)]);
    }
}
