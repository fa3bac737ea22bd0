//! Timed runs of [`solve`] over the graphs of a test file.

use std::time::{Duration, Instant};

use toposcc::{solve, DirectedGraph};
use tracing::debug;

/// How many times each graph is solved.
///
/// Every graph is solved at least [`min_runs`](RunnerConfig::min_runs) times.
/// If the first run is faster than
/// [`fast_threshold`](RunnerConfig::fast_threshold), the graph is solved
/// [`fast_runs`](RunnerConfig::fast_runs) times instead to get a more stable
/// mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    min_runs: u32,
    fast_runs: u32,
    fast_threshold: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            min_runs: 3,
            fast_runs: 100,
            fast_threshold: Duration::from_millis(10),
        }
    }
}

impl RunnerConfig {
    pub fn min_runs(self, min_runs: u32) -> Self {
        assert!(min_runs > 0, "graph must be solved at least once");
        Self { min_runs, ..self }
    }

    pub fn fast_runs(self, fast_runs: u32) -> Self {
        Self { fast_runs, ..self }
    }

    pub fn fast_threshold(self, fast_threshold: Duration) -> Self {
        Self {
            fast_threshold,
            ..self
        }
    }

    fn runs_after(&self, first: Duration) -> u32 {
        if first < self.fast_threshold {
            self.fast_runs.max(self.min_runs)
        } else {
            self.min_runs
        }
    }
}

/// Result of a single graph.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    /// Mean time of a single solve in milliseconds.
    pub mean_ms: f64,
    pub vertex_count: usize,
    /// The rendered solution.
    pub solution: String,
}

/// Results of all graphs of a test file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestResults {
    cases: Vec<CaseResult>,
}

impl TestResults {
    pub fn cases(&self) -> &[CaseResult] {
        &self.cases
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    /// Sum of the mean times of all cases in milliseconds.
    pub fn total_elapsed_ms(&self) -> f64 {
        self.cases.iter().map(|case| case.mean_ms).sum()
    }

    /// Mean time per case in milliseconds, zero if there are no cases.
    pub fn mean_per_case_ms(&self) -> f64 {
        if self.cases.is_empty() {
            0.0
        } else {
            self.total_elapsed_ms() / self.cases.len() as f64
        }
    }
}

impl FromIterator<CaseResult> for TestResults {
    fn from_iter<T: IntoIterator<Item = CaseResult>>(iter: T) -> Self {
        Self {
            cases: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TestRunner {
    config: RunnerConfig,
}

impl TestRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn run<'a, I>(&self, graphs: I) -> TestResults
    where
        I: IntoIterator<Item = &'a DirectedGraph<u32>>,
    {
        graphs.into_iter().map(|graph| self.run_case(graph)).collect()
    }

    pub fn run_case(&self, graph: &DirectedGraph<u32>) -> CaseResult {
        let start = Instant::now();
        let mut solution = solve(graph);
        let first = start.elapsed();

        let runs = self.config.runs_after(first);
        let mut total = first;

        for _ in 1..runs {
            let start = Instant::now();
            solution = solve(graph);
            total += start.elapsed();
        }

        let mean_ms = total.as_secs_f64() * 1000.0 / runs as f64;

        debug!(
            vertices = graph.vertex_count(),
            outcome = ?solution.outcome(),
            runs,
            mean_ms,
            "case solved"
        );

        CaseResult {
            mean_ms,
            vertex_count: graph.vertex_count(),
            solution: solution.to_string(),
        }
    }
}
