use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use fastrand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod console;
mod format;
mod generate;
mod report;
mod runner;

use console::Console;
use generate::RandomTestCreator;
use runner::{RunnerConfig, TestRunner};

#[derive(Parser)]
#[command(name = "toposcc")]
#[command(about = "Topological sort or strongly connected components of directed graphs")]
#[command(version)]
struct Cli {
    /// Without a command, the interactive console is started
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive console
    Console {
        /// Seed of the random generator used by `create test`
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Solve all graphs of a test file
    Solve {
        /// Test file
        file: PathBuf,
        /// Print the results only, do not write the report files
        #[arg(long)]
        no_write: bool,
        /// Minimum number of runs per graph
        #[arg(long, default_value_t = 3)]
        min_runs: u32,
        /// Number of runs per graph if the first run is fast
        #[arg(long, default_value_t = 100)]
        fast_runs: u32,
        /// First runs shorter than this (in milliseconds) are considered fast
        #[arg(long, default_value_t = 10)]
        fast_threshold_ms: u64,
    },

    /// Create a test file with random graphs
    CreateTest {
        /// Output file
        file: PathBuf,
        /// Number of graphs
        #[arg(long, default_value_t = 10)]
        cases: usize,
        /// Number of vertices per graph
        #[arg(long, default_value_t = 100)]
        vertices: u32,
        /// Seed of the random generator
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Create a test file with random graphs of growing sizes up to 9000 vertices
    CreateBigTest {
        /// Output file
        file: PathBuf,
        /// Seed of the random generator
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Console { seed: None }) {
        Commands::Console { seed } => {
            let stdin = io::stdin();
            let mut console = Console::new(stdin.lock(), io::stdout(), io::stderr())
                .rng(seed.map(Rng::with_seed).unwrap_or_default())
                .runner(TestRunner::default())
                .working_dir(".");
            console.run().context("console failed")
        }
        Commands::Solve {
            file,
            no_write,
            min_runs,
            fast_runs,
            fast_threshold_ms,
        } => solve_file(
            &file,
            !no_write,
            RunnerConfig::default()
                .min_runs(min_runs.max(1))
                .fast_runs(fast_runs)
                .fast_threshold(Duration::from_millis(fast_threshold_ms)),
        ),
        Commands::CreateTest {
            file,
            cases,
            vertices,
            seed,
        } => create_file(&file, seed, |writer, rng| {
            RandomTestCreator::new(cases, vertices).write(writer, rng)
        }),
        Commands::CreateBigTest { file, seed } => {
            create_file(&file, seed, generate::write_big_test)
        }
    }
}

fn solve_file(file: &Path, write_reports: bool, config: RunnerConfig) -> anyhow::Result<()> {
    let reader = File::open(file)
        .with_context(|| format!("cannot open test file {}", file.display()))?;
    let graphs = format::parse(BufReader::new(reader))
        .with_context(|| format!("invalid test file {}", file.display()))?;

    info!(graphs = graphs.len(), file = %file.display(), "test file read");

    let results = TestRunner::new(config).run(&graphs);

    let mut stdout = io::stdout().lock();
    for case in results.cases() {
        writeln!(stdout, "{}", case.solution)?;
    }
    writeln!(stdout, "Total number of cases: {}", results.case_count())?;
    writeln!(
        stdout,
        "Medium elapsed time per graph: {} ms",
        results.mean_per_case_ms()
    )?;
    writeln!(
        stdout,
        "Total medium elapsed time: {} ms",
        results.total_elapsed_ms()
    )?;

    if write_reports {
        let reports = report::save(&results, file, Path::new("."))
            .context("cannot write reports")?;

        info!(
            results = %reports.results.display(),
            times = %reports.times.display(),
            "reports written"
        );
    }

    Ok(())
}

fn create_file<F>(file: &Path, seed: Option<u64>, write: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut BufWriter<File>, &mut Rng) -> io::Result<()>,
{
    let mut rng = seed.map(Rng::with_seed).unwrap_or_default();

    let mut writer = BufWriter::new(
        File::create(file).with_context(|| format!("cannot create {}", file.display()))?,
    );
    write(&mut writer, &mut rng)
        .and_then(|_| writer.flush())
        .with_context(|| format!("cannot write {}", file.display()))?;

    info!(file = %file.display(), "test file created");
    Ok(())
}
