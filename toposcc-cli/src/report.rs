//! Files with the results of a test run.
//!
//! For a test file `cases.txt`, the solutions are written to
//! `cases-result.txt` and the times to `cases-times.txt`, the latter in a form
//! suitable for plotting with gnuplot.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::runner::TestResults;

/// Returns the file name without its extension.
///
/// A leading dot (hidden file) or a trailing dot is not considered an
/// extension separator.
pub fn stem(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(pos) if pos > 0 && pos < file_name.len() - 1 => &file_name[..pos],
        _ => file_name,
    }
}

fn file_name_of(test_file: &Path) -> String {
    test_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn results_path(test_file: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}-result.txt", stem(&file_name_of(test_file))))
}

pub fn times_path(test_file: &Path, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}-times.txt", stem(&file_name_of(test_file))))
}

pub fn write_results<W: Write>(writer: &mut W, results: &TestResults) -> io::Result<()> {
    writeln!(
        writer,
        "# Total elapsed time: {:.6} ms",
        results.total_elapsed_ms()
    )?;
    writeln!(writer, "# Total number of cases: {}", results.case_count())?;
    writeln!(
        writer,
        "# Medium elapsed time per case: {:.6} ms",
        results.mean_per_case_ms()
    )?;

    for case in results.cases() {
        write!(
            writer,
            "Time: {} ms\nResult: {}\n\n",
            case.mean_ms, case.solution
        )?;
    }

    Ok(())
}

pub fn write_times<W: Write>(writer: &mut W, results: &TestResults) -> io::Result<()> {
    writeln!(writer, "# Nodes\t Time")?;

    for case in results.cases() {
        writeln!(writer, "{}\t {:.6}", case.vertex_count, case.mean_ms)?;
    }

    Ok(())
}

/// Paths of the written reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reports {
    pub results: PathBuf,
    pub times: PathBuf,
}

/// Writes both reports for given test file into `output_dir`.
pub fn save(results: &TestResults, test_file: &Path, output_dir: &Path) -> io::Result<Reports> {
    let reports = Reports {
        results: results_path(test_file, output_dir),
        times: times_path(test_file, output_dir),
    };

    let mut writer = BufWriter::new(File::create(&reports.results)?);
    write_results(&mut writer, results)?;
    writer.flush()?;

    let mut writer = BufWriter::new(File::create(&reports.times)?);
    write_times(&mut writer, results)?;
    writer.flush()?;

    Ok(reports)
}
