//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tricodec::{Algorithm, CompressionReport};

/// Error type shared by the commands.
pub type CliError = Box<dyn std::error::Error + Send + Sync>;

/// Result type shared by the commands.
pub type CliResult<T> = Result<T, CliError>;

/// Create a progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("progress bar template is valid")
            .progress_chars("█▓▒░ "),
    );
    pb
}

/// Append `.suffix` to a path without replacing its extension.
fn append_extension(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Where the payload for `input` is written: `<dir>/<name>.<ext>`.
pub fn payload_path(input: &Path, algorithm: Algorithm, output_dir: Option<&Path>) -> PathBuf {
    let target = match (output_dir, input.file_name()) {
        (Some(dir), Some(name)) => dir.join(name),
        _ => input.to_path_buf(),
    };
    append_extension(&target, algorithm.extension())
}

/// First pair of inputs whose payloads would land on the same path.
///
/// Returns `(first input, second input, shared payload path)`.
pub fn find_payload_collision<'a>(
    targets: &'a [(&'a Path, PathBuf)],
) -> Option<(&'a Path, &'a Path, &'a Path)> {
    let mut seen: HashMap<&Path, &Path> = HashMap::with_capacity(targets.len());
    for (input, payload) in targets {
        if let Some(first) = seen.insert(payload.as_path(), *input) {
            return Some((first, *input, payload.as_path()));
        }
    }
    None
}

/// Sidecar path for a payload: `<payload>.json`.
pub fn sidecar_path(payload: &Path) -> PathBuf {
    append_extension(payload, "json")
}

/// Algorithm implied by a payload's extension.
pub fn algorithm_from_extension(payload: &Path) -> Option<Algorithm> {
    let ext = payload.extension()?.to_str()?;
    Algorithm::ALL
        .into_iter()
        .find(|a| a.extension().eq_ignore_ascii_case(ext))
}

/// Default output path for a decompressed payload: the payload path with
/// its compression extension removed.
pub fn restored_path(payload: &Path) -> PathBuf {
    match algorithm_from_extension(payload) {
        Some(_) => payload.with_extension(""),
        None => append_extension(payload, "out"),
    }
}

/// Print compression reports in a formatted table.
pub fn print_reports(reports: &[(PathBuf, CompressionReport)]) {
    println!(
        "{:>10} {:>10} {:>8} {:>10} {:>6}  Name",
        "Original", "Compressed", "Ratio", "Time (ms)", "Score",
    );
    println!("{}", "-".repeat(64));

    let mut total_original = 0usize;
    let mut total_compressed = 0usize;
    for (path, report) in reports {
        println!(
            "{:>10} {:>10} {:>7.2}% {:>10.2} {:>6.2}  {}",
            report.original_size,
            report.compressed_size,
            report.compression_ratio,
            report.processing_time_ms,
            report.efficiency,
            path.display()
        );
        total_original += report.original_size;
        total_compressed += report.compressed_size;
    }

    if reports.len() > 1 {
        println!("{}", "-".repeat(64));
        println!(
            "{:>10} {:>10} {:>7.2}%                    {} files",
            total_original,
            total_compressed,
            tricodec::stats::compression_ratio(total_original, total_compressed),
            reports.len()
        );
    }
}
