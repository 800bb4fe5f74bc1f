//! Compress command implementation.

use crate::utils::{
    CliResult, create_progress_bar, find_payload_collision, payload_path, print_reports,
    sidecar_path,
};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tricodec::{Algorithm, CodecOptions, CompressionReport, compress};

/// Outcome of compressing one file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompressedFile {
    input: PathBuf,
    payload: PathBuf,
    sidecar: PathBuf,
    statistics: CompressionReport,
}

/// Compress every file, one file per worker thread.
///
/// Fails before writing anything if two inputs would share a payload path.
pub fn cmd_compress(
    files: &[PathBuf],
    algorithm: Algorithm,
    options: &CodecOptions,
    output_dir: Option<&Path>,
    json: bool,
    progress: bool,
) -> CliResult<()> {
    let targets: Vec<(&Path, PathBuf)> = files
        .iter()
        .map(|input| (input.as_path(), payload_path(input, algorithm, output_dir)))
        .collect();
    if let Some((first, second, payload)) = find_payload_collision(&targets) {
        return Err(format!(
            "{} and {} would both be written to {}",
            first.display(),
            second.display(),
            payload.display()
        )
        .into());
    }

    if let Some(dir) = output_dir {
        fs::create_dir_all(dir)?;
    }

    let pb = create_progress_bar(files.len() as u64, progress && !json);
    pb.set_message(format!("compressing with {algorithm}"));

    let results: Vec<(&Path, CliResult<CompressedFile>)> = targets
        .par_iter()
        .map(|(input, payload)| {
            let result = compress_file(input, payload, algorithm, options);
            pb.inc(1);
            (*input, result)
        })
        .collect();
    pb.finish_and_clear();

    let mut done = Vec::new();
    let mut failed = 0usize;
    for (path, result) in results {
        match result {
            Ok(file) => done.push(file),
            Err(e) => {
                eprintln!("Error: {}: {}", path.display(), e);
                failed += 1;
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&done)?);
    } else if !done.is_empty() {
        let rows: Vec<(PathBuf, CompressionReport)> = done
            .iter()
            .map(|f| (f.payload.clone(), f.statistics.clone()))
            .collect();
        print_reports(&rows);
    }

    if failed > 0 {
        return Err(format!("{failed} of {} files failed", files.len()).into());
    }
    Ok(())
}

fn compress_file(
    input: &Path,
    payload: &Path,
    algorithm: Algorithm,
    options: &CodecOptions,
) -> CliResult<CompressedFile> {
    let data = fs::read(input)?;
    let mut compressed = compress(algorithm, &data, options)?;
    compressed.sidecar.original_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let sidecar = sidecar_path(payload);
    fs::write(payload, &compressed.payload)?;
    fs::write(&sidecar, compressed.sidecar.to_json()?)?;
    tracing::debug!(
        input = %input.display(),
        payload = %payload.display(),
        "wrote payload and sidecar"
    );

    Ok(CompressedFile {
        input: input.to_path_buf(),
        payload: payload.to_path_buf(),
        sidecar,
        statistics: compressed.report,
    })
}
