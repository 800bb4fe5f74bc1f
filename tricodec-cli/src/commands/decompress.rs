//! Decompress command implementation.

use crate::utils::{CliResult, algorithm_from_extension, restored_path, sidecar_path};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tricodec::{
    Algorithm, DecodeWarning, Decoded, DecompressionReport, Sidecar, decompress,
    decompress_without_sidecar, integrity,
};

/// Arguments of the decompress command.
#[derive(Debug)]
pub struct DecompressArgs {
    pub payload: PathBuf,
    /// Explicit sidecar; `<payload>.json` is tried when absent.
    pub sidecar: Option<PathBuf>,
    /// Used only when there is no sidecar.
    pub algorithm: Option<Algorithm>,
    /// Used only when there is no sidecar.
    pub original_size: Option<usize>,
    pub output: Option<PathBuf>,
    pub force: bool,
    pub json: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    output: &'a Path,
    statistics: &'a DecompressionReport,
    warnings: &'a [DecodeWarning],
}

/// Decompress one payload, with its sidecar when one can be found.
pub fn cmd_decompress(args: &DecompressArgs) -> CliResult<()> {
    let payload = fs::read(&args.payload)?;
    let sidecar = load_sidecar(args)?;

    let start = Instant::now();
    let (algorithm, decoded) = match &sidecar {
        Some(sidecar) => (sidecar.algorithm, decompress(&payload, sidecar)?),
        None => {
            let algorithm = args
                .algorithm
                .or_else(|| algorithm_from_extension(&args.payload))
                .ok_or("no sidecar found; pass --algorithm to decode without one")?;
            let decoded = decompress_without_sidecar(algorithm, &payload, args.original_size)?;
            (algorithm, decoded)
        }
    };
    let report = DecompressionReport::new(algorithm, payload.len(), &decoded, start.elapsed());

    let expected = sidecar
        .as_ref()
        .and_then(|s| s.checksum)
        .filter(|_| !decoded.outcome.is_placeholder());
    if let Some(expected) = expected {
        integrity::verify(expected, &decoded.data)?;
    }

    let output = match &args.output {
        Some(path) => path.clone(),
        None => restored_path(&args.payload),
    };
    if output.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force or --output)",
            output.display()
        )
        .into());
    }
    fs::write(&output, &decoded.data)?;

    if args.json {
        let out = JsonOutput {
            output: &output,
            statistics: &report,
            warnings: decoded.outcome.warnings(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_summary(&args.payload, &output, &report, &decoded);
    }
    Ok(())
}

fn load_sidecar(args: &DecompressArgs) -> CliResult<Option<Sidecar>> {
    let path = match &args.sidecar {
        Some(path) => path.clone(),
        None => {
            let default = sidecar_path(&args.payload);
            if !default.exists() {
                tracing::debug!(path = %default.display(), "no sidecar next to payload");
                return Ok(None);
            }
            default
        }
    };
    let sidecar = Sidecar::from_json(&fs::read(&path)?)?;
    Ok(Some(sidecar))
}

fn print_summary(input: &Path, output: &Path, report: &DecompressionReport, decoded: &Decoded) {
    println!(
        "{} -> {} ({} -> {} bytes, {} ms)",
        input.display(),
        output.display(),
        report.compressed_size,
        report.decompressed_size,
        report.processing_time_ms
    );
    println!("  Algorithm: {}", report.algorithm);
    println!("  Status:    {}", report.status);
    println!("  CRC-32:    {:08x}", report.checksum);
    for warning in decoded.outcome.warnings() {
        println!("  warning: {warning}");
    }
    if let tricodec::DecodeOutcome::Placeholder { reason } = &decoded.outcome {
        println!("  Output is a zero-filled placeholder, not decoded data: {reason}");
    }
}
