//! Tricodec CLI - Huffman, RLE and LZ77 file compression
//!
//! Compresses files into a payload plus a JSON sidecar, and restores them.

mod commands;
mod utils;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{DecompressArgs, cmd_algorithms, cmd_compress, cmd_decompress};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tricodec::{Algorithm, CodecOptions};

#[derive(Parser)]
#[command(name = "tricodec")]
#[command(author, version, about = "Huffman, RLE and LZ77 file compression")]
#[command(long_about = "
Tricodec compresses files with one of three classic algorithms and writes a
JSON sidecar next to each payload with everything needed to restore it.

Examples:
  tricodec compress -a huffman notes.txt
  tricodec compress -a rle --enhanced image.bmp
  tricodec compress -a lz77 --window 8192 -o out/ a.log b.log c.log
  tricodec decompress notes.txt.huf
  tricodec decompress -a lz77 --original-size 4096 orphan.lz77
  tricodec algorithms --json
")]
struct Cli {
    /// Log codec details (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress files, writing <file>.<ext> and <file>.<ext>.json
    #[command(alias = "c")]
    Compress {
        /// Files to compress
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Compression algorithm
        #[arg(short, long, value_enum)]
        algorithm: AlgorithmArg,

        /// RLE: use the escaped enhanced format
        #[arg(long)]
        enhanced: bool,

        /// LZ77: search window in bytes (default 4096)
        #[arg(long)]
        window: Option<usize>,

        /// LZ77: longest match in bytes (default 255)
        #[arg(long)]
        lookahead: Option<usize>,

        /// Output directory (next to the input if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output statistics as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Decompress a payload
    #[command(alias = "d")]
    Decompress {
        /// Compressed payload
        payload: PathBuf,

        /// Sidecar file (defaults to <payload>.json)
        #[arg(short = 'm', long)]
        sidecar: Option<PathBuf>,

        /// Algorithm, when there is no sidecar
        #[arg(short, long, value_enum)]
        algorithm: Option<AlgorithmArg>,

        /// Original size in bytes, when there is no sidecar
        #[arg(long)]
        original_size: Option<usize>,

        /// Output file (payload name without its extension if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,

        /// Output statistics as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Describe the supported algorithms
    Algorithms {
        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

/// Algorithm names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    /// Static Huffman coding
    Huffman,
    /// Run-length encoding
    Rle,
    /// Sliding-window LZ77
    Lz77,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Huffman => Algorithm::Huffman,
            AlgorithmArg::Rle => Algorithm::Rle,
            AlgorithmArg::Lz77 => Algorithm::Lz77,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Compress {
            files,
            algorithm,
            enhanced,
            window,
            lookahead,
            output,
            json,
            no_progress,
        } => {
            let options = CodecOptions {
                enhanced,
                window_size: window,
                lookahead_size: lookahead,
            };
            cmd_compress(
                &files,
                algorithm.into(),
                &options,
                output.as_deref(),
                json,
                !no_progress,
            )
        }
        Commands::Decompress {
            payload,
            sidecar,
            algorithm,
            original_size,
            output,
            force,
            json,
        } => cmd_decompress(&DecompressArgs {
            payload,
            sidecar,
            algorithm: algorithm.map(Algorithm::from),
            original_size,
            output,
            force,
            json,
        }),
        Commands::Algorithms { json } => cmd_algorithms(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
