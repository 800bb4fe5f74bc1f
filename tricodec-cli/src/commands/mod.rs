//! Command implementations for the Tricodec CLI.

pub mod algorithms;
pub mod compress;
pub mod decompress;

pub use algorithms::cmd_algorithms;
pub use compress::cmd_compress;
pub use decompress::{DecompressArgs, cmd_decompress};
