//! vitzip: a small, single pass file compressor.
//!
//! Data goes through a Move-To-Front transform and is then coded with an adaptive huffman
//! tree in the style of Vitter. The tree is never stored: the decoder grows its own copy
//! from the symbols it decodes, in lock step with the encoder.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> vitzip -z test.txt`
//!
//! This will compress the file and create the file test.txt.vz.
//! The original file will be deleted unless -k is given.
//!
//! As a library:
//!
//! ```
//! let packed = vitzip::compress(b"banana banana banana");
//! assert_eq!(vitzip::decompress(&packed).unwrap(), b"banana banana banana");
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::compress;
pub use compression::decompress::decompress;
pub use error::{Error, Result};
