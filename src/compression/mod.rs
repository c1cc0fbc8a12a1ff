//! The compression module drives the two stages of vitzip.
//!
//! Compression happens in the following steps:
//! - Move To Front transform: turn recently used bytes into low ranks.
//! - Adaptive huffman coding: code each rank with a tree that adapts after every symbol, ending
//!   with an end of stream marker and zero padding to a full byte.
//!
//! Decompression is the inverse of the compression process.
//! - Adaptive huffman decoding, up to the end of stream marker.
//! - MTF transform: convert the ranks back to the bytes they stand for.
//!
//! Both directions work on fully materialized buffers: one read, one write.
//!

pub mod compress;
pub mod decompress;
