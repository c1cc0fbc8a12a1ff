//! The bitstream module forms the I/O subsystem for vitzip.
//!
//! Adaptive huffman codes have no fixed length, so the compressed data is a continuous run of
//! bits that only becomes byte aligned at the very end of the stream (zero padded in the low bits).
//!
//! This I/O subsystem is designed to efficiently interface with the other modules within vitzip. It is not intended for
//! more general use.
//!
pub mod bitreader;
pub mod bitwriter;
