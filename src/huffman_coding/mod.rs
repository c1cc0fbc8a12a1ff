//! The huffman module holds the adaptive (one pass) huffman coder used by vitzip.
//!
//! Unlike block huffman coding, nothing about the code tables is ever written to the stream.
//! The encoder and the decoder each grow a Vitter style tree, symbol by symbol, and because both
//! apply exactly the same update after every symbol their codes always agree.
//!
//! A symbol's first appearance is sent as the NYT ("not yet transmitted") code followed by the
//! raw 8 bit value. The literal 255 is always followed by one flag bit: 0 when it is data, and 1
//! when it marks the end of the stream.
//!

pub mod decoder;
pub mod encoder;
pub mod tree;

/// Literal value that doubles as the end of stream marker.
pub const ESCAPED_LITERAL: u8 = 255;
/// Flag bit after ESCAPED_LITERAL: the stream is over.
pub const END_OF_STREAM: bool = true;
/// Flag bit after ESCAPED_LITERAL: it was a real data byte.
pub const MORE_DATA: bool = false;
