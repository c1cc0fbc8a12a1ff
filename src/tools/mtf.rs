//! Move-To-Front transform.
//!
//! Each byte is replaced by its current position in a recency ordered table of all 256 byte
//! values, and then moved to the front of that table. Runs and recently seen bytes turn into
//! small ranks, which the adaptive huffman stage codes in very few bits.
//!
//! Encoder and decoder must each start from a fresh table.
use crate::error::{Error, Result};

/// Recency ordered table of every byte value.
#[derive(Debug, Clone)]
pub struct MoveToFront {
    index: [u8; 256],
}

impl MoveToFront {
    /// Create a table in identity order, [0, 1, .. 255].
    pub fn new() -> Self {
        let mut index = [0_u8; 256];
        index.iter_mut().enumerate().for_each(|(i, b)| *b = i as u8);
        Self { index }
    }

    /// Shift everything in front of idx back one place and put the symbol at idx in front.
    fn promote(&mut self, idx: usize) -> u8 {
        let sym = self.index[idx];
        self.index.copy_within(0..idx, 1);
        self.index[0] = sym;
        sym
    }

    /// Return the current rank of byte, and move it to the front.
    pub fn encode_byte(&mut self, byte: u8) -> u8 {
        // The table is always a full permutation, so the byte is always found.
        let idx = self
            .index
            .iter()
            .position(|&c| c == byte)
            .unwrap_or_default();
        self.promote(idx);
        idx as u8
    }

    /// Return the byte at rank, and move it to the front. Ranks past the end of the
    /// table can only come from a damaged stream.
    pub fn decode_rank(&mut self, rank: usize) -> Result<u8> {
        if rank >= self.index.len() {
            return Err(Error::CorruptStream(format!("MTF rank {} is out of range", rank)));
        }
        Ok(self.promote(rank))
    }

    /// Encode data using the Move To Front transform.
    pub fn encode(&mut self, data: &[u8]) -> Vec<u8> {
        data.iter().map(|&byte| self.encode_byte(byte)).collect()
    }

    /// Decode Move To Front ranks back into the original data.
    pub fn decode<I>(&mut self, ranks: I) -> Result<Vec<u8>>
    where
        I: IntoIterator,
        I::Item: Into<usize>,
    {
        ranks
            .into_iter()
            .map(|rank| self.decode_rank(rank.into()))
            .collect()
    }

    /// View of the current table order.
    pub fn table(&self) -> &[u8; 256] {
        &self.index
    }
}

impl Default for MoveToFront {
    fn default() -> Self {
        Self::new()
    }
}
