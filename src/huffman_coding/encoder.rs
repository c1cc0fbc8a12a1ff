use log::trace;

use super::tree::VitterTree;
use super::{END_OF_STREAM, ESCAPED_LITERAL, MORE_DATA};
use crate::bitstream::bitwriter::BitWriter;

/// Adaptive huffman encoder. Owns the tree that mirrors the decoder's tree.
#[derive(Debug, Default)]
pub struct Encoder {
    tree: VitterTree,
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            tree: VitterTree::new(),
        }
    }

    /// Write the code for symbol and then teach the tree about it. A symbol seen for the
    /// first time is written as the NYT code followed by its 8 bit value.
    pub fn encode_symbol(&mut self, symbol: u8, bw: &mut BitWriter) {
        match self.tree.code_for(symbol) {
            Some(code) => bw.out_bits(&code),
            None => {
                trace!("{} new symbol {}", bw.loc(), symbol);
                bw.out_bits(&self.tree.nyt_code());
                bw.out8(symbol);
                // A literal that looks like the end marker says it is data.
                if symbol == ESCAPED_LITERAL {
                    bw.out_bit(MORE_DATA);
                }
            }
        }
        self.tree.update(symbol);
    }

    /// Write the end of stream marker and pad the final byte with zeros.
    pub fn flush(&mut self, bw: &mut BitWriter) {
        bw.out_bits(&self.tree.nyt_code());
        bw.out8(ESCAPED_LITERAL);
        bw.out_bit(END_OF_STREAM);
        bw.flush();
    }

    pub fn tree(&self) -> &VitterTree {
        &self.tree
    }
}
