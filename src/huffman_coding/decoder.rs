use std::io::Read;

use log::trace;

use super::tree::VitterTree;
use super::{END_OF_STREAM, ESCAPED_LITERAL};
use crate::bitstream::bitreader::BitReader;
use crate::error::{Error, Result};

/// Adaptive huffman decoder. Rebuilds the encoder's tree from the symbols it decodes.
#[derive(Debug, Default)]
pub struct Decoder {
    tree: VitterTree,
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            tree: VitterTree::new(),
        }
    }

    /// Read the next symbol. Returns Ok(None) once the end of stream marker is found.
    /// Running out of bits before that is a truncated stream, unless the source itself failed.
    /// An escaped literal for a symbol the tree already holds is corrupt.
    pub fn decode_symbol<R: Read>(&mut self, br: &mut BitReader<R>) -> Result<Option<u8>> {
        // Walk down from the root until we land on a leaf.
        let mut node = self.tree.root();
        while !self.tree.node(node).is_leaf() {
            let right = br.bool_bit().ok_or_else(|| out_of_bits(br))?;
            node = self.tree.child(node, right).ok_or_else(|| {
                Error::CorruptStream(format!("internal node {} lost a child", node))
            })?;
        }

        let symbol = if node == self.tree.nyt() {
            let literal = br.byte().ok_or_else(|| out_of_bits(br))?;
            if literal == ESCAPED_LITERAL
                && br.bool_bit().ok_or_else(|| out_of_bits(br))? == END_OF_STREAM
            {
                trace!("{} end of stream", br.loc());
                return Ok(None);
            }
            // The encoder only escapes symbols it has never sent.
            if self.tree.contains(literal) {
                return Err(Error::CorruptStream(format!(
                    "literal {} at {} is already in the tree",
                    literal,
                    br.loc()
                )));
            }
            literal
        } else {
            self.tree.node(node).symbol.ok_or_else(|| {
                Error::CorruptStream(format!("decoded to unbound leaf {}", node))
            })?
        };

        self.tree.update(symbol);
        Ok(Some(symbol))
    }

    pub fn tree(&self) -> &VitterTree {
        &self.tree
    }
}

/// Error for a reader that came up empty: the source's own failure if it had one,
/// otherwise the stream ended too soon.
fn out_of_bits<R: Read>(br: &mut BitReader<R>) -> Error {
    br.take_error()
        .map(Error::Io)
        .unwrap_or(Error::TruncatedStream)
}

#[cfg(test)]
mod test {
    use std::io::{self, Read};

    use super::Decoder;
    use crate::bitstream::bitreader::BitReader;
    use crate::bitstream::bitwriter::BitWriter;
    use crate::error::Error;
    use crate::huffman_coding::encoder::Encoder;

    #[test]
    fn literal_then_code_test() {
        // 0x41 | 1 (code) | 0 (NYT) | 11111111 | 1 | padding
        let data = [0x41, 0b1011_1111, 0b1110_0000];
        let mut br = BitReader::new(data.as_slice());
        let mut dec = Decoder::new();
        assert_eq!(dec.decode_symbol(&mut br).unwrap(), Some(0x41));
        assert_eq!(dec.decode_symbol(&mut br).unwrap(), Some(0x41));
        assert_eq!(dec.decode_symbol(&mut br).unwrap(), None);
        assert_eq!(dec.tree().node(dec.tree().root()).weight, 2);
    }

    #[test]
    fn escaped_literal_test() {
        let data = [0xff, 0b0011_1111, 0b1110_0000];
        let mut br = BitReader::new(data.as_slice());
        let mut dec = Decoder::new();
        assert_eq!(dec.decode_symbol(&mut br).unwrap(), Some(0xff));
        assert_eq!(dec.decode_symbol(&mut br).unwrap(), None);
    }

    #[test]
    fn truncated_test() {
        let data = [0x41, 0b1011_1111];
        let mut br = BitReader::new(data.as_slice());
        let mut dec = Decoder::new();
        assert_eq!(dec.decode_symbol(&mut br).unwrap(), Some(0x41));
        assert_eq!(dec.decode_symbol(&mut br).unwrap(), Some(0x41));
        assert!(matches!(dec.decode_symbol(&mut br), Err(Error::TruncatedStream)));
    }

    #[test]
    fn empty_input_is_truncated_test() {
        let mut br = BitReader::new([].as_slice());
        let mut dec = Decoder::new();
        assert!(matches!(dec.decode_symbol(&mut br), Err(Error::TruncatedStream)));
    }

    #[test]
    fn known_literal_is_corrupt_test() {
        // 0x41 as a literal, then NYT (code 0) escaping 0x41 a second time.
        let mut bw = BitWriter::new(10);
        bw.out8(0x41);
        bw.out_bit(false);
        bw.out8(0x41);
        bw.out_bit(false);
        bw.out8(0xff);
        bw.out_bit(true);
        bw.flush();
        let mut br = BitReader::new(bw.output.as_slice());
        let mut dec = Decoder::new();
        assert_eq!(dec.decode_symbol(&mut br).unwrap(), Some(0x41));
        assert!(matches!(dec.decode_symbol(&mut br), Err(Error::CorruptStream(_))));
    }

    #[test]
    fn known_escaped_literal_is_corrupt_test() {
        // 255 sent as data, then escaped again as data instead of ending the stream.
        let mut bw = BitWriter::new(10);
        bw.out8(0xff);
        bw.out_bit(false);
        bw.out_bit(false);
        bw.out8(0xff);
        bw.out_bit(false);
        bw.flush();
        let mut br = BitReader::new(bw.output.as_slice());
        let mut dec = Decoder::new();
        assert_eq!(dec.decode_symbol(&mut br).unwrap(), Some(0xff));
        assert!(matches!(dec.decode_symbol(&mut br), Err(Error::CorruptStream(_))));
    }

    struct FailingSource;

    impl Read for FailingSource {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn source_error_is_reported_test() {
        let mut br = BitReader::new(FailingSource);
        let mut dec = Decoder::new();
        match dec.decode_symbol(&mut br) {
            Err(Error::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::Other),
            other => panic!("expected an io error, got {:?}", other),
        }
    }

    #[test]
    fn encoder_and_decoder_trees_match_test() {
        // Skewed pseudo random bytes, with every byte value (255 included) sent as data.
        let mut seed = 12345_u32;
        let mut data: Vec<u8> = (0..4000)
            .map(|_| {
                seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
                ((seed >> 16) % 7) as u8
            })
            .collect();
        data.extend(0..=255_u8);
        data.extend([255, 255, 0, 255]);

        let mut enc = Encoder::new();
        let mut bw = BitWriter::new(data.len());
        for &sym in &data {
            enc.encode_symbol(sym, &mut bw);
        }
        enc.flush(&mut bw);

        // Replay the encoder in step with the decoder and compare the trees every symbol.
        let mut mirror = Encoder::new();
        let mut scratch = BitWriter::new(data.len());
        let mut br = BitReader::new(bw.output.as_slice());
        let mut dec = Decoder::new();
        for &sym in &data {
            mirror.encode_symbol(sym, &mut scratch);
            assert_eq!(dec.decode_symbol(&mut br).unwrap(), Some(sym));
            assert_eq!(mirror.tree().nyt_code(), dec.tree().nyt_code());
            for s in 0..=255_u8 {
                assert_eq!(mirror.tree().code_for(s), dec.tree().code_for(s));
            }
        }
        assert_eq!(dec.decode_symbol(&mut br).unwrap(), None);
        assert_eq!(dec.tree().len(), 513);
        dec.tree().validate().unwrap();
    }
}
