//! BitReader: reads a packed bitstream, most significant bit first.
//!
//! NOTE: This module can read from any I/O source that supports the read() call. A read
//! error ends the data like end of file does, and is kept for take_error().
//!
use log::debug;

const BUFFER_SIZE: usize = 64 * 1024;
const BIT_MASK: u8 = 0x80;

/// Reads a vitzip compressed bitstream.
#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    source: R,
    error: Option<std::io::Error>,
}

impl<R: std::io::Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            bit_index: 0,
            source,
            error: None,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more.
    fn have_data(&mut self) -> bool {
        // Only try to read more data when the buffer length is equal to the buffer cursor location
        if self.cursor == self.buffer.len() {
            // A source that already failed stays failed.
            if self.error.is_some() {
                return false;
            }
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        debug!("Unable to read source data: {}", e);
                        self.error = Some(e);
                        break 0;
                    }
                }
            };
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                self.buffer.truncate(0);
                self.cursor = 0;
                return false;
            }
            // Adjust the buffer if we read less than the buffer size
            self.buffer.truncate(size);
            // Reset the cursor and bit index
            self.cursor = 0;
            self.bit_index = 0;
        }
        true
    }

    /// Hand back the error that stopped the source, if a read failed rather than ran dry.
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }

    /// Return bit as Option<usize> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<usize> {
        // If bit_index is == 0, check if we have a byte to read. Return None if we have no data
        if self.bit_index == 0 && !self.have_data() {
            return None;
        }
        let bit = (self.buffer[self.cursor] & (BIT_MASK >> self.bit_index)) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Some(bit as usize)
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Return Option<usize> of the next n bits, or None if the data runs out first.
    pub fn bint(&mut self, n: usize) -> Option<usize> {
        (0..n).try_fold(0_usize, |acc, _| self.bit().map(|bit| acc << 1 | bit))
    }

    /// Returns a byte as an Option<u8>, or None if there is no more data to read. This is
    /// a convenience function, and calls bint(8).
    pub fn byte(&mut self) -> Option<u8> {
        self.bint(8).map(|byte| byte as u8)
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}
