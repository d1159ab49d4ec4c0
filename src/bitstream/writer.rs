// src/bitstream/writer.rs

//! Bit-level payload writer.

use crate::huffman::CodeTable;
use crate::utils::error::{ArchiveError, Result};
use bitvec::order::Msb0;
use bitvec::slice::BitSlice;
use log::trace;
use std::io::Write;

/// What is left once a payload has been fully written.
#[derive(Debug)]
pub struct PayloadEnd<W> {
    pub sink: W,
    /// Meaningful bits in the final payload byte, 1 through 8.
    pub last_byte_bits: u8,
    /// Payload bytes handed to the sink.
    pub byte_count: u64,
}

/// Packs codes MSB-first into bytes and hands full buffers to the sink.
///
/// Codes may straddle byte and buffer boundaries; the partial byte is
/// carried over between calls.
pub struct BitStreamEncoder<W: Write> {
    sink: W,
    current_byte: u8,
    bits_in_current: u8,
    buffer: Box<[u8]>,
    cursor: usize,
    bits_written: u64,
    bytes_flushed: u64,
}

impl<W: Write> BitStreamEncoder<W> {
    /// Creates an encoder with an output buffer of `buffer_size` bytes.
    pub fn new(sink: W, buffer_size: usize) -> Self {
        Self {
            sink,
            current_byte: 0,
            bits_in_current: 0,
            buffer: vec![0u8; buffer_size.max(1)].into_boxed_slice(),
            cursor: 0,
            bits_written: 0,
            bytes_flushed: 0,
        }
    }

    /// Writes a single bit.
    #[inline]
    pub fn push_bit(&mut self, bit: bool) -> Result<()> {
        if bit {
            self.current_byte |= 1 << (7 - self.bits_in_current);
        }
        self.bits_in_current += 1;
        self.bits_written += 1;

        if self.bits_in_current == 8 {
            let byte = self.current_byte;
            self.current_byte = 0;
            self.bits_in_current = 0;
            self.push_byte(byte)?;
        }
        Ok(())
    }

    /// Writes bits in order, first bit into the highest free position.
    pub fn push_bits(&mut self, bits: &BitSlice<u8, Msb0>) -> Result<()> {
        for bit in bits.iter().by_vals() {
            self.push_bit(bit)?;
        }
        Ok(())
    }

    /// Writes the code of `byte`.
    pub fn encode_byte(&mut self, table: &CodeTable, byte: u8) -> Result<()> {
        let code = table.code(byte).ok_or(ArchiveError::UnknownSymbol(byte))?;
        self.push_bits(code)
    }

    pub fn encode_all(&mut self, table: &CodeTable, data: &[u8]) -> Result<()> {
        for &byte in data {
            self.encode_byte(table, byte)?;
        }
        Ok(())
    }

    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    fn push_byte(&mut self, byte: u8) -> Result<()> {
        self.buffer[self.cursor] = byte;
        self.cursor += 1;
        if self.cursor == self.buffer.len() {
            self.flush_buffer()?;
        }
        Ok(())
    }

    fn flush_buffer(&mut self) -> Result<()> {
        if self.cursor > 0 {
            trace!("flushing {} payload bytes", self.cursor);
            self.sink.write_all(&self.buffer[..self.cursor])?;
            self.bytes_flushed += self.cursor as u64;
            self.cursor = 0;
        }
        Ok(())
    }

    /// Pads the last byte with zeros and flushes everything to the sink.
    ///
    /// Fails with [`ArchiveError::EmptyInput`] if no bit was ever written.
    pub fn finish(mut self) -> Result<PayloadEnd<W>> {
        if self.bits_written == 0 {
            return Err(ArchiveError::EmptyInput);
        }

        let last_byte_bits = if self.bits_in_current > 0 {
            let bits = self.bits_in_current;
            let byte = self.current_byte;
            self.bits_in_current = 0;
            self.current_byte = 0;
            self.push_byte(byte)?;
            bits
        } else {
            8
        };
        self.flush_buffer()?;
        self.sink.flush()?;

        Ok(PayloadEnd {
            sink: self.sink,
            last_byte_bits,
            byte_count: self.bytes_flushed,
        })
    }
}

/// Meaningful bits in the final byte of a payload of `bit_count` bits.
pub fn last_byte_bits(bit_count: u64) -> u8 {
    match bit_count % 8 {
        0 => 8,
        rem => rem as u8,
    }
}
