// src/bitstream/reader.rs

//! Bit-level payload reader.

use crate::huffman::{DecodeTrie, Step};
use crate::utils::error::{ArchiveError, Result};
use log::trace;
use std::io::Write;

/// Summary of a fully decoded payload.
#[derive(Debug)]
pub struct DecodedPayload<W> {
    pub sink: W,
    /// Payload bytes consumed.
    pub bytes_in: u64,
    /// Original bytes written to the sink.
    pub bytes_out: u64,
}

/// Turns packed payload bytes back into the original bytes.
///
/// Payload arrives in chunks of any size. The most recent byte is always held
/// back because only [`finish`](Self::finish) knows it is the final one, and
/// only `last_byte_bits` of that byte carry data.
pub struct BitStreamDecoder<W: Write> {
    trie: DecodeTrie,
    sink: W,
    last_byte_bits: u8,
    strict_padding: bool,
    // Unmatched bits: where they lead in the trie and how many there are.
    node: usize,
    pending_bits: usize,
    held_byte: Option<u8>,
    out: Box<[u8]>,
    cursor: usize,
    bytes_in: u64,
    bytes_out: u64,
}

impl<W: Write> BitStreamDecoder<W> {
    pub fn new(
        sink: W,
        trie: DecodeTrie,
        last_byte_bits: u8,
        buffer_size: usize,
        strict_padding: bool,
    ) -> Result<Self> {
        if !(1..=8).contains(&last_byte_bits) {
            return Err(ArchiveError::malformed(format!(
                "final byte declares {} meaningful bits, expected 1 to 8",
                last_byte_bits
            )));
        }
        Ok(Self {
            trie,
            sink,
            last_byte_bits,
            strict_padding,
            node: DecodeTrie::ROOT,
            pending_bits: 0,
            held_byte: None,
            out: vec![0u8; buffer_size.max(1)].into_boxed_slice(),
            cursor: 0,
            bytes_in: 0,
            bytes_out: 0,
        })
    }

    /// Decodes a chunk of payload bytes.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<()> {
        for &byte in chunk {
            if let Some(previous) = self.held_byte.replace(byte) {
                self.decode_bits(previous, 8)?;
            }
        }
        Ok(())
    }

    fn decode_bits(&mut self, byte: u8, count: u8) -> Result<()> {
        self.bytes_in += 1;
        for i in 0..count {
            let bit = (byte >> (7 - i)) & 1 == 1;
            match self.trie.step(self.node, bit) {
                Step::Partial(next) => {
                    self.node = next;
                    self.pending_bits += 1;
                }
                Step::Symbol(symbol) => {
                    self.node = DecodeTrie::ROOT;
                    self.pending_bits = 0;
                    self.emit(symbol)?;
                }
                Step::Invalid => {
                    return Err(ArchiveError::corrupt(format!(
                        "bit {} of payload byte {} matches no code",
                        i, self.bytes_in
                    )));
                }
            }
        }
        Ok(())
    }

    fn emit(&mut self, symbol: u8) -> Result<()> {
        self.out[self.cursor] = symbol;
        self.cursor += 1;
        if self.cursor == self.out.len() {
            self.flush_out()?;
        }
        Ok(())
    }

    fn flush_out(&mut self) -> Result<()> {
        if self.cursor > 0 {
            trace!("flushing {} decoded bytes", self.cursor);
            self.sink.write_all(&self.out[..self.cursor])?;
            self.bytes_out += self.cursor as u64;
            self.cursor = 0;
        }
        Ok(())
    }

    /// Decodes the held-back final byte and flushes the sink.
    ///
    /// Fails with [`ArchiveError::CorruptPayload`] if there was no payload at
    /// all, if the final byte has non-zero padding while strict padding is on,
    /// or if the stream stops in the middle of a code.
    pub fn finish(mut self) -> Result<DecodedPayload<W>> {
        let Some(last) = self.held_byte.take() else {
            return Err(ArchiveError::corrupt("archive has no payload bytes"));
        };

        let padding_mask = 0xFFu8.checked_shr(self.last_byte_bits as u32).unwrap_or(0);
        if self.strict_padding && last & padding_mask != 0 {
            return Err(ArchiveError::corrupt(format!(
                "final byte {:#010b} has non-zero bits past its {} meaningful bits",
                last, self.last_byte_bits
            )));
        }
        self.decode_bits(last, self.last_byte_bits)?;

        if self.pending_bits > 0 {
            return Err(ArchiveError::corrupt(format!(
                "payload ends inside a code ({} unmatched bits)",
                self.pending_bits
            )));
        }

        self.flush_out()?;
        self.sink.flush()?;
        Ok(DecodedPayload {
            sink: self.sink,
            bytes_in: self.bytes_in,
            bytes_out: self.bytes_out,
        })
    }
}
