// src/archive/codec.rs

//! Whole-archive encoding and decoding.
//!
//! Archiving takes two passes over the source: one to count byte
//! frequencies, one to emit codes. Extraction is a single pass.

use crate::archive::config::CodecConfig;
use crate::archive::header::{ArchiveHeader, HEADER_LEN};
use crate::bitstream::{last_byte_bits, BitStreamDecoder, BitStreamEncoder};
use crate::huffman::shape::{count_leaves, unpack_bitmap};
use crate::huffman::{decode_shape, encode_shape, CodeTable, FrequencyTable, HuffmanTree};
use crate::utils::error::{ArchiveError, Result};
use crate::utils::read_ext::ReadChunkExt;
use log::debug;
use std::io::{self, Cursor, ErrorKind, Read, Seek, SeekFrom, Write};

/// Byte counts and tree details of one archiving run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    pub source_bytes: u64,
    pub archive_bytes: u64,
    pub tree_size: u16,
    pub distinct_bytes: usize,
    pub payload_bits: u64,
    pub last_byte_bits: u8,
}

/// Byte counts of one extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeSummary {
    pub archive_bytes: u64,
    pub output_bytes: u64,
    pub tree_size: u16,
}

#[derive(Debug, Clone, Default)]
pub struct ArchiveCodec {
    config: CodecConfig,
}

impl ArchiveCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Archives an in-memory buffer.
    pub fn encode(&self, source: &[u8]) -> Result<Vec<u8>> {
        let mut archive = Vec::new();
        self.encode_stream(&mut Cursor::new(source), &mut archive)?;
        Ok(archive)
    }

    /// Restores the original bytes of an in-memory archive.
    pub fn decode(&self, archive: &[u8]) -> Result<Vec<u8>> {
        let mut restored = Vec::new();
        self.decode_stream(&mut Cursor::new(archive), &mut restored)?;
        Ok(restored)
    }

    /// Archives everything from the current position of `source` to its end.
    ///
    /// The source is read once to count frequencies, rewound to where it
    /// started, and read again to emit the payload. The header goes out
    /// first, so the meaningful-bit count of the final byte is computed from
    /// the frequencies before any payload is written.
    pub fn encode_stream<R, W>(&self, source: &mut R, sink: &mut W) -> Result<EncodeSummary>
    where
        R: Read + Seek,
        W: Write,
    {
        let buffer_size = self.config.buffer_size;
        let start = source.stream_position()?;

        let frequencies = FrequencyTable::from_reader(source, buffer_size)?;
        let tree = HuffmanTree::from_frequencies(&frequencies)?;
        let shape = encode_shape(&tree);
        let codes = CodeTable::derive(&tree);
        let payload_bits = codes.payload_bit_count(&frequencies)?;
        let header = ArchiveHeader::new(shape.node_count, last_byte_bits(payload_bits))?;

        debug!(
            "archiving {} bytes: {} distinct, tree size {}, code lengths {}..={}, {} payload bits",
            frequencies.total(),
            frequencies.distinct(),
            header.tree_size,
            codes.minimum_code_length(),
            codes.maximum_code_length(),
            payload_bits
        );

        header.write_to(sink)?;
        let bitmap = shape.packed_bitmap();
        sink.write_all(&bitmap)?;
        sink.write_all(&shape.leaf_bytes)?;

        source.seek(SeekFrom::Start(start))?;
        let mut encoder = BitStreamEncoder::new(&mut *sink, buffer_size);
        let mut buffer = vec![0u8; buffer_size];
        loop {
            let read = source.read_chunk(&mut buffer)?;
            if read == 0 {
                break;
            }
            encoder.encode_all(&codes, &buffer[..read])?;
        }

        if encoder.bits_written() != payload_bits {
            return Err(ArchiveError::Io(io::Error::new(
                ErrorKind::InvalidData,
                "source changed between the frequency scan and the payload pass",
            )));
        }
        let end = encoder.finish()?;

        let archive_bytes =
            (HEADER_LEN + bitmap.len() + shape.leaf_bytes.len()) as u64 + end.byte_count;
        debug!(
            "archive is {} bytes, final byte carries {} bits",
            archive_bytes, end.last_byte_bits
        );

        Ok(EncodeSummary {
            source_bytes: frequencies.total(),
            archive_bytes,
            tree_size: header.tree_size,
            distinct_bytes: frequencies.distinct(),
            payload_bits,
            last_byte_bits: end.last_byte_bits,
        })
    }

    /// Reads an archive from `archive` and writes the original bytes to `sink`.
    pub fn decode_stream<R, W>(&self, archive: &mut R, sink: &mut W) -> Result<DecodeSummary>
    where
        R: Read,
        W: Write,
    {
        let header = ArchiveHeader::read_from(archive)?;
        let node_count = header.tree_size as usize;

        let mut packed = vec![0u8; header.bitmap_len()];
        archive.read_exact_or_malformed(&mut packed, "tree shape bitmap")?;
        let bitmap = unpack_bitmap(&packed, node_count);

        let mut leaf_bytes = vec![0u8; count_leaves(&bitmap, node_count)];
        archive.read_exact_or_malformed(&mut leaf_bytes, "leaf byte table")?;

        let tree = decode_shape(&bitmap, &leaf_bytes, node_count)?;
        let codes = CodeTable::derive(&tree);
        debug!(
            "extracting: tree size {}, {} symbols, code lengths {}..={}, final byte carries {} bits",
            header.tree_size,
            codes.len(),
            codes.minimum_code_length(),
            codes.maximum_code_length(),
            header.last_byte_bits
        );

        let mut decoder = BitStreamDecoder::new(
            &mut *sink,
            codes.decode_trie(),
            header.last_byte_bits,
            self.config.buffer_size,
            self.config.strict_padding,
        )?;
        let mut buffer = vec![0u8; self.config.buffer_size];
        loop {
            let read = archive.read_chunk(&mut buffer)?;
            if read == 0 {
                break;
            }
            decoder.feed(&buffer[..read])?;
        }
        let payload = decoder.finish()?;

        let archive_bytes = (HEADER_LEN + packed.len() + leaf_bytes.len()) as u64 + payload.bytes_in;
        debug!(
            "extracted {} bytes from a {} byte archive",
            payload.bytes_out, archive_bytes
        );

        Ok(DecodeSummary {
            archive_bytes,
            output_bytes: payload.bytes_out,
            tree_size: header.tree_size,
        })
    }
}
