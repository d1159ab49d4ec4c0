// src/archive/header.rs

//! The fixed archive header.
//!
//! ```text
//! offset 0  u16 BE  tree size (internal + leaf nodes)
//! offset 2  u8      meaningful bits in the final payload byte (1-8)
//! ```

use crate::huffman::MAX_NODE_COUNT;
use crate::utils::error::{ArchiveError, Result};
use crate::utils::read_ext::ReadChunkExt;
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use std::io::{Read, Write};

pub const HEADER_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
    pub tree_size: u16,
    pub last_byte_bits: u8,
}

impl ArchiveHeader {
    pub fn new(tree_size: usize, last_byte_bits: u8) -> Result<Self> {
        let tree_size = u16::try_from(tree_size).map_err(|_| {
            ArchiveError::malformed(format!("tree size {} does not fit in 16 bits", tree_size))
        })?;
        let header = Self {
            tree_size,
            last_byte_bits,
        };
        header.validate()?;
        Ok(header)
    }

    fn validate(&self) -> Result<()> {
        if self.tree_size == 0 || self.tree_size as usize > MAX_NODE_COUNT {
            return Err(ArchiveError::malformed(format!(
                "tree size {} is outside 1..={}",
                self.tree_size, MAX_NODE_COUNT
            )));
        }
        if !(1..=8).contains(&self.last_byte_bits) {
            return Err(ArchiveError::malformed(format!(
                "final byte declares {} meaningful bits, expected 1 to 8",
                self.last_byte_bits
            )));
        }
        Ok(())
    }

    /// Bytes taken by the shape bitmap that follows the header.
    pub fn bitmap_len(&self) -> usize {
        (self.tree_size as usize).div_ceil(8)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u16::<BigEndian>(self.tree_size)?;
        writer.write_u8(self.last_byte_bits)?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let mut bytes = [0u8; HEADER_LEN];
        reader.read_exact_or_malformed(&mut bytes, "header")?;
        let header = Self {
            tree_size: BigEndian::read_u16(&bytes[..2]),
            last_byte_bits: bytes[2],
        };
        header.validate()?;
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn writes_big_endian() {
        let mut out = Vec::new();
        ArchiveHeader::new(511, 3).unwrap().write_to(&mut out).unwrap();
        assert_eq!(out, vec![0x01, 0xFF, 0x03]);
    }

    #[test]
    fn reads_what_it_writes() {
        let header = ArchiveHeader::new(5, 1).unwrap();
        let mut out = Vec::new();
        header.write_to(&mut out).unwrap();
        assert_eq!(ArchiveHeader::read_from(&mut Cursor::new(out)).unwrap(), header);
        assert_eq!(header.bitmap_len(), 1);
        assert_eq!(ArchiveHeader::new(9, 8).unwrap().bitmap_len(), 2);
    }

    #[test]
    fn short_header_is_malformed() {
        let err = ArchiveHeader::read_from(&mut Cursor::new(vec![0u8, 5])).unwrap_err();
        assert!(matches!(err, ArchiveError::MalformedArchive(_)));
    }

    #[test]
    fn out_of_range_fields_are_malformed() {
        for bytes in [[0u8, 0, 1], [0, 5, 0], [0, 5, 9], [0x02, 0x00, 1]] {
            let err = ArchiveHeader::read_from(&mut Cursor::new(bytes.to_vec())).unwrap_err();
            assert!(matches!(err, ArchiveError::MalformedArchive(_)), "{bytes:?}");
        }
    }
}
