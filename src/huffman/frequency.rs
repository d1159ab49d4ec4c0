// src/huffman/frequency.rs

//! Byte frequency analysis.

use crate::utils::error::Result;
use crate::utils::read_ext::ReadChunkExt;
use std::io::Read;

/// Occurrence count of every byte value seen in a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.update(data);
        table
    }

    /// Scans a reader to the end, `buffer_size` bytes at a time.
    pub fn from_reader<R: Read>(reader: &mut R, buffer_size: usize) -> Result<Self> {
        let mut table = Self::new();
        let mut buffer = vec![0u8; buffer_size.max(1)];
        loop {
            let len = reader.read_chunk(&mut buffer)?;
            if len == 0 {
                break;
            }
            table.update(&buffer[..len]);
        }
        Ok(table)
    }

    /// Adds every byte of `chunk` to the counts.
    pub fn update(&mut self, chunk: &[u8]) {
        for &byte in chunk {
            self.counts[byte as usize] += 1;
        }
    }

    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Number of distinct byte values seen.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Number of bytes scanned.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Seen bytes with their counts, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(byte, count)| (byte as u8, *count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn counts_each_byte() {
        let table = FrequencyTable::from_bytes(b"AAABBC");
        assert_eq!(table.count(b'A'), 3);
        assert_eq!(table.count(b'B'), 2);
        assert_eq!(table.count(b'C'), 1);
        assert_eq!(table.count(b'D'), 0);
        assert_eq!(table.distinct(), 3);
        assert_eq!(table.total(), 6);
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![(b'A', 3), (b'B', 2), (b'C', 1)]
        );
    }

    #[test]
    fn reader_scan_matches_slice_scan_for_any_buffer_size() {
        let data: Vec<u8> = (0..5000u32).map(|i| (i * 31 % 251) as u8).collect();
        let expected = FrequencyTable::from_bytes(&data);
        for buffer_size in [1, 7, 4096, 1 << 15] {
            let table = FrequencyTable::from_reader(&mut Cursor::new(&data), buffer_size).unwrap();
            assert_eq!(table, expected);
        }
    }

    #[test]
    fn empty_source_gives_empty_table() {
        let table = FrequencyTable::from_reader(&mut Cursor::new(Vec::<u8>::new()), 16).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.iter().count(), 0);
    }
}
