// src/huffman/code_table.rs

//! Per-byte prefix codes and the bit-indexed trie used to decode them.

use super::frequency::FrequencyTable;
use super::node::Node;
use super::tree::HuffmanTree;
use crate::utils::error::{ArchiveError, Result};
use bitvec::order::Msb0;
use bitvec::prelude::*;

/// A code: the root-to-leaf path, 0 for a left turn and 1 for a right turn.
pub type Code = BitVec<u8, Msb0>;

/// Maps each byte of a tree to its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<Code>>,
    len: usize,
}

impl CodeTable {
    /// Collects the path to every leaf. A lone-leaf tree gets the code `0`.
    pub fn derive(tree: &HuffmanTree) -> Self {
        let mut table = Self {
            codes: vec![None; 256],
            len: 0,
        };
        match tree.root() {
            Node::Leaf { byte, .. } => table.insert(*byte, bitvec![u8, Msb0; 0]),
            root => table.collect(root, &mut Code::new()),
        }
        table
    }

    fn collect(&mut self, node: &Node, path: &mut Code) {
        match node {
            Node::Leaf { byte, .. } => self.insert(*byte, path.clone()),
            Node::Internal { left, right, .. } => {
                path.push(false);
                self.collect(left, path);
                path.pop();
                path.push(true);
                self.collect(right, path);
                path.pop();
            }
        }
    }

    fn insert(&mut self, byte: u8, code: Code) {
        if self.codes[byte as usize].replace(code).is_none() {
            self.len += 1;
        }
    }

    pub fn code(&self, byte: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.codes[byte as usize].as_deref()
    }

    /// Number of bytes that have a code.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes and their codes in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(byte, code)| code.as_deref().map(|c| (byte as u8, c)))
    }

    /// Length of the shortest code, 0 for an empty table.
    pub fn minimum_code_length(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).min().unwrap_or(0)
    }

    pub fn maximum_code_length(&self) -> usize {
        self.iter().map(|(_, code)| code.len()).max().unwrap_or(0)
    }

    /// Total payload bits needed to encode a source with these frequencies.
    pub fn payload_bit_count(&self, frequencies: &FrequencyTable) -> Result<u64> {
        frequencies.iter().try_fold(0u64, |total, (byte, count)| -> Result<u64> {
            let code = self.code(byte).ok_or(ArchiveError::UnknownSymbol(byte))?;
            Ok(total + count * code.len() as u64)
        })
    }

    /// Builds the inverse lookup used by the decoder.
    pub fn decode_trie(&self) -> DecodeTrie {
        let mut trie = DecodeTrie {
            nodes: vec![[Slot::Empty; 2]],
        };
        for (byte, code) in self.iter() {
            trie.insert(code, byte);
        }
        trie
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Empty,
    Branch(u32),
    Leaf(u8),
}

/// Result of feeding one bit to the trie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The bits so far are a proper prefix of some code; continue from this node.
    Partial(usize),
    /// The bits so far spell out a complete code.
    Symbol(u8),
    /// No code starts with the bits so far.
    Invalid,
}

/// Bit-indexed trie over a code table. Node 0 is the root.
#[derive(Debug, Clone)]
pub struct DecodeTrie {
    nodes: Vec<[Slot; 2]>,
}

impl DecodeTrie {
    pub const ROOT: usize = 0;

    fn insert(&mut self, code: &BitSlice<u8, Msb0>, byte: u8) {
        let Some((last, prefix)) = code.split_last() else {
            return;
        };
        let mut node = Self::ROOT;
        for bit in prefix.iter().by_vals() {
            node = match self.nodes[node][bit as usize] {
                Slot::Branch(next) => next as usize,
                _ => {
                    let next = self.nodes.len();
                    self.nodes.push([Slot::Empty; 2]);
                    self.nodes[node][bit as usize] = Slot::Branch(next as u32);
                    next
                }
            };
        }
        self.nodes[node][*last as usize] = Slot::Leaf(byte);
    }

    #[inline]
    pub fn step(&self, node: usize, bit: bool) -> Step {
        match self.nodes[node][bit as usize] {
            Slot::Branch(next) => Step::Partial(next as usize),
            Slot::Leaf(byte) => Step::Symbol(byte),
            Slot::Empty => Step::Invalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_for(data: &[u8]) -> (CodeTable, FrequencyTable) {
        let freqs = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::from_frequencies(&freqs).unwrap();
        (CodeTable::derive(&tree), freqs)
    }

    fn decode_all(trie: &DecodeTrie, bits: &BitSlice<u8, Msb0>) -> Vec<u8> {
        let mut out = Vec::new();
        let mut node = DecodeTrie::ROOT;
        for bit in bits.iter().by_vals() {
            match trie.step(node, bit) {
                Step::Partial(next) => node = next,
                Step::Symbol(byte) => {
                    out.push(byte);
                    node = DecodeTrie::ROOT;
                }
                Step::Invalid => panic!("invalid bit path"),
            }
        }
        assert_eq!(node, DecodeTrie::ROOT, "dangling bits");
        out
    }

    #[test]
    fn three_symbol_codes() {
        let (table, freqs) = table_for(b"AAABBC");
        assert_eq!(table.len(), 3);
        assert_eq!(table.code(b'A').unwrap(), bits![u8, Msb0; 0]);
        assert_eq!(table.code(b'C').unwrap(), bits![u8, Msb0; 1, 0]);
        assert_eq!(table.code(b'B').unwrap(), bits![u8, Msb0; 1, 1]);
        assert!(table.code(b'D').is_none());
        assert_eq!(table.minimum_code_length(), 1);
        assert_eq!(table.maximum_code_length(), 2);
        // 3 * 1 + 2 * 2 + 1 * 2
        assert_eq!(table.payload_bit_count(&freqs).unwrap(), 9);
    }

    #[test]
    fn degenerate_code_is_single_zero() {
        let (table, freqs) = table_for(&[9u8; 20]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.code(9).unwrap(), bits![u8, Msb0; 0]);
        assert_eq!(table.payload_bit_count(&freqs).unwrap(), 20);

        let trie = table.decode_trie();
        assert_eq!(trie.step(DecodeTrie::ROOT, false), Step::Symbol(9));
        assert_eq!(trie.step(DecodeTrie::ROOT, true), Step::Invalid);
    }

    #[test]
    fn codes_are_prefix_free() {
        let data: Vec<u8> = (0..10_000u32).map(|i| ((i * 7919) % 211 % 61) as u8).collect();
        let (table, _) = table_for(&data);
        let codes: Vec<_> = table.iter().collect();
        for (a, code_a) in &codes {
            for (b, code_b) in &codes {
                if a != b {
                    assert!(
                        !code_b.starts_with(code_a),
                        "code of {a} is a prefix of code of {b}"
                    );
                }
            }
        }
    }

    #[test]
    fn trie_inverts_the_table() {
        let data = b"abracadabra, said the magician";
        let (table, _) = table_for(data);
        let mut bits = Code::new();
        for &byte in data {
            bits.extend_from_bitslice(table.code(byte).unwrap());
        }
        assert_eq!(decode_all(&table.decode_trie(), &bits), data.to_vec());
    }

    #[test]
    fn unknown_byte_in_frequencies_is_reported() {
        let (table, _) = table_for(b"xy");
        let err = table
            .payload_bit_count(&FrequencyTable::from_bytes(b"xyz"))
            .unwrap_err();
        assert!(matches!(err, ArchiveError::UnknownSymbol(b'z')));
    }
}
