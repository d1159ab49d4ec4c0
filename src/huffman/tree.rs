// src/huffman/tree.rs

//! Huffman tree construction.
//!
//! Leaves enter a min-priority queue in ascending byte order. The two lightest
//! entries are merged until one remains. Equal weights pop in insertion order,
//! so the same frequencies always produce the same tree.

use super::frequency::FrequencyTable;
use super::node::Node;
use crate::utils::error::{ArchiveError, Result};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// A Huffman tree with exactly one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

/// Priority queue entry; `seq` is the insertion number used to break weight ties.
struct QueueEntry {
    weight: u64,
    seq: u64,
    node: Node,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl HuffmanTree {
    /// Builds the tree for a non-empty frequency table.
    ///
    /// A table with a single distinct byte yields a lone leaf.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        if frequencies.is_empty() {
            return Err(ArchiveError::EmptyInput);
        }

        let mut heap = BinaryHeap::with_capacity(frequencies.distinct());
        let mut seq = 0u64;
        for (byte, count) in frequencies.iter() {
            heap.push(Reverse(QueueEntry {
                weight: count,
                seq,
                node: Node::leaf(byte, count),
            }));
            seq += 1;
        }

        while let Some(Reverse(first)) = heap.pop() {
            let Some(Reverse(second)) = heap.pop() else {
                return Ok(Self { root: first.node });
            };
            let node = Node::merge(first.node, second.node);
            heap.push(Reverse(QueueEntry {
                weight: node.weight(),
                seq,
                node,
            }));
            seq += 1;
        }

        Err(ArchiveError::EmptyInput)
    }

    /// Wraps an already built root, e.g. one rebuilt from an archive header.
    pub fn from_root(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// True when the source had a single distinct byte.
    pub fn is_degenerate(&self) -> bool {
        self.root.is_leaf()
    }
}
