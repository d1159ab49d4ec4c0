// src/huffman/shape.rs

//! Tree shape serialization.
//!
//! The archive stores a tree as a pre-order bitmap (1 = internal, 0 = leaf,
//! left subtree before right) followed by the leaf bytes in the order their
//! 0-bits appear. Weights are not stored.

use super::node::Node;
use super::tree::HuffmanTree;
use crate::utils::error::{ArchiveError, Result};
use bitvec::order::Msb0;
use bitvec::prelude::*;

/// Largest possible node count: 256 leaves and 255 internal nodes.
pub const MAX_NODE_COUNT: usize = 511;

/// The header-level description of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeShape {
    pub bitmap: BitVec<u8, Msb0>,
    pub leaf_bytes: Vec<u8>,
    pub node_count: usize,
}

impl TreeShape {
    /// Bitmap packed MSB-first into `ceil(node_count / 8)` bytes, unused low bits zero.
    pub fn packed_bitmap(&self) -> Vec<u8> {
        pack_bitmap(&self.bitmap)
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_bytes.len()
    }
}

/// Walks the tree in pre-order and records its shape and leaf bytes.
pub fn encode_shape(tree: &HuffmanTree) -> TreeShape {
    let mut shape = TreeShape {
        bitmap: BitVec::with_capacity(tree.node_count()),
        leaf_bytes: Vec::with_capacity(tree.leaf_count()),
        node_count: 0,
    };
    visit(tree.root(), &mut shape);
    shape
}

fn visit(node: &Node, shape: &mut TreeShape) {
    shape.node_count += 1;
    match node {
        Node::Leaf { byte, .. } => {
            shape.bitmap.push(false);
            shape.leaf_bytes.push(*byte);
        }
        Node::Internal { left, right, .. } => {
            shape.bitmap.push(true);
            visit(left, shape);
            visit(right, shape);
        }
    }
}

/// Rebuilds a tree from the first `node_count` bits of `bitmap`.
///
/// Internal nodes wait on a stack until both children are complete. A stack
/// slot holds `None` while the left child is still being read and
/// `Some(left)` while the right child is.
pub fn decode_shape(
    bitmap: &BitSlice<u8, Msb0>,
    leaf_bytes: &[u8],
    node_count: usize,
) -> Result<HuffmanTree> {
    if node_count == 0 {
        return Err(ArchiveError::malformed("tree size is zero"));
    }
    if node_count > MAX_NODE_COUNT {
        return Err(ArchiveError::malformed(format!(
            "tree size {} exceeds the maximum of {}",
            node_count, MAX_NODE_COUNT
        )));
    }
    if bitmap.len() < node_count {
        return Err(ArchiveError::malformed(format!(
            "shape bitmap holds {} bits but the tree has {} nodes",
            bitmap.len(),
            node_count
        )));
    }

    let mut pending: Vec<Option<Node>> = Vec::new();
    let mut leaves = leaf_bytes.iter();
    let mut seen = [false; 256];
    let mut root = None;

    for (index, is_internal) in bitmap[..node_count].iter().by_vals().enumerate() {
        if root.is_some() {
            return Err(ArchiveError::malformed(format!(
                "tree is complete after {} nodes but the header declares {}",
                index, node_count
            )));
        }

        if is_internal {
            pending.push(None);
            continue;
        }

        let &byte = leaves.next().ok_or_else(|| {
            ArchiveError::malformed(format!(
                "leaf bytes exhausted at node {} of {}",
                index + 1,
                node_count
            ))
        })?;
        if std::mem::replace(&mut seen[byte as usize], true) {
            return Err(ArchiveError::malformed(format!(
                "leaf byte {:#04x} appears twice",
                byte
            )));
        }

        // Hang the finished subtree on its parent, closing every parent it completes.
        let mut finished = Node::leaf(byte, 0);
        loop {
            match pending.last_mut() {
                None => {
                    root = Some(finished);
                    break;
                }
                Some(slot) => match slot.take() {
                    None => {
                        *slot = Some(finished);
                        break;
                    }
                    Some(left) => {
                        pending.pop();
                        finished = Node::merge(left, finished);
                    }
                },
            }
        }
    }

    let Some(root) = root else {
        return Err(ArchiveError::malformed(format!(
            "{} internal nodes are still missing children after {} nodes",
            pending.len(),
            node_count
        )));
    };
    let trailing = leaves.len();
    if trailing > 0 {
        return Err(ArchiveError::malformed(format!(
            "{} leaf bytes left unused by the tree shape",
            trailing
        )));
    }

    Ok(HuffmanTree::from_root(root))
}

pub fn pack_bitmap(bitmap: &BitSlice<u8, Msb0>) -> Vec<u8> {
    let mut packed = bitmap.to_bitvec();
    packed.set_uninitialized(false);
    packed.into_vec()
}

/// Reads `node_count` bits from packed bitmap bytes.
pub fn unpack_bitmap(bytes: &[u8], node_count: usize) -> BitVec<u8, Msb0> {
    let mut bitmap = BitVec::<u8, Msb0>::from_slice(bytes);
    bitmap.truncate(node_count);
    bitmap
}

/// Number of leaves (0-bits) among the first `node_count` bits.
pub fn count_leaves(bitmap: &BitSlice<u8, Msb0>, node_count: usize) -> usize {
    let end = node_count.min(bitmap.len());
    bitmap[..end].count_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::frequency::FrequencyTable;

    fn tree_for(data: &[u8]) -> HuffmanTree {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(data)).unwrap()
    }

    /// Trees rebuilt from a shape carry no weights; compare structure only.
    fn same_shape(a: &Node, b: &Node) -> bool {
        match (a, b) {
            (Node::Leaf { byte: x, .. }, Node::Leaf { byte: y, .. }) => x == y,
            (
                Node::Internal { left: l1, right: r1, .. },
                Node::Internal { left: l2, right: r2, .. },
            ) => same_shape(l1, l2) && same_shape(r1, r2),
            _ => false,
        }
    }

    #[test]
    fn shape_of_three_symbol_tree() {
        let shape = encode_shape(&tree_for(b"AAABBC"));
        assert_eq!(shape.node_count, 5);
        assert_eq!(shape.bitmap.as_bitslice(), bits![u8, Msb0; 1, 0, 1, 0, 0]);
        assert_eq!(shape.leaf_bytes, b"ACB");
        assert_eq!(shape.packed_bitmap(), vec![0b1010_0000]);
    }

    #[test]
    fn degenerate_shape_is_one_zero_bit() {
        let shape = encode_shape(&tree_for(b"qqqq"));
        assert_eq!(shape.node_count, 1);
        assert_eq!(shape.bitmap.as_bitslice(), bits![u8, Msb0; 0]);
        assert_eq!(shape.leaf_bytes, b"q");
        assert_eq!(shape.packed_bitmap(), vec![0]);
    }

    #[test]
    fn decode_rebuilds_the_encoded_tree() {
        let data: Vec<u8> = (0..3000u32).map(|i| ((i * i) % 97) as u8).collect();
        let tree = tree_for(&data);
        let shape = encode_shape(&tree);
        let packed = shape.packed_bitmap();
        assert_eq!(packed.len(), shape.node_count.div_ceil(8));

        let bitmap = unpack_bitmap(&packed, shape.node_count);
        assert_eq!(count_leaves(&bitmap, shape.node_count), shape.leaf_count());
        let rebuilt = decode_shape(&bitmap, &shape.leaf_bytes, shape.node_count).unwrap();
        assert!(same_shape(tree.root(), rebuilt.root()));
        assert_eq!(rebuilt.node_count(), shape.node_count);
    }

    #[test]
    fn decode_single_leaf() {
        let tree = decode_shape(bits![u8, Msb0; 0], b"x", 1).unwrap();
        assert_eq!(tree.root(), &Node::leaf(b'x', 0));
    }

    #[test]
    fn rejects_missing_leaf_bytes() {
        let err = decode_shape(bits![u8, Msb0; 1, 0, 1, 0, 0], b"AC", 5).unwrap_err();
        assert!(matches!(err, ArchiveError::MalformedArchive(_)));
    }

    #[test]
    fn rejects_trailing_leaf_bytes() {
        let err = decode_shape(bits![u8, Msb0; 1, 0, 0], b"ABC", 3).unwrap_err();
        assert!(matches!(err, ArchiveError::MalformedArchive(_)));
    }

    #[test]
    fn rejects_short_bitmap() {
        let err = decode_shape(bits![u8, Msb0; 1, 0], b"AB", 3).unwrap_err();
        assert!(matches!(err, ArchiveError::MalformedArchive(_)));
    }

    #[test]
    fn rejects_unfinished_tree() {
        // Two internal nodes and two leaves leave the root without a right child.
        let err = decode_shape(bits![u8, Msb0; 1, 1, 0, 0], b"AB", 4).unwrap_err();
        assert!(matches!(err, ArchiveError::MalformedArchive(_)));
    }

    #[test]
    fn rejects_nodes_after_completion() {
        let err = decode_shape(bits![u8, Msb0; 1, 0, 0, 0], b"ABC", 4).unwrap_err();
        assert!(matches!(err, ArchiveError::MalformedArchive(_)));
    }

    #[test]
    fn rejects_duplicate_leaves_and_zero_size() {
        let err = decode_shape(bits![u8, Msb0; 1, 0, 0], b"AA", 3).unwrap_err();
        assert!(matches!(err, ArchiveError::MalformedArchive(_)));
        let err = decode_shape(bits![u8, Msb0; 0], b"", 0).unwrap_err();
        assert!(matches!(err, ArchiveError::MalformedArchive(_)));
    }
}
