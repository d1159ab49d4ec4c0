// src/huffman/node.rs

//! Huffman tree nodes.

/// Node in a Huffman tree.
///
/// Internal nodes own both children, so a tree is always acyclic and every
/// internal node has exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        byte: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(byte: u8, weight: u64) -> Self {
        Node::Leaf { byte, weight }
    }

    /// Joins two subtrees under a new internal node; `left` takes the 0 branch.
    pub fn merge(left: Node, right: Node) -> Self {
        let weight = left.weight() + right.weight();
        Node::Internal {
            weight,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Total number of nodes (internal and leaf) in this subtree.
    pub fn node_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => 1 + left.node_count() + right.node_count(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_sums_weights_and_keeps_order() {
        let node = Node::merge(Node::leaf(b'c', 1), Node::leaf(b'b', 2));
        assert_eq!(node.weight(), 3);
        match &node {
            Node::Internal { left, right, .. } => {
                assert_eq!(**left, Node::leaf(b'c', 1));
                assert_eq!(**right, Node::leaf(b'b', 2));
            }
            Node::Leaf { .. } => panic!("merge must produce an internal node"),
        }
    }

    #[test]
    fn counts_and_depth() {
        let leaf = Node::leaf(7, 10);
        assert!(leaf.is_leaf());
        assert_eq!(leaf.node_count(), 1);
        assert_eq!(leaf.depth(), 0);

        let tree = Node::merge(
            Node::leaf(b'a', 3),
            Node::merge(Node::leaf(b'c', 1), Node::leaf(b'b', 2)),
        );
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.weight(), 6);
    }
}
