//! Huffman model: frequencies, tree construction, tree shape serialization
//! and per-byte codes.

pub mod code_table;
pub mod frequency;
pub mod node;
pub mod shape;
pub mod tree;

pub use code_table::{Code, CodeTable, DecodeTrie, Step};
pub use frequency::FrequencyTable;
pub use node::Node;
pub use shape::{decode_shape, encode_shape, TreeShape, MAX_NODE_COUNT};
pub use tree::HuffmanTree;
