//! A Huffman file archiver.
//!
//! Builds one static Huffman code per file, stores the tree shape compactly
//! in the archive header and streams the bit-packed payload behind it.
//!
//! # Quick Start
//!
//! ```
//! use huffman_archiver::ArchiveCodec;
//!
//! let codec = ArchiveCodec::new();
//! let archive = codec.encode(b"AAABBC")?;
//! assert_eq!(&archive[..3], &[0x00, 0x05, 0x01]);
//! assert_eq!(codec.decode(&archive)?, b"AAABBC");
//! # Ok::<(), huffman_archiver::ArchiveError>(())
//! ```
//!
//! # Archive layout
//!
//! | bytes | field |
//! |---|---|
//! | 2 | tree size (internal + leaf nodes), big-endian |
//! | 1 | meaningful bits in the final payload byte (1-8) |
//! | ceil(tree size / 8) | pre-order shape bitmap, 1 = internal, 0 = leaf |
//! | leaf count | leaf byte values in pre-order |
//! | rest | payload, MSB-first, final byte zero-padded |
//!
//! # Modules
//!
//! - [`huffman`]: frequencies, tree construction, shape serialization, code tables
//! - [`bitstream`]: streaming bit packing and unpacking
//! - [`archive`]: header and whole-archive encode/decode
//! - [`files`]: file-to-file operations, including empty files
//! - [`cli`]: argument resolution and reporting for the `par` binary

pub mod archive;
pub mod bitstream;
pub mod cli;
pub mod files;
pub mod huffman;
pub mod utils;

pub use archive::{ArchiveCodec, CodecConfig, DecodeSummary, EncodeSummary};
pub use files::{compress_file, extract_file, Operation, OperationStats};
pub use utils::error::{ArchiveError, Result};
