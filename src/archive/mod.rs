//! The archive container: header, prelude and payload orchestration.

pub mod codec;
pub mod config;
pub mod header;

pub use codec::{ArchiveCodec, DecodeSummary, EncodeSummary};
pub use config::{CodecConfig, DEFAULT_BUFFER_SIZE};
pub use header::{ArchiveHeader, HEADER_LEN};
