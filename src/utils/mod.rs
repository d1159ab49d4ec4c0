//! General-purpose utility modules.

pub mod error;
pub mod read_ext;

// Re-export commonly used items
pub use error::{ArchiveError, Result};
pub use read_ext::ReadChunkExt;
