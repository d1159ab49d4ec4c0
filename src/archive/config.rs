// src/archive/config.rs

use crate::utils::error::{ArchiveError, Result};

/// Default size of every read and write buffer: 32 KiB.
pub const DEFAULT_BUFFER_SIZE: usize = 32 * 1024;

/// Settings shared by archiving and extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Size of the input chunks and output buffers, in bytes (default: 32 KiB).
    /// Has no effect on the archive bytes.
    pub buffer_size: usize,
    /// Reject archives whose final payload byte has non-zero padding (default: true).
    pub strict_padding: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            strict_padding: true,
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_strict_padding(mut self, strict_padding: bool) -> Self {
        self.strict_padding = strict_padding;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(ArchiveError::InvalidConfig(
                "buffer size must be at least one byte".to_string(),
            ));
        }
        Ok(())
    }
}
