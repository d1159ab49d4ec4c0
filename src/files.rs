// src/files.rs

//! File-to-file archiving and extraction.
//!
//! Zero-length inputs bypass the codec in both directions and produce a
//! zero-length output. When the codec fails, the partially written output
//! file is removed.

use crate::archive::{ArchiveCodec, DecodeSummary, EncodeSummary};
use crate::utils::error::{ArchiveError, Result};
use log::{debug, warn};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Archive,
    Extract,
}

/// Sizes and timing of one file operation.
#[derive(Debug, Clone, Copy)]
pub struct OperationStats {
    pub operation: Operation,
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub elapsed: Duration,
}

impl OperationStats {
    /// Output size as a percentage of input size. An empty input counts as 100%.
    pub fn ratio_percent(&self) -> f64 {
        if self.input_bytes == 0 {
            100.0
        } else {
            self.output_bytes as f64 * 100.0 / self.input_bytes as f64
        }
    }
}

/// Archives `input` into `output`, replacing `output` if it exists.
pub fn compress_file(codec: &ArchiveCodec, input: &Path, output: &Path) -> Result<OperationStats> {
    run(Operation::Archive, codec, input, output)
}

/// Extracts the archive `input` into `output`, replacing `output` if it exists.
pub fn extract_file(codec: &ArchiveCodec, input: &Path, output: &Path) -> Result<OperationStats> {
    run(Operation::Extract, codec, input, output)
}

pub fn run(
    operation: Operation,
    codec: &ArchiveCodec,
    input: &Path,
    output: &Path,
) -> Result<OperationStats> {
    let started = Instant::now();
    let mut source = File::open(input)?;
    let input_bytes = source.metadata()?.len();

    // Creating the output would truncate the input before it is read.
    if let Ok(existing) = fs::canonicalize(output) {
        if existing == fs::canonicalize(input)? {
            return Err(ArchiveError::SameFile(existing));
        }
    }

    if input_bytes == 0 {
        debug!("{} is empty, writing an empty {}", input.display(), output.display());
        File::create(output)?;
        return Ok(OperationStats {
            operation,
            input_bytes: 0,
            output_bytes: 0,
            elapsed: started.elapsed(),
        });
    }

    let sink = File::create(output)?;
    let mut writer = BufWriter::with_capacity(codec.config().buffer_size, sink);
    let result = match operation {
        Operation::Archive => codec
            .encode_stream(&mut source, &mut writer)
            .map(|EncodeSummary { archive_bytes, .. }| archive_bytes),
        Operation::Extract => codec
            .decode_stream(&mut source, &mut writer)
            .map(|DecodeSummary { output_bytes, .. }| output_bytes),
    }
    .and_then(|written| {
        writer.flush()?;
        Ok(written)
    });

    match result {
        Ok(output_bytes) => Ok(OperationStats {
            operation,
            input_bytes,
            output_bytes,
            elapsed: started.elapsed(),
        }),
        Err(err) => {
            drop(writer);
            if let Err(remove_err) = fs::remove_file(output) {
                warn!(
                    "could not remove partial output {}: {}",
                    output.display(),
                    remove_err
                );
            } else {
                warn!("removed partial output {} after: {}", output.display(), err);
            }
            Err(err)
        }
    }
}
