//! Support code for the `par` binary.

pub mod args;
pub mod report;

pub use args::{Args, Invocation, ARCHIVE_EXTENSION, UNKNOWN_EXTENSION};
pub use report::{format_elapsed, format_size, summary_lines};
