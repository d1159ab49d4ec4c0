//! An extension trait for `std::io::Read` with the two read patterns the
//! archive code needs: chunked reads that survive interruption, and exact
//! reads where running out of input means a malformed archive.

use crate::utils::error::{ArchiveError, Result};
use std::io::{self, ErrorKind, Read};

pub trait ReadChunkExt: Read {
    /// Reads up to `buf.len()` bytes, retrying on `Interrupted`. Returns 0 only at end of input.
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Fills `buf` completely. End of input turns into a `MalformedArchive`
    /// error naming `what` was being read; other I/O errors pass through.
    fn read_exact_or_malformed(&mut self, buf: &mut [u8], what: &str) -> Result<()>;
}

impl<R: Read + ?Sized> ReadChunkExt for R {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.read(buf) {
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }

    fn read_exact_or_malformed(&mut self, buf: &mut [u8], what: &str) -> Result<()> {
        match self.read_exact(buf) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(ArchiveError::malformed(
                format!("archive ends before the {} ({} bytes expected)", what, buf.len()),
            )),
            Err(e) => Err(e.into()),
        }
    }
}
