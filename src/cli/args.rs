// src/cli/args.rs

//! Command-line arguments and the rules that turn them into an operation
//! with concrete input and output paths.

use crate::files::Operation;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension given to archives.
pub const ARCHIVE_EXTENSION: &str = "par";
/// Extension given to extracted files whose original type is unknown.
pub const UNKNOWN_EXTENSION: &str = "uar";

const DEFAULT_INPUT: &str = "test.txt";

#[derive(Parser, Debug)]
#[command(name = "par", version, about = "Huffman file archiver", long_about = None)]
pub struct Args {
    /// Archive INPUT into OUTPUT
    #[arg(short = 'a', visible_short_alias = 'A', conflicts_with = "unarchive", requires = "output")]
    pub archive: bool,
    /// Unarchive INPUT into OUTPUT
    #[arg(short = 'u', visible_short_alias = 'U', requires = "output")]
    pub unarchive: bool,
    /// File to read (default: test.txt)
    pub input: Option<PathBuf>,
    /// File to write; derived from INPUT when omitted
    pub output: Option<PathBuf>,
}

/// A fully resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub operation: Operation,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Args {
    /// Picks the operation and fills in any missing output path.
    ///
    /// Without a flag the input's extension decides: `.par` means unarchive.
    pub fn resolve(&self) -> Result<Invocation, clap::Error> {
        let flagged = match (self.archive, self.unarchive) {
            (true, _) => Some(Operation::Archive),
            (false, true) => Some(Operation::Extract),
            (false, false) => None,
        };

        match (flagged, &self.input, &self.output) {
            (Some(operation), Some(input), Some(output)) => Ok(Invocation {
                operation,
                input: input.clone(),
                output: output.clone(),
            }),
            (Some(_), _, _) => Err(Args::command().error(
                ErrorKind::MissingRequiredArgument,
                "-a and -u need both an input and an output file",
            )),
            (None, Some(input), Some(output)) => Ok(resolve_pair(input, output)),
            (None, Some(input), None) => Ok(resolve_single(input)),
            (None, None, _) => Ok(Invocation {
                operation: Operation::Archive,
                input: PathBuf::from(DEFAULT_INPUT),
                output: with_appended_extension(Path::new(DEFAULT_INPUT), ARCHIVE_EXTENSION),
            }),
        }
    }
}

fn resolve_pair(input: &Path, output: &Path) -> Invocation {
    let (operation, fallback) = if is_archive(input) {
        (Operation::Extract, UNKNOWN_EXTENSION)
    } else {
        (Operation::Archive, ARCHIVE_EXTENSION)
    };
    let output = if output.extension().is_some() {
        output.to_path_buf()
    } else {
        with_appended_extension(output, fallback)
    };
    Invocation {
        operation,
        input: input.to_path_buf(),
        output,
    }
}

fn resolve_single(input: &Path) -> Invocation {
    if !is_archive(input) {
        return Invocation {
            operation: Operation::Archive,
            input: input.to_path_buf(),
            output: with_appended_extension(input, ARCHIVE_EXTENSION),
        };
    }

    // "notes.txt.par" -> "notes.txt", "notes.par" -> "notes.uar"
    let stripped = input.with_extension("");
    let output = if stripped.extension().is_some() {
        stripped
    } else {
        input.with_extension(UNKNOWN_EXTENSION)
    };
    Invocation {
        operation: Operation::Extract,
        input: input.to_path_buf(),
        output,
    }
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
}

fn with_appended_extension(path: &Path, extension: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(argv: &[&str]) -> Result<Invocation, clap::Error> {
        let args = Args::try_parse_from(std::iter::once("par").chain(argv.iter().copied()))?;
        args.resolve()
    }

    #[rstest]
    #[case(&[], Operation::Archive, "test.txt", "test.txt.par")]
    #[case(&["-a", "in.bin", "out"], Operation::Archive, "in.bin", "out")]
    #[case(&["-u", "in.bin", "out.txt"], Operation::Extract, "in.bin", "out.txt")]
    #[case(&["-A", "in.bin", "out"], Operation::Archive, "in.bin", "out")]
    #[case(&["-U", "in.par", "out.txt"], Operation::Extract, "in.par", "out.txt")]
    #[case(&["notes.txt", "packed"], Operation::Archive, "notes.txt", "packed.par")]
    #[case(&["notes.txt", "packed.zip"], Operation::Archive, "notes.txt", "packed.zip")]
    #[case(&["notes.par", "plain"], Operation::Extract, "notes.par", "plain.uar")]
    #[case(&["notes.PAR", "plain.md"], Operation::Extract, "notes.PAR", "plain.md")]
    #[case(&["notes.txt"], Operation::Archive, "notes.txt", "notes.txt.par")]
    #[case(&["README"], Operation::Archive, "README", "README.par")]
    #[case(&["notes.txt.par"], Operation::Extract, "notes.txt.par", "notes.txt")]
    #[case(&["notes.par"], Operation::Extract, "notes.par", "notes.uar")]
    fn resolves_paths(
        #[case] argv: &[&str],
        #[case] operation: Operation,
        #[case] input: &str,
        #[case] output: &str,
    ) {
        let invocation = parse(argv).unwrap();
        assert_eq!(invocation.operation, operation);
        assert_eq!(invocation.input, PathBuf::from(input));
        assert_eq!(invocation.output, PathBuf::from(output));
    }

    #[rstest]
    #[case(&["-a"])]
    #[case(&["-a", "in.txt"])]
    #[case(&["-u", "in.par"])]
    #[case(&["-a", "-u", "in", "out"])]
    #[case(&["-A", "-U", "in", "out"])]
    #[case(&["-x", "in", "out"])]
    #[case(&["one", "two", "three"])]
    fn rejects_invalid_arguments(#[case] argv: &[&str]) {
        assert!(parse(argv).is_err());
    }
}
