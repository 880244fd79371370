//! Code to parse the command line using `clap`, and the check that there is
//! exactly one, non-empty, file operand.
//!
//! `clap` collects the operands without judging them, so that a wrong count
//! or an empty name is reported by `keycount` itself, with its own exit code.
//! There are no options: every argument, even one that starts with `-`, is
//! an operand. Logging is configured through `RUST_LOG` instead.

use clap::Parser;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use thiserror::Error;

use crate::report;

/// Returns the parsed command line, or the reason its operands are unusable.
pub fn parsed() -> Result<Args, ArgError> {
    from_cli(CliArgs::parse())
}

/// Like `parsed`, but for an explicit argument list (whose first item is the
/// program name).
pub fn parsed_from<I, T>(args: I) -> Result<Args, ArgError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    from_cli(CliArgs::parse_from(args))
}

fn from_cli(cli: CliArgs) -> Result<Args, ArgError> {
    let file = operand(&cli.files)?;
    Ok(Args { file })
}

/// Checks that `files` holds exactly one non-empty file name, and returns it.
pub fn operand(files: &[impl AsRef<OsStr>]) -> Result<PathBuf, ArgError> {
    match files {
        [file] if file.as_ref().is_empty() => Err(ArgError::EmptyFileName),
        [file] => Ok(PathBuf::from(file.as_ref())),
        _ => Err(ArgError::Count(files.len())),
    }
}

/// The validated command line
#[derive(Debug)]
pub struct Args {
    /// `file` is the file to read, once per pass
    pub file: PathBuf,
}

/// Why the command line's operands can't be used
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    /// Not exactly one file operand; holds the number given
    #[error("expected exactly one file name, got {0}")]
    Count(usize),
    /// The file operand was the empty string
    #[error("the file name is empty")]
    EmptyFileName,
}

impl ArgError {
    /// The process exit status for this error
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            ArgError::Count(_) => 1,
            ArgError::EmptyFileName => 3,
        }
    }

    /// The line printed after the usage line
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            ArgError::Count(_) => report::WRONG_ARGUMENT_COUNT,
            ArgError::EmptyFileName => report::BAD_FILE_NAME,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "keycount", disable_help_flag = true, disable_version_flag = true)]
/// Count the lines of a file in a hash table, then remove them again by
/// re-reading the file, printing the table's size after each phase.
struct CliArgs {
    #[arg(value_name = "FILE_NAME", num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
    /// The file to read; exactly one is required
    files: Vec<OsString>,
}
