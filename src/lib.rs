//! The `run` function is the kernel of the application: it fills a
//! `KeyCounter` from the lines of a file, then drains it by reading the file
//! again. The `args` module parses the command line, and the `io` module
//! hides I/O details.
//!
//! A "line" is zero or more non-newline bytes followed by a newline, or a
//! non-empty run of bytes at the end of the file. Its key is the line without
//! that newline.

#![deny(unused_must_use)]
#![deny(clippy::all)]
#![allow(clippy::needless_return)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![deny(missing_docs)]

use anyhow::Result;
use std::io::{Read, Write};

pub mod args;
pub mod counter;
pub mod io;
mod report;
pub mod trace;

use crate::counter::KeyCounter;
use crate::io::Operand;
use crate::report::Phase;
use crate::trace::Trace;

/// The map sizes `run` reported
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sizes {
    /// Distinct keys after the insertion pass
    pub after_insertion: usize,
    /// Keys left after the removal pass
    pub after_removal: usize,
}

/// Runs both passes over the source returned by `open`, which is called
/// once per pass and must return a fresh `Operand` positioned at the start.
/// Each phase is announced on `out`, and the map's size is written after it.
pub fn run<R, T>(
    mut open: impl FnMut() -> Result<Operand<R>>,
    counter: &mut KeyCounter<T>,
    mut out: impl Write,
) -> Result<Sizes>
where
    R: Read,
    T: Trace,
{
    report::phase_start(&mut out, Phase::Insertion)?;
    let lines = counter.insertion_pass(open()?)?;
    let after_insertion = counter.len();
    log::info!("insertion pass read {lines} lines, {after_insertion} distinct");
    report::map_size(&mut out, after_insertion)?;

    report::phase_start(&mut out, Phase::Removal)?;
    let lines = counter.removal_pass(open()?)?;
    let after_removal = counter.len();
    log::info!("removal pass read {lines} lines, {after_removal} keys left");
    report::map_size(&mut out, after_removal)?;

    Ok(Sizes { after_insertion, after_removal })
}

/// Prints the usage line and `error`'s message on `out`, for an operand
/// error caught before anything was read.
pub fn report_usage_error(mut out: impl Write, error: &args::ArgError) -> Result<()> {
    report::usage_error(&mut out, error.message())
}
