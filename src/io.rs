//! Provides `Operand`, a buffered line reader over the input file, and the
//! rule that turns a line into a key.
//!
//! Each pass opens its own `Operand`, so the file is read twice from the
//! start and closed when the `Operand` is consumed.
use anyhow::{Context, Result};
use bstr::io::BufReadExt;
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use std::{
    fs::File,
    io::{BufReader, Read},
    ops::FnMut,
    path::Path,
};

/// Returns the key for `line`: the line with one trailing `\n` removed.
/// Nothing else is stripped, so a `\r` before the `\n` stays part of the key.
#[must_use]
pub fn key_of(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\n").unwrap_or(line)
}

/// An input source read line by line. The `reader` field decodes UTF-16
/// input (detected by its Byte Order Mark) to UTF-8 and passes everything
/// else through byte for byte, UTF-8 Byte Order Mark included;
/// `path_display` is the path formatted for use in error messages.
pub struct Operand<T: Read> {
    path_display: String,
    reader: BufReader<DecodeReaderBytes<T, Vec<u8>>>,
}

impl Operand<File> {
    /// Open the file at `path` for one pass.
    pub fn open(path: &Path) -> Result<Operand<File>> {
        let path_display = format!("{}", path.display());
        let file = File::open(path).with_context(|| format!("Can't open file: {path_display}"))?;
        Ok(Operand::from_reader(path_display, file))
    }
}

impl<T: Read> Operand<T> {
    /// Wrap `source`, which will be reported as `path_display` in errors.
    #[must_use]
    pub fn from_reader(path_display: impl Into<String>, source: T) -> Operand<T> {
        let reader = BufReader::with_capacity(
            32 * 1024,
            DecodeReaderBytesBuilder::new()
                .bom_sniffing(true) // Look at the BOM to detect UTF-16 files and convert to UTF-8
                .strip_bom(false) // A UTF-8 BOM stays part of the first key
                .utf8_passthru(true) // Don't enforce UTF-8 (BOM or no BOM)
                .build(source),
        );
        Operand { path_display: path_display.into(), reader }
    }

    /// Calls `for_each_key` with the key of every line, in order, and returns
    /// the number of lines read. A final line with no `\n` is seen only if it
    /// is non-empty. The first error returned by `for_each_key` stops the
    /// read and is returned.
    pub fn for_each_key<F>(self, mut for_each_key: F) -> Result<usize>
    where
        F: FnMut(&[u8]) -> Result<()>,
    {
        let Operand { path_display, mut reader } = self;
        let mut lines = 0_usize;
        let mut failure = None;
        reader
            .for_byte_line_with_terminator(|line| {
                match for_each_key(key_of(line)) {
                    Ok(()) => {
                        lines += 1;
                        Ok(true)
                    }
                    Err(e) => {
                        failure = Some(e);
                        Ok(false)
                    }
                }
            })
            .with_context(|| format!("Error reading file: {path_display}"))?;
        match failure {
            Some(e) => Err(e),
            None => Ok(lines),
        }
    }
}
