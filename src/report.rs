//! The messages `keycount` writes to standard output. Each line is flushed
//! as soon as it's written, so a phase banner shows up before a long pass.
use anyhow::Result;
use std::io::Write;

pub(crate) const USAGE: &str = "usage: keycount FILE_NAME";
pub(crate) const WRONG_ARGUMENT_COUNT: &str = "Numero di parametri errato";
pub(crate) const BAD_FILE_NAME: &str = "Nome del file errato";
const INSERTION_PHASE: &str = "Inizio fase INSERIMENTO..";
const REMOVAL_PHASE: &str = "Inizio fase RIMOZIONE..";
const MAP_SIZE: &str = "Dimensione della HashTable: ";

/// The two passes, in the order they run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Phase {
    /// The first pass, which fills the map
    Insertion,
    /// The second pass, which drains it
    Removal,
}

pub(crate) fn phase_start(out: &mut impl Write, phase: Phase) -> Result<()> {
    let banner = match phase {
        Phase::Insertion => INSERTION_PHASE,
        Phase::Removal => REMOVAL_PHASE,
    };
    writeln!(out, "{banner}")?;
    out.flush()?;
    Ok(())
}

/// Note the two spaces between the label and the size.
pub(crate) fn map_size(out: &mut impl Write, size: usize) -> Result<()> {
    writeln!(out, "{MAP_SIZE} {size}")?;
    out.flush()?;
    Ok(())
}

pub(crate) fn usage_error(out: &mut impl Write, message: &str) -> Result<()> {
    writeln!(out, "{USAGE}")?;
    writeln!(out, "{message}")?;
    out.flush()?;
    Ok(())
}
