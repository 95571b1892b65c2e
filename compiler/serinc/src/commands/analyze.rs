//! The `analyze` command: dump the generator's view as JSON.

use std::io::Write;

use super::{prepare, Options};
use crate::CliError;

/// Print every class analysis and generated unit as pretty JSON.
pub fn run_analyze(options: &Options, out: &mut impl Write) -> Result<bool, CliError> {
    let (_, generation) = prepare(options)?;
    serde_json::to_writer_pretty(&mut *out, &generation.output)?;
    writeln!(out)?;
    Ok(!generation.has_errors())
}
