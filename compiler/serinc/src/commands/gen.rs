//! The `gen` command: write companion sources.

use std::fs;
use std::io::Write;
use std::path::Path;

use serin_gen::GeneratedSource;

use super::{prepare, Options};
use crate::CliError;

/// Generate companions for every class under `options.paths`.
///
/// Units go to `options.out_dir` when set, one file per hint name;
/// otherwise they are printed to `out`, each preceded by a `// file:` line.
pub fn run_gen(options: &Options, out: &mut impl Write) -> Result<bool, CliError> {
    let (_, generation) = prepare(options)?;
    let sources = &generation.output.sources;

    match &options.out_dir {
        Some(dir) => {
            write_sources(dir, sources)?;
            writeln!(
                out,
                "generated {} file{} in {}",
                sources.len(),
                if sources.len() == 1 { "" } else { "s" },
                dir.display()
            )?;
        }
        None => {
            for source in sources {
                writeln!(out, "// file: {}", source.hint_name)?;
                write!(out, "{}", source.text)?;
            }
        }
    }
    Ok(!generation.has_errors())
}

fn write_sources(dir: &Path, sources: &[GeneratedSource]) -> Result<(), CliError> {
    fs::create_dir_all(dir).map_err(|source| CliError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    for unit in sources {
        let path = dir.join(&unit.hint_name);
        fs::write(&path, &unit.text).map_err(|source| CliError::Write { path, source })?;
        tracing::debug!(file = %unit.hint_name, "written");
    }
    Ok(())
}
