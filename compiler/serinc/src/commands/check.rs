//! The `check` command: analyze without writing anything.

use std::io::Write;

use serin_gen::ClassAnalysisResult;

use super::{prepare, Options};
use crate::CliError;

/// Report diagnostics and one summary line per candidate class.
pub fn run_check(options: &Options, out: &mut impl Write) -> Result<bool, CliError> {
    let (frontend, generation) = prepare(options)?;

    for class in &generation.output.classes {
        writeln!(out, "{}", summary_line(class))?;
    }
    writeln!(
        out,
        "checked {} file{}: {} class{} with marker fields, {} companion{}",
        frontend.trees.len(),
        plural(frontend.trees.len(), "s"),
        generation.output.classes.len(),
        plural(generation.output.classes.len(), "es"),
        generation.output.sources.len(),
        plural(generation.output.sources.len(), "s"),
    )?;
    Ok(!generation.has_errors())
}

pub(super) fn summary_line(class: &ClassAnalysisResult) -> String {
    let name = class.qualified_name();
    if !class.requires_companion {
        return format!("{name}: nothing to generate");
    }
    if !class.is_partial {
        return format!("{name}: not generated, not partial");
    }
    format!(
        "{name}: {} own, {} inherited -> {}",
        class.own_field_shapes.len(),
        class.inherited_generic_entries.len(),
        class.hint_name()
    )
}

fn plural(count: usize, suffix: &'static str) -> &'static str {
    if count == 1 {
        ""
    } else {
        suffix
    }
}
