//! Command handlers for the serin CLI.
//!
//! Each submodule implements one command. Shared pieces live here: flag
//! parsing into [`Options`], loading sources into a [`Frontend`], and
//! diagnostic rendering.
//!
//! Handlers write their regular output to the writer they are given and
//! diagnostics to stderr, and return whether the run was free of errors.

mod analyze;
mod check;
mod explain;
mod gen;

pub use analyze::run_analyze;
pub use check::run_check;
pub use explain::explain_error;
pub use gen::run_gen;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use rayon::prelude::*;
use serin_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use serin_diagnostic::{Diagnostic, DiagnosticBag, DiagnosticSink};
use serin_gen::{GeneratorConfig, GeneratorOutput};
use serin_ir::SyntaxTree;
use serin_parse::ParseOutput;
use serin_sema::Compilation;

use crate::CliError;

/// Flags shared by `gen`, `check` and `analyze`.
#[derive(Clone, Debug)]
pub struct Options {
    /// Files and directories to analyze; the current directory when none
    /// are given.
    pub paths: Vec<PathBuf>,
    /// Where `gen` writes units. Printed to stdout when unset.
    pub out_dir: Option<PathBuf>,
    pub color: ColorMode,
    pub config: GeneratorConfig,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            paths: Vec::new(),
            out_dir: None,
            color: ColorMode::Auto,
            config: GeneratorConfig::default(),
        }
    }
}

impl Options {
    /// Parse the arguments following the command name.
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut options = Options::default();
        let mut args = args.iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-o" | "--out" => {
                    let dir = args
                        .next()
                        .ok_or_else(|| CliError::MissingValue(arg.clone()))?;
                    options.out_dir = Some(PathBuf::from(dir));
                }
                "--no-parallel" => options.config.parallel = false,
                "--no-helpers" => options.config.instantiate_helpers = false,
                "--no-cast-warnings" => options.config.emit_cast_warnings = false,
                "--quiet-skips" => options.config.report_skipped_fields = false,
                _ => {
                    if let Some(mode) = arg.strip_prefix("--color=") {
                        options.color = ColorMode::from_flag(mode)
                            .ok_or_else(|| CliError::InvalidColor(mode.to_string()))?;
                    } else if let Some(marker) = arg.strip_prefix("--marker=") {
                        if marker.is_empty() {
                            return Err(CliError::MissingValue("--marker".to_string()));
                        }
                        options.config.marker_attribute = marker.to_string();
                    } else if arg.starts_with('-') {
                        return Err(CliError::UnknownOption(arg.clone()));
                    } else {
                        options.paths.push(PathBuf::from(arg));
                    }
                }
            }
        }
        if options.paths.is_empty() {
            options.paths.push(PathBuf::from("."));
        }
        Ok(options)
    }
}

/// Parsed input files and their syntax diagnostics.
pub struct Frontend {
    pub trees: Vec<SyntaxTree>,
    pub diagnostics: Vec<Diagnostic>,
}

/// A generator run over a [`Frontend`].
pub struct Generation {
    pub output: GeneratorOutput,
    /// Syntax and generation diagnostics, sorted.
    pub diagnostics: Vec<Diagnostic>,
}

impl Generation {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

impl Frontend {
    /// Read and parse `paths` in parallel, keeping their order.
    #[tracing::instrument(level = "debug", skip_all, fields(files = paths.len()))]
    pub fn load(paths: &[PathBuf]) -> Result<Self, CliError> {
        let parsed = paths
            .par_iter()
            .map(|path| {
                let source = fs::read_to_string(path).map_err(|source| CliError::Read {
                    path: path.clone(),
                    source,
                })?;
                Ok(serin_parse::parse(path.display().to_string(), source))
            })
            .collect::<Result<Vec<ParseOutput>, CliError>>()?;
        Ok(Self::from_parsed(parsed))
    }

    /// Parse in-memory `(path, text)` pairs.
    pub fn from_sources<'s>(sources: impl IntoIterator<Item = (&'s str, &'s str)>) -> Self {
        Self::from_parsed(
            sources
                .into_iter()
                .map(|(path, text)| serin_parse::parse(path, text))
                .collect(),
        )
    }

    fn from_parsed(parsed: Vec<ParseOutput>) -> Self {
        let mut trees = Vec::with_capacity(parsed.len());
        let mut diagnostics = Vec::new();
        for output in parsed {
            diagnostics.extend(output.diagnostics);
            trees.push(output.tree);
        }
        Frontend { trees, diagnostics }
    }

    pub fn generate(&self, config: &GeneratorConfig) -> Generation {
        let compilation = Compilation::new(&self.trees);
        let bag = DiagnosticBag::new();
        for diagnostic in &self.diagnostics {
            bag.report(diagnostic.clone());
        }
        let output = serin_gen::generate(&compilation, config, &bag);
        Generation {
            output,
            diagnostics: bag.into_sorted(),
        }
    }

    /// Render `diagnostics` to stderr with source snippets.
    pub fn report(&self, diagnostics: &[Diagnostic], color: ColorMode) {
        let is_tty = io::IsTerminal::is_terminal(&io::stderr());
        self.report_to(io::stderr(), diagnostics, color, is_tty);
    }

    pub fn report_to<W: Write>(
        &self,
        writer: W,
        diagnostics: &[Diagnostic],
        color: ColorMode,
        is_tty: bool,
    ) -> W {
        let mut emitter = TerminalEmitter::with_color_mode(writer, color, is_tty);
        for tree in &self.trees {
            emitter.add_source(tree.path.clone(), tree.source.clone());
        }
        emitter.emit_all(diagnostics);
        let errors = diagnostics.iter().filter(|d| d.is_error()).count();
        let warnings = diagnostics.iter().filter(|d| d.is_warning()).count();
        emitter.emit_summary(errors, warnings);
        emitter.flush();
        emitter.into_inner()
    }
}

/// Discover, load and generate: the common start of every command.
fn prepare(options: &Options) -> Result<(Frontend, Generation), CliError> {
    let files = crate::discover_sources(&options.paths)?;
    let frontend = Frontend::load(&files)?;
    let generation = frontend.generate(&options.config);
    frontend.report(&generation.diagnostics, options.color);
    Ok((frontend, generation))
}

#[cfg(test)]
mod tests;
