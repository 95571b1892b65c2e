//! Terminal Emitter
//!
//! Human-readable diagnostic output with optional ANSI color support.
//! When the emitter knows a diagnostic's source text, labels are shown as
//! `path:line:col` followed by the offending line; otherwise as a byte range.

use std::io::{self, Write};

use rustc_hash::FxHashMap;

use crate::span_utils::LineOffsetTable;
use crate::{Diagnostic, Label, Severity};

use super::DiagnosticEmitter;

/// ANSI color codes for terminal output.
mod colors {
    pub const ERROR: &str = "\x1b[1;31m"; // Bold red
    pub const WARNING: &str = "\x1b[1;33m"; // Bold yellow
    pub const NOTE: &str = "\x1b[1;36m"; // Bold cyan
    pub const HELP: &str = "\x1b[1;32m"; // Bold green
    pub const BOLD: &str = "\x1b[1m";
    pub const SECONDARY: &str = "\x1b[1;34m"; // Bold blue
    pub const RESET: &str = "\x1b[0m";
}

#[inline]
fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Use colors when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// `is_tty` only matters for `Auto`.
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }

    /// Parse the value of a `--color=` flag.
    pub fn from_flag(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

struct SourceEntry {
    text: String,
    lines: LineOffsetTable,
}

/// Terminal emitter with optional color support.
pub struct TerminalEmitter<W: Write> {
    writer: W,
    colors: bool,
    sources: FxHashMap<String, SourceEntry>,
}

impl<W: Write> TerminalEmitter<W> {
    /// Create a terminal emitter writing to `writer`.
    ///
    /// `is_tty` is consulted only for [`ColorMode::Auto`].
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            sources: FxHashMap::default(),
        }
    }

    /// Register the text of `path` so labels in that file get line/column positions.
    #[must_use]
    pub fn with_source(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.add_source(path, text);
        self
    }

    pub fn add_source(&mut self, path: impl Into<String>, text: impl Into<String>) {
        let text = text.into();
        let lines = LineOffsetTable::build(&text);
        self.sources.insert(path.into(), SourceEntry { text, lines });
    }

    /// Consume the emitter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_colored(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_severity(&mut self, severity: Severity) {
        let color = match severity {
            Severity::Error => colors::ERROR,
            Severity::Warning => colors::WARNING,
            Severity::Note => colors::NOTE,
        };
        self.write_colored(&severity.to_string(), color);
    }

    fn write_code(&mut self, code: &str) {
        if self.colors {
            let _ = write!(self.writer, "{}[{code}]{}", colors::BOLD, colors::RESET);
        } else {
            let _ = write!(self.writer, "[{code}]");
        }
    }

    fn write_label(&mut self, file: Option<&str>, label: &Label) {
        let marker = if label.is_primary { "-->" } else { "   " };
        let _ = write!(self.writer, "  {marker} ");

        let located = file.and_then(|path| {
            self.sources.get(path).map(|entry| {
                let (line, col) = entry.lines.offset_to_line_col(&entry.text, label.span.start);
                let snippet = entry
                    .lines
                    .line_text(&entry.text, line)
                    .map(str::to_owned);
                (format!("{path}:{line}:{col}"), snippet)
            })
        });

        let snippet = match (located, file) {
            (Some((location, snippet)), _) => {
                let _ = write!(self.writer, "{location}: ");
                snippet
            }
            (None, Some(path)) => {
                let _ = write!(self.writer, "{path} {:?}: ", label.span);
                None
            }
            (None, None) => {
                let _ = write!(self.writer, "{:?}: ", label.span);
                None
            }
        };

        let color = if label.is_primary {
            colors::ERROR
        } else {
            colors::SECONDARY
        };
        self.write_colored(&label.message, color);
        let _ = writeln!(self.writer);

        if let Some(text) = snippet {
            let _ = writeln!(self.writer, "   | {}", text.trim_end());
        }
    }
}

impl TerminalEmitter<io::Stderr> {
    /// Terminal emitter for stderr.
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        // Header: severity[CODE]: message
        self.write_severity(diagnostic.severity);
        self.write_code(diagnostic.code.as_str());
        let _ = writeln!(self.writer, ": {}", diagnostic.message);

        for label in &diagnostic.labels {
            self.write_label(diagnostic.file.as_deref(), label);
        }

        if diagnostic.labels.is_empty() {
            if let Some(file) = &diagnostic.file {
                let _ = writeln!(self.writer, "  --> {file}");
            }
        }

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.write_colored("note", colors::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }

        for suggestion in &diagnostic.suggestions {
            let _ = write!(self.writer, "  = ");
            self.write_colored("help", colors::HELP);
            let _ = writeln!(self.writer, ": {suggestion}");
        }

        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count == 0 && warning_count == 0 {
            return;
        }

        if error_count > 0 {
            self.write_colored("error", colors::ERROR);

            let error_part = if error_count == 1 {
                "previous error".to_string()
            } else {
                format!("{error_count} previous errors")
            };

            if warning_count > 0 {
                let _ = writeln!(
                    self.writer,
                    ": aborting due to {error_part}; {} warning{} emitted",
                    warning_count,
                    plural_s(warning_count)
                );
            } else {
                let _ = writeln!(self.writer, ": aborting due to {error_part}");
            }
        } else {
            self.write_colored("warning", colors::WARNING);
            let _ = writeln!(
                self.writer,
                ": {} warning{} emitted",
                warning_count,
                plural_s(warning_count)
            );
        }
    }
}

#[cfg(test)]
mod tests;
