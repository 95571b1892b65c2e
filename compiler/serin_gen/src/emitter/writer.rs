//! Line-oriented source writer with block indentation.

/// Indentation width in spaces.
const INDENT_WIDTH: usize = 4;

/// Builds generated source one line at a time.
///
/// Lines end in `\n`. Blocks opened with [`SourceWriter::open_block`] indent
/// their body one level; a blank line right before a closing brace is dropped.
#[derive(Default)]
pub(crate) struct SourceWriter {
    buffer: String,
    indent_level: usize,
}

impl SourceWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Emit `text` on its own line at the current indentation.
    pub(crate) fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.indent_level * INDENT_WIDTH {
                self.buffer.push(' ');
            }
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
    }

    /// Emit an empty line, never two in a row.
    pub(crate) fn blank_line(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with("\n\n") && !self.buffer.ends_with("{\n")
        {
            self.buffer.push('\n');
        }
    }

    /// `header`, then `{` on its own line, then indent.
    pub(crate) fn open_block(&mut self, header: &str) {
        self.line(header);
        self.line("{");
        self.indent_level += 1;
    }

    pub(crate) fn close_block(&mut self) {
        if self.buffer.ends_with("\n\n") {
            self.buffer.pop();
        }
        self.indent_level = self.indent_level.saturating_sub(1);
        self.line("}");
    }

    /// Run `f` one indentation level deeper, without braces.
    pub(crate) fn with_indent<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.indent_level += 1;
        f(self);
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub(crate) fn output(mut self) -> String {
        while self.buffer.ends_with("\n\n") {
            self.buffer.pop();
        }
        if !self.buffer.ends_with('\n') {
            self.buffer.push('\n');
        }
        self.buffer
    }
}
