//! Line and column lookup for rendering spans.
//!
//! Spans are byte offsets; humans read `path:line:col`. Build a
//! [`LineOffsetTable`] once per source and query it for every label.

use serin_ir::Span;

/// Byte offset of every line start in one source text.
///
/// ```
/// use serin_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "class A\n{\n}";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 8), (2, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// `offsets[0] == 0`; `offsets[n]` is the byte after the n-th `\n`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based `(line, column)`; the column counts characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col = source
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count());
        (line, u32::try_from(col).unwrap_or(u32::MAX - 1) + 1)
    }

    /// Text of a 1-based line without its terminator.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let idx = line.checked_sub(1)? as usize;
        let start = *self.offsets.get(idx)? as usize;
        let end = self
            .offsets
            .get(idx + 1)
            .map_or(source.len(), |&next| next as usize);
        source
            .get(start..end)
            .map(|text| text.trim_end_matches(['\n', '\r']))
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// One-shot `(line, column)` of a span's start. Prefer the table for many lookups.
pub fn span_start_line_col(source: &str, span: Span) -> (u32, u32) {
    LineOffsetTable::build(source).offset_to_line_col(source, span.start)
}
