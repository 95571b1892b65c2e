//! Append-only diagnostic sinks.
//!
//! The generator never prints or writes files itself. Everything it wants to
//! tell the user goes through a [`DiagnosticSink`] supplied by the caller, so
//! tests can inspect reports and parallel analysis can share one sink.

use parking_lot::Mutex;

use crate::Diagnostic;

/// Receiver for diagnostics produced during generation.
///
/// Implementations must tolerate concurrent `report` calls from worker threads.
pub trait DiagnosticSink: Send + Sync {
    /// Record one diagnostic.
    fn report(&self, diagnostic: Diagnostic);
}

/// Thread-safe collecting sink.
///
/// Arrival order depends on scheduling when analysis runs in parallel;
/// [`DiagnosticBag::into_sorted`] restores a deterministic order.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of diagnostics recorded so far.
    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.lock().iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .lock()
            .iter()
            .filter(|d| d.is_warning())
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Copy of everything recorded, in arrival order.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// Consume the bag, ordering by file, then position, then code.
    pub fn into_sorted(self) -> Vec<Diagnostic> {
        let mut diagnostics = self.diagnostics.into_inner();
        diagnostics.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.primary_span().cmp(&b.primary_span()))
                .then_with(|| a.code.cmp(&b.code))
                .then_with(|| a.message.cmp(&b.message))
        });
        diagnostics
    }
}

impl DiagnosticSink for DiagnosticBag {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use rayon::prelude::*;
    use serin_ir::Span;

    use super::*;
    use crate::ErrorCode;

    #[test]
    fn test_bag_counts() {
        let bag = DiagnosticBag::new();
        bag.report(Diagnostic::error(ErrorCode::E4001));
        bag.report(Diagnostic::warning(ErrorCode::E2003));
        bag.report(Diagnostic::warning(ErrorCode::E2004));

        assert_eq!(bag.len(), 3);
        assert_eq!(bag.error_count(), 1);
        assert_eq!(bag.warning_count(), 2);
        assert!(bag.has_errors());
    }

    #[test]
    fn test_concurrent_reports_are_all_kept() {
        let bag = DiagnosticBag::new();
        (0..256u32).into_par_iter().for_each(|i| {
            bag.report(
                Diagnostic::warning(ErrorCode::E2001)
                    .with_file("a.cs")
                    .with_label(Span::new(i, i + 1), "here"),
            );
        });
        assert_eq!(bag.len(), 256);

        let sorted = bag.into_sorted();
        let starts: Vec<u32> = sorted
            .iter()
            .filter_map(|d| d.primary_span().map(|s| s.start))
            .collect();
        assert_eq!(starts, (0..256).collect::<Vec<_>>());
    }

    #[test]
    fn test_into_sorted_orders_by_file_first() {
        let bag = DiagnosticBag::new();
        bag.report(
            Diagnostic::warning(ErrorCode::E2001)
                .with_file("b.cs")
                .with_label(Span::new(0, 1), ""),
        );
        bag.report(
            Diagnostic::warning(ErrorCode::E2001)
                .with_file("a.cs")
                .with_label(Span::new(50, 51), ""),
        );
        let files: Vec<_> = bag
            .into_sorted()
            .into_iter()
            .filter_map(|d| d.file)
            .collect();
        assert_eq!(files, vec!["a.cs".to_string(), "b.cs".to_string()]);
    }
}
