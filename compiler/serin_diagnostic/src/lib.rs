//! Diagnostic system for the serin generator.
//!
//! Every report carries:
//! - an error code for searchability (`serin explain E2003`)
//! - a clear message (what went wrong)
//! - a primary span (where it went wrong)
//! - optional notes and suggestions (how to fix)
//!
//! Phases report through a [`DiagnosticSink`]; front ends collect into a
//! [`DiagnosticBag`] and render with an [`emitter`].

mod diagnostic;
pub mod emitter;
mod error_code;
mod sink;
pub mod span_utils;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use sink::{DiagnosticBag, DiagnosticSink};
