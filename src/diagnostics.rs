//! Diagnostic values attached to tokens and compilation results
//!
//! Diagnostics are non-fatal: parsing and generation always complete and
//! return an artifact, with any problems accumulated as `Diagnostic` values
//! rather than surfaced as errors. A diagnostic records its position in the
//! original source; interned tokens stay position-free, so the span lives on
//! the diagnostic itself.

use std::fmt;

/// How serious a diagnostic is. Errors describe degraded output (e.g. a
/// synthesized missing token), warnings describe policy decisions the caller
/// should see (e.g. a version-gated option downgrade).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Byte range in the original source. Zero-width spans mark the position of
/// expected-but-absent syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A zero-width span at the given offset.
    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A single non-fatal problem found while lexing, parsing, or configuring
/// code generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Option<Span>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            span: Some(span),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{} [{}..{}]: {}", self.severity, span.start, span.end, self.message),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}
