//! Fluent construction of [`Diagnostic`] values.

use super::{Diagnostic, DiagnosticCode, Handler, Level};
use crate::span::Span;

/// A builder for a single diagnostic, finished with [`DiagnosticBuilder::emit`]
/// (straight into a [`Handler`]) or [`DiagnosticBuilder::build`] (just the
/// value, useful in tests).
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Span,
    code: Option<DiagnosticCode>,
    notes: Vec<String>,
}

impl DiagnosticBuilder {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self { level, message: message.into(), span: Span::DUMMY, code: None, notes: Vec::new() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn build(self) -> Diagnostic {
        let mut diag = Diagnostic::new(self.level, self.message, self.span);
        if let Some(code) = self.code {
            diag = diag.with_code(code);
        }
        for note in self.notes {
            diag = diag.with_note(note);
        }
        diag
    }

    pub fn emit(self, handler: &Handler) {
        handler.emit_diagnostic(self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_carries_message_and_span() {
        let d = DiagnosticBuilder::error("oops").span(Span::new(1, 2, 3, 4)).build();
        assert_eq!(d.message, "oops");
        assert_eq!(d.span, Span::new(1, 2, 3, 4));
    }

    #[test]
    fn emit_reaches_the_handler() {
        let handler = Handler::new();
        DiagnosticBuilder::error("bad").code(DiagnosticCode::DECL_CONFLICT).emit(&handler);
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn notes_accumulate_in_order() {
        let d = DiagnosticBuilder::error("x").note("first").note("second").build();
        assert_eq!(d.notes, vec!["first".to_string(), "second".to_string()]);
    }
}
