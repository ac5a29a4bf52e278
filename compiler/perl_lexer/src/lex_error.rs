//! Lexer diagnostics.
//!
//! Errors follow the WHERE+WHAT+WHY+HOW shape:
//! - WHERE: `span` locating the error in source
//! - WHAT: `kind` describing what went wrong
//! - WHY: `context` naming the construct the lexer was inside
//! - HOW: `suggestions` providing actionable fixes
//!
//! Lexing never stops on an error. The offending bytes are still covered
//! by tokens and the error is recorded alongside them.

use std::fmt;

use perl_lexer_core::{LexState, MasonBlock};

use crate::Span;

/// A lexer error with context for diagnostic rendering.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    /// WHERE the error occurred.
    pub span: Span,
    /// WHAT went wrong.
    pub kind: LexErrorKind,
    /// WHY we were checking.
    pub context: LexErrorContext,
    /// HOW to fix.
    pub suggestions: Vec<LexSuggestion>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    /// A character no rule accepts.
    InvalidCharacter { found: char },
    /// Quote-like body still open at end of buffer.
    UnterminatedQuote,
    /// Heredoc body (or announced heredoc) without its terminator line.
    UnterminatedHeredoc { marker: Box<str> },
    /// Mason block without its closing tag.
    UnterminatedMasonBlock { block: MasonBlock },
    /// `<% ... %>` or `<& ... &>` without its closer.
    UnterminatedMasonTag,
}

/// The construct open at the point of error.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum LexErrorContext {
    /// Plain Perl code or top-level template markup.
    #[default]
    TopLevel,
    /// Inside a construct opened at `start`.
    Inside { mode: &'static str, start: u32 },
}

/// Suggestion for fixing a lexical error.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexSuggestion {
    pub message: String,
    /// Priority (lower = more likely relevant). 0 = most likely.
    pub priority: u8,
}

impl LexSuggestion {
    pub fn text(message: impl Into<String>, priority: u8) -> Self {
        Self {
            message: message.into(),
            priority,
        }
    }
}

impl LexErrorContext {
    /// Context for a construct scanned in `state` and opened at `start`.
    pub fn inside(state: &LexState, start: u32) -> Self {
        LexErrorContext::Inside {
            mode: state.describe(),
            start,
        }
    }
}

impl LexError {
    #[cold]
    pub fn invalid_character(span: Span, found: char) -> Self {
        let mut suggestions = Vec::new();
        if found.is_control() {
            suggestions.push(LexSuggestion::text(
                "remove the control character or write it as an escape inside a string",
                0,
            ));
        } else if !found.is_ascii() {
            suggestions.push(LexSuggestion::text(
                "non-ASCII punctuation is only allowed inside strings and comments",
                1,
            ));
        }
        Self {
            span,
            kind: LexErrorKind::InvalidCharacter { found },
            context: LexErrorContext::TopLevel,
            suggestions,
        }
    }

    #[cold]
    pub fn unterminated_quote(span: Span, state: &LexState) -> Self {
        let closer = match state {
            LexState::Quote(quote) => Some(quote.close),
            _ => None,
        };
        let suggestion = match closer {
            Some(close) if close.is_ascii_graphic() => {
                format!("add the closing `{}`", char::from(close))
            }
            _ => "add the quote delimiters".to_owned(),
        };
        Self {
            span,
            kind: LexErrorKind::UnterminatedQuote,
            context: LexErrorContext::inside(state, span.start),
            suggestions: vec![LexSuggestion::text(suggestion, 0)],
        }
    }

    #[cold]
    pub fn unterminated_heredoc(span: Span, marker: &str) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnterminatedHeredoc {
                marker: marker.into(),
            },
            context: LexErrorContext::Inside {
                mode: "heredoc body",
                start: span.start,
            },
            suggestions: vec![LexSuggestion::text(
                format!("add a line containing only `{marker}`"),
                0,
            )],
        }
    }

    #[cold]
    pub fn unterminated_mason_block(span: Span, block: MasonBlock, state: &LexState) -> Self {
        Self {
            span,
            kind: LexErrorKind::UnterminatedMasonBlock { block },
            context: LexErrorContext::inside(state, span.start),
            suggestions: vec![LexSuggestion::text(
                format!("add `{}`", block.closer()),
                0,
            )],
        }
    }

    #[cold]
    pub fn unterminated_mason_tag(span: Span, state: &LexState) -> Self {
        let closer = if matches!(state, LexState::MasonCall) {
            "&>"
        } else {
            "%>"
        };
        Self {
            span,
            kind: LexErrorKind::UnterminatedMasonTag,
            context: LexErrorContext::inside(state, span.start),
            suggestions: vec![LexSuggestion::text(format!("add `{closer}`"), 0)],
        }
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::InvalidCharacter { found } => {
                write!(f, "unexpected character {found:?}")
            }
            LexErrorKind::UnterminatedQuote => f.write_str("unterminated quote-like construct"),
            LexErrorKind::UnterminatedHeredoc { marker } => {
                write!(f, "heredoc `{marker}` is never terminated")
            }
            LexErrorKind::UnterminatedMasonBlock { block } => {
                write!(f, "`<%{}>` block is never closed", block.name())
            }
            LexErrorKind::UnterminatedMasonTag => f.write_str("unterminated mason tag"),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for LexError {}
