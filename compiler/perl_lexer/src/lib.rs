//! Perl 5 and Mason 2 lexer.
//!
//! Wraps the raw scanner from `perl_lexer_core` with the context Perl needs
//! to be tokenized at all: a token history to tell terms from operators, a
//! state stack for quote, heredoc and Mason regions, and a queue for lexemes
//! that classify as several tokens.
//!
//! # Architecture
//!
//! ```text
//! perl_lexer_core::RawScanner   (RawTag, len) per call, mode-aware
//!         │
//!         ▼
//! PerlLexer::advance            queue first, else scan + disambiguate
//!         │
//!         ▼
//! Token { start, end, kind }    contiguous, covers the whole buffer
//! ```
//!
//! # Usage
//!
//! ```
//! use perl_lexer::{lex, LexerConfig, TokenKind};
//!
//! let output = lex("my $x = 1;", &LexerConfig::default());
//! assert_eq!(output.tokens[0].kind, TokenKind::Keyword);
//! assert!(output.errors.is_empty());
//! ```

mod defect;
mod disambiguate;
pub mod history;
mod keywords;
mod kind;
mod lex_error;
mod lexer;
pub mod package_util;
mod preparsed;
mod span;
mod state_stack;
mod token;

pub mod config;

pub use config::{Dialect, LexerConfig};
pub use defect::LexerDefect;
pub use history::{HistoryEntry, TokenHistory};
pub use kind::TokenKind;
pub use lex_error::{LexError, LexErrorContext, LexErrorKind, LexSuggestion};
pub use lexer::PerlLexer;
pub use perl_lexer_core::{HeredocState, LexState, MasonBlock, MasonBody, QuoteState};
pub use preparsed::PreparsedQueue;
pub use span::Span;
pub use state_stack::StateStack;
pub use token::Token;

/// Result of lexing a whole buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexOutput {
    /// Contiguous tokens covering the buffer.
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
    /// Scanner mode at end of buffer.
    pub final_state: LexState,
    /// Every construct was closed.
    pub complete: bool,
}

/// Lex a whole buffer.
///
/// # Panics
///
/// Panics if `source` is longer than `u32::MAX` bytes.
pub fn lex(source: &str, config: &LexerConfig) -> LexOutput {
    let mut lexer = PerlLexer::new(source, config.clone());
    let tokens: Vec<Token> = lexer.by_ref().collect();
    LexOutput {
        tokens,
        final_state: lexer.state().clone(),
        complete: lexer.is_complete(),
        errors: lexer.take_errors(),
    }
}
