//! Internal consistency violations.
//!
//! A defect means the disambiguation rules produced an impossible
//! sequence: a queued token that does not continue the previous one, an
//! empty queued token, or a state pop without a matching push. These are
//! bugs in the lexer, not properties of the input, so the infallible
//! entry points panic with the defect's message.

use thiserror::Error;

use crate::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerDefect {
    #[error("pre-parsed {kind} token at {found} does not continue the queue ending at {expected}")]
    NonContiguous {
        kind: TokenKind,
        expected: u32,
        found: u32,
    },

    #[error("pre-parsed {kind} token at {start} is empty")]
    EmptyToken { kind: TokenKind, start: u32 },

    #[error("lexer state popped from an empty stack")]
    EmptyStatePop,
}
