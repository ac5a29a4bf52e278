//! Pre-parsed token queue.
//!
//! Some lexemes are classified as several tokens at once: a package path
//! splits into prefix and name, a heredoc opener into opener, quotes and
//! marker. The rule that splits them pushes the pieces here, and the driver
//! replays them one per `advance` before scanning again.

use std::collections::VecDeque;

use crate::{LexerDefect, Token, TokenKind};

/// FIFO of classified tokens awaiting emission.
///
/// Each queued token must be non-empty and start where the previous queued
/// token ended.
#[derive(Clone, Debug, Default)]
pub struct PreparsedQueue {
    tokens: VecDeque<Token>,
}

impl PreparsedQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a token, checking contiguity.
    pub fn try_push(&mut self, start: u32, end: u32, kind: TokenKind) -> Result<(), LexerDefect> {
        if end <= start {
            return Err(LexerDefect::EmptyToken { kind, start });
        }
        if let Some(expected) = self.last_end() {
            if expected != start {
                return Err(LexerDefect::NonContiguous {
                    kind,
                    expected,
                    found: start,
                });
            }
        }
        self.tokens.push_back(Token::new(start, end, kind));
        Ok(())
    }

    /// Queue a token.
    ///
    /// # Panics
    ///
    /// Panics if the token is empty or does not continue the queue.
    #[track_caller]
    pub fn push(&mut self, start: u32, end: u32, kind: TokenKind) {
        if let Err(defect) = self.try_push(start, end, kind) {
            panic!("{defect}");
        }
    }

    pub fn pop_front(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// End offset of the most recently queued token.
    pub fn last_end(&self) -> Option<u32> {
        self.tokens.back().map(|token| token.end)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}
