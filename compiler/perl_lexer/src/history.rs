//! Token history.
//!
//! Every rule that tells a term from an operator looks back at the tokens
//! already emitted in the current pass. The history keeps the most recent
//! token overall (for sigil adjacency) and a bounded log of significant
//! tokens with their text (for `sub`, `package`, `->` and friends).

use std::collections::VecDeque;

use crate::TokenKind;

/// A recorded significant token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub kind: TokenKind,
    pub text: Box<str>,
    pub end: u32,
}

/// Smallest accepted bound. No rule looks back past two significant tokens.
pub const MIN_HISTORY: usize = 4;

/// Log of tokens emitted since the pass started.
#[derive(Clone, Debug)]
pub struct TokenHistory {
    significant: VecDeque<HistoryEntry>,
    last: Option<TokenKind>,
    limit: usize,
}

impl TokenHistory {
    /// Create an empty history keeping at most `limit` significant entries.
    ///
    /// Limits below [`MIN_HISTORY`] are raised to it.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(MIN_HISTORY);
        TokenHistory {
            significant: VecDeque::with_capacity(limit),
            last: None,
            limit,
        }
    }

    /// Record an emitted token.
    pub fn add_token(&mut self, kind: TokenKind, text: &str, end: u32) {
        self.last = Some(kind);
        if !kind.is_significant() {
            return;
        }
        if self.significant.len() == self.limit {
            self.significant.pop_front();
        }
        self.significant.push_back(HistoryEntry {
            kind,
            text: text.into(),
            end,
        });
    }

    /// Kind of the most recent significant token, `None` at pass start.
    pub fn last_significant_kind(&self) -> Option<TokenKind> {
        self.significant.back().map(|entry| entry.kind)
    }

    /// Text of the most recent significant token.
    pub fn last_significant_text(&self) -> Option<&str> {
        self.significant.back().map(|entry| &*entry.text)
    }

    pub fn last_significant(&self) -> Option<&HistoryEntry> {
        self.significant.back()
    }

    /// Kind of the most recent token, significant or not.
    pub fn last_kind(&self) -> Option<TokenKind> {
        self.last
    }

    /// Number of significant entries currently retained.
    pub fn significant_len(&self) -> usize {
        self.significant.len()
    }

    pub fn reset(&mut self) {
        self.significant.clear();
        self.last = None;
    }
}

impl Default for TokenHistory {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HISTORY_LIMIT)
    }
}
