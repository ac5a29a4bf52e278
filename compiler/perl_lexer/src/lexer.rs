//! The lexer driver.
//!
//! [`PerlLexer`] owns everything a pass needs: the raw scanner, the state
//! stack, the pre-parsed queue, the token history and the heredocs announced
//! on the current line. Each [`advance`](PerlLexer::advance) drains the queue
//! first, otherwise scans one raw token and hands it to the disambiguation
//! rules (`disambiguate.rs`), then records the result in the history.
//!
//! A pass can begin at any offset with any seed mode
//! ([`start`](PerlLexer::start)); hosts re-lex from points where
//! [`is_restartable`](PerlLexer::is_restartable) held.

use std::collections::VecDeque;

use perl_lexer_core::{Cursor, HeredocState, LexState, RawScanner, RawTag};
use tracing::{debug, trace};

use crate::history::TokenHistory;
use crate::preparsed::PreparsedQueue;
use crate::state_stack::StateStack;
use crate::{LexError, LexerConfig, Span, Token, TokenKind};

/// A heredoc announced by an opener whose body has not started yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingHeredoc {
    pub(crate) state: HeredocState,
    /// Offset of the `<<` that announced it.
    pub(crate) opened_at: u32,
}

/// Restartable Perl / Mason lexer over one buffer.
pub struct PerlLexer<'src> {
    pub(crate) source: &'src str,
    pub(crate) scanner: RawScanner<'src>,
    pub(crate) config: LexerConfig,
    state_stack: StateStack,
    /// Offset at which each saved construct opened, parallel to `state_stack`.
    construct_starts: Vec<u32>,
    pub(crate) history: TokenHistory,
    pub(crate) preparsed: PreparsedQueue,
    pub(crate) pending_heredocs: VecDeque<PendingHeredoc>,
    pub(crate) token_start: u32,
    pub(crate) token_end: u32,
    buffer_start: u32,
    pub(crate) errors: Vec<LexError>,
    finished: bool,
    unterminated: bool,
}

impl<'src> PerlLexer<'src> {
    /// Create a lexer over a whole buffer, starting in the dialect's mode.
    ///
    /// # Panics
    ///
    /// Panics if `source` is longer than `u32::MAX` bytes.
    pub fn new(source: &'src str, config: LexerConfig) -> Self {
        assert!(
            u32::try_from(source.len()).is_ok(),
            "source of {} bytes exceeds u32::MAX",
            source.len()
        );
        let state = config.dialect.initial_state();
        let history = TokenHistory::new(config.history_limit);
        let mut lexer = PerlLexer {
            source,
            scanner: RawScanner::with_state(Cursor::new(source), state.clone()),
            config,
            state_stack: StateStack::new(),
            construct_starts: Vec::new(),
            history,
            preparsed: PreparsedQueue::new(),
            pending_heredocs: VecDeque::new(),
            token_start: 0,
            token_end: 0,
            buffer_start: 0,
            errors: Vec::new(),
            finished: false,
            unterminated: false,
        };
        lexer.start(source, 0, state);
        lexer
    }

    /// Begin a fresh pass over `source` at `offset` in mode `state`.
    ///
    /// Clears the state stack, the queue, the history, pending heredocs and
    /// recorded errors. A seed inside a construct (a quote body, a heredoc,
    /// a Mason region) sits on the dialect's initial mode, which the
    /// closing delimiter returns to.
    ///
    /// # Panics
    ///
    /// Panics if `source` is longer than `u32::MAX` bytes.
    pub fn start(&mut self, source: &'src str, offset: u32, state: LexState) {
        assert!(
            u32::try_from(source.len()).is_ok(),
            "source of {} bytes exceeds u32::MAX",
            source.len()
        );
        let cursor = Cursor::at(source, offset);
        let offset = cursor.pos();
        debug!(offset, len = source.len(), mode = state.describe(), "lex pass start");
        self.source = source;
        let seeded_inside = !state.is_terminal();
        self.scanner = RawScanner::with_state(cursor, state);
        self.state_stack.clear();
        self.construct_starts.clear();
        if seeded_inside {
            self.state_stack.push(self.config.dialect.initial_state());
            self.construct_starts.push(offset);
        }
        self.history.reset();
        self.preparsed.clear();
        self.pending_heredocs.clear();
        self.errors.clear();
        self.token_start = offset;
        self.token_end = offset;
        self.buffer_start = offset;
        self.finished = false;
        self.unterminated = false;
    }

    /// Forget per-pass context while keeping the scan position and mode.
    ///
    /// Clears the history, the queue and pending heredocs, and moves the
    /// buffer start to the current token start.
    pub fn reset_internals(&mut self) {
        debug!(at = self.token_start, "reset internals");
        self.history.reset();
        self.preparsed.clear();
        self.pending_heredocs.clear();
        self.buffer_start = self.token_start;
    }

    /// Produce the next token's kind, or `None` at end of buffer.
    ///
    /// The token's bounds are available from [`token_start`](Self::token_start)
    /// and [`token_end`](Self::token_end) until the next call.
    pub fn advance(&mut self) -> Option<TokenKind> {
        let kind = match self.preparsed.pop_front() {
            Some(token) => {
                self.token_start = token.start;
                self.token_end = token.end;
                token.kind
            }
            None => self.perl_advance()?,
        };
        self.register_token(kind);
        Some(kind)
    }

    fn perl_advance(&mut self) -> Option<TokenKind> {
        if self.finished {
            return None;
        }
        let start = self.scanner.pos();
        let raw = self.scanner.next_token();
        if raw.tag == RawTag::Eof {
            self.finish();
            return None;
        }
        self.token_start = start;
        self.token_end = start + raw.len;
        Some(self.classify(raw.tag))
    }

    fn register_token(&mut self, kind: TokenKind) {
        let text = self.token_text();
        trace!(
            start = self.token_start,
            end = self.token_end,
            kind = %kind,
            "token"
        );
        self.history.add_token(kind, text, self.token_end);
    }

    /// End of buffer: record an error for every construct still open,
    /// innermost first.
    fn finish(&mut self) {
        self.finished = true;
        self.token_start = self.scanner.source_len();
        self.token_end = self.token_start;

        // A `%` line may end the file without a newline.
        while *self.scanner.state() == LexState::MasonLine && !self.state_stack.is_empty() {
            self.pop_state();
        }

        let end = self.scanner.source_len();
        // `construct_starts[i]` opened the construct whose mode is the saved
        // mode above it, or the scanner's mode for the innermost one.
        let modes = self.state_stack.iter().skip(1).chain(std::iter::once(self.scanner.state()));
        let mut open: Vec<(u32, LexState)> =
            self.construct_starts.iter().copied().zip(modes.cloned()).collect();
        if open.is_empty() {
            open.push((end, self.scanner.state().clone()));
        }
        for (start, state) in open.into_iter().rev() {
            if let Some(error) = unterminated_construct(Span::new(start, end), &state) {
                debug!(error = %error, depth = self.state_stack.depth(), "unterminated construct");
                self.errors.push(error);
                self.unterminated = true;
            }
        }
        for pending in self.pending_heredocs.drain(..) {
            let error =
                LexError::unterminated_heredoc(Span::new(pending.opened_at, end), &pending.state.marker);
            debug!(error = %error, "heredoc body never started");
            self.errors.push(error);
            self.unterminated = true;
        }
        if !self.state_stack.is_empty() {
            self.unterminated = true;
        }
    }

    // === State stack ===

    /// Save the scanner's current mode; the construct opens at the current token.
    pub fn push_state(&mut self) {
        self.push_state_from(self.token_start);
    }

    pub(crate) fn push_state_from(&mut self, opened_at: u32) {
        let state = self.scanner.state().clone();
        trace!(mode = state.describe(), depth = self.state_stack.depth() + 1, "push state");
        self.state_stack.push(state);
        self.construct_starts.push(opened_at);
    }

    /// Restore the most recently saved mode into the scanner.
    ///
    /// # Panics
    ///
    /// Panics if no mode was saved.
    #[track_caller]
    pub fn pop_state(&mut self) {
        let state = self.state_stack.pop();
        self.construct_starts.pop();
        trace!(mode = state.describe(), depth = self.state_stack.depth(), "pop state");
        self.scanner.begin(state);
    }

    /// Move the end of the current token, rescanning from there.
    pub fn set_token_end(&mut self, end: u32) {
        self.token_end = end;
        self.scanner.set_pos(end);
    }

    // === Accessors ===

    pub fn token_start(&self) -> u32 {
        self.token_start
    }

    pub fn token_end(&self) -> u32 {
        self.token_end
    }

    pub fn token_span(&self) -> Span {
        Span::new(self.token_start, self.token_end)
    }

    /// Text of the current token.
    pub fn token_text(&self) -> &'src str {
        self.source
            .get(self.token_start as usize..self.token_end as usize)
            .unwrap_or_default()
    }

    /// The buffer being lexed.
    pub fn buffer(&self) -> &'src str {
        self.source
    }

    pub fn buffer_start(&self) -> u32 {
        self.buffer_start
    }

    pub fn buffer_end(&self) -> u32 {
        self.scanner.source_len()
    }

    /// Whether the current token reaches the end of the buffer with nothing queued.
    pub fn is_last_token(&self) -> bool {
        self.token_end >= self.buffer_end() && self.preparsed.is_empty()
    }

    /// Current scanner mode.
    pub fn state(&self) -> &LexState {
        self.scanner.state()
    }

    pub fn state_depth(&self) -> usize {
        self.state_stack.depth()
    }

    pub fn token_history(&self) -> &TokenHistory {
        &self.history
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Errors recorded so far in this pass.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// The pass reached end of buffer with every construct closed.
    pub fn is_complete(&self) -> bool {
        self.finished && !self.unterminated
    }

    /// Whether a pass started at the current token end in the current mode
    /// would produce the same tokens as continuing this one.
    pub fn is_restartable(&self) -> bool {
        self.state_stack.is_empty()
            && self.preparsed.is_empty()
            && self.pending_heredocs.is_empty()
            && self.scanner.state().is_terminal()
            && self
                .history
                .last_significant_kind()
                .map_or(true, TokenKind::is_statement_boundary)
    }
}

/// The error for a construct left open in `state`, if that mode needs closing.
fn unterminated_construct(span: Span, state: &LexState) -> Option<LexError> {
    match state {
        LexState::Quote(_) | LexState::QuoteGap(_) => Some(LexError::unterminated_quote(span, state)),
        LexState::Heredoc(heredoc) => Some(LexError::unterminated_heredoc(span, &heredoc.marker)),
        LexState::MasonPerl(block) | LexState::MasonText(block) | LexState::MasonTemplate(Some(block)) => {
            Some(LexError::unterminated_mason_block(span, *block, state))
        }
        LexState::MasonExpr | LexState::MasonCall => Some(LexError::unterminated_mason_tag(span, state)),
        LexState::Perl | LexState::Data | LexState::MasonTemplate(None) | LexState::MasonLine => None,
    }
}

impl Iterator for PerlLexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let kind = self.advance()?;
        Some(Token::new(self.token_start, self.token_end, kind))
    }
}

#[cfg(test)]
mod tests;
