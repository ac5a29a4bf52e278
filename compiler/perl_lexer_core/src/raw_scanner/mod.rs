//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! The scanner reads the bytes at its [`Cursor`] according to the current
//! [`LexState`] and produces one [`RawToken`] per call. It does not resolve
//! keywords, split package paths, or decide between operators and terms;
//! those decisions belong to the disambiguation layer, which also owns every
//! mode transition (via [`RawScanner::begin`]).
//!
//! # Guarantees
//!
//! - Every token except `Eof` has a positive length.
//! - Token boundaries fall on UTF-8 character boundaries.
//! - Unclassifiable input yields `RawTag::InvalidChar` covering exactly one
//!   character; the scanner never refuses input.

use crate::cursor::{is_horizontal_space, is_ident_continue, is_ident_start, Cursor};
use crate::state::{HeredocState, LexState, MasonBlock, QuoteState};
use crate::tag::{RawTag, RawToken};

/// Terminators of the enclosing Mason construct that the Perl automaton
/// must recognize before its own rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Embed {
    None,
    Block(MasonBlock),
    Expr,
    Call,
}

/// Mode-aware scanner over a Perl or Mason buffer.
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
    state: LexState,
}

impl<'a> RawScanner<'a> {
    /// Create a scanner in [`LexState::Perl`].
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self::with_state(cursor, LexState::Perl)
    }

    /// Create a scanner in an arbitrary mode.
    pub fn with_state(cursor: Cursor<'a>, state: LexState) -> Self {
        Self { cursor, state }
    }

    /// Current scanning mode.
    #[inline]
    pub fn state(&self) -> &LexState {
        &self.state
    }

    /// Switch to a new scanning mode.
    #[inline]
    pub fn begin(&mut self, state: LexState) {
        self.state = state;
    }

    /// Offset of the next byte to scan.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Move the scan position, e.g. after the driver shortened or extended
    /// the current token.
    #[inline]
    pub fn set_pos(&mut self, pos: u32) {
        self.cursor.set_pos(pos);
    }

    /// Buffer length in bytes.
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.cursor.source_len()
    }

    /// Produce the next raw token.
    ///
    /// Returns `RawTag::Eof` with `len == 0` when the source is exhausted.
    /// Subsequent calls after EOF continue to return `Eof`.
    pub fn next_token(&mut self) -> RawToken {
        if self.cursor.is_eof() {
            return RawToken {
                tag: RawTag::Eof,
                len: 0,
            };
        }
        let start = self.cursor.pos();
        match &self.state {
            LexState::Perl | LexState::MasonLine => self.perl(start, Embed::None),
            LexState::MasonPerl(block) => {
                let block = *block;
                self.perl(start, Embed::Block(block))
            }
            LexState::MasonExpr => self.perl(start, Embed::Expr),
            LexState::MasonCall => self.perl(start, Embed::Call),
            LexState::Quote(quote) => {
                let quote = *quote;
                self.quote_body(start, quote)
            }
            LexState::QuoteGap(_) => self.quote_gap(start),
            LexState::Heredoc(heredoc) => heredoc_body(&mut self.cursor, start, heredoc),
            LexState::Data => {
                self.cursor.set_pos(self.cursor.source_len());
                self.token(RawTag::DataContent, start)
            }
            LexState::MasonTemplate(block) => {
                let block = *block;
                self.template(start, block)
            }
            LexState::MasonText(block) => {
                let block = *block;
                self.text_block(start, block)
            }
        }
    }

    #[inline]
    fn token(&self, tag: RawTag, start: u32) -> RawToken {
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    #[inline]
    fn bump(&mut self, n: u32, tag: RawTag, start: u32) -> RawToken {
        self.cursor.advance_n(n);
        self.token(tag, start)
    }

    // === Perl code ===

    fn perl(&mut self, start: u32, embed: Embed) -> RawToken {
        let c = self.cursor;
        match c.current() {
            b' ' | b'\t' | b'\r' | 0x0C => {
                self.cursor.eat_whitespace();
                self.token(RawTag::Whitespace, start)
            }
            b'\n' => self.bump(1, RawTag::Newline, start),
            b'#' => {
                self.cursor.eat_until_newline_or_eof();
                self.token(RawTag::LineComment, start)
            }
            b'=' if c.at_line_start() && c.peek().is_ascii_alphabetic() => self.pod(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.ident_or_package(start),
            b':' if c.peek() == b':' && is_ident_start(c.peek2()) => self.ident_or_package(start),
            b':' if c.peek() == b':' => self.bump(2, RawTag::Operator, start),
            b'0'..=b'9' => self.number(start),
            b'.' if c.peek().is_ascii_digit() => self.number(start),
            b'.' => {
                let n = match (c.peek(), c.peek2()) {
                    (b'.', b'.') => 3,
                    (b'.' | b'=', _) => 2,
                    _ => 1,
                };
                self.bump(n, RawTag::Operator, start)
            }
            b'$' => self.dollar(start),
            b'@' => self.bump(1, RawTag::Sigil, start),
            b'%' if embed == Embed::Expr && c.peek() == b'>' => {
                self.bump(2, RawTag::MasonExprClose, start)
            }
            b'%' => self.bump(1, RawTag::Percent, start),
            b'&' if embed == Embed::Call && c.peek() == b'>' => {
                self.bump(2, RawTag::MasonCallClose, start)
            }
            b'&' => self.bump(1, RawTag::Ampersand, start),
            b'*' => self.bump(1, RawTag::Star, start),
            b'-' => self.minus(start),
            b'/' => self.bump(1, RawTag::Slash, start),
            b'<' => self.less(start, embed),
            b'"' | b'\'' | b'`' => self.bump(1, RawTag::Quote, start),
            b'{' => self.bump(1, RawTag::LeftBrace, start),
            b'}' => self.bump(1, RawTag::RightBrace, start),
            b'(' => self.bump(1, RawTag::LeftParen, start),
            b')' => self.bump(1, RawTag::RightParen, start),
            b'[' => self.bump(1, RawTag::LeftBracket, start),
            b']' => self.bump(1, RawTag::RightBracket, start),
            b',' => self.bump(1, RawTag::Comma, start),
            b';' => self.bump(1, RawTag::Semicolon, start),
            b'=' => match c.peek() {
                b'>' => self.bump(2, RawTag::FatComma, start),
                b'=' | b'~' => self.bump(2, RawTag::Operator, start),
                _ => self.bump(1, RawTag::Operator, start),
            },
            b'!' | b'+' | b'~' => {
                let n = match (c.current(), c.peek()) {
                    (b'!', b'~' | b'=') | (b'+', b'+' | b'=') | (b'~', b'~') => 2,
                    _ => 1,
                };
                self.bump(n, RawTag::Operator, start)
            }
            b'>' | b'|' => {
                let first = c.current();
                let n = match (c.peek(), c.peek2()) {
                    (p, b'=') if p == first => 3,
                    (p, _) if p == first || p == b'=' => 2,
                    _ => 1,
                };
                self.bump(n, RawTag::Operator, start)
            }
            b':' | b'?' | b'^' | b'\\' => self.bump(1, RawTag::Operator, start),
            _ => self.invalid(start),
        }
    }

    fn pod(&mut self, start: u32) -> RawToken {
        loop {
            let line_start = self.cursor.pos();
            let is_cut = self.cursor.starts_with(b"=cut")
                && !is_ident_continue(self.cursor.byte_at(line_start + 4));
            self.cursor.eat_until_newline_or_eof();
            if is_cut || self.cursor.is_eof() {
                break;
            }
            self.cursor.advance();
            if self.cursor.is_eof() {
                break;
            }
        }
        self.token(RawTag::Pod, start)
    }

    /// Identifier, optionally joined into a package path by `::` or `'`.
    fn ident_or_package(&mut self, start: u32) -> RawToken {
        let mut separated = false;
        while self.cursor.starts_with(b"::") {
            self.cursor.advance_n(2);
            separated = true;
        }
        let first_segment = self.cursor.pos();
        self.cursor.advance();
        self.cursor.eat_ident_continue();
        let first_end = self.cursor.pos();

        loop {
            if self.cursor.starts_with(b"::") {
                while self.cursor.starts_with(b"::") {
                    self.cursor.advance_n(2);
                }
                if self.cursor.current() == b'\'' && is_ident_start(self.cursor.peek()) {
                    self.cursor.advance();
                }
                separated = true;
            } else if self.cursor.current() == b'\''
                && is_ident_start(self.cursor.peek())
                && !(self.cursor.pos() == first_end
                    && !separated
                    && QuoteState::for_keyword(self.cursor.slice(first_segment, first_end))
                        .is_some())
            {
                self.cursor.advance();
                separated = true;
            } else {
                break;
            }
            let segment = self.cursor.pos();
            self.cursor.eat_ident_continue();
            if self.cursor.pos() == segment {
                break;
            }
        }

        let tag = if separated {
            RawTag::PackagePath
        } else {
            RawTag::Ident
        };
        self.token(tag, start)
    }

    fn number(&mut self, start: u32) -> RawToken {
        let c = self.cursor;
        if c.current() == b'0' && matches!(c.peek(), b'x' | b'X') && c.peek2().is_ascii_hexdigit()
        {
            self.cursor.advance_n(2);
            self.cursor.eat_while(|b| b.is_ascii_hexdigit() || b == b'_');
        } else if c.current() == b'0'
            && matches!(c.peek(), b'b' | b'B')
            && matches!(c.peek2(), b'0' | b'1')
        {
            self.cursor.advance_n(2);
            self.cursor.eat_while(|b| matches!(b, b'0' | b'1' | b'_'));
        } else {
            self.cursor.eat_while(|b| b.is_ascii_digit() || b == b'_');
            if self.cursor.current() == b'.' && self.cursor.peek().is_ascii_digit() {
                self.cursor.advance();
                self.cursor.eat_while(|b| b.is_ascii_digit() || b == b'_');
            }
            let c = self.cursor;
            if matches!(c.current(), b'e' | b'E')
                && (c.peek().is_ascii_digit()
                    || (matches!(c.peek(), b'+' | b'-') && c.peek2().is_ascii_digit()))
            {
                self.cursor.advance_n(2);
                self.cursor.eat_while(|b| b.is_ascii_digit());
            }
        }
        self.token(RawTag::Number, start)
    }

    fn dollar(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        let c = self.cursor;
        let next = c.current();
        let after = c.peek();
        let names_follow =
            |b: u8, n: u8| is_ident_start(b) || b == b'{' || b == b'$' || (b == b':' && n == b':');

        match next {
            b'#' if is_ident_start(after) || after == b'{' || after == b'$' => {
                self.bump(1, RawTag::Sigil, start)
            }
            b'#' => self.bump(1, RawTag::SpecialVariable, start),
            b'$' if names_follow(after, c.peek2()) => self.token(RawTag::Sigil, start),
            b'$' => self.bump(1, RawTag::SpecialVariable, start),
            b if names_follow(b, after) || b >= 0x80 => self.token(RawTag::Sigil, start),
            b'0'..=b'9' => {
                self.cursor.eat_while(|b| b.is_ascii_digit());
                self.token(RawTag::SpecialVariable, start)
            }
            b'^' if after.is_ascii_uppercase() => self.bump(2, RawTag::SpecialVariable, start),
            b'&' | b'`' | b'\'' | b'+' | b'!' | b'@' | b'/' | b'\\' | b',' | b';' | b'.'
            | b'<' | b'>' | b'|' | b'?' | b'(' | b')' | b']' | b'-' | b'=' | b'~' | b'%'
            | b'"' | b':' | b'^' | b'*' => self.bump(1, RawTag::SpecialVariable, start),
            _ => self.token(RawTag::Sigil, start),
        }
    }

    fn minus(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        match self.cursor.current() {
            b'>' => self.bump(1, RawTag::Arrow, start),
            b'-' | b'=' => self.bump(1, RawTag::Operator, start),
            b if is_ident_start(b) => {
                self.cursor.eat_ident_continue();
                if self.cursor.starts_with(b"::") {
                    // `-Foo::Bar`: leave the package path for the next token
                    self.cursor.set_pos(start + 1);
                    return self.token(RawTag::Minus, start);
                }
                self.token(RawTag::MinusWord, start)
            }
            _ => self.token(RawTag::Minus, start),
        }
    }

    fn less(&mut self, start: u32, embed: Embed) -> RawToken {
        if let Embed::Block(block) = embed {
            let closer = block.closer();
            if self.cursor.starts_with(closer.as_bytes()) {
                return self.bump(len_u32(closer), RawTag::MasonBlockClose, start);
            }
        }
        self.cursor.advance();
        match self.cursor.current() {
            b'<' => {
                if let Some(end) = heredoc_candidate_end(&self.cursor) {
                    self.cursor.set_pos(end);
                    return self.token(RawTag::HeredocCandidate, start);
                }
                let n = if self.cursor.peek() == b'=' { 2 } else { 1 };
                self.bump(n, RawTag::Operator, start)
            }
            b'=' => {
                let n = if self.cursor.peek() == b'>' { 2 } else { 1 };
                self.bump(n, RawTag::Operator, start)
            }
            _ => self.token(RawTag::Operator, start),
        }
    }

    fn invalid(&mut self, start: u32) -> RawToken {
        self.cursor.advance_char();
        self.token(RawTag::InvalidChar, start)
    }

    // === Quote-like bodies ===

    fn quote_body(&mut self, start: u32, quote: QuoteState) -> RawToken {
        let escapes = quote.close != b'\\';
        let open = if quote.is_bracketed() {
            quote.open
        } else {
            quote.close
        };
        let mut depth = 0u32;
        loop {
            let b = self.cursor.skip_to_any3(b'\\', quote.close, open);
            if self.cursor.is_eof() {
                break;
            }
            if b == b'\\' && escapes {
                self.cursor.advance();
                if !self.cursor.is_eof() {
                    self.cursor.advance_char();
                }
            } else if b == quote.close {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                self.cursor.advance();
            } else if b == open {
                depth += 1;
                self.cursor.advance();
            } else {
                self.cursor.advance();
            }
        }
        if self.cursor.pos() > start {
            self.token(RawTag::QuoteContent, start)
        } else {
            self.bump(1, RawTag::QuoteClose, start)
        }
    }

    fn quote_gap(&mut self, start: u32) -> RawToken {
        let b = self.cursor.current();
        match b {
            b' ' | b'\t' | b'\r' | 0x0C => {
                self.cursor.eat_whitespace();
                self.token(RawTag::Whitespace, start)
            }
            b'\n' => self.bump(1, RawTag::Newline, start),
            b'#' if start > 0 && self.cursor.byte_at(start - 1).is_ascii_whitespace() => {
                self.cursor.eat_until_newline_or_eof();
                self.token(RawTag::LineComment, start)
            }
            0x21..=0x7E => self.bump(1, RawTag::QuoteOpenDelim, start),
            _ => self.invalid(start),
        }
    }

    // === Mason ===

    fn template(&mut self, start: u32, block: Option<MasonBlock>) -> RawToken {
        if let Some((tag, len)) = mason_construct(&self.cursor, block) {
            return self.bump(len, tag, start);
        }
        loop {
            self.cursor.advance_char();
            if self.cursor.is_eof() || mason_construct(&self.cursor, block).is_some() {
                break;
            }
        }
        self.token(RawTag::MasonText, start)
    }

    fn text_block(&mut self, start: u32, block: MasonBlock) -> RawToken {
        let closer = block.closer();
        match self.cursor.find(closer.as_bytes()) {
            Some(at) if at == start => self.bump(len_u32(closer), RawTag::MasonBlockClose, start),
            Some(at) => {
                self.cursor.set_pos(at);
                self.token(RawTag::MasonTextContent, start)
            }
            None => {
                self.cursor.set_pos(self.cursor.source_len());
                self.token(RawTag::MasonTextContent, start)
            }
        }
    }
}

/// Heredoc body: content lines, then the terminator line as a separate token.
fn heredoc_body(cursor: &mut Cursor<'_>, start: u32, heredoc: &HeredocState) -> RawToken {
    while !cursor.is_eof() {
        let line_start = cursor.pos();
        cursor.eat_until_newline_or_eof();
        let line = cursor.slice(line_start, cursor.pos());
        let line = line.strip_suffix('\r').unwrap_or(line);
        let candidate = if heredoc.indented {
            line.trim_start_matches([' ', '\t'])
        } else {
            line
        };
        if candidate == &*heredoc.marker {
            if line_start > start {
                cursor.set_pos(line_start);
                return RawToken {
                    tag: RawTag::HeredocContent,
                    len: line_start - start,
                };
            }
            return RawToken {
                tag: RawTag::HeredocEnd,
                len: cursor.pos() - start,
            };
        }
        if !cursor.is_eof() {
            cursor.advance();
        }
    }
    RawToken {
        tag: RawTag::HeredocContent,
        len: cursor.pos() - start,
    }
}

/// End offset of a heredoc opener starting at the second `<` of `<<`.
///
/// Accepts `<<"X"`, `<<'X'`, `<<X`, and the `<<~` forms. Quoted markers
/// must be non-empty and closed on the same line.
fn heredoc_candidate_end(cursor: &Cursor<'_>) -> Option<u32> {
    let mut pos = cursor.pos() + 1;
    if cursor.byte_at(pos) == b'~' {
        pos += 1;
    }
    let first = cursor.byte_at(pos);
    if first == b'"' || first == b'\'' {
        let mut end = pos + 1;
        loop {
            let b = cursor.byte_at(end);
            if b == first {
                return (end > pos + 1).then_some(end + 1);
            }
            if b == b'\n' || end >= cursor.source_len() {
                return None;
            }
            end += 1;
        }
    }
    if is_ident_start(first) {
        let mut end = pos + 1;
        while is_ident_continue(cursor.byte_at(end)) {
            end += 1;
        }
        return Some(end);
    }
    None
}

/// Mason construct starting at the cursor, as `(tag, len)`.
fn mason_construct(cursor: &Cursor<'_>, block: Option<MasonBlock>) -> Option<(RawTag, u32)> {
    match cursor.current() {
        b'%' if cursor.at_line_start() => {
            let next = cursor.peek();
            let ends_line = next == b'\n' || cursor.pos() + 1 >= cursor.source_len();
            (ends_line || is_horizontal_space(next)).then_some((RawTag::MasonLineOpener, 1))
        }
        b'<' => match cursor.peek() {
            b'&' => Some((RawTag::MasonCallOpen, 2)),
            b'%' => mason_tag(cursor),
            b'/' => {
                let closer = block?.closer();
                cursor
                    .starts_with(closer.as_bytes())
                    .then(|| (RawTag::MasonBlockClose, len_u32(closer)))
            }
            _ => None,
        },
        _ => None,
    }
}

/// `<% ` substitution opener or `<%name ...>` block opener.
fn mason_tag(cursor: &Cursor<'_>) -> Option<(RawTag, u32)> {
    let start = cursor.pos();
    let after = cursor.byte_at(start + 2);
    if after.is_ascii_whitespace() {
        return Some((RawTag::MasonExprOpen, 2));
    }
    let mut name_end = start + 2;
    while cursor.byte_at(name_end).is_ascii_lowercase() {
        name_end += 1;
    }
    MasonBlock::from_name(cursor.slice(start + 2, name_end))?;
    let mut end = name_end;
    loop {
        match cursor.byte_at(end) {
            b'>' => return Some((RawTag::MasonBlockOpen, end + 1 - start)),
            b' ' | b'\t' if end == name_end => end += 1,
            b'\n' | 0 => return None,
            _ if end > name_end => end += 1,
            _ => return None,
        }
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "static tag spellings are a handful of bytes"
)]
fn len_u32(text: &str) -> u32 {
    text.len() as u32
}
