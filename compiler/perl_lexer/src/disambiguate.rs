//! Disambiguation rules.
//!
//! Turns each raw tag into a [`TokenKind`] using only the token history, the
//! state stack, the queue, pending heredocs and forward lookahead in the
//! buffer. Rules that split a lexeme emit the first piece directly and
//! queue the rest; rules that enter or leave a construct push or pop the
//! scanner mode.

use perl_lexer_core::cursor::is_ident_start;
use perl_lexer_core::{Cursor, HeredocState, LexState, MasonBlock, QuoteState, RawTag};

use crate::keywords;
use crate::lexer::PendingHeredoc;
use crate::package_util::{canonical_package_name, ends_with_separator, split_ambiguous_package};
use crate::{LexError, PerlLexer, TokenKind};

impl PerlLexer<'_> {
    /// Classify the raw token spanning `token_start..token_end`.
    pub(crate) fn classify(&mut self, tag: RawTag) -> TokenKind {
        match tag {
            RawTag::Ident => self.parse_identifier(),
            RawTag::PackagePath => self.parse_package_path(),
            RawTag::Sigil => TokenKind::Sigil,
            RawTag::SpecialVariable => TokenKind::SpecialVariable,

            RawTag::Number => TokenKind::Number,
            RawTag::Quote => self.open_string(),
            RawTag::QuoteContent => TokenKind::StringContent,
            RawTag::QuoteClose => self.close_quote_section(),
            RawTag::QuoteOpenDelim => self.open_quote_section(),
            RawTag::HeredocCandidate => self.parse_heredoc_opener(),
            RawTag::HeredocContent => TokenKind::HeredocContent,
            RawTag::HeredocEnd => {
                self.pop_state();
                TokenKind::HeredocEnd
            }
            RawTag::DataContent => TokenKind::DataContent,

            RawTag::Minus => self.parse_minus(),
            RawTag::MinusWord => self.parse_bareword_minus(),
            RawTag::Arrow => TokenKind::Arrow,
            RawTag::FatComma => TokenKind::FatComma,
            RawTag::Comma => TokenKind::Comma,
            RawTag::Semicolon => TokenKind::Semicolon,
            RawTag::Slash => self.parse_slash(),
            RawTag::Percent | RawTag::Ampersand | RawTag::Star => self.parse_sigil_or_operator(tag),
            RawTag::Operator => TokenKind::Operator,

            RawTag::LeftBrace => TokenKind::LeftBrace,
            RawTag::RightBrace => TokenKind::RightBrace,
            RawTag::LeftParen => TokenKind::LeftParen,
            RawTag::RightParen => TokenKind::RightParen,
            RawTag::LeftBracket => TokenKind::LeftBracket,
            RawTag::RightBracket => TokenKind::RightBracket,

            RawTag::MasonLineOpener => self.enter(LexState::MasonLine, TokenKind::MasonLineOpener),
            RawTag::MasonText => TokenKind::MasonTemplateHtml,
            RawTag::MasonBlockOpen => self.open_mason_block(),
            RawTag::MasonExprOpen => self.enter(LexState::MasonExpr, TokenKind::MasonExprOpener),
            RawTag::MasonCallOpen => self.enter(LexState::MasonCall, TokenKind::MasonCallOpener),
            RawTag::MasonBlockClose => self.leave(TokenKind::MasonBlockCloser),
            RawTag::MasonExprClose => self.leave(TokenKind::MasonExprCloser),
            RawTag::MasonCallClose => self.leave(TokenKind::MasonCallCloser),
            RawTag::MasonTextContent => TokenKind::MasonTextContent,

            RawTag::Whitespace => TokenKind::Whitespace,
            RawTag::Newline => self.parse_newline(),
            RawTag::LineComment => TokenKind::Comment,
            RawTag::Pod => TokenKind::Pod,

            RawTag::InvalidChar => self.lex_bad_character(),
            RawTag::Eof => unreachable!("end of buffer is handled before classification"),
        }
    }

    fn enter(&mut self, state: LexState, kind: TokenKind) -> TokenKind {
        self.push_state();
        self.scanner.begin(state);
        kind
    }

    fn leave(&mut self, kind: TokenKind) -> TokenKind {
        self.pop_state();
        kind
    }

    // === History queries ===

    /// A term just ended, so an ambiguous operator character is binary.
    fn last_is_operand(&self) -> bool {
        match self.history.last_significant() {
            Some(entry) if entry.kind == TokenKind::Identifier => {
                !keywords::is_list_operator(&entry.text)
            }
            Some(entry) => entry.kind.is_operand(),
            None => false,
        }
    }

    fn last_keyword_is(&self, pred: impl Fn(&str) -> bool) -> bool {
        self.history
            .last_significant()
            .is_some_and(|entry| entry.kind == TokenKind::Keyword && pred(&entry.text))
    }

    fn after_sigil(&self) -> bool {
        self.history.last_kind() == Some(TokenKind::Sigil)
    }

    // === Lookahead ===

    /// First offset at or after `pos` that is not whitespace or inside a
    /// `#` comment.
    pub fn next_significant_position(&self, pos: u32) -> u32 {
        let mut cursor = Cursor::at(self.source, pos);
        loop {
            cursor.eat_unicode_whitespace();
            if cursor.current() != b'#' || cursor.is_eof() {
                return cursor.pos();
            }
            cursor.eat_until_newline_or_eof();
        }
    }

    /// First character after the current token that is not whitespace or
    /// inside a comment.
    pub fn next_significant_char(&self) -> Option<char> {
        self.char_at(self.next_significant_position(self.token_end))
    }

    /// First character after the current token that is not whitespace.
    pub fn next_non_space_char(&self) -> Option<char> {
        let mut cursor = Cursor::at(self.source, self.token_end);
        cursor.eat_unicode_whitespace();
        cursor.current_char()
    }

    /// Character directly after the current token.
    pub fn next_char(&self) -> Option<char> {
        self.char_at(self.token_end)
    }

    /// Whether the next significant text after the current token is `=>`.
    pub fn followed_by_fat_comma(&self) -> bool {
        self.followed_by(b"=>")
    }

    fn followed_by(&self, text: &[u8]) -> bool {
        let pos = self.next_significant_position(self.token_end);
        Cursor::at(self.source, pos).starts_with(text)
    }

    fn char_at(&self, pos: u32) -> Option<char> {
        Cursor::at(self.source, pos).current_char()
    }

    fn byte_at(&self, pos: u32) -> u8 {
        Cursor::at(self.source, pos).current()
    }

    /// The current token is alone inside braces: `{foo}`, `{ -bar }`.
    pub fn is_braced(&self) -> bool {
        self.history.last_significant_kind() == Some(TokenKind::LeftBrace)
            && self.next_significant_char() == Some('}')
    }

    // === Splitting ===

    /// Emit `token_start..split` as `kind` now and queue the pieces that
    /// follow, each given as `(end, kind)` and starting where the previous
    /// one ended.
    fn split_current(&mut self, split: u32, kind: TokenKind, rest: &[(u32, TokenKind)]) -> TokenKind {
        let mut start = split;
        for &(end, piece) in rest {
            self.preparsed.push(start, end, piece);
            start = end;
        }
        self.token_end = split;
        self.scanner.set_pos(start);
        kind
    }

    // === Names ===

    fn parse_identifier(&mut self) -> TokenKind {
        let text = self.token_text();

        if self.after_sigil() {
            return TokenKind::VariableName;
        }
        if self.followed_by_fat_comma() || self.is_braced() {
            return TokenKind::StringBareword;
        }
        if self.history.last_significant_kind() == Some(TokenKind::Arrow) {
            return TokenKind::Identifier;
        }
        if self.last_keyword_is(|word| word == "sub") {
            return TokenKind::SubName;
        }
        if self.last_keyword_is(keywords::introduces_package) {
            return self.parse_package_canonical();
        }
        if let Some(quote) = QuoteState::for_keyword(text) {
            if self.has_quote_delimiter() {
                return self.enter(LexState::QuoteGap(quote), TokenKind::QuoteLikeOp);
            }
        }
        if keywords::is_data_marker(text) && *self.scanner.state() == LexState::Perl {
            self.scanner.begin(LexState::Data);
            return TokenKind::DataMarker;
        }
        if text == "x" && self.last_is_operand() {
            return TokenKind::OperatorWord;
        }
        keywords::lookup(text).unwrap_or(TokenKind::Identifier)
    }

    /// A quote-like keyword is only an operator when a delimiter follows.
    fn has_quote_delimiter(&self) -> bool {
        if self.byte_at(self.token_end) == b'#' {
            return true;
        }
        let pos = self.next_significant_position(self.token_end);
        if pos >= self.scanner.source_len() {
            return false;
        }
        match self.byte_at(pos) {
            b'=' => self.byte_at(pos + 1) != b'>',
            b',' | b';' | b')' | b'_' => false,
            b => b.is_ascii_graphic() && !b.is_ascii_alphanumeric(),
        }
    }

    /// `Package` or `PackageCore` for the whole current token.
    pub fn parse_package_canonical(&self) -> TokenKind {
        self.package_kind(self.token_text())
    }

    fn package_kind(&self, name: &str) -> TokenKind {
        if canonical_package_name(name) == *self.config.core_package {
            TokenKind::PackageCore
        } else {
            TokenKind::Package
        }
    }

    fn parse_package_path(&mut self) -> TokenKind {
        let text = self.token_text();
        let split = split_ambiguous_package(text).map(|(prefix, _)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "prefix is shorter than the token, which fits in u32"
            )]
            let prefix = prefix as u32;
            self.token_start + prefix
        });

        if self.after_sigil() {
            return match split {
                Some(at) => self.split_package(at, TokenKind::VariableName),
                None => TokenKind::VariableName,
            };
        }
        if ends_with_separator(text)
            || self.last_keyword_is(keywords::introduces_package)
            || self.followed_by(b"->")
        {
            return self.parse_package_canonical();
        }
        if self.followed_by_fat_comma() {
            return TokenKind::StringBareword;
        }
        let name_kind = if self.last_keyword_is(|word| word == "sub") {
            TokenKind::SubName
        } else {
            TokenKind::Identifier
        };
        match split {
            Some(at) => self.split_package(at, name_kind),
            None => self.parse_package_canonical(),
        }
    }

    /// `Foo::Bar::` + `baz`.
    fn split_package(&mut self, at: u32, name_kind: TokenKind) -> TokenKind {
        let prefix = &self.source[self.token_start as usize..at as usize];
        let prefix_kind = self.package_kind(prefix);
        let end = self.token_end;
        self.split_current(at, prefix_kind, &[(end, name_kind)])
    }

    // === Operators ===

    fn parse_minus(&mut self) -> TokenKind {
        if self.last_is_operand() {
            TokenKind::OperatorMinus
        } else {
            TokenKind::OperatorUnaryMinus
        }
    }

    /// `-word`: binary minus, filetest, string bareword, or unary minus.
    pub fn parse_bareword_minus(&mut self) -> TokenKind {
        let minus_end = self.token_start + 1;
        if self.last_is_operand() {
            self.set_token_end(minus_end);
            return TokenKind::OperatorMinus;
        }
        let fat_comma = self.followed_by_fat_comma();
        if keywords::is_filetest(&self.token_text()[1..]) && !fat_comma {
            return TokenKind::OperatorFiletest;
        }
        if fat_comma || self.is_braced() {
            return TokenKind::StringBareword;
        }
        self.set_token_end(minus_end);
        TokenKind::OperatorUnaryMinus
    }

    fn parse_slash(&mut self) -> TokenKind {
        if self.last_is_operand() {
            let end = self.token_end;
            let extra = match (self.byte_at(end), self.byte_at(end + 1)) {
                (b'/', b'=') => 2,
                (b'/' | b'=', _) => 1,
                _ => 0,
            };
            self.set_token_end(end + extra);
            return TokenKind::Operator;
        }
        let regex = QuoteState::pending(1, true).with_delimiter(b'/');
        self.enter(LexState::Quote(regex), TokenKind::QuoteOpen)
    }

    /// `%`, `&`, `*`: sigil before a name, operator after a term.
    fn parse_sigil_or_operator(&mut self, tag: RawTag) -> TokenKind {
        let end = self.token_end;
        let next = self.byte_at(end);
        let after = self.byte_at(end + 1);

        if !self.last_is_operand() {
            if is_ident_start(next)
                || next == b'{'
                || next == b'$'
                || (next == b':' && after == b':')
                || (next >= 0x80 && self.char_at(end).is_some_and(char::is_alphabetic))
            {
                return TokenKind::Sigil;
            }
            if tag == RawTag::Percent && matches!(next, b'+' | b'-' | b'!') {
                self.set_token_end(end + 1);
                return TokenKind::SpecialVariable;
            }
        }

        let doubled = match tag {
            RawTag::Ampersand => b'&',
            RawTag::Star => b'*',
            _ => 0,
        };
        let extra = match (next, after) {
            (n, b'=') if doubled != 0 && n == doubled => 2,
            (n, _) if doubled != 0 && n == doubled => 1,
            (b'=', _) => 1,
            _ => 0,
        };
        self.set_token_end(end + extra);
        TokenKind::Operator
    }

    // === Quotes ===

    fn open_string(&mut self) -> TokenKind {
        let delimiter = self.byte_at(self.token_start);
        let quote = QuoteState::pending(1, false).with_delimiter(delimiter);
        self.enter(LexState::Quote(quote), TokenKind::QuoteOpen)
    }

    fn open_quote_section(&mut self) -> TokenKind {
        let LexState::QuoteGap(gap) = *self.scanner.state() else {
            return TokenKind::QuoteOpen;
        };
        let delimiter = self.byte_at(self.token_start);
        self.scanner.begin(LexState::Quote(gap.with_delimiter(delimiter)));
        TokenKind::QuoteOpen
    }

    fn close_quote_section(&mut self) -> TokenKind {
        let LexState::Quote(quote) = *self.scanner.state() else {
            return TokenKind::QuoteClose;
        };
        if quote.sections > 1 {
            let next = QuoteState {
                sections: quote.sections - 1,
                ..quote
            };
            if quote.is_bracketed() {
                self.scanner.begin(LexState::QuoteGap(next));
                return TokenKind::QuoteClose;
            }
            self.scanner.begin(LexState::Quote(next));
            return TokenKind::QuoteSeparator;
        }

        self.pop_state();
        if quote.modifiers {
            let mut cursor = Cursor::at(self.source, self.token_end);
            cursor.eat_while(|b| b.is_ascii_alphabetic());
            let end = cursor.pos();
            if end > self.token_end {
                let close_end = self.token_end;
                return self.split_current(
                    close_end,
                    TokenKind::QuoteClose,
                    &[(end, TokenKind::RegexModifiers)],
                );
            }
        }
        TokenKind::QuoteClose
    }

    // === Heredocs ===

    fn parse_heredoc_opener(&mut self) -> TokenKind {
        let start = self.token_start;
        if self.last_is_operand() {
            self.set_token_end(start + 2);
            return TokenKind::Operator;
        }

        let end = self.token_end;
        let indented = self.byte_at(start + 2) == b'~';
        let opener_end = start + if indented { 3 } else { 2 };
        let quoted = matches!(self.byte_at(opener_end), b'"' | b'\'');
        let (marker_start, marker_end) = if quoted {
            (opener_end + 1, end - 1)
        } else {
            (opener_end, end)
        };

        let marker = &self.source[marker_start as usize..marker_end as usize];
        self.pending_heredocs.push_back(PendingHeredoc {
            state: HeredocState {
                marker: marker.into(),
                indented,
            },
            opened_at: start,
        });

        if quoted {
            self.split_current(
                opener_end,
                TokenKind::HeredocOpener,
                &[
                    (marker_start, TokenKind::QuoteOpen),
                    (marker_end, TokenKind::HeredocMarker),
                    (end, TokenKind::QuoteClose),
                ],
            )
        } else {
            self.split_current(
                opener_end,
                TokenKind::HeredocOpener,
                &[(end, TokenKind::HeredocMarker)],
            )
        }
    }

    /// Newlines start pending heredoc bodies and end `%` lines.
    fn parse_newline(&mut self) -> TokenKind {
        if self.scanner.state().is_perl_code() {
            if let Some(pending) = self.pending_heredocs.pop_front() {
                self.push_state_from(pending.opened_at);
                self.scanner.begin(LexState::Heredoc(pending.state));
            } else if *self.scanner.state() == LexState::MasonLine {
                self.pop_state();
            }
        }
        TokenKind::Whitespace
    }

    // === Mason ===

    fn open_mason_block(&mut self) -> TokenKind {
        let name: String = self.token_text()[2..]
            .chars()
            .take_while(char::is_ascii_lowercase)
            .collect();
        match MasonBlock::from_name(&name) {
            Some(block) => self.enter(block.body_state(), TokenKind::MasonBlockOpener),
            None => TokenKind::MasonTemplateHtml,
        }
    }

    // === Recovery ===

    /// A character the scanner could not classify.
    ///
    /// Letters start an identifier that extends through letters, digits and
    /// `_`; anything else becomes a `BadCharacter` and an error.
    pub fn lex_bad_character(&mut self) -> TokenKind {
        match self.token_text().chars().next() {
            Some(c) if c == '_' || c.is_alphabetic() => {
                let mut cursor = Cursor::at(self.source, self.token_end);
                cursor.eat_ident_continue();
                self.set_token_end(cursor.pos());
                if self.after_sigil() {
                    TokenKind::VariableName
                } else {
                    TokenKind::Identifier
                }
            }
            Some(c) => {
                self.errors.push(LexError::invalid_character(self.token_span(), c));
                TokenKind::BadCharacter
            }
            None => TokenKind::BadCharacter,
        }
    }
}
