//! Byte cursor over a Perl source buffer.
//!
//! The cursor advances through the source byte-by-byte. Reads past the end
//! of the source return `0x00`, so scanning loops terminate on any predicate
//! that rejects NUL. Interior NUL bytes are distinguished from the end of the
//! buffer by comparing `pos` against `source_len`.
//!
//! All bytes the scanner stops on are ASCII, so every position handed out
//! by the cursor falls on a UTF-8 character boundary.

/// Cursor over the source bytes.
///
/// The cursor is [`Copy`], which makes lookahead snapshots free: clone it,
/// scan ahead, and drop the clone.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    buf: &'a [u8],
    pos: u32,
}

/// Size assertion: Cursor should stay within three machine words plus a `u32`.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 40);

impl<'a> Cursor<'a> {
    /// Create a cursor at position 0.
    pub fn new(source: &'a str) -> Self {
        Self::at(source, 0)
    }

    /// Create a cursor at an arbitrary offset.
    ///
    /// Offsets past the end are clamped to the end of the source.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "sources are limited to u32::MAX bytes by the lexer entry points"
    )]
    pub fn at(source: &'a str, pos: u32) -> Self {
        let len = source.len() as u32;
        Self {
            source,
            buf: source.as_bytes(),
            pos: pos.min(len),
        }
    }

    /// Returns the byte at the current position, or `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Returns the byte one position ahead of current.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos + 1)
    }

    /// Returns the byte two positions ahead of current.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.byte_at(self.pos + 2)
    }

    /// Returns the byte at an absolute offset, or `0x00` past the end.
    #[inline]
    pub fn byte_at(&self, pos: u32) -> u8 {
        self.buf.get(pos as usize).copied().unwrap_or(0)
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` once every source byte has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len()
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Reposition the cursor. Offsets past the end are clamped.
    #[inline]
    pub fn set_pos(&mut self, pos: u32) {
        self.pos = pos.min(self.source_len());
    }

    /// Length of the source in bytes.
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "sources are limited to u32::MAX bytes by the lexer entry points"
    )]
    pub fn source_len(&self) -> u32 {
        self.buf.len() as u32
    }

    /// The whole source buffer.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Extract a source substring.
    ///
    /// # Contract
    ///
    /// `start..end` must lie within the source and on character boundaries,
    /// which holds for every boundary the scanner produces.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        &self.source[start as usize..end as usize]
    }

    /// Extract a source substring from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Remaining bytes from the current position.
    #[inline]
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos as usize..]
    }

    /// Returns `true` if the remaining input starts with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Returns `true` if the current position is at the start of a line.
    #[inline]
    pub fn at_line_start(&self) -> bool {
        self.pos == 0 || self.byte_at(self.pos - 1) == b'\n'
    }

    /// Decode the character at the current position.
    pub fn current_char(&self) -> Option<char> {
        self.source.get(self.pos as usize..)?.chars().next()
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false` so the loop stops at EOF.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance the cursor past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.pos = (self.pos + width).min(self.source_len());
    }

    /// Advance past identifier-continue characters.
    ///
    /// ASCII alphanumerics and `_` take the fast path. Non-ASCII characters
    /// are decoded and accepted when they are Unicode letters or digits.
    pub fn eat_ident_continue(&mut self) {
        loop {
            let b = self.current();
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.pos += 1;
            } else if b >= 0x80 {
                match self.current_char() {
                    Some(c) if c.is_alphanumeric() => self.advance_char(),
                    _ => break,
                }
            } else {
                break;
            }
        }
    }

    /// Advance past horizontal whitespace: space, tab, carriage return, form feed.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(is_horizontal_space);
    }

    /// Advance past any whitespace, vertical tab and Unicode spaces included.
    pub fn eat_unicode_whitespace(&mut self) {
        loop {
            let b = self.current();
            if b.is_ascii_whitespace() || b == 0x0B {
                self.pos += 1;
            } else if b >= 0x80 {
                match self.current_char() {
                    Some(c) if c.is_whitespace() => self.advance_char(),
                    _ => break,
                }
            } else {
                break;
            }
        }
    }

    /// Advance to the next `\n` byte or EOF using SIMD-accelerated search.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        match memchr::memchr(b'\n', self.rest()) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len(),
        }
    }

    /// Advance past the next `\n` (inclusive) or to EOF.
    pub fn eat_line(&mut self) {
        self.eat_until_newline_or_eof();
        if self.current() == b'\n' {
            self.pos += 1;
        }
    }

    /// Advance to the nearest of three bytes using SIMD-accelerated search.
    /// Returns the byte found, or `0` at EOF (cursor positioned at the end).
    ///
    /// Used by the quote body scanner with `\`, the closing delimiter, and
    /// the opening bracket (or the closing delimiter again when unbracketed).
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_any3(&mut self, a: u8, b: u8, c: u8) -> u8 {
        if let Some(offset) = memchr::memchr3(a, b, c, self.rest()) {
            self.pos += offset as u32;
            self.current()
        } else {
            self.pos = self.source_len();
            0
        }
    }

    /// Find `needle` in the remaining input, returning its absolute offset.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offsets are bounded by source_len which fits in u32"
    )]
    pub fn find(&self, needle: &[u8]) -> Option<u32> {
        memchr::memmem::find(self.rest(), needle).map(|offset| self.pos + offset as u32)
    }
}

/// Horizontal whitespace accepted between Perl tokens.
#[inline]
pub fn is_horizontal_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | 0x0C)
}

/// ASCII identifier start: letter or underscore.
#[inline]
pub fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// ASCII identifier continuation: letter, digit, or underscore.
#[inline]
pub fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
