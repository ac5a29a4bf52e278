//! Emitted tokens.

use crate::{Span, TokenKind};

/// A classified token covering `start..end` of the lexed buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub start: u32,
    pub end: u32,
    pub kind: TokenKind,
}

const _: () = assert!(std::mem::size_of::<Token>() <= 12);

impl Token {
    #[inline]
    pub const fn new(start: u32, end: u32, kind: TokenKind) -> Self {
        Token { start, end, kind }
    }

    #[inline]
    pub const fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The token's text within `source`.
    ///
    /// Returns `""` when the bounds do not fall inside `source`.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or_default()
    }
}
