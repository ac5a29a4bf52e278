//! Raw token tags produced by the scanner.
//!
//! Tags classify a lexeme by its characters alone. Several tags are
//! deliberately ambiguous (`Slash`, `Percent`, `MinusWord`,
//! `HeredocCandidate`, …): the scanner cannot tell a division from a regex,
//! so the disambiguation layer decides from the token history.

/// Raw token kind, one byte per tag.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RawTag {
    // === Names ===
    /// `foo`, `_bar`, `Deep9`.
    Ident = 0,
    /// Identifier segments joined by `::` or `'`: `Foo::Bar`, `::baz`, `Foo::`.
    PackagePath = 1,
    /// `$`, `@`, or `$#` before a name, `{`, or another sigil.
    Sigil = 2,
    /// `$_`-style punctuation variables, `$0`, `$1`, `$^W`, `$$`.
    SpecialVariable = 3,

    // === Literals ===
    /// Decimal, hex, binary, or float literal.
    Number = 16,
    /// A `'`, `"`, or `` ` `` opening a string.
    Quote = 17,
    /// Quote body text up to (not including) the closing delimiter.
    QuoteContent = 18,
    /// Closing delimiter of a quote body section.
    QuoteClose = 19,
    /// Opening delimiter read in a quote gap.
    QuoteOpenDelim = 20,
    /// `<<"EOF"`, `<<'EOF'`, `<<EOF`, `<<~EOF`: heredoc opener or shift.
    HeredocCandidate = 21,
    /// Heredoc body lines, newlines included.
    HeredocContent = 22,
    /// Heredoc terminator line, newline excluded.
    HeredocEnd = 23,
    /// Everything after `__END__` / `__DATA__`.
    DataContent = 24,

    // === Operators ===
    /// A lone `-`.
    Minus = 32,
    /// `-` immediately followed by an identifier: `-e`, `-bareword`.
    MinusWord = 33,
    /// `->`
    Arrow = 34,
    /// `=>`
    FatComma = 35,
    /// `,`
    Comma = 36,
    /// `;`
    Semicolon = 37,
    /// A lone `/`: division or regex opener.
    Slash = 38,
    /// A lone `%`: modulo or hash sigil.
    Percent = 39,
    /// A lone `&`: bit-and or code sigil.
    Ampersand = 40,
    /// A lone `*`: multiplication or glob sigil.
    Star = 41,
    /// Any other punctuation operator.
    Operator = 42,

    // === Delimiters ===
    LeftBrace = 64,
    RightBrace = 65,
    LeftParen = 66,
    RightParen = 67,
    LeftBracket = 68,
    RightBracket = 69,

    // === Mason ===
    /// `%` at the start of a template line.
    MasonLineOpener = 96,
    /// Template markup between Mason constructs.
    MasonText = 97,
    /// `<%init>`, `<%method name>`, …
    MasonBlockOpen = 98,
    /// `</%init>`, …
    MasonBlockClose = 99,
    /// `<%` followed by whitespace.
    MasonExprOpen = 100,
    /// `%>`
    MasonExprClose = 101,
    /// `<&`
    MasonCallOpen = 102,
    /// `&>`
    MasonCallClose = 103,
    /// Body of `<%doc>` / `<%text>`.
    MasonTextContent = 104,

    // === Trivia ===
    /// Spaces, tabs, carriage returns, form feeds.
    Whitespace = 112,
    /// A single `\n`.
    Newline = 113,
    /// `#` to end of line.
    LineComment = 114,
    /// `=word` at line start through the `=cut` line.
    Pod = 115,

    // === Errors ===
    /// A character the automaton does not classify.
    InvalidChar = 240,

    // === Control ===
    /// End of input. Always zero-length.
    Eof = 255,
}

impl RawTag {
    /// Fixed spelling of the tag, for tags that have one.
    pub fn fixed_lexeme(self) -> Option<&'static str> {
        match self {
            RawTag::Arrow => Some("->"),
            RawTag::FatComma => Some("=>"),
            RawTag::Comma => Some(","),
            RawTag::Semicolon => Some(";"),
            RawTag::Slash => Some("/"),
            RawTag::Percent => Some("%"),
            RawTag::Ampersand => Some("&"),
            RawTag::Star => Some("*"),
            RawTag::Minus => Some("-"),
            RawTag::LeftBrace => Some("{"),
            RawTag::RightBrace => Some("}"),
            RawTag::LeftParen => Some("("),
            RawTag::RightParen => Some(")"),
            RawTag::LeftBracket => Some("["),
            RawTag::RightBracket => Some("]"),
            RawTag::MasonLineOpener => Some("%"),
            RawTag::MasonExprClose => Some("%>"),
            RawTag::MasonCallOpen => Some("<&"),
            RawTag::MasonCallClose => Some("&>"),
            RawTag::Newline => Some("\n"),
            RawTag::Eof => Some(""),
            _ => None,
        }
    }

    /// Whitespace, newlines, comments and POD.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            RawTag::Whitespace | RawTag::Newline | RawTag::LineComment | RawTag::Pod
        )
    }
}

/// A raw token: tag plus byte length. The start offset is the scanner
/// position before the token was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}

const _: () = assert!(std::mem::size_of::<RawToken>() == 8);
