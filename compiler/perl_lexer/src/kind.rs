//! Token kinds emitted by the lexer.

use std::fmt;

/// Classification of an emitted token.
///
/// Closed set: consumers match on it exhaustively and new constructs are
/// added as new variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Trivia ===
    /// Spaces, tabs, carriage returns, form feeds, and newlines.
    Whitespace,
    /// `#` to end of line.
    Comment,
    /// `=word` at line start through the `=cut` line.
    Pod,
    /// Everything after `__END__` / `__DATA__`.
    DataContent,

    // === Names ===
    Identifier,
    /// Name after `sub`.
    SubName,
    /// Bareword used as a string: before `=>`, alone in `{}`, `-bareword`.
    StringBareword,
    Package,
    /// The builtin package (`CORE` by default).
    PackageCore,
    Keyword,
    /// `and`, `or`, `not`, `xor`, `eq`, `ne`, `lt`, `gt`, `le`, `ge`, `cmp`, `x`.
    OperatorWord,

    // === Variables ===
    /// `$`, `@`, `%`, `&`, `*`, `$#`.
    Sigil,
    /// Name directly after a sigil.
    VariableName,
    /// Punctuation, digit, and caret variables: `$_`-style, `$0`, `$^W`, `$$`, `%+`.
    SpecialVariable,

    // === Literals ===
    Number,
    /// `q`, `qq`, `qw`, `qx`, `m`, `qr`, `s`, `tr`, `y`.
    QuoteLikeOp,
    QuoteOpen,
    /// Delimiter between the sections of `s/a/b/` or `tr/a/b/`.
    QuoteSeparator,
    QuoteClose,
    StringContent,
    /// Trailing modifier letters of a regex or substitution.
    RegexModifiers,
    /// `<<` or `<<~`.
    HeredocOpener,
    HeredocMarker,
    HeredocContent,
    /// The terminator line of a heredoc.
    HeredocEnd,

    // === Operators ===
    Operator,
    /// Binary `-`.
    OperatorMinus,
    /// Prefix `-`.
    OperatorUnaryMinus,
    /// `-e`, `-f`, `-d`, …
    OperatorFiletest,
    Arrow,
    FatComma,
    Comma,
    Semicolon,

    // === Structure ===
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    /// `__END__` or `__DATA__`.
    DataMarker,

    // === Errors ===
    BadCharacter,

    // === Mason ===
    /// `%` at line start.
    MasonLineOpener,
    /// Template markup.
    MasonTemplateHtml,
    /// `<%init>`, `<%method name>`, …
    MasonBlockOpener,
    /// `</%init>`, …
    MasonBlockCloser,
    /// `<%`
    MasonExprOpener,
    /// `%>`
    MasonExprCloser,
    /// `<&`
    MasonCallOpener,
    /// `&>`
    MasonCallCloser,
    /// Body of `<%doc>` / `<%text>`.
    MasonTextContent,
}

impl TokenKind {
    /// Whether the token is recorded in significant history.
    pub fn is_significant(self) -> bool {
        !matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::Comment
                | TokenKind::Pod
                | TokenKind::DataContent
                | TokenKind::MasonTemplateHtml
                | TokenKind::MasonTextContent
        )
    }

    /// The token set a parser treats as comments.
    ///
    /// Includes the Mason line opener and template markup, which the parser
    /// skips, although the opener counts as significant for disambiguation.
    pub fn is_parser_comment(self) -> bool {
        matches!(
            self,
            TokenKind::Comment
                | TokenKind::Pod
                | TokenKind::MasonLineOpener
                | TokenKind::MasonTemplateHtml
        )
    }

    /// Whether a term just ended, so that `-`, `/`, `%`, `<<` and `x`
    /// that follow are binary operators.
    pub fn is_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::VariableName
                | TokenKind::SpecialVariable
                | TokenKind::Number
                | TokenKind::QuoteClose
                | TokenKind::RegexModifiers
                | TokenKind::HeredocMarker
                | TokenKind::Package
                | TokenKind::PackageCore
                | TokenKind::StringBareword
                | TokenKind::RightParen
                | TokenKind::RightBracket
                | TokenKind::RightBrace
        )
    }

    /// Points at which a fresh lexing pass may begin.
    pub fn is_statement_boundary(self) -> bool {
        matches!(
            self,
            TokenKind::Semicolon
                | TokenKind::MasonLineOpener
                | TokenKind::MasonBlockOpener
                | TokenKind::MasonBlockCloser
                | TokenKind::MasonExprCloser
                | TokenKind::MasonCallCloser
        )
    }

    /// Human-readable name for diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "whitespace",
            TokenKind::Comment => "comment",
            TokenKind::Pod => "pod",
            TokenKind::DataContent => "data content",
            TokenKind::Identifier => "identifier",
            TokenKind::SubName => "sub name",
            TokenKind::StringBareword => "string bareword",
            TokenKind::Package => "package",
            TokenKind::PackageCore => "core package",
            TokenKind::Keyword => "keyword",
            TokenKind::OperatorWord => "operator word",
            TokenKind::Sigil => "sigil",
            TokenKind::VariableName => "variable name",
            TokenKind::SpecialVariable => "special variable",
            TokenKind::Number => "number",
            TokenKind::QuoteLikeOp => "quote-like operator",
            TokenKind::QuoteOpen => "opening quote",
            TokenKind::QuoteSeparator => "quote separator",
            TokenKind::QuoteClose => "closing quote",
            TokenKind::StringContent => "string content",
            TokenKind::RegexModifiers => "regex modifiers",
            TokenKind::HeredocOpener => "heredoc opener",
            TokenKind::HeredocMarker => "heredoc marker",
            TokenKind::HeredocContent => "heredoc content",
            TokenKind::HeredocEnd => "heredoc terminator",
            TokenKind::Operator => "operator",
            TokenKind::OperatorMinus => "minus",
            TokenKind::OperatorUnaryMinus => "unary minus",
            TokenKind::OperatorFiletest => "filetest operator",
            TokenKind::Arrow => "`->`",
            TokenKind::FatComma => "`=>`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::LeftBrace => "`{`",
            TokenKind::RightBrace => "`}`",
            TokenKind::LeftParen => "`(`",
            TokenKind::RightParen => "`)`",
            TokenKind::LeftBracket => "`[`",
            TokenKind::RightBracket => "`]`",
            TokenKind::DataMarker => "data marker",
            TokenKind::BadCharacter => "bad character",
            TokenKind::MasonLineOpener => "mason line opener",
            TokenKind::MasonTemplateHtml => "template markup",
            TokenKind::MasonBlockOpener => "mason block opener",
            TokenKind::MasonBlockCloser => "mason block closer",
            TokenKind::MasonExprOpener => "`<%`",
            TokenKind::MasonExprCloser => "`%>`",
            TokenKind::MasonCallOpener => "`<&`",
            TokenKind::MasonCallCloser => "`&>`",
            TokenKind::MasonTextContent => "mason text",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
