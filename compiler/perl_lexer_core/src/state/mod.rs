//! Scanner modes.
//!
//! A [`LexState`] tells the [`RawScanner`](crate::RawScanner) how to read the
//! bytes at the cursor: as Perl code, as the body of a quote-like operator,
//! as heredoc lines, or as Mason template markup. The scanner never changes
//! its own mode; the disambiguation layer does, pushing the current mode
//! before entering a nested construct and popping it afterwards.

/// Scanning mode of the raw scanner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LexState {
    /// Plain Perl code.
    #[default]
    Perl,
    /// Body of a quote-like construct, up to the closing delimiter.
    Quote(QuoteState),
    /// Between a quote-like keyword (or a closed bracketed section) and the
    /// next opening delimiter. Only whitespace and comments are allowed here.
    QuoteGap(QuoteState),
    /// Heredoc body lines, up to the terminator line.
    Heredoc(HeredocState),
    /// Everything after `__END__` / `__DATA__`.
    Data,
    /// Mason template markup. `Some(block)` inside a template-bodied block
    /// such as `<%method>`, which ends at the block's closing tag.
    MasonTemplate(Option<MasonBlock>),
    /// Perl code inside a Perl-bodied Mason block such as `<%init>`.
    MasonPerl(MasonBlock),
    /// Raw text inside `<%doc>` or `<%text>`.
    MasonText(MasonBlock),
    /// Perl code after a `%` line opener, up to the end of the line.
    MasonLine,
    /// Perl expression inside `<% ... %>`.
    MasonExpr,
    /// Component call inside `<& ... &>`.
    MasonCall,
}

impl LexState {
    /// Modes in which reaching the end of the buffer is not an error.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LexState::Perl | LexState::Data | LexState::MasonTemplate(None)
        )
    }

    /// Modes whose bytes are scanned with the Perl code automaton.
    pub fn is_perl_code(&self) -> bool {
        matches!(
            self,
            LexState::Perl
                | LexState::MasonPerl(_)
                | LexState::MasonLine
                | LexState::MasonExpr
                | LexState::MasonCall
        )
    }

    /// Short human-readable name, used in diagnostics and traces.
    pub fn describe(&self) -> &'static str {
        match self {
            LexState::Perl => "perl code",
            LexState::Quote(_) => "quote-like body",
            LexState::QuoteGap(_) => "quote-like delimiter",
            LexState::Heredoc(_) => "heredoc body",
            LexState::Data => "data section",
            LexState::MasonTemplate(_) => "mason template",
            LexState::MasonPerl(_) => "mason perl block",
            LexState::MasonText(_) => "mason text block",
            LexState::MasonLine => "mason perl line",
            LexState::MasonExpr => "mason substitution",
            LexState::MasonCall => "mason component call",
        }
    }
}

/// Delimiters and remaining sections of a quote-like construct.
///
/// `open` is `0` for unbracketed delimiters (`q/.../`), where nesting is not
/// tracked and the closing delimiter of one section opens the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct QuoteState {
    /// Opening bracket, or `0` when the delimiter is not a bracket.
    pub open: u8,
    /// Closing delimiter.
    pub close: u8,
    /// Sections still to be read, including the current one.
    pub sections: u8,
    /// Whether trailing modifier letters follow the last section.
    pub modifiers: bool,
}

impl QuoteState {
    /// A quote state waiting for its first delimiter.
    pub const fn pending(sections: u8, modifiers: bool) -> Self {
        QuoteState {
            open: 0,
            close: 0,
            sections,
            modifiers,
        }
    }

    /// Quote state announced by a quote-like keyword, or `None` if `word`
    /// is not one.
    ///
    /// `s`, `tr`, and `y` read two sections; `m`, `qr`, `s`, `tr`, and `y`
    /// accept trailing modifier letters.
    pub fn for_keyword(word: &str) -> Option<Self> {
        match word {
            "q" | "qq" | "qw" | "qx" => Some(Self::pending(1, false)),
            "m" | "qr" => Some(Self::pending(1, true)),
            "s" | "tr" | "y" => Some(Self::pending(2, true)),
            _ => None,
        }
    }

    /// Return a copy with delimiters set from an opening character.
    ///
    /// Bracket characters pair with their closing counterpart and nest;
    /// anything else closes with itself.
    pub fn with_delimiter(self, opener: u8) -> Self {
        let close = closing_bracket(opener);
        QuoteState {
            open: if close.is_some() { opener } else { 0 },
            close: close.unwrap_or(opener),
            ..self
        }
    }

    /// Whether the current section uses a nesting bracket pair.
    pub fn is_bracketed(&self) -> bool {
        self.open != 0
    }
}

/// Closing counterpart of a bracket delimiter.
pub fn closing_bracket(open: u8) -> Option<u8> {
    match open {
        b'(' => Some(b')'),
        b'[' => Some(b']'),
        b'{' => Some(b'}'),
        b'<' => Some(b'>'),
        _ => None,
    }
}

/// A heredoc whose body is being read or is waiting for the next line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HeredocState {
    /// Terminator text.
    pub marker: Box<str>,
    /// `<<~` form: the terminator may be preceded by whitespace.
    pub indented: bool,
}

/// What a Mason block contains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MasonBody {
    /// Perl code (`<%init>`, `<%class>`, …).
    Perl,
    /// Template markup (`<%method>`, `<%filter>`, `<%override>`).
    Template,
    /// Raw text (`<%doc>`, `<%text>`).
    Text,
}

/// Named Mason 2 block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MasonBlock {
    Class,
    Init,
    Perl,
    After,
    Augment,
    Around,
    Before,
    Shared,
    Flags,
    Method,
    Filter,
    Override,
    Doc,
    Text,
}

impl MasonBlock {
    /// Every block, for table-driven matching.
    pub const ALL: [MasonBlock; 14] = [
        MasonBlock::Class,
        MasonBlock::Init,
        MasonBlock::Perl,
        MasonBlock::After,
        MasonBlock::Augment,
        MasonBlock::Around,
        MasonBlock::Before,
        MasonBlock::Shared,
        MasonBlock::Flags,
        MasonBlock::Method,
        MasonBlock::Filter,
        MasonBlock::Override,
        MasonBlock::Doc,
        MasonBlock::Text,
    ];

    /// Tag name as written after `<%`.
    pub fn name(self) -> &'static str {
        match self {
            MasonBlock::Class => "class",
            MasonBlock::Init => "init",
            MasonBlock::Perl => "perl",
            MasonBlock::After => "after",
            MasonBlock::Augment => "augment",
            MasonBlock::Around => "around",
            MasonBlock::Before => "before",
            MasonBlock::Shared => "shared",
            MasonBlock::Flags => "flags",
            MasonBlock::Method => "method",
            MasonBlock::Filter => "filter",
            MasonBlock::Override => "override",
            MasonBlock::Doc => "doc",
            MasonBlock::Text => "text",
        }
    }

    /// Closing tag, e.g. `</%init>`.
    pub fn closer(self) -> &'static str {
        match self {
            MasonBlock::Class => "</%class>",
            MasonBlock::Init => "</%init>",
            MasonBlock::Perl => "</%perl>",
            MasonBlock::After => "</%after>",
            MasonBlock::Augment => "</%augment>",
            MasonBlock::Around => "</%around>",
            MasonBlock::Before => "</%before>",
            MasonBlock::Shared => "</%shared>",
            MasonBlock::Flags => "</%flags>",
            MasonBlock::Method => "</%method>",
            MasonBlock::Filter => "</%filter>",
            MasonBlock::Override => "</%override>",
            MasonBlock::Doc => "</%doc>",
            MasonBlock::Text => "</%text>",
        }
    }

    /// Look a block up by tag name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|block| block.name() == name)
    }

    /// What the block contains.
    pub fn body(self) -> MasonBody {
        match self {
            MasonBlock::Method | MasonBlock::Filter | MasonBlock::Override => MasonBody::Template,
            MasonBlock::Doc | MasonBlock::Text => MasonBody::Text,
            _ => MasonBody::Perl,
        }
    }

    /// Scanner mode for the block's body.
    pub fn body_state(self) -> LexState {
        match self.body() {
            MasonBody::Perl => LexState::MasonPerl(self),
            MasonBody::Template => LexState::MasonTemplate(Some(self)),
            MasonBody::Text => LexState::MasonText(self),
        }
    }
}

#[cfg(test)]
mod tests;
