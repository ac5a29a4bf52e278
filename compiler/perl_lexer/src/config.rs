//! Lexer configuration.

use perl_lexer_core::LexState;

use crate::package_util::CORE_PACKAGE;

/// Default bound on retained significant history entries.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Source dialect, which decides the mode a pass starts in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Plain Perl 5 (`.pl`, `.pm`, `.t`, `.cgi`, `.psgi`).
    #[default]
    Perl,
    /// Mason 2 component (`.mc`, `.mi`): template markup with embedded Perl.
    MasonComponent,
    /// Mason 2 pure-Perl component (`.mp`): Perl code with Mason blocks.
    MasonPurePerl,
}

impl Dialect {
    /// Dialect for a file extension, without the leading dot.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "pl" | "pm" | "t" | "cgi" | "psgi" => Some(Dialect::Perl),
            "mc" | "mi" => Some(Dialect::MasonComponent),
            "mp" => Some(Dialect::MasonPurePerl),
            _ => None,
        }
    }

    /// Mode a pass over a whole file starts in.
    pub fn initial_state(self) -> LexState {
        match self {
            Dialect::Perl | Dialect::MasonPurePerl => LexState::Perl,
            Dialect::MasonComponent => LexState::MasonTemplate(None),
        }
    }
}

/// Configuration for a [`PerlLexer`](crate::PerlLexer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexerConfig {
    /// Source dialect.
    pub dialect: Dialect,

    /// Canonical name that lexes as `PackageCore`.
    /// Defaults to `CORE`.
    pub core_package: Box<str>,

    /// Significant history entries retained per pass.
    /// Defaults to 64; values below 4 are raised to 4.
    pub history_limit: usize,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Perl,
            core_package: CORE_PACKAGE.into(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl LexerConfig {
    /// Create a config for the given dialect.
    pub fn with_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Default::default()
        }
    }

    /// Config for a file, chosen by extension. Unknown extensions lex as Perl.
    pub fn for_path(path: &std::path::Path) -> Self {
        let dialect = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Dialect::from_extension)
            .unwrap_or_default();
        Self::with_dialect(dialect)
    }

    #[must_use]
    pub fn core_package(mut self, name: impl Into<Box<str>>) -> Self {
        self.core_package = name.into();
        self
    }

    #[must_use]
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}
