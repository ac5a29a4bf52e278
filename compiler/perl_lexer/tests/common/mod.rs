//! Shared helpers for integration tests.

#![allow(dead_code, reason = "each test binary uses a subset")]

use std::sync::Once;

use perl_lexer::{lex, LexOutput, LexerConfig, Token, TokenKind};

static TRACING_INIT: Once = Once::new();

/// Install a subscriber when `RUST_LOG` is set, e.g. `RUST_LOG=perl_lexer=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer().with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

pub fn lex_with(source: &str, config: &LexerConfig) -> LexOutput {
    init_tracing();
    lex(source, config)
}

/// Significant tokens (no whitespace, comments or markup) with their text.
pub fn significant<'a>(source: &'a str, tokens: &[Token]) -> Vec<(TokenKind, &'a str)> {
    tokens
        .iter()
        .filter(|token| token.kind.is_significant())
        .map(|token| (token.kind, token.text(source)))
        .collect()
}

/// Assert the tokens tile `0..source.len()` with non-empty pieces.
pub fn assert_covers(source: &str, tokens: &[Token]) {
    let mut pos = 0u32;
    for token in tokens {
        assert_eq!(token.start, pos, "gap or overlap before {token:?}");
        assert!(!token.is_empty(), "empty token {token:?}");
        pos = token.end;
    }
    assert_eq!(pos as usize, source.len(), "tokens stop short of the end");
}
