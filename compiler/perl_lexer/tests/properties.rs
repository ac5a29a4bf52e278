//! Property tests over whole passes: totality, determinism and restart
//! equivalence.

#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "proptest macros generate code with these patterns"
)]

mod common;

use common::assert_covers;
use perl_lexer::{lex, Dialect, LexState, LexerConfig, PerlLexer, Token};
use proptest::prelude::*;

const PERL_FRAGMENTS: &[&str] = &[
    "my $x = 1;",
    "print \"a $b\\n\";",
    "$h{key} = -e $f;",
    "@a = split /,/, $s;",
    "s{a}{b}g;",
    "# note\n",
    "\n",
    " ",
    "Foo::Bar->new(x => 1);",
    "return $a / 2;",
    "q(a(b)c);",
    "print <<EOF;\nbody\nEOF\n",
    "$y = $x // 0;",
    "sub f { shift }",
    "CORE::say(1);",
    "%$r = ();",
    "-foo",
    "'unclosed",
    "\u{e9}t\u{e9} + 1;",
];

const MASON_FRAGMENTS: &[&str] = &[
    "<p>",
    "<% $x %>",
    "\n% my $y = 1;\n",
    "<%init>\nmy $z;\n</%init>",
    "<& 'c', a => 1 &>",
    "text\n",
    "<%doc>x</%doc>",
    "50%",
];

fn program(fragments: &'static [&'static str]) -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(fragments), 0..12).prop_map(|parts| parts.concat())
}

fn dialect() -> impl Strategy<Value = Dialect> {
    prop_oneof![
        Just(Dialect::Perl),
        Just(Dialect::MasonComponent),
        Just(Dialect::MasonPurePerl),
    ]
}

/// Offsets and modes at which the full pass could have been restarted.
fn restart_points(source: &str, config: &LexerConfig) -> Vec<(u32, LexState)> {
    let mut lexer = PerlLexer::new(source, config.clone());
    let mut points = Vec::new();
    while lexer.advance().is_some() {
        if lexer.is_restartable() {
            points.push((lexer.token_end(), lexer.state().clone()));
        }
    }
    points
}

fn assert_restarts(source: &str, config: &LexerConfig) {
    let full = lex(source, config);
    for (offset, state) in restart_points(source, config) {
        let mut lexer = PerlLexer::new(source, config.clone());
        lexer.start(source, offset, state);
        let partial: Vec<Token> = lexer.collect();
        let tail: Vec<Token> = full
            .tokens
            .iter()
            .copied()
            .filter(|token| token.start >= offset)
            .collect();
        assert_eq!(partial, tail, "restart at {offset} in {source:?}");
    }
}

proptest! {
    #[test]
    fn arbitrary_text_is_covered(source in any::<String>(), dialect in dialect()) {
        let config = LexerConfig::with_dialect(dialect);
        let tokens: Vec<Token> = PerlLexer::new(&source, config.clone())
            .take(source.len() + 1)
            .collect();
        assert_covers(&source, &tokens);
        for error in lex(&source, &config).errors {
            prop_assert!(error.span.end as usize <= source.len());
        }
    }

    #[test]
    fn lexing_is_deterministic(source in program(PERL_FRAGMENTS)) {
        let config = LexerConfig::default();
        prop_assert_eq!(lex(&source, &config), lex(&source, &config));
    }

    #[test]
    fn perl_restarts_reproduce_the_suffix(source in program(PERL_FRAGMENTS)) {
        assert_restarts(&source, &LexerConfig::default());
    }

    #[test]
    fn mason_restarts_reproduce_the_suffix(source in program(MASON_FRAGMENTS)) {
        assert_restarts(&source, &LexerConfig::with_dialect(Dialect::MasonComponent));
    }

    #[test]
    fn short_history_classifies_the_same(source in program(PERL_FRAGMENTS)) {
        let short = LexerConfig::default().history_limit(1);
        prop_assert_eq!(lex(&source, &short).tokens, lex(&source, &LexerConfig::default()).tokens);
    }
}
