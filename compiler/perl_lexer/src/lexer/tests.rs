use super::*;
use crate::{lex, Dialect, LexErrorKind, LexOutput, QuoteState};
use perl_lexer_core::MasonBlock;
use pretty_assertions::assert_eq;

use crate::TokenKind::*;

fn mason(source: &str) -> LexOutput {
    lex(source, &LexerConfig::with_dialect(Dialect::MasonComponent))
}

fn non_whitespace<'a>(source: &'a str, output: &LexOutput) -> Vec<(TokenKind, &'a str)> {
    output
        .tokens
        .iter()
        .filter(|token| token.kind != Whitespace)
        .map(|token| (token.kind, token.text(source)))
        .collect()
}

// === Driver ===

#[test]
fn advance_updates_the_token_registers() {
    let mut lexer = PerlLexer::new("my $x;", LexerConfig::default());
    assert_eq!(lexer.advance(), Some(Keyword));
    assert_eq!((lexer.token_start(), lexer.token_end()), (0, 2));
    assert_eq!(lexer.token_text(), "my");
    assert_eq!(lexer.token_span(), Span::new(0, 2));
    assert_eq!(lexer.token_history().last_significant_text(), Some("my"));

    assert_eq!(lexer.advance(), Some(Whitespace));
    assert_eq!(lexer.token_history().last_kind(), Some(Whitespace));
    assert_eq!(lexer.token_history().last_significant_kind(), Some(Keyword));
}

#[test]
fn queued_pieces_come_before_scanning() {
    let mut lexer = PerlLexer::new("Foo::bar", LexerConfig::default());
    assert_eq!(lexer.advance(), Some(Package));
    assert_eq!(lexer.token_text(), "Foo::");
    assert!(!lexer.is_last_token());

    assert_eq!(lexer.advance(), Some(Identifier));
    assert_eq!(lexer.token_text(), "bar");
    assert!(lexer.is_last_token());

    assert_eq!(lexer.advance(), None);
    assert_eq!(lexer.advance(), None);
    assert!(lexer.is_complete());
}

#[test]
fn tokens_cover_the_buffer() {
    let source = "my %h = (a => [1, 2]); print STDERR $h{a}[0] // 'none', \"\\n\";\n";
    let tokens: Vec<Token> = PerlLexer::new(source, LexerConfig::default()).collect();
    let mut pos = 0;
    for token in &tokens {
        assert_eq!(token.start, pos, "gap before {token:?}");
        assert!(token.end > token.start, "empty token {token:?}");
        pos = token.end;
    }
    assert_eq!(pos as usize, source.len());
}

#[test]
fn empty_buffer() {
    let output = lex("", &LexerConfig::default());
    assert!(output.tokens.is_empty());
    assert!(output.complete);
    assert_eq!(output.final_state, LexState::Perl);
}

#[test]
fn lexer_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<PerlLexer<'static>>();
}

// === Passes ===

#[test]
fn start_mid_buffer_matches_the_full_pass() {
    let source = "my $a = 1;\nmy $b = $a / 2;\n";
    let full = lex(source, &LexerConfig::default());

    let mut lexer = PerlLexer::new(source, LexerConfig::default());
    lexer.start(source, 10, LexState::Perl);
    assert_eq!(lexer.buffer_start(), 10);
    let partial: Vec<Token> = lexer.collect();

    let tail: Vec<Token> = full
        .tokens
        .into_iter()
        .filter(|token| token.start >= 10)
        .collect();
    assert_eq!(partial, tail);
}

#[test]
fn start_clears_previous_pass() {
    let mut lexer = PerlLexer::new("'open", LexerConfig::default());
    lexer.by_ref().for_each(drop);
    assert_eq!(lexer.errors().len(), 1);

    lexer.start("1;", 0, LexState::Perl);
    assert!(lexer.errors().is_empty());
    assert_eq!(lexer.state_depth(), 0);
    assert_eq!(lexer.token_history().last_kind(), None);
    assert_eq!(lexer.buffer(), "1;");
    assert_eq!(lexer.buffer_end(), 2);
    assert_eq!(lexer.by_ref().count(), 2);
    assert!(lexer.is_complete());
}

#[test]
fn start_inside_a_quote_returns_to_code() {
    let source = "abc' . 1;";
    let seed = LexState::Quote(QuoteState::pending(1, false).with_delimiter(b'\''));
    let mut lexer = PerlLexer::new("", LexerConfig::default());
    lexer.start(source, 0, seed);
    assert_eq!(lexer.state_depth(), 1);

    let tokens: Vec<(TokenKind, &str)> = lexer
        .by_ref()
        .filter(|token| token.kind != Whitespace)
        .map(|token| (token.kind, token.text(source)))
        .collect();
    assert_eq!(tokens[..2], [(StringContent, "abc"), (QuoteClose, "'")]);
    assert_eq!(tokens.last(), Some(&(Semicolon, ";")));
    assert!(tokens.contains(&(Number, "1")));
    assert_eq!(lexer.state_depth(), 0);
    assert_eq!(*lexer.state(), LexState::Perl);
    assert!(lexer.is_complete());
}

#[test]
fn start_inside_a_mason_block_returns_to_the_template() {
    let source = "my $x;\n</%init>\n<p>";
    let mut lexer = PerlLexer::new("", LexerConfig::with_dialect(Dialect::MasonComponent));
    lexer.start(source, 0, LexState::MasonPerl(MasonBlock::Init));
    let kinds: Vec<TokenKind> = lexer.by_ref().map(|token| token.kind).collect();
    assert!(kinds.contains(&MasonBlockCloser));
    assert_eq!(*lexer.state(), LexState::MasonTemplate(None));
    assert!(lexer.is_complete());
}

#[test]
fn seeded_construct_left_open_is_reported_from_the_seed() {
    let source = "never closed";
    let seed = LexState::Quote(QuoteState::pending(1, false).with_delimiter(b'{'));
    let mut lexer = PerlLexer::new("", LexerConfig::default());
    lexer.start(source, 0, seed);
    lexer.by_ref().for_each(drop);
    assert!(!lexer.is_complete());
    assert_eq!(lexer.errors().len(), 1);
    assert_eq!(lexer.errors()[0].kind, LexErrorKind::UnterminatedQuote);
    assert_eq!(lexer.errors()[0].span, Span::new(0, 12));
}

#[test]
fn reset_internals_keeps_position() {
    let mut lexer = PerlLexer::new("my $x;", LexerConfig::default());
    lexer.advance();
    lexer.advance();
    lexer.reset_internals();
    assert_eq!(lexer.buffer_start(), 2);
    assert_eq!(lexer.token_history().last_kind(), None);
    assert_eq!(lexer.advance(), Some(Sigil));
    assert_eq!(lexer.token_start(), 3);
}

#[test]
fn restartable_after_statements() {
    let mut lexer = PerlLexer::new("my $x = 1; foo", LexerConfig::default());
    assert!(lexer.is_restartable());
    let mut seen = Vec::new();
    while let Some(kind) = lexer.advance() {
        seen.push((kind, lexer.is_restartable()));
    }
    assert_eq!(
        seen,
        vec![
            (Keyword, false),
            (Whitespace, false),
            (Sigil, false),
            (VariableName, false),
            (Whitespace, false),
            (Operator, false),
            (Whitespace, false),
            (Number, false),
            (Semicolon, true),
            (Whitespace, true),
            (Identifier, false),
        ]
    );
}

#[test]
fn not_restartable_inside_a_quote() {
    let mut lexer = PerlLexer::new("x('a;b');", LexerConfig::default());
    while let Some(kind) = lexer.advance() {
        if kind == StringContent {
            assert!(!lexer.is_restartable());
            assert_eq!(lexer.state_depth(), 1);
        }
    }
}

// === State stack ===

#[test]
fn push_and_pop_restore_the_mode() {
    let mut lexer = PerlLexer::new("x", LexerConfig::default());
    lexer.push_state();
    assert_eq!(lexer.state_depth(), 1);
    lexer.pop_state();
    assert_eq!(lexer.state_depth(), 0);
    assert_eq!(*lexer.state(), LexState::Perl);
}

#[test]
#[should_panic(expected = "lexer state popped from an empty stack")]
fn pop_without_push_is_a_defect() {
    let mut lexer = PerlLexer::new("x", LexerConfig::default());
    lexer.pop_state();
}

#[test]
fn set_token_end_rescans() {
    let mut lexer = PerlLexer::new("abc", LexerConfig::default());
    assert_eq!(lexer.advance(), Some(Identifier));
    lexer.set_token_end(1);
    assert_eq!(lexer.token_text(), "a");
    assert_eq!(lexer.advance(), Some(Identifier));
    assert_eq!(lexer.token_text(), "bc");
}

// === Errors ===

#[test]
fn unterminated_quote() {
    let output = lex("'abc", &LexerConfig::default());
    assert!(!output.complete);
    assert!(matches!(output.final_state, LexState::Quote(_)));
    assert_eq!(output.errors.len(), 1);
    let error = &output.errors[0];
    assert_eq!(error.kind, LexErrorKind::UnterminatedQuote);
    assert_eq!(error.span, Span::new(0, 4));
    assert_eq!(error.suggestions[0].message, "add the closing `'`");
}

#[test]
fn unterminated_mason_block() {
    let output = mason("<%init>\nmy $x;");
    assert!(!output.complete);
    assert_eq!(output.final_state, LexState::MasonPerl(MasonBlock::Init));
    assert_eq!(
        output.errors[0].kind,
        LexErrorKind::UnterminatedMasonBlock {
            block: MasonBlock::Init
        }
    );
    assert_eq!(output.errors[0].span, Span::new(0, 14));
}

#[test]
fn unterminated_mason_tag() {
    let output = mason("<p><% $x");
    assert!(!output.complete);
    assert_eq!(output.errors[0].kind, LexErrorKind::UnterminatedMasonTag);
    assert_eq!(output.errors[0].span.start, 3);
}

#[test]
fn every_open_construct_is_reported() {
    let output = mason("<% \"abc");
    assert!(!output.complete);
    let errors: Vec<(LexErrorKind, Span)> =
        output.errors.iter().map(|error| (error.kind.clone(), error.span)).collect();
    assert_eq!(
        errors,
        [
            (LexErrorKind::UnterminatedQuote, Span::new(3, 7)),
            (LexErrorKind::UnterminatedMasonTag, Span::new(0, 7)),
        ]
    );
}

#[test]
fn inner_mason_line_is_not_an_error() {
    let output = mason("% foo('abc");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].kind, LexErrorKind::UnterminatedQuote);
}

#[test]
fn take_errors_drains() {
    let mut lexer = PerlLexer::new("\u{1}", LexerConfig::default());
    assert_eq!(lexer.advance(), Some(BadCharacter));
    assert_eq!(lexer.take_errors().len(), 1);
    assert!(lexer.errors().is_empty());
}

// === Mason ===

#[test]
fn mason_component_regions() {
    let source = "<p><% $x %></p>\n\
                  % if ($y) {\n\
                  <b>hi</b>\n\
                  % }\n\
                  <%init>\n\
                  my $z = 1;\n\
                  </%init>\n\
                  <& 'comp', a => 1 &>\n\
                  <%doc>\n\
                  notes <% x\n\
                  </%doc>\n";
    let output = mason(source);
    assert!(output.errors.is_empty());
    assert!(output.complete);
    assert_eq!(output.final_state, LexState::MasonTemplate(None));
    assert_eq!(
        non_whitespace(source, &output),
        vec![
            (MasonTemplateHtml, "<p>"),
            (MasonExprOpener, "<%"),
            (Sigil, "$"),
            (VariableName, "x"),
            (MasonExprCloser, "%>"),
            (MasonTemplateHtml, "</p>\n"),
            (MasonLineOpener, "%"),
            (Keyword, "if"),
            (LeftParen, "("),
            (Sigil, "$"),
            (VariableName, "y"),
            (RightParen, ")"),
            (LeftBrace, "{"),
            (MasonTemplateHtml, "<b>hi</b>\n"),
            (MasonLineOpener, "%"),
            (RightBrace, "}"),
            (MasonBlockOpener, "<%init>"),
            (Keyword, "my"),
            (Sigil, "$"),
            (VariableName, "z"),
            (Operator, "="),
            (Number, "1"),
            (Semicolon, ";"),
            (MasonBlockCloser, "</%init>"),
            (MasonTemplateHtml, "\n"),
            (MasonCallOpener, "<&"),
            (QuoteOpen, "'"),
            (StringContent, "comp"),
            (QuoteClose, "'"),
            (Comma, ","),
            (StringBareword, "a"),
            (FatComma, "=>"),
            (Number, "1"),
            (MasonCallCloser, "&>"),
            (MasonTemplateHtml, "\n"),
            (MasonBlockOpener, "<%doc>"),
            (MasonTextContent, "\nnotes <% x\n"),
            (MasonBlockCloser, "</%doc>"),
            (MasonTemplateHtml, "\n"),
        ]
    );
}

#[test]
fn mason_method_body_is_a_template() {
    let source = "<%method show>\n<% $a %>\n</%method>";
    let output = mason(source);
    assert!(output.complete);
    assert_eq!(
        non_whitespace(source, &output),
        vec![
            (MasonBlockOpener, "<%method show>"),
            (MasonTemplateHtml, "\n"),
            (MasonExprOpener, "<%"),
            (Sigil, "$"),
            (VariableName, "a"),
            (MasonExprCloser, "%>"),
            (MasonTemplateHtml, "\n"),
            (MasonBlockCloser, "</%method>"),
        ]
    );
}

#[test]
fn mason_line_may_end_the_file() {
    let output = mason("% my $x = 1;");
    assert!(output.complete);
    assert!(output.errors.is_empty());
    assert_eq!(output.final_state, LexState::MasonTemplate(None));
}

#[test]
fn percent_mid_line_is_markup() {
    let source = "50% off\n";
    let output = mason(source);
    assert_eq!(non_whitespace(source, &output), vec![(MasonTemplateHtml, "50% off\n")]);
}
