use super::*;

#[test]
fn default_state_is_perl() {
    assert_eq!(LexState::default(), LexState::Perl);
}

#[test]
fn terminal_states() {
    assert!(LexState::Perl.is_terminal());
    assert!(LexState::Data.is_terminal());
    assert!(LexState::MasonTemplate(None).is_terminal());
    assert!(!LexState::MasonTemplate(Some(MasonBlock::Method)).is_terminal());
    assert!(!LexState::MasonLine.is_terminal());
    assert!(!LexState::Quote(QuoteState::pending(1, false)).is_terminal());
}

#[test]
fn with_delimiter_pairs_brackets() {
    let q = QuoteState::pending(1, false).with_delimiter(b'{');
    assert_eq!(q.open, b'{');
    assert_eq!(q.close, b'}');
    assert!(q.is_bracketed());
}

#[test]
fn with_delimiter_symmetric() {
    let q = QuoteState::pending(2, true).with_delimiter(b'#');
    assert_eq!(q.open, 0);
    assert_eq!(q.close, b'#');
    assert_eq!(q.sections, 2);
    assert!(q.modifiers);
    assert!(!q.is_bracketed());
}

#[test]
fn mason_block_names_round_trip() {
    for block in MasonBlock::ALL {
        assert_eq!(MasonBlock::from_name(block.name()), Some(block));
        assert_eq!(block.closer(), format!("</%{}>", block.name()));
    }
    assert_eq!(MasonBlock::from_name("args"), None);
}

#[test]
fn mason_block_bodies() {
    assert_eq!(
        MasonBlock::Init.body_state(),
        LexState::MasonPerl(MasonBlock::Init)
    );
    assert_eq!(
        MasonBlock::Method.body_state(),
        LexState::MasonTemplate(Some(MasonBlock::Method))
    );
    assert_eq!(
        MasonBlock::Doc.body_state(),
        LexState::MasonText(MasonBlock::Doc)
    );
}

#[test]
fn perl_code_modes() {
    assert!(LexState::MasonExpr.is_perl_code());
    assert!(LexState::MasonPerl(MasonBlock::Init).is_perl_code());
    assert!(!LexState::Data.is_perl_code());
    assert!(!LexState::MasonTemplate(None).is_perl_code());
}
