use super::*;

#[test]
fn control_flow_keywords() {
    for word in ["if", "elsif", "else", "unless", "while", "until", "for", "foreach", "last", "next", "return"] {
        assert_eq!(lookup(word), Some(TokenKind::Keyword), "{word}");
    }
}

#[test]
fn declaration_keywords() {
    for word in ["sub", "my", "our", "local", "state", "package", "use", "no", "require", "BEGIN", "END", "INIT", "__PACKAGE__"] {
        assert_eq!(lookup(word), Some(TokenKind::Keyword), "{word}");
    }
}

#[test]
fn operator_words() {
    for word in ["and", "or", "not", "xor", "eq", "ne", "lt", "gt", "le", "ge", "cmp"] {
        assert_eq!(lookup(word), Some(TokenKind::OperatorWord), "{word}");
    }
}

#[test]
fn non_keywords() {
    assert_eq!(lookup("x"), None);
    assert_eq!(lookup("print"), None);
    assert_eq!(lookup("iffy"), None);
    assert_eq!(lookup("_if"), None);
    assert_eq!(lookup("Package"), None);
    assert_eq!(lookup("doesnotexistatall"), None);
}

#[test]
fn package_introducers() {
    assert!(introduces_package("use"));
    assert!(introduces_package("require"));
    assert!(!introduces_package("sub"));
}

#[test]
fn filetests() {
    assert!(is_filetest("e"));
    assert!(is_filetest("M"));
    assert!(!is_filetest("q"));
    assert!(!is_filetest("ee"));
    assert!(!is_filetest(""));
}

#[test]
fn data_markers() {
    assert!(is_data_marker("__END__"));
    assert!(is_data_marker("__DATA__"));
    assert!(!is_data_marker("__FILE__"));
}

#[test]
fn list_operators() {
    assert!(is_list_operator("print"));
    assert!(is_list_operator("split"));
    assert!(!is_list_operator("foo"));
    assert!(!is_list_operator("if"));
}
