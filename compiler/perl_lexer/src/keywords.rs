//! Perl keyword tables.
//!
//! Keywords are resolved by text with a length-bucketed match: every
//! keyword is 2-11 ASCII characters starting with a letter or `_`, so
//! anything else is rejected before any comparison. `x` is not in the table; it is an
//! operator only after an operand, which the disambiguation rules decide.

use crate::TokenKind;

/// Resolve a bareword to `Keyword` or `OperatorWord`.
///
/// Covers control flow, declarations, and the named operators. Builtin
/// functions (`print`, `push`, …) stay identifiers.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    let len = text.len();
    if !(2..=11).contains(&len) || !matches!(text.as_bytes()[0], b'a'..=b'z' | b'A'..=b'Z' | b'_') {
        return None;
    }

    let keyword = match len {
        2 => match text {
            "eq" | "ne" | "lt" | "gt" | "le" | "ge" | "or" => return Some(TokenKind::OperatorWord),
            "if" | "do" | "no" | "my" => true,
            _ => false,
        },
        3 => match text {
            "and" | "not" | "xor" | "cmp" => return Some(TokenKind::OperatorWord),
            "sub" | "use" | "for" | "our" | "END" => true,
            _ => false,
        },
        4 => matches!(text, "else" | "last" | "next" | "redo" | "eval" | "goto" | "INIT"),
        5 => matches!(text, "elsif" | "while" | "until" | "local" | "state" | "undef" | "BEGIN" | "CHECK"),
        6 => matches!(text, "unless" | "return" | "format"),
        7 => matches!(text, "package" | "require" | "foreach" | "default"),
        8 => matches!(text, "continue" | "__FILE__" | "__LINE__"),
        11 => matches!(text, "__PACKAGE__"),
        _ => false,
    };
    keyword.then_some(TokenKind::Keyword)
}

/// Keywords whose next bareword names a package.
#[inline]
pub(crate) fn introduces_package(text: &str) -> bool {
    matches!(text, "package" | "use" | "no" | "require")
}

/// Markers that end the code part of a file.
#[inline]
pub(crate) fn is_data_marker(text: &str) -> bool {
    matches!(text, "__END__" | "__DATA__")
}

/// Builtins that take a list or a pattern, after which `/`, `<<`, `-`
/// and `%` start a term rather than continue one.
#[inline]
pub(crate) fn is_list_operator(text: &str) -> bool {
    matches!(
        text,
        "print"
            | "printf"
            | "say"
            | "die"
            | "warn"
            | "push"
            | "unshift"
            | "split"
            | "grep"
            | "map"
            | "join"
            | "sort"
            | "keys"
            | "values"
            | "each"
            | "defined"
            | "ref"
            | "scalar"
            | "exists"
            | "delete"
            | "chomp"
            | "lc"
            | "uc"
    )
}

/// Single-letter filetest operators: `-e`, `-f`, `-d`, …
#[inline]
pub(crate) fn is_filetest(word: &str) -> bool {
    word.len() == 1 && b"rwxoRWXOezsfdlpSbcugktTBAMC".contains(&word.as_bytes()[0])
}

#[cfg(test)]
mod tests;
