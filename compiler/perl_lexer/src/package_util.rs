//! Package name utilities.
//!
//! Perl spells one package in several ways: `Foo::Bar`, `Foo'Bar`,
//! `::Foo::Bar`, `main::Foo::Bar`. The lexer compares packages by their
//! canonical name and splits qualified barewords into a package prefix and
//! a trailing name.
//!
//! Identifier segments are `[_\p{L}\d][_\p{L}\d]*`; separators are
//! `(::)+'?` or `(::)*'`.

/// The builtin package.
pub const CORE_PACKAGE: &str = "CORE";

/// The default package.
pub const MAIN_PACKAGE: &str = "main";

/// Canonical `::`-joined name of a package spelling.
///
/// Empty segments are dropped and a leading `main` is removed when more
/// segments follow. A name with no segments (`::`) is `main`.
pub fn canonical_package_name(name: &str) -> String {
    let segments: Vec<&str> = name
        .split([':', '\''])
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.as_slice() {
        [] => MAIN_PACKAGE.to_owned(),
        [first, rest @ ..] if *first == MAIN_PACKAGE && !rest.is_empty() => rest.join("::"),
        all => all.join("::"),
    }
}

/// Split a qualified name into `(prefix, name)` byte lengths.
///
/// The prefix is the longest run of `SEP? (IDENT SEP)*` and the name is the
/// final identifier segment. Returns `None` when the lexeme ends with a
/// separator or has no separator at all.
///
/// `Foo::Bar::baz` splits into `Foo::Bar::` and `baz`.
pub fn split_ambiguous_package(lexeme: &str) -> Option<(usize, usize)> {
    let bytes = lexeme.as_bytes();
    let mut name_start = None;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b':' | b'\'' => {
                i += 1;
                name_start = None;
            }
            _ => {
                if name_start.is_none() {
                    name_start = Some(i);
                }
                i += 1;
            }
        }
    }
    let start = name_start.filter(|&start| start > 0)?;
    is_identifier(&lexeme[start..]).then_some((start, lexeme.len() - start))
}

/// Whether `text` is a single identifier segment.
pub fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c == '_' || c.is_alphanumeric())
}

/// Whether the lexeme ends with a package separator.
pub fn ends_with_separator(lexeme: &str) -> bool {
    lexeme.ends_with("::") || lexeme.ends_with('\'')
}

#[cfg(test)]
mod tests;
