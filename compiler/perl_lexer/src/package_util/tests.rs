use super::*;
use pretty_assertions::assert_eq;

#[test]
fn canonical_names() {
    assert_eq!(canonical_package_name("Foo::Bar"), "Foo::Bar");
    assert_eq!(canonical_package_name("Foo'Bar"), "Foo::Bar");
    assert_eq!(canonical_package_name("::Foo::Bar"), "Foo::Bar");
    assert_eq!(canonical_package_name("main::Foo"), "Foo");
    assert_eq!(canonical_package_name("Foo::Bar::"), "Foo::Bar");
    assert_eq!(canonical_package_name("Foo::::Bar"), "Foo::Bar");
}

#[test]
fn main_alone_stays_main() {
    assert_eq!(canonical_package_name("main"), MAIN_PACKAGE);
    assert_eq!(canonical_package_name("::"), MAIN_PACKAGE);
    assert_eq!(canonical_package_name("main::"), MAIN_PACKAGE);
}

#[test]
fn core_spellings() {
    for spelling in ["CORE", "CORE::", "::CORE", "main::CORE", "main'CORE"] {
        assert_eq!(canonical_package_name(spelling), CORE_PACKAGE, "{spelling}");
    }
    assert_ne!(canonical_package_name("CORE::GLOBAL"), CORE_PACKAGE);
}

#[test]
fn split_takes_the_last_segment() {
    assert_eq!(split_ambiguous_package("Foo::Bar::baz"), Some((10, 3)));
    assert_eq!(split_ambiguous_package("::baz"), Some((2, 3)));
    assert_eq!(split_ambiguous_package("Foo'bar"), Some((4, 3)));
    assert_eq!(split_ambiguous_package("Foo::Ünï"), Some((5, 5)));
}

#[test]
fn no_split_without_a_final_name() {
    assert_eq!(split_ambiguous_package("Foo::Bar::"), None);
    assert_eq!(split_ambiguous_package("baz"), None);
    assert_eq!(split_ambiguous_package("Foo'"), None);
}

#[test]
fn identifier_segments() {
    assert!(is_identifier("_x9"));
    assert!(is_identifier("9lives"));
    assert!(is_identifier("ñame"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("a-b"));
    assert!(ends_with_separator("Foo::"));
    assert!(ends_with_separator("Foo'"));
    assert!(!ends_with_separator("Foo"));
}
