//! Raw scanner for Perl and Mason sources.
//!
//! This crate turns bytes into `(RawTag, len)` pairs under an explicit
//! scanning mode. It knows nothing about keywords, packages, or the
//! operator/term ambiguity; `perl_lexer` layers those decisions on top and
//! drives every mode switch.
//!
//! # Modules
//!
//! - [`cursor`]: byte cursor with EOF-as-NUL reads and memchr-backed search
//! - [`tag`]: the raw tag vocabulary
//! - [`state`]: scanner modes and the quote, heredoc, and Mason block data they carry
//! - [`raw_scanner`]: the mode-aware automaton

pub mod cursor;
pub mod raw_scanner;
pub mod state;
pub mod tag;

pub use cursor::Cursor;
pub use raw_scanner::RawScanner;
pub use state::{closing_bracket, HeredocState, LexState, MasonBlock, MasonBody, QuoteState};
pub use tag::{RawTag, RawToken};
