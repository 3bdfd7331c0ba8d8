//! Shared scripture addressing and tree traversal utilities

pub mod verse_ref;
pub mod visitor;

pub use verse_ref::{extract_verse_ref, is_book_code, VerseRef, BOOK_CODES};
pub use visitor::{Visitor, VisitorMut};
