//! # Scribe Parser
//!
//! Bidirectional conversion between USFM-style marker text and a typed
//! scripture document tree.
//!
//! ```text
//! marker text ──parse──▶ ScriptureDocument ──serialize──▶ marker text
//! ```
//!
//! `serialize(parse(s), Full)` reproduces `s` up to whitespace normalization;
//! `Stripped` mode additionally drops word-alignment attributes so they never
//! reach storage that must not see them.

pub mod ast;
pub mod error;
pub mod markers;
pub mod parser;
pub mod serializer;
pub mod tokenizer;
pub mod validate;

#[cfg(test)]
mod tests_roundtrip;

pub use ast::{Attributes, Node, ScriptureDocument};
pub use error::{ParseError, ParseResult, SerializeError, ValidateError};
pub use parser::{parse, Parser};
pub use serializer::{
    node_opening, normalize_marker_text, serialize, serialize_node, SerializeMode, Serializer,
};
pub use tokenizer::{tokenize, Token};
pub use validate::{check, validate};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizer_basic() {
        let tokens = tokenize("\\id PSA");
        assert_eq!(tokens.len(), 2);
    }
}
