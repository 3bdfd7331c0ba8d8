//! Error types for the editor

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Parse error: {0}")]
    Parse(#[from] scribe_parser::ParseError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] scribe_parser::SerializeError),

    #[error("Validation error: {0}")]
    Validation(#[from] scribe_parser::ValidateError),

    #[error("Notebook has no cells")]
    EmptyNotebook,
}

/// Which conversion direction failed, for host-facing failure signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConversionStage {
    Parse,
    Serialize,
}

impl EditorError {
    /// The conversion stage this error belongs to, when it is one
    pub fn stage(&self) -> Option<ConversionStage> {
        match self {
            EditorError::Parse(_) => Some(ConversionStage::Parse),
            EditorError::Serialize(_) => Some(ConversionStage::Serialize),
            _ => None,
        }
    }
}
