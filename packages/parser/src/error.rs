use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Closing marker \\{tag}* at {pos} has no matching opener")]
    UnmatchedClose { tag: String, pos: usize },

    #[error("Marker \\{marker} at {pos} is missing its argument")]
    MissingArgument { marker: String, pos: usize },

    #[error("Invalid \\{marker} number at {pos}: {found:?}")]
    InvalidNumber {
        marker: String,
        pos: usize,
        found: String,
    },
}

impl ParseError {
    pub fn unmatched_close(tag: impl Into<String>, pos: usize) -> Self {
        Self::UnmatchedClose {
            tag: tag.into(),
            pos,
        }
    }

    pub fn missing_argument(marker: impl Into<String>, pos: usize) -> Self {
        Self::MissingArgument {
            marker: marker.into(),
            pos,
        }
    }

    pub fn invalid_number(marker: impl Into<String>, pos: usize, found: impl Into<String>) -> Self {
        Self::InvalidNumber {
            marker: marker.into(),
            pos,
            found: found.into(),
        }
    }
}

/// Structural invariant violations found by `validate`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidateError {
    #[error("Document must contain exactly one book, found {found}")]
    SingleRootViolation { found: usize },

    #[error("Chapter number must be positive")]
    NonPositiveChapter,

    #[error("Verse {next} in chapter {chapter} goes backwards (previous verse was {prev})")]
    VerseOrder { chapter: u32, prev: u32, next: u32 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SerializeError {
    #[error("Refusing to serialize invalid tree: {0}")]
    InvalidTree(ValidateError),
}
