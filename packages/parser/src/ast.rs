use serde::{Deserialize, Serialize};

/// Schema identifier carried on the root payload
pub const DOCUMENT_TYPE: &str = "USJ";

/// Version of the structured-tree schema exchanged with the editor surface
pub const SCHEMA_VERSION: &str = "0.2.1";

/// Attribute list on char-style and note nodes.
///
/// Order is significant for textual round-tripping, so this is a pair list
/// rather than a map. An empty key marks a positional (default) attribute
/// written bare after the `|` separator.
pub type Attributes = Vec<(String, String)>;

fn is_false(value: &bool) -> bool {
    !*value
}

/// Root of the structured scripture tree.
///
/// Field names are stable wire contract with the editor surface: `type`,
/// `version`, `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptureDocument {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub version: String,
    pub content: Vec<Node>,
}

impl ScriptureDocument {
    pub fn new() -> Self {
        Self {
            doc_type: DOCUMENT_TYPE.to_string(),
            version: SCHEMA_VERSION.to_string(),
            content: Vec::new(),
        }
    }

    pub fn with_content(content: Vec<Node>) -> Self {
        Self {
            content,
            ..Self::new()
        }
    }
}

impl Default for ScriptureDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// A node of the scripture tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    /// `\id` line: book code plus the free-text remainder of that line
    Book {
        code: String,
        #[serde(default, skip_serializing_if = "String::is_empty")]
        description: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },

    /// `\c N`
    Chapter {
        number: u32,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },

    /// Paragraph-level marker (`\p`, `\q1`, `\s1`, ...)
    Para {
        marker: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },

    /// `\v N`; `sid` is the canonical "BOOK C:V" address
    Verse {
        number: u32,
        sid: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },

    /// Character-style span (`\nd`, `\w`, `\wj`, ...)
    Char {
        marker: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        attributes: Attributes,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
        /// Whether the source carried an explicit `\tag*` close marker;
        /// the serializer re-emits the close tag only when it was present
        #[serde(default, skip_serializing_if = "is_false")]
        closed: bool,
    },

    /// Footnote or cross reference (`\f`, `\x`, ...)
    Note {
        marker: String,
        caller: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        attributes: Attributes,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        content: Vec<Node>,
    },

    /// Raw text run
    Text { text: String },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    /// Child nodes, if this variant is a container
    pub fn content(&self) -> Option<&[Node]> {
        match self {
            Node::Book { content, .. }
            | Node::Chapter { content, .. }
            | Node::Para { content, .. }
            | Node::Verse { content, .. }
            | Node::Char { content, .. }
            | Node::Note { content, .. } => Some(content),
            Node::Text { .. } => None,
        }
    }

    pub fn content_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Book { content, .. }
            | Node::Chapter { content, .. }
            | Node::Para { content, .. }
            | Node::Verse { content, .. }
            | Node::Char { content, .. }
            | Node::Note { content, .. } => Some(content),
            Node::Text { .. } => None,
        }
    }

    /// Attribute list, if this variant carries one
    pub fn attributes(&self) -> Option<&Attributes> {
        match self {
            Node::Char { attributes, .. } | Node::Note { attributes, .. } => Some(attributes),
            _ => None,
        }
    }
}
