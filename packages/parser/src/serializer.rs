use crate::ast::{Attributes, Node, ScriptureDocument};
use crate::error::SerializeError;
use crate::markers;
use crate::validate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Serialization mode
///
/// `Stripped` removes word-alignment attributes so they never leak back into
/// storage consumed by non-alignment-aware tooling. Everything else is
/// preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SerializeMode {
    Full,
    Stripped,
}

/// Serialize a scripture tree back to marker text
///
/// Refuses to run on a tree without exactly one root book; no partial output
/// is ever produced.
pub fn serialize(doc: &ScriptureDocument, mode: SerializeMode) -> Result<String, SerializeError> {
    validate::require_single_root(doc).map_err(SerializeError::InvalidTree)?;

    let serializer = Serializer::new(mode);
    let mut output = String::new();
    for node in &doc.content {
        serializer.write_node(node, &mut output);
    }
    Ok(output)
}

/// Serialize one subtree without document-level validation
///
/// Used by callers that need per-node output, like the notebook bridge when
/// it re-emits one cell per verse.
pub fn serialize_node(node: &Node) -> String {
    let serializer = Serializer::new(SerializeMode::Full);
    let mut output = String::new();
    serializer.write_node(node, &mut output);
    output
}

/// The opening marker text of a node, without its children
pub fn node_opening(node: &Node) -> String {
    let serializer = Serializer::new(SerializeMode::Full);
    let mut output = String::new();
    serializer.write_opening(node, &mut output);
    output
}

pub struct Serializer {
    mode: SerializeMode,
}

impl Serializer {
    pub fn new(mode: SerializeMode) -> Self {
        Self { mode }
    }

    fn write_node(&self, node: &Node, output: &mut String) {
        self.write_opening(node, output);
        match node {
            Node::Text { .. } => {}
            Node::Char {
                marker,
                attributes,
                content,
                closed,
            } => {
                for child in content {
                    self.write_node(child, output);
                }
                self.write_attributes(attributes, output);
                // Close tags are re-emitted only where the source had one;
                // implicitly closed spans (note text, EOF) stay open.
                if *closed {
                    output.push('\\');
                    output.push_str(marker);
                    output.push('*');
                }
            }
            Node::Note {
                marker,
                attributes,
                content,
                ..
            } => {
                for child in content {
                    self.write_node(child, output);
                }
                self.write_attributes(attributes, output);
                output.push('\\');
                output.push_str(marker);
                output.push('*');
            }
            _ => {
                for child in node.content().unwrap_or_default() {
                    self.write_node(child, output);
                }
            }
        }
    }

    fn write_opening(&self, node: &Node, output: &mut String) {
        match node {
            Node::Book {
                code, description, ..
            } => {
                output.push_str("\\id ");
                output.push_str(code);
                if !description.is_empty() {
                    output.push(' ');
                    output.push_str(description);
                }
            }
            Node::Chapter { number, .. } => {
                let _ = write!(output, "\\c {}", number);
            }
            Node::Para { marker, .. } => {
                output.push('\\');
                output.push_str(marker);
            }
            Node::Verse { number, .. } => {
                let _ = write!(output, "\\v {} ", number);
            }
            Node::Char { marker, .. } => {
                output.push('\\');
                output.push_str(marker);
            }
            Node::Note { marker, caller, .. } => {
                output.push('\\');
                output.push_str(marker);
                output.push(' ');
                output.push_str(caller);
            }
            Node::Text { text } => output.push_str(text),
        }
    }

    fn write_attributes(&self, attributes: &Attributes, output: &mut String) {
        let kept: Vec<_> = attributes
            .iter()
            .filter(|(key, _)| self.mode == SerializeMode::Full || !markers::is_alignment_attr(key))
            .collect();
        if kept.is_empty() {
            return;
        }

        output.push('|');
        for (i, (key, value)) in kept.iter().enumerate() {
            if i > 0 {
                output.push(' ');
            }
            if key.is_empty() {
                output.push_str(value);
            } else {
                let _ = write!(output, "{}=\"{}\"", key, value);
            }
        }
    }
}

/// Whitespace-normalized form used for round-trip comparison: trailing
/// spaces dropped, runs of blank lines collapsed to one, no trailing blanks.
///
/// Space runs between a marker and its argument (`\v  1`) do not survive
/// parsing; the serializer always re-emits the canonical single separator,
/// so they need no handling here.
pub fn normalize_marker_text(source: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut previous_blank = false;

    for line in source.lines() {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            if !previous_blank && !lines.is_empty() {
                lines.push(String::new());
            }
            previous_blank = true;
        } else {
            lines.push(trimmed.to_string());
            previous_blank = false;
        }
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
