//! # Cell/Notebook Bridge
//!
//! Maps verse-addressed notebook cells to and from the scripture tree.
//!
//! `flatten` is deliberately marker-blind: cell boundaries carry no meaning,
//! so joining cells with a newline must reconstruct the linear document.
//! `rebuild` goes the other way, re-emitting one cell per verse (or per
//! top-level block for material outside any verse, like titles and headings
//! before chapter 1 verse 1).

use crate::errors::EditorError;
use scribe_common::visitor::{walk_children, Visitor};
use scribe_common::{extract_verse_ref, VerseRef};
use scribe_parser::{node_opening, serialize_node, Node, ScriptureDocument};
use serde::{Deserialize, Serialize};

/// One editable unit of the notebook-like container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub index: usize,
    pub raw_text: String,
    pub verse_ref: Option<VerseRef>,
}

/// Non-empty ordered list of cells; ordering matches the container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellSequence {
    cells: Vec<Cell>,
}

impl CellSequence {
    /// Build a sequence from the host's cell texts, resolving each cell's
    /// leading line into a verse reference where one is present
    pub fn from_texts<I, S>(texts: I) -> Result<Self, EditorError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells: Vec<Cell> = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                let raw_text = text.into();
                let verse_ref = extract_verse_ref(first_line(&raw_text));
                Cell {
                    index,
                    raw_text,
                    verse_ref,
                }
            })
            .collect();

        if cells.is_empty() {
            return Err(EditorError::EmptyNotebook);
        }
        Ok(Self { cells })
    }

    /// Concatenate cell texts with a single newline separator.
    ///
    /// No marker-aware logic by design: boundaries are presentational only.
    pub fn flatten(&self) -> String {
        let texts: Vec<&str> = self.cells.iter().map(|c| c.raw_text.as_str()).collect();
        texts.join("\n")
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Locate the cell holding a given verse
    pub fn find_verse(&self, verse_ref: &VerseRef) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|cell| cell.verse_ref.as_ref() == Some(verse_ref))
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

/// Re-emit one cell per verse from an edited tree.
///
/// Container openers (book line, chapter line) and verse-less paragraphs
/// (headings) become block cells; a paragraph that carries verses prefixes
/// its first verse's cell, so a cell sequence produced here is a fixed point
/// of `parse(flatten(..))` + `rebuild`.
pub fn rebuild(doc: &ScriptureDocument) -> CellSequence {
    let mut builder = CellBuilder {
        cells: Vec::new(),
        buffer: String::new(),
    };
    builder.walk(&doc.content);
    builder.finish()
}

struct CellBuilder {
    cells: Vec<Cell>,
    buffer: String,
}

impl CellBuilder {
    fn walk(&mut self, nodes: &[Node]) {
        for node in nodes {
            match node {
                Node::Book { content, .. } => {
                    self.buffer.push_str(&node_opening(node));
                    self.flush(None);
                    self.walk(content);
                }
                Node::Chapter { content, .. } => {
                    self.buffer.push_str(&node_opening(node));
                    self.flush(None);
                    self.walk(content);
                }
                Node::Para { content, .. } => {
                    if contains_verse(node) {
                        self.buffer.push_str(&node_opening(node));
                        self.walk(content);
                    } else {
                        self.buffer.push_str(&serialize_node(node));
                        self.flush(None);
                    }
                }
                Node::Verse { sid, .. } => {
                    self.buffer.push_str(&serialize_node(node));
                    self.flush(extract_verse_ref(sid));
                }
                Node::Text { text } => self.buffer.push_str(text),
                Node::Char { .. } | Node::Note { .. } => {
                    self.buffer.push_str(&serialize_node(node));
                }
            }
        }
    }

    fn flush(&mut self, verse_ref: Option<VerseRef>) {
        let text = self.buffer.trim_matches('\n');
        if text.trim().is_empty() {
            // Interstitial whitespace; the flatten separator restores it
            self.buffer.clear();
            return;
        }
        self.cells.push(Cell {
            index: self.cells.len(),
            raw_text: text.to_string(),
            verse_ref,
        });
        self.buffer.clear();
    }

    fn finish(mut self) -> CellSequence {
        self.flush(None);
        if self.cells.is_empty() {
            // Keep the sequence non-empty even for an empty tree
            self.cells.push(Cell {
                index: 0,
                raw_text: String::new(),
                verse_ref: None,
            });
        }
        CellSequence { cells: self.cells }
    }
}

fn contains_verse(node: &Node) -> bool {
    struct Probe {
        found: bool,
    }
    impl Visitor for Probe {
        fn visit_verse(&mut self, _node: &Node) {
            self.found = true;
        }
    }

    let mut probe = Probe { found: false };
    walk_children(&mut probe, node);
    probe.found
}
