//! # Document Handle
//!
//! A Document owns one open scripture document: its canonical marker-text
//! source and the tree parsed from it.
//!
//! Documents can be:
//! - **Memory-backed**: temporary, for testing or in-memory conversion
//! - **Notebook-backed**: loaded from a cell sequence supplied by the host
//!
//! The tree handed out by `tree()` is a snapshot; the editor surface edits
//! its own working copy and hands a fresh tree back through `commit`, which
//! re-serializes and only then replaces this document's state. A failed
//! commit leaves the last good source and tree untouched.

use crate::cells::{rebuild, CellSequence};
use crate::errors::EditorError;
use scribe_parser::{parse, serialize, ScriptureDocument, SerializeMode};

/// Editable scripture document
#[derive(Debug)]
pub struct Document {
    /// Logical name, usually the host's storage path
    pub name: String,

    /// Current version number (increments on each accepted commit)
    pub version: u64,

    /// Backing storage strategy
    storage: DocumentStorage,
}

#[derive(Debug)]
pub enum DocumentStorage {
    /// In-memory only
    Memory {
        source: String,
        tree: ScriptureDocument,
    },

    /// Loaded from a notebook-like container
    Notebook {
        cells: CellSequence,
        source: String,
        tree: ScriptureDocument,
        dirty: bool,
    },
}

impl Document {
    /// Create a document from marker text (memory-backed)
    pub fn from_source(name: impl Into<String>, source: String) -> Result<Self, EditorError> {
        let tree = parse(&source)?;
        Ok(Self {
            name: name.into(),
            version: 0,
            storage: DocumentStorage::Memory { source, tree },
        })
    }

    /// Create a document from the host's cell sequence (notebook-backed)
    pub fn from_cells(name: impl Into<String>, cells: CellSequence) -> Result<Self, EditorError> {
        let source = cells.flatten();
        let tree = parse(&source)?;
        Ok(Self {
            name: name.into(),
            version: 0,
            storage: DocumentStorage::Notebook {
                cells,
                source,
                tree,
                dirty: false,
            },
        })
    }

    pub fn tree(&self) -> &ScriptureDocument {
        match &self.storage {
            DocumentStorage::Memory { tree, .. } => tree,
            DocumentStorage::Notebook { tree, .. } => tree,
        }
    }

    pub fn source(&self) -> &str {
        match &self.storage {
            DocumentStorage::Memory { source, .. } => source,
            DocumentStorage::Notebook { source, .. } => source,
        }
    }

    pub fn cells(&self) -> Option<&CellSequence> {
        match &self.storage {
            DocumentStorage::Notebook { cells, .. } => Some(cells),
            DocumentStorage::Memory { .. } => None,
        }
    }

    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::Notebook { dirty, .. } => *dirty,
            DocumentStorage::Memory { .. } => false,
        }
    }

    /// Serialize the candidate tree and, on success, make it this document's
    /// current state. Returns the serialized text and refreshed cells.
    ///
    /// On failure nothing is replaced: the previously held good tree stays.
    pub fn commit(
        &mut self,
        candidate: ScriptureDocument,
        mode: SerializeMode,
    ) -> Result<(String, CellSequence), EditorError> {
        let text = serialize(&candidate, mode)?;
        let new_cells = rebuild(&candidate);

        self.version += 1;
        match &mut self.storage {
            DocumentStorage::Memory { source, tree } => {
                *source = text.clone();
                *tree = candidate;
            }
            DocumentStorage::Notebook {
                cells,
                source,
                tree,
                dirty,
            } => {
                *cells = new_cells.clone();
                *source = text.clone();
                *tree = candidate;
                *dirty = true;
            }
        }
        Ok((text, new_cells))
    }

    /// Mark the current state as persisted by the host
    pub fn mark_persisted(&mut self) {
        if let DocumentStorage::Notebook { dirty, .. } = &mut self.storage {
            *dirty = false;
        }
    }
}
