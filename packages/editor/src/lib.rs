//! # Scribe Editor
//!
//! Editing engine between a notebook-like storage container and the rich
//! scripture editor surface.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: verse-addressed cells                 │
//! └─────────────────────────────────────────────┘
//!                     ↓ flatten
//! ┌─────────────────────────────────────────────┐
//! │ parser: marker text → scripture tree        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + sync session   │
//! │  - Load cells, parse once                   │
//! │  - Debounce editor change events            │
//! │  - Serialize (Full or Stripped) on commit   │
//! │  - Rebuild one cell per verse               │
//! └─────────────────────────────────────────────┘
//!                     ↓ PersistRequest
//! ┌─────────────────────────────────────────────┐
//! │ host: canonical marker text + cells         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core principles
//!
//! 1. **The tree is a snapshot**: the editor surface mutates its own copy
//!    and hands whole trees back; there is no shared mutable state.
//! 2. **Conversions are values**: parse/serialize failures are returned,
//!    and only the session decides how to surface them.
//! 3. **Edits survive failures**: a failed serialize keeps the last good
//!    tree; the host just gets a warning.

mod cells;
mod document;
mod errors;
mod session;

pub use cells::{rebuild, Cell, CellSequence};
pub use document::{Document, DocumentStorage};
pub use errors::{ConversionStage, EditorError};
pub use session::{EditSession, SessionConfig, SessionEvent, SessionOutput, SessionState};

// Re-export the conversion types callers pair these APIs with
pub use scribe_common::VerseRef;
pub use scribe_parser::{Node, ScriptureDocument, SerializeMode};
