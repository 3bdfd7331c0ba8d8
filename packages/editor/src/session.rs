//! # Synchronization Coordinator
//!
//! Owns the editing session's document and mediates between the editor
//! surface and the storage host:
//!
//! ```text
//! Idle → Loading → Ready → Serializing → Ready
//!           │                    │
//!           └──────▶ Error ◀─────┘
//! ```
//!
//! Content-change events are debounced; events inside the window collapse
//! into one serialize pass over the latest tree (last-write-wins). At most
//! one pass runs at a time, and a failed pass reports an error without
//! touching the last good tree, so the user's edits are never lost.

use crate::cells::CellSequence;
use crate::document::Document;
use crate::errors::ConversionStage;
use scribe_parser::{ScriptureDocument, SerializeMode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Ready,
    Serializing,
    Error,
}

/// Events from the host and the editor surface
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SessionEvent {
    /// Host supplies the cell sequence to edit
    Load { name: String, cells: CellSequence },

    /// Editor surface reports an edited tree snapshot
    ContentChanged { tree: ScriptureDocument },

    /// Explicit save action; bypasses the debounce window
    Save { mode: SerializeMode },
}

/// Signals back to the host and editor surface
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "camelCase")]
pub enum SessionOutput {
    /// Document loaded; the editor surface should render this tree
    Loaded { tree: ScriptureDocument },

    /// Serialized text and refreshed cells for the host to persist
    Persist {
        text: String,
        cells: CellSequence,
        mode: SerializeMode,
    },

    /// Load failed; the editor stays empty
    LoadError { message: String },

    /// A debounced or explicit conversion failed; edits are kept in memory
    ConversionFailed {
        stage: ConversionStage,
        message: String,
    },
}

pub struct SessionConfig {
    /// Quiet period before an edited tree is serialized back to storage
    pub debounce: Duration,

    /// Mode used for debounced persists
    pub persist_mode: SerializeMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1000),
            persist_mode: SerializeMode::Full,
        }
    }
}

/// One editing session: one coordinator, one document, one debounce timer
pub struct EditSession {
    config: SessionConfig,
    state: SessionState,
    document: Option<Document>,

    /// Latest tree observed inside the debounce window
    pending: Option<ScriptureDocument>,
}

impl EditSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
            document: None,
            pending: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Drive the session over channels until the event sender is dropped
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<SessionEvent>,
        outputs: mpsc::Sender<SessionOutput>,
    ) {
        let mut deadline: Option<Instant> = None;

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    let emitted = match event {
                        SessionEvent::Load { name, cells } => {
                            deadline = None;
                            self.on_load(name, cells)
                        }
                        SessionEvent::ContentChanged { tree } => {
                            if self.on_content_changed(tree) {
                                deadline = Some(Instant::now() + self.config.debounce);
                            }
                            Vec::new()
                        }
                        SessionEvent::Save { mode } => {
                            deadline = None;
                            self.on_save(mode)
                        }
                    };
                    for output in emitted {
                        if outputs.send(output).await.is_err() {
                            return;
                        }
                    }
                }
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)),
                    if deadline.is_some() =>
                {
                    deadline = None;
                    for output in self.on_debounce_fired() {
                        if outputs.send(output).await.is_err() {
                            return;
                        }
                    }
                }
            }
        }
    }

    /// `Idle|Ready|Error → Loading → Ready|Error`
    pub fn on_load(&mut self, name: String, cells: CellSequence) -> Vec<SessionOutput> {
        self.state = SessionState::Loading;
        self.pending = None;

        match Document::from_cells(name, cells) {
            Ok(document) => {
                debug!(name = %document.name, "document loaded");
                let tree = document.tree().clone();
                self.document = Some(document);
                self.state = SessionState::Ready;
                vec![SessionOutput::Loaded { tree }]
            }
            Err(error) => {
                warn!(%error, "load failed");
                self.state = SessionState::Error;
                vec![SessionOutput::LoadError {
                    message: error.to_string(),
                }]
            }
        }
    }

    /// Capture the latest tree; returns whether a pass should be scheduled
    pub fn on_content_changed(&mut self, tree: ScriptureDocument) -> bool {
        if self.document.is_none() {
            warn!("content change before any document was loaded; ignoring");
            return false;
        }
        self.pending = Some(tree);
        true
    }

    /// `Ready|Error → Serializing → Ready|Error`
    pub fn on_debounce_fired(&mut self) -> Vec<SessionOutput> {
        let Some(tree) = self.pending.take() else {
            return Vec::new();
        };
        self.serialize_pass(tree, self.config.persist_mode)
    }

    /// Explicit save: uses the pending tree if one is captured, otherwise
    /// the document's current tree
    pub fn on_save(&mut self, mode: SerializeMode) -> Vec<SessionOutput> {
        let tree = match self.pending.take() {
            Some(tree) => tree,
            None => match &self.document {
                Some(document) => document.tree().clone(),
                None => return Vec::new(),
            },
        };
        self.serialize_pass(tree, mode)
    }

    fn serialize_pass(
        &mut self,
        tree: ScriptureDocument,
        mode: SerializeMode,
    ) -> Vec<SessionOutput> {
        let Some(document) = self.document.as_mut() else {
            return Vec::new();
        };

        self.state = SessionState::Serializing;
        match document.commit(tree, mode) {
            Ok((text, cells)) => {
                debug!(version = document.version, "serialized for persist");
                document.mark_persisted();
                self.state = SessionState::Ready;
                vec![SessionOutput::Persist { text, cells, mode }]
            }
            Err(error) => {
                warn!(%error, "conversion failed; keeping last good tree");
                self.state = SessionState::Error;
                vec![SessionOutput::ConversionFailed {
                    stage: error.stage().unwrap_or(ConversionStage::Serialize),
                    message: error.to_string(),
                }]
            }
        }
    }
}
