//! Error taxonomy for dialogue configuration and session handling

use crate::types::tree::NodeId;
use thiserror::Error;

/// Authoring errors detected when a dialogue set is loaded or constructed.
///
/// A configuration error aborts loading the offending set; it is never
/// recovered at runtime.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tree '{tree}' has no entry node (id 0)")]
    MissingEntryNode { tree: String },

    #[error("tree '{tree}' defines node id {id} more than once")]
    DuplicateNodeId { tree: String, id: NodeId },

    #[error("gate references tree index {index}, but only {count} trees are defined")]
    TreeIndexOutOfRange { index: usize, count: usize },

    #[error("dialogue set '{npc}' defines no trees")]
    NoTrees { npc: String },
}

/// Errors surfaced by the session API at runtime.
///
/// These mark caller mistakes (wrong phase, bad index) and leave session
/// state untouched. Navigation problems inside a running session, such as a
/// choice targeting a node that does not exist, are not errors: the session ends
/// cleanly and a warning is logged instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("a dialogue session is already active")]
    AlreadyActive,

    #[error("no dialogue session is active")]
    NoActiveSession,

    #[error("not waiting for a choice")]
    NotAwaitingChoice,

    #[error("choice index {index} out of range ({available} available)")]
    InvalidChoiceIndex { index: usize, available: usize },

    #[error("tree '{tree}' has no entry node (id 0)")]
    MissingEntryNode { tree: String },
}

impl SessionError {
    pub fn invalid_choice(index: usize, available: usize) -> Self {
        Self::InvalidChoiceIndex { index, available }
    }

    pub fn missing_entry(tree: impl Into<String>) -> Self {
        Self::MissingEntryNode { tree: tree.into() }
    }
}
