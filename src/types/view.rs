//! Host-facing projection of the current session state

use serde::{Deserialize, Serialize};

/// What a presentation layer needs in order to render the session right
/// now. Owns no narrative logic; any host (console, world-space UI, test
/// harness) can be built on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DialogueView {
    /// The current node's text.
    pub text: String,
    /// Choice labels, in order. Empty until the line is fully shown.
    pub options: Vec<String>,
    /// True when a plain continue input is enough to move on: the text is
    /// still being revealed, or exactly one choice is available.
    pub can_advance_without_choice: bool,
    /// True once the engine is waiting on a choice.
    pub awaiting_choice: bool,
}
