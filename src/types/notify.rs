//! Notifications broadcast to session observers

use serde::{Deserialize, Serialize};

/// Events emitted by the session controller as a conversation progresses.
///
/// Subscribers receive them in order; delivery order across subscribers is
/// unspecified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Notification {
    /// A session began; carries the NPC name and the selected tree.
    SessionStarted { npc: String, tree: String },
    /// A new line of NPC text is ready to present.
    LineDisplayed { text: String },
    /// The current line is fully shown and these choices are selectable.
    ChoicesAvailable { options: Vec<String> },
    /// The session ended (naturally or by cancellation).
    SessionEnded,
}
