//! External events delivered to a running dialogue session

use serde::{Deserialize, Serialize};

/// Discrete host inputs that drive a session forward.
///
/// The host's event loop delivers these serially; the engine never advances
/// on its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Generic advance input (Enter, click). While text is still being
    /// revealed this skips to the fully-shown state; on a node with exactly
    /// one choice it selects that choice.
    Continue,
    /// The player picked a choice by index.
    SelectOption(usize),
    /// Abort the session (escape key). Accepted in any state.
    Cancel,
    /// The presentation layer finished revealing the current line.
    TextFullyShown,
}
