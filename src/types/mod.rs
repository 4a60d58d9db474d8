//! Core types for the kaidan library
//!
//! - Tree data: the authored node/choice/tree/set model
//! - Event: host inputs that drive a session
//! - Notification: observer broadcasts from the session controller
//! - View: the presentation-layer projection of session state

pub mod event;
pub mod notify;
pub mod tree;
pub mod view;

pub use event::PlayerEvent;
pub use notify::Notification;
pub use tree::{Choice, DialogueSet, Node, NodeId, Tree};
pub use view::DialogueView;
