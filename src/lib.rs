//! # kaidan
//!
//! A branching-dialogue engine: directed graphs of NPC lines and player
//! choices, walked deterministically one host event at a time. Trees are
//! immutable once authored; which tree an NPC speaks from is decided by
//! predicate gate rules over host state (inventory, prior completions), and
//! a session controller owns the whole lifecycle: input locking, observer
//! notifications, and clean teardown on cancel or navigation errors.
//!
//! ## Quick Start
//!
//! ```rust
//! use kaidan::{
//!     Choice, DialogueManager, DialogueSet, Gate, Node, NodeId, PlayerEvent, Tree,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let set = DialogueSet {
//!     npc: "Stranger".to_string(),
//!     trees: vec![Tree {
//!         name: "greeting".to_string(),
//!         nodes: vec![
//!             Node {
//!                 id: NodeId(0),
//!                 text: "Hello.".to_string(),
//!                 choices: vec![Choice::new("[CONTINUE]", NodeId(1))],
//!                 end: false,
//!             },
//!             Node {
//!                 id: NodeId(1),
//!                 text: "Farewell, traveler.".to_string(),
//!                 choices: vec![],
//!                 end: true,
//!             },
//!         ],
//!     }],
//!     gate: Gate::default_only(0),
//! };
//!
//! let mut manager = DialogueManager::new(set)?;
//! manager.begin()?;
//!
//! // The host finished presenting "Hello.", so its choices come up.
//! manager.handle(PlayerEvent::TextFullyShown)?;
//! assert_eq!(manager.view().unwrap().options, vec!["[CONTINUE]".to_string()]);
//!
//! // A single choice advances on plain Continue input.
//! manager.handle(PlayerEvent::Continue)?;
//! manager.handle(PlayerEvent::TextFullyShown)?;
//!
//! // End nodes present a synthesized "Close"; selecting it ends cleanly.
//! manager.handle(PlayerEvent::SelectOption(0))?;
//! assert!(!manager.is_active());
//! # Ok(())
//! # }
//! ```
//!
//! ## Host integration
//!
//! Hosts plug in through small seams rather than a global lookup: an
//! [`InventoryQuery`](host::InventoryQuery) feeds gate conditions, a
//! [`ControlHook`](host::ControlHook) locks player input around a session,
//! and any number of [`NotificationSink`](host::NotificationSink)
//! subscribers observe progress. All of them are optional; a missing
//! collaborator degrades with a logged warning and never blocks the
//! conversation.

pub mod cli;
pub mod engine;
pub mod errors;
pub mod gate;
pub mod host;
pub mod repository;
pub mod session;
pub mod storage;
pub mod types;

pub use engine::{Phase, Traversal};
pub use errors::{ConfigError, SessionError};
pub use gate::{Condition, Gate, GateRule, WorldView};
pub use host::{ControlHook, InventoryQuery, NotificationSink};
pub use repository::{
    DialogueRepository, FileSystemDialogueRepository, InMemoryDialogueRepository, RepositoryError,
};
pub use session::{DialogueManager, SubscriberId};
pub use types::{Choice, DialogueSet, DialogueView, Node, NodeId, Notification, PlayerEvent, Tree};
