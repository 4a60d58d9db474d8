//! Traversal engine: the state machine that walks one dialogue tree
//!
//! The engine owns only traversal state; trees are borrowed per call and
//! never mutated. It advances exclusively on discrete host signals; there
//! is no time-driven behavior here. Text reveal ("typing") belongs to the
//! presentation layer; the engine only cares about the reveal-complete
//! signal.

use crate::errors::SessionError;
use crate::types::tree::{Choice, Node, NodeId, Tree};


/// Where the engine is in its walk of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No traversal in progress.
    #[default]
    Idle,
    /// A node's text is being presented; waiting for the reveal-complete
    /// signal.
    Displaying,
    /// Text fully shown; waiting for the player to pick a choice.
    AwaitingChoice,
    /// Traversal finished.
    Ended,
}

/// One live walk of a tree, from the entry node to termination.
#[derive(Debug, Default)]
pub struct Traversal {
    phase: Phase,
    current: NodeId,
    pending: Vec<Choice>,
}

impl Traversal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The node the traversal is currently on, if any.
    pub fn current_node<'t>(&self, tree: &'t Tree) -> Option<&'t Node> {
        match self.phase {
            Phase::Idle | Phase::Ended => None,
            _ => tree.node(self.current),
        }
    }

    /// Choices selectable right now. Empty outside `AwaitingChoice`.
    pub fn choices(&self) -> &[Choice] {
        &self.pending
    }

    /// Begin walking `tree` from its entry node.
    ///
    /// Starting while a walk is in progress is rejected without touching
    /// state; sessions never nest.
    pub fn start(&mut self, tree: &Tree) -> Result<(), SessionError> {
        match self.phase {
            Phase::Idle | Phase::Ended => {}
            Phase::Displaying | Phase::AwaitingChoice => {
                return Err(SessionError::AlreadyActive);
            }
        }
        if tree.node(NodeId::ENTRY).is_none() {
            return Err(SessionError::missing_entry(&tree.name));
        }
        self.phase = Phase::Displaying;
        self.current = NodeId::ENTRY;
        self.pending.clear();
        Ok(())
    }

    /// The presentation layer finished showing the current line; make its
    /// choices selectable. End nodes get a single synthesized `Close`
    /// choice, so every reachable node has a way out.
    ///
    /// Returns true if a transition happened. Outside `Displaying` this is
    /// a forgiving no-op, since hosts may resend the signal.
    pub fn reveal_complete(&mut self, tree: &Tree) -> bool {
        if self.phase != Phase::Displaying {
            return false;
        }
        match tree.node(self.current) {
            Some(node) => {
                self.pending = if node.is_end() {
                    vec![Choice::close()]
                } else {
                    node.choices.clone()
                };
                self.phase = Phase::AwaitingChoice;
            }
            None => {
                log::warn!(
                    "dialogue: current node {} vanished from tree '{}', ending",
                    self.current,
                    tree.name
                );
                self.finish();
            }
        }
        true
    }

    /// Resolve the choice at `index`.
    ///
    /// A target of [`NodeId::END`] ends the walk; a target that resolves to
    /// no node also ends it (authoring typo, logged) rather than crashing
    /// the host. An out-of-range index is a caller error and leaves state
    /// untouched.
    pub fn choose(&mut self, tree: &Tree, index: usize) -> Result<Phase, SessionError> {
        if self.phase != Phase::AwaitingChoice {
            return Err(SessionError::NotAwaitingChoice);
        }
        if index >= self.pending.len() {
            return Err(SessionError::invalid_choice(index, self.pending.len()));
        }

        let target = self.pending[index].next;
        if target == NodeId::END {
            self.finish();
            return Ok(self.phase);
        }

        match tree.node(target) {
            Some(node) => {
                self.current = node.id;
                self.pending.clear();
                self.phase = Phase::Displaying;
            }
            None => {
                log::warn!(
                    "dialogue: choice target {} not found in tree '{}', ending",
                    target,
                    tree.name
                );
                self.finish();
            }
        }
        Ok(self.phase)
    }

    /// Drop any in-progress walk and return to `Idle`.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.pending.clear();
        self.current = NodeId::ENTRY;
    }

    fn finish(&mut self) {
        self.phase = Phase::Ended;
        self.pending.clear();
    }
}
