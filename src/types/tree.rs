//! Authored dialogue data: choices, nodes, trees, and per-NPC sets
//!
//! Everything in this module is immutable once loaded. Runtime variation
//! (returning visitors, inventory-dependent lines) is expressed by authoring
//! alternative trees and selecting between them with gate rules, never by
//! editing a tree in place.

use crate::errors::ConfigError;
use crate::gate::Gate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Stable identifier of a node within one tree.
///
/// Ids are assigned at authoring time and looked up by value, not by
/// position; they need not be contiguous or sorted. Id `0` is the entry
/// point of every tree, and `-1` ([`NodeId::END`]) is the sentinel a choice
/// uses to end the session instead of navigating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct NodeId(pub i32);

impl NodeId {
    /// Entry node of every tree.
    pub const ENTRY: NodeId = NodeId(0);
    /// Selecting a choice with this target ends the session.
    pub const END: NodeId = NodeId(-1);
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player-selectable choice: display text plus the node it leads to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Choice {
    pub text: String,
    pub next: NodeId,
}

impl Choice {
    pub fn new(text: impl Into<String>, next: NodeId) -> Self {
        Self {
            text: text.into(),
            next,
        }
    }

    /// The synthesized way out of an end node.
    pub fn close() -> Self {
        Self::new("Close", NodeId::END)
    }
}

/// One line of NPC text plus its outgoing choices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub text: String,
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Marks an explicit end node. A node with no choices is an end node
    /// regardless of this flag.
    #[serde(default)]
    pub end: bool,
}

impl Node {
    /// Whether this node terminates the conversation once its text has been
    /// shown. End nodes present a single synthesized `Close` choice.
    pub fn is_end(&self) -> bool {
        self.end || self.choices.is_empty()
    }
}

/// One complete dialogue graph for an NPC state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tree {
    pub name: String,
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Look up a node by its authored id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Check the authoring invariants: unique ids and a present entry node.
    /// Duplicate ids are rejected outright rather than resolved
    /// first-match-wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id) {
                return Err(ConfigError::DuplicateNodeId {
                    tree: self.name.clone(),
                    id: node.id,
                });
            }
        }
        if !seen.contains(&NodeId::ENTRY) {
            return Err(ConfigError::MissingEntryNode {
                tree: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// The complete authored bundle for one NPC: its trees plus the gate that
/// picks which tree a new session speaks from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DialogueSet {
    pub npc: String,
    pub trees: Vec<Tree>,
    pub gate: Gate,
}

impl DialogueSet {
    /// Validate the whole bundle. Runs at load time; a failure aborts
    /// loading this set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trees.is_empty() {
            return Err(ConfigError::NoTrees {
                npc: self.npc.clone(),
            });
        }
        for tree in &self.trees {
            tree.validate()?;
        }
        self.gate.validate(self.trees.len())
    }
}
