//! Tree selection: ordered predicate rules evaluated against host state
//!
//! The gate decides which of an NPC's trees a new session speaks from. It is
//! re-evaluated every time a session is about to start, against a fresh
//! snapshot of external state, since inventory contents can change between
//! two encounters with the same NPC.

use crate::errors::ConfigError;
use crate::host::InventoryQuery;
use serde::{Deserialize, Serialize};

/// A single authorable predicate over host state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// The player's inventory contains the named item.
    HasItem(String),
    /// The player's inventory lacks the named item.
    MissingItem(String),
    /// The player has finished a session with this NPC before.
    CompletedBefore,
}

impl Condition {
    pub fn eval(&self, world: &WorldView<'_>) -> bool {
        match self {
            Condition::HasItem(name) => world.has_item(name),
            Condition::MissingItem(name) => !world.has_item(name),
            Condition::CompletedBefore => world.completed_before,
        }
    }

    fn needs_inventory(&self) -> bool {
        matches!(self, Condition::HasItem(_) | Condition::MissingItem(_))
    }
}

/// One rule: when the condition holds, speak from the given tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GateRule {
    pub when: Condition,
    pub tree: usize,
}

/// Ordered rule list plus a fallback tree index.
///
/// Rules are checked in author-declared order and the first match wins;
/// `default_tree` applies when none match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Gate {
    #[serde(default)]
    pub rules: Vec<GateRule>,
    pub default_tree: usize,
}

impl Gate {
    pub fn new(rules: Vec<GateRule>, default_tree: usize) -> Self {
        Self {
            rules,
            default_tree,
        }
    }

    /// A gate with no rules: every session uses the same tree.
    pub fn default_only(default_tree: usize) -> Self {
        Self::new(Vec::new(), default_tree)
    }

    /// Pick a tree index for the current world state. Pure: for a fixed
    /// snapshot, repeated calls return the same index.
    pub fn select(&self, world: &WorldView<'_>) -> usize {
        for rule in &self.rules {
            if rule.when.eval(world) {
                log::debug!(
                    "gate: rule {:?} matched, selecting tree {}",
                    rule.when,
                    rule.tree
                );
                return rule.tree;
            }
        }
        self.default_tree
    }

    /// Whether any rule queries the inventory collaborator.
    pub fn needs_inventory(&self) -> bool {
        self.rules.iter().any(|r| r.when.needs_inventory())
    }

    /// Check that every referenced tree index exists.
    pub fn validate(&self, tree_count: usize) -> Result<(), ConfigError> {
        for index in self
            .rules
            .iter()
            .map(|r| r.tree)
            .chain(std::iter::once(self.default_tree))
        {
            if index >= tree_count {
                return Err(ConfigError::TreeIndexOutOfRange {
                    index,
                    count: tree_count,
                });
            }
        }
        Ok(())
    }
}

/// Snapshot of external state a gate evaluates against.
///
/// A missing inventory collaborator degrades: item conditions evaluate
/// false rather than blocking the session.
#[derive(Clone, Copy)]
pub struct WorldView<'a> {
    pub inventory: Option<&'a dyn InventoryQuery>,
    pub completed_before: bool,
}

impl WorldView<'_> {
    fn has_item(&self, name: &str) -> bool {
        match self.inventory {
            Some(inventory) => inventory.has_item(name),
            None => false,
        }
    }
}
