//! Session controller: lifecycle, collaborators, and notifications
//!
//! [`DialogueManager`] is the only writer of session state and of the
//! completed-before flag. It is handed its collaborators explicitly, with no
//! ambient singleton to look up; whoever owns the interaction source owns
//! the manager.

use crate::engine::{Phase, Traversal};
use crate::errors::{ConfigError, SessionError};
use crate::gate::WorldView;
use crate::host::{ControlHook, InventoryQuery, NotificationSink};
use crate::types::event::PlayerEvent;
use crate::types::notify::Notification;
use crate::types::tree::DialogueSet;
use crate::types::view::DialogueView;

/// Handle returned by [`DialogueManager::subscribe`], used for explicit
/// teardown by the subscriber's owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// One live session: which tree the gate picked. Traversal position lives
/// in the engine.
#[derive(Debug)]
struct Session {
    tree: usize,
}

/// Owns an NPC's authored dialogue set and runs sessions over it.
///
/// At most one session is active at a time; re-entry is rejected, never
/// stacked. All collaborators are optional and their absence degrades with
/// a one-time warning instead of blocking the conversation.
pub struct DialogueManager {
    set: DialogueSet,
    traversal: Traversal,
    session: Option<Session>,
    completed_before: bool,
    inventory: Option<Box<dyn InventoryQuery>>,
    controls: Option<Box<dyn ControlHook>>,
    subscribers: Vec<(SubscriberId, Box<dyn NotificationSink>)>,
    next_subscriber: u64,
    controls_warned: bool,
    inventory_warned: bool,
}

impl DialogueManager {
    /// Take ownership of a dialogue set, validating it first. A set that
    /// fails validation is never accepted.
    pub fn new(set: DialogueSet) -> Result<Self, ConfigError> {
        set.validate()?;
        Ok(Self {
            set,
            traversal: Traversal::new(),
            session: None,
            completed_before: false,
            inventory: None,
            controls: None,
            subscribers: Vec::new(),
            next_subscriber: 0,
            controls_warned: false,
            inventory_warned: false,
        })
    }

    pub fn with_inventory(mut self, inventory: Box<dyn InventoryQuery>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    pub fn with_controls(mut self, controls: Box<dyn ControlHook>) -> Self {
        self.controls = Some(controls);
        self
    }

    /// Register an observer. The returned id is the only way to remove it;
    /// subscriptions are torn down by their owner, not by object lifetime.
    pub fn subscribe(&mut self, sink: Box<dyn NotificationSink>) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, sink));
        id
    }

    /// Remove a subscriber. Returns false if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn npc(&self) -> &str {
        &self.set.npc
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> Phase {
        self.traversal.phase()
    }

    pub fn completed_before(&self) -> bool {
        self.completed_before
    }

    /// Start a session. The gate re-evaluates external state on every call,
    /// so consecutive sessions with the same NPC can speak from different
    /// trees.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        if self.session.is_some() {
            return Err(SessionError::AlreadyActive);
        }

        if self.set.gate.needs_inventory() && self.inventory.is_none() && !self.inventory_warned {
            log::warn!(
                "dialogue '{}': no inventory collaborator, item conditions treat every item as absent",
                self.set.npc
            );
            self.inventory_warned = true;
        }

        let world = WorldView {
            inventory: self.inventory.as_deref(),
            completed_before: self.completed_before,
        };
        let index = self.set.gate.select(&world);

        self.traversal.start(&self.set.trees[index])?;
        self.session = Some(Session { tree: index });

        match &self.controls {
            Some(controls) => controls.disable_input(),
            None => {
                if !self.controls_warned {
                    log::warn!(
                        "dialogue '{}': no control hook, player input stays enabled",
                        self.set.npc
                    );
                    self.controls_warned = true;
                }
            }
        }

        let tree = &self.set.trees[index];
        self.emit(Notification::SessionStarted {
            npc: self.set.npc.clone(),
            tree: tree.name.clone(),
        });
        if let Some(node) = self.traversal.current_node(tree) {
            self.emit(Notification::LineDisplayed {
                text: node.text.clone(),
            });
        }
        Ok(())
    }

    /// Route one host event into the session.
    pub fn handle(&mut self, event: PlayerEvent) -> Result<(), SessionError> {
        match event {
            // Cancel is accepted in any state; ending twice is harmless.
            PlayerEvent::Cancel => {
                self.end();
                Ok(())
            }
            _ if self.session.is_none() => Err(SessionError::NoActiveSession),
            PlayerEvent::TextFullyShown => self.reveal(),
            PlayerEvent::Continue => match self.traversal.phase() {
                // Continue during the reveal doubles as skip-typing.
                Phase::Displaying => self.reveal(),
                Phase::AwaitingChoice if self.traversal.choices().len() == 1 => {
                    self.submit_choice(0)
                }
                _ => {
                    log::debug!("dialogue: continue ignored, a choice is required");
                    Ok(())
                }
            },
            PlayerEvent::SelectOption(index) => self.submit_choice(index),
        }
    }

    /// Resolve a choice by index. An out-of-range index surfaces as
    /// [`SessionError::InvalidChoiceIndex`] and changes nothing.
    pub fn submit_choice(&mut self, index: usize) -> Result<(), SessionError> {
        let tree_index = match &self.session {
            Some(session) => session.tree,
            None => return Err(SessionError::NoActiveSession),
        };

        let phase = self.traversal.choose(&self.set.trees[tree_index], index)?;
        match phase {
            Phase::Displaying => {
                let text = self
                    .traversal
                    .current_node(&self.set.trees[tree_index])
                    .map(|node| node.text.clone())
                    .unwrap_or_default();
                self.emit(Notification::LineDisplayed { text });
            }
            Phase::Ended => self.end(),
            _ => {}
        }
        Ok(())
    }

    /// End the session. Idempotent: a second call observes nothing to do.
    /// Control restoration and the `SessionEnded` notification happen
    /// exactly once per session.
    pub fn end(&mut self) {
        if self.session.take().is_none() {
            return;
        }
        self.traversal.reset();
        if let Some(controls) = &self.controls {
            controls.enable_input();
        }
        self.completed_before = true;
        self.emit(Notification::SessionEnded);
    }

    /// Presentation projection of the current state, if a session is
    /// active.
    pub fn view(&self) -> Option<DialogueView> {
        let tree_index = self.session.as_ref()?.tree;
        let tree = &self.set.trees[tree_index];
        let node = self.traversal.current_node(tree)?;
        let phase = self.traversal.phase();
        let options: Vec<String> = self
            .traversal
            .choices()
            .iter()
            .map(|choice| choice.text.clone())
            .collect();
        let single_choice = options.len() == 1;
        Some(DialogueView {
            text: node.text.clone(),
            options,
            can_advance_without_choice: phase == Phase::Displaying
                || (phase == Phase::AwaitingChoice && single_choice),
            awaiting_choice: phase == Phase::AwaitingChoice,
        })
    }

    fn reveal(&mut self) -> Result<(), SessionError> {
        let tree_index = match &self.session {
            Some(session) => session.tree,
            None => return Err(SessionError::NoActiveSession),
        };
        if !self.traversal.reveal_complete(&self.set.trees[tree_index]) {
            return Ok(());
        }
        match self.traversal.phase() {
            Phase::AwaitingChoice => {
                let options: Vec<String> = self
                    .traversal
                    .choices()
                    .iter()
                    .map(|choice| choice.text.clone())
                    .collect();
                self.emit(Notification::ChoicesAvailable { options });
            }
            Phase::Ended => self.end(),
            _ => {}
        }
        Ok(())
    }

    fn emit(&self, notification: Notification) {
        for (_, sink) in &self.subscribers {
            sink.notify(&notification);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{Condition, Gate, GateRule};
    use crate::types::tree::{Choice, Node, NodeId, Tree};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    struct RecordingSink(Rc<RefCell<Vec<Notification>>>);

    impl NotificationSink for RecordingSink {
        fn notify(&self, notification: &Notification) {
            self.0.borrow_mut().push(notification.clone());
        }
    }

    struct CountingHook {
        disabled: Rc<Cell<u32>>,
        enabled: Rc<Cell<u32>>,
    }

    impl ControlHook for CountingHook {
        fn disable_input(&self) {
            self.disabled.set(self.disabled.get() + 1);
        }
        fn enable_input(&self) {
            self.enabled.set(self.enabled.get() + 1);
        }
    }

    fn monologue_set() -> DialogueSet {
        DialogueSet {
            npc: "Stranger".to_string(),
            trees: vec![Tree {
                name: "mutter".to_string(),
                nodes: vec![
                    Node {
                        id: NodeId(0),
                        text: "This house looks abandoned.".to_string(),
                        choices: vec![Choice::new("[CONTINUE]", NodeId(1))],
                        end: false,
                    },
                    Node {
                        id: NodeId(1),
                        text: "I don't see her...".to_string(),
                        choices: vec![],
                        end: true,
                    },
                ],
            }],
            gate: Gate::default_only(0),
        }
    }

    #[test]
    fn constructing_with_a_bad_set_fails() {
        let mut set = monologue_set();
        set.trees[0].nodes.remove(0);
        assert!(matches!(
            DialogueManager::new(set),
            Err(ConfigError::MissingEntryNode { .. })
        ));
    }

    #[test]
    fn begin_rejects_reentry() {
        let mut manager = DialogueManager::new(monologue_set()).unwrap();
        manager.begin().unwrap();
        assert_eq!(manager.begin(), Err(SessionError::AlreadyActive));
        assert!(manager.is_active());
    }

    #[test]
    fn events_without_a_session_are_rejected_except_cancel() {
        let mut manager = DialogueManager::new(monologue_set()).unwrap();
        assert_eq!(
            manager.handle(PlayerEvent::Continue),
            Err(SessionError::NoActiveSession)
        );
        assert_eq!(
            manager.handle(PlayerEvent::SelectOption(0)),
            Err(SessionError::NoActiveSession)
        );
        assert_eq!(manager.handle(PlayerEvent::Cancel), Ok(()));
    }

    #[test]
    fn full_monologue_emits_notifications_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = DialogueManager::new(monologue_set()).unwrap();
        manager.subscribe(Box::new(RecordingSink(log.clone())));

        manager.begin().unwrap();
        manager.handle(PlayerEvent::TextFullyShown).unwrap();
        manager.handle(PlayerEvent::Continue).unwrap(); // single [CONTINUE] choice
        manager.handle(PlayerEvent::TextFullyShown).unwrap();
        manager.handle(PlayerEvent::Continue).unwrap(); // synthesized Close

        assert!(!manager.is_active());
        let log = log.borrow();
        assert_eq!(
            *log,
            vec![
                Notification::SessionStarted {
                    npc: "Stranger".to_string(),
                    tree: "mutter".to_string(),
                },
                Notification::LineDisplayed {
                    text: "This house looks abandoned.".to_string()
                },
                Notification::ChoicesAvailable {
                    options: vec!["[CONTINUE]".to_string()]
                },
                Notification::LineDisplayed {
                    text: "I don't see her...".to_string()
                },
                Notification::ChoicesAvailable {
                    options: vec!["Close".to_string()]
                },
                Notification::SessionEnded,
            ]
        );
    }

    #[test]
    fn control_hooks_fire_exactly_once_per_session() {
        let disabled = Rc::new(Cell::new(0));
        let enabled = Rc::new(Cell::new(0));
        let mut manager = DialogueManager::new(monologue_set())
            .unwrap()
            .with_controls(Box::new(CountingHook {
                disabled: disabled.clone(),
                enabled: enabled.clone(),
            }));

        manager.begin().unwrap();
        assert_eq!(disabled.get(), 1);
        assert_eq!(enabled.get(), 0);

        manager.end();
        manager.end(); // idempotent
        manager.handle(PlayerEvent::Cancel).unwrap(); // still nothing to do

        assert_eq!(disabled.get(), 1);
        assert_eq!(enabled.get(), 1);
    }

    #[test]
    fn double_end_emits_a_single_session_ended() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = DialogueManager::new(monologue_set()).unwrap();
        manager.subscribe(Box::new(RecordingSink(log.clone())));

        manager.begin().unwrap();
        manager.end();
        manager.end();

        let ended = log
            .borrow()
            .iter()
            .filter(|n| matches!(n, Notification::SessionEnded))
            .count();
        assert_eq!(ended, 1);
    }

    #[test]
    fn missing_collaborators_never_block_the_conversation() {
        // No hooks, no inventory, and a gate that wants the inventory.
        let mut set = monologue_set();
        set.gate = Gate::new(
            vec![GateRule {
                when: Condition::HasItem("Cellar Key".to_string()),
                tree: 0,
            }],
            0,
        );
        let mut manager = DialogueManager::new(set).unwrap();

        manager.begin().unwrap();
        manager.handle(PlayerEvent::TextFullyShown).unwrap();
        manager.handle(PlayerEvent::SelectOption(0)).unwrap();
        manager.handle(PlayerEvent::TextFullyShown).unwrap();
        manager.handle(PlayerEvent::SelectOption(0)).unwrap();
        assert!(!manager.is_active());
    }

    #[test]
    fn cancel_mid_reveal_tears_down_cleanly() {
        let enabled = Rc::new(Cell::new(0));
        let disabled = Rc::new(Cell::new(0));
        let mut manager = DialogueManager::new(monologue_set())
            .unwrap()
            .with_controls(Box::new(CountingHook {
                disabled: disabled.clone(),
                enabled: enabled.clone(),
            }));

        manager.begin().unwrap();
        // Text still revealing; escape arrives anyway.
        manager.handle(PlayerEvent::Cancel).unwrap();

        assert!(!manager.is_active());
        assert_eq!(manager.phase(), Phase::Idle);
        assert_eq!(enabled.get(), 1);

        // And the manager restarts cleanly afterwards.
        manager.begin().unwrap();
        assert!(manager.is_active());
    }

    #[test]
    fn completed_flag_flips_once_and_feeds_the_gate() {
        let mut set = monologue_set();
        set.trees.push(Tree {
            name: "annoyed".to_string(),
            nodes: vec![Node {
                id: NodeId(0),
                text: "You again?".to_string(),
                choices: vec![],
                end: true,
            }],
        });
        set.gate = Gate::new(
            vec![GateRule {
                when: Condition::CompletedBefore,
                tree: 1,
            }],
            0,
        );

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = DialogueManager::new(set).unwrap();
        manager.subscribe(Box::new(RecordingSink(log.clone())));

        assert!(!manager.completed_before());
        manager.begin().unwrap();
        manager.end();
        assert!(manager.completed_before());

        manager.begin().unwrap();
        let started_trees: Vec<String> = log
            .borrow()
            .iter()
            .filter_map(|n| match n {
                Notification::SessionStarted { tree, .. } => Some(tree.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(started_trees, vec!["mutter".to_string(), "annoyed".to_string()]);
    }

    #[test]
    fn unsubscribed_sink_stops_receiving() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut manager = DialogueManager::new(monologue_set()).unwrap();
        let id = manager.subscribe(Box::new(RecordingSink(log.clone())));

        manager.begin().unwrap();
        assert!(manager.unsubscribe(id));
        assert!(!manager.unsubscribe(id));
        manager.end();

        // SessionEnded was emitted after removal.
        assert!(
            !log.borrow()
                .iter()
                .any(|n| matches!(n, Notification::SessionEnded))
        );
    }

    #[test]
    fn view_tracks_reveal_and_choice_state() {
        let mut manager = DialogueManager::new(monologue_set()).unwrap();
        assert!(manager.view().is_none());

        manager.begin().unwrap();
        let revealing = manager.view().unwrap();
        assert_eq!(revealing.text, "This house looks abandoned.");
        assert!(revealing.options.is_empty());
        assert!(revealing.can_advance_without_choice);
        assert!(!revealing.awaiting_choice);

        manager.handle(PlayerEvent::TextFullyShown).unwrap();
        let awaiting = manager.view().unwrap();
        assert_eq!(awaiting.options, vec!["[CONTINUE]".to_string()]);
        assert!(awaiting.awaiting_choice);
        assert!(awaiting.can_advance_without_choice);
    }
}
