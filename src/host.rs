//! Collaborator seams supplied by the embedding host
//!
//! All collaborators are optional and best-effort: dialogue state integrity
//! never depends on them being present or succeeding.

use crate::types::notify::Notification;

/// Read-only inventory lookup, used by gate conditions.
pub trait InventoryQuery {
    fn has_item(&self, name: &str) -> bool;
}

/// Player-control lock toggled around a session (movement, camera, cursor).
/// Side-effect only; the controller pairs the calls exactly once per
/// session.
pub trait ControlHook {
    fn disable_input(&self);
    fn enable_input(&self);
}

/// Observer of session notifications. Each subscriber sees notifications in
/// emission order.
pub trait NotificationSink {
    fn notify(&self, notification: &Notification);
}
