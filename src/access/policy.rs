//! Authorization predicates.
//!
//! Pure functions, no state: each takes the actor and the resource and
//! answers allow or deny. Deactivated actors never reach these checks;
//! authentication rejects them first.

use super::Actor;
use crate::task::domain::Task;
use crate::user::domain::UserId;

/// Whether the actor may read a task and its history.
///
/// Admins may read every task; others only tasks they created or are
/// assigned to.
#[must_use]
pub fn can_access_task(actor: &Actor, task: &Task) -> bool {
    actor.is_admin() || task.involves(actor.id())
}

/// Whether the actor may change a task's status.
///
/// Admins and the assignee qualify; being the creator alone does not.
#[must_use]
pub fn can_update_status(actor: &Actor, task: &Task) -> bool {
    actor.is_admin() || task.assignee_id() == actor.id()
}

/// Whether the actor may touch a resource owned by `owner_id`.
#[must_use]
pub fn is_owner_or_admin(actor: &Actor, owner_id: UserId) -> bool {
    actor.is_admin() || actor.id() == owner_id
}
