// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit vocabulary for the Scolaris school administration system.
//!
//! The audit trail answers "who changed what, and why" for every lifecycle
//! mutation. This crate defines the event shape only; where events are
//! stored and when they are appended is the callers' concern.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

/// Who initiated a state change.
///
/// Usually a staff member acting under a role, occasionally an automated
/// process; `actor_type` records which (e.g., "directive", "system").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The kind of actor, named after its role.
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The kind of actor, named after its role
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Why a state change was initiated.
///
/// Ties an event back to the request or decision that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// What triggered the change, in prose.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - What triggered the change
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// What was done, and to which kind of entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`InitSemester`", "`FinishSemester`").
    pub name: String,
    /// The kind of entity the action touched (e.g., "semester", "module").
    pub entity: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `entity` - The kind of entity the action touched
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, entity: String, details: Option<String>) -> Self {
        Self {
            name,
            entity,
            details,
        }
    }
}

/// A compact textual capture of the state around a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// The captured state, rendered as text.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - The captured state, rendered as text
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// One immutable entry in the audit trail.
///
/// Every successful lifecycle mutation produces exactly one event pairing
/// the actor, cause and action with before/after snapshots. Events scoped
/// to a semester carry its id; system-wide events carry `None`. Nothing
/// mutates an event after creation; the id is attached on a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The event ID assigned by the database, if persisted.
    pub event_id: Option<i64>,
    /// Who initiated this state change.
    pub actor: Actor,
    /// Why the change was initiated.
    pub cause: Cause,
    /// What was done.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// The semester this event is scoped to (`None` for global events).
    pub semester_id: Option<i64>,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - Who initiated the change
    /// * `cause` - Why the change was initiated
    /// * `action` - What was done
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `semester_id` - The semester scope (`None` for global events)
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        semester_id: Option<i64>,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            semester_id,
        }
    }

    /// Returns a copy of this event with the database-assigned ID attached.
    #[must_use]
    pub fn with_event_id(mut self, event_id: i64) -> Self {
        self.event_id = Some(event_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_event() -> AuditEvent {
        let actor: Actor = Actor::new(String::from("dir-1"), String::from("directive"));
        let cause: Cause = Cause::new(String::from("req-9"), String::from("Directive request"));
        let action: Action = Action::new(
            String::from("InitSemester"),
            String::from("semester"),
            Some(String::from("Initialized semester 2026/1")),
        );
        let before: StateSnapshot = StateSnapshot::new(String::from("status=Inactive"));
        let after: StateSnapshot = StateSnapshot::new(String::from("status=Active"));

        AuditEvent::new(actor, cause, action, before, after, Some(4))
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("dir-1"), String::from("directive"));

        assert_eq!(actor.id, "dir-1");
        assert_eq!(actor.actor_type, "directive");
    }

    #[test]
    fn test_cause_creation_requires_all_fields() {
        let cause: Cause = Cause::new(String::from("req-9"), String::from("Directive request"));

        assert_eq!(cause.id, "req-9");
        assert_eq!(cause.description, "Directive request");
    }

    #[test]
    fn test_action_carries_entity_kind() {
        let action: Action = Action::new(
            String::from("FinishSemester"),
            String::from("semester"),
            None,
        );

        assert_eq!(action.name, "FinishSemester");
        assert_eq!(action.entity, "semester");
        assert_eq!(action.details, None);
    }

    #[test]
    fn test_audit_event_starts_without_event_id() {
        let event: AuditEvent = test_event();

        assert_eq!(event.event_id, None);
        assert_eq!(event.semester_id, Some(4));
        assert_eq!(event.before.data, "status=Inactive");
        assert_eq!(event.after.data, "status=Active");
    }

    #[test]
    fn test_with_event_id_attaches_the_assigned_id() {
        let event: AuditEvent = test_event().with_event_id(17);

        assert_eq!(event.event_id, Some(17));
    }

    #[test]
    fn test_audit_event_equality() {
        assert_eq!(test_event(), test_event());
        assert_ne!(test_event(), test_event().with_event_id(1));
    }
}
