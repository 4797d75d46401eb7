// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff identity and the boundary authorization policy.

use scolaris_audit::Actor;

use crate::error::AuthError;

/// The roles staff members act under.
///
/// A role decides which operations the boundary admits. Students never hold
/// roles; they are domain records, not operators of the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Directive role: administrative staff with lifecycle authority.
    ///
    /// Directives may perform:
    /// - creation and correction of semesters
    /// - semester initialization
    /// - the end-of-semester promotion and its interruption
    /// - review of repeating-student records
    Directive,
    /// Teacher role: teaching staff.
    ///
    /// Teachers work inside modules (grades, attendance, observations) but
    /// have no authority over the semester lifecycle.
    Teacher,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Directive => "directive",
            Self::Teacher => "teacher",
        }
    }
}

/// A staff member the boundary has authenticated, tagged with their role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The staff member's unique identifier.
    pub id: String,
    /// The role they act under.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The staff member's unique identifier
    /// * `role` - The role they act under
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Renders this staff member as the audit trail's actor, so every
    /// recorded event names who acted and under which role.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role.as_str().to_string())
    }
}

/// Stub authentication function.
///
/// Real identity lives in a sibling service; this boundary only refuses
/// obviously invalid input and tags the actor with the supplied role.
///
/// # Arguments
///
/// * `actor_id` - The identifier of the actor to authenticate
/// * `role` - The role to assign to the actor
///
/// # Returns
///
/// An authenticated actor if successful.
///
/// # Errors
///
/// Returns an error if authentication fails.
pub fn authenticate_stub(actor_id: String, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}

/// The single role-policy check at the boundary.
///
/// Lifecycle operations require the directive role; the core never inspects
/// roles itself.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Admits or refuses a lifecycle operation for the given actor.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The name of the attempted action (for the error message)
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not hold the directive role.
    pub fn authorize_lifecycle(
        actor: &AuthenticatedActor,
        action: &str,
    ) -> Result<(), AuthError> {
        match actor.role {
            Role::Directive => Ok(()),
            Role::Teacher => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: Role::Directive.as_str().to_string(),
            }),
        }
    }
}
