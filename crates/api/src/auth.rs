// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use std::str::FromStr;
use vast_audit::Actor;

use crate::error::AuthError;

/// Operator roles for authorization.
///
/// Roles apply only to the operator driving the request, never to the users
/// in the promoter hierarchy whose targets are being managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorRole {
    /// Admin role: may read, validate, copy and save targets.
    Admin,
    /// Manager role: read-only access to lists, rollups and validation.
    Manager,
}

impl OperatorRole {
    /// Returns the role name as recorded in audit events.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
        }
    }
}

impl FromStr for OperatorRole {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown operator role: '{s}'"),
            }),
        }
    }
}

/// An authenticated operator with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this operator.
    pub id: String,
    /// The role assigned to this operator.
    pub role: OperatorRole,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(id: String, role: OperatorRole) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), String::from(self.role.as_str()))
    }
}

/// Authorization checks for target operations.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            OperatorRole::Admin => Ok(()),
            OperatorRole::Manager => Err(AuthError::Unauthorized {
                action: String::from(action),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor may save targets. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_save_targets(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "save_targets")
    }

    /// Checks if an actor may copy the previous period's targets. Admin only.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_copy_previous(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "copy_previous_targets")
    }

    /// Checks if an actor may read lists, rollups and the audit timeline.
    ///
    /// Every authenticated operator role may read.
    ///
    /// # Errors
    ///
    /// Currently never fails for an authenticated actor.
    pub const fn authorize_read(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            OperatorRole::Admin | OperatorRole::Manager => Ok(()),
        }
    }
}

/// Stub authentication.
///
/// Real authentication is out of scope. The caller supplies the operator's
/// identity and role, and this only checks that both are well-formed.
///
/// # Arguments
///
/// * `actor_id` - The identifier of the operator
/// * `role` - The role name, `admin` or `manager`
///
/// # Errors
///
/// Returns an error if the id is empty or the role is unknown.
pub fn authenticate_stub(actor_id: &str, role: &str) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.trim().is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    let role: OperatorRole = role.parse()?;
    Ok(AuthenticatedActor::new(String::from(actor_id.trim()), role))
}
