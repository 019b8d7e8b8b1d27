// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::period::Period;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// A position in the promoter hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Store-level promoter submitting financing applications.
    Promotor,
    /// Store coordinator supervising promotors.
    Sator,
    /// Area supervisor over sators.
    Spv,
    /// Regional manager.
    Manager,
    /// System administrator.
    Admin,
}

impl Role {
    /// Converts this role to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Promotor => "promotor",
            Self::Sator => "sator",
            Self::Spv => "spv",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "promotor" => Ok(Self::Promotor),
            "sator" => Ok(Self::Sator),
            "spv" => Ok(Self::Spv),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a user account is currently in service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
}

impl UserStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(DomainError::InvalidUserStatus(s.to_string())),
        }
    }
}

/// The tiers that carry targets.
///
/// Managers and admins set targets but never hold them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Spv,
    Sator,
    Promotor,
}

impl Tier {
    /// All target tiers, top of the hierarchy first.
    pub const ALL: [Self; 3] = [Self::Spv, Self::Sator, Self::Promotor];

    /// Returns the primary role whose users populate this tier.
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Spv => Role::Spv,
            Self::Sator => Role::Sator,
            Self::Promotor => Role::Promotor,
        }
    }

    /// Converts this tier to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.role().as_str()
    }
}

impl FromStr for Tier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spv" => Ok(Self::Spv),
            "sator" => Ok(Self::Sator),
            "promotor" => Ok(Self::Promotor),
            _ => Err(DomainError::InvalidTier(s.to_string())),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which figure a stored target row holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// The target for the user's own role.
    #[default]
    Primary,
    /// The target of an SPV acting as a Sator.
    AsSator,
}

impl TargetType {
    /// Converts this target type to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::AsSator => "as_sator",
        }
    }
}

impl FromStr for TargetType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Self::Primary),
            "as_sator" => Ok(Self::AsSator),
            _ => Err(DomainError::InvalidTargetType(s.to_string())),
        }
    }
}

/// Opaque user identifier assigned by the user store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or only whitespace.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidUserId(String::from(
                "User id cannot be empty",
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user of the system as stored by the user store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub status: UserStatus,
}

impl User {
    #[must_use]
    pub const fn new(id: UserId, name: String, role: Role, status: UserStatus) -> Self {
        Self {
            id,
            name,
            role,
            status,
        }
    }

    /// Returns whether the user is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// Maps a user to their direct supervisor.
///
/// A user has at most one edge. Supervisor chains are assumed acyclic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyEdge {
    /// The subordinate.
    pub user_id: UserId,
    /// The direct supervisor (`atasan`), if any.
    pub atasan_id: Option<UserId>,
    /// Optional area label.
    pub area: Option<String>,
    /// Optional store assignment.
    pub store_id: Option<i64>,
}

/// A stored target value.
///
/// Unique per (`user_id`, period, `target_type`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub user_id: UserId,
    pub period: Period,
    pub target_type: TargetType,
    pub value: i64,
}

/// A target row ready to be upserted, attributed to the admin who wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRecord {
    pub user_id: UserId,
    pub period: Period,
    pub target_type: TargetType,
    pub value: i64,
    /// The acting admin.
    pub updated_by: String,
    /// The write timestamp.
    pub updated_at: OffsetDateTime,
}

impl TargetRecord {
    /// Returns the stored target this record will produce.
    #[must_use]
    pub fn to_target(&self) -> Target {
        Target {
            user_id: self.user_id.clone(),
            period: self.period,
            target_type: self.target_type,
            value: self.value,
        }
    }
}

/// Per-user monthly financing application counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub user_id: UserId,
    pub period: Period,
    pub approved: i64,
    pub rejected: i64,
    pub pending: i64,
}

/// A user's target figures for one period, as shown in a tier view.
///
/// `current_*` values are what is stored; `new_*` values are what an admin
/// proposes to save. `target_type` names the stored figure `current_target`
/// refers to: `AsSator` only for a dual-role SPV viewed in the sator tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetUser {
    pub user_id: UserId,
    pub name: String,
    /// The user's primary role.
    pub role: Role,
    pub atasan_id: Option<UserId>,
    pub area: Option<String>,
    pub target_type: TargetType,
    /// Whether this is an SPV that also acts as a Sator.
    pub is_dual_role: bool,
    pub current_target: i64,
    pub new_target: i64,
    /// Present on every SPV row.
    pub current_target_as_sator: Option<i64>,
    /// Present on every SPV row.
    pub new_target_as_sator: Option<i64>,
}

impl TargetUser {
    /// Returns whether either figure on this row has been edited.
    #[must_use]
    pub fn is_edited(&self) -> bool {
        self.new_target != self.current_target
            || self.new_target_as_sator != self.current_target_as_sator
    }
}
