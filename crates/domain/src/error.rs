// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::UserId;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Month is outside 1-12.
    InvalidMonth(u8),
    /// Year is outside the supported range.
    InvalidYear(i32),
    /// Role string is not recognized.
    InvalidRole(String),
    /// Tier string is not a target tier.
    InvalidTier(String),
    /// Target type string is not recognized.
    InvalidTargetType(String),
    /// User status string is not recognized.
    InvalidUserStatus(String),
    /// User identifier is empty.
    InvalidUserId(String),
    /// A proposed target value is negative.
    NegativeTarget {
        /// The user the target belongs to.
        user_id: UserId,
        /// The rejected value.
        value: i64,
    },
    /// A dual-role row in the sator view carries two different edits of the
    /// same stored figure.
    ConflictingAsSatorEdit {
        /// The dual-role SPV.
        user_id: UserId,
        /// The edited `new_target`.
        new_target: i64,
        /// The edited `new_target_as_sator`.
        new_target_as_sator: i64,
    },
    /// An instant could not be converted between time libraries.
    TimestampConversion {
        /// Description of the failure.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(month) => {
                write!(f, "Invalid month: {month}. Must be between 1 and 12")
            }
            Self::InvalidYear(year) => {
                write!(f, "Invalid year: {year}. Must be between 2000 and 2100")
            }
            Self::InvalidRole(role) => write!(f, "Invalid role: '{role}'"),
            Self::InvalidTier(tier) => {
                write!(
                    f,
                    "Invalid tier: '{tier}'. Must be 'spv', 'sator' or 'promotor'"
                )
            }
            Self::InvalidTargetType(value) => write!(f, "Invalid target type: '{value}'"),
            Self::InvalidUserStatus(value) => write!(f, "Invalid user status: '{value}'"),
            Self::InvalidUserId(msg) => write!(f, "Invalid user id: {msg}"),
            Self::NegativeTarget { user_id, value } => {
                write!(
                    f,
                    "Target for user '{}' must not be negative, got {value}",
                    user_id.as_str()
                )
            }
            Self::ConflictingAsSatorEdit {
                user_id,
                new_target,
                new_target_as_sator,
            } => {
                write!(
                    f,
                    "Sator target for user '{}' edited twice with different values: {new_target} and {new_target_as_sator}",
                    user_id.as_str()
                )
            }
            Self::TimestampConversion { reason } => {
                write!(f, "Timestamp conversion failed: {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
