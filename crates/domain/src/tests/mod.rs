// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{Period, Role, TargetType, TargetUser, UserId};

pub fn uid(value: &str) -> UserId {
    UserId::new(value).unwrap()
}

pub fn march_2025() -> Period {
    Period::new(3, 2025).unwrap()
}

/// A plain (non dual-role) row with an unedited target.
pub fn row(id: &str, name: &str, role: Role, atasan: Option<&str>, target: i64) -> TargetUser {
    TargetUser {
        user_id: uid(id),
        name: String::from(name),
        role,
        atasan_id: atasan.map(uid),
        area: None,
        target_type: TargetType::Primary,
        is_dual_role: false,
        current_target: target,
        new_target: target,
        current_target_as_sator: (role == Role::Spv).then_some(0),
        new_target_as_sator: (role == Role::Spv).then_some(0),
    }
}

/// The sator-tier row of a dual-role SPV.
pub fn dual_role_row(id: &str, name: &str, atasan: Option<&str>, target: i64) -> TargetUser {
    TargetUser {
        target_type: TargetType::AsSator,
        is_dual_role: true,
        current_target_as_sator: Some(target),
        new_target_as_sator: Some(target),
        ..row(id, name, Role::Spv, atasan, target)
    }
}
