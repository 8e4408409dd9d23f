// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// The authenticated user attempting an action.
///
/// Anonymous visitors are represented by the absence of an `Actor`; both
/// evaluators abstain for them and the enforcement point denies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub nickname: String,
    /// Platform-wide (organization) administrator.
    #[serde(default)]
    pub admin: bool,
}

impl Actor {
    pub fn new(id: UserId, nickname: impl Into<String>) -> Self {
        Self {
            id,
            nickname: nickname.into(),
            admin: false,
        }
    }

    pub fn admin(id: UserId, nickname: impl Into<String>) -> Self {
        Self {
            admin: true,
            ..Self::new(id, nickname)
        }
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }
}
