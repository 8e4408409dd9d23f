// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! External capability check.
//!
//! Hosts gate some actions behind identity verification or other per-component
//! authorization handlers. The engine asks the question and treats the answer
//! as one more predicate.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::component::Component;
use super::ids::{CollaborativeDraftId, OpinionId};
use super::permission_action::Action;

/// The resource an authorization check is about, when there is one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum ResourceRef {
    Opinion(OpinionId),
    CollaborativeDraft(CollaborativeDraftId),
}

pub trait AuthorizationHandler: Send + Sync {
    /// Whether `user` passes the host's authorization handlers for `action`.
    fn authorize(
        &self,
        user: &Actor,
        action: Action,
        component: &Component,
        resource: Option<ResourceRef>,
    ) -> bool;
}
