// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Decision Audit Logger
//!
//! Emits a structured `WARN` record for every request the enforcement point
//! denies, including the raw tri-state decision so that "no rule matched"
//! (undetermined) can be told apart from an explicit refusal.
//!
//! Records go to the tracing subscriber only; notification delivery is the
//! host's concern.

use tracing::warn;

use crate::domain::decision::Decision;
use crate::domain::ids::UserId;
use crate::domain::permission_action::PermissionAction;

/// Writes denied permission checks to the structured tracing log.
#[derive(Debug, Clone)]
pub struct DecisionAuditLogger {
    enabled: bool,
}

impl DecisionAuditLogger {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Record a denial at `WARN` level.
    pub fn log_denial(
        &self,
        user: Option<UserId>,
        permission_action: &PermissionAction,
        decision: Decision,
    ) {
        if !self.enabled {
            return;
        }
        let user = user.map(|id| id.to_string()).unwrap_or_else(|| "anonymous".to_string());
        warn!(
            user = %user,
            scope = permission_action.scope.as_str(),
            subject = permission_action.subject.as_str(),
            action = permission_action.action.as_str(),
            decision = decision.as_str(),
            "Permission denied"
        );
    }

    /// Record a request whose names could not be parsed.
    pub fn log_unrecognized(
        &self,
        user: Option<UserId>,
        scope: &str,
        action: &str,
        subject: &str,
        reason: &str,
    ) {
        if !self.enabled {
            return;
        }
        let user = user.map(|id| id.to_string()).unwrap_or_else(|| "anonymous".to_string());
        warn!(
            user = %user,
            scope,
            subject,
            action,
            reason,
            "Permission denied for unrecognized request"
        );
    }
}

impl Default for DecisionAuditLogger {
    fn default() -> Self {
        Self::new()
    }
}
