// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Permission Enforcement Point
//!
//! The single place where the tri-state decision becomes a yes/no answer.
//!
//! ```text
//! caller
//!   └─ PermissionEnforcer::is_allowed(user, action, context)
//!         └─ PublicPermissions::permissions()     ← may delegate to AdminPermissions
//!         └─ Decision::into_verdict()             ← Undetermined → false
//!         └─ DecisionAuditLogger::log_denial()    ← on false
//! ```
//!
//! Every check increments `civic_permissions_decisions_total` labelled by scope,
//! subject, action and outcome. No exporter is installed here; the host decides
//! whether to collect it.

use thiserror::Error;
use tracing::{debug, info};

use super::audit::DecisionAuditLogger;
use crate::application::public_permissions::PublicPermissions;
use crate::application::services::PermissionServices;
use crate::application::vote_quota::{VoteQuota, VoteQuotaCalculator};
use crate::domain::actor::Actor;
use crate::domain::context::PermissionContext;
use crate::domain::decision::Decision;
use crate::domain::permission_action::PermissionAction;

pub const DECISIONS_METRIC: &str = "civic_permissions_decisions_total";

/// Returned by [`PermissionEnforcer::enforce`] when a request is not allowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Not authorized: {permission_action} resolved to {decision}")]
pub struct PermissionDenied {
    pub permission_action: PermissionAction,
    pub decision: Decision,
}

#[derive(Clone)]
pub struct PermissionEnforcer {
    services: PermissionServices,
    audit: DecisionAuditLogger,
}

impl PermissionEnforcer {
    pub fn new(services: PermissionServices) -> Self {
        Self {
            services,
            audit: DecisionAuditLogger::new(),
        }
    }

    pub fn with_audit(mut self, audit: DecisionAuditLogger) -> Self {
        self.audit = audit;
        self
    }

    /// Raw tri-state decision, without fail-closed conversion or audit.
    pub fn evaluate(
        &self,
        user: Option<&Actor>,
        permission_action: PermissionAction,
        context: PermissionContext<'_>,
    ) -> Decision {
        PublicPermissions::new(user, permission_action, context, &self.services).permissions()
    }

    pub fn is_allowed(
        &self,
        user: Option<&Actor>,
        permission_action: PermissionAction,
        context: PermissionContext<'_>,
    ) -> bool {
        self.check(user, permission_action, context).into_verdict()
    }

    /// Like [`Self::is_allowed`], as a `Result` for `?` propagation.
    pub fn enforce(
        &self,
        user: Option<&Actor>,
        permission_action: PermissionAction,
        context: PermissionContext<'_>,
    ) -> Result<(), PermissionDenied> {
        let decision = self.check(user, permission_action, context);
        if decision.into_verdict() {
            Ok(())
        } else {
            Err(PermissionDenied {
                permission_action,
                decision,
            })
        }
    }

    /// Check a request given by name. Unknown names are denied.
    pub fn is_allowed_raw(
        &self,
        user: Option<&Actor>,
        scope: &str,
        action: &str,
        subject: &str,
        context: PermissionContext<'_>,
    ) -> bool {
        match PermissionAction::parse(scope, action, subject) {
            Ok(permission_action) => self.is_allowed(user, permission_action, context),
            Err(e) => {
                debug!("Unrecognized permission request {}:{}:{}: {}", scope, subject, action, e);
                self.audit
                    .log_unrecognized(user.map(|u| u.id), scope, action, subject, &e.to_string());
                false
            }
        }
    }

    fn check(
        &self,
        user: Option<&Actor>,
        permission_action: PermissionAction,
        context: PermissionContext<'_>,
    ) -> Decision {
        let decision = self.evaluate(user, permission_action, context);
        let allowed = decision.into_verdict();

        metrics::counter!(
            DECISIONS_METRIC,
            "scope" => permission_action.scope.as_str(),
            "subject" => permission_action.subject.as_str(),
            "action" => permission_action.action.as_str(),
            "outcome" => if allowed { "allow" } else { "deny" }
        )
        .increment(1);

        if allowed {
            info!(
                "Permission granted: {} for user {}",
                permission_action,
                user.map(|u| u.id.to_string()).unwrap_or_else(|| "anonymous".to_string())
            );
        } else {
            self.audit.log_denial(user.map(|u| u.id), &permission_action, decision);
        }
        decision
    }

    /// Current vote quota of `user` in the context's component.
    pub fn vote_quota(&self, user: &Actor, context: PermissionContext<'_>) -> VoteQuota {
        VoteQuotaCalculator::new(self.services.votes.as_ref())
            .quota(user.id, context.current_component)
    }
}
