// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Scenarios
//!
//! A scenario is a YAML fixture that plays the host: it declares one opinions
//! component, its users, valuator roles, assignments, opinions, collaborative
//! drafts, votes and authorization blocks, plus a list of checks with the
//! expected outcome. Everything is loaded into the in-memory collaborators and
//! each check goes through the [`PermissionEnforcer`].
//!
//! Records refer to each other by name; identifiers are derived from names with
//! the `from_name` constructors so that runs are reproducible.
//!
//! ```yaml
//! component:
//!   space: city-budget
//!   settings: { vote_limit: 2 }
//!   step_settings: { votes_enabled: true }
//! users:
//!   - name: alice
//! opinions:
//!   - name: bike-lanes
//!     authors: [alice]
//! votes:
//!   - { opinion: bike-lanes, author: alice }
//! checks:
//!   - user: alice
//!     scope: public
//!     subject: opinion
//!     action: vote
//!     opinion: bike-lanes
//!     expect: allow
//! ```

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::audit::DecisionAuditLogger;
use super::authorization::InMemoryAuthorizationHandler;
use super::enforcement::PermissionEnforcer;
use super::repositories::{
    InMemoryRoleRegistry, InMemoryValuationAssignmentRepository, InMemoryVoteRepository,
};
use crate::application::services::PermissionServices;
use crate::application::vote_quota::VoteQuota;
use crate::domain::actor::Actor;
use crate::domain::collaborative_draft::{CollaborativeDraft, CollaborativeDraftState};
use crate::domain::component::Component;
use crate::domain::context::PermissionContext;
use crate::domain::engine_config::EngineConfigManifest;
use crate::domain::ids::{
    CollaborativeDraftId, ComponentId, OpinionId, ParticipatorySpaceId, UserId, ValuatorRoleId,
};
use crate::domain::opinion::{Opinion, OpinionState};
use crate::domain::permission_action::Action;
use crate::domain::role::ValuatorRole;
use crate::domain::settings::{ComponentSettings, StepSettings};
use crate::domain::vote::Vote;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("Unknown user: {0}")]
    UnknownUser(String),
    #[error("Unknown opinion: {0}")]
    UnknownOpinion(String),
    #[error("Unknown collaborative draft: {0}")]
    UnknownDraft(String),
    #[error("Unknown valuator role: {0}")]
    UnknownValuatorRole(String),
    #[error("Unknown authorization action: {0}")]
    UnknownAction(String),
}

// ============================================================================
// Document
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioDocument {
    #[serde(default)]
    pub name: Option<String>,
    /// Evaluation instant for every check. Defaults to the load time.
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
    #[serde(default)]
    pub component: ComponentDocument,
    #[serde(default)]
    pub users: Vec<UserDocument>,
    #[serde(default)]
    pub valuators: Vec<ValuatorDocument>,
    #[serde(default)]
    pub assignments: Vec<AssignmentDocument>,
    #[serde(default)]
    pub opinions: Vec<OpinionDocument>,
    #[serde(default)]
    pub drafts: Vec<DraftDocument>,
    #[serde(default)]
    pub votes: Vec<VoteDocument>,
    #[serde(default)]
    pub authorization: AuthorizationDocument,
    #[serde(default)]
    pub checks: Vec<CheckDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDocument {
    #[serde(default = "default_component_name")]
    pub name: String,
    #[serde(default = "default_space_name")]
    pub space: String,
    /// Falls back to `spec.defaults.component_settings` of the engine config.
    #[serde(default)]
    pub settings: Option<ComponentSettings>,
    /// Falls back to `spec.defaults.step_settings` of the engine config.
    #[serde(default)]
    pub step_settings: Option<StepSettings>,
}

impl Default for ComponentDocument {
    fn default() -> Self {
        Self {
            name: default_component_name(),
            space: default_space_name(),
            settings: None,
            step_settings: None,
        }
    }
}

fn default_component_name() -> String {
    "opinions".to_string()
}

fn default_space_name() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    pub name: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuatorDocument {
    pub role: String,
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentDocument {
    pub opinion: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpinionDocument {
    pub name: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub official: bool,
    #[serde(default)]
    pub official_meeting: bool,
    #[serde(default)]
    pub state: OpinionState,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub copied_from_other_component: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftDocument {
    pub name: String,
    /// First entry is the creator.
    pub coauthors: Vec<String>,
    #[serde(default)]
    pub requesters: Vec<String>,
    #[serde(default)]
    pub state: CollaborativeDraftState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteDocument {
    pub opinion: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorizationDocument {
    /// Actions failing external authorization for everyone.
    #[serde(default)]
    pub blocked_actions: Vec<String>,
    #[serde(default)]
    pub blocked: Vec<BlockedDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedDocument {
    pub user: String,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    Allow,
    Deny,
}

impl Expectation {
    pub fn matches(&self, allowed: bool) -> bool {
        match self {
            Self::Allow => allowed,
            Self::Deny => !allowed,
        }
    }
}

/// One request to evaluate. Names are kept as text so that unknown names
/// exercise the fail-closed path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckDocument {
    /// Anonymous when absent.
    #[serde(default)]
    pub user: Option<String>,
    pub scope: String,
    pub subject: String,
    pub action: String,
    #[serde(default)]
    pub opinion: Option<String>,
    #[serde(default)]
    pub draft: Option<String>,
    #[serde(default)]
    pub valuator: Option<String>,
    #[serde(default)]
    pub valuator_role: Option<String>,
    #[serde(default)]
    pub expect: Option<Expectation>,
}

impl CheckDocument {
    pub fn describe(&self) -> String {
        format!(
            "{} {}:{}:{}",
            self.user.as_deref().unwrap_or("anonymous"),
            self.scope,
            self.subject,
            self.action
        )
    }
}

// ============================================================================
// Loaded scenario
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub description: String,
    pub allowed: bool,
    pub expected: Option<Expectation>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.expected.is_none_or(|expected| expected.matches(self.allowed))
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScenarioReport {
    pub outcomes: Vec<CheckOutcome>,
}

impl ScenarioReport {
    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.passed())
    }

    pub fn all_passed(&self) -> bool {
        self.failures().next().is_none()
    }
}

pub struct Scenario {
    pub name: String,
    pub now: DateTime<Utc>,
    pub component: Component,
    users: HashMap<String, Actor>,
    opinions: HashMap<String, Opinion>,
    drafts: HashMap<String, CollaborativeDraft>,
    roles: InMemoryRoleRegistry,
    enforcer: PermissionEnforcer,
    checks: Vec<CheckDocument>,
}

impl Scenario {
    pub fn from_yaml_file(
        path: impl AsRef<Path>,
        config: &EngineConfigManifest,
    ) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {:?}", path))?;
        Self::from_yaml_str(&content, config)
            .with_context(|| format!("Failed to load scenario {:?}", path))
    }

    pub fn from_yaml_str(yaml: &str, config: &EngineConfigManifest) -> anyhow::Result<Self> {
        let document: ScenarioDocument =
            serde_yaml::from_str(yaml).context("Invalid scenario YAML")?;
        Ok(Self::from_document(document, config)?)
    }

    pub fn from_document(
        document: ScenarioDocument,
        config: &EngineConfigManifest,
    ) -> Result<Self, ScenarioError> {
        let defaults = &config.spec.defaults;
        let component = Component {
            id: ComponentId::from_name(&document.component.name),
            participatory_space: ParticipatorySpaceId::from_name(&document.component.space),
            settings: document
                .component
                .settings
                .clone()
                .unwrap_or_else(|| defaults.component_settings.clone()),
            step_settings: document
                .component
                .step_settings
                .clone()
                .unwrap_or_else(|| defaults.step_settings.clone()),
        };

        let users: HashMap<String, Actor> = document
            .users
            .iter()
            .map(|user| {
                let actor = Actor {
                    id: UserId::from_name(&user.name),
                    nickname: user.name.clone(),
                    admin: user.admin,
                };
                (user.name.clone(), actor)
            })
            .collect();
        let user_id = |name: &str| {
            users
                .get(name)
                .map(|actor| actor.id)
                .ok_or_else(|| ScenarioError::UnknownUser(name.to_string()))
        };

        let roles = InMemoryRoleRegistry::new();
        let mut role_ids = HashMap::new();
        for valuator in &document.valuators {
            let role = ValuatorRole {
                id: ValuatorRoleId::from_name(&valuator.role),
                user: user_id(&valuator.user)?,
                participatory_space: component.participatory_space,
            };
            role_ids.insert(valuator.role.clone(), role.id);
            roles.save(role);
        }

        let mut opinions = HashMap::new();
        for doc in &document.opinions {
            let authors = doc
                .authors
                .iter()
                .map(|name| user_id(name))
                .collect::<Result<Vec<_>, _>>()?;
            let opinion = Opinion {
                id: OpinionId::from_name(&doc.name),
                component: component.id,
                authors,
                official: doc.official,
                official_meeting: doc.official_meeting,
                state: doc.state,
                published_at: doc.published_at,
                copied_from_other_component: doc.copied_from_other_component,
            };
            opinions.insert(doc.name.clone(), opinion);
        }
        let opinion_id = |name: &str| {
            opinions
                .get(name)
                .map(|opinion: &Opinion| opinion.id)
                .ok_or_else(|| ScenarioError::UnknownOpinion(name.to_string()))
        };

        let assignments = InMemoryValuationAssignmentRepository::new();
        for assignment in &document.assignments {
            let role = role_ids
                .get(&assignment.role)
                .copied()
                .ok_or_else(|| ScenarioError::UnknownValuatorRole(assignment.role.clone()))?;
            assignments.assign(opinion_id(&assignment.opinion)?, role);
        }

        let mut drafts = HashMap::new();
        for doc in &document.drafts {
            let draft = CollaborativeDraft {
                id: CollaborativeDraftId::from_name(&doc.name),
                component: component.id,
                state: doc.state,
                coauthors: doc
                    .coauthors
                    .iter()
                    .map(|name| user_id(name))
                    .collect::<Result<Vec<_>, _>>()?,
                requesters: doc
                    .requesters
                    .iter()
                    .map(|name| user_id(name))
                    .collect::<Result<Vec<_>, _>>()?,
            };
            drafts.insert(doc.name.clone(), draft);
        }

        let now = document.now.unwrap_or_else(Utc::now);
        let votes = InMemoryVoteRepository::new();
        for vote in &document.votes {
            let recorded = votes.cast(Vote {
                opinion: opinion_id(&vote.opinion)?,
                component: component.id,
                author: user_id(&vote.author)?,
                created_at: now,
            });
            if !recorded {
                debug!("Ignoring duplicate vote of {} on {}", vote.author, vote.opinion);
            }
        }

        let authorization = InMemoryAuthorizationHandler::new();
        for name in &document.authorization.blocked_actions {
            authorization.block_action(parse_action(name)?);
        }
        for blocked in &document.authorization.blocked {
            authorization
                .block_user_action(user_id(&blocked.user)?, parse_action(&blocked.action)?);
        }

        let services = PermissionServices::new(
            Arc::new(authorization),
            Arc::new(roles.clone()),
            Arc::new(assignments),
            Arc::new(votes),
        );
        let audit = if config.spec.audit.log_denials {
            DecisionAuditLogger::new()
        } else {
            DecisionAuditLogger::disabled()
        };
        let enforcer = PermissionEnforcer::new(services).with_audit(audit);

        let name = document.name.unwrap_or_else(|| "unnamed".to_string());
        info!(
            "Loaded scenario '{}': {} users, {} opinions, {} drafts, {} checks",
            name,
            users.len(),
            opinions.len(),
            drafts.len(),
            document.checks.len()
        );

        Ok(Self {
            name,
            now,
            component,
            users,
            opinions,
            drafts,
            roles,
            enforcer,
            checks: document.checks,
        })
    }

    pub fn enforcer(&self) -> &PermissionEnforcer {
        &self.enforcer
    }

    pub fn user(&self, name: &str) -> Result<&Actor, ScenarioError> {
        self.users
            .get(name)
            .ok_or_else(|| ScenarioError::UnknownUser(name.to_string()))
    }

    pub fn opinion(&self, name: &str) -> Result<&Opinion, ScenarioError> {
        self.opinions
            .get(name)
            .ok_or_else(|| ScenarioError::UnknownOpinion(name.to_string()))
    }

    pub fn draft(&self, name: &str) -> Result<&CollaborativeDraft, ScenarioError> {
        self.drafts
            .get(name)
            .ok_or_else(|| ScenarioError::UnknownDraft(name.to_string()))
    }

    /// Build the context a check refers to.
    pub fn context_for(
        &self,
        check: &CheckDocument,
    ) -> Result<PermissionContext<'_>, ScenarioError> {
        let mut context = PermissionContext::new(&self.component).at(self.now);
        if let Some(name) = &check.opinion {
            context = context.with_opinion(self.opinion(name)?);
        }
        if let Some(name) = &check.draft {
            context = context.with_collaborative_draft(self.draft(name)?);
        }
        if let Some(name) = &check.valuator {
            context = context.with_valuator(self.user(name)?.id);
        }
        if let Some(name) = &check.valuator_role {
            context = context.with_valuator_role(ValuatorRoleId::from_name(name), &self.roles);
        }
        Ok(context)
    }

    pub fn check(&self, check: &CheckDocument) -> Result<bool, ScenarioError> {
        let user = check.user.as_deref().map(|name| self.user(name)).transpose()?;
        let context = self.context_for(check)?;
        Ok(self
            .enforcer
            .is_allowed_raw(user, &check.scope, &check.action, &check.subject, context))
    }

    pub fn vote_quota(&self, user: &str) -> Result<VoteQuota, ScenarioError> {
        let actor = self.user(user)?;
        Ok(self
            .enforcer
            .vote_quota(actor, PermissionContext::new(&self.component).at(self.now)))
    }

    /// Evaluate every declared check.
    pub fn run(&self) -> Result<ScenarioReport, ScenarioError> {
        let outcomes = self
            .checks
            .iter()
            .map(|check| {
                Ok(CheckOutcome {
                    description: check.describe(),
                    allowed: self.check(check)?,
                    expected: check.expect,
                })
            })
            .collect::<Result<Vec<_>, ScenarioError>>()?;
        Ok(ScenarioReport { outcomes })
    }
}

fn parse_action(name: &str) -> Result<Action, ScenarioError> {
    name.parse()
        .map_err(|_| ScenarioError::UnknownAction(name.to_string()))
}
