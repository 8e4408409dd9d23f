// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Permission Request Descriptor
//!
//! A [`PermissionAction`] names *what* is being attempted: the scope (public
//! site or back-office), the kind of resource, and the verb. It is immutable;
//! the resolved [`Decision`] is returned alongside it rather than written into it.
//!
//! Textual names (`"collaborative_draft"`, `"react_to_request_access"`, ...) parse
//! through [`std::str::FromStr`]. Names outside the vocabulary are a
//! [`SymbolError`], which the enforcement point turns into a denial.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use super::decision::Decision;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    #[error("Unknown scope: {0}")]
    UnknownScope(String),
    #[error("Unknown subject: {0}")]
    UnknownSubject(String),
    #[error("Unknown action: {0}")]
    UnknownAction(String),
}

/// Top-level partition of an authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Public,
    Admin,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Scope {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "admin" => Ok(Self::Admin),
            other => Err(SymbolError::UnknownScope(other.to_string())),
        }
    }
}

/// Kind of resource targeted by a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Opinion,
    /// Bulk operations over many opinions of a component.
    Opinions,
    OpinionNote,
    OpinionAnswer,
    OpinionCategory,
    OpinionScope,
    CollaborativeDraft,
    ParticipatoryTexts,
}

impl Subject {
    pub const ALL: [Subject; 8] = [
        Self::Opinion,
        Self::Opinions,
        Self::OpinionNote,
        Self::OpinionAnswer,
        Self::OpinionCategory,
        Self::OpinionScope,
        Self::CollaborativeDraft,
        Self::ParticipatoryTexts,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opinion => "opinion",
            Self::Opinions => "opinions",
            Self::OpinionNote => "opinion_note",
            Self::OpinionAnswer => "opinion_answer",
            Self::OpinionCategory => "opinion_category",
            Self::OpinionScope => "opinion_scope",
            Self::CollaborativeDraft => "collaborative_draft",
            Self::ParticipatoryTexts => "participatory_texts",
        }
    }
}

impl FromStr for Subject {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|subject| subject.as_str() == s)
            .ok_or_else(|| SymbolError::UnknownSubject(s.to_string()))
    }
}

/// Verb of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Edit,
    Withdraw,
    Amend,
    Vote,
    Unvote,
    Report,
    Publish,
    RequestAccess,
    ReactToRequestAccess,
    Update,
    Import,
    Merge,
    Split,
    AssignToValuator,
    UnassignFromValuator,
    Export,
    PublishAnswers,
    Manage,
}

impl Action {
    pub const ALL: [Action; 19] = [
        Self::Create,
        Self::Edit,
        Self::Withdraw,
        Self::Amend,
        Self::Vote,
        Self::Unvote,
        Self::Report,
        Self::Publish,
        Self::RequestAccess,
        Self::ReactToRequestAccess,
        Self::Update,
        Self::Import,
        Self::Merge,
        Self::Split,
        Self::AssignToValuator,
        Self::UnassignFromValuator,
        Self::Export,
        Self::PublishAnswers,
        Self::Manage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Withdraw => "withdraw",
            Self::Amend => "amend",
            Self::Vote => "vote",
            Self::Unvote => "unvote",
            Self::Report => "report",
            Self::Publish => "publish",
            Self::RequestAccess => "request_access",
            Self::ReactToRequestAccess => "react_to_request_access",
            Self::Update => "update",
            Self::Import => "import",
            Self::Merge => "merge",
            Self::Split => "split",
            Self::AssignToValuator => "assign_to_valuator",
            Self::UnassignFromValuator => "unassign_from_valuator",
            Self::Export => "export",
            Self::PublishAnswers => "publish_answers",
            Self::Manage => "manage",
        }
    }
}

impl FromStr for Action {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| SymbolError::UnknownAction(s.to_string()))
    }
}

/// Immutable description of one authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionAction {
    pub scope: Scope,
    pub action: Action,
    pub subject: Subject,
}

impl PermissionAction {
    pub fn new(scope: Scope, action: Action, subject: Subject) -> Self {
        Self {
            scope,
            action,
            subject,
        }
    }

    pub fn public(action: Action, subject: Subject) -> Self {
        Self::new(Scope::Public, action, subject)
    }

    pub fn admin(action: Action, subject: Subject) -> Self {
        Self::new(Scope::Admin, action, subject)
    }

    /// Parse a request from its textual names.
    pub fn parse(scope: &str, action: &str, subject: &str) -> Result<Self, SymbolError> {
        Ok(Self::new(scope.parse()?, action.parse()?, subject.parse()?))
    }

    /// Unconditional grant if this request is exactly `(subject, action)`.
    pub fn allow_when(&self, subject: Subject, action: Action) -> Decision {
        Decision::allow_if(self.is(subject, action))
    }

    /// Toggle on `condition` if this request is exactly `(subject, action)`.
    pub fn toggle_when(
        &self,
        subject: Subject,
        action: Action,
        condition: impl FnOnce() -> bool,
    ) -> Decision {
        if self.is(subject, action) {
            Decision::toggle(condition())
        } else {
            Decision::undetermined()
        }
    }

    pub fn is(&self, subject: Subject, action: Action) -> bool {
        self.subject == subject && self.action == action
    }
}

impl std::fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.scope.as_str(), self.subject.as_str(), self.action.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        let action =
            PermissionAction::parse("admin", "unassign_from_valuator", "opinions").unwrap();
        assert_eq!(
            action,
            PermissionAction::admin(Action::UnassignFromValuator, Subject::Opinions)
        );
        assert_eq!(action.to_string(), "admin:opinions:unassign_from_valuator");
    }

    #[test]
    fn test_parse_unknown_names() {
        assert_eq!(
            PermissionAction::parse("system", "create", "opinion"),
            Err(SymbolError::UnknownScope("system".to_string()))
        );
        assert_eq!(
            PermissionAction::parse("public", "destroy", "opinion"),
            Err(SymbolError::UnknownAction("destroy".to_string()))
        );
        assert_eq!(
            PermissionAction::parse("public", "create", "meeting"),
            Err(SymbolError::UnknownSubject("meeting".to_string()))
        );
    }

    #[test]
    fn test_every_name_round_trips_through_as_str() {
        for subject in Subject::ALL {
            assert_eq!(subject.as_str().parse::<Subject>(), Ok(subject));
        }
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn test_rule_helpers_only_fire_on_matching_pair() {
        let action = PermissionAction::admin(Action::Export, Subject::Opinions);
        assert_eq!(action.allow_when(Subject::Opinions, Action::Export), Decision::Allow);
        assert_eq!(action.allow_when(Subject::Opinions, Action::Import), Decision::Undetermined);
        assert_eq!(action.toggle_when(Subject::Opinions, Action::Export, || false), Decision::Deny);
        assert_eq!(
            action.toggle_when(Subject::Opinion, Action::Export, || true),
            Decision::Undetermined
        );
    }
}
