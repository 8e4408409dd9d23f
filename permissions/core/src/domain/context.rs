// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Permission Context
//!
//! Typed, read-only inputs of one authorization check. Every field is optional
//! and every accessor is total: a missing component yields all-disabled
//! settings, a missing resource makes the predicates that need it false.

use chrono::{DateTime, Utc};
use std::sync::LazyLock;

use super::collaborative_draft::CollaborativeDraft;
use super::component::Component;
use super::ids::{UserId, ValuatorRoleId};
use super::opinion::Opinion;
use super::role::RoleRegistry;
use super::settings::{ComponentSettings, StepSettings};

static DISABLED_STEP_SETTINGS: LazyLock<StepSettings> = LazyLock::new(StepSettings::default);
static DISABLED_COMPONENT_SETTINGS: LazyLock<ComponentSettings> =
    LazyLock::new(ComponentSettings::default);

#[derive(Debug, Clone, Copy)]
pub struct PermissionContext<'a> {
    pub current_component: Option<&'a Component>,
    pub opinion: Option<&'a Opinion>,
    pub collaborative_draft: Option<&'a CollaborativeDraft>,
    /// The valuator a bulk unassignment targets.
    pub valuator: Option<UserId>,
    /// Evaluation instant, used by time-window predicates.
    pub now: DateTime<Utc>,
}

impl<'a> PermissionContext<'a> {
    pub fn new(component: &'a Component) -> Self {
        Self {
            current_component: Some(component),
            ..Self::empty()
        }
    }

    /// A context with nothing in it. Every predicate that needs data fails.
    pub fn empty() -> Self {
        Self {
            current_component: None,
            opinion: None,
            collaborative_draft: None,
            valuator: None,
            now: Utc::now(),
        }
    }

    pub fn with_opinion(mut self, opinion: &'a Opinion) -> Self {
        self.opinion = Some(opinion);
        self
    }

    pub fn with_collaborative_draft(mut self, draft: &'a CollaborativeDraft) -> Self {
        self.collaborative_draft = Some(draft);
        self
    }

    pub fn with_valuator(mut self, user: UserId) -> Self {
        self.valuator = Some(user);
        self
    }

    /// Resolve the valuator from a role id scoped to the component's space.
    ///
    /// An unknown role, or a role from another space, leaves the valuator unset.
    pub fn with_valuator_role(mut self, role: ValuatorRoleId, registry: &dyn RoleRegistry) -> Self {
        self.valuator = self
            .current_component
            .and_then(|component| registry.find_valuator_role(component.participatory_space, role))
            .map(|role| role.user);
        self
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn current_settings(&self) -> &StepSettings {
        self.current_component
            .map(|component| &component.step_settings)
            .unwrap_or(&*DISABLED_STEP_SETTINGS)
    }

    pub fn component_settings(&self) -> &ComponentSettings {
        self.current_component
            .map(|component| &component.settings)
            .unwrap_or(&*DISABLED_COMPONENT_SETTINGS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{ComponentId, ParticipatorySpaceId};
    use crate::domain::role::ValuatorRole;

    struct SingleRole(ValuatorRole);

    impl RoleRegistry for SingleRole {
        fn valuator_role_for(
            &self,
            space: ParticipatorySpaceId,
            user: UserId,
        ) -> Option<ValuatorRole> {
            (self.0.participatory_space == space && self.0.user == user).then(|| self.0.clone())
        }

        fn find_valuator_role(
            &self,
            space: ParticipatorySpaceId,
            id: ValuatorRoleId,
        ) -> Option<ValuatorRole> {
            (self.0.participatory_space == space && self.0.id == id).then(|| self.0.clone())
        }
    }

    #[test]
    fn test_empty_context_has_disabled_settings() {
        let context = PermissionContext::empty();
        assert!(!context.current_settings().creation_enabled);
        assert!(!context.component_settings().collaborative_drafts_enabled);
        assert!(context.opinion.is_none());
    }

    #[test]
    fn test_valuator_role_resolves_within_space_only() {
        let space = ParticipatorySpaceId::new();
        let role = ValuatorRole {
            id: ValuatorRoleId::new(),
            user: UserId::new(),
            participatory_space: space,
        };
        let registry = SingleRole(role.clone());

        let component = Component::new(ComponentId::new(), space);
        let context = PermissionContext::new(&component).with_valuator_role(role.id, &registry);
        assert_eq!(context.valuator, Some(role.user));

        let foreign = Component::new(ComponentId::new(), ParticipatorySpaceId::new());
        let context = PermissionContext::new(&foreign).with_valuator_role(role.id, &registry);
        assert_eq!(context.valuator, None);
    }
}
