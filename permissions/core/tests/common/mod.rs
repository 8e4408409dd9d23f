// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Shared host fixture: one opinions component backed by in-memory stores.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use civic_permissions_core::application::PermissionServices;
use civic_permissions_core::domain::actor::Actor;
use civic_permissions_core::domain::component::Component;
use civic_permissions_core::domain::context::PermissionContext;
use civic_permissions_core::domain::ids::{
    ComponentId, OpinionId, ParticipatorySpaceId, UserId, ValuatorRoleId,
};
use civic_permissions_core::domain::opinion::Opinion;
use civic_permissions_core::domain::permission_action::{Action, PermissionAction, Subject};
use civic_permissions_core::domain::role::ValuatorRole;
use civic_permissions_core::domain::vote::Vote;
use civic_permissions_core::infrastructure::{
    InMemoryAuthorizationHandler, InMemoryRoleRegistry, InMemoryValuationAssignmentRepository,
    InMemoryVoteRepository, PermissionEnforcer,
};
use std::sync::Arc;

pub struct Host {
    pub component: Component,
    pub authorization: InMemoryAuthorizationHandler,
    pub roles: InMemoryRoleRegistry,
    pub assignments: InMemoryValuationAssignmentRepository,
    pub votes: InMemoryVoteRepository,
    pub enforcer: PermissionEnforcer,
    pub now: DateTime<Utc>,
}

impl Host {
    pub fn new() -> Self {
        let component = Component::new(
            ComponentId::from_name("opinions"),
            ParticipatorySpaceId::from_name("city-budget"),
        );
        let authorization = InMemoryAuthorizationHandler::new();
        let roles = InMemoryRoleRegistry::new();
        let assignments = InMemoryValuationAssignmentRepository::new();
        let votes = InMemoryVoteRepository::new();
        let services = PermissionServices::new(
            Arc::new(authorization.clone()),
            Arc::new(roles.clone()),
            Arc::new(assignments.clone()),
            Arc::new(votes.clone()),
        );
        Self {
            component,
            authorization,
            roles,
            assignments,
            votes,
            enforcer: PermissionEnforcer::new(services),
            now: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    pub fn context(&self) -> PermissionContext<'_> {
        PermissionContext::new(&self.component).at(self.now)
    }

    pub fn allowed(
        &self,
        user: &Actor,
        action: PermissionAction,
        context: PermissionContext<'_>,
    ) -> bool {
        self.enforcer.is_allowed(Some(user), action, context)
    }

    pub fn opinion(&self, name: &str, authors: &[&Actor]) -> Opinion {
        let mut opinion = Opinion::new(
            OpinionId::from_name(name),
            self.component.id,
            authors.iter().map(|actor| actor.id).collect(),
        );
        opinion.published_at = Some(self.now - Duration::minutes(1));
        opinion
    }

    pub fn vote(&self, user: &Actor, opinion: &Opinion) -> bool {
        self.votes.cast(Vote {
            opinion: opinion.id,
            component: self.component.id,
            author: user.id,
            created_at: self.now,
        })
    }

    /// Register `user` as a valuator of the component's space.
    pub fn make_valuator(&self, user: &Actor, role: &str) -> ValuatorRoleId {
        let role = ValuatorRole {
            id: ValuatorRoleId::from_name(role),
            user: user.id,
            participatory_space: self.component.participatory_space,
        };
        self.roles.save(role.clone());
        role.id
    }
}

pub fn participant(name: &str) -> Actor {
    Actor::new(UserId::from_name(name), name)
}

pub fn admin(name: &str) -> Actor {
    Actor::admin(UserId::from_name(name), name)
}

pub fn public(action: Action, subject: Subject) -> PermissionAction {
    PermissionAction::public(action, subject)
}

pub fn admin_action(action: Action, subject: Subject) -> PermissionAction {
    PermissionAction::admin(action, subject)
}
