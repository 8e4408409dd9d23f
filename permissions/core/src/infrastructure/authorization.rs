// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::actor::Actor;
use crate::domain::authorization::{AuthorizationHandler, ResourceRef};
use crate::domain::component::Component;
use crate::domain::ids::UserId;
use crate::domain::permission_action::Action;

/// Authorization handler that passes everyone except explicitly blocked actions.
///
/// Stands in for identity-verification handlers in fixtures and tests. Blocks
/// apply to every resource of every component.
#[derive(Clone, Default)]
pub struct InMemoryAuthorizationHandler {
    blocked_actions: Arc<RwLock<HashSet<Action>>>,
    blocked_users: Arc<RwLock<HashSet<(UserId, Action)>>>,
}

impl InMemoryAuthorizationHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail `action` for every user.
    pub fn block_action(&self, action: Action) {
        self.blocked_actions.write().insert(action);
    }

    /// Fail `action` for `user` only.
    pub fn block_user_action(&self, user: UserId, action: Action) {
        self.blocked_users.write().insert((user, action));
    }

    pub fn unblock_user_action(&self, user: UserId, action: Action) {
        self.blocked_users.write().remove(&(user, action));
    }
}

impl AuthorizationHandler for InMemoryAuthorizationHandler {
    fn authorize(
        &self,
        user: &Actor,
        action: Action,
        _component: &Component,
        _resource: Option<ResourceRef>,
    ) -> bool {
        !self.blocked_actions.read().contains(&action)
            && !self.blocked_users.read().contains(&(user.id, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{ComponentId, ParticipatorySpaceId};

    #[test]
    fn test_blocks() {
        let handler = InMemoryAuthorizationHandler::new();
        let component = Component::new(ComponentId::new(), ParticipatorySpaceId::new());
        let alice = Actor::new(UserId::new(), "alice");
        let bob = Actor::new(UserId::new(), "bob");

        assert!(handler.authorize(&alice, Action::Vote, &component, None));

        handler.block_user_action(alice.id, Action::Vote);
        assert!(!handler.authorize(&alice, Action::Vote, &component, None));
        assert!(handler.authorize(&bob, Action::Vote, &component, None));

        handler.block_action(Action::Amend);
        assert!(!handler.authorize(&bob, Action::Amend, &component, None));

        handler.unblock_user_action(alice.id, Action::Vote);
        assert!(handler.authorize(&alice, Action::Vote, &component, None));
    }
}
