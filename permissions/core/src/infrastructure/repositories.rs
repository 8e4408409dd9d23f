// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! In-Memory Collaborators
//!
//! Thread-safe, `HashMap`-backed implementations of the domain lookup traits,
//! used by fixtures, the CLI and tests. Hosts with a real database implement the
//! traits in [`crate::domain::role`] and [`crate::domain::vote`] directly.
//!
//! | Type | Trait |
//! |------|-------|
//! | `InMemoryRoleRegistry` | `RoleRegistry` |
//! | `InMemoryValuationAssignmentRepository` | `ValuationAssignmentRepository` |
//! | `InMemoryVoteRepository` | `VoteRepository` |

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::ids::{ComponentId, OpinionId, ParticipatorySpaceId, UserId, ValuatorRoleId};
use crate::domain::role::{
    RoleRegistry, ValuationAssignment, ValuationAssignmentRepository, ValuatorRole,
};
use crate::domain::vote::{Vote, VoteRepository};

#[derive(Clone, Default)]
pub struct InMemoryRoleRegistry {
    roles: Arc<RwLock<HashMap<ValuatorRoleId, ValuatorRole>>>,
}

impl InMemoryRoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a valuator role, replacing any role the same user already held in that space.
    pub fn save(&self, role: ValuatorRole) {
        let mut roles = self.roles.write();
        roles.retain(|_, existing| {
            existing.user != role.user || existing.participatory_space != role.participatory_space
        });
        roles.insert(role.id, role);
    }
}

impl RoleRegistry for InMemoryRoleRegistry {
    fn valuator_role_for(&self, space: ParticipatorySpaceId, user: UserId) -> Option<ValuatorRole> {
        self.roles
            .read()
            .values()
            .find(|role| role.participatory_space == space && role.user == user)
            .cloned()
    }

    fn find_valuator_role(
        &self,
        space: ParticipatorySpaceId,
        id: ValuatorRoleId,
    ) -> Option<ValuatorRole> {
        self.roles
            .read()
            .get(&id)
            .filter(|role| role.participatory_space == space)
            .cloned()
    }
}

#[derive(Clone, Default)]
pub struct InMemoryValuationAssignmentRepository {
    assignments: Arc<RwLock<HashSet<ValuationAssignment>>>,
}

impl InMemoryValuationAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&self, opinion: OpinionId, valuator_role: ValuatorRoleId) {
        self.assignments.write().insert(ValuationAssignment {
            opinion,
            valuator_role,
        });
    }

    pub fn unassign(&self, opinion: OpinionId, valuator_role: ValuatorRoleId) -> bool {
        self.assignments.write().remove(&ValuationAssignment {
            opinion,
            valuator_role,
        })
    }
}

impl ValuationAssignmentRepository for InMemoryValuationAssignmentRepository {
    fn is_assigned(&self, opinion: OpinionId, valuator_role: ValuatorRoleId) -> bool {
        self.assignments.read().contains(&ValuationAssignment {
            opinion,
            valuator_role,
        })
    }
}

#[derive(Clone, Default)]
pub struct InMemoryVoteRepository {
    votes: Arc<RwLock<Vec<Vote>>>,
}

impl InMemoryVoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a vote. Returns `false` if the author already supports that opinion.
    pub fn cast(&self, vote: Vote) -> bool {
        let mut votes = self.votes.write();
        if votes
            .iter()
            .any(|existing| existing.opinion == vote.opinion && existing.author == vote.author)
        {
            return false;
        }
        votes.push(vote);
        true
    }

    /// Remove a vote. Returns `false` if there was none.
    pub fn retract(&self, opinion: OpinionId, author: UserId) -> bool {
        let mut votes = self.votes.write();
        let before = votes.len();
        votes.retain(|vote| !(vote.opinion == opinion && vote.author == author));
        votes.len() != before
    }
}

impl VoteRepository for InMemoryVoteRepository {
    fn count_by_author_in_component(&self, author: UserId, component: ComponentId) -> usize {
        self.votes
            .read()
            .iter()
            .filter(|vote| vote.author == author && vote.component == component)
            .count()
    }

    fn count_for_opinion(&self, opinion: OpinionId) -> usize {
        self.votes
            .read()
            .iter()
            .filter(|vote| vote.opinion == opinion)
            .count()
    }
}
