// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::sync::Arc;

use crate::domain::authorization::AuthorizationHandler;
use crate::domain::role::{RoleRegistry, ValuationAssignmentRepository};
use crate::domain::vote::VoteRepository;

/// Host collaborators queried during evaluation.
///
/// Shared and read-only; cloning only bumps reference counts.
#[derive(Clone)]
pub struct PermissionServices {
    pub authorization: Arc<dyn AuthorizationHandler>,
    pub roles: Arc<dyn RoleRegistry>,
    pub assignments: Arc<dyn ValuationAssignmentRepository>,
    pub votes: Arc<dyn VoteRepository>,
}

impl PermissionServices {
    pub fn new(
        authorization: Arc<dyn AuthorizationHandler>,
        roles: Arc<dyn RoleRegistry>,
        assignments: Arc<dyn ValuationAssignmentRepository>,
        votes: Arc<dyn VoteRepository>,
    ) -> Self {
        Self {
            authorization,
            roles,
            assignments,
            votes,
        }
    }
}
