// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Valuator Roles
//!
//! A valuator is a back-office user whose admin capabilities in a participatory
//! space are narrowed to evaluating the opinions assigned to them.
//!
//! Roles and assignments are owned by the host. The engine queries them through
//! [`RoleRegistry`] and [`ValuationAssignmentRepository`]; implementations live
//! in [`crate::infrastructure::repositories`].

use serde::{Deserialize, Serialize};

use super::ids::{OpinionId, ParticipatorySpaceId, UserId, ValuatorRoleId};

/// `(user, valuator, participatory_space)`, unique per user and space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuatorRole {
    pub id: ValuatorRoleId,
    pub user: UserId,
    pub participatory_space: ParticipatorySpaceId,
}

/// Links one opinion to one valuator role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValuationAssignment {
    pub opinion: OpinionId,
    pub valuator_role: ValuatorRoleId,
}

/// Read access to space roles.
pub trait RoleRegistry: Send + Sync {
    /// The valuator role held by `user` in `space`, if any.
    fn valuator_role_for(&self, space: ParticipatorySpaceId, user: UserId) -> Option<ValuatorRole>;

    /// A valuator role record by id, only if it belongs to `space`.
    fn find_valuator_role(
        &self,
        space: ParticipatorySpaceId,
        id: ValuatorRoleId,
    ) -> Option<ValuatorRole>;
}

/// Existence checks over valuation assignments.
pub trait ValuationAssignmentRepository: Send + Sync {
    fn is_assigned(&self, opinion: OpinionId, valuator_role: ValuatorRoleId) -> bool;
}
