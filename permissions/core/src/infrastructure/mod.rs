// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure
//!
//! - [`repositories`]: in-memory role, assignment and vote stores
//! - [`authorization`]: configurable external authorization handler
//! - [`audit`]: structured audit records for denied requests
//! - [`enforcement`]: fail-closed enforcement point
//! - [`scenario`]: YAML fixtures that wire everything together

pub mod audit;
pub mod authorization;
pub mod enforcement;
pub mod repositories;
pub mod scenario;

pub use audit::DecisionAuditLogger;
pub use authorization::InMemoryAuthorizationHandler;
pub use enforcement::{PermissionDenied, PermissionEnforcer};
pub use repositories::{
    InMemoryRoleRegistry, InMemoryValuationAssignmentRepository, InMemoryVoteRepository,
};
pub use scenario::{Scenario, ScenarioError, ScenarioReport};
