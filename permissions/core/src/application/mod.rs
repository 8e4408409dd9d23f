// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Permission Evaluators
//!
//! ```text
//! PublicPermissions::permissions()
//!   ├─ no actor                → Undetermined
//!   ├─ scope == admin          → AdminPermissions::permissions()
//!   ├─ subject == opinion      → opinion rules
//!   └─ subject == collaborative_draft → draft rules
//! ```
//!
//! Evaluators are pure: they read the [`crate::domain::context::PermissionContext`]
//! and the host collaborators in [`services::PermissionServices`] and return a
//! [`crate::domain::decision::Decision`].

pub mod admin_permissions;
pub mod public_permissions;
pub mod services;
pub mod vote_quota;

pub use admin_permissions::AdminPermissions;
pub use public_permissions::PublicPermissions;
pub use services::PermissionServices;
pub use vote_quota::{VoteQuota, VoteQuotaCalculator};
