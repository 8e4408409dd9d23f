// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Permissions Domain
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`decision`] | `Decision` tri-state and the last-explicit-wins reducer |
//! | [`permission_action`] | `PermissionAction` request descriptor, `Scope`, `Subject`, `Action` |
//! | [`context`] | `PermissionContext` typed request context |
//! | [`ids`] | UUID identifiers for users, spaces, components and resources |
//! | [`actor`] | `Actor` |
//! | [`component`] | `Component` |
//! | [`settings`] | `StepSettings`, `ComponentSettings` snapshots |
//! | [`opinion`] | `Opinion` snapshot and editability window |
//! | [`collaborative_draft`] | `CollaborativeDraft` aggregate and access-request state machine |
//! | [`role`] | Valuator roles, valuation assignments, `RoleRegistry` |
//! | [`vote`] | `Vote`, `VoteRepository` |
//! | [`authorization`] | `AuthorizationHandler` external capability check |
//! | [`engine_config`] | `EngineConfigManifest` YAML configuration |

pub mod actor;
pub mod authorization;
pub mod collaborative_draft;
pub mod component;
pub mod context;
pub mod decision;
pub mod engine_config;
pub mod ids;
pub mod opinion;
pub mod permission_action;
pub mod role;
pub mod settings;
pub mod vote;
