// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Civic Permissions Core
//!
//! Decides whether an actor may perform an action on an opinion, a batch of
//! opinions, or a collaborative draft.
//!
//! # Architecture
//!
//! - **Domain:** decisions, request descriptors, resource snapshots, settings,
//!   and the collaborator traits the host implements
//! - **Application:** public and admin evaluators, vote quota
//! - **Infrastructure:** enforcement point, audit logging, in-memory
//!   collaborators, scenario loading

pub mod domain;
pub mod application;
pub mod infrastructure;

pub use domain::*;
