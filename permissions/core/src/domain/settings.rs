// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Settings Snapshots
//!
//! Read-only copies of the host's feature flags. Every flag defaults to `false`
//! so that a missing or partial settings document disables the feature rather
//! than opening it.
//!
//! - [`StepSettings`]: flags of the active phase ("current settings")
//! - [`ComponentSettings`]: flags fixed for the lifetime of the component

use serde::{Deserialize, Serialize};

/// Flags of the currently active phase of the participatory space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepSettings {
    pub creation_enabled: bool,
    pub votes_enabled: bool,
    pub votes_blocked: bool,
    pub votes_hidden: bool,
    pub opinion_answering_enabled: bool,
    pub amendments_enabled: bool,
    pub publish_answers_immediately: bool,
}

impl StepSettings {
    /// Votes are enabled for the phase and not temporarily blocked.
    pub fn voting_enabled(&self) -> bool {
        self.votes_enabled && !self.votes_blocked
    }
}

/// Component-wide flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentSettings {
    pub official_opinions_enabled: bool,
    pub opinion_answering_enabled: bool,
    pub participatory_texts_enabled: bool,
    pub collaborative_drafts_enabled: bool,
    /// Maximum votes per user in the component. Zero or negative disables the limit.
    pub vote_limit: Option<i64>,
    /// Minutes after publication during which authors may still edit an opinion.
    pub opinion_edit_before_minutes: u32,
}

impl Default for ComponentSettings {
    fn default() -> Self {
        Self {
            official_opinions_enabled: false,
            opinion_answering_enabled: false,
            participatory_texts_enabled: false,
            collaborative_drafts_enabled: false,
            vote_limit: None,
            opinion_edit_before_minutes: default_edit_before_minutes(),
        }
    }
}

impl ComponentSettings {
    /// The configured vote limit, if it is a positive number.
    pub fn effective_vote_limit(&self) -> Option<u32> {
        self.vote_limit
            .filter(|limit| *limit > 0)
            .map(|limit| u32::try_from(limit).unwrap_or(u32::MAX))
    }
}

fn default_edit_before_minutes() -> u32 {
    5
}
