// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Opinion Snapshot
//!
//! The engine only ever sees a read-only copy of an opinion. The host loads it
//! and places it in the [`super::context::PermissionContext`].
//!
//! ## Editability
//!
//! An author may edit an opinion while it is an unpublished draft. After
//! publication the author keeps an edit window of
//! `opinion_edit_before_minutes`, closed early by withdrawal, by a published
//! answer, or when the opinion was copied in from another component.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ComponentId, OpinionId, UserId};

/// Answer state of a published opinion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpinionState {
    /// Published with no answer yet.
    #[default]
    NotAnswered,
    Evaluating,
    Accepted,
    Rejected,
    Withdrawn,
}

impl OpinionState {
    /// An answer has been made public for this opinion.
    pub fn is_answered(&self) -> bool {
        matches!(self, Self::Evaluating | Self::Accepted | Self::Rejected)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opinion {
    pub id: OpinionId,
    pub component: ComponentId,
    /// Co-authors in authorship order. The first one created the opinion.
    pub authors: Vec<UserId>,
    /// Authored by the organization itself.
    #[serde(default)]
    pub official: bool,
    /// Imported from an official meeting.
    #[serde(default)]
    pub official_meeting: bool,
    #[serde(default)]
    pub state: OpinionState,
    /// `None` while the opinion is still a draft.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub copied_from_other_component: bool,
}

impl Opinion {
    pub fn new(id: OpinionId, component: ComponentId, authors: Vec<UserId>) -> Self {
        Self {
            id,
            component,
            authors,
            official: false,
            official_meeting: false,
            state: OpinionState::default(),
            published_at: None,
            copied_from_other_component: false,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.published_at.is_none()
    }

    pub fn is_withdrawn(&self) -> bool {
        self.state == OpinionState::Withdrawn
    }

    pub fn authored_by(&self, user: &UserId) -> bool {
        self.authors.contains(user)
    }

    /// The original author, listed first among the co-authors.
    pub fn created_by(&self, user: &UserId) -> bool {
        self.authors.first() == Some(user)
    }

    /// Official opinions, including the ones coming from official meetings.
    pub fn is_official(&self) -> bool {
        self.official || self.official_meeting
    }

    /// Whether `now` still falls inside the author's edit window.
    pub fn within_edit_time_limit(&self, now: DateTime<Utc>, edit_before_minutes: u32) -> bool {
        match self.published_at {
            None => true,
            Some(published_at) => {
                now < published_at + Duration::minutes(i64::from(edit_before_minutes))
            }
        }
    }

    /// Only the creator edits; other co-authors may still withdraw.
    pub fn editable_by(
        &self,
        user: &UserId,
        now: DateTime<Utc>,
        edit_before_minutes: u32,
    ) -> bool {
        if !self.created_by(user) {
            return false;
        }
        if self.is_draft() {
            return true;
        }
        !self.is_withdrawn()
            && !self.state.is_answered()
            && !self.copied_from_other_component
            && self.within_edit_time_limit(now, edit_before_minutes)
    }
}
