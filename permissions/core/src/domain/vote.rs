// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ComponentId, OpinionId, UserId};

/// One support cast by `author` on `opinion`.
///
/// The host enforces one vote per author per opinion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub opinion: OpinionId,
    pub component: ComponentId,
    pub author: UserId,
    pub created_at: DateTime<Utc>,
}

/// Live counts over the host's vote records.
///
/// Implementations must read current data on every call; the vote quota relies
/// on it not being cached across evaluations.
pub trait VoteRepository: Send + Sync {
    /// Votes `author` has cast across all opinions of `component`.
    fn count_by_author_in_component(&self, author: UserId, component: ComponentId) -> usize;

    /// Votes received by `opinion`.
    fn count_for_opinion(&self, opinion: OpinionId) -> usize;
}
