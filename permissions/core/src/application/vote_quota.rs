// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Vote Quota
//!
//! Remaining votes of a user inside one component.
//!
//! - No positive `vote_limit` → [`VoteQuota::Unlimited`], which reports one
//!   remaining vote so the quota never blocks on its own.
//! - Positive limit → `limit - votes already cast in the component`.
//!
//! The used count is read from the [`VoteRepository`] on every call. Two
//! concurrent voters can both observe a positive remainder; the resulting
//! overrun shows up as a negative `remaining()`.

use serde::{Deserialize, Serialize};

use crate::domain::component::Component;
use crate::domain::ids::UserId;
use crate::domain::vote::VoteRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoteQuota {
    Unlimited,
    Limited { limit: u32, used: usize },
}

impl VoteQuota {
    pub fn remaining(&self) -> i64 {
        match self {
            Self::Unlimited => 1,
            Self::Limited { limit, used } => {
                i64::from(*limit) - i64::try_from(*used).unwrap_or(i64::MAX)
            }
        }
    }

    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }
}

pub struct VoteQuotaCalculator<'a> {
    votes: &'a dyn VoteRepository,
}

impl<'a> VoteQuotaCalculator<'a> {
    pub fn new(votes: &'a dyn VoteRepository) -> Self {
        Self { votes }
    }

    pub fn quota(&self, user: UserId, component: Option<&Component>) -> VoteQuota {
        let Some(component) = component else {
            return VoteQuota::Unlimited;
        };
        match component.settings.effective_vote_limit() {
            None => VoteQuota::Unlimited,
            Some(limit) => VoteQuota::Limited {
                limit,
                used: self.votes.count_by_author_in_component(user, component.id),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{ComponentId, OpinionId, ParticipatorySpaceId};
    use std::collections::HashMap;

    struct FixedCounts(HashMap<(UserId, ComponentId), usize>);

    impl VoteRepository for FixedCounts {
        fn count_by_author_in_component(&self, author: UserId, component: ComponentId) -> usize {
            self.0.get(&(author, component)).copied().unwrap_or(0)
        }

        fn count_for_opinion(&self, _opinion: OpinionId) -> usize {
            0
        }
    }

    fn component_with_limit(limit: Option<i64>) -> Component {
        let mut component = Component::new(ComponentId::new(), ParticipatorySpaceId::new());
        component.settings.vote_limit = limit;
        component
    }

    #[test]
    fn test_no_limit_reports_one_remaining() {
        let user = UserId::new();
        let component = component_with_limit(None);
        let repo = FixedCounts(HashMap::from([((user, component.id), 40)]));
        let calculator = VoteQuotaCalculator::new(&repo);

        assert_eq!(calculator.quota(user, Some(&component)), VoteQuota::Unlimited);
        assert_eq!(calculator.quota(user, Some(&component)).remaining(), 1);
        assert!(calculator.quota(user, None).has_remaining());
    }

    #[test]
    fn test_zero_or_negative_limit_is_unlimited() {
        let user = UserId::new();
        let repo = FixedCounts(HashMap::new());
        let calculator = VoteQuotaCalculator::new(&repo);

        for limit in [0, -2] {
            let component = component_with_limit(Some(limit));
            assert_eq!(calculator.quota(user, Some(&component)), VoteQuota::Unlimited);
        }
    }

    #[test]
    fn test_limited_quota_subtracts_votes_cast() {
        let user = UserId::new();
        let component = component_with_limit(Some(2));
        let repo = FixedCounts(HashMap::from([((user, component.id), 2)]));
        let calculator = VoteQuotaCalculator::new(&repo);

        let quota = calculator.quota(user, Some(&component));
        assert_eq!(quota, VoteQuota::Limited { limit: 2, used: 2 });
        assert_eq!(quota.remaining(), 0);
        assert!(!quota.has_remaining());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(VoteQuota::Limited { limit: 3, used: 1 }).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "limited", "limit": 3, "used": 1 }));
        let json = serde_json::to_value(VoteQuota::Unlimited).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "unlimited" }));
    }

    #[test]
    fn test_overrun_goes_negative() {
        let quota = VoteQuota::Limited { limit: 2, used: 3 };
        assert_eq!(quota.remaining(), -1);
    }
}
