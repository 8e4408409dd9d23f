// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Decision Primitive
//!
//! Every rule yields a [`Decision`]. Rules are composed in a fixed order and the
//! last *explicit* decision wins:
//!
//! ```text
//! Undetermined ─ allow() ─▶ Allow ─ toggle(false) ─▶ Deny ─ undetermined() ─▶ Deny
//! ```
//!
//! An `Undetermined` rule never erases an earlier `Allow`/`Deny`. The enforcement
//! point ([`crate::infrastructure::enforcement::PermissionEnforcer`]) converts a final
//! `Undetermined` into a denial.

use serde::{Deserialize, Serialize};

/// Outcome of a single rule or of a whole evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allow,
    Deny,
    #[default]
    Undetermined,
}

impl Decision {
    /// Unconditional grant.
    pub fn allow() -> Self {
        Self::Allow
    }

    /// Allow when `condition` holds, deny otherwise. Never undetermined.
    pub fn toggle(condition: bool) -> Self {
        if condition {
            Self::Allow
        } else {
            Self::Deny
        }
    }

    /// The rule has no opinion on the request.
    pub fn undetermined() -> Self {
        Self::Undetermined
    }

    /// Unconditional grant, only if `applies`. Otherwise the rule abstains.
    pub fn allow_if(applies: bool) -> Self {
        if applies {
            Self::Allow
        } else {
            Self::Undetermined
        }
    }

    /// Compose with a rule evaluated after this one.
    pub fn then(self, later: Decision) -> Self {
        match later {
            Self::Undetermined => self,
            explicit => explicit,
        }
    }

    /// Fold a sequence of rule outcomes in evaluation order.
    pub fn resolve(rules: impl IntoIterator<Item = Decision>) -> Self {
        rules
            .into_iter()
            .fold(Self::Undetermined, |acc, rule| acc.then(rule))
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn is_undetermined(&self) -> bool {
        matches!(self, Self::Undetermined)
    }

    /// Fail-closed conversion used at the enforcement boundary.
    pub fn into_verdict(self) -> bool {
        self.is_allowed()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
            Self::Undetermined => "undetermined",
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_never_undetermined() {
        assert_eq!(Decision::toggle(true), Decision::Allow);
        assert_eq!(Decision::toggle(false), Decision::Deny);
    }

    #[test]
    fn test_undetermined_does_not_erase_explicit_decision() {
        assert_eq!(Decision::allow().then(Decision::undetermined()), Decision::Allow);
        assert_eq!(Decision::Deny.then(Decision::undetermined()), Decision::Deny);
    }

    #[test]
    fn test_last_explicit_decision_wins() {
        let resolved = Decision::resolve([
            Decision::allow(),
            Decision::undetermined(),
            Decision::toggle(false),
        ]);
        assert_eq!(resolved, Decision::Deny);

        let resolved = Decision::resolve([Decision::toggle(false), Decision::allow()]);
        assert_eq!(resolved, Decision::Allow);
    }

    #[test]
    fn test_empty_resolution_fails_closed() {
        let resolved = Decision::resolve(std::iter::empty());
        assert!(resolved.is_undetermined());
        assert!(!resolved.into_verdict());
    }
}
