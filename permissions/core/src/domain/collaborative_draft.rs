// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Collaborative Draft Aggregate
//!
//! A co-authored opinion draft with an access-request workflow.
//!
//! ## Lifecycle
//!
//! ```text
//! CollaborativeDraft::new(creator)           state = Open
//!   ├─ request_access(user)                  requesters += user
//!   ├─ accept_access_request(user)           requesters -= user, coauthors += user
//!   ├─ reject_access_request(user)           requesters -= user
//!   ├─ publish()                             state = Published (closed)
//!   └─ withdraw()                            state = Withdrawn (closed)
//! ```
//!
//! ## Invariants
//!
//! - The creator is always the first co-author.
//! - A user is never both a requester and a co-author.
//! - Once closed, the draft never reopens and none of the transitions above apply.
//! - A requester leaves the requester set only through accept or reject.
//!
//! The permission evaluators read this aggregate; the host applies the
//! transitions after the corresponding permission has been granted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ids::{CollaborativeDraftId, ComponentId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaborativeDraftState {
    #[default]
    Open,
    Withdrawn,
    Published,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaborativeDraftError {
    #[error("Collaborative draft is closed ({0:?})")]
    Closed(CollaborativeDraftState),
    #[error("User {0} has already requested access")]
    AlreadyRequested(UserId),
    #[error("User {0} is already a co-author")]
    AlreadyCoauthor(UserId),
    #[error("User {0} has no pending access request")]
    NoPendingRequest(UserId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollaborativeDraft {
    pub id: CollaborativeDraftId,
    pub component: ComponentId,
    #[serde(default)]
    pub state: CollaborativeDraftState,
    /// Co-authors in authorship order; the creator comes first.
    pub coauthors: Vec<UserId>,
    /// Users waiting for the creator to grant them write access.
    #[serde(default)]
    pub requesters: Vec<UserId>,
}

impl CollaborativeDraft {
    pub fn new(id: CollaborativeDraftId, component: ComponentId, creator: UserId) -> Self {
        Self {
            id,
            component,
            state: CollaborativeDraftState::Open,
            coauthors: vec![creator],
            requesters: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == CollaborativeDraftState::Open
    }

    pub fn creator(&self) -> Option<&UserId> {
        self.coauthors.first()
    }

    pub fn created_by(&self, user: &UserId) -> bool {
        self.creator() == Some(user)
    }

    /// Authors and accepted collaborators may edit.
    pub fn editable_by(&self, user: &UserId) -> bool {
        self.coauthors.contains(user)
    }

    pub fn is_requester(&self, user: &UserId) -> bool {
        self.requesters.contains(user)
    }

    pub fn request_access(&mut self, user: UserId) -> Result<(), CollaborativeDraftError> {
        self.ensure_open()?;
        if self.editable_by(&user) {
            return Err(CollaborativeDraftError::AlreadyCoauthor(user));
        }
        if self.is_requester(&user) {
            return Err(CollaborativeDraftError::AlreadyRequested(user));
        }
        self.requesters.push(user);
        Ok(())
    }

    pub fn accept_access_request(&mut self, user: UserId) -> Result<(), CollaborativeDraftError> {
        self.take_request(user)?;
        self.coauthors.push(user);
        Ok(())
    }

    pub fn reject_access_request(&mut self, user: UserId) -> Result<(), CollaborativeDraftError> {
        self.take_request(user)
    }

    pub fn publish(&mut self) -> Result<(), CollaborativeDraftError> {
        self.ensure_open()?;
        self.state = CollaborativeDraftState::Published;
        Ok(())
    }

    pub fn withdraw(&mut self) -> Result<(), CollaborativeDraftError> {
        self.ensure_open()?;
        self.state = CollaborativeDraftState::Withdrawn;
        Ok(())
    }

    fn take_request(&mut self, user: UserId) -> Result<(), CollaborativeDraftError> {
        self.ensure_open()?;
        let position = self
            .requesters
            .iter()
            .position(|requester| *requester == user)
            .ok_or(CollaborativeDraftError::NoPendingRequest(user))?;
        self.requesters.remove(position);
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), CollaborativeDraftError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(CollaborativeDraftError::Closed(self.state))
        }
    }
}
