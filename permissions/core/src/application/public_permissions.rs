// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Public Permissions
//!
//! Entry point of every authorization check. Evaluates the `public` scope
//! (opinions and collaborative drafts on the participant-facing site) and hands
//! `admin` requests to [`AdminPermissions`] untouched.
//!
//! ## Opinion rules
//!
//! | action | allowed when |
//! |--------|--------------|
//! | `create` | authorized(`create`) and creation enabled |
//! | `edit` | opinion editable by the actor |
//! | `withdraw` | actor is an author |
//! | `amend` | authorized(`amend`) and amendments enabled |
//! | `vote` | authorized(`vote`), voting enabled, votes remaining |
//! | `unvote` | authorized(`vote`), voting enabled |
//! | `report` | always |
//!
//! ## Collaborative draft rules
//!
//! Everything except `create` also requires the draft to exist, the feature to
//! be enabled, and the draft to be open.
//!
//! | action | allowed when |
//! |--------|--------------|
//! | `create` | drafts enabled, creation enabled, authorized(`create`) |
//! | `edit` | actor is a co-author |
//! | `publish` | actor created the draft |
//! | `request_access` | actor is neither a requester nor a co-author |
//! | `react_to_request_access` | actor is not a requester and created the draft |

use tracing::debug;

use super::admin_permissions::AdminPermissions;
use super::services::PermissionServices;
use super::vote_quota::VoteQuotaCalculator;
use crate::domain::actor::Actor;
use crate::domain::authorization::ResourceRef;
use crate::domain::collaborative_draft::CollaborativeDraft;
use crate::domain::context::PermissionContext;
use crate::domain::decision::Decision;
use crate::domain::opinion::Opinion;
use crate::domain::permission_action::{Action, PermissionAction, Scope, Subject};

pub struct PublicPermissions<'a> {
    user: Option<&'a Actor>,
    permission_action: PermissionAction,
    context: PermissionContext<'a>,
    services: &'a PermissionServices,
}

impl<'a> PublicPermissions<'a> {
    pub fn new(
        user: Option<&'a Actor>,
        permission_action: PermissionAction,
        context: PermissionContext<'a>,
        services: &'a PermissionServices,
    ) -> Self {
        Self {
            user,
            permission_action,
            context,
            services,
        }
    }

    pub fn permissions(&self) -> Decision {
        let Some(user) = self.user else {
            debug!("No authenticated user for {}", self.permission_action);
            return Decision::undetermined();
        };

        let decision = match self.permission_action.scope {
            Scope::Admin => {
                let admin = AdminPermissions::new(
                    user,
                    self.permission_action,
                    self.context,
                    self.services,
                );
                return admin.permissions();
            }
            Scope::Public => match self.permission_action.subject {
                Subject::Opinion => self.opinion_permissions(user),
                Subject::CollaborativeDraft => self.collaborative_draft_permissions(user),
                _ => Decision::undetermined(),
            },
        };

        debug!("Public permission {} for user {}: {}", self.permission_action, user.id, decision);
        decision
    }

    fn opinion_permissions(&self, user: &Actor) -> Decision {
        let opinion = self.context.opinion;
        match self.permission_action.action {
            Action::Create => Decision::toggle(
                self.authorized(user, Action::Create, None)
                    && self.context.current_settings().creation_enabled,
            ),
            Action::Edit => Decision::toggle(opinion.is_some_and(|opinion| {
                opinion.editable_by(
                    &user.id,
                    self.context.now,
                    self.context.component_settings().opinion_edit_before_minutes,
                )
            })),
            Action::Withdraw => {
                Decision::toggle(opinion.is_some_and(|opinion| opinion.authored_by(&user.id)))
            }
            Action::Amend => Decision::toggle(opinion.is_some_and(|opinion| {
                self.authorized_on_opinion(user, Action::Amend, opinion)
                    && self.context.current_settings().amendments_enabled
            })),
            Action::Vote => Decision::toggle(opinion.is_some_and(|opinion| {
                self.authorized_on_opinion(user, Action::Vote, opinion)
                    && self.voting_enabled()
                    && self.has_remaining_votes(user)
            })),
            Action::Unvote => Decision::toggle(opinion.is_some_and(|opinion| {
                self.authorized_on_opinion(user, Action::Vote, opinion) && self.voting_enabled()
            })),
            Action::Report => Decision::allow(),
            _ => Decision::undetermined(),
        }
    }

    fn collaborative_draft_permissions(&self, user: &Actor) -> Decision {
        let action = self.permission_action.action;
        match action {
            Action::Create => Decision::toggle(
                self.collaborative_drafts_enabled()
                    && self.context.current_settings().creation_enabled
                    && self.authorized(user, Action::Create, None),
            ),
            Action::Edit
            | Action::Publish
            | Action::RequestAccess
            | Action::ReactToRequestAccess => {
                Decision::toggle(self.context.collaborative_draft.is_some_and(|draft| {
                    self.collaborative_drafts_enabled()
                        && draft.is_open()
                        && Self::draft_access_predicate(action, draft, user)
                }))
            }
            _ => Decision::undetermined(),
        }
    }

    fn draft_access_predicate(action: Action, draft: &CollaborativeDraft, user: &Actor) -> bool {
        match action {
            Action::Edit => draft.editable_by(&user.id),
            Action::Publish => draft.created_by(&user.id),
            Action::RequestAccess => !draft.is_requester(&user.id) && !draft.editable_by(&user.id),
            Action::ReactToRequestAccess => {
                !draft.is_requester(&user.id) && draft.created_by(&user.id)
            }
            _ => false,
        }
    }

    fn authorized(&self, user: &Actor, action: Action, resource: Option<ResourceRef>) -> bool {
        self.context.current_component.is_some_and(|component| {
            self.services
                .authorization
                .authorize(user, action, component, resource)
        })
    }

    fn authorized_on_opinion(&self, user: &Actor, action: Action, opinion: &Opinion) -> bool {
        self.authorized(user, action, Some(ResourceRef::Opinion(opinion.id)))
    }

    fn voting_enabled(&self) -> bool {
        self.context.current_settings().voting_enabled()
    }

    fn collaborative_drafts_enabled(&self) -> bool {
        self.context.component_settings().collaborative_drafts_enabled
    }

    fn has_remaining_votes(&self, user: &Actor) -> bool {
        VoteQuotaCalculator::new(self.services.votes.as_ref())
            .quota(user.id, self.context.current_component)
            .has_remaining()
    }
}
