// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Admin Permissions
//!
//! Back-office rules for the opinions component. Rules run in this exact order
//! and the last explicit decision wins (see [`Decision::resolve`]):
//!
//! 1. Valuators (non-admins holding the valuator role in the space) get only
//!    note/answer creation on assigned opinions, export, and self-unassignment.
//!    Evaluation stops there for them.
//! 2. `create`: notes always; opinions when official opinions can be created;
//!    answers when answering is enabled in both settings.
//! 3. `opinion/edit` while the opinion is official and has no votes.
//! 4. Category and scope updates.
//! 5. Bulk import, merge, split, assignment to a valuator.
//! 6. Bulk export.
//! 7. Bulk unassignment from a valuator.
//! 8. `publish_answers`, platform admins only.
//! 9. Participatory texts, only while the feature is enabled.

use tracing::debug;

use super::services::PermissionServices;
use crate::domain::actor::Actor;
use crate::domain::context::PermissionContext;
use crate::domain::decision::Decision;
use crate::domain::permission_action::{Action, PermissionAction, Scope, Subject};
use crate::domain::role::ValuatorRole;

pub struct AdminPermissions<'a> {
    user: &'a Actor,
    permission_action: PermissionAction,
    context: PermissionContext<'a>,
    services: &'a PermissionServices,
}

impl<'a> AdminPermissions<'a> {
    pub fn new(
        user: &'a Actor,
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
        if self.permission_action.scope != Scope::Admin {
            return Decision::undetermined();
        }

        if let Some(role) = self.user_valuator_role() {
            let decision = self.valuator_permissions(&role);
            debug!(
                "Valuator permission {} for user {}: {}",
                self.permission_action, self.user.id, decision
            );
            return decision;
        }

        let action = &self.permission_action;
        let decision = Decision::resolve([
            self.can_create_opinion_note(),
            self.can_create_opinion_from_admin(),
            self.can_create_opinion_answer(),
            // Admins may edit official opinions until the first vote lands.
            Decision::allow_if(
                action.is(Subject::Opinion, Action::Edit) && self.admin_edition_is_available(),
            ),
            action.allow_when(Subject::OpinionCategory, Action::Update),
            action.allow_when(Subject::OpinionScope, Action::Update),
            action.allow_when(Subject::Opinions, Action::Import),
            action.allow_when(Subject::Opinions, Action::Merge),
            action.allow_when(Subject::Opinions, Action::Split),
            action.allow_when(Subject::Opinions, Action::AssignToValuator),
            self.can_export_opinions(),
            self.can_unassign_valuator_from_opinions(),
            action.toggle_when(Subject::Opinions, Action::PublishAnswers, || {
                self.user.is_admin()
            }),
            self.participatory_texts_permissions(),
        ]);

        debug!(
            "Admin permission {} for user {}: {}",
            self.permission_action, self.user.id, decision
        );
        decision
    }

    fn valuator_permissions(&self, role: &ValuatorRole) -> Decision {
        let assigned = self.valuator_assigned_to_opinion(role);
        let when_assigned = |rule: Decision| {
            if assigned {
                rule
            } else {
                Decision::undetermined()
            }
        };

        Decision::resolve([
            when_assigned(self.can_create_opinion_note()),
            when_assigned(
                self.permission_action
                    .allow_when(Subject::OpinionAnswer, Action::Create),
            ),
            self.can_export_opinions(),
            self.valuator_can_unassign_valuator_from_opinions(),
        ])
    }

    /// The valuator role of a non-admin user in the component's space.
    fn user_valuator_role(&self) -> Option<ValuatorRole> {
        if self.user.is_admin() {
            return None;
        }
        let component = self.context.current_component?;
        self.services
            .roles
            .valuator_role_for(component.participatory_space, self.user.id)
    }

    fn valuator_assigned_to_opinion(&self, role: &ValuatorRole) -> bool {
        self.context
            .opinion
            .is_some_and(|opinion| self.services.assignments.is_assigned(opinion.id, role.id))
    }

    fn can_create_opinion_note(&self) -> Decision {
        self.permission_action
            .allow_when(Subject::OpinionNote, Action::Create)
    }

    fn can_create_opinion_from_admin(&self) -> Decision {
        self.permission_action
            .toggle_when(Subject::Opinion, Action::Create, || self.admin_creation_is_enabled())
    }

    fn can_create_opinion_answer(&self) -> Decision {
        self.permission_action
            .toggle_when(Subject::OpinionAnswer, Action::Create, || {
                self.admin_opinion_answering_is_enabled()
            })
    }

    fn can_export_opinions(&self) -> Decision {
        self.permission_action
            .allow_when(Subject::Opinions, Action::Export)
    }

    fn can_unassign_valuator_from_opinions(&self) -> Decision {
        self.permission_action
            .allow_when(Subject::Opinions, Action::UnassignFromValuator)
    }

    /// Valuators may only unassign themselves.
    fn valuator_can_unassign_valuator_from_opinions(&self) -> Decision {
        if self.context.valuator == Some(self.user.id) {
            self.can_unassign_valuator_from_opinions()
        } else {
            Decision::undetermined()
        }
    }

    fn participatory_texts_permissions(&self) -> Decision {
        if self.permission_action.subject != Subject::ParticipatoryTexts
            || !self.context.component_settings().participatory_texts_enabled
        {
            return Decision::undetermined();
        }
        Decision::allow_if(matches!(
            self.permission_action.action,
            Action::Manage | Action::Import | Action::Update | Action::Publish
        ))
    }

    fn admin_creation_is_enabled(&self) -> bool {
        self.context.current_settings().creation_enabled
            && self.context.component_settings().official_opinions_enabled
    }

    fn admin_opinion_answering_is_enabled(&self) -> bool {
        self.context.current_settings().opinion_answering_enabled
            && self.context.component_settings().opinion_answering_enabled
    }

    fn admin_edition_is_available(&self) -> bool {
        self.context.opinion.is_some_and(|opinion| {
            opinion.is_official() && self.services.votes.count_for_opinion(opinion.id) == 0
        })
    }
}
