// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

mod common;

use civic_permissions_core::domain::actor::Actor;
use civic_permissions_core::domain::collaborative_draft::CollaborativeDraft;
use civic_permissions_core::domain::ids::CollaborativeDraftId;
use civic_permissions_core::domain::permission_action::{Action, Subject};
use common::{participant, public, Host};

const GATED: [Action; 4] = [
    Action::Edit,
    Action::Publish,
    Action::RequestAccess,
    Action::ReactToRequestAccess,
];

fn drafts_host() -> Host {
    let mut host = Host::new();
    host.component.settings.collaborative_drafts_enabled = true;
    host.component.step_settings.creation_enabled = true;
    host
}

fn draft(host: &Host, creator: &Actor) -> CollaborativeDraft {
    let id = CollaborativeDraftId::from_name("park-plan");
    CollaborativeDraft::new(id, host.component.id, creator.id)
}

#[test]
fn test_create_requires_feature_creation_and_authorization() {
    let mut host = Host::new();
    let alice = participant("alice");
    let create = public(Action::Create, Subject::CollaborativeDraft);

    host.component.step_settings.creation_enabled = true;
    assert!(!host.allowed(&alice, create, host.context()));

    host.component.settings.collaborative_drafts_enabled = true;
    assert!(host.allowed(&alice, create, host.context()));

    host.authorization.block_action(Action::Create);
    assert!(!host.allowed(&alice, create, host.context()));
}

#[test]
fn test_access_workflow_on_open_draft() {
    let host = drafts_host();
    let alice = participant("alice");
    let bob = participant("bob");
    let mut draft = draft(&host, &alice);

    let request = public(Action::RequestAccess, Subject::CollaborativeDraft);
    let react = public(Action::ReactToRequestAccess, Subject::CollaborativeDraft);
    let edit = public(Action::Edit, Subject::CollaborativeDraft);
    let publish = public(Action::Publish, Subject::CollaborativeDraft);

    // Editors never need to request access.
    assert!(!host.allowed(&alice, request, host.context().with_collaborative_draft(&draft)));
    assert!(host.allowed(&bob, request, host.context().with_collaborative_draft(&draft)));
    assert!(!host.allowed(&bob, edit, host.context().with_collaborative_draft(&draft)));

    draft.request_access(bob.id).unwrap();
    assert!(!host.allowed(&bob, request, host.context().with_collaborative_draft(&draft)));
    assert!(!host.allowed(&bob, react, host.context().with_collaborative_draft(&draft)));
    assert!(host.allowed(&alice, react, host.context().with_collaborative_draft(&draft)));

    draft.accept_access_request(bob.id).unwrap();
    let context = host.context().with_collaborative_draft(&draft);
    assert!(host.allowed(&bob, edit, context));
    assert!(!host.allowed(&bob, publish, context));
    assert!(!host.allowed(&bob, react, context));
    assert!(host.allowed(&alice, publish, context));
}

#[test]
fn test_second_request_is_denied() {
    let host = drafts_host();
    let alice = participant("alice");
    let carol = participant("carol");
    let mut draft = draft(&host, &alice);
    let request = public(Action::RequestAccess, Subject::CollaborativeDraft);

    assert!(host.allowed(&carol, request, host.context().with_collaborative_draft(&draft)));
    draft.request_access(carol.id).unwrap();
    assert!(!host.allowed(&carol, request, host.context().with_collaborative_draft(&draft)));

    draft.reject_access_request(carol.id).unwrap();
    assert!(host.allowed(&carol, request, host.context().with_collaborative_draft(&draft)));
}

#[test]
fn test_closed_draft_denies_every_gated_action() {
    let host = drafts_host();
    let alice = participant("alice");
    let bob = participant("bob");
    let carol = participant("carol");

    let mut published = draft(&host, &alice);
    published.request_access(bob.id).unwrap();
    published.publish().unwrap();

    let mut withdrawn = draft(&host, &alice);
    withdrawn.withdraw().unwrap();

    for closed in [&published, &withdrawn] {
        let context = host.context().with_collaborative_draft(closed);
        for actor in [&alice, &bob, &carol] {
            for action in GATED {
                let request = public(action, Subject::CollaborativeDraft);
                assert!(!host.allowed(actor, request, context), "{} {}", actor.nickname, request);
            }
        }
    }
}

#[test]
fn test_disabled_feature_denies_existing_drafts() {
    let mut host = drafts_host();
    host.component.settings.collaborative_drafts_enabled = false;
    let alice = participant("alice");
    let draft = draft(&host, &alice);

    for action in GATED {
        let request = public(action, Subject::CollaborativeDraft);
        assert!(!host.allowed(&alice, request, host.context().with_collaborative_draft(&draft)));
    }
}

#[test]
fn test_missing_draft_fails_closed() {
    let host = drafts_host();
    let alice = participant("alice");

    for action in GATED {
        assert!(!host.allowed(&alice, public(action, Subject::CollaborativeDraft), host.context()));
    }
}
