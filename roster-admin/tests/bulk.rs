//! Tests for the bulk membership actions.

mod common;

use std::sync::Arc;

use common::{FakeDirectory, FakeMembership, Reply, chess, choir, school};
use roster_admin::bulk::{BulkOutcome, SkipReason};
use roster_admin::view::RosterView;
use roster_lib::model::{Member, Role};
use roster_table::notify::{Toast, ToastLevel, ToastLog};
use tokio::sync::Notify;

async fn view(directory: &Arc<FakeDirectory>) -> RosterView {
    RosterView::load(directory.clone(), "7", None).await.unwrap()
}

fn bodies(toasts: &[Toast]) -> Vec<(ToastLevel, &str, &str)> {
    toasts
        .iter()
        .map(|t| (t.level, t.title.as_str(), t.body.as_deref().unwrap_or("")))
        .collect()
}

#[tokio::test]
async fn test_failed_assign_keeps_selection_and_notifies_once() {
    let directory = FakeDirectory::new(school(), vec![chess(), choir()]);
    let view = view(&directory).await;
    view.table().toggle_row_selection("1").unwrap();
    view.table().toggle_row_selection("2").unwrap();

    let api = FakeMembership::new(Reply::Http(500, ""));
    let toasts = ToastLog::new();
    let actions = view.bulk_actions(api.clone(), Arc::new(toasts.clone()), chess());

    assert_eq!(actions.assign().await, BulkOutcome::Failed);

    assert_eq!(view.table().selected_ids(), vec!["1", "2"]);
    assert_eq!(view.selected().get(), vec![1, 2]);
    assert_eq!(
        bodies(&toasts.toasts()),
        vec![(
            ToastLevel::Error,
            "Error",
            "Failed to assign member(s) to Chess. Please try again."
        )]
    );
    assert_eq!(directory.member_calls(), 1);
    assert!(!actions.is_in_flight());
}

#[tokio::test]
async fn test_remote_message_is_shown_verbatim() {
    let directory = FakeDirectory::new(school(), vec![chess()]);
    let view = view(&directory).await;
    view.table().toggle_row_selection("3").unwrap();

    let api = FakeMembership::new(Reply::Http(409, r#"{"message":"Group is archived"}"#));
    let toasts = ToastLog::new();
    let actions = view.bulk_actions(api, Arc::new(toasts.clone()), chess());

    assert_eq!(actions.unassign().await, BulkOutcome::Failed);
    assert_eq!(
        bodies(&toasts.toasts()),
        vec![(ToastLevel::Error, "Error", "Group is archived")]
    );
}

#[tokio::test]
async fn test_network_failure_uses_fallback_message() {
    let directory = FakeDirectory::new(school(), vec![chess()]);
    let view = view(&directory).await;
    view.table().toggle_row_selection("2").unwrap();

    let toasts = ToastLog::new();
    let actions = view.bulk_actions(
        FakeMembership::new(Reply::Network),
        Arc::new(toasts.clone()),
        choir(),
    );

    assert_eq!(actions.unassign().await, BulkOutcome::Failed);
    assert_eq!(
        toasts.toasts()[0].body.as_deref(),
        Some("Failed to unassign member(s) to Choir. Please try again.")
    );
}

#[tokio::test]
async fn test_successful_assign_refreshes_then_notifies() {
    let directory = FakeDirectory::new(school(), vec![chess(), choir()]);
    let view = view(&directory).await;
    view.group_filter().set(["10"]).unwrap();
    view.table().toggle_row_selection("2").unwrap();
    view.table().toggle_row_selection("3").unwrap();
    assert_eq!(view.table().visible_ids(), vec!["1"]);

    // The backend now reports both members in the group.
    directory.set_members(
        school()
            .into_iter()
            .map(|m| if m.id == "1" { m } else { m.with_group(chess()) })
            .collect(),
    );

    let api = FakeMembership::new(Reply::Ok);
    let toasts = ToastLog::new();
    let actions = view.bulk_actions(api.clone(), Arc::new(toasts.clone()), chess());
    assert!(actions.can_run());

    assert_eq!(actions.assign().await, BulkOutcome::Completed);

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].assign);
    assert_eq!(calls[0].school_id, "7");
    assert_eq!(calls[0].group_id, 10);
    assert_eq!(calls[0].member_ids, vec![2, 3]);

    assert_eq!(directory.member_calls(), 2);
    assert_eq!(view.table().visible_ids(), vec!["1", "2", "3"]);
    assert_eq!(view.selected().get(), vec![2, 3]);
    assert_eq!(
        bodies(&toasts.toasts()),
        vec![(
            ToastLevel::Success,
            "Success",
            "Member(s) have been successfully assigned to Chess."
        )]
    );
}

#[tokio::test]
async fn test_refresh_failure_keeps_success_notification() {
    let directory = FakeDirectory::new(school(), vec![chess()]);
    let view = view(&directory).await;
    view.table().toggle_row_selection("1").unwrap();
    *directory.fail_members.lock().unwrap() = true;

    let toasts = ToastLog::new();
    let actions = view.bulk_actions(
        FakeMembership::new(Reply::Ok),
        Arc::new(toasts.clone()),
        chess(),
    );

    assert_eq!(actions.unassign().await, BulkOutcome::Completed);
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts.toasts()[0].level, ToastLevel::Success);
    assert_eq!(view.table().total_count(), 3);
}

#[tokio::test]
async fn test_empty_selection_is_skipped_silently() {
    let directory = FakeDirectory::new(school(), vec![chess()]);
    let view = view(&directory).await;

    let api = FakeMembership::new(Reply::Ok);
    let toasts = ToastLog::new();
    let actions = view.bulk_actions(api.clone(), Arc::new(toasts.clone()), chess());

    assert!(!actions.can_run());
    assert_eq!(
        actions.assign().await,
        BulkOutcome::Skipped(SkipReason::EmptySelection)
    );
    assert!(api.calls().is_empty());
    assert!(toasts.is_empty());
}

#[tokio::test]
async fn test_hidden_selected_rows_are_included() {
    let directory = FakeDirectory::new(school(), vec![chess()]);
    let view = view(&directory).await;
    view.table().toggle_row_selection("3").unwrap();
    view.search().set("ada");
    view.table().toggle_row_selection("1").unwrap();

    let api = FakeMembership::new(Reply::Ok);
    let actions = view.bulk_actions(api.clone(), Arc::new(ToastLog::new()), chess());
    actions.assign().await;

    assert_eq!(api.calls()[0].member_ids, vec![1, 3]);
}

#[tokio::test]
async fn test_second_attempt_while_in_flight_is_skipped() {
    let directory = FakeDirectory::new(school(), vec![chess()]);
    let view = view(&directory).await;
    view.table().toggle_row_selection("1").unwrap();

    let started = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let api = FakeMembership::gated(started.clone(), release.clone());
    let toasts = ToastLog::new();
    let actions = Arc::new(view.bulk_actions(api.clone(), Arc::new(toasts.clone()), chess()));

    let first = tokio::spawn({
        let actions = actions.clone();
        async move { actions.assign().await }
    });
    started.notified().await;

    assert!(actions.is_in_flight());
    assert!(!actions.can_run());
    assert_eq!(
        actions.unassign().await,
        BulkOutcome::Skipped(SkipReason::InFlight)
    );

    // Filters stay usable while the change is pending.
    view.search().set("alan");
    assert_eq!(view.table().visible_ids(), vec!["2"]);

    release.notify_one();
    assert_eq!(first.await.unwrap(), BulkOutcome::Completed);
    assert!(actions.can_run());
    assert_eq!(api.calls().len(), 1);
    assert_eq!(toasts.len(), 1);
}

#[tokio::test]
async fn test_non_numeric_ids_are_not_sent() {
    let mut members = school();
    members.push(Member::new("legacy-9", "Old Account", "old@school.test", Role::Student));
    let directory = FakeDirectory::new(members, vec![chess()]);
    let view = view(&directory).await;
    view.table().select_all(false);

    let api = FakeMembership::new(Reply::Ok);
    let actions = view.bulk_actions(api.clone(), Arc::new(ToastLog::new()), chess());
    actions.assign().await;

    assert_eq!(api.calls()[0].member_ids, vec![1, 2, 3]);
}
