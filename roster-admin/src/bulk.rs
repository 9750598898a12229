//! Bulk membership actions on the selected members.
//!
//! One coordinator serves one target group. Each accepted attempt sends a
//! single remote change for every selected member and ends in exactly one
//! notification. The selection is never modified here; on success the
//! hosting view is refreshed so the table shows the new memberships.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use roster_lib::MembershipApi;
use roster_lib::api::MembershipAction;
use roster_lib::error::Error;
use roster_lib::model::Group;
use roster_table::notify::{Notifier, Toast};
use roster_table::sync::SelectedIds;

/// Reloads the rows of the view hosting a bulk action.
#[async_trait]
pub trait Refresher: Send + Sync {
    async fn refresh(&self) -> Result<(), Error>;
}

/// Why an attempt was not started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptySelection,
    InFlight,
}

/// Result of one bulk action attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOutcome {
    /// The change was applied remotely.
    Completed,
    /// The remote call failed; an error notification was shown.
    Failed,
    /// Nothing was sent and nothing was shown.
    Skipped(SkipReason),
}

/// Clears the in-flight flag when the attempt ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Assign and unassign actions for one group.
#[derive(Clone)]
pub struct BulkActions {
    api: Arc<dyn MembershipApi>,
    refresher: Arc<dyn Refresher>,
    notifier: Arc<dyn Notifier>,
    school_id: String,
    group: Group,
    selected: SelectedIds<i64>,
    in_flight: Arc<AtomicBool>,
}

impl BulkActions {
    pub fn new(
        api: Arc<dyn MembershipApi>,
        refresher: Arc<dyn Refresher>,
        notifier: Arc<dyn Notifier>,
        school_id: impl Into<String>,
        group: Group,
        selected: SelectedIds<i64>,
    ) -> Self {
        Self {
            api,
            refresher,
            notifier,
            school_id: school_id.into(),
            group,
            selected,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Whether the actions should be enabled: something is selected and no
    /// attempt is running.
    pub fn can_run(&self) -> bool {
        !self.selected.is_empty() && !self.is_in_flight()
    }

    /// Add the selected members to the group.
    pub async fn assign(&self) -> BulkOutcome {
        self.run(MembershipAction::Assign).await
    }

    /// Remove the selected members from the group.
    pub async fn unassign(&self) -> BulkOutcome {
        self.run(MembershipAction::Unassign).await
    }

    pub async fn run(&self, action: MembershipAction) -> BulkOutcome {
        let member_ids = self.selected.get();
        if member_ids.is_empty() {
            log::debug!("{} skipped: nothing selected", action.verb());
            return BulkOutcome::Skipped(SkipReason::EmptySelection);
        }
        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            log::debug!("{} skipped: another change is in flight", action.verb());
            return BulkOutcome::Skipped(SkipReason::InFlight);
        };

        log::info!(
            "{} {} member(s) to group {} ({})",
            action.verb(),
            member_ids.len(),
            self.group.id,
            self.group.name
        );
        let result = self
            .api
            .apply(action, &self.school_id, self.group.id, &member_ids)
            .await;

        match result {
            Ok(()) => {
                if let Err(e) = self.refresher.refresh().await {
                    log::warn!("refresh after {} failed: {}", action.verb(), e);
                }
                self.notifier.notify(success_toast(action, &self.group));
                BulkOutcome::Completed
            }
            Err(e) => {
                log::error!("{} to group {} failed: {}", action.verb(), self.group.id, e);
                self.notifier.notify(failure_toast(action, &self.group, &e));
                BulkOutcome::Failed
            }
        }
    }
}

pub fn success_toast(action: MembershipAction, group: &Group) -> Toast {
    Toast::success("Success").with_body(format!(
        "Member(s) have been successfully {} to {}.",
        action.past_tense(),
        group.name
    ))
}

/// Error toast carrying the server's message verbatim, or a generic
/// description when there is none.
pub fn failure_toast(action: MembershipAction, group: &Group, error: &Error) -> Toast {
    let body = error.remote_message().unwrap_or_else(|| {
        format!(
            "Failed to {} member(s) to {}. Please try again.",
            action.verb(),
            group.name
        )
    });
    Toast::error("Error").with_body(body)
}
