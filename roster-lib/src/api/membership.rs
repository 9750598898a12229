//! Group membership changes
//!
//! Membership is many-to-many and owned by the backend. Changes are sent as
//! one request per bulk action carrying the target group and the member ids.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Error;

/// Request body shared by the add and remove endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipChange<'a> {
    /// Members to add to or remove from the group.
    pub user_ids: &'a [i64],
}

/// Which way a membership change goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipAction {
    /// Add members to the group.
    Assign,
    /// Remove members from the group.
    Unassign,
}

impl MembershipAction {
    /// Verb used in user-facing messages.
    pub fn verb(&self) -> &'static str {
        match self {
            MembershipAction::Assign => "assign",
            MembershipAction::Unassign => "unassign",
        }
    }

    /// Past participle used in user-facing messages.
    pub fn past_tense(&self) -> &'static str {
        match self {
            MembershipAction::Assign => "assigned",
            MembershipAction::Unassign => "unassigned",
        }
    }
}

/// The remote membership endpoint.
///
/// Repeating a change (assigning an already assigned member) must be
/// tolerated by the implementation; callers do not deduplicate.
#[async_trait]
pub trait MembershipApi: Send + Sync {
    /// Adds members to a group of a school.
    async fn add_members(&self, school_id: &str, group_id: i64, member_ids: &[i64])
    -> Result<(), Error>;

    /// Removes members from a group of a school.
    async fn remove_members(
        &self,
        school_id: &str,
        group_id: i64,
        member_ids: &[i64],
    ) -> Result<(), Error>;

    /// Applies a change in the given direction.
    async fn apply(
        &self,
        action: MembershipAction,
        school_id: &str,
        group_id: i64,
        member_ids: &[i64],
    ) -> Result<(), Error> {
        match action {
            MembershipAction::Assign => self.add_members(school_id, group_id, member_ids).await,
            MembershipAction::Unassign => {
                self.remove_members(school_id, group_id, member_ids).await
            }
        }
    }
}
