//! School directory reads

use async_trait::async_trait;

use crate::error::Error;
use crate::model::Group;
use crate::model::Member;

/// Read access to the members and groups of a school.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Lists every member of a school, with their group memberships.
    async fn members(&self, school_id: &str) -> Result<Vec<Member>, Error>;

    /// Lists the groups of a school.
    async fn groups(&self, school_id: &str) -> Result<Vec<Group>, Error>;
}
