//! Groups

use serde::Deserialize;
use serde::Serialize;

/// A named collection of members within a school.
///
/// Membership itself is owned by the backend; members carry a read-only
/// mirror of the groups they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
    /// Unique group identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

impl Group {
    /// Creates a new group.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
