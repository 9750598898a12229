//! School members

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use super::Group;
use super::Role;

/// A person enrolled in a school: the row type of member tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Stable identifier. The API sends it either as a string or a number.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Display name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Role within the school.
    pub role: Role,
    /// Groups this member belongs to.
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Member {
    /// Creates a member without any group membership.
    pub fn new(
        id: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            email: email.into(),
            role,
            groups: Vec::new(),
        }
    }

    /// Adds a group membership.
    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// Returns the identifier as an integer, if it is one.
    pub fn numeric_id(&self) -> Option<i64> {
        self.id.trim().parse().ok()
    }

    /// Returns the ids of all groups this member belongs to.
    pub fn group_ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.groups.iter().map(|group| group.id)
    }

    /// Returns `true` if the member belongs to the given group.
    pub fn in_group(&self, group_id: i64) -> bool {
        self.group_ids().any(|id| id == group_id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
