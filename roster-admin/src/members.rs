//! Member rows and the column set of member tables.

use std::collections::HashSet;

use roster_lib::model::{Group, Member, Role};
use roster_table::controls::{FilterOption, OptionFilter};
use roster_table::{Alignment, CellValue, Column, FilterStrategy, Table, TableError, TableRow};

/// Column ids.
pub mod columns {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const ROLE: &str = "role";
    pub const GROUPS: &str = "groups";
}

/// A member as a table row.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRow(pub Member);

impl From<Member> for MemberRow {
    fn from(member: Member) -> Self {
        Self(member)
    }
}

impl TableRow for MemberRow {
    type Id = i64;

    fn id(&self) -> String {
        self.0.id.clone()
    }

    fn native_id(&self) -> Option<i64> {
        self.0.numeric_id()
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.0.full_name, &self.0.email]
    }
}

pub fn rows(members: Vec<Member>) -> Vec<MemberRow> {
    members.into_iter().map(MemberRow).collect()
}

/// Columns of a member table.
///
/// The groups column filters on group ids and displays group names.
pub fn member_columns() -> Vec<Column<MemberRow>> {
    vec![
        Column::new(columns::ID, "ID", 6, |row: &MemberRow| match row.0.numeric_id() {
            Some(id) => CellValue::Integer(id),
            None => CellValue::from(row.0.id.as_str()),
        })
        .align(Alignment::Right)
        .sortable(),
        Column::new(columns::NAME, "Name", 24, |row: &MemberRow| {
            row.0.full_name.as_str().into()
        })
        .sortable(),
        Column::new(columns::EMAIL, "Email", 30, |row: &MemberRow| {
            row.0.email.as_str().into()
        })
        .sortable(),
        Column::new(columns::ROLE, "Role", 9, |row: &MemberRow| {
            row.0.role.as_str().into()
        })
        .sortable()
        .filter(FilterStrategy::Equals)
        .render(|row| row.0.role.label().to_string()),
        Column::new(columns::GROUPS, "Groups", 30, |row: &MemberRow| {
            CellValue::List(row.0.group_ids().map(|id| id.to_string()).collect())
        })
        .filter(FilterStrategy::Intersects)
        .render(|row| {
            let names: Vec<&str> = row.0.groups.iter().map(|g| g.name.as_str()).collect();
            names.join(", ")
        }),
    ]
}

pub fn member_table(members: Vec<Member>) -> Table<MemberRow> {
    Table::with_rows(member_columns(), rows(members))
}

/// Role filter offering every role.
pub fn role_filter(table: &Table<MemberRow>) -> Result<OptionFilter<MemberRow>, TableError> {
    let options = Role::ALL
        .into_iter()
        .map(|role| FilterOption::new(role.as_str(), role.label()))
        .collect();
    OptionFilter::new(table.clone(), columns::ROLE, options)
}

/// Options for the group filter: the school's groups, then groups that only
/// appear on member rows, each once and in first-seen order.
pub fn group_options(groups: &[Group], rows: &[MemberRow]) -> Vec<FilterOption> {
    let mut seen = HashSet::new();
    groups
        .iter()
        .chain(rows.iter().flat_map(|row| &row.0.groups))
        .filter(|group| seen.insert(group.id))
        .map(|group| FilterOption::new(group.id.to_string(), group.name.as_str()))
        .collect()
}

/// Group filter over the school's groups and every membership on the table.
///
/// `default` seeds the filter, e.g. with the group whose roster is shown.
pub fn group_filter(
    table: &Table<MemberRow>,
    groups: &[Group],
    default: Option<i64>,
) -> Result<OptionFilter<MemberRow>, TableError> {
    let options = group_options(groups, &table.rows());
    let filter = OptionFilter::new(table.clone(), columns::GROUPS, options)?;
    match default {
        Some(id) => filter.with_default([id.to_string()]),
        None => Ok(filter),
    }
}
