//! The hosting page of a member table.

use std::sync::Arc;

use async_trait::async_trait;
use roster_lib::error::Error;
use roster_lib::model::Group;
use roster_lib::{DirectoryApi, MembershipApi};
use roster_table::controls::{OptionFilter, SearchBox};
use roster_table::notify::Notifier;
use roster_table::render::render_text;
use roster_table::sync::SelectedIds;
use roster_table::{Table, TableError};

use crate::bulk::{BulkActions, Refresher};
use crate::members::{self, MemberRow};

/// Member table of one school, or of one group when seeded with it.
///
/// Owns the table, its filter controls and the selected member ids the
/// table publishes. Cheap to clone; clones share the table.
#[derive(Clone)]
pub struct RosterView {
    directory: Arc<dyn DirectoryApi>,
    school_id: String,
    group: Option<Group>,
    groups: Vec<Group>,
    table: Table<MemberRow>,
    selected: SelectedIds<i64>,
    search: SearchBox<MemberRow>,
    role_filter: OptionFilter<MemberRow>,
    group_filter: OptionFilter<MemberRow>,
}

impl RosterView {
    /// Fetch members and groups and build the view.
    ///
    /// With a `group`, the group filter starts on that group.
    pub async fn load(
        directory: Arc<dyn DirectoryApi>,
        school_id: impl Into<String>,
        group: Option<Group>,
    ) -> Result<Self, crate::AppError> {
        let school_id = school_id.into();
        let (fetched, groups) = tokio::try_join!(
            directory.members(&school_id),
            directory.groups(&school_id)
        )?;
        log::debug!(
            "school {}: loaded {} member(s), {} group(s)",
            school_id,
            fetched.len(),
            groups.len()
        );
        Ok(Self::new(directory, school_id, group, members::rows(fetched), groups)?)
    }

    fn new(
        directory: Arc<dyn DirectoryApi>,
        school_id: String,
        group: Option<Group>,
        rows: Vec<MemberRow>,
        groups: Vec<Group>,
    ) -> Result<Self, TableError> {
        let table = Table::with_rows(members::member_columns(), rows);
        let selected = SelectedIds::new();
        table.subscribe(selected.clone());

        let search = SearchBox::new(table.clone());
        let role_filter = members::role_filter(&table)?;
        let group_filter =
            members::group_filter(&table, &groups, group.as_ref().map(|g| g.id))?;

        Ok(Self {
            directory,
            school_id,
            group,
            groups,
            table,
            selected,
            search,
            role_filter,
            group_filter,
        })
    }

    pub fn school_id(&self) -> &str {
        &self.school_id
    }

    /// The group this view was opened for, if any.
    pub fn group(&self) -> Option<&Group> {
        self.group.as_ref()
    }

    /// Groups of the school, as loaded.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn find_group(&self, group_id: i64) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    pub fn table(&self) -> &Table<MemberRow> {
        &self.table
    }

    /// Ids of the selected members, as last published by the table.
    pub fn selected(&self) -> &SelectedIds<i64> {
        &self.selected
    }

    pub fn search(&self) -> &SearchBox<MemberRow> {
        &self.search
    }

    pub fn role_filter(&self) -> &OptionFilter<MemberRow> {
        &self.role_filter
    }

    pub fn group_filter(&self) -> &OptionFilter<MemberRow> {
        &self.group_filter
    }

    /// Bulk actions on this view's selection for a target group.
    pub fn bulk_actions(
        &self,
        api: Arc<dyn MembershipApi>,
        notifier: Arc<dyn Notifier>,
        group: Group,
    ) -> BulkActions {
        BulkActions::new(
            api,
            Arc::new(self.clone()),
            notifier,
            self.school_id.clone(),
            group,
            self.selected.clone(),
        )
    }

    /// The view as text: a title line followed by the table.
    pub fn render(&self) -> String {
        let title = match &self.group {
            Some(group) => format!("{} (group {})", group.name, group.id),
            None => format!("School {}", self.school_id),
        };
        format!("{}\n\n{}", title, render_text(&self.table))
    }
}

#[async_trait]
impl Refresher for RosterView {
    async fn refresh(&self) -> Result<(), Error> {
        let fetched = self.directory.members(&self.school_id).await?;
        log::debug!("school {}: refreshed {} member(s)", self.school_id, fetched.len());
        let rows = members::rows(fetched);
        self.group_filter
            .replace_options(members::group_options(&self.groups, &rows));
        self.table.set_rows(rows);
        Ok(())
    }
}
