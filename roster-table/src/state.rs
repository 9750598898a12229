//! Table state store.

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::column::Column;
use crate::error::TableError;
use crate::filter::FilterState;
use crate::row::TableRow;
use crate::selection::Selection;
use crate::sort::{SortDirection, SortSpec, SortState};
use crate::sync::{SelectionObserver, SubscriptionId};
use crate::view::visible_indices;

/// Unique identifier for a Table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

type Observer<R> = Arc<dyn SelectionObserver<<R as TableRow>::Id>>;

/// Internal state for the Table.
pub(crate) struct TableInner<R: TableRow> {
    /// Column definitions.
    pub columns: Vec<Column<R>>,
    /// All rows, in insertion order.
    pub rows: Vec<R>,
    /// Active filter criteria.
    pub filters: FilterState,
    /// Current sort keys.
    pub sort: SortState,
    /// Selection state (by row ID).
    pub selection: Selection,
    /// Derived: indices into `rows` of the visible rows, in display order.
    pub visible: Vec<usize>,
    /// Selection observers.
    pub observers: Vec<(SubscriptionId, Observer<R>)>,
}

impl<R: TableRow> TableInner<R> {
    fn new(columns: Vec<Column<R>>, rows: Vec<R>) -> Self {
        let mut inner = Self {
            columns,
            rows,
            filters: FilterState::default(),
            sort: SortState::default(),
            selection: Selection::new(),
            visible: Vec::new(),
            observers: Vec::new(),
        };
        inner.derive();
        inner
    }

    /// Recompute the visible rows from scratch.
    fn derive(&mut self) {
        self.visible = visible_indices(&self.rows, &self.columns, &self.filters, &self.sort);
    }

    fn column(&self, column_id: &str) -> Result<&Column<R>, TableError> {
        self.columns
            .iter()
            .find(|c| c.id == column_id)
            .ok_or_else(|| TableError::UnknownColumn(column_id.to_string()))
    }

    fn sortable_column(&self, column_id: &str) -> Result<(), TableError> {
        if self.column(column_id)?.sortable {
            Ok(())
        } else {
            Err(TableError::NotSortable(column_id.to_string()))
        }
    }

    fn filterable_column(&self, column_id: &str) -> Result<(), TableError> {
        if self.column(column_id)?.filter.is_some() {
            Ok(())
        } else {
            Err(TableError::NotFilterable(column_id.to_string()))
        }
    }

    fn has_row(&self, id: &str) -> bool {
        self.rows.iter().any(|row| row.id() == id)
    }

    fn visible_ids(&self) -> Vec<String> {
        self.visible.iter().map(|&i| self.rows[i].id()).collect()
    }

    /// Selected rows in insertion order.
    fn selected_rows(&self) -> impl Iterator<Item = &R> {
        self.rows
            .iter()
            .filter(|row| self.selection.is_selected(&row.id()))
    }

    fn snapshot(&self) -> (Vec<R::Id>, Vec<Observer<R>>) {
        let ids = self.selected_rows().filter_map(|row| row.native_id()).collect();
        let observers = self.observers.iter().map(|(_, o)| Arc::clone(o)).collect();
        (ids, observers)
    }
}

/// Selection counts for the "N of M row(s) selected." line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionSummary {
    /// Selected rows that are currently visible.
    pub selected_visible: usize,
    /// Visible rows.
    pub visible: usize,
    /// Selected rows, visible or not.
    pub selected_total: usize,
    /// All rows.
    pub total: usize,
}

impl fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} row(s) selected.",
            self.selected_visible, self.visible
        )
    }
}

/// A headless data table with filtering, multi-column sorting and selection.
///
/// `Table<R>` manages a collection of rows with:
/// - Column definitions with typed accessors and filter strategies
/// - Global text search and per-column categorical filters
/// - Multi-column stable sorting
/// - Multi-selection that survives filtering and sorting
/// - Selection observers, notified on every selection change
///
/// Every mutator runs under one write lock and recomputes the visible rows
/// before returning, so readers never see a partially applied change.
/// Failing mutators return an error and leave the state untouched.
///
/// Selection changes and their notifications are serialized across clones:
/// observers receive snapshots in the order the changes were applied.
///
/// The handle is cheap to clone; clones share the same state.
pub struct Table<R: TableRow> {
    /// Unique identifier.
    id: TableId,
    /// Internal state.
    pub(crate) inner: Arc<RwLock<TableInner<R>>>,
    /// Dirty flag for re-render.
    pub(crate) dirty: Arc<AtomicBool>,
    /// Held from a selection change until its observers are notified.
    publishing: Arc<Mutex<()>>,
}

impl<R: TableRow> Table<R> {
    /// Create a new table with column definitions.
    pub fn new(columns: Vec<Column<R>>) -> Self {
        Self::with_rows(columns, Vec::new())
    }

    /// Create a table with initial rows.
    pub fn with_rows(columns: Vec<Column<R>>, rows: Vec<R>) -> Self {
        Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(TableInner::new(columns, rows))),
            dirty: Arc::new(AtomicBool::new(true)),
            publishing: Arc::new(Mutex::new(())),
        }
    }

    /// Seed a column filter, e.g. a group roster starting filtered on its
    /// own group. The seed is ordinary state and can be changed afterwards.
    pub fn with_column_filter<I, S>(self, column_id: &str, values: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_column_filter(column_id, values)?;
        Ok(self)
    }

    /// Get the unique ID.
    pub fn id(&self) -> TableId {
        self.id
    }

    fn read(&self) -> RwLockReadGuard<'_, TableInner<R>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TableInner<R>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Taken before the write lock by every mutator that may publish.
    fn publishing(&self) -> MutexGuard<'_, ()> {
        self.publishing.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark the derived view as changed.
    fn touch(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    /// Get the column definitions.
    pub fn columns(&self) -> Vec<Column<R>> {
        self.read().columns.clone()
    }

    /// Get a column by id.
    pub fn column(&self, column_id: &str) -> Option<Column<R>> {
        self.read().column(column_id).ok().cloned()
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Get all rows, in insertion order.
    pub fn rows(&self) -> Vec<R> {
        self.read().rows.clone()
    }

    /// Number of rows before filtering.
    pub fn total_count(&self) -> usize {
        self.read().rows.len()
    }

    /// Check if the table has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    /// Replace all rows (e.g. after a refresh).
    ///
    /// Filters and sort are kept. Selected IDs that no longer exist are
    /// dropped; the others stay selected.
    pub fn set_rows(&self, rows: Vec<R>) {
        let _order = self.publishing();
        let pruned = {
            let mut guard = self.write();
            guard.rows = rows;
            let present: BTreeSet<String> = guard.rows.iter().map(|row| row.id()).collect();
            let removed = guard.selection.retain(|id| present.contains(id));
            guard.derive();
            removed
        };
        self.touch();
        if !pruned.is_empty() {
            log::debug!("{}: dropped {} stale selected row(s)", self.id, pruned.len());
            self.publish_selection();
        }
    }

    // -------------------------------------------------------------------------
    // Derived view
    // -------------------------------------------------------------------------

    /// Visible rows: filtered, then sorted.
    pub fn visible_rows(&self) -> Vec<R> {
        let guard = self.read();
        guard.visible.iter().map(|&i| guard.rows[i].clone()).collect()
    }

    /// IDs of the visible rows, in display order.
    pub fn visible_ids(&self) -> Vec<String> {
        self.read().visible_ids()
    }

    /// Number of rows passing the filters.
    pub fn visible_count(&self) -> usize {
        self.read().visible.len()
    }

    /// Counts for the selection summary line.
    pub fn summary(&self) -> SelectionSummary {
        let guard = self.read();
        let selected_visible = guard
            .visible
            .iter()
            .filter(|&&i| guard.selection.is_selected(&guard.rows[i].id()))
            .count();
        SelectionSummary {
            selected_visible,
            visible: guard.visible.len(),
            selected_total: guard.selection.len(),
            total: guard.rows.len(),
        }
    }

    /// How many rows carry each filter key of a column, over all rows.
    pub fn option_counts(&self, column_id: &str) -> Result<BTreeMap<String, usize>, TableError> {
        let guard = self.read();
        let column = guard.column(column_id)?;
        let mut counts = BTreeMap::new();
        for row in &guard.rows {
            let keys: BTreeSet<String> = column.value(row).keys().into_iter().collect();
            for key in keys {
                *counts.entry(key).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Current global search text.
    pub fn global_filter(&self) -> String {
        self.read().filters.global.clone()
    }

    /// Set the global search text.
    pub fn set_global_filter(&self, text: impl Into<String>) {
        {
            let mut guard = self.write();
            guard.filters.global = text.into();
            guard.derive();
        }
        self.touch();
    }

    /// Active values of a column filter (empty if unfiltered).
    pub fn column_filter(&self, column_id: &str) -> BTreeSet<String> {
        self.read().filters.column(column_id)
    }

    /// Snapshot of all filter criteria.
    pub fn filters(&self) -> FilterState {
        self.read().filters.clone()
    }

    /// Replace the active values of a column filter. An empty set removes
    /// the filter.
    pub fn set_column_filter<I, S>(&self, column_id: &str, values: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        {
            let mut guard = self.write();
            guard.filterable_column(column_id)?;
            guard.filters.set_column(column_id, values);
            guard.derive();
        }
        self.touch();
        Ok(())
    }

    /// Remove a column filter.
    pub fn clear_column_filter(&self, column_id: &str) -> Result<(), TableError> {
        self.set_column_filter(column_id, Vec::<String>::new())
    }

    /// Remove the global search and every column filter.
    pub fn clear_filters(&self) {
        {
            let mut guard = self.write();
            guard.filters = FilterState::default();
            guard.derive();
        }
        self.touch();
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Current sort keys, highest priority first.
    pub fn sort(&self) -> Vec<SortSpec> {
        self.read().sort.specs().to_vec()
    }

    /// Sort by one column in the given direction (replacing other keys), or
    /// remove that column's key with `None`.
    pub fn set_sort(
        &self,
        column_id: &str,
        direction: Option<SortDirection>,
    ) -> Result<(), TableError> {
        {
            let mut guard = self.write();
            match direction {
                Some(_) => guard.sortable_column(column_id)?,
                None => {
                    guard.column(column_id)?;
                }
            }
            guard.sort.set(column_id, direction);
            guard.derive();
        }
        self.touch();
        Ok(())
    }

    /// Replace all sort keys at once.
    pub fn set_sort_specs(&self, specs: Vec<SortSpec>) -> Result<(), TableError> {
        {
            let mut guard = self.write();
            for spec in &specs {
                guard.sortable_column(&spec.column)?;
            }
            guard.sort.replace(specs);
            guard.derive();
        }
        self.touch();
        Ok(())
    }

    /// Toggle sort for a column as the only key.
    ///
    /// Cycles ascending → descending → unsorted. Returns the new direction.
    pub fn toggle_sort(&self, column_id: &str) -> Result<Option<SortDirection>, TableError> {
        let next = {
            let mut guard = self.write();
            guard.sortable_column(column_id)?;
            let next = guard.sort.toggle(column_id);
            guard.derive();
            next
        };
        self.touch();
        Ok(next)
    }

    /// Toggle sort for a column while keeping the other keys.
    pub fn toggle_sort_multi(&self, column_id: &str) -> Result<Option<SortDirection>, TableError> {
        let next = {
            let mut guard = self.write();
            guard.sortable_column(column_id)?;
            let next = guard.sort.toggle_multi(column_id);
            guard.derive();
            next
        };
        self.touch();
        Ok(next)
    }

    /// Clear sort state.
    pub fn clear_sort(&self) {
        {
            let mut guard = self.write();
            guard.sort.clear();
            guard.derive();
        }
        self.touch();
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Check if a row is selected by ID.
    pub fn is_selected(&self, id: &str) -> bool {
        self.read().selection.is_selected(id)
    }

    /// IDs of all selected rows (visible or not), in insertion order.
    pub fn selected_ids(&self) -> Vec<String> {
        self.read().selected_rows().map(|row| row.id()).collect()
    }

    /// All selected rows (visible or not), in insertion order.
    pub fn selected_rows(&self) -> Vec<R> {
        self.read().selected_rows().cloned().collect()
    }

    /// Native ids of the selected rows, as published to observers.
    pub fn selected_native_ids(&self) -> Vec<R::Id> {
        self.read().snapshot().0
    }

    /// Toggle selection of a row by ID. Returns the new selection state.
    pub fn toggle_row_selection(&self, id: &str) -> Result<bool, TableError> {
        let _order = self.publishing();
        let selected = {
            let mut guard = self.write();
            if !guard.has_row(id) {
                return Err(TableError::UnknownRow(id.to_string()));
            }
            let (added, _) = guard.selection.toggle(id);
            !added.is_empty()
        };
        self.touch();
        self.publish_selection();
        Ok(selected)
    }

    /// Set the selection state of a row by ID.
    pub fn set_row_selected(&self, id: &str, selected: bool) -> Result<(), TableError> {
        let _order = self.publishing();
        let changed = {
            let mut guard = self.write();
            if !guard.has_row(id) {
                return Err(TableError::UnknownRow(id.to_string()));
            }
            guard.selection.set(id, selected)
        };
        if changed {
            self.touch();
            self.publish_selection();
        }
        Ok(())
    }

    /// Select all rows, or only the currently visible ones.
    /// Returns the IDs that were newly selected.
    pub fn select_all(&self, visible_only: bool) -> Vec<String> {
        let _order = self.publishing();
        let added = {
            let mut guard = self.write();
            let ids: Vec<String> = if visible_only {
                guard.visible_ids()
            } else {
                guard.rows.iter().map(|row| row.id()).collect()
            };
            guard.selection.select_all(&ids)
        };
        if !added.is_empty() {
            self.touch();
            self.publish_selection();
        }
        added
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear_selection(&self) -> Vec<String> {
        let _order = self.publishing();
        let removed = self.write().selection.clear();
        if !removed.is_empty() {
            self.touch();
            self.publish_selection();
        }
        removed
    }

    // -------------------------------------------------------------------------
    // Observers
    // -------------------------------------------------------------------------

    /// Register a selection observer.
    ///
    /// The observer immediately receives the current selection, then a new
    /// snapshot after every change.
    pub fn subscribe(&self, observer: impl SelectionObserver<R::Id> + 'static) -> SubscriptionId {
        let id = SubscriptionId::new();
        let observer: Observer<R> = Arc::new(observer);
        let _order = self.publishing();
        let ids = {
            let mut guard = self.write();
            guard.observers.push((id, Arc::clone(&observer)));
            guard.snapshot().0
        };
        observer.selection_changed(&ids);
        id
    }

    /// Remove a selection observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut guard = self.write();
        let before = guard.observers.len();
        guard.observers.retain(|(sub, _)| *sub != id);
        guard.observers.len() != before
    }

    /// Send the current selection to every observer, outside the state lock.
    /// Callers hold the publishing guard.
    fn publish_selection(&self) {
        let (ids, observers) = self.read().snapshot();
        for observer in observers {
            observer.selection_changed(&ids);
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the table has changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<R: TableRow> Clone for Table<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
            publishing: Arc::clone(&self.publishing),
        }
    }
}

impl<R: TableRow> Default for Table<R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<R: TableRow> fmt::Debug for Table<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read();
        f.debug_struct("Table")
            .field("id", &self.id)
            .field("rows", &guard.rows.len())
            .field("visible", &guard.visible.len())
            .field("selected", &guard.selection.len())
            .field("filters", &guard.filters)
            .field("sort", &guard.sort)
            .finish()
    }
}
