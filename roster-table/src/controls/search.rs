//! Global search box.

use crate::row::TableRow;
use crate::state::Table;

/// Text input bound to a table's global filter.
#[derive(Debug, Clone)]
pub struct SearchBox<R: TableRow> {
    table: Table<R>,
}

impl<R: TableRow> SearchBox<R> {
    pub fn new(table: Table<R>) -> Self {
        Self { table }
    }

    /// Current search text.
    pub fn value(&self) -> String {
        self.table.global_filter()
    }

    /// Replace the search text.
    pub fn set(&self, text: impl Into<String>) {
        self.table.set_global_filter(text);
    }

    pub fn clear(&self) {
        self.table.set_global_filter(String::new());
    }

    /// Returns `true` if the search narrows the table.
    pub fn is_active(&self) -> bool {
        !self.value().is_empty()
    }
}
