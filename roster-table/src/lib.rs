//! Headless data table engine.
//!
//! A [`Table`] holds rows and column definitions together with the four
//! independent pieces of view state (sort, column filters, global search and
//! selection) and derives the visible rows from them on every change.

pub mod column;
pub mod controls;
pub mod error;
pub mod filter;
pub mod notify;
pub mod render;
pub mod row;
pub mod selection;
pub mod sort;
pub mod state;
pub mod sync;
pub mod view;

pub use column::{Alignment, CellValue, Column, FilterStrategy};
pub use error::TableError;
pub use row::TableRow;
pub use state::{SelectionSummary, Table, TableId};

pub mod prelude {
    pub use crate::column::{Alignment, CellValue, Column, FilterStrategy};
    pub use crate::controls::{FilterOption, OptionFilter, SearchBox};
    pub use crate::error::TableError;
    pub use crate::notify::{Notifier, Toast, ToastLevel, ToastLog};
    pub use crate::row::TableRow;
    pub use crate::sort::{SortDirection, SortSpec};
    pub use crate::state::{SelectionSummary, Table, TableId};
    pub use crate::sync::{SelectedIds, SelectionObserver, SubscriptionId};
}
