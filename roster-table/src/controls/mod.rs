//! Filter controls.
//!
//! Headless counterparts of the search box and the categorical filter
//! popovers shown above a table. Each control holds a clone of the table
//! handle and reads and writes its filter state through the table's setters.

mod options;
mod search;

pub use options::{FilterOption, OptionFilter, OptionStatus};
pub use search::SearchBox;
