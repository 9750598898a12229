//! Roster administration front end.
//!
//! Loads a school's members into a filterable, selectable table and runs
//! bulk group membership changes on the selection.

pub mod bulk;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod members;
pub mod paths;
pub mod view;

pub use error::AppError;
