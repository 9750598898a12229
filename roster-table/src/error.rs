//! Table errors

/// Errors returned by table mutators.
///
/// A mutator that fails leaves the table untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("column is not sortable: {0}")]
    NotSortable(String),

    #[error("column has no filter strategy: {0}")]
    NotFilterable(String),

    #[error("unknown row: {0}")]
    UnknownRow(String),
}
