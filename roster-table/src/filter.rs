//! Row filter engine.
//!
//! Pure predicates deciding whether a row stays visible. Dimensions combine
//! with AND (global search, then every filtered column); the values of one
//! column filter combine with OR.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::column::CellValue;
use crate::column::Column;
use crate::column::FilterStrategy;
use crate::row::TableRow;

/// Active filter criteria of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Free-text global search.
    pub global: String,
    /// Active values per column id. Columns without an entry are unfiltered.
    pub columns: BTreeMap<String, BTreeSet<String>>,
}

impl FilterState {
    /// Returns `true` if no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && self.columns.is_empty()
    }

    /// Active values of a column, empty if the column is unfiltered.
    pub fn column(&self, column_id: &str) -> BTreeSet<String> {
        self.columns.get(column_id).cloned().unwrap_or_default()
    }

    /// Replaces the active values of a column. An empty set removes the filter.
    pub(crate) fn set_column(&mut self, column_id: &str, values: BTreeSet<String>) {
        if values.is_empty() {
            self.columns.remove(column_id);
        } else {
            self.columns.insert(column_id.to_string(), values);
        }
    }
}

/// Global search: case-insensitive substring on the row's search fields, or
/// exact integer equality with the row id.
///
/// The id branch compares the leading integers of the search text and the
/// row id, so "2abc" finds row 2. When either has no leading integer only
/// the substring match applies. An empty search matches every row.
pub fn matches_global<R: TableRow>(row: &R, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    if row
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    {
        return true;
    }

    match (parse_integer(query), parse_integer(&row.id())) {
        (Some(wanted), Some(id)) => wanted == id,
        _ => false,
    }
}

/// The optionally signed integer at the start of `text`, after leading
/// whitespace. Trailing characters are ignored.
fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    let end = text.len() - unsigned.len() + digits;
    text[..end].parse().ok()
}

/// Applies one column's strategy to a cell. An empty value set matches.
pub fn matches_strategy(
    strategy: FilterStrategy,
    cell: &CellValue,
    values: &BTreeSet<String>,
) -> bool {
    if values.is_empty() {
        return true;
    }
    match (strategy, cell) {
        (FilterStrategy::Equals, CellValue::List(_)) => {
            values.contains(&cell.to_string())
        }
        (FilterStrategy::Equals, _) | (FilterStrategy::Intersects, _) => {
            cell.keys().iter().any(|key| values.contains(key))
        }
    }
}

/// Applies every active column filter to a row.
///
/// Filters on columns that are missing or have no strategy are ignored.
pub fn matches_columns<R>(
    row: &R,
    columns: &[Column<R>],
    filters: &BTreeMap<String, BTreeSet<String>>,
) -> bool {
    filters.iter().all(|(column_id, values)| {
        match columns.iter().find(|c| &c.id == column_id) {
            Some(column) => match column.filter {
                Some(strategy) => matches_strategy(strategy, &column.value(row), values),
                None => true,
            },
            None => true,
        }
    })
}

/// Decides whether a row stays visible under the given filters.
pub fn keep_row<R: TableRow>(row: &R, columns: &[Column<R>], filters: &FilterState) -> bool {
    matches_global(row, &filters.global) && matches_columns(row, columns, &filters.columns)
}

/// Indices of the rows that pass the filters, in insertion order.
pub fn filter_rows<R: TableRow>(
    rows: &[R],
    columns: &[Column<R>],
    filters: &FilterState,
) -> Vec<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| keep_row(*row, columns, filters))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn intersects_is_or_within_the_column() {
        let cell = CellValue::List(vec!["A".into(), "B".into()]);
        assert!(matches_strategy(FilterStrategy::Intersects, &cell, &set(&["B", "C"])));
        assert!(!matches_strategy(FilterStrategy::Intersects, &cell, &set(&["C", "D"])));
        assert!(matches_strategy(FilterStrategy::Intersects, &cell, &set(&[])));
    }

    #[test]
    fn equals_compares_scalar_text() {
        let cell = CellValue::from("TEACHER");
        assert!(matches_strategy(FilterStrategy::Equals, &cell, &set(&["TEACHER", "ADMIN"])));
        assert!(!matches_strategy(FilterStrategy::Equals, &cell, &set(&["STUDENT"])));
        assert!(!matches_strategy(FilterStrategy::Equals, &CellValue::Empty, &set(&["x"])));
        assert!(matches_strategy(FilterStrategy::Equals, &CellValue::Integer(4), &set(&["4"])));
    }

    #[test]
    fn parse_integer_reads_leading_digits() {
        assert_eq!(parse_integer(" 12 "), Some(12));
        assert_eq!(parse_integer("12abc"), Some(12));
        assert_eq!(parse_integer("-3x"), Some(-3));
        assert_eq!(parse_integer("abc12"), None);
        assert_eq!(parse_integer("-"), None);
        assert_eq!(parse_integer(""), None);
    }
}
