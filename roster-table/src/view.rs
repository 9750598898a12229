//! Derivation of the visible rows.

use crate::column::Column;
use crate::filter::FilterState;
use crate::filter::filter_rows;
use crate::row::TableRow;
use crate::sort::SortState;
use crate::sort::sort_indices;

/// Indices of the visible rows, in display order.
///
/// Filters first, then sorts the survivors. A pure function of its inputs:
/// the table calls it after every mutation and keeps no other intermediate
/// result.
pub fn visible_indices<R: TableRow>(
    rows: &[R],
    columns: &[Column<R>],
    filters: &FilterState,
    sort: &SortState,
) -> Vec<usize> {
    let mut indices = filter_rows(rows, columns, filters);
    sort_indices(rows, columns, sort, &mut indices);
    indices
}
