//! Multi-column sort state and stable sorting.

use std::cmp::Ordering;
use std::fmt;

use crate::column::CellValue;
use crate::column::Column;

/// Sort direction of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Header indicator for this direction.
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    /// Next state when a header is toggled: ascending → descending → none.
    pub fn cycle(current: Option<SortDirection>) -> Option<SortDirection> {
        match current {
            None => Some(SortDirection::Ascending),
            Some(SortDirection::Ascending) => Some(SortDirection::Descending),
            Some(SortDirection::Descending) => None,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

/// One sort key: a column and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn ascending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Descending)
    }
}

/// Ordered sort keys; the first key has the highest priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    specs: Vec<SortSpec>,
}

impl SortState {
    /// The sort keys in priority order.
    pub fn specs(&self) -> &[SortSpec] {
        &self.specs
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Current direction of a column, if it is sorted.
    pub fn direction(&self, column: &str) -> Option<SortDirection> {
        self.specs
            .iter()
            .find(|spec| spec.column == column)
            .map(|spec| spec.direction)
    }

    /// Priority of a column (0 = primary key), if it is sorted.
    pub fn priority(&self, column: &str) -> Option<usize> {
        self.specs.iter().position(|spec| spec.column == column)
    }

    /// Sort by a single column, replacing every other key. `None` removes the
    /// column's key and keeps the others.
    pub fn set(&mut self, column: &str, direction: Option<SortDirection>) {
        match direction {
            Some(direction) => self.specs = vec![SortSpec::new(column, direction)],
            None => self.specs.retain(|spec| spec.column != column),
        }
    }

    /// Cycle a column as the only sort key.
    pub fn toggle(&mut self, column: &str) -> Option<SortDirection> {
        let next = SortDirection::cycle(self.direction(column));
        match next {
            Some(direction) => self.specs = vec![SortSpec::new(column, direction)],
            None => self.specs.clear(),
        }
        next
    }

    /// Cycle a column while keeping the other keys. A newly sorted column
    /// gets the lowest priority; a column that keeps a direction keeps its
    /// priority.
    pub fn toggle_multi(&mut self, column: &str) -> Option<SortDirection> {
        let next = SortDirection::cycle(self.direction(column));
        match (self.priority(column), next) {
            (Some(index), Some(direction)) => self.specs[index].direction = direction,
            (Some(index), None) => {
                self.specs.remove(index);
            }
            (None, Some(direction)) => self.specs.push(SortSpec::new(column, direction)),
            (None, None) => {}
        }
        next
    }

    /// Replace every key. Later keys on an already listed column are dropped.
    pub fn replace(&mut self, specs: Vec<SortSpec>) {
        self.specs.clear();
        for spec in specs {
            if self.priority(&spec.column).is_none() {
                self.specs.push(spec);
            }
        }
    }

    pub fn clear(&mut self) {
        self.specs.clear();
    }
}

/// Stable multi-key sort of row indices.
///
/// Indices are expected in insertion order; rows comparing equal on every
/// key keep that order. Keys naming unknown columns are ignored.
pub fn sort_indices<R>(rows: &[R], columns: &[Column<R>], sort: &SortState, indices: &mut [usize]) {
    let keys: Vec<(&Column<R>, SortDirection)> = sort
        .specs()
        .iter()
        .filter_map(|spec| {
            columns
                .iter()
                .find(|c| c.id == spec.column)
                .map(|column| (column, spec.direction))
        })
        .collect();

    if keys.is_empty() || indices.len() < 2 {
        return;
    }

    // Read every sort value once instead of on each comparison.
    let values: Vec<Vec<CellValue>> = rows
        .iter()
        .map(|row| keys.iter().map(|(column, _)| column.value(row)).collect())
        .collect();

    indices.sort_by(|&a, &b| {
        for (key, (_, direction)) in keys.iter().enumerate() {
            let ord = values[a][key].cmp(&values[b][key]);
            let ord = match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}
