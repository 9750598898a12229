//! Column definitions and cell values.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// The typed value a column reads out of a row.
///
/// Values are totally ordered so columns can be sorted without knowing the
/// row type: `Empty < Integer < Text < List`, integers numerically, text
/// case-insensitively (exact comparison breaks ties), lists element-wise.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Integer(i64),
    Text(String),
    List(Vec<String>),
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Integer(_) => 1,
            CellValue::Text(_) => 2,
            CellValue::List(_) => 3,
        }
    }

    /// The filterable keys of this value: one for scalars, one per element
    /// for lists, none when empty.
    pub fn keys(&self) -> Vec<String> {
        match self {
            CellValue::Empty => Vec::new(),
            CellValue::Integer(n) => vec![n.to_string()],
            CellValue::Text(text) => vec![text.clone()],
            CellValue::List(items) => items.clone(),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Integer(a), CellValue::Integer(b)) => a.cmp(b),
            (CellValue::Text(a), CellValue::Text(b)) => compare_text(a, b),
            (CellValue::List(a), CellValue::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    let ord = compare_text(x, y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Integer(n) => write!(f, "{}", n),
            CellValue::Text(text) => f.write_str(text),
            CellValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<Vec<String>> for CellValue {
    fn from(value: Vec<String>) -> Self {
        CellValue::List(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// How a column's active filter values are matched against a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterStrategy {
    /// Keep the row if its cell equals one of the active values.
    Equals,
    /// Keep the row if any element of its list cell is an active value.
    Intersects,
}

/// Reads a typed value out of a row.
pub type Accessor<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

/// Renders a row's cell as display text.
pub type Renderer<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Column configuration.
///
/// Columns define the structure of the table: an id used by sort and filter
/// state, header text, width, alignment, whether the column is sortable and
/// which filter strategy applies to it.
///
/// # Examples
///
/// ```ignore
/// let columns = vec![
///     Column::new("id", "ID", 6, |m: &Member| m.id.clone().into()),
///     Column::new("name", "Name", 24, |m: &Member| m.full_name.clone().into()).sortable(),
///     Column::new("role", "Role", 10, |m: &Member| m.role.as_str().into())
///         .filter(FilterStrategy::Equals),
/// ];
/// ```
pub struct Column<R> {
    /// Stable column identifier
    pub id: String,
    /// Column header text
    pub header: String,
    /// Column width in terminal columns (fixed)
    pub width: u16,
    /// Horizontal alignment
    pub align: Alignment,
    /// Whether this column is sortable
    pub sortable: bool,
    /// Filter strategy, if the column can be filtered
    pub filter: Option<FilterStrategy>,
    accessor: Accessor<R>,
    renderer: Option<Renderer<R>>,
}

impl<R> Column<R> {
    /// Create a new column with explicit width and a value accessor.
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        width: u16,
        accessor: impl Fn(&R) -> CellValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            width,
            align: Alignment::Left,
            sortable: false,
            filter: None,
            accessor: Arc::new(accessor),
            renderer: None,
        }
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Make the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Make the column filterable with the given strategy.
    pub fn filter(mut self, strategy: FilterStrategy) -> Self {
        self.filter = Some(strategy);
        self
    }

    /// Use a custom renderer for the cell text.
    pub fn render(mut self, renderer: impl Fn(&R) -> String + Send + Sync + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Read the typed value of this column from a row.
    pub fn value(&self, row: &R) -> CellValue {
        (self.accessor)(row)
    }

    /// The display text of this column for a row.
    pub fn display(&self, row: &R) -> String {
        match &self.renderer {
            Some(render) => render(row),
            None => self.value(row).to_string(),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            width: self.width,
            align: self.align,
            sortable: self.sortable,
            filter: self.filter,
            accessor: Arc::clone(&self.accessor),
            renderer: self.renderer.clone(),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .field("filter", &self.filter)
            .field("custom_render", &self.renderer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_orders_case_insensitively() {
        let mut values = vec![
            CellValue::from("bob"),
            CellValue::from("Alice"),
            CellValue::from("alice"),
            CellValue::from(3i64),
            CellValue::Empty,
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                CellValue::Empty,
                CellValue::Integer(3),
                CellValue::from("Alice"),
                CellValue::from("alice"),
                CellValue::from("bob"),
            ]
        );
    }

    #[test]
    fn custom_renderer_wins_over_value() {
        let column = Column::new("n", "N", 4, |n: &i64| CellValue::Integer(*n))
            .render(|n| format!("#{}", n));
        assert_eq!(column.value(&7), CellValue::Integer(7));
        assert_eq!(column.display(&7), "#7");
    }
}
