//! TableRow trait.

/// Trait for items that can be displayed as rows in a [`Table`](crate::Table).
///
/// # Examples
///
/// ```ignore
/// impl TableRow for User {
///     type Id = i64;
///
///     fn id(&self) -> String { self.id.to_string() }
///     fn native_id(&self) -> Option<i64> { Some(self.id) }
///     fn search_fields(&self) -> Vec<&str> { vec![&self.name, &self.email] }
/// }
/// ```
pub trait TableRow: Send + Sync + Clone + 'static {
    /// The identifier type published to selection observers.
    type Id: Clone + Send + Sync + 'static;

    /// Unique identifier for this row.
    ///
    /// Used for stable selection across filtering, sorting and refreshes.
    fn id(&self) -> String;

    /// The identifier in its native form, if the row has one.
    ///
    /// Rows returning `None` are left out of published selections.
    fn native_id(&self) -> Option<Self::Id>;

    /// Text fields matched by the global search (case-insensitive substring).
    fn search_fields(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Helper: Get selection indicator (checkbox).
    ///
    /// Returns `"■ "` for selected, `"□ "` for unselected.
    fn selection_indicator(selected: bool) -> &'static str {
        if selected { "■ " } else { "□ " }
    }
}
