//! Categorical filter over a replaceable option list.

use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::error::TableError;
use crate::row::TableRow;
use crate::state::Table;

/// One choice of a categorical filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Filter key matched against the column's cell keys.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl FilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// An option together with its state in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionStatus {
    pub option: FilterOption,
    /// Whether the option is part of the active filter.
    pub active: bool,
    /// Rows of the full set carrying this option.
    pub count: usize,
}

/// Multi-choice filter bound to one filterable column of a table.
///
/// An optional default seeds the filter at construction; the user can
/// change it freely afterwards and [`reset`](Self::reset) restores it.
/// Clones share the option list, so a list replaced after a refresh is seen
/// by every holder.
#[derive(Debug, Clone)]
pub struct OptionFilter<R: TableRow> {
    table: Table<R>,
    column_id: String,
    options: Arc<RwLock<Vec<FilterOption>>>,
    default: BTreeSet<String>,
}

impl<R: TableRow> OptionFilter<R> {
    /// Bind a filter to a column. Fails if the column has no filter strategy.
    pub fn new(
        table: Table<R>,
        column_id: impl Into<String>,
        options: Vec<FilterOption>,
    ) -> Result<Self, TableError> {
        let column_id = column_id.into();
        match table.column(&column_id) {
            Some(column) if column.filter.is_some() => {}
            Some(_) => return Err(TableError::NotFilterable(column_id)),
            None => return Err(TableError::UnknownColumn(column_id)),
        }
        Ok(Self {
            table,
            column_id,
            options: Arc::new(RwLock::new(options)),
            default: BTreeSet::new(),
        })
    }

    /// Set the default selection and apply it to the table.
    pub fn with_default<I, S>(mut self, values: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default = values.into_iter().map(Into::into).collect();
        self.reset()?;
        Ok(self)
    }

    pub fn column_id(&self) -> &str {
        &self.column_id
    }

    pub fn options(&self) -> Vec<FilterOption> {
        self.options
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the offered options. Active values are left alone, so a
    /// value that is no longer offered keeps filtering until cleared.
    pub fn replace_options(&self, options: Vec<FilterOption>) {
        *self.options.write().unwrap_or_else(PoisonError::into_inner) = options;
    }

    /// The default selection restored by [`reset`](Self::reset).
    pub fn default_values(&self) -> &BTreeSet<String> {
        &self.default
    }

    /// Currently active values.
    pub fn selected(&self) -> BTreeSet<String> {
        self.table.column_filter(&self.column_id)
    }

    pub fn is_selected(&self, value: &str) -> bool {
        self.selected().contains(value)
    }

    /// Returns `true` if the filter narrows the table.
    pub fn is_active(&self) -> bool {
        !self.selected().is_empty()
    }

    /// Add or remove one value. Returns whether it is now active.
    pub fn toggle(&self, value: &str) -> Result<bool, TableError> {
        let mut selected = self.selected();
        let active = if selected.remove(value) {
            false
        } else {
            selected.insert(value.to_string());
            true
        };
        self.table.set_column_filter(&self.column_id, selected)?;
        Ok(active)
    }

    /// Replace the active values.
    pub fn set<I, S>(&self, values: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table.set_column_filter(&self.column_id, values)
    }

    /// Remove the filter entirely.
    pub fn clear(&self) -> Result<(), TableError> {
        self.table.clear_column_filter(&self.column_id)
    }

    /// Restore the default selection.
    pub fn reset(&self) -> Result<(), TableError> {
        self.table
            .set_column_filter(&self.column_id, self.default.iter().cloned())
    }

    /// Every option with its active flag and row count.
    pub fn statuses(&self) -> Result<Vec<OptionStatus>, TableError> {
        let counts = self.table.option_counts(&self.column_id)?;
        let selected = self.selected();
        Ok(self
            .options()
            .into_iter()
            .map(|option| OptionStatus {
                active: selected.contains(&option.value),
                count: counts.get(&option.value).copied().unwrap_or(0),
                option,
            })
            .collect())
    }

    /// Options whose label or value fuzzily matches `query`, best match
    /// first. Ties keep the option order; a blank query returns every option.
    pub fn search(&self, query: &str) -> Vec<FilterOption> {
        let options = self.options();
        if query.trim().is_empty() {
            return options;
        }

        let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
        let mut matcher = Matcher::new(Config::DEFAULT);
        let mut buf = Vec::new();
        let mut ranked = Vec::new();
        for option in options {
            let score = [option.label.as_str(), option.value.as_str()]
                .into_iter()
                .filter_map(|text| pattern.score(Utf32Str::new(text, &mut buf), &mut matcher))
                .max();
            if let Some(score) = score {
                ranked.push((score, option));
            }
        }
        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        ranked.into_iter().map(|(_, option)| option).collect()
    }
}
