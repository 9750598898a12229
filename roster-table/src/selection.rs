//! Selection state management.
//!
//! Selection uses string IDs for stability across filtering, sorting and
//! row refreshes. Visibility never affects it: a row hidden by a filter
//! stays selected.

use std::collections::HashSet;

/// ID-based multi-selection state.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    /// Currently selected IDs
    selected: HashSet<String>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<String> {
        self.selected.drain().collect()
    }

    /// Toggle selection of an ID.
    /// Returns (added, removed) IDs.
    pub fn toggle(&mut self, id: &str) -> (Vec<String>, Vec<String>) {
        if self.selected.remove(id) {
            (vec![], vec![id.to_string()])
        } else {
            self.selected.insert(id.to_string());
            (vec![id.to_string()], vec![])
        }
    }

    /// Set the selection state of one ID.
    /// Returns `true` if the selection changed.
    pub fn set(&mut self, id: &str, selected: bool) -> bool {
        if selected {
            self.selected.insert(id.to_string())
        } else {
            self.selected.remove(id)
        }
    }

    /// Add every given ID to the selection.
    /// Returns the IDs that were newly selected.
    pub fn select_all(&mut self, ids: &[String]) -> Vec<String> {
        ids.iter()
            .filter(|id| self.selected.insert((*id).clone()))
            .cloned()
            .collect()
    }

    /// Keep only the IDs for which `keep` returns true.
    /// Returns the IDs that were dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) -> Vec<String> {
        let removed: Vec<String> = self
            .selected
            .iter()
            .filter(|id| !keep(id.as_str()))
            .cloned()
            .collect();
        for id in &removed {
            self.selected.remove(id);
        }
        removed
    }
}
