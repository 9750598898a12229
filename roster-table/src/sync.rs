//! Selection synchronizer.
//!
//! A table republishes its selection to observers whenever the selection set
//! changes. Observers receive a snapshot of the selected rows' native ids in
//! row insertion order, hidden rows included. Snapshots arrive in the order
//! the changes were applied, even when clones of a table are mutated from
//! several threads. Observers run after the state lock is released but
//! while the table's publishing guard is held, so they may read the table
//! and must not change its selection.

use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Receives selection snapshots from a table.
pub trait SelectionObserver<Id>: Send + Sync {
    fn selection_changed(&self, ids: &[Id]);
}

impl<Id, F> SelectionObserver<Id> for F
where
    F: Fn(&[Id]) + Send + Sync,
{
    fn selection_changed(&self, ids: &[Id]) {
        self(ids)
    }
}

/// Handle returned by [`Table::subscribe`](crate::Table::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

impl SubscriptionId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

/// Shared holder of the latest published selection.
///
/// Subscribe it to a table and hand clones to whoever acts on the
/// selection (bulk actions, enabled state of buttons).
#[derive(Debug)]
pub struct SelectedIds<Id> {
    ids: Arc<RwLock<Vec<Id>>>,
    revision: Arc<AtomicUsize>,
}

impl<Id: Clone> SelectedIds<Id> {
    pub fn new() -> Self {
        Self {
            ids: Arc::new(RwLock::new(Vec::new())),
            revision: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The latest published ids.
    pub fn get(&self) -> Vec<Id> {
        self.ids.read().map(|ids| ids.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.ids.read().map(|ids| ids.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of snapshots received so far.
    pub fn revision(&self) -> usize {
        self.revision.load(Ordering::SeqCst)
    }
}

impl<Id: Clone> Default for SelectedIds<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id> Clone for SelectedIds<Id> {
    fn clone(&self) -> Self {
        Self {
            ids: Arc::clone(&self.ids),
            revision: Arc::clone(&self.revision),
        }
    }
}

impl<Id: Clone + Send + Sync> SelectionObserver<Id> for SelectedIds<Id> {
    fn selection_changed(&self, ids: &[Id]) {
        if let Ok(mut guard) = self.ids.write() {
            *guard = ids.to_vec();
        }
        self.revision.fetch_add(1, Ordering::SeqCst);
    }
}
