//! User-visible notifications.

use std::sync::{Arc, Mutex, PoisonError};

/// Toast notification level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// A toast notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Title to display (single line)
    pub title: String,
    /// Optional body text (can be multi-line)
    pub body: Option<String>,
    /// Toast level (affects styling)
    pub level: ToastLevel,
}

impl Toast {
    fn new(title: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            title: title.into(),
            body: None,
            level,
        }
    }

    /// Create a success toast
    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title, ToastLevel::Success)
    }

    /// Create an error toast
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(title, ToastLevel::Error)
    }

    /// Add a body to the toast
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Presentation surface for toasts.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// A notifier that keeps every toast it receives, in order.
///
/// Cheap to clone; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct ToastLog {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All toasts received so far.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove and return every toast received so far.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for ToastLog {
    fn notify(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}
