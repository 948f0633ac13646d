//! Listener types for store subscriptions.
//!
//! A Listener is the callback a UI node hands to a store. Stores call it
//! whenever their value changes; the node turns that into a re-render request.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Unique identifier for a listener.
///
/// Stores use this ID to recognise a listener they already hold, so that
/// `unsubscribe` removes the right entry no matter which clone is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Generate a new unique listener ID.
    ///
    /// Uses an atomic counter to ensure uniqueness across threads.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

/// A change listener registered on one or more stores.
///
/// Cloning a listener yields the same listener: both clones share the ID and
/// the callback, and compare equal.
#[derive(Clone)]
pub struct Listener {
    id: ListenerId,
    /// Invoked by the store on every change. Shared so stores can keep a
    /// clone without borrowing from the node that created it.
    notify: Arc<dyn Fn() + Send + Sync>,
}

impl Listener {
    /// Create a new listener with the given notification callback.
    pub fn new<F>(notify: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            id: ListenerId::new(),
            notify: Arc::new(notify),
        }
    }

    /// Get the listener's unique ID.
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Notify the listener that a store it watches changed.
    pub fn notify(&self) {
        (self.notify)();
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Listener {}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish()
    }
}
