//! Store Capability and Handles
//!
//! Any type that can attach a listener, detach it again, and report its
//! current value is a store. The adapter never owns the store's state; it
//! only holds shared handles and moves its listener on and off.
//!
//! # Identity
//!
//! Two [`StoreRef`]s are equal when they point at the same allocation. This
//! is what "the same store" means to a subscription list: value equality of
//! the store's contents plays no part.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use super::listener::Listener;

/// The capability set a store must expose.
///
/// # Contract
///
/// - `unsubscribe` with a listener that is not registered is a no-op.
/// - `subscribe` with a listener that is already registered need not be
///   idempotent; the adapter always unsubscribes before subscribing.
/// - Errors are returned to the caller untouched. Stores that cannot fail
///   use [`Infallible`].
pub trait Store: Send + Sync {
    /// The value reported by [`Store::get`].
    type Value;

    /// Error raised when the store violates its own contract.
    type Error;

    /// Register a listener to be called on every change.
    fn subscribe(&self, listener: &Listener) -> Result<(), Self::Error>;

    /// Remove a previously registered listener.
    fn unsubscribe(&self, listener: &Listener) -> Result<(), Self::Error>;

    /// Read the current value.
    fn get(&self) -> Result<Self::Value, Self::Error>;
}

/// Shared, identity-comparable handle to a store.
///
/// # Example
///
/// ```rust,ignore
/// let store = Arc::new(CounterStore::new(5));
/// let handle = StoreRef::from_arc(store.clone());
///
/// assert_eq!(handle, StoreRef::from_arc(store));
/// ```
pub struct StoreRef<V, E = Infallible> {
    inner: Arc<dyn Store<Value = V, Error = E>>,
}

impl<V: 'static, E: 'static> StoreRef<V, E> {
    /// Wrap a store in a fresh handle.
    pub fn new<S>(store: S) -> Self
    where
        S: Store<Value = V, Error = E> + 'static,
    {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wrap an already shared store.
    ///
    /// Handles made from clones of the same `Arc` compare equal.
    pub fn from_arc<S>(store: Arc<S>) -> Self
    where
        S: Store<Value = V, Error = E> + 'static,
    {
        Self { inner: store }
    }
}

impl<V, E> StoreRef<V, E> {
    /// Check whether two handles refer to the same store.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.inner) as *const ()
    }

    /// Register a listener on the underlying store.
    pub fn subscribe(&self, listener: &Listener) -> Result<(), E> {
        self.inner.subscribe(listener)
    }

    /// Remove a listener from the underlying store.
    pub fn unsubscribe(&self, listener: &Listener) -> Result<(), E> {
        self.inner.unsubscribe(listener)
    }

    /// Read the underlying store's current value.
    pub fn get(&self) -> Result<V, E> {
        self.inner.get()
    }
}

impl<V, E> Clone for StoreRef<V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, E> PartialEq for StoreRef<V, E> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<V, E> Eq for StoreRef<V, E> {}

impl<V, E> fmt::Debug for StoreRef<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreRef").field("addr", &self.addr()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::MockStore;

    #[test]
    fn handles_to_the_same_store_are_equal() {
        let store = Arc::new(MockStore::new(1));
        let a = StoreRef::from_arc(store.clone());
        let b = StoreRef::from_arc(store);
        let c = StoreRef::new(MockStore::new(1));

        assert_eq!(a, b);
        assert_eq!(a, a.clone());
        assert_ne!(a, c);
    }

    #[test]
    fn handle_delegates_to_store() {
        let store = Arc::new(MockStore::new(7));
        let handle = StoreRef::from_arc(store.clone());
        let listener = Listener::new(|| {});

        handle.subscribe(&listener).unwrap();
        assert_eq!(store.listener_count(&listener), 1);
        assert_eq!(handle.get().unwrap(), 7);

        handle.unsubscribe(&listener).unwrap();
        assert_eq!(store.listener_count(&listener), 0);
    }
}
