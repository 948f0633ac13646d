//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use storebind_core::store::{Listener, Store, StoreRef};

/// Error raised by a [`TestStore`] when told to fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFault(pub &'static str);

impl std::fmt::Display for StoreFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store fault: {}", self.0)
    }
}

impl std::error::Error for StoreFault {}

/// A store that records every call it receives.
///
/// `subscribe` appends without checking for duplicates, so a caller that
/// registers twice is visible in `listener_count`.
pub struct TestStore<T> {
    value: Mutex<T>,
    listeners: Mutex<Vec<Listener>>,
    subscribe_calls: AtomicUsize,
    unsubscribe_calls: AtomicUsize,
    get_calls: AtomicUsize,
    fail_get: AtomicBool,
    fail_unsubscribe: AtomicBool,
}

impl<T: Clone + Send + Sync + 'static> TestStore<T> {
    pub fn new(value: T) -> Arc<Self> {
        Arc::new(Self {
            value: Mutex::new(value),
            listeners: Mutex::new(Vec::new()),
            subscribe_calls: AtomicUsize::new(0),
            unsubscribe_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
            fail_get: AtomicBool::new(false),
            fail_unsubscribe: AtomicBool::new(false),
        })
    }

    /// A handle suitable for `SubscribeProps`.
    pub fn handle(self: &Arc<Self>) -> StoreRef<T, StoreFault> {
        StoreRef::from_arc(Arc::clone(self))
    }

    /// Replace the value and notify every registered listener.
    pub fn set(&self, value: T) {
        *self.value.lock() = value;
        self.notify_all();
    }

    /// Notify every registered listener without changing the value.
    pub fn notify_all(&self) {
        let listeners = self.listeners.lock().clone();
        for listener in listeners {
            listener.notify();
        }
    }

    pub fn listener_count(&self, listener: &Listener) -> usize {
        self.listeners
            .lock()
            .iter()
            .filter(|l| *l == listener)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn registered(&self) -> Vec<Listener> {
        self.listeners.lock().clone()
    }

    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls.load(Ordering::SeqCst)
    }

    pub fn unsubscribe_calls(&self) -> usize {
        self.unsubscribe_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_unsubscribe(&self, fail: bool) {
        self.fail_unsubscribe.store(fail, Ordering::SeqCst);
    }
}

impl<T: Clone + Send + Sync> Store for TestStore<T> {
    type Value = T;
    type Error = StoreFault;

    fn subscribe(&self, listener: &Listener) -> Result<(), StoreFault> {
        self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().push(listener.clone());
        Ok(())
    }

    fn unsubscribe(&self, listener: &Listener) -> Result<(), StoreFault> {
        self.unsubscribe_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_unsubscribe.load(Ordering::SeqCst) {
            return Err(StoreFault("unsubscribe"));
        }
        self.listeners.lock().retain(|l| l != listener);
        Ok(())
    }

    fn get(&self) -> Result<T, StoreFault> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(StoreFault("get"));
        }
        Ok(self.value.lock().clone())
    }
}
