//! In-crate store double for unit tests.

use std::convert::Infallible;

use parking_lot::Mutex;

use super::{Listener, Store};

/// A store that appends on every `subscribe`, so a careless caller would
/// end up registered twice.
pub(crate) struct MockStore<T> {
    value: Mutex<T>,
    listeners: Mutex<Vec<Listener>>,
}

impl<T: Clone + Send + Sync> MockStore<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value: Mutex::new(value),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn set(&self, value: T) {
        *self.value.lock() = value;
        let listeners = self.listeners.lock().clone();
        for listener in listeners {
            listener.notify();
        }
    }

    pub(crate) fn listener_count(&self, listener: &Listener) -> usize {
        self.listeners
            .lock()
            .iter()
            .filter(|l| *l == listener)
            .count()
    }

    pub(crate) fn total_listeners(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl<T: Clone + Send + Sync> Store for MockStore<T> {
    type Value = T;
    type Error = Infallible;

    fn subscribe(&self, listener: &Listener) -> Result<(), Infallible> {
        self.listeners.lock().push(listener.clone());
        Ok(())
    }

    fn unsubscribe(&self, listener: &Listener) -> Result<(), Infallible> {
        self.listeners.lock().retain(|l| l != listener);
        Ok(())
    }

    fn get(&self) -> Result<T, Infallible> {
        Ok(self.value.lock().clone())
    }
}
