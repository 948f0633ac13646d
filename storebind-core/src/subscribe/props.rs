//! Configuration and slot arguments for a subscribing node.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::StoreRef;

/// Configuration accepted by a [`Subscribe`](super::Subscribe) node.
///
/// The only option is the ordered list of stores to observe. It defaults
/// to empty.
pub struct SubscribeProps<V, E = std::convert::Infallible> {
    stores: Vec<StoreRef<V, E>>,
}

impl<V, E> SubscribeProps<V, E> {
    /// Props with no stores.
    pub fn new() -> Self {
        Self { stores: Vec::new() }
    }

    /// Append one store.
    pub fn with_store(mut self, store: StoreRef<V, E>) -> Self {
        self.stores.push(store);
        self
    }

    /// Append several stores, keeping their order.
    pub fn with_stores<I>(mut self, stores: I) -> Self
    where
        I: IntoIterator<Item = StoreRef<V, E>>,
    {
        self.stores.extend(stores);
        self
    }

    /// The stores requested for the next evaluation.
    pub fn stores(&self) -> &[StoreRef<V, E>] {
        &self.stores
    }
}

impl<V, E> Default for SubscribeProps<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> Clone for SubscribeProps<V, E> {
    fn clone(&self) -> Self {
        Self {
            stores: self.stores.clone(),
        }
    }
}

impl<V, E> From<Vec<StoreRef<V, E>>> for SubscribeProps<V, E> {
    fn from(stores: Vec<StoreRef<V, E>>) -> Self {
        Self { stores }
    }
}

impl<V, E> fmt::Debug for SubscribeProps<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscribeProps")
            .field("stores", &self.stores)
            .finish()
    }
}

/// The argument passed to the default slot.
///
/// `state` holds one value per requested store, in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotProps<V> {
    pub state: Vec<V>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::MockStore;

    #[test]
    fn props_default_to_no_stores() {
        let props: SubscribeProps<i32> = SubscribeProps::default();
        assert!(props.stores().is_empty());
    }

    #[test]
    fn builder_keeps_store_order() {
        let a = StoreRef::new(MockStore::new(1));
        let b = StoreRef::new(MockStore::new(2));
        let c = StoreRef::new(MockStore::new(3));

        let props = SubscribeProps::new()
            .with_store(a.clone())
            .with_stores(vec![b.clone(), c.clone()]);

        assert_eq!(props.stores(), &[a, b, c]);
    }
}
