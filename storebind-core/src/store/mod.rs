//! Stores
//!
//! This module defines what the adapter needs from an observable store and
//! the listener it hands over. Store implementations live elsewhere; anything
//! that can `subscribe`, `unsubscribe` and `get` qualifies.
//!
//! # Concepts
//!
//! ## Store
//!
//! A Store owns a value and a set of listeners. When the value changes, it
//! calls every registered listener. Stores are owned externally and shared
//! through [`StoreRef`] handles.
//!
//! ## Listener
//!
//! A Listener is a callback with a stable identity. One adapter node owns
//! exactly one listener for its whole life, which is what lets a store
//! recognise it on `unsubscribe`.

mod handle;
mod listener;

#[cfg(test)]
pub(crate) mod mock;

pub use handle::{Store, StoreRef};
pub use listener::{Listener, ListenerId};
