//! Errors surfaced by the adapter.

use thiserror::Error;

/// Failure while evaluating, rendering, or cleaning up a node.
///
/// `E` is the store's own error type and comes back exactly as the store
/// raised it.
#[derive(Debug, Error)]
pub enum SubscribeError<E> {
    /// A store call failed.
    #[error(transparent)]
    Store(E),

    /// Render was requested but no default slot was supplied.
    #[error("no default slot was supplied to render the subscribed state")]
    MissingSlot,

    /// The node was used after it was disposed.
    #[error("node was used after it was disposed")]
    Disposed,
}

impl<E> SubscribeError<E> {
    /// Get the store error, if this came from a store.
    pub fn store_error(&self) -> Option<&E> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }

    /// Take the store error, if this came from a store.
    pub fn into_store_error(self) -> Option<E> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}
