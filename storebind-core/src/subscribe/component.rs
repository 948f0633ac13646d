//! Subscribe Node Implementation
//!
//! A `Subscribe` node observes a list of stores on behalf of a part of the
//! UI tree and renders their current values through a caller-supplied slot.
//!
//! # How Subscribe Works
//!
//! 1. On every evaluation, the node first releases every store it still
//!    holds a listener on.
//!
//! 2. It then walks the requested stores in order. For each one it
//!    unsubscribes, subscribes again, records the store and reads its value.
//!
//! 3. When a store notifies, the listener asks the host for a re-render.
//!
//! 4. After each committed render, and once more before destruction, the
//!    node releases every recorded store.
//!
//! # Listener Churn
//!
//! Step 2 detaches and reattaches even when the store set did not change.
//! A store that registered an earlier copy of the listener, or that appears
//! twice in the request, still ends up with exactly one registration.
//!
//! # Disposal
//!
//! Disposal is terminal. It releases every store, makes the listener inert,
//! and rejects any later evaluation. Dropping a node releases whatever is
//! still recorded, including stores a failed disposal left behind.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use super::error::SubscribeError;
use super::props::{SlotProps, SubscribeProps};
use crate::host::{Invalidate, Lifecycle, NodeId};
use crate::store::{Listener, StoreRef};
use crate::view::{Children, VNode};

/// The render callback invoked with the subscribed state.
pub type Slot<V> = Arc<dyn Fn(&SlotProps<V>) -> Children + Send + Sync>;

/// Inline capacity of the subscription list.
const INLINE_STORES: usize = 4;

type Subscriptions<V, E> = SmallVec<[StoreRef<V, E>; INLINE_STORES]>;

/// A UI node that subscribes to a list of stores and renders their values.
///
/// # Type Parameters
///
/// - `V`: The value type reported by the stores.
/// - `E`: The stores' error type. Defaults to `Infallible`.
///
/// # Example
///
/// ```rust,ignore
/// let queue = Arc::new(RenderQueue::new());
/// let node = Subscribe::new(SubscribeProps::new().with_store(count), queue.clone())
///     .with_slot(|props: &SlotProps<i32>| VNode::text(format!("{}", props.state[0])));
///
/// let tree = node.render()?;  // subscribes, reads, renders
/// node.rendered()?;           // render committed, releases listeners
/// node.dispose()?;            // removed from the tree
/// ```
pub struct Subscribe<V, E = std::convert::Infallible> {
    /// Identity reported with every re-render request.
    id: NodeId,

    /// The requested stores.
    props: SubscribeProps<V, E>,

    /// The default slot, if one was supplied.
    slot: Option<Slot<V>>,

    /// The one listener this node registers on stores (`onUpdate`).
    listener: Listener,

    /// Stores currently believed to hold `listener`.
    subscriptions: Mutex<Subscriptions<V, E>>,

    /// Set once the node has been disposed. Shared with the listener.
    disposed: Arc<AtomicBool>,
}

impl<V: 'static, E: 'static> Subscribe<V, E> {
    /// Create a new node that reports re-render requests to `host`.
    ///
    /// No store is touched until the first evaluation.
    pub fn new(props: SubscribeProps<V, E>, host: Arc<dyn Invalidate>) -> Self {
        let id = NodeId::new();
        let disposed = Arc::new(AtomicBool::new(false));

        let listener = {
            let disposed = Arc::clone(&disposed);
            Listener::new(move || {
                if disposed.load(Ordering::SeqCst) {
                    trace!(node = %id, "ignoring update for disposed node");
                    return;
                }
                host.request_render(id);
            })
        };

        Self {
            id,
            props,
            slot: None,
            listener,
            subscriptions: Mutex::new(SmallVec::new()),
            disposed,
        }
    }

    /// Supply the default slot.
    pub fn with_slot<F, C>(mut self, slot: F) -> Self
    where
        F: Fn(&SlotProps<V>) -> C + Send + Sync + 'static,
        C: Into<Children> + 'static,
    {
        self.set_slot(slot);
        self
    }

    /// Replace the default slot.
    pub fn set_slot<F, C>(&mut self, slot: F)
    where
        F: Fn(&SlotProps<V>) -> C + Send + Sync + 'static,
        C: Into<Children> + 'static,
    {
        self.slot = Some(Arc::new(move |props: &SlotProps<V>| -> Children {
            slot(props).into()
        }));
    }

    /// Get the node's ID.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the listener this node registers on stores.
    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    /// Get the current configuration.
    pub fn props(&self) -> &SubscribeProps<V, E> {
        &self.props
    }

    /// Replace the requested stores.
    ///
    /// Stores are not touched here. The next evaluation releases whatever is
    /// no longer requested.
    pub fn set_stores(&mut self, stores: impl Into<SubscribeProps<V, E>>) {
        self.props = stores.into();
    }

    /// Snapshot of the stores currently holding this node's listener.
    pub fn subscriptions(&self) -> Vec<StoreRef<V, E>> {
        self.subscriptions.lock().to_vec()
    }

    /// Number of stores currently holding this node's listener.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.lock().len()
    }

    /// Check if the node has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Subscribe to every requested store and read their values.
    ///
    /// Returns one value per requested store, in request order. Afterwards
    /// the subscription list equals the requested stores and no other store
    /// holds this node's listener.
    pub fn evaluate(&self) -> Result<Vec<V>, SubscribeError<E>> {
        if self.is_disposed() {
            return Err(SubscribeError::Disposed);
        }

        let mut subscriptions = self.subscriptions.lock();
        // A concurrent dispose may have landed before the lock was taken.
        if self.is_disposed() {
            return Err(SubscribeError::Disposed);
        }
        self.release(&mut subscriptions)
            .map_err(SubscribeError::Store)?;

        let stores = self.props.stores();
        let mut state = Vec::with_capacity(stores.len());

        for store in stores {
            store
                .unsubscribe(&self.listener)
                .map_err(SubscribeError::Store)?;
            store
                .subscribe(&self.listener)
                .map_err(SubscribeError::Store)?;
            subscriptions.push(store.clone());
            trace!(node = %self.id, listener = %self.listener.id(), "attached to store");

            state.push(store.get().map_err(SubscribeError::Store)?);
        }

        debug!(node = %self.id, stores = state.len(), "evaluated subscribed state");
        Ok(state)
    }

    /// Evaluate and pass the state to the default slot.
    ///
    /// The slot's children are wrapped in a single `div`. A missing slot is
    /// reported after the stores have been evaluated.
    pub fn render(&self) -> Result<VNode, SubscribeError<E>> {
        let state = self.evaluate()?;
        let slot = self.slot.as_ref().ok_or(SubscribeError::MissingSlot)?;
        let children = slot(&SlotProps { state });

        Ok(VNode::element("div", children))
    }

    /// Invoke the listener as a store would.
    pub fn on_update(&self) {
        self.listener.notify();
    }

    /// Post-render cleanup: release every recorded store.
    pub fn rendered(&self) -> Result<(), SubscribeError<E>> {
        let mut subscriptions = self.subscriptions.lock();
        self.release(&mut subscriptions)
            .map_err(SubscribeError::Store)
    }

    /// Permanently retire the node, releasing every recorded store.
    ///
    /// Calling this again retries any store a failed disposal could not
    /// release, and is otherwise a no-op.
    pub fn dispose(&self) -> Result<(), SubscribeError<E>> {
        let already_disposed = self.disposed.swap(true, Ordering::SeqCst);

        let mut subscriptions = self.subscriptions.lock();
        if already_disposed && subscriptions.is_empty() {
            return Ok(());
        }

        let held = subscriptions.len();
        self.release(&mut subscriptions)
            .map_err(SubscribeError::Store)?;

        debug!(node = %self.id, released = held, "disposed node");
        Ok(())
    }

    /// Unsubscribe from every store in `subscriptions`, front to back.
    ///
    /// Stores released before a failure are removed from the list; the
    /// failing store and everything after it stay recorded.
    fn release(&self, subscriptions: &mut Subscriptions<V, E>) -> Result<(), E> {
        let mut released = 0;
        let result = subscriptions.iter().try_for_each(|store| {
            store.unsubscribe(&self.listener)?;
            released += 1;
            Ok(())
        });

        subscriptions.drain(..released);
        if released > 0 {
            trace!(node = %self.id, released, "released stores");
        }
        result
    }
}

impl<V: 'static, E: 'static> Lifecycle for Subscribe<V, E> {
    type Error = SubscribeError<E>;

    fn rendered(&self) -> Result<(), Self::Error> {
        Subscribe::rendered(self)
    }

    fn before_destroy(&self) -> Result<(), Self::Error> {
        self.dispose()
    }
}

impl<V, E> Drop for Subscribe<V, E> {
    fn drop(&mut self) {
        self.disposed.store(true, Ordering::SeqCst);

        // Also covers stores left behind by a failed `dispose`.
        let subscriptions = self.subscriptions.get_mut();
        if subscriptions.is_empty() {
            return;
        }

        let held = subscriptions.len();
        let mut failed = 0;
        for store in subscriptions.drain(..) {
            if store.unsubscribe(&self.listener).is_err() {
                failed += 1;
            }
        }

        if failed > 0 {
            warn!(node = %self.id, held, failed, "store rejected unsubscribe while dropping node");
        }
    }
}

impl<V: 'static, E: 'static> fmt::Debug for Subscribe<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribe")
            .field("id", &self.id)
            .field("stores", &self.props.stores().len())
            .field("subscriptions", &self.subscription_count())
            .field("has_slot", &self.slot.is_some())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
