//! Render Queue
//!
//! A minimal host-side scheduler for re-render requests.
//!
//! # Algorithm
//!
//! 1. A node's listener fires and calls `request_render(node)`.
//! 2. If the node is not yet pending, it is appended to the queue.
//! 3. If it is already pending, the request is coalesced into the existing
//!    entry. It is never dropped.
//! 4. The host calls `drain` when it is ready to render and receives every
//!    pending node exactly once, in first-request order.
//!
//! Coalescing only collapses requests for the same node. Updates to
//! different stores watched by different nodes each produce their own entry.

use std::sync::atomic::{AtomicUsize, Ordering};

use indexmap::IndexSet;
use parking_lot::Mutex;
use tracing::trace;

use super::lifecycle::Invalidate;
use super::node::NodeId;

/// Coalescing queue of nodes waiting to be re-rendered.
#[derive(Debug, Default)]
pub struct RenderQueue {
    /// Pending nodes, in the order they were first requested.
    pending: Mutex<IndexSet<NodeId>>,

    /// Total requests received, including coalesced ones.
    requests: AtomicUsize,
}

impl RenderQueue {
    /// Create a new empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes currently waiting for a render.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Check if no render is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Check if the given node is waiting for a render.
    pub fn is_pending(&self, node: NodeId) -> bool {
        self.pending.lock().contains(&node)
    }

    /// Total number of requests received since creation.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Take every pending node, leaving the queue empty.
    pub fn drain(&self) -> Vec<NodeId> {
        let mut pending = self.pending.lock();
        pending.drain(..).collect()
    }
}

impl Invalidate for RenderQueue {
    fn request_render(&self, node: NodeId) {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if self.pending.lock().insert(node) {
            trace!(%node, "render queued");
        } else {
            trace!(%node, "render request coalesced");
        }
    }
}
