//! Host-facing seams.
//!
//! The host engine talks to mounted nodes through two small traits: nodes ask
//! for re-renders through [`Invalidate`], and the host reports render and
//! teardown events through [`Lifecycle`].

use super::node::NodeId;

/// Something that accepts re-render requests.
///
/// Implementations must tolerate being called many times for the same node
/// before they get around to rendering it; coalescing is theirs to do.
///
/// # Re-entrancy
///
/// A request may arrive while the node is inside `evaluate`, `rendered` or
/// `dispose`, for instance from a store that notifies during `subscribe`.
/// Implementations must not re-enter the requesting node synchronously: the
/// node holds its subscription lock across store calls, and that lock is not
/// re-entrant. Record the request and render later, as [`RenderQueue`] does.
///
/// [`RenderQueue`]: super::RenderQueue
pub trait Invalidate: Send + Sync {
    /// Ask the host to re-render `node` and re-run its render callback.
    fn request_render(&self, node: NodeId);
}

impl<F> Invalidate for F
where
    F: Fn(NodeId) + Send + Sync,
{
    fn request_render(&self, node: NodeId) {
        self(node)
    }
}

/// Lifecycle hooks a host invokes on a mounted node.
///
/// For each render the host calls [`Lifecycle::rendered`] once, after the
/// render completes. [`Lifecycle::before_destroy`] is called once, when the
/// node is about to be removed for good, and nothing follows it.
pub trait Lifecycle {
    /// Error raised by a failing hook.
    type Error;

    /// The render pass has been committed.
    fn rendered(&self) -> Result<(), Self::Error>;

    /// The node is about to be removed permanently.
    fn before_destroy(&self) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn closures_accept_render_requests() {
        let seen = Mutex::new(Vec::new());
        let invalidate = |node: NodeId| seen.lock().push(node);

        let node = NodeId::new();
        invalidate.request_render(node);
        invalidate.request_render(node);

        assert_eq!(*seen.lock(), vec![node, node]);
    }
}
