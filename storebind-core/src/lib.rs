//! Storebind Core
//!
//! This crate binds framework-agnostic observable stores to nodes of a
//! component-based UI tree. It implements:
//!
//! - The `Subscribe` adapter node (render-prop style)
//! - Subscription lifecycle management across re-renders and disposal
//! - The host seams for re-render requests and lifecycle hooks
//! - Serializable render output
//!
//! The crate is designed to be used both as a native Rust library and, with
//! the `python` feature, as a Python extension module via PyO3.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `store`: The store capability trait, store handles and listeners
//! - `host`: Node identity, re-render requests and lifecycle hooks
//! - `view`: Virtual nodes returned by render callbacks
//! - `subscribe`: The adapter node itself
//!
//! # Example
//!
//! ```rust,ignore
//! use storebind_core::host::RenderQueue;
//! use storebind_core::subscribe::{SlotProps, Subscribe, SubscribeProps};
//! use storebind_core::view::VNode;
//!
//! let queue = Arc::new(RenderQueue::new());
//! let node = Subscribe::new(SubscribeProps::new().with_store(count), queue.clone())
//!     .with_slot(|props: &SlotProps<i32>| VNode::text(format!("Count: {}", props.state[0])));
//!
//! let tree = node.render()?;
//! node.rendered()?;
//!
//! // Later, a store changes and queues the node for another render.
//! for id in queue.drain() {
//!     // re-render `id`
//! }
//! ```

pub mod host;
pub mod store;
pub mod subscribe;
pub mod view;

#[cfg(feature = "python")]
pub mod python;

/// Python module definition.
///
/// This function is called by Python when importing the module.
/// It registers all Python-exposed types.
#[cfg(feature = "python")]
#[pyo3::pymodule]
fn _core(m: &pyo3::Bound<'_, pyo3::types::PyModule>) -> pyo3::PyResult<()> {
    use pyo3::prelude::*;

    m.add_class::<python::PySubscribe>()?;
    m.add_class::<python::PyListener>()?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
