//! Host Interface
//!
//! The adapter is embedded in a UI engine it does not control. This module
//! holds the small surface the two share.
//!
//! # Overview
//!
//! - [`NodeId`] names a mounted node.
//! - [`Invalidate`] is how a node asks to be rendered again. It is
//!   implemented for plain closures and by [`RenderQueue`].
//! - [`Lifecycle`] is how the host tells a node that a render was committed
//!   or that it is about to be destroyed.
//!
//! # Ordering
//!
//! The host guarantees single-threaded lifecycle delivery: `rendered` after
//! each completed render, then at most one `before_destroy`, which is
//! terminal. Re-render requests may arrive from any thread at any time.

mod lifecycle;
mod node;
mod queue;

pub use lifecycle::{Invalidate, Lifecycle};
pub use node::NodeId;
pub use queue::RenderQueue;
