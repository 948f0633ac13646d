//! View Output
//!
//! Render callbacks return [`Children`]: either a single [`VNode`] or a
//! sequence of them. Both serialize to JSON so a remote host can consume
//! the rendered tree.

mod vnode;

pub use vnode::{Children, VNode};
