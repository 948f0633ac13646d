//! Subscribe Adapter
//!
//! This module implements the adapter node that binds stores to the UI
//! tree: [`Subscribe`], its configuration, and the arguments its slot
//! receives.
//!
//! # Lifecycle
//!
//! A host drives a node through a fixed cycle:
//!
//! 1. `render` (or `evaluate`): subscribe to the requested stores and read
//!    their values.
//! 2. `rendered`: the render was committed; release every store.
//! 3. Repeat from 1 whenever the node's listener requests a re-render.
//! 4. `dispose`: the node is leaving the tree; release every store and stop
//!    reacting to updates.
//!
//! # Invariants
//!
//! After any evaluation, the stores holding this node's listener are exactly
//! the requested stores, each holding it once. After `rendered` or
//! `dispose`, no store holds it.

mod component;
mod error;
mod props;

pub use component::{Slot, Subscribe};
pub use error::SubscribeError;
pub use props::{SlotProps, SubscribeProps};
