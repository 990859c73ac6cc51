//! Declarative render engine
//!
//! Keeps a live node tree in sync with a declarative description without
//! rebuilding it on every change. Key concepts:
//!
//! - **Declarative**: callers describe the whole UI as a [`Node`] tree every pass
//! - **Components**: pure functions from props to nodes, expanded by the [`Normalizer`]
//! - **Reconciliation**: the [`Reconciler`] patches the live tree in place, creating
//!   nodes only where structure grows or a tag changes
//! - **Host-agnostic**: anything implementing [`Host`] can hold the live tree;
//!   [`LiveTree`] is the in-memory one
//!
//! # Architecture
//!
//! ```text
//! State -> view() -> Node tree -> Normalizer -> VNode tree
//!                                                  |
//!                                                  v
//!                        live tree <-- Reconciler (+ factory)
//! ```

mod dom;
mod error;
mod factory;
mod host;
mod node;
mod normalize;
mod reconcile;
mod render;
mod value;
mod vnode;

#[cfg(feature = "test-utils")]
pub mod proptest_strategies;

pub use dom::{LiveData, LiveId, LiveTree, MutationCounts};
pub use error::{ComponentError, RenderError, RenderResult};
pub use factory::create;
pub use host::Host;
pub use node::*;
pub use normalize::Normalizer;
pub use reconcile::{ReconcileStats, Reconciler};
pub use render::{render, Renderer};
pub use value::Value;
pub use vnode::{VElement, VNode};

pub use trellis_config::{MatchStrategy, RenderConfig};
