//! Live node surface required by the engine
//!
//! Any environment that can create nodes, read and write their properties and
//! text, and edit child lists can host the reconciler. [`crate::LiveTree`] is
//! the in-memory implementation shipped with this crate.

use crate::error::RenderResult;
use crate::value::Value;
use std::fmt::Debug;

pub trait Host {
    /// Cheap handle to a live node owned by the host.
    type Handle: Copy + Eq + Debug;

    /// Create a detached text node with an empty value.
    fn create_text(&mut self) -> Self::Handle;

    /// Create a detached element with no properties and no children.
    fn create_element(&mut self, tag: &str) -> Self::Handle;

    /// Tag of an element; `None` for text nodes.
    fn tag(&self, node: Self::Handle) -> Option<&str>;

    /// Text value of a text node; `None` for elements.
    fn text(&self, node: Self::Handle) -> Option<&str>;

    fn set_text(&mut self, node: Self::Handle, value: &str);

    fn prop(&self, node: Self::Handle, name: &str) -> Option<&Value>;

    fn set_prop(&mut self, node: Self::Handle, name: &str, value: Value);

    fn remove_prop(&mut self, node: Self::Handle, name: &str);

    fn prop_names(&self, node: Self::Handle) -> Vec<String>;

    /// Identity hint recorded on the node, if any.
    fn key(&self, node: Self::Handle) -> Option<&str>;

    /// Record or clear the identity hint.
    fn set_key(&mut self, node: Self::Handle, key: Option<&str>);

    fn child_count(&self, node: Self::Handle) -> usize;

    fn child_at(&self, node: Self::Handle, index: usize) -> Option<Self::Handle>;

    fn append_child(&mut self, parent: Self::Handle, child: Self::Handle) -> RenderResult<()>;

    /// Insert a detached node so that it ends up at `index`.
    fn insert_child(
        &mut self,
        parent: Self::Handle,
        index: usize,
        child: Self::Handle,
    ) -> RenderResult<()>;

    /// Move an attached child from one position to another within the same parent.
    fn move_child(&mut self, parent: Self::Handle, from: usize, to: usize) -> RenderResult<()>;

    /// Remove and discard the child subtree at `index`.
    fn remove_child(&mut self, parent: Self::Handle, index: usize) -> RenderResult<()>;

    /// Put a detached node at `index`, discarding the subtree that was there.
    fn replace_child(
        &mut self,
        parent: Self::Handle,
        index: usize,
        child: Self::Handle,
    ) -> RenderResult<()>;
}
