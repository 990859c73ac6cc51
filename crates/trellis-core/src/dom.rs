//! In-memory live tree
//!
//! Uses `indextree` as the arena backend. The root element is created with the
//! tree and stands in for a host-owned mount point; everything below it is
//! created by the node factory during render passes.

use crate::error::{RenderError, RenderResult};
use crate::host::Host;
use crate::value::Value;
use crate::vnode::{VElement, VNode};
use indexmap::IndexMap;
use indextree::{Arena, NodeId};
use tracing::warn;

pub type LiveId = NodeId;

const VOID_TAGS: [&str; 6] = ["br", "hr", "img", "input", "link", "meta"];

/// Data stored in each live node.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveData {
    Text(String),
    Element {
        tag: String,
        props: IndexMap<String, Value>,
        key: Option<String>,
    },
}

/// Number of live tree operations performed, by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationCounts {
    pub created: usize,
    pub props_set: usize,
    pub props_removed: usize,
    pub texts_set: usize,
    pub keys_set: usize,
    pub appended: usize,
    pub inserted: usize,
    pub moved: usize,
    pub removed: usize,
    pub replaced: usize,
}

impl MutationCounts {
    pub fn total(&self) -> usize {
        self.created
            + self.props_set
            + self.props_removed
            + self.texts_set
            + self.keys_set
            + self.appended
            + self.inserted
            + self.moved
            + self.removed
            + self.replaced
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug)]
pub struct LiveTree {
    arena: Arena<LiveData>,
    root: LiveId,
    counts: MutationCounts,
}

impl LiveTree {
    /// Create a tree whose root element plays the part of the mount point.
    pub fn new(root_tag: impl Into<String>) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(LiveData::Element {
            tag: root_tag.into(),
            props: IndexMap::new(),
            key: None,
        });
        Self {
            arena,
            root,
            counts: MutationCounts::default(),
        }
    }

    pub fn root(&self) -> LiveId {
        self.root
    }

    pub fn get(&self, id: LiveId) -> Option<&LiveData> {
        self.arena
            .get(id)
            .filter(|_| !id.is_removed(&self.arena))
            .map(|n| n.get())
    }

    fn get_mut(&mut self, id: LiveId) -> Option<&mut LiveData> {
        if id.is_removed(&self.arena) {
            return None;
        }
        self.arena.get_mut(id).map(|n| n.get_mut())
    }

    pub fn children(&self, id: LiveId) -> Vec<LiveId> {
        id.children(&self.arena).collect()
    }

    /// Counts accumulated since the last call, resetting them.
    pub fn take_counts(&mut self) -> MutationCounts {
        std::mem::take(&mut self.counts)
    }

    pub fn counts(&self) -> MutationCounts {
        self.counts
    }

    /// Nodes currently attached under the root, root included.
    pub fn attached_count(&self) -> usize {
        self.root.descendants(&self.arena).count()
    }

    /// First attached node carrying the given identity hint.
    pub fn find_by_key(&self, key: &str) -> Option<LiveId> {
        self.root.descendants(&self.arena).find(|&id| {
            matches!(self.get(id), Some(LiveData::Element { key: Some(k), .. }) if k == key)
        })
    }

    /// Observable shape of a subtree, in the same form as a normalized tree.
    pub fn to_vnode(&self, id: LiveId) -> Option<VNode> {
        match self.get(id)? {
            LiveData::Text(s) => Some(VNode::Text(s.clone())),
            LiveData::Element { tag, props, key } => Some(VNode::Element(VElement {
                tag: tag.clone(),
                props: props.clone(),
                key: key.clone(),
                children: id
                    .children(&self.arena)
                    .filter_map(|c| self.to_vnode(c))
                    .collect(),
            })),
        }
    }

    /// Serialize the whole tree as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(self.root, &mut out);
        out
    }

    fn write_html(&self, id: LiveId, out: &mut String) {
        match self.get(id) {
            None => {}
            Some(LiveData::Text(s)) => out.push_str(&html_escape(s)),
            Some(LiveData::Element { tag, props, key }) => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in props {
                    if value.is_null() || *value == Value::Bool(false) {
                        continue;
                    }
                    out.push(' ');
                    out.push_str(attr_name(name));
                    if *value != Value::Bool(true) {
                        out.push_str("=\"");
                        out.push_str(&html_escape(&value.to_string()));
                        out.push('"');
                    }
                }
                if let Some(key) = key {
                    out.push_str(" data-key=\"");
                    out.push_str(&html_escape(key));
                    out.push('"');
                }
                out.push('>');
                if VOID_TAGS.contains(&tag.as_str()) {
                    return;
                }
                for child in id.children(&self.arena) {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }

    fn child(&self, parent: LiveId, index: usize) -> RenderResult<LiveId> {
        parent.children(&self.arena).nth(index).ok_or_else(|| {
            RenderError::Host(format!("no child at index {index} of {parent:?}"))
        })
    }
}

fn attr_name(prop: &str) -> &str {
    match prop {
        "className" => "class",
        "htmlFor" => "for",
        other => other,
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn node_error(err: indextree::NodeError) -> RenderError {
    RenderError::Host(err.to_string())
}

impl Host for LiveTree {
    type Handle = LiveId;

    fn create_text(&mut self) -> LiveId {
        self.counts.created += 1;
        self.arena.new_node(LiveData::Text(String::new()))
    }

    fn create_element(&mut self, tag: &str) -> LiveId {
        self.counts.created += 1;
        self.arena.new_node(LiveData::Element {
            tag: tag.to_string(),
            props: IndexMap::new(),
            key: None,
        })
    }

    fn tag(&self, node: LiveId) -> Option<&str> {
        match self.get(node)? {
            LiveData::Element { tag, .. } => Some(tag),
            LiveData::Text(_) => None,
        }
    }

    fn text(&self, node: LiveId) -> Option<&str> {
        match self.get(node)? {
            LiveData::Text(s) => Some(s),
            LiveData::Element { .. } => None,
        }
    }

    fn set_text(&mut self, node: LiveId, value: &str) {
        match self.get_mut(node) {
            Some(LiveData::Text(s)) => {
                value.clone_into(s);
                self.counts.texts_set += 1;
            }
            _ => warn!(?node, "set_text on a node that is not a live text node"),
        }
    }

    fn prop(&self, node: LiveId, name: &str) -> Option<&Value> {
        match self.get(node)? {
            LiveData::Element { props, .. } => props.get(name),
            LiveData::Text(_) => None,
        }
    }

    fn set_prop(&mut self, node: LiveId, name: &str, value: Value) {
        match self.get_mut(node) {
            Some(LiveData::Element { props, .. }) => {
                props.insert(name.to_string(), value);
                self.counts.props_set += 1;
            }
            _ => warn!(?node, name, "set_prop on a node that is not a live element"),
        }
    }

    fn remove_prop(&mut self, node: LiveId, name: &str) {
        if let Some(LiveData::Element { props, .. }) = self.get_mut(node) {
            if props.shift_remove(name).is_some() {
                self.counts.props_removed += 1;
            }
        }
    }

    fn prop_names(&self, node: LiveId) -> Vec<String> {
        match self.get(node) {
            Some(LiveData::Element { props, .. }) => props.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn key(&self, node: LiveId) -> Option<&str> {
        match self.get(node)? {
            LiveData::Element { key, .. } => key.as_deref(),
            LiveData::Text(_) => None,
        }
    }

    fn set_key(&mut self, node: LiveId, value: Option<&str>) {
        if let Some(LiveData::Element { key, .. }) = self.get_mut(node) {
            *key = value.map(str::to_string);
            self.counts.keys_set += 1;
        }
    }

    fn child_count(&self, node: LiveId) -> usize {
        node.children(&self.arena).count()
    }

    fn child_at(&self, node: LiveId, index: usize) -> Option<LiveId> {
        node.children(&self.arena).nth(index)
    }

    fn append_child(&mut self, parent: LiveId, child: LiveId) -> RenderResult<()> {
        parent
            .checked_append(child, &mut self.arena)
            .map_err(node_error)?;
        self.counts.appended += 1;
        Ok(())
    }

    fn insert_child(&mut self, parent: LiveId, index: usize, child: LiveId) -> RenderResult<()> {
        match self.child_at(parent, index) {
            Some(anchor) => anchor
                .checked_insert_before(child, &mut self.arena)
                .map_err(node_error)?,
            None if index == self.child_count(parent) => parent
                .checked_append(child, &mut self.arena)
                .map_err(node_error)?,
            None => {
                return Err(RenderError::Host(format!(
                    "insert index {index} out of range for {parent:?}"
                )))
            }
        }
        self.counts.inserted += 1;
        Ok(())
    }

    fn move_child(&mut self, parent: LiveId, from: usize, to: usize) -> RenderResult<()> {
        if from == to {
            return Ok(());
        }
        let node = self.child(parent, from)?;
        node.detach(&mut self.arena);
        match self.child_at(parent, to) {
            Some(anchor) => anchor
                .checked_insert_before(node, &mut self.arena)
                .map_err(node_error)?,
            None => parent
                .checked_append(node, &mut self.arena)
                .map_err(node_error)?,
        }
        self.counts.moved += 1;
        Ok(())
    }

    fn remove_child(&mut self, parent: LiveId, index: usize) -> RenderResult<()> {
        let node = self.child(parent, index)?;
        node.remove_subtree(&mut self.arena);
        self.counts.removed += 1;
        Ok(())
    }

    fn replace_child(&mut self, parent: LiveId, index: usize, child: LiveId) -> RenderResult<()> {
        let old = self.child(parent, index)?;
        old.checked_insert_before(child, &mut self.arena)
            .map_err(node_error)?;
        old.remove_subtree(&mut self.arena);
        self.counts.replaced += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tree_has_only_root() {
        let tree = LiveTree::new("div");
        assert_eq!(tree.attached_count(), 1);
        assert_eq!(tree.tag(tree.root()), Some("div"));
        assert_eq!(tree.to_html(), "<div></div>");
    }

    #[test]
    fn structural_edits_track_positions() {
        let mut tree = LiveTree::new("ul");
        let root = tree.root();
        let a = tree.create_element("li");
        let b = tree.create_element("li");
        let c = tree.create_text();
        tree.append_child(root, a).unwrap();
        tree.append_child(root, b).unwrap();
        tree.insert_child(root, 0, c).unwrap();
        assert_eq!(tree.children(root), vec![c, a, b]);

        tree.move_child(root, 2, 0).unwrap();
        assert_eq!(tree.children(root), vec![b, c, a]);

        let d = tree.create_element("p");
        tree.replace_child(root, 1, d).unwrap();
        assert_eq!(tree.children(root), vec![b, d, a]);
        assert!(tree.get(c).is_none());

        tree.remove_child(root, 0).unwrap();
        assert_eq!(tree.children(root), vec![d, a]);

        let counts = tree.take_counts();
        assert_eq!(counts.created, 4);
        assert_eq!(counts.appended, 2);
        assert_eq!(counts.inserted, 1);
        assert_eq!(counts.moved, 1);
        assert_eq!(counts.replaced, 1);
        assert_eq!(counts.removed, 1);
        assert!(tree.counts().is_empty());
    }

    #[test]
    fn out_of_range_edits_are_host_errors() {
        let mut tree = LiveTree::new("div");
        let root = tree.root();
        let err = tree.remove_child(root, 0).unwrap_err();
        assert_eq!(err.category(), "host");

        let t = tree.create_text();
        assert!(tree.insert_child(root, 3, t).is_err());
    }

    #[test]
    fn html_output_maps_class_and_key() {
        let mut tree = LiveTree::new("div");
        let root = tree.root();
        let img = tree.create_element("img");
        tree.set_prop(img, "className", Value::from("logo"));
        tree.set_prop(img, "hidden", Value::Bool(false));
        tree.set_key(img, Some("1"));
        let t = tree.create_text();
        tree.set_text(t, "a < b");
        tree.append_child(root, img).unwrap();
        tree.append_child(root, t).unwrap();

        assert_eq!(
            tree.to_html(),
            r#"<div><img class="logo" data-key="1">a &lt; b</div>"#
        );
        assert_eq!(tree.find_by_key("1"), Some(img));
    }
}
