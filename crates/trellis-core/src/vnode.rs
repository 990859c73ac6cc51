//! Normalized node tree
//!
//! [`VNode`] has no component variant, so a tree of this type can be handed to
//! the reconciler without further checks.

use crate::value::Value;
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub enum VNode {
    Text(String),
    Element(VElement),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VElement {
    pub tag: String,
    pub props: IndexMap<String, Value>,
    pub key: Option<String>,
    pub children: Vec<VNode>,
}

impl VNode {
    /// Tag used for matching; `None` for text.
    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Text(_) => None,
            VNode::Element(el) => Some(&el.tag),
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            VNode::Text(_) => None,
            VNode::Element(el) => el.key.as_deref(),
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Text(_) => &[],
            VNode::Element(el) => &el.children,
        }
    }

    /// Number of nodes in this subtree, including itself.
    pub fn size(&self) -> usize {
        1 + self.children().iter().map(VNode::size).sum::<usize>()
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            VNode::Text(s) => Some(s),
            VNode::Element(_) => None,
        }
    }
}
