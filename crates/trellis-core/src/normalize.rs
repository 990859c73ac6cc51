//! Resolve declarative trees into primitive ones
//!
//! Components are invoked with their props until only elements and text
//! remain. Composition is chased to any depth up to `max_component_depth`
//! expansions along a single root-to-leaf path, which turns a component that
//! (directly or through an element) renders itself into an error rather than
//! unbounded recursion.

use crate::error::{RenderError, RenderResult};
use crate::node::{ElementNode, Node, RESERVED_PROPS};
use crate::vnode::{VElement, VNode};
use std::borrow::Cow;
use std::collections::HashSet;
use trellis_config::RenderConfig;
use tracing::{trace, warn};

#[derive(Debug, Clone)]
pub struct Normalizer {
    max_depth: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl Normalizer {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.max_component_depth)
    }

    /// Fully resolve `node`, failing on the first malformed node or component error.
    pub fn evaluate(&self, node: &Node) -> RenderResult<VNode> {
        self.evaluate_at(node, 0)
    }

    fn evaluate_at(&self, node: &Node, depth: usize) -> RenderResult<VNode> {
        let mut current = Cow::Borrowed(node);
        let mut depth = depth;
        loop {
            let next = match &*current {
                Node::Text(value) => return Ok(VNode::Text(value.to_string())),
                Node::Element(el) => return self.element(el, depth),
                Node::Component(c) => {
                    depth += 1;
                    if depth > self.max_depth {
                        return Err(RenderError::DepthExceeded {
                            name: c.name.clone(),
                            limit: self.max_depth,
                        });
                    }
                    trace!(component = %c.name, depth, "expanding component");
                    (c.render)(&c.props).map_err(|e| RenderError::component(c.name.clone(), e))?
                }
            };
            current = Cow::Owned(next);
        }
    }

    fn element(&self, el: &ElementNode, depth: usize) -> RenderResult<VNode> {
        validate_kind(&el.kind)?;

        let mut key = el.key.clone();
        let mut props = el.props.clone();
        if let Some(hint) = props.shift_remove("key") {
            key = key.or_else(|| (!hint.is_null()).then(|| hint.to_string()));
        }
        props.retain(|name, _| !RESERVED_PROPS.contains(&name.as_str()));
        if let Some(key) = &key {
            validate_key(key)?;
        }

        let children = el
            .children
            .iter()
            .map(|child| self.evaluate_at(child, depth))
            .collect::<RenderResult<Vec<_>>>()?;
        warn_duplicate_keys(&el.kind, &children);

        Ok(VNode::Element(VElement {
            tag: el.kind.clone(),
            props,
            key,
            children,
        }))
    }
}

fn validate_kind(kind: &str) -> RenderResult<()> {
    if kind.is_empty() {
        return Err(RenderError::malformed("element kind is empty"));
    }
    if let Some(bad) = kind
        .chars()
        .find(|&c| c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '/' | '"' | '\'' | '='))
    {
        return Err(RenderError::malformed(format!(
            "element kind `{kind}` contains {bad:?}"
        )));
    }
    Ok(())
}

fn validate_key(key: &str) -> RenderResult<()> {
    if key.chars().any(char::is_control) {
        return Err(RenderError::malformed(format!(
            "key {key:?} contains control characters"
        )));
    }
    Ok(())
}

fn warn_duplicate_keys(kind: &str, children: &[VNode]) {
    let mut seen = HashSet::new();
    for key in children.iter().filter_map(VNode::key) {
        if !seen.insert(key) {
            warn!(parent = kind, key, "duplicate key among siblings");
        }
    }
}
