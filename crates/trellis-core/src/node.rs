//! Declarative node description
//!
//! A [`Node`] tree is built fresh for every render pass and consumed by the
//! normalizer. Elements and text are primitive; components are deferred
//! computations that expand into more nodes.

use crate::error::ComponentError;
use crate::value::Value;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use std::fmt;
use std::rc::Rc;

/// Property names that are never written to a live node as plain properties.
pub const RESERVED_PROPS: [&str; 2] = ["children", "key"];

/// Signature of a component function: pure, synchronous, no retained state.
pub type RenderFn = Rc<dyn Fn(&Props) -> Result<Node, ComponentError>>;

#[derive(Debug, Clone)]
pub enum Node {
    Text(Value),
    Element(ElementNode),
    Component(ComponentNode),
}

impl Node {
    pub fn is_component(&self) -> bool {
        matches!(self, Node::Component(_))
    }

    /// Set the identity hint if this is an element; other variants are returned unchanged.
    pub fn with_key(self, key: impl Into<Value>) -> Self {
        match self {
            Node::Element(el) => Node::Element(el.key(key)),
            other => other,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ElementNode {
    pub kind: String,
    pub props: IndexMap<String, Value>,
    pub children: Vec<Node>,
    pub key: Option<String>,
}

impl ElementNode {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Set a property. `key` is routed to the identity hint and `children`
    /// replaces the child list with a single text node.
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match name.as_str() {
            "key" => self.key = (!value.is_null()).then(|| value.to_string()),
            "children" => self.children = vec![Node::Text(value)],
            _ => {
                self.props.insert(name, value);
            }
        }
        self
    }

    pub fn key(mut self, key: impl Into<Value>) -> Self {
        let key = key.into();
        self.key = (!key.is_null()).then(|| key.to_string());
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

#[derive(Clone)]
pub struct ComponentNode {
    pub name: String,
    pub render: RenderFn,
    pub props: Props,
}

impl fmt::Debug for ComponentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentNode")
            .field("name", &self.name)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

impl ComponentNode {
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Prop>) -> Self {
        self.props.insert(name, value);
        self
    }

    /// Attach structured application data, read back with [`Props::get_data`].
    pub fn data(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.props.insert(name, Prop::Data(value));
        self
    }

    /// Append to the `children` entry, promoting a single node to a list on the second call.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        let child = child.into();
        let next = match self.props.0.shift_remove("children") {
            None => Prop::Node(Box::new(child)),
            Some(Prop::Node(first)) => Prop::Nodes(vec![*first, child]),
            Some(Prop::Nodes(mut nodes)) => {
                nodes.push(child);
                Prop::Nodes(nodes)
            }
            Some(_) => Prop::Node(Box::new(child)),
        };
        self.props.insert("children", next);
        self
    }
}

/// A single entry in a component's property mapping.
#[derive(Debug, Clone)]
pub enum Prop {
    Value(Value),
    Data(serde_json::Value),
    Node(Box<Node>),
    Nodes(Vec<Node>),
}

macro_rules! prop_from_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Prop {
                fn from(v: $t) -> Self {
                    Prop::Value(Value::from(v))
                }
            }
        )*
    };
}

prop_from_value!(Value, &str, String, bool, i32, i64, u32, f64);

impl From<serde_json::Value> for Prop {
    fn from(v: serde_json::Value) -> Self {
        Prop::Data(v)
    }
}

impl From<Node> for Prop {
    fn from(n: Node) -> Self {
        Prop::Node(Box::new(n))
    }
}

impl From<Vec<Node>> for Prop {
    fn from(nodes: Vec<Node>) -> Self {
        Prop::Nodes(nodes)
    }
}

/// Ordered property mapping passed to a component function.
#[derive(Debug, Clone, Default)]
pub struct Props(IndexMap<String, Prop>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Prop>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Prop> {
        self.0.get(name)
    }

    pub fn get_value(&self, name: &str) -> Option<&Value> {
        match self.0.get(name)? {
            Prop::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get_value(name).and_then(Value::as_str)
    }

    /// Deserialize a structured entry. Primitive entries are accepted as JSON scalars.
    pub fn get_data<T: DeserializeOwned>(&self, name: &str) -> Result<T, ComponentError> {
        let raw = match self.0.get(name) {
            Some(Prop::Data(v)) => v.clone(),
            Some(Prop::Value(v)) => value_to_json(v),
            Some(_) => {
                return Err(ComponentError::new(format!(
                    "property `{name}` holds nodes, not data"
                )))
            }
            None => serde_json::Value::Null,
        };
        Ok(serde_json::from_value(raw)?)
    }

    /// The `children` entry as a list; a single node is a one-element list.
    pub fn children(&self) -> Vec<Node> {
        match self.0.get("children") {
            Some(Prop::Node(node)) => vec![node.as_ref().clone()],
            Some(Prop::Nodes(nodes)) => nodes.clone(),
            Some(Prop::Value(v)) => vec![Node::Text(v.clone())],
            _ => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Int(i) => serde_json::Value::from(*i),
        Value::Float(x) => serde_json::Value::from(*x),
        Value::Str(s) => serde_json::Value::String(s.clone()),
    }
}

impl From<ElementNode> for Node {
    fn from(el: ElementNode) -> Self {
        Node::Element(el)
    }
}

impl From<ComponentNode> for Node {
    fn from(c: ComponentNode) -> Self {
        Node::Component(c)
    }
}

impl From<Value> for Node {
    fn from(v: Value) -> Self {
        Node::Text(v)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(Value::from(s))
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(Value::Str(s))
    }
}

impl From<f64> for Node {
    fn from(x: f64) -> Self {
        Node::Text(Value::Float(x))
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Text(Value::Int(i))
    }
}

pub fn element(kind: impl Into<String>) -> ElementNode {
    ElementNode::new(kind)
}

pub fn text(value: impl Into<Value>) -> Node {
    Node::Text(value.into())
}

pub fn component<F>(name: impl Into<String>, render: F) -> ComponentNode
where
    F: Fn(&Props) -> Result<Node, ComponentError> + 'static,
{
    ComponentNode {
        name: name.into(),
        render: Rc::new(render),
        props: Props::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn reserved_props_are_routed() {
        let el = element("article").prop("className", "lot").prop("key", 2);

        assert_eq!(el.key.as_deref(), Some("2"));
        assert!(!el.props.contains_key("key"));
        assert_eq!(el.props.get("className"), Some(&Value::from("lot")));
    }

    #[test]
    fn component_children_promote_to_list() {
        let single = component("Block", |p| Ok(p.children().remove(0))).child("a");
        assert!(matches!(single.props.get("children"), Some(Prop::Node(_))));
        assert_eq!(single.props.children().len(), 1);

        let many = single.child("b");
        assert!(matches!(many.props.get("children"), Some(Prop::Nodes(_))));
        assert_eq!(many.props.children().len(), 2);
    }

    #[test]
    fn data_props_deserialize() {
        #[derive(Deserialize)]
        struct Lot {
            name: String,
            price: f64,
        }

        let c = component("Lot", |_| Ok(text(""))).data(
            "lot",
            serde_json::json!({ "name": "Apple", "price": 4.99 }),
        );
        let lot: Lot = c.props.get_data("lot").unwrap();
        assert_eq!(lot.name, "Apple");
        assert_eq!(lot.price, 4.99);

        let missing: Option<Lot> = c.props.get_data("other").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn with_key_only_touches_elements() {
        let keyed = Node::from(element("li")).with_key("a");
        assert!(matches!(keyed, Node::Element(ref el) if el.key.as_deref() == Some("a")));
        assert!(matches!(text("x").with_key("a"), Node::Text(_)));
    }
}
