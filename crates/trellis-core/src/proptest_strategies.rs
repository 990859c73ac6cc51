//! Proptest strategies for reconciliation property tests
//!
//! Provides reusable generators for declarative trees, keyed lists and
//! component wrappers.

use crate::error::ComponentError;
use crate::node::*;
use crate::value::Value;
use proptest::prelude::*;

/// Small tag alphabet so that successive trees often share tags.
pub fn arb_tag() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => Just("div".to_string()),
        2 => Just("span".to_string()),
        2 => Just("p".to_string()),
        1 => Just("article".to_string()),
        1 => Just("h1".to_string()),
    ]
}

/// Short ASCII words, occasionally empty.
pub fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9]{0,8}", 0..4).prop_map(|words| words.join(" "))
}

/// Primitive values, NaN included.
pub fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        6 => arb_text().prop_map(Value::Str),
        2 => (-1000i64..1000).prop_map(Value::Int),
        2 => (-1000.0f64..1000.0).prop_map(Value::Float),
        1 => Just(Value::Float(f64::NAN)),
        2 => any::<bool>().prop_map(Value::Bool),
    ]
}

/// Zero to three properties from a fixed name set.
pub fn arb_props() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec(
        (
            prop_oneof![
                Just("className".to_string()),
                Just("title".to_string()),
                Just("id".to_string()),
            ],
            arb_value(),
        ),
        0..3,
    )
}

/// Text node generator
pub fn arb_text_node() -> impl Strategy<Value = Node> {
    prop_oneof![
        3 => arb_text().prop_map(text),
        1 => (-100i64..100).prop_map(text),
    ]
}

/// Component that renders its only child unchanged.
pub fn passthrough(child: Node) -> Node {
    component("Passthrough", |props: &Props| {
        props
            .children()
            .into_iter()
            .next()
            .ok_or_else(|| ComponentError::new("passthrough needs a child"))
    })
    .child(child)
    .into()
}

fn build_element(tag: String, props: Vec<(String, Value)>, children: Vec<Node>) -> Node {
    props
        .into_iter()
        .fold(element(tag), |el, (name, value)| el.prop(name, value))
        .children(children)
        .into()
}

/// Declarative trees up to four levels deep, mixing elements, text and
/// component wrappers. No keys.
pub fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        2 => arb_text_node(),
        1 => (arb_tag(), arb_props()).prop_map(|(tag, props)| build_element(tag, props, vec![])),
    ];
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            4 => (arb_tag(), arb_props(), prop::collection::vec(inner.clone(), 0..5))
                .prop_map(|(tag, props, children)| build_element(tag, props, children)),
            1 => inner.prop_map(passthrough),
        ]
    })
}

/// Keyed `li` items, one per id, each holding its id as text.
pub fn keyed_list(ids: &[u32]) -> Node {
    element("ul")
        .children(
            ids.iter()
                .map(|id| element("li").key(*id).child(format!("item {id}"))),
        )
        .into()
}

/// A set of distinct ids together with a shuffled subset of them.
pub fn arb_keyed_lists() -> impl Strategy<Value = (Vec<u32>, Vec<u32>)> {
    prop::collection::btree_set(0u32..40, 0..12).prop_flat_map(|ids| {
        let ids: Vec<u32> = ids.into_iter().collect();
        let len = ids.len();
        (
            Just(ids.clone()),
            prop::sample::subsequence(ids, 0..=len).prop_shuffle(),
        )
    })
}

/// One sibling for a mixed list: `li` or `p`, keyed from a four-key pool so
/// that keys repeat, or a bare text node.
pub fn arb_sibling() -> impl Strategy<Value = Node> {
    prop_oneof![
        4 => (
            prop::sample::select(vec!["li", "p"]),
            prop::option::of(0u32..4),
            "[a-z]{0,3}",
        )
            .prop_map(|(tag, key, label)| {
                let el = element(tag).child(label);
                match key {
                    Some(key) => el.key(key).into(),
                    None => el.into(),
                }
            }),
        1 => arb_text_node(),
    ]
}

/// Keyed and unkeyed siblings under one parent.
pub fn arb_mixed_children() -> impl Strategy<Value = Vec<Node>> {
    prop::collection::vec(arb_sibling(), 0..8)
}

pub fn mixed_list(children: Vec<Node>) -> Node {
    element("ul").children(children).into()
}
