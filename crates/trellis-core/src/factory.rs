use crate::host::Host;
use crate::vnode::VNode;
use tracing::trace;

/// Create an empty, detached live node of the same kind as `vnode`.
///
/// Text nodes start with an empty value and elements with no properties or
/// children; the reconciler fills them in before attaching them.
pub fn create<H: Host>(host: &mut H, vnode: &VNode) -> H::Handle {
    match vnode {
        VNode::Text(_) => {
            let node = host.create_text();
            trace!(?node, "created text node");
            node
        }
        VNode::Element(el) => {
            let node = host.create_element(&el.tag);
            trace!(?node, tag = %el.tag, "created element");
            node
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::LiveTree;
    use crate::value::Value;
    use crate::vnode::VElement;

    #[test]
    fn creates_empty_nodes_of_matching_kind() {
        let mut tree = LiveTree::new("div");
        let text = create(&mut tree, &VNode::Text("ignored".into()));
        assert_eq!(tree.text(text), Some(""));

        let el = create(
            &mut tree,
            &VNode::Element(VElement {
                tag: "article".into(),
                props: [("className".to_string(), Value::from("lot"))].into_iter().collect(),
                key: Some("1".into()),
                children: vec![VNode::Text("x".into())],
            }),
        );
        assert_eq!(tree.tag(el), Some("article"));
        assert!(tree.prop_names(el).is_empty());
        assert_eq!(tree.key(el), None);
        assert_eq!(tree.child_count(el), 0);
        assert_eq!(tree.attached_count(), 1);
    }
}
