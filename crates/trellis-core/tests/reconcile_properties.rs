#![cfg(feature = "test-utils")]

use proptest::prelude::*;
use trellis_core::proptest_strategies::*;
use trellis_core::*;

fn configs() -> [RenderConfig; 2] {
    [RenderConfig::default(), RenderConfig::positional()]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_render_converges_to_normalized_tree(node in arb_node()) {
        let expected = Normalizer::default().evaluate(&node).unwrap();
        let mut tree = LiveTree::new("main");
        let root = tree.root();

        render(&node, &mut tree, root).unwrap();

        let live = tree.to_vnode(tree.child_at(root, 0).unwrap()).unwrap();
        prop_assert_eq!(live, expected);
    }

    #[test]
    fn prop_any_tree_converges_from_any_previous_tree(
        before in arb_node(),
        after in arb_node(),
    ) {
        let expected = Normalizer::default().evaluate(&after).unwrap();
        let mut tree = LiveTree::new("main");
        let root = tree.root();

        render(&before, &mut tree, root).unwrap();
        render(&after, &mut tree, root).unwrap();

        prop_assert_eq!(tree.child_count(root), 1);
        let live = tree.to_vnode(tree.child_at(root, 0).unwrap()).unwrap();
        prop_assert_eq!(live, expected.clone());
        prop_assert_eq!(tree.attached_count(), 1 + expected.size());
    }

    #[test]
    fn prop_second_render_is_idempotent(node in arb_node()) {
        for config in configs() {
            let renderer = Renderer::new(&config);
            let mut tree = LiveTree::new("main");
            let root = tree.root();

            renderer.render(&node, &mut tree, root).unwrap();
            tree.take_counts();
            let stats = renderer.render(&node, &mut tree, root).unwrap();

            prop_assert_eq!(stats.mutations(), 0);
            prop_assert!(tree.take_counts().is_empty());
        }
    }

    #[test]
    fn prop_positional_children_converge_without_stale_clearing(
        before in arb_node(),
        after in arb_node(),
    ) {
        let renderer = Renderer::new(&RenderConfig::positional());
        let expected = Normalizer::default().evaluate(&after).unwrap();
        let mut tree = LiveTree::new("main");
        let root = tree.root();

        renderer.render(&before, &mut tree, root).unwrap();
        renderer.render(&after, &mut tree, root).unwrap();

        let live = tree.to_vnode(tree.child_at(root, 0).unwrap()).unwrap();
        prop_assert_eq!(shape(&live), shape(&expected));
    }

    #[test]
    fn prop_mixed_siblings_converge_and_settle(
        before in arb_mixed_children(),
        after in arb_mixed_children(),
    ) {
        let after = mixed_list(after);
        let expected = Normalizer::default().evaluate(&after).unwrap();
        for config in configs() {
            let renderer = Renderer::new(&config);
            let mut tree = LiveTree::new("main");
            let root = tree.root();

            renderer.render(&mixed_list(before.clone()), &mut tree, root).unwrap();
            renderer.render(&after, &mut tree, root).unwrap();

            let list = tree.child_at(root, 0).unwrap();
            let live = tree.to_vnode(list).unwrap();
            prop_assert_eq!(&live, &expected);
            prop_assert_eq!(tree.attached_count(), 1 + expected.size());

            let children = tree.children(list);
            tree.take_counts();
            let stats = renderer.render(&after, &mut tree, root).unwrap();
            prop_assert_eq!(stats.mutations(), 0);
            prop_assert!(tree.take_counts().is_empty());
            prop_assert_eq!(tree.children(list), children);
        }
    }

    #[test]
    fn prop_keyed_lists_preserve_identity((before, after) in arb_keyed_lists()) {
        let mut tree = LiveTree::new("main");
        let root = tree.root();

        render(&keyed_list(&before), &mut tree, root).unwrap();
        let ids: Vec<_> = after
            .iter()
            .map(|id| tree.find_by_key(&id.to_string()))
            .collect();
        tree.take_counts();

        render(&keyed_list(&after), &mut tree, root).unwrap();
        let counts = tree.take_counts();

        prop_assert_eq!(counts.created, 0);
        prop_assert_eq!(counts.texts_set, 0);
        prop_assert_eq!(counts.removed, before.len() - after.len());

        let list = tree.child_at(root, 0).unwrap();
        for (index, id) in ids.into_iter().enumerate() {
            prop_assert_eq!(tree.child_at(list, index), id);
        }
    }
}

/// Tags, text and child structure, ignoring properties.
fn shape(v: &VNode) -> String {
    match v {
        VNode::Text(s) => format!("{s:?}"),
        VNode::Element(el) => format!(
            "<{}>[{}]",
            el.tag,
            el.children.iter().map(shape).collect::<Vec<_>>().join(",")
        ),
    }
}
