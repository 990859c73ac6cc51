use crate::error::{RenderError, RenderResult};
use crate::host::Host;
use crate::node::Node;
use crate::normalize::Normalizer;
use crate::reconcile::{ReconcileStats, Reconciler};
use crate::vnode::{VElement, VNode};
use trellis_config::RenderConfig;
use tracing::{debug, debug_span};

/// Entry point tying the normalizer and the reconciler together.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    normalizer: Normalizer,
    reconciler: Reconciler,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            normalizer: Normalizer::from_config(config),
            reconciler: Reconciler::from_config(config),
        }
    }

    /// Render `node` as the only child of `root`.
    ///
    /// The description is fully normalized before anything is written, so an
    /// error leaves the live tree exactly as the previous pass left it. `root`
    /// is never replaced; its own properties and identity hint are carried over
    /// into the synthetic wrapper and so stay untouched.
    pub fn render<H: Host>(
        &self,
        node: &Node,
        host: &mut H,
        root: H::Handle,
    ) -> RenderResult<ReconcileStats> {
        let span = debug_span!("render", ?root);
        let _enter = span.enter();

        let tag = host
            .tag(root)
            .ok_or_else(|| RenderError::Host("render root must be an element".into()))?
            .to_string();
        let child = self.normalizer.evaluate(node)?;

        let props = host
            .prop_names(root)
            .into_iter()
            .filter_map(|name| {
                let value = host.prop(root, &name)?.clone();
                Some((name, value))
            })
            .collect();
        let wrapper = VNode::Element(VElement {
            tag,
            props,
            key: host.key(root).map(str::to_string),
            children: vec![child],
        });

        let stats = self.reconciler.reconcile(host, &wrapper, root)?;
        debug!(
            visited = stats.visited,
            mutations = stats.mutations(),
            added = stats.added,
            removed = stats.removed,
            replaced = stats.replaced,
            moved = stats.moved,
            "render pass complete"
        );
        Ok(stats)
    }
}

/// Render with the default configuration.
pub fn render<H: Host>(node: &Node, host: &mut H, root: H::Handle) -> RenderResult<ReconcileStats> {
    Renderer::default().render(node, host, root)
}
