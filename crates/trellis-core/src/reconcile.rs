//! Align a live tree with a normalized tree
//!
//! Each call walks both trees once, writing through only what differs:
//!
//! 1. properties whose value changed (and, optionally, properties that went away)
//! 2. the identity hint
//! 3. text values
//! 4. children, matched by index and tag, or by key when any sibling is keyed
//!
//! New live nodes are always fully populated before they are attached.

use crate::error::{RenderError, RenderResult};
use crate::factory;
use crate::host::Host;
use crate::vnode::{VElement, VNode};
use std::collections::{HashMap, VecDeque};
use trellis_config::{MatchStrategy, RenderConfig};
use tracing::trace;

/// What one reconcile pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Normalized nodes visited
    pub visited: usize,
    pub props_written: usize,
    pub props_cleared: usize,
    pub texts_written: usize,
    /// Live nodes created, including every node inside new subtrees
    pub created: usize,
    /// Children matched and updated in place
    pub updated: usize,
    /// New subtrees attached to a parent that was already live
    pub added: usize,
    pub removed: usize,
    pub replaced: usize,
    pub moved: usize,
}

impl ReconcileStats {
    /// Number of writes and structural edits, excluding in-place matches.
    pub fn mutations(&self) -> usize {
        self.props_written
            + self.props_cleared
            + self.texts_written
            + self.added
            + self.removed
            + self.replaced
            + self.moved
    }
}

#[derive(Debug, Clone)]
pub struct Reconciler {
    strategy: MatchStrategy,
    clear_stale_props: bool,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl Reconciler {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            strategy: config.strategy,
            clear_stale_props: config.clear_stale_props,
        }
    }

    pub fn strategy(&self) -> MatchStrategy {
        self.strategy
    }

    /// Make the subtree at `live` match `vnode`. `live` itself is kept.
    pub fn reconcile<H: Host>(
        &self,
        host: &mut H,
        vnode: &VNode,
        live: H::Handle,
    ) -> RenderResult<ReconcileStats> {
        let mut stats = ReconcileStats::default();
        self.sync(host, vnode, live, &mut stats)?;
        Ok(stats)
    }

    fn sync<H: Host>(
        &self,
        host: &mut H,
        vnode: &VNode,
        live: H::Handle,
        stats: &mut ReconcileStats,
    ) -> RenderResult<()> {
        stats.visited += 1;
        match vnode {
            VNode::Text(value) => {
                if host.text(live) != Some(value.as_str()) {
                    host.set_text(live, value);
                    stats.texts_written += 1;
                }
                Ok(())
            }
            VNode::Element(el) => {
                self.sync_props(host, el, live, stats);
                if host.key(live) != el.key.as_deref() {
                    host.set_key(live, el.key.as_deref());
                }
                let keyed = self.strategy == MatchStrategy::Keyed
                    && (el.children.iter().any(|c| c.key().is_some())
                        || (0..host.child_count(live))
                            .filter_map(|i| host.child_at(live, i))
                            .any(|r| host.key(r).is_some()));
                if keyed {
                    self.sync_children_keyed(host, &el.children, live, stats)
                } else {
                    self.sync_children_positional(host, &el.children, live, stats)
                }
            }
        }
    }

    fn sync_props<H: Host>(
        &self,
        host: &mut H,
        el: &VElement,
        live: H::Handle,
        stats: &mut ReconcileStats,
    ) {
        for (name, value) in &el.props {
            if host.prop(live, name) != Some(value) {
                host.set_prop(live, name, value.clone());
                stats.props_written += 1;
            }
        }
        if self.clear_stale_props {
            for name in host.prop_names(live) {
                if !el.props.contains_key(&name) {
                    host.remove_prop(live, &name);
                    stats.props_cleared += 1;
                }
            }
        }
    }

    /// Index-and-tag matching: update, replace or add per index, then drop the
    /// surplus live children from the end.
    fn sync_children_positional<H: Host>(
        &self,
        host: &mut H,
        children: &[VNode],
        live: H::Handle,
        stats: &mut ReconcileStats,
    ) -> RenderResult<()> {
        for (index, v) in children.iter().enumerate() {
            match host.child_at(live, index) {
                Some(r) if same_kind(&*host, v, r) => {
                    trace!(index, tag = ?v.tag(), "update");
                    self.sync(host, v, r, stats)?;
                    stats.updated += 1;
                }
                Some(_) => {
                    trace!(index, tag = ?v.tag(), "replace");
                    let fresh = self.build(host, v, stats)?;
                    host.replace_child(live, index, fresh)?;
                    stats.replaced += 1;
                }
                None => {
                    trace!(index, tag = ?v.tag(), "add");
                    let fresh = self.build(host, v, stats)?;
                    host.append_child(live, fresh)?;
                    stats.added += 1;
                }
            }
        }
        self.remove_surplus(host, live, children.len(), stats)
    }

    /// Match keyed children by key (same key and tag), unkeyed children by
    /// position among the unkeyed live children, then remove what is left
    /// over and put the survivors in order.
    fn sync_children_keyed<H: Host>(
        &self,
        host: &mut H,
        children: &[VNode],
        live: H::Handle,
        stats: &mut ReconcileStats,
    ) -> RenderResult<()> {
        let existing: Vec<H::Handle> = (0..host.child_count(live))
            .filter_map(|i| host.child_at(live, i))
            .collect();

        // Repeated keys are matched in sibling order.
        let mut by_key: HashMap<String, VecDeque<usize>> = HashMap::new();
        let mut unkeyed = Vec::new();
        for (i, &r) in existing.iter().enumerate() {
            match host.key(r) {
                Some(k) => by_key.entry(k.to_string()).or_default().push_back(i),
                None => unkeyed.push(i),
            }
        }

        let mut used = vec![false; existing.len()];
        let mut unkeyed_cursor = 0;
        let mut plan: Vec<(H::Handle, bool)> = Vec::with_capacity(children.len());
        for v in children {
            let candidate = match v.key() {
                Some(k) => by_key.get_mut(k).and_then(VecDeque::pop_front),
                None => {
                    let i = unkeyed.get(unkeyed_cursor).copied();
                    unkeyed_cursor += 1;
                    i
                }
            };
            match candidate.filter(|&i| same_kind(&*host, v, existing[i])) {
                Some(i) => {
                    trace!(from = i, key = ?v.key(), "keyed update");
                    used[i] = true;
                    self.sync(host, v, existing[i], stats)?;
                    stats.updated += 1;
                    plan.push((existing[i], false));
                }
                None => {
                    trace!(key = ?v.key(), tag = ?v.tag(), "keyed add");
                    let fresh = self.build(host, v, stats)?;
                    plan.push((fresh, true));
                }
            }
        }

        for i in (0..existing.len()).rev() {
            if !used[i] {
                trace!(index = i, "keyed remove");
                host.remove_child(live, i)?;
                stats.removed += 1;
            }
        }

        for (target, &(node, fresh)) in plan.iter().enumerate() {
            if fresh {
                host.insert_child(live, target, node)?;
                stats.added += 1;
                continue;
            }
            if host.child_at(live, target) == Some(node) {
                continue;
            }
            let from = (target + 1..host.child_count(live))
                .find(|&j| host.child_at(live, j) == Some(node))
                .ok_or_else(|| {
                    RenderError::Host(format!("matched child {node:?} is no longer attached"))
                })?;
            host.move_child(live, from, target)?;
            stats.moved += 1;
        }
        Ok(())
    }

    /// Create a live node for `v` and populate it before it is attached.
    fn build<H: Host>(
        &self,
        host: &mut H,
        v: &VNode,
        stats: &mut ReconcileStats,
    ) -> RenderResult<H::Handle> {
        let fresh = factory::create(host, v);
        let mut inner = ReconcileStats::default();
        self.sync(host, v, fresh, &mut inner)?;
        stats.visited += inner.visited;
        stats.props_written += inner.props_written;
        stats.texts_written += inner.texts_written;
        stats.created += 1 + inner.created;
        Ok(fresh)
    }

    fn remove_surplus<H: Host>(
        &self,
        host: &mut H,
        live: H::Handle,
        keep: usize,
        stats: &mut ReconcileStats,
    ) -> RenderResult<()> {
        let mut count = host.child_count(live);
        while count > keep {
            trace!(index = count - 1, "remove");
            host.remove_child(live, count - 1)?;
            stats.removed += 1;
            count = host.child_count(live);
        }
        Ok(())
    }
}

fn same_kind<H: Host>(host: &H, v: &VNode, r: H::Handle) -> bool {
    match v {
        VNode::Text(_) => host.tag(r).is_none() && host.text(r).is_some(),
        VNode::Element(el) => host.tag(r) == Some(el.tag.as_str()),
    }
}
