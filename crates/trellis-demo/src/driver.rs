//! Event loop: fold events into state, render after each one

use crate::app;
use crate::source::{self, Event, PriceFeed};
use crate::state::AppState;
use anyhow::{Context, Result};
use chrono::Local;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};
use trellis_config::TrellisConfig;
use trellis_core::{Host, LiveId, LiveTree, Renderer};

/// Owns the live tree and re-renders it from complete state snapshots.
pub struct Driver {
    renderer: Renderer,
    tree: LiveTree,
    root: LiveId,
    renders: usize,
    limit: usize,
    print_html: bool,
}

impl Driver {
    /// `limit` of 0 means no limit.
    pub fn new(config: &TrellisConfig, limit: usize, print_html: bool) -> Self {
        let mut tree = LiveTree::new("div");
        let root = tree.root();
        tree.set_prop(root, "id", "root".into());
        tree.take_counts();
        Self {
            renderer: Renderer::new(&config.render),
            tree,
            root,
            renders: 0,
            limit,
            print_html,
        }
    }

    pub fn tree(&self) -> &LiveTree {
        &self.tree
    }

    pub fn renders(&self) -> usize {
        self.renders
    }

    pub fn is_done(&self) -> bool {
        self.limit != 0 && self.renders >= self.limit
    }

    /// Run one render pass for `state`.
    pub fn render(&mut self, state: &AppState) -> Result<()> {
        let description = app::view(state).context("failed to describe application state")?;
        let stats = self
            .renderer
            .render(&description, &mut self.tree, self.root)
            .context("render pass failed")?;
        self.renders += 1;

        let counts = self.tree.take_counts();
        debug!(
            pass = self.renders,
            writes = counts.props_set + counts.texts_set,
            created = counts.created,
            removed = counts.removed,
            moved = counts.moved,
            "render pass applied"
        );
        if self.print_html {
            println!("{}", self.tree.to_html());
        } else {
            info!(
                pass = self.renders,
                mutations = stats.mutations(),
                nodes = self.tree.attached_count(),
                "rendered"
            );
        }
        Ok(())
    }

    /// Drive the application until the render limit is reached or ctrl-c.
    pub async fn run(mut self, config: &TrellisConfig) -> Result<Self> {
        let demo = &config.demo;
        let mut state = AppState::new(Local::now());
        self.render(&state)?;
        if self.is_done() {
            return Ok(self);
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        tokio::spawn(source::fetch(
            "/lots",
            Duration::from_millis(demo.fetch_delay_ms),
            tx.clone(),
        ));

        let feed = PriceFeed {
            interval: Duration::from_millis(demo.price_interval_ms),
            min: demo.price_min,
            max: demo.price_max,
        };
        let mut clock = tokio::time::interval(Duration::from_millis(demo.clock_interval_ms));
        clock.tick().await;

        loop {
            tokio::select! {
                _ = clock.tick() => {
                    state = state.with_time(Local::now());
                }
                Some(event) = rx.recv() => match event {
                    Event::Lots(lots) => {
                        info!(count = lots.len(), "lots loaded");
                        for lot in &lots {
                            source::subscribe(&format!("price-{}", lot.id), feed, tx.clone());
                        }
                        state = state.with_lots(lots);
                    }
                    Event::Price(update) => {
                        state = state.with_price(update);
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted");
                    break;
                }
            }
            self.render(&state)?;
            if self.is_done() {
                break;
            }
        }
        Ok(self)
    }
}
