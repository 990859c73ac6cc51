//! Lot listing demo for the trellis reconciler
//!
//! A clock, a delayed fetch and per-lot price feeds all push events into one
//! channel. The driver folds each event into a fresh [`state::AppState`] and
//! re-renders the whole description; the reconciler keeps the live tree in step.

pub mod app;
pub mod cli;
pub mod driver;
pub mod source;
pub mod state;
