//! Application state for the lot listing
//!
//! State is replaced, never mutated in place: every event produces a new
//! `AppState` which is then rendered as a whole.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: u32,
    pub name: String,
    pub desc: String,
    pub price: f64,
}

/// A price published on a lot's channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub id: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub time: DateTime<Local>,
    /// `None` until the listing has been fetched
    pub lots: Option<Vec<Lot>>,
}

impl AppState {
    pub fn new(time: DateTime<Local>) -> Self {
        Self { time, lots: None }
    }

    pub fn with_time(&self, time: DateTime<Local>) -> Self {
        Self {
            time,
            ..self.clone()
        }
    }

    pub fn with_lots(&self, lots: Vec<Lot>) -> Self {
        Self {
            lots: Some(lots),
            ..self.clone()
        }
    }

    /// Apply a price update to the matching lot. Updates that arrive before the
    /// listing, or for unknown ids, leave the state unchanged.
    pub fn with_price(&self, update: PriceUpdate) -> Self {
        let lots = self.lots.as_ref().map(|lots| {
            lots.iter()
                .map(|lot| {
                    if lot.id == update.id {
                        Lot {
                            price: update.price,
                            ..lot.clone()
                        }
                    } else {
                        lot.clone()
                    }
                })
                .collect()
        });
        Self {
            lots,
            time: self.time,
        }
    }
}
