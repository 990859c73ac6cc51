//! Mock data source and price push channel
//!
//! Both only ever produce plain values; they know nothing about rendering.

use crate::state::{Lot, PriceUpdate};
use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

static CHANNEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^price-(\d+)$").unwrap());

/// Something the driver has to fold into the application state.
#[derive(Debug, Clone)]
pub enum Event {
    Lots(Vec<Lot>),
    Price(PriceUpdate),
}

pub fn catalog() -> Vec<Lot> {
    vec![
        Lot {
            id: 1,
            name: "Apple".to_string(),
            desc: "Apple is round".to_string(),
            price: 4.99,
        },
        Lot {
            id: 2,
            name: "Orange".to_string(),
            desc: "Orange is like an apple but orange".to_string(),
            price: 5.55,
        },
    ]
}

/// Fetch a resource after a simulated network delay.
pub async fn get(url: &str, delay: Duration) -> Result<Vec<Lot>> {
    match url {
        "/lots" => {
            tokio::time::sleep(delay).await;
            Ok(catalog())
        }
        _ => bail!("Unknown url: {url}"),
    }
}

/// Fetch `url` and push the result as an event. Failures are logged.
pub async fn fetch(url: &str, delay: Duration, tx: UnboundedSender<Event>) {
    match get(url, delay).await {
        Ok(lots) => {
            if tx.send(Event::Lots(lots)).is_err() {
                debug!(url, "receiver dropped before the lots arrived");
            }
        }
        Err(e) => error!("lot fetch failed: {e:#}"),
    }
}

/// Lot id named by a `price-<id>` channel.
pub fn parse_channel(channel: &str) -> Option<u32> {
    CHANNEL_RE.captures(channel)?.get(1)?.as_str().parse().ok()
}

/// Price feed settings
#[derive(Debug, Clone, Copy)]
pub struct PriceFeed {
    pub interval: Duration,
    pub min: u32,
    pub max: u32,
}

/// Publish a random price for the channel's lot every `feed.interval` until
/// the receiving side goes away. Channels that do not name a lot are ignored.
pub fn subscribe(
    channel: &str,
    feed: PriceFeed,
    tx: UnboundedSender<Event>,
) -> Option<JoinHandle<()>> {
    let Some(id) = parse_channel(channel) else {
        warn!(channel, "ignoring subscription to unknown channel");
        return None;
    };
    debug!(channel, id, "subscribed to price feed");
    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(feed.interval);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let price = rand::rng().random_range(feed.min..=feed.max);
            if tx
                .send(Event::Price(PriceUpdate {
                    id,
                    price: f64::from(price),
                }))
                .is_err()
            {
                debug!(id, "price feed receiver dropped");
                break;
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tracing_test::traced_test;

    #[test]
    fn channel_names_map_to_lot_ids() {
        assert_eq!(parse_channel("price-2"), Some(2));
        assert_eq!(parse_channel("price-17"), Some(17));
        assert_eq!(parse_channel("volume-1"), None);
        assert_eq!(parse_channel("price-"), None);
    }

    #[tokio::test]
    async fn lots_endpoint_returns_catalog() {
        let lots = get("/lots", Duration::ZERO).await.unwrap();
        assert_eq!(lots.len(), 2);
        assert_eq!(lots[0].name, "Apple");
    }

    #[tokio::test]
    async fn unknown_url_is_an_error() {
        let err = get("/bids", Duration::ZERO).await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown url: /bids");
    }

    #[tokio::test]
    async fn fetch_sends_lots_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        fetch("/lots", Duration::ZERO, tx).await;
        assert!(matches!(rx.recv().await, Some(Event::Lots(lots)) if lots.len() == 2));
    }

    #[tokio::test]
    #[traced_test]
    async fn fetch_logs_when_receiver_is_gone() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        fetch("/lots", Duration::ZERO, tx).await;
        assert!(logs_contain("receiver dropped before the lots arrived"));
    }

    #[tokio::test]
    #[traced_test]
    async fn fetch_logs_unknown_url() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        fetch("/bids", Duration::ZERO, tx).await;
        assert!(rx.recv().await.is_none());
        assert!(logs_contain("Unknown url: /bids"));
    }

    #[tokio::test(start_paused = true)]
    async fn price_feed_publishes_in_range() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let feed = PriceFeed {
            interval: Duration::from_millis(400),
            min: 30,
            max: 40,
        };
        let handle = subscribe("price-1", feed, tx).unwrap();

        for _ in 0..3 {
            match rx.recv().await {
                Some(Event::Price(update)) => {
                    assert_eq!(update.id, 1);
                    assert!((30.0..=40.0).contains(&update.price));
                }
                other => panic!("expected a price update, got {other:?}"),
            }
        }

        drop(rx);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn unknown_channel_spawns_nothing() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let feed = PriceFeed {
            interval: Duration::from_millis(1),
            min: 1,
            max: 2,
        };
        assert!(subscribe("volume-1", feed, tx).is_none());
    }
}
