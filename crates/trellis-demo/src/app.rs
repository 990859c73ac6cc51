//! Components of the lot listing
//!
//! ```text
//! App
//! ├── Header ── Block ── Logo
//! ├── Clock
//! └── Lots ── Loading | Lot*
//! ```

use crate::state::{AppState, Lot};
use chrono::{DateTime, Local, Timelike};
use trellis_core::{component, element, ComponentError, Node, Props, Value};

const LOGO_SRC: &str = "http://via.placeholder.com/100x100";

/// Describe the whole application for `state`.
pub fn view(state: &AppState) -> Result<Node, serde_json::Error> {
    Ok(component("App", app)
        .data("state", serde_json::to_value(state)?)
        .into())
}

fn app(props: &Props) -> Result<Node, ComponentError> {
    let state: AppState = props.get_data("state")?;
    Ok(element("div")
        .prop("className", "app")
        .child(component("Header", header))
        .child(component("Clock", clock).data("time", serde_json::to_value(state.time)?))
        .child(component("Lots", lots).data("lots", serde_json::to_value(&state.lots)?))
        .into())
}

fn block(props: &Props) -> Result<Node, ComponentError> {
    Ok(element("div")
        .prop("className", "block")
        .children(props.children())
        .into())
}

fn header(_: &Props) -> Result<Node, ComponentError> {
    Ok(element("header")
        .prop("className", "header")
        .child(component("Block", block).child(component("Logo", logo)))
        .into())
}

fn logo(_: &Props) -> Result<Node, ComponentError> {
    Ok(element("img")
        .prop("className", "logo")
        .prop("src", LOGO_SRC)
        .into())
}

fn clock(props: &Props) -> Result<Node, ComponentError> {
    let time: DateTime<Local> = props.get_data("time")?;
    let is_day = (7..=21).contains(&time.hour());
    Ok(element("div")
        .prop("className", "clock")
        .child(
            element("span")
                .prop("className", "value")
                .child(time.format("%H:%M:%S").to_string()),
        )
        .child(element("span").prop(
            "className",
            format!("icon {}", if is_day { "day" } else { "night" }),
        ))
        .into())
}

fn loading(_: &Props) -> Result<Node, ComponentError> {
    Ok(element("div")
        .prop("className", "loading")
        .child("Loading...")
        .into())
}

fn lots(props: &Props) -> Result<Node, ComponentError> {
    let Some(lots) = props.get_data::<Option<Vec<Lot>>>("lots")? else {
        return Ok(component("Loading", loading).into());
    };

    let mut items = Vec::with_capacity(lots.len());
    for lot in &lots {
        items.push(
            component("Lot", lot_view)
                .data("lot", serde_json::to_value(lot)?)
                .prop("key", lot.id),
        );
    }
    Ok(element("div").prop("className", "lots").children(items).into())
}

fn lot_view(props: &Props) -> Result<Node, ComponentError> {
    let lot: Lot = props.get_data("lot")?;
    let key = props.get_value("key").cloned().unwrap_or(Value::Null);
    Ok(element("article")
        .prop("className", "lot")
        .key(key)
        .child(element("h1").child(lot.name))
        .child(element("p").child(lot.desc))
        .child(element("div").prop("className", "price").child(lot.price))
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::catalog;
    use crate::state::PriceUpdate;
    use chrono::TimeZone;
    use trellis_core::{render, Host, LiveTree};

    fn at(hour: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    fn mount() -> LiveTree {
        let mut tree = LiveTree::new("div");
        let root = tree.root();
        tree.set_prop(root, "id", Value::from("root"));
        tree
    }

    #[test]
    fn loading_until_lots_arrive() {
        let mut tree = mount();
        let root = tree.root();
        render(&view(&AppState::new(at(12))).unwrap(), &mut tree, root).unwrap();

        let html = tree.to_html();
        assert!(html.contains(r#"<div class="loading">Loading...</div>"#));
        assert!(html.contains(r#"<span class="value">12:00:00</span>"#));
        assert!(html.contains(r#"<span class="icon day"></span>"#));
    }

    #[test]
    fn night_icon_outside_day_hours() {
        let mut tree = mount();
        let root = tree.root();
        render(&view(&AppState::new(at(23))).unwrap(), &mut tree, root).unwrap();
        assert!(tree.to_html().contains(r#"<span class="icon night"></span>"#));
    }

    #[test]
    fn full_listing_renders() {
        let mut tree = mount();
        let root = tree.root();
        let state = AppState::new(at(12));
        render(&view(&state).unwrap(), &mut tree, root).unwrap();
        render(&view(&state.with_lots(catalog())).unwrap(), &mut tree, root).unwrap();

        insta::assert_snapshot!(
            tree.to_html(),
            @r#"<div id="root"><div class="app"><header class="header"><div class="block"><img class="logo" src="http://via.placeholder.com/100x100"></div></header><div class="clock"><span class="value">12:00:00</span><span class="icon day"></span></div><div class="lots"><article class="lot" data-key="1"><h1>Apple</h1><p>Apple is round</p><div class="price">4.99</div></article><article class="lot" data-key="2"><h1>Orange</h1><p>Orange is like an apple but orange</p><div class="price">5.55</div></article></div></div></div>"#
        );
    }

    #[test]
    fn price_tick_rewrites_one_text_node() {
        let mut tree = mount();
        let root = tree.root();
        let state = AppState::new(at(12)).with_lots(catalog());
        render(&view(&state).unwrap(), &mut tree, root).unwrap();
        let orange = tree.find_by_key("2").unwrap();
        tree.take_counts();

        let next = state.with_price(PriceUpdate { id: 2, price: 37.0 });
        render(&view(&next).unwrap(), &mut tree, root).unwrap();

        let counts = tree.take_counts();
        assert_eq!(counts.texts_set, 1);
        assert_eq!(counts.total(), 1);
        assert_eq!(tree.find_by_key("2"), Some(orange));
        assert!(tree.to_html().contains(r#"<div class="price">37</div>"#));
    }
}
