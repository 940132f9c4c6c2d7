use crate::scene::constants::DATA_URL;
use crate::scene::Filter;
use crate::{data, dom, Shared};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const ACTIVE_CLASS: &str = "active";

/// Fetch the catalog and rebuild the balls for `filter`.
///
/// The previous balls stay live until the fetch completes; if another reload
/// starts in the meantime this one is dropped.
pub async fn reload(shared: Shared, filter: Filter) {
    let ticket = shared.borrow_mut().viewer.begin_load();
    match data::fetch_catalog(DATA_URL).await {
        Ok(items) => {
            shared
                .borrow_mut()
                .viewer
                .finish_load(ticket, &items, filter);
        }
        Err(e) => log::error!("[catalog] load failed: {:?}", e),
    }
}

fn mark_active(document: &web::Document, button: &web::Element) {
    if let Ok(all) = document.query_selector_all("button") {
        for i in 0..all.length() {
            if let Some(el) = all.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                _ = el.class_list().remove_1(ACTIVE_CLASS);
            }
        }
    }
    _ = button.class_list().add_1(ACTIVE_CLASS);
}

/// Hook every `button[data-filter]` up to a reload with its filter token.
pub fn wire_filter_buttons(shared: &Shared, document: &web::Document) {
    let Ok(buttons) = document.query_selector_all("button[data-filter]") else {
        return;
    };
    for i in 0..buttons.length() {
        let Some(button) = buttons
            .item(i)
            .and_then(|n| n.dyn_into::<web::Element>().ok())
        else {
            continue;
        };
        let token = button.get_attribute("data-filter").unwrap_or_default();
        let shared = shared.clone();
        let document = document.clone();
        let button_cb = button.clone();
        dom::add_click_listener(&button, move |_| {
            mark_active(&document, &button_cb);
            match token.parse::<Filter>() {
                Ok(filter) => spawn_local(reload(shared.clone(), filter)),
                Err(e) => log::warn!("[catalog] {}", e),
            }
        });
    }
}
