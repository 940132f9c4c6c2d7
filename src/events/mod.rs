pub mod filter;
pub mod keyboard;
pub mod pointer;

use crate::overlay::{CLOSE_ID, OVERLAY_ID};
use crate::{dom, schedule, Shared};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Close button and backdrop clicks on the detail overlay.
pub fn wire_modal_controls(shared: &Shared, document: &web::Document) {
    if let Some(close) = document.get_element_by_id(CLOSE_ID) {
        let shared = shared.clone();
        dom::add_click_listener(&close, move |_| {
            let next = {
                let mut guard = shared.borrow_mut();
                let app = &mut *guard;
                app.viewer.request_close(&mut app.modal)
            };
            schedule::follow_up(&shared, next);
        });
    }

    if let Some(overlay) = document.get_element_by_id(OVERLAY_ID) {
        let shared = shared.clone();
        dom::add_click_listener(&overlay, move |ev| {
            let on_root = ev
                .target()
                .and_then(|t| t.dyn_into::<web::Element>().ok())
                .map(|el| el.id() == OVERLAY_ID)
                .unwrap_or(false);
            let next = {
                let mut guard = shared.borrow_mut();
                let app = &mut *guard;
                app.viewer.overlay_click(on_root, &mut app.modal)
            };
            schedule::follow_up(&shared, next);
        });
    }
}
