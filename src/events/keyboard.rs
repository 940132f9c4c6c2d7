use crate::{schedule, Shared};
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_global_keydown(shared: &Shared) {
    let shared = shared.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.key() != "Escape" {
            return;
        }
        let next = {
            let mut guard = shared.borrow_mut();
            let app = &mut *guard;
            app.viewer.escape(&mut app.modal)
        };
        schedule::follow_up(&shared, next);
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
