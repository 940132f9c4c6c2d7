use crate::scene::{Deferred, Delay};
use crate::Shared;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Run `task` after its delay and keep following whatever it hands back.
pub fn run_later(shared: &Shared, task: Deferred) {
    let Some(window) = web::window() else {
        return;
    };
    let shared_cb = shared.clone();
    let callback = Closure::once_into_js(move || {
        let next = {
            let mut guard = shared_cb.borrow_mut();
            let app = &mut *guard;
            app.viewer.fire(task, &mut app.modal)
        };
        follow_up(&shared_cb, next);
    });
    let func: &js_sys::Function = callback.unchecked_ref();
    let scheduled = match task.delay() {
        Delay::NextFrame => window.request_animation_frame(func),
        Delay::Millis(ms) => {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(func, ms as i32)
        }
    };
    if let Err(e) = scheduled {
        log::error!("schedule {:?} failed: {:?}", task, e);
    }
}

#[inline]
pub fn follow_up(shared: &Shared, task: Option<Deferred>) {
    if let Some(task) = task {
        run_later(shared, task);
    }
}
