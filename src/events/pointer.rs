use crate::scene::picking::screen_to_ndc;
use crate::scene::DragButton;
use crate::{dom, schedule, Shared};
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn pointer_canvas_css(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

#[inline]
fn drag_button(ev: &web::PointerEvent) -> DragButton {
    match ev.button() {
        1 => DragButton::Middle,
        2 => DragButton::Right,
        _ => DragButton::Left,
    }
}

pub fn wire_input_handlers(shared: &Shared, canvas: &web::HtmlCanvasElement) {
    wire_pointerdown(shared, canvas);
    wire_pointermove(shared, canvas);
    wire_pointerup(shared);
    wire_wheel(shared, canvas);
    wire_contextmenu(canvas);
}

fn wire_pointerdown(shared: &Shared, canvas: &web::HtmlCanvasElement) {
    let shared = shared.clone();
    let canvas_cb = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = pointer_canvas_css(&ev, &canvas_cb);
        let (w, h) = dom::canvas_css_size(&canvas_cb);
        let ndc = screen_to_ndc(pos.x, pos.y, w, h);
        let touch = ev.pointer_type() == "touch";

        let next = {
            let mut app = shared.borrow_mut();
            app.viewer
                .gestures
                .pointer_down(ev.pointer_id(), pos, touch, drag_button(&ev));
            app.viewer.pointer_down(ndc)
        };
        _ = canvas_cb.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
        schedule::follow_up(&shared, next);
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(shared: &Shared, canvas: &web::HtmlCanvasElement) {
    let shared = shared.clone();
    let canvas_cb = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = pointer_canvas_css(&ev, &canvas_cb);
        let (_, h) = dom::canvas_css_size(&canvas_cb);
        let mut app = shared.borrow_mut();
        let viewer = &mut app.viewer;
        viewer.gestures.pointer_move(
            ev.pointer_id(),
            pos,
            &mut viewer.controls,
            &viewer.camera,
            h,
        );
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(shared: &Shared) {
    let shared = shared.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        shared.borrow_mut().viewer.gestures.pointer_up(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        for kind in ["pointerup", "pointercancel"] {
            _ = wnd.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
    }
    closure.forget();
}

fn wire_wheel(shared: &Shared, canvas: &web::HtmlCanvasElement) {
    let shared = shared.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let dy = ev.delta_y();
        if dy != 0.0 {
            // wheel up zooms in
            let steps = if dy < 0.0 { 1.0 } else { -1.0 };
            shared.borrow_mut().viewer.controls.dolly(steps);
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_contextmenu(canvas: &web::HtmlCanvasElement) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}
