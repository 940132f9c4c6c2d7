#![cfg(target_arch = "wasm32")]
use crate::scene::{Filter, GrapeType, ViewerState};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod data;
mod dom;
mod events;
mod frame;
mod overlay;
mod render;
mod schedule;
pub mod scene;

/// State shared by every handler and the frame loop.
pub(crate) struct Showcase {
    pub(crate) viewer: ViewerState,
    pub(crate) modal: overlay::DomModal,
}

pub(crate) type Shared = Rc<RefCell<Showcase>>;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("showcase-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    _ = canvas.style().set_property("touch-action", "none");

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let shared: Shared = Rc::new(RefCell::new(Showcase {
        viewer: ViewerState::new(rand::random()),
        modal: overlay::DomModal::new(document.clone()),
    }));

    shared
        .borrow_mut()
        .viewer
        .resize(canvas.width() as f32, canvas.height() as f32);

    events::wire_modal_controls(&shared, &document);
    events::keyboard::wire_global_keydown(&shared);
    events::pointer::wire_input_handlers(&shared, &canvas);
    events::filter::wire_filter_buttons(&shared, &document);

    spawn_local(events::filter::reload(shared.clone(), Filter::All));

    let star_layer_counts: Vec<usize> = shared
        .borrow()
        .viewer
        .starfield
        .layers()
        .iter()
        .map(|l| l.len())
        .collect();
    let gpu = frame::init_gpu(&canvas, &star_layer_counts).await;
    let has_gpu = gpu.is_some();

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        shared: shared.clone(),
        canvas,
        gpu,
        started: Instant::now(),
    }));
    frame::start_loop(frame_ctx.clone());

    // balls draw with the plain white texture until their preview lands
    if has_gpu {
        for kind in GrapeType::ALL {
            spawn_local(load_preview(frame_ctx.clone(), kind));
        }
    }
    Ok(())
}

async fn load_preview(frame_ctx: Rc<RefCell<frame::FrameContext<'static>>>, kind: GrapeType) {
    match data::fetch_bitmap(kind.preview_image()).await {
        Ok(bitmap) => {
            if let Some(g) = frame_ctx.borrow_mut().gpu.as_mut() {
                g.install_preview(kind, &bitmap);
            }
        }
        Err(e) => log::warn!("[textures] {} preview unavailable: {:?}", kind, e),
    }
}
