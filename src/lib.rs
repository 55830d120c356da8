#![cfg(target_arch = "wasm32")]
use crate::core::{SceneState, SPHERE_RINGS, SPHERE_SEGMENTS};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod render;

// Maintain canvas internal pixel size to match CSS size * devicePixelRatio
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
    log::info!("glitch-spheres starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    wire_canvas_resize(&canvas);

    // Fresh randomness per session; engines are seeded so the cores stay
    // deterministic under test
    let seed = js_sys::Date::now() as u64;

    // Audio stays uninitialized until a user gesture (browser autoplay policy)
    let audio: frame::SharedAudio = Rc::new(RefCell::new(None));
    events::wire_audio_toggle(&document, audio.clone(), seed);
    events::wire_first_interaction(&document, audio.clone(), seed ^ 1);

    // Visuals start immediately
    let scene = SceneState::new(seed ^ 2);
    let point_count = SPHERE_RINGS * SPHERE_SEGMENTS * 2;
    let gpu = frame::init_gpu(&canvas, point_count).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        scene,
        audio,
        gpu,
        canvas,
        start: instant::Instant::now(),
        instances: Vec::with_capacity(point_count),
        events: Vec::new(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
