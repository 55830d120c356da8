use crate::audio::AudioState;
use crate::core::SceneState;
use crate::render::{self, PointInstance};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Shared, lazily-initialized audio half (set on the first user gesture,
/// `None` forever if the audio subsystem is unavailable).
pub type SharedAudio = Rc<RefCell<Option<AudioState>>>;

pub struct FrameContext<'a> {
    pub scene: SceneState,
    pub audio: SharedAudio,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub start: instant::Instant,
    pub instances: Vec<PointInstance>,
    pub events: Vec<crate::core::AudioEvent>,
}

impl<'a> FrameContext<'a> {
    /// One displayed frame: scene update (positions, then opacities), audio
    /// scheduling, then frame submission.
    pub fn frame(&mut self) {
        let now_sec = self.start.elapsed().as_secs_f64();
        let cue = self.scene.frame(now_sec);

        if let Some(audio) = self.audio.borrow_mut().as_mut() {
            self.events.clear();
            let audio_now = audio.graph.current_time();
            audio.engine.tick(audio_now, &mut self.events);
            audio.graph.apply(&self.events);
            if let Some(cue) = cue {
                audio.graph.play_glitch_burst(&cue.frequencies_hz);
            }
        }

        self.instances.clear();
        for sphere in &self.scene.spheres {
            for (p, &a) in sphere.world.iter().zip(&sphere.opacities) {
                self.instances.push(PointInstance {
                    pos: p.to_array(),
                    alpha: a,
                });
            }
        }

        if let Some(g) = &mut self.gpu {
            let w = self.canvas.width();
            let h = self.canvas.height();
            g.resize_if_needed(w, h);
            if let Err(e) = g.render(&self.instances) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    instance_capacity: usize,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, instance_capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
