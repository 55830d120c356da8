use super::constants::*;
use super::timeline::Timeline;
use glam::{EulerRot, Mat3, Vec3};
use rand::prelude::*;

/// Audio cue emitted when a glitch begins; the wasm side turns this into
/// three short square-wave bursts if the audio graph is live.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlitchCue {
    pub frequencies_hz: [f32; GLITCH_BURST_COUNT],
}

/// One point-sampled sphere: fixed local geometry plus an animated center,
/// Euler rotation, and per-point derived data recomputed every frame.
pub struct SphereBody {
    local: Vec<Vec3>,
    pub center: Vec3,
    pub rotation: Vec3,
    spin_rate: Vec3,
    pub world: Vec<Vec3>,
    pub opacities: Vec<f32>,
}

impl SphereBody {
    fn new(center: Vec3, spin_rate: Vec3) -> Self {
        let local = sphere_points(SPHERE_RADIUS, SPHERE_RINGS, SPHERE_SEGMENTS);
        let n = local.len();
        Self {
            local,
            center,
            rotation: Vec3::ZERO,
            spin_rate,
            world: vec![Vec3::ZERO; n],
            opacities: vec![1.0; n],
        }
    }

    pub fn point_count(&self) -> usize {
        self.local.len()
    }

    /// Rebuild world-space positions from the current rotation and center.
    fn update_world(&mut self) {
        let rot = Mat3::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        for (w, p) in self.world.iter_mut().zip(&self.local) {
            *w = self.center + rot * *p;
        }
    }
}

enum SceneTask {
    GlitchStart,
    GlitchEnd,
}

/// Two intersecting particle spheres plus the glitch state machine.
///
/// `frame` is called once per displayed frame with the session clock and
/// performs, in order: due glitch transitions, rotation and orbit (or jitter)
/// updates, then the per-point opacity recompute. The returned cue, if any,
/// asks the caller to play the glitch burst.
pub struct SceneState {
    pub spheres: [SphereBody; 2],
    t: f32,
    glitching: bool,
    saved_centers: [Vec3; 2],
    timeline: Timeline<SceneTask>,
    rng: StdRng,
}

impl SceneState {
    pub fn new(seed: u64) -> Self {
        let mut scene = Self {
            spheres: [
                SphereBody::new(Vec3::ZERO, Vec3::from(SPIN_RATE_A)),
                SphereBody::new(Vec3::ZERO, Vec3::from(SPIN_RATE_B)),
            ],
            t: 0.0,
            glitching: false,
            saved_centers: [Vec3::ZERO; 2],
            timeline: Timeline::new(),
            rng: StdRng::seed_from_u64(seed),
        };
        scene.place_on_orbit();
        scene.update_all();
        let first = scene
            .rng
            .gen_range(GLITCH_INTERVAL_MIN_SEC..GLITCH_INTERVAL_MAX_SEC);
        scene.timeline.schedule(first, SceneTask::GlitchStart);
        scene
    }

    pub fn t(&self) -> f32 {
        self.t
    }

    pub fn is_glitching(&self) -> bool {
        self.glitching
    }

    pub fn saved_centers(&self) -> [Vec3; 2] {
        self.saved_centers
    }

    /// Advance one displayed frame. `now_sec` is the monotonic session clock
    /// driving the glitch timers.
    pub fn frame(&mut self, now_sec: f64) -> Option<GlitchCue> {
        let mut cue = None;
        while let Some(task) = self.timeline.pop_due(now_sec) {
            match task {
                SceneTask::GlitchStart => {
                    let next = self
                        .rng
                        .gen_range(GLITCH_INTERVAL_MIN_SEC..GLITCH_INTERVAL_MAX_SEC);
                    self.timeline
                        .schedule(now_sec + next, SceneTask::GlitchStart);
                    if let Some(c) = self.trigger_glitch(now_sec) {
                        cue = Some(c);
                    }
                }
                SceneTask::GlitchEnd => self.end_glitch(),
            }
        }

        // Counter-rotation continues through glitches
        for s in &mut self.spheres {
            s.rotation += s.spin_rate;
        }

        self.t += MOVE_SPEED;
        if self.glitching {
            // Independent jitter around the captured centers, re-rolled each
            // frame with no smoothing
            let saved = self.saved_centers;
            for (s, saved) in self.spheres.iter_mut().zip(saved) {
                let jitter = Vec3::new(
                    (self.rng.gen::<f32>() - 0.5) * GLITCH_JITTER,
                    (self.rng.gen::<f32>() - 0.5) * GLITCH_JITTER,
                    (self.rng.gen::<f32>() - 0.5) * GLITCH_JITTER,
                );
                s.center = saved + jitter;
            }
        } else {
            self.place_on_orbit();
        }

        self.update_all();
        cue
    }

    /// Begin a glitch: capture both centers as the restore point and schedule
    /// the end of the burst. Single-flight: a no-op while already glitching.
    pub fn trigger_glitch(&mut self, now_sec: f64) -> Option<GlitchCue> {
        if self.glitching {
            return None;
        }
        self.glitching = true;
        self.saved_centers = [self.spheres[0].center, self.spheres[1].center];
        let duration = self
            .rng
            .gen_range(GLITCH_DURATION_MIN_SEC..GLITCH_DURATION_MAX_SEC);
        self.timeline
            .schedule(now_sec + duration, SceneTask::GlitchEnd);

        let mut frequencies_hz = [0.0; GLITCH_BURST_COUNT];
        for f in &mut frequencies_hz {
            *f = self.rng.gen_range(GLITCH_BURST_MIN_HZ..GLITCH_BURST_MAX_HZ);
        }
        Some(GlitchCue { frequencies_hz })
    }

    /// End the burst: both centers return to the captured restore point
    /// exactly (bitwise, not approximately).
    pub fn end_glitch(&mut self) {
        if !self.glitching {
            return;
        }
        self.spheres[0].center = self.saved_centers[0];
        self.spheres[1].center = self.saved_centers[1];
        self.glitching = false;
    }

    fn place_on_orbit(&mut self) {
        let t = self.t;
        self.spheres[0].center = Vec3::new(
            (t * 0.8).sin() * (MOVE_RADIUS * 0.7),
            (t * 0.8).cos() * (MOVE_RADIUS * 0.7),
            0.0,
        );
        self.spheres[1].center = Vec3::new(t.cos() * MOVE_RADIUS, 0.0, t.sin() * MOVE_RADIUS);
    }

    /// World positions first, then opacities against the other sphere's
    /// current center.
    fn update_all(&mut self) {
        for s in &mut self.spheres {
            s.update_world();
        }
        let centers = [self.spheres[0].center, self.spheres[1].center];
        for (i, s) in self.spheres.iter_mut().enumerate() {
            let other = centers[1 - i];
            for (o, w) in s.opacities.iter_mut().zip(&s.world) {
                *o = point_opacity(w.distance(other), SPHERE_RADIUS);
            }
        }
    }
}

/// Opacity of a point at distance `d` from the other sphere's center: fully
/// opaque outside `OPACITY_FAR_FACTOR * radius`, dimmed to `OPACITY_MIN`
/// inside `OPACITY_NEAR_FACTOR * radius`, linear in between.
pub fn point_opacity(d: f32, radius: f32) -> f32 {
    let far = radius * OPACITY_FAR_FACTOR;
    let near = radius * OPACITY_NEAR_FACTOR;
    if d >= far {
        1.0
    } else if d <= near {
        OPACITY_MIN
    } else {
        let t = (d - near) / (far - near);
        OPACITY_MIN + t * (1.0 - OPACITY_MIN)
    }
}

/// Fixed point-cloud sphere via spherical parameterization: `rings` latitude
/// steps from -PI/2, `segments` longitude steps over a full turn.
pub fn sphere_points(radius: f32, rings: usize, segments: usize) -> Vec<Vec3> {
    let mut points = Vec::with_capacity(rings * segments);
    for i in 0..rings {
        let lat = std::f32::consts::PI * (-0.5 + i as f32 / rings as f32);
        for j in 0..segments {
            let lon = std::f32::consts::TAU * j as f32 / segments as f32;
            points.push(Vec3::new(
                radius * lat.cos() * lon.cos(),
                radius * lat.sin(),
                radius * lat.cos() * lon.sin(),
            ));
        }
    }
    points
}
