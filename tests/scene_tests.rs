// Host-side tests for the particle field and glitch state machine.
// The main crate is wasm-only, so we include the pure-Rust core modules
// directly.

#![allow(dead_code)]
mod engine {
    pub mod constants {
        include!("../src/core/constants.rs");
    }
    pub mod timeline {
        include!("../src/core/timeline.rs");
    }
    pub mod scene {
        include!("../src/core/scene.rs");
    }
}

use engine::constants::*;
use engine::scene::*;
use glam::Vec3;

#[test]
fn sphere_has_rings_times_segments_points() {
    let points = sphere_points(SPHERE_RADIUS, 32, 32);
    assert_eq!(points.len(), 1024);
    for p in &points {
        assert!(
            (p.length() - SPHERE_RADIUS).abs() < 1e-4,
            "point off the sphere surface: {p:?}"
        );
    }

    let scene = SceneState::new(1);
    assert_eq!(scene.spheres[0].point_count(), 1024);
    assert_eq!(scene.spheres[1].point_count(), 1024);
}

#[test]
fn initial_centers_sit_on_their_orbits() {
    let scene = SceneState::new(1);
    // t = 0: cos(0) = 1, sin(0) = 0
    assert_eq!(scene.spheres[1].center, Vec3::new(MOVE_RADIUS, 0.0, 0.0));
    assert_eq!(
        scene.spheres[0].center,
        Vec3::new(0.0, MOVE_RADIUS * 0.7, 0.0)
    );
}

#[test]
fn orbit_follows_the_parametric_paths() {
    let mut scene = SceneState::new(2);
    for frame in 1..=100 {
        scene.frame(frame as f64 * 0.016);
        let t = scene.t();
        assert!((t - frame as f32 * MOVE_SPEED).abs() < 1e-6);

        let a = scene.spheres[0].center;
        let b = scene.spheres[1].center;
        assert!((a.x - (t * 0.8).sin() * (MOVE_RADIUS * 0.7)).abs() < 1e-5);
        assert!((a.y - (t * 0.8).cos() * (MOVE_RADIUS * 0.7)).abs() < 1e-5);
        assert_eq!(a.z, 0.0);
        assert!((b.x - t.cos() * MOVE_RADIUS).abs() < 1e-5);
        assert_eq!(b.y, 0.0);
        assert!((b.z - t.sin() * MOVE_RADIUS).abs() < 1e-5);
    }
}

#[test]
fn spheres_counter_rotate_at_fixed_rates() {
    let mut scene = SceneState::new(3);
    for frame in 1..=50 {
        scene.frame(frame as f64 * 0.016);
    }
    let expected_a = Vec3::from(SPIN_RATE_A) * 50.0;
    let expected_b = Vec3::from(SPIN_RATE_B) * 50.0;
    assert!((scene.spheres[0].rotation - expected_a).length() < 1e-5);
    assert!((scene.spheres[1].rotation - expected_b).length() < 1e-5);
    // Opposite signs on every axis
    for i in 0..3 {
        assert!(scene.spheres[0].rotation[i] * scene.spheres[1].rotation[i] < 0.0);
    }
}

#[test]
fn opacity_endpoints_and_plateaus() {
    let r = SPHERE_RADIUS;
    assert_eq!(point_opacity(r * OPACITY_NEAR_FACTOR, r), OPACITY_MIN);
    assert_eq!(point_opacity(r * OPACITY_FAR_FACTOR, r), 1.0);
    // Plateaus on both sides
    assert_eq!(point_opacity(0.0, r), OPACITY_MIN);
    assert_eq!(point_opacity(r * 0.25, r), OPACITY_MIN);
    assert_eq!(point_opacity(r * 1.8, r), 1.0);
    assert_eq!(point_opacity(r * 2.0, r), 1.0);
    assert_eq!(point_opacity(r * 10.0, r), 1.0);
    // Midpoint of the blend zone
    let mid = point_opacity(r, r);
    assert!((mid - 0.75).abs() < 1e-6);
}

#[test]
fn opacity_is_continuous_and_monotone_over_the_blend_zone() {
    let r = SPHERE_RADIUS;
    let mut prev = point_opacity(0.0, r);
    let mut d = 0.0;
    while d < r * 2.5 {
        let o = point_opacity(d, r);
        assert!((0.5..=1.0).contains(&o));
        assert!(o >= prev - 1e-6, "opacity decreased at d={d}");
        assert!((o - prev).abs() < 0.01, "opacity jumped at d={d}");
        prev = o;
        d += 0.01;
    }
}

#[test]
fn per_point_opacity_tracks_the_other_sphere() {
    let mut scene = SceneState::new(4);
    scene.frame(0.016);
    for (i, s) in scene.spheres.iter().enumerate() {
        let other = scene.spheres[1 - i].center;
        for (w, &o) in s.world.iter().zip(&s.opacities) {
            assert_eq!(o, point_opacity(w.distance(other), SPHERE_RADIUS));
        }
    }
}

#[test]
fn glitch_is_single_flight() {
    let mut scene = SceneState::new(5);
    let cue = scene.trigger_glitch(0.0);
    assert!(cue.is_some());
    assert!(scene.is_glitching());
    let saved = scene.saved_centers();

    // Re-trigger while active is a no-op
    assert!(scene.trigger_glitch(0.05).is_none());
    assert_eq!(scene.saved_centers(), saved);
}

#[test]
fn glitch_cue_frequencies_are_in_band() {
    let mut scene = SceneState::new(6);
    let cue = scene.trigger_glitch(0.0).unwrap();
    assert_eq!(cue.frequencies_hz.len(), GLITCH_BURST_COUNT);
    for f in cue.frequencies_hz {
        assert!(
            (GLITCH_BURST_MIN_HZ..GLITCH_BURST_MAX_HZ).contains(&f),
            "burst frequency out of band: {f}"
        );
    }
}

#[test]
fn glitch_jitters_around_the_captured_centers() {
    let mut scene = SceneState::new(7);
    scene.frame(1.0);
    assert!(scene.trigger_glitch(1.0).is_some());
    let saved = scene.saved_centers();

    // Every glitching frame stays inside the jitter box; orbit is suspended
    for step in 1..=5 {
        let now = 1.0 + step as f64 * 0.016;
        scene.frame(now);
        assert!(scene.is_glitching(), "glitch ended before its minimum span");
        for (s, saved) in scene.spheres.iter().zip(saved) {
            let off = s.center - saved;
            for i in 0..3 {
                assert!(
                    off[i].abs() <= GLITCH_JITTER / 2.0 + 1e-6,
                    "jitter escaped the box: {off:?}"
                );
            }
        }
    }
}

#[test]
fn glitch_restores_positions_exactly() {
    let mut scene = SceneState::new(8);
    scene.frame(1.0);
    assert!(scene.trigger_glitch(1.0).is_some());
    let saved = scene.saved_centers();

    scene.frame(1.05); // jittered away from the restore point
    assert!(scene.is_glitching());

    scene.end_glitch();
    assert!(!scene.is_glitching());
    assert_eq!(scene.spheres[0].center, saved[0]);
    assert_eq!(scene.spheres[1].center, saved[1]);
}

#[test]
fn glitch_duration_stays_in_its_window() {
    // Trigger well before the first scheduled glitch can interfere
    let mut scene = SceneState::new(9);
    assert!(scene.trigger_glitch(0.0).is_some());

    // Cannot have ended before the minimum duration
    scene.frame(GLITCH_DURATION_MIN_SEC - 1e-3);
    assert!(scene.is_glitching());

    // Must have ended by the (exclusive) maximum duration
    scene.frame(GLITCH_DURATION_MAX_SEC);
    assert!(!scene.is_glitching());
}

#[test]
fn scheduled_glitches_arrive_and_resolve() {
    let mut scene = SceneState::new(10);
    let mut cue_count = 0;
    let mut glitching_frames = 0;
    let mut now = 0.0;
    while now < 60.0 {
        if scene.frame(now).is_some() {
            cue_count += 1;
        }
        if scene.is_glitching() {
            glitching_frames += 1;
        }
        now += 0.016;
    }
    // Inter-arrival in [2,6)s over a minute
    assert!(
        (10..=30).contains(&cue_count),
        "unexpected glitch count: {cue_count}"
    );
    assert!(glitching_frames > 0);
}
