use super::constants::*;
use super::timeline::Timeline;
use rand::prelude::*;
use smallvec::SmallVec;

/// Basic oscillator shape used by the web audio layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
}

/// Static and slowly-mutated parameters of one drone tone.
///
/// `base_hz` and `gain` are fixed at construction; `detune_cents` holds the
/// most recent drift target (the audible value ramps toward it).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneParams {
    pub base_hz: f32,
    pub waveform: Waveform,
    pub gain: f32,
    pub detune_cents: f32,
}

/// A parameter ramp scheduled by the engine for the web audio layer to apply.
///
/// Times are absolute `AudioContext` seconds so the audio layer can hand them
/// straight to `setValueAtTime` / `linearRampToValueAtTime`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioEvent {
    /// Ramp `frequency` from `base_hz` up to `peak_hz` over the first half of
    /// `duration_sec`, then back down to `base_hz` over the second half.
    FrequencySweep {
        tone: usize,
        base_hz: f32,
        peak_hz: f32,
        start_sec: f64,
        duration_sec: f64,
    },
    /// Ramp `detune` from its current value to `target_cents`, arriving at
    /// `end_sec`.
    DetuneRamp {
        tone: usize,
        target_cents: f32,
        end_sec: f64,
    },
}

enum DroneTask {
    Sweep(usize),
    Drift(usize),
}

/// Scheduler for the continuous drone: four tones, each running an unbounded
/// frequency-sweep chain and an independent detune-drift chain.
///
/// The engine is pure (no platform APIs): `tick` drains due tasks from the
/// internal timeline and emits `AudioEvent`s; the wasm side applies them to
/// the oscillator graph. Chains re-arm themselves with fresh randomness and
/// are never cancelled for the lifetime of the session.
pub struct DroneEngine {
    tones: SmallVec<[ToneParams; 4]>,
    timeline: Timeline<DroneTask>,
    rng: StdRng,
    muted: bool,
}

impl DroneEngine {
    /// Construct the four-tone drone and arm both chains for every tone at
    /// `start_sec` (typically `AudioContext::current_time()` at init).
    pub fn new(start_sec: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let tones = DRONE_TONES
            .iter()
            .map(|&(base_hz, gain)| ToneParams {
                base_hz,
                waveform: Waveform::Sine,
                gain,
                detune_cents: rng
                    .gen_range(-INITIAL_DETUNE_SPREAD_CENTS..INITIAL_DETUNE_SPREAD_CENTS),
            })
            .collect::<SmallVec<[ToneParams; 4]>>();

        let mut timeline = Timeline::new();
        for i in 0..tones.len() {
            timeline.schedule(start_sec, DroneTask::Sweep(i));
            timeline.schedule(start_sec, DroneTask::Drift(i));
        }

        Self {
            tones,
            timeline,
            rng,
            muted: true,
        }
    }

    pub fn tones(&self) -> &[ToneParams] {
        &self.tones
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flip the mute flag. Muting is purely an output-stage concern: tone
    /// parameters, drift targets and the scheduling chains are untouched, so
    /// unmuting resumes exactly the state the drone would have reached anyway.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Drain all tasks due at `now_sec`, pushing the resulting parameter
    /// ramps into `out_events` and re-arming each chain.
    pub fn tick(&mut self, now_sec: f64, out_events: &mut Vec<AudioEvent>) {
        while let Some(task) = self.timeline.pop_due(now_sec) {
            match task {
                DroneTask::Sweep(i) => {
                    let duration_sec = self
                        .rng
                        .gen_range(SWEEP_DURATION_MIN_SEC..SWEEP_DURATION_MAX_SEC);
                    let amount_hz = self.rng.gen_range(SWEEP_AMOUNT_MIN_HZ..SWEEP_AMOUNT_MAX_HZ);
                    let base_hz = self.tones[i].base_hz;
                    out_events.push(AudioEvent::FrequencySweep {
                        tone: i,
                        base_hz,
                        peak_hz: base_hz + amount_hz,
                        start_sec: now_sec,
                        duration_sec,
                    });
                    // Next cycle starts exactly when this one ends
                    self.timeline
                        .schedule(now_sec + duration_sec, DroneTask::Sweep(i));
                }
                DroneTask::Drift(i) => {
                    let target_cents = self
                        .rng
                        .gen_range(-DRIFT_TARGET_MAX_CENTS..DRIFT_TARGET_MAX_CENTS);
                    let ramp_sec = self.rng.gen_range(DRIFT_RAMP_MIN_SEC..DRIFT_RAMP_MAX_SEC);
                    let wait_sec = self.rng.gen_range(DRIFT_WAIT_MIN_SEC..DRIFT_WAIT_MAX_SEC);
                    self.tones[i].detune_cents = target_cents;
                    out_events.push(AudioEvent::DetuneRamp {
                        tone: i,
                        target_cents,
                        end_sec: now_sec + ramp_sec,
                    });
                    self.timeline
                        .schedule(now_sec + ramp_sec + wait_sec, DroneTask::Drift(i));
                }
            }
        }
    }

    /// Fire time of the next pending sweep or drift task.
    pub fn next_fire_at(&self) -> Option<f64> {
        self.timeline.next_fire_at()
    }
}
