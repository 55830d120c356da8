// Shared audio/visual tuning constants, used by the engine core and the
// web frontend alike.

// Drone voicing: (base frequency Hz, gain) per tone. Low A, its fifth,
// a slightly sharp octave, and a quiet high harmony.
pub const DRONE_TONES: [(f32, f32); 4] =
    [(55.0, 0.1), (82.5, 0.03), (110.2, 0.02), (220.4, 0.015)];

// Initial per-oscillator detune spread (cents)
pub const INITIAL_DETUNE_SPREAD_CENTS: f32 = 1.0;

// Tone filter
pub const TONE_FILTER_CUTOFF_HZ: f32 = 400.0;
pub const TONE_FILTER_Q: f32 = 1.0;

// Frequency sweep cycles (seconds / Hz)
pub const SWEEP_DURATION_MIN_SEC: f64 = 8.0;
pub const SWEEP_DURATION_MAX_SEC: f64 = 12.0;
pub const SWEEP_AMOUNT_MIN_HZ: f32 = 2.0;
pub const SWEEP_AMOUNT_MAX_HZ: f32 = 4.0;

// Detune drift cycles
pub const DRIFT_TARGET_MAX_CENTS: f32 = 4.0;
pub const DRIFT_RAMP_MIN_SEC: f64 = 10.0;
pub const DRIFT_RAMP_MAX_SEC: f64 = 20.0;
pub const DRIFT_WAIT_MIN_SEC: f64 = 10.0;
pub const DRIFT_WAIT_MAX_SEC: f64 = 20.0;

// Noise texture
pub const NOISE_BUFFER_SECONDS: f32 = 2.0;
pub const NOISE_FILTER_HZ: f32 = 100.0;
pub const NOISE_FILTER_Q: f32 = 0.5;
pub const NOISE_GAIN: f32 = 0.005;

// Amplitude LFO: master gain breathes between offset-depth and offset+depth
pub const LFO_FREQUENCY_HZ: f32 = 0.025;
pub const LFO_DEPTH: f32 = 0.08;
pub const LFO_OFFSET: f32 = 0.07;

// Master output when unmuted; 0 while muted
pub const MASTER_GAIN_UNMUTED: f32 = 0.3;

// Glitch bursts
pub const GLITCH_INTERVAL_MIN_SEC: f64 = 2.0;
pub const GLITCH_INTERVAL_MAX_SEC: f64 = 6.0;
pub const GLITCH_DURATION_MIN_SEC: f64 = 0.1;
pub const GLITCH_DURATION_MAX_SEC: f64 = 0.3;
pub const GLITCH_BURST_COUNT: usize = 3;
pub const GLITCH_BURST_MIN_HZ: f32 = 2000.0;
pub const GLITCH_BURST_MAX_HZ: f32 = 10000.0;
pub const GLITCH_BURST_SPACING_SEC: f64 = 0.05;
pub const GLITCH_BURST_LENGTH_SEC: f64 = 0.05;
pub const GLITCH_BURST_ATTACK_SEC: f64 = 0.001;
pub const GLITCH_BURST_PEAK_GAIN: f32 = 0.1;

// Visual jitter applied around the captured centers while glitching:
// uniform in [-GLITCH_JITTER/2, +GLITCH_JITTER/2] per axis
pub const GLITCH_JITTER: f32 = 0.2;

// Particle spheres
pub const SPHERE_RADIUS: f32 = 5.0;
pub const SPHERE_RINGS: usize = 32;
pub const SPHERE_SEGMENTS: usize = 32;

// Orbit motion
pub const MOVE_RADIUS: f32 = 4.0;
pub const MOVE_SPEED: f32 = 0.001; // t increment per frame

// Fixed per-frame self-rotation rates (radians), counter-rotating
pub const SPIN_RATE_A: [f32; 3] = [0.001, 0.002, 0.001];
pub const SPIN_RATE_B: [f32; 3] = [-0.002, -0.001, -0.001];

// Opacity blend zone: dim points while they pass through the other sphere
pub const OPACITY_NEAR_FACTOR: f32 = 0.5; // d <= 0.5R -> OPACITY_MIN
pub const OPACITY_FAR_FACTOR: f32 = 1.5; // d >= 1.5R -> 1.0
pub const OPACITY_MIN: f32 = 0.5;
