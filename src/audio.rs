use crate::core::{AudioEvent, DroneEngine, ToneParams, Waveform};
use crate::core::{
    GLITCH_BURST_ATTACK_SEC, GLITCH_BURST_LENGTH_SEC, GLITCH_BURST_PEAK_GAIN,
    GLITCH_BURST_SPACING_SEC, LFO_DEPTH, LFO_FREQUENCY_HZ, LFO_OFFSET, MASTER_GAIN_UNMUTED,
    NOISE_BUFFER_SECONDS, NOISE_FILTER_HZ, NOISE_FILTER_Q, NOISE_GAIN, TONE_FILTER_CUTOFF_HZ,
    TONE_FILTER_Q,
};
use web_sys as web;

/// Signal path of one drone tone: oscillator -> lowpass -> gain -> master.
/// Started at construction and never stopped.
pub struct ToneChain {
    pub oscillator: web::OscillatorNode,
    pub filter: web::BiquadFilterNode,
    pub gain: web::GainNode,
}

/// The fixed audio graph: four tone chains, a looped noise texture, and an
/// amplitude LFO (offset + swing pair) breathing the master bus.
pub struct DroneGraph {
    pub audio_ctx: web::AudioContext,
    pub master_gain: web::GainNode,
    pub tones: Vec<ToneChain>,
    lfo_gain: web::GainNode,
    lfo_offset: web::ConstantSourceNode,
    muted: bool,
}

fn create_gain(
    audio_ctx: &web::AudioContext,
    value: f32,
    label: &str,
) -> Result<web::GainNode, ()> {
    match web::GainNode::new(audio_ctx) {
        Ok(g) => {
            g.gain().set_value(value);
            Ok(g)
        }
        Err(e) => {
            log::error!("{} GainNode error: {:?}", label, e);
            Err(())
        }
    }
}

fn oscillator_type(waveform: Waveform) -> web::OscillatorType {
    match waveform {
        Waveform::Sine => web::OscillatorType::Sine,
        Waveform::Square => web::OscillatorType::Square,
    }
}

fn build_tone_chain(
    audio_ctx: &web::AudioContext,
    params: &ToneParams,
    master_gain: &web::GainNode,
) -> Result<ToneChain, ()> {
    let oscillator = web::OscillatorNode::new(audio_ctx).map_err(|e| {
        log::error!("OscillatorNode error: {:?}", e);
    })?;
    oscillator.set_type(oscillator_type(params.waveform));
    oscillator.frequency().set_value(params.base_hz);
    oscillator.detune().set_value(params.detune_cents);

    let filter = web::BiquadFilterNode::new(audio_ctx).map_err(|e| {
        log::error!("BiquadFilterNode error: {:?}", e);
    })?;
    filter.set_type(web::BiquadFilterType::Lowpass);
    filter.frequency().set_value(TONE_FILTER_CUTOFF_HZ);
    filter.q().set_value(TONE_FILTER_Q);

    let gain = create_gain(audio_ctx, params.gain, "Tone")?;

    _ = oscillator.connect_with_audio_node(&filter);
    _ = filter.connect_with_audio_node(&gain);
    _ = gain.connect_with_audio_node(master_gain);
    _ = oscillator.start();

    Ok(ToneChain {
        oscillator,
        filter,
        gain,
    })
}

// Looped broadband noise through a bandpass for texture
fn build_noise(audio_ctx: &web::AudioContext, master_gain: &web::GainNode) -> Result<(), ()> {
    let sr = audio_ctx.sample_rate();
    let len = (sr * NOISE_BUFFER_SECONDS) as u32;
    let buffer = audio_ctx.create_buffer(1, len, sr).map_err(|e| {
        log::error!("noise buffer error: {:?}", e);
    })?;
    // xorshift32 keeps the texture deterministic and dependency-free
    let mut seed: u32 = 0x1234ABCD;
    let mut samples: Vec<f32> = vec![0.0; len as usize];
    for s in samples.iter_mut() {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        *s = (seed as f32 / u32::MAX as f32) * 2.0 - 1.0;
    }
    _ = buffer.copy_to_channel(&mut samples, 0);

    let source = audio_ctx.create_buffer_source().map_err(|e| {
        log::error!("AudioBufferSourceNode error: {:?}", e);
    })?;
    source.set_buffer(Some(&buffer));
    source.set_loop(true);

    let filter = web::BiquadFilterNode::new(audio_ctx).map_err(|e| {
        log::error!("BiquadFilterNode error: {:?}", e);
    })?;
    filter.set_type(web::BiquadFilterType::Bandpass);
    filter.frequency().set_value(NOISE_FILTER_HZ);
    filter.q().set_value(NOISE_FILTER_Q);

    let gain = create_gain(audio_ctx, NOISE_GAIN, "Noise")?;
    _ = source.connect_with_audio_node(&filter);
    _ = filter.connect_with_audio_node(&gain);
    _ = gain.connect_with_audio_node(master_gain);
    _ = source.start();
    Ok(())
}

impl DroneGraph {
    /// Build the whole graph from the engine's tone parameters. The master
    /// bus starts at zero gain (the page loads muted); oscillators run from
    /// the first moment regardless.
    pub fn build(audio_ctx: web::AudioContext, tones: &[ToneParams]) -> Result<Self, ()> {
        let master_gain = create_gain(&audio_ctx, 0.0, "Master")?;
        _ = master_gain.connect_with_audio_node(&audio_ctx.destination());

        let chains = tones
            .iter()
            .map(|p| build_tone_chain(&audio_ctx, p, &master_gain))
            .collect::<Result<Vec<_>, ()>>()?;

        build_noise(&audio_ctx, &master_gain)?;

        // Amplitude LFO summed with a constant floor into the master gain
        let lfo = web::OscillatorNode::new(&audio_ctx).map_err(|e| {
            log::error!("LFO OscillatorNode error: {:?}", e);
        })?;
        lfo.frequency().set_value(LFO_FREQUENCY_HZ);
        let lfo_gain = create_gain(&audio_ctx, LFO_DEPTH, "LFO depth")?;
        let lfo_offset = web::ConstantSourceNode::new(&audio_ctx).map_err(|e| {
            log::error!("ConstantSourceNode error: {:?}", e);
        })?;
        lfo_offset.offset().set_value(LFO_OFFSET);

        _ = lfo.connect_with_audio_node(&lfo_gain);
        _ = lfo_gain.connect_with_audio_param(&master_gain.gain());
        _ = lfo_offset.connect_with_audio_param(&master_gain.gain());
        _ = lfo.start();
        _ = lfo_offset.start();

        Ok(Self {
            audio_ctx,
            master_gain,
            tones: chains,
            lfo_gain,
            lfo_offset,
            muted: true,
        })
    }

    pub fn current_time(&self) -> f64 {
        self.audio_ctx.current_time()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Apply scheduled parameter ramps from the engine to the oscillators.
    pub fn apply(&self, events: &[AudioEvent]) {
        for ev in events {
            match *ev {
                AudioEvent::FrequencySweep {
                    tone,
                    base_hz,
                    peak_hz,
                    start_sec,
                    duration_sec,
                } => {
                    if let Some(chain) = self.tones.get(tone) {
                        let f = chain.oscillator.frequency();
                        _ = f.set_value_at_time(base_hz, start_sec);
                        _ = f.linear_ramp_to_value_at_time(peak_hz, start_sec + duration_sec / 2.0);
                        _ = f.linear_ramp_to_value_at_time(base_hz, start_sec + duration_sec);
                    }
                }
                AudioEvent::DetuneRamp {
                    tone,
                    target_cents,
                    end_sec,
                } => {
                    if let Some(chain) = self.tones.get(tone) {
                        _ = chain
                            .oscillator
                            .detune()
                            .linear_ramp_to_value_at_time(target_cents, end_sec);
                    }
                }
            }
        }
    }

    /// Three staggered square-wave bursts with a 1 ms attack, decaying to
    /// zero over each burst.
    pub fn play_glitch_burst(&self, frequencies_hz: &[f32]) {
        let now = self.audio_ctx.current_time();
        for (i, &freq) in frequencies_hz.iter().enumerate() {
            let osc = match web::OscillatorNode::new(&self.audio_ctx) {
                Ok(o) => o,
                Err(_) => continue,
            };
            osc.set_type(web::OscillatorType::Square);
            osc.frequency().set_value(freq);

            let gain = match create_gain(&self.audio_ctx, 0.0, "Glitch") {
                Ok(g) => g,
                Err(()) => continue,
            };
            _ = osc.connect_with_audio_node(&gain);
            _ = gain.connect_with_audio_node(&self.master_gain);

            let start = now + i as f64 * GLITCH_BURST_SPACING_SEC;
            let g = gain.gain();
            _ = g.set_value_at_time(0.0, start);
            _ = g.linear_ramp_to_value_at_time(GLITCH_BURST_PEAK_GAIN, start + GLITCH_BURST_ATTACK_SEC);
            _ = g.linear_ramp_to_value_at_time(0.0, start + GLITCH_BURST_LENGTH_SEC);
            _ = osc.start_with_when(start);
            _ = osc.stop_with_when(start + GLITCH_BURST_LENGTH_SEC);
        }
    }

    /// Mute by detaching the LFO pair and zeroing the master bus. Oscillators
    /// and scheduling keep running silently.
    pub fn set_muted(&mut self, muted: bool) {
        if muted {
            _ = self.lfo_gain.disconnect();
            _ = self.lfo_offset.disconnect();
            self.master_gain.gain().set_value(0.0);
        } else {
            _ = self.lfo_gain.connect_with_audio_param(&self.master_gain.gain());
            _ = self
                .lfo_offset
                .connect_with_audio_param(&self.master_gain.gain());
            self.master_gain.gain().set_value(MASTER_GAIN_UNMUTED);
        }
        self.muted = muted;
    }
}

/// The audio half of the app: the WebAudio graph plus the pure engine that
/// schedules its parameter ramps. `None` until the first user gesture, and
/// stays `None` if the audio subsystem is unavailable.
pub struct AudioState {
    pub graph: DroneGraph,
    pub engine: DroneEngine,
}

pub fn init_audio(seed: u64) -> Result<AudioState, ()> {
    let audio_ctx = web::AudioContext::new().map_err(|e| {
        log::error!("audio unavailable: {:?}", e);
    })?;
    _ = audio_ctx.resume();
    let engine = DroneEngine::new(audio_ctx.current_time(), seed);
    let graph = DroneGraph::build(audio_ctx, engine.tones())?;
    log::info!("[audio] drone graph started ({} tones)", graph.tones.len());
    Ok(AudioState { graph, engine })
}
