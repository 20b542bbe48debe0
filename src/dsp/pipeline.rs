//! Synthesis Pipeline — per-sample driver from raw frequency to audio.
//!
//! One call, one sample: the raw estimate runs through the auto-tune engine
//! (when the active profile corrects pitch), the corrected frequency
//! reprograms the oscillator, and the oscillator produces the sample. The
//! whole path is allocation-free and bounded, so it fits inside the ~22.7 µs
//! budget a 44.1 kHz sample tick allows.

use crate::input::FrequencySource;
use crate::profile::{AutoTuneParams, Profile};

use super::autotune::AutoTuneEngine;
use super::oscillator::Oscillator;
use super::wavetable::{Waveform, WavetableBank};

/// Audio sample rate the instrument runs at.
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Samples per output frame handed to the output side (~5.8 ms at 44.1 kHz).
pub const FRAME_SIZE: usize = 256;

/// Post-oscillator processing — the effect extension point.
///
/// Effects see the oscillator output in [-1, 1] and must return the same
/// range; they run before the boundary conversion to the output format.
pub trait Effect {
    fn process(&mut self, sample: f64) -> f64;

    /// Clear any internal state (delay lines, feedback paths).
    fn reset(&mut self) {}
}

/// The per-sample synthesis driver.
///
/// Owns one auto-tune engine, one oscillator, and the shared wavetable bank.
/// Single designated writer: drive it from exactly one execution context and
/// hand raw frequencies across threads with your own SPSC discipline.
pub struct SynthesisPipeline {
    engine: AutoTuneEngine,
    oscillator: Oscillator,
    bank: WavetableBank,
    autotune: Option<AutoTuneParams>,
    effect: Option<Box<dyn Effect>>,
    profile_name: String,
}

impl SynthesisPipeline {
    /// Pipeline running the default profile (auto-tuned sine).
    pub fn new(sample_rate: f64) -> Self {
        let mut pipeline = SynthesisPipeline {
            engine: AutoTuneEngine::default(),
            oscillator: Oscillator::new(Waveform::Sine, sample_rate),
            bank: WavetableBank::new(),
            autotune: None,
            effect: None,
            profile_name: String::new(),
        };
        pipeline.set_profile(&Profile::default());
        pipeline
    }

    /// Process one raw frequency estimate into one audio sample.
    pub fn process_sample(&mut self, raw_freq: f64) -> f64 {
        let frequency = match self.autotune {
            Some(params) => self
                .engine
                .process(raw_freq, params.strength, params.glide_rate),
            None => raw_freq,
        };

        self.oscillator.set_frequency(frequency);
        let sample = self.oscillator.next_sample(&self.bank);

        match &mut self.effect {
            Some(effect) => effect.process(sample),
            None => sample,
        }
    }

    /// Fill one output frame, converting each sample to i16 at the boundary.
    pub fn fill_frame(&mut self, source: &mut dyn FrequencySource, frame: &mut [i16]) {
        for slot in frame.iter_mut() {
            let sample = self.process_sample(source.next_frequency());
            *slot = sample_to_i16(sample);
        }
    }

    /// Switch the active profile.
    ///
    /// Installs the profile's waveform and correction parameters, then resets
    /// the auto-tune state so the new profile glides from a neutral pitch. A
    /// waveform name this build does not know deselects the oscillator's
    /// table — the profile plays silence rather than failing.
    pub fn set_profile(&mut self, profile: &Profile) {
        match Waveform::from_name(&profile.waveform) {
            Some(waveform) => self.oscillator.set_waveform(waveform),
            None => {
                log::warn!(
                    "profile '{}' names unknown waveform '{}', muting",
                    profile.name,
                    profile.waveform
                );
                self.oscillator.clear_waveform();
            }
        }
        self.autotune = profile.autotune;
        self.engine.reset();
        if let Some(effect) = &mut self.effect {
            effect.reset();
        }
        log::info!("profile '{}' active", profile.name);
        self.profile_name = profile.name.clone();
    }

    /// Install a processor in the effect slot.
    pub fn set_effect(&mut self, effect: Box<dyn Effect>) {
        self.effect = Some(effect);
    }

    pub fn clear_effect(&mut self) {
        self.effect = None;
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn engine(&self) -> &AutoTuneEngine {
        &self.engine
    }

    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }
}

/// Convert a [-1, 1] sample to the 16-bit PCM the output side consumes.
pub fn sample_to_i16(sample: f64) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0) as i16
}

/// Convert a [-1, 1] sample to a PWM compare level against `top`.
/// Silence maps to the mid-level, full scale to the rails.
pub fn sample_to_pwm_level(sample: f64, top: u16) -> u16 {
    let normalized = (sample.clamp(-1.0, 1.0) + 1.0) / 2.0;
    (normalized * top as f64).round() as u16
}
