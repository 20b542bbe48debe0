pub mod dsp;
pub mod error;
pub mod input;
pub mod profile;

use wasm_bindgen::prelude::*;

use crate::dsp::pipeline::SynthesisPipeline;
use crate::dsp::wavetable::Waveform;
use crate::error::CoreError;
use crate::input::{ConstantSource, FrequencySource};
use crate::profile::{AutoTuneParams, Profile};

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the aethervox-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// Build a one-off profile for the render entry points, validating the
/// waveform name and render parameters up front.
fn tone_profile(
    waveform: &str,
    strength: f64,
    glide_rate: f64,
    seconds: f64,
    sample_rate: u32,
) -> Result<Profile, CoreError> {
    if Waveform::from_name(waveform).is_none() {
        return Err(CoreError::UnknownWaveform {
            name: waveform.to_string(),
        });
    }
    if !(seconds > 0.0) {
        return Err(CoreError::InvalidParameter {
            what: format!("duration must be positive, got {seconds}"),
        });
    }
    if sample_rate == 0 {
        return Err(CoreError::InvalidParameter {
            what: "sample rate must be positive".to_string(),
        });
    }
    Ok(Profile {
        name: "tone".to_string(),
        waveform: waveform.to_string(),
        autotune: Some(AutoTuneParams {
            strength,
            glide_rate,
        }),
        effect: Default::default(),
    })
}

fn render_tone_pcm(
    frequency: f64,
    waveform: &str,
    strength: f64,
    glide_rate: f64,
    seconds: f64,
    sample_rate: u32,
) -> Result<(SynthesisPipeline, ConstantSource, usize), CoreError> {
    let profile = tone_profile(waveform, strength, glide_rate, seconds, sample_rate)?;
    let mut pipeline = SynthesisPipeline::new(sample_rate as f64);
    pipeline.set_profile(&profile);
    let source = ConstantSource::new(frequency);
    let num_samples = (seconds * sample_rate as f64) as usize;
    Ok((pipeline, source, num_samples))
}

/// WASM-exposed: render an auto-tuned tone to a WAV byte array.
#[wasm_bindgen]
pub fn render_tone_wav(
    frequency: f64,
    waveform: &str,
    strength: f64,
    glide_rate: f64,
    seconds: f64,
    sample_rate: u32,
) -> Result<Vec<u8>, JsValue> {
    let (mut pipeline, mut source, num_samples) =
        render_tone_pcm(frequency, waveform, strength, glide_rate, seconds, sample_rate)
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
    Ok(dsp::renderer::render_wav(
        &mut pipeline,
        &mut source,
        num_samples,
        sample_rate,
    ))
}

/// WASM-exposed: render an auto-tuned tone to mono f32 samples.
/// Returns the raw audio buffer for AudioWorklet playback.
#[wasm_bindgen]
pub fn render_tone_samples(
    frequency: f64,
    waveform: &str,
    strength: f64,
    glide_rate: f64,
    seconds: f64,
    sample_rate: u32,
) -> Result<Vec<f32>, JsValue> {
    let (mut pipeline, mut source, num_samples) =
        render_tone_pcm(frequency, waveform, strength, glide_rate, seconds, sample_rate)
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let samples: Vec<f32> = (0..num_samples)
        .map(|_| pipeline.process_sample(source.next_frequency()) as f32)
        .collect();
    Ok(samples)
}

/// WASM-exposed: the built-in profile bank as a JS value.
#[wasm_bindgen]
pub fn default_profiles() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&Profile::default_bank())
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}
