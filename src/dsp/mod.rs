//! DSP core — per-sample pitch correction and waveform synthesis.
//!
//! All DSP runs in pure Rust for deterministic output across targets. The
//! same code drives the real-time frame path on hardware, the offline WAV
//! renderer, and WebAudio playback via AudioWorklet + WASM.

pub mod autotune;
pub mod note_table;
pub mod oscillator;
pub mod pipeline;
pub mod quantizer;
pub mod renderer;
pub mod wavetable;
