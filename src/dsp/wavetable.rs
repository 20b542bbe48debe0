//! Wavetables — precomputed one-cycle amplitude tables.
//!
//! Four 256-entry tables (sine, square, sawtooth, triangle) generated once
//! at startup and read-only afterwards. The oscillator indexes them with the
//! top bits of its phase accumulator, so per-sample cost is a single lookup.

use std::f64::consts::TAU;

/// Number of samples in each one-cycle table. A power of two so the phase
/// accumulator's top bits index it directly.
pub const TABLE_SIZE: usize = 256;

/// Supported waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Parse a waveform name. Unknown names yield `None`; callers decide
    /// whether that means silence (the pipeline) or an error (profile
    /// loading).
    pub fn from_name(name: &str) -> Option<Waveform> {
        match name {
            "sine" => Some(Waveform::Sine),
            "square" => Some(Waveform::Square),
            "sawtooth" | "saw" => Some(Waveform::Sawtooth),
            "triangle" => Some(Waveform::Triangle),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
        }
    }
}

/// The four precomputed one-cycle tables.
///
/// Immutable after construction and freely shareable between oscillators.
#[derive(Debug, Clone)]
pub struct WavetableBank {
    sine: [f64; TABLE_SIZE],
    square: [f64; TABLE_SIZE],
    sawtooth: [f64; TABLE_SIZE],
    triangle: [f64; TABLE_SIZE],
}

impl WavetableBank {
    /// Precompute all four tables.
    pub fn new() -> Self {
        let mut sine = [0.0; TABLE_SIZE];
        let mut square = [0.0; TABLE_SIZE];
        let mut sawtooth = [0.0; TABLE_SIZE];
        let mut triangle = [0.0; TABLE_SIZE];

        for i in 0..TABLE_SIZE {
            // Position within the cycle, [0, 1)
            let position = i as f64 / TABLE_SIZE as f64;

            sine[i] = (position * TAU).sin();

            square[i] = if i < TABLE_SIZE / 2 { 1.0 } else { -1.0 };

            sawtooth[i] = position * 2.0 - 1.0;

            triangle[i] = if i < TABLE_SIZE / 2 {
                position * 4.0 - 1.0
            } else {
                3.0 - position * 4.0
            };
        }

        WavetableBank {
            sine,
            square,
            sawtooth,
            triangle,
        }
    }

    /// The one-cycle table for `waveform`.
    pub fn table(&self, waveform: Waveform) -> &[f64; TABLE_SIZE] {
        match waveform {
            Waveform::Sine => &self.sine,
            Waveform::Square => &self.square,
            Waveform::Sawtooth => &self.sawtooth,
            Waveform::Triangle => &self.triangle,
        }
    }
}

impl Default for WavetableBank {
    fn default() -> Self {
        WavetableBank::new()
    }
}
