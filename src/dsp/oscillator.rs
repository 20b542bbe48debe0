//! Oscillator — fixed-point phase-accumulator synthesis (DDS).
//!
//! A 32-bit unsigned phase accumulator advances by a per-sample increment and
//! wraps at 2^32, representing position within one waveform cycle. The top
//! eight bits index a 256-entry wavetable, so generating a sample is one
//! lookup and one wrapping add — O(1) with frequency resolution limited only
//! by the accumulator width (~0.01 Hz at 44.1 kHz).

use super::wavetable::{TABLE_SIZE, Waveform, WavetableBank};

/// Full range of the 32-bit phase accumulator.
const PHASE_SCALE: f64 = 4_294_967_296.0; // 2^32

/// Top-bit shift turning a phase into a table index:
/// 32 accumulator bits − log2(TABLE_SIZE).
const INDEX_SHIFT: u32 = 32 - TABLE_SIZE.trailing_zeros();

/// Phase-accumulator oscillator over a [`WavetableBank`].
///
/// A `None` waveform renders silence — the fallback for profiles that name
/// a waveform this build does not know.
#[derive(Debug, Clone)]
pub struct Oscillator {
    phase: u32,
    phase_increment: u32,
    waveform: Option<Waveform>,
    sample_rate: f64,
}

impl Oscillator {
    pub fn new(waveform: Waveform, sample_rate: f64) -> Self {
        Oscillator {
            phase: 0,
            phase_increment: 0,
            waveform: Some(waveform),
            sample_rate,
        }
    }

    /// Set the output frequency in Hz.
    ///
    /// The increment is `round((freq / sample_rate) × 2^32)` with cycles per
    /// sample pinned to [0, 1): zero, negative, and non-finite frequencies
    /// all yield a zero increment (a constant tone at the current phase),
    /// never a divide-by-zero or a negative step.
    pub fn set_frequency(&mut self, frequency: f64) {
        let mut cycles_per_sample = frequency / self.sample_rate;
        if !cycles_per_sample.is_finite() || cycles_per_sample < 0.0 {
            cycles_per_sample = 0.0;
        }
        // Just below one full cycle per sample; anything faster is garbage
        // the accumulator cannot represent.
        cycles_per_sample = cycles_per_sample.min((u32::MAX as f64) / PHASE_SCALE);
        self.phase_increment = (cycles_per_sample * PHASE_SCALE).round() as u32;
    }

    /// Switch the waveform; takes effect on the next generated sample.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = Some(waveform);
    }

    /// Deselect the waveform; subsequent samples are silence.
    pub fn clear_waveform(&mut self) {
        self.waveform = None;
    }

    /// Rewind the phase to the start of the cycle.
    pub fn reset(&mut self) {
        self.phase = 0;
    }

    /// Generate one sample in [-1, 1] and advance the phase.
    pub fn next_sample(&mut self, bank: &WavetableBank) -> f64 {
        let sample = match self.waveform {
            Some(waveform) => {
                let index = (self.phase >> INDEX_SHIFT) as usize;
                bank.table(waveform)[index]
            }
            None => 0.0,
        };

        self.phase = self.phase.wrapping_add(self.phase_increment);
        sample
    }

    pub fn waveform(&self) -> Option<Waveform> {
        self.waveform
    }

    /// The current per-sample phase step.
    pub fn phase_increment(&self) -> u32 {
        self.phase_increment
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}
