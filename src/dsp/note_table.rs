//! Note Table — equal-temperament reference frequencies.
//!
//! Sixty notes in piano-key numbering with A4 = 440 Hz at index 49, each
//! entry `440 × 2^((i − 49) / 12)`. The instrument's playable window starts
//! at C2 (~65.41 Hz, index 16); the sub-C2 entries keep the A4 reference at
//! its standard key index and are never selected by the quantizer, which
//! clamps its input to the playable window first.

/// Number of notes in the table.
pub const NUM_NOTES: usize = 60;

/// A4 tuning reference in Hz.
pub const REFERENCE_A4: f64 = 440.0;

/// Piano-key index of A4 within the table.
pub const REFERENCE_INDEX: usize = 49;

/// Index of C2, the lowest playable note.
pub const C2_INDEX: usize = 16;

/// Ordered table of equal-temperament note frequencies.
///
/// Strictly increasing, built once, immutable afterwards.
#[derive(Debug, Clone)]
pub struct NoteTable {
    frequencies: [f64; NUM_NOTES],
}

impl NoteTable {
    /// Build the table from the equal-temperament formula.
    pub fn new() -> Self {
        let mut frequencies = [0.0; NUM_NOTES];
        for (i, freq) in frequencies.iter_mut().enumerate() {
            let semitones_from_a4 = i as f64 - REFERENCE_INDEX as f64;
            *freq = REFERENCE_A4 * (semitones_from_a4 / 12.0).exp2();
        }
        NoteTable { frequencies }
    }

    /// Frequency of the note at `index`, or `None` past the end of the range.
    pub fn frequency(&self, index: usize) -> Option<f64> {
        self.frequencies.get(index).copied()
    }

    /// C2, the bottom of the playable window.
    pub fn lowest_playable(&self) -> f64 {
        self.frequencies[C2_INDEX]
    }

    /// The highest note in the table.
    pub fn highest(&self) -> f64 {
        self.frequencies[NUM_NOTES - 1]
    }

    /// All note frequencies in ascending order.
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn len(&self) -> usize {
        NUM_NOTES
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for NoteTable {
    fn default() -> Self {
        NoteTable::new()
    }
}
