//! Pitch Quantizer — maps an arbitrary frequency to the nearest note.
//!
//! Inputs are clamped to the playable window before the search, so the
//! quantizer always returns a real note frequency no matter how wild the
//! antenna estimate is.

use super::note_table::NoteTable;

/// Bottom of the playable window (C2). Inputs below this are raised to it
/// before the nearest-note search.
pub const LOWEST_PLAYABLE_HZ: f64 = 65.41;

/// Nearest-note lookup over a [`NoteTable`].
///
/// The search is a linear scan in ascending order keeping the entry at
/// strictly smaller distance, so exact ties between two neighbors resolve to
/// the lower note. At 60 entries the scan is bounded and cheap; a larger
/// table would want the closed form `round(12·log2(f/440) + 49)` instead.
#[derive(Debug, Clone)]
pub struct PitchQuantizer {
    table: NoteTable,
}

impl PitchQuantizer {
    pub fn new(table: NoteTable) -> Self {
        PitchQuantizer { table }
    }

    /// The frequency of the note nearest to `input_freq`.
    ///
    /// Always returns a member of the note table; out-of-window inputs are
    /// clamped to `[C2, table top]` first.
    pub fn nearest(&self, input_freq: f64) -> f64 {
        let input = input_freq.clamp(LOWEST_PLAYABLE_HZ, self.table.highest());

        let mut closest_freq = self.table.lowest_playable();
        let mut closest_distance = f64::INFINITY;

        for &note_freq in self.table.frequencies() {
            let distance = (input - note_freq).abs();
            if distance < closest_distance {
                closest_distance = distance;
                closest_freq = note_freq;
            }
        }

        closest_freq
    }

    /// Whether `input_freq` lies outside the playable window and would be
    /// clamped by [`nearest`](Self::nearest).
    pub fn clamped(&self, input_freq: f64) -> bool {
        input_freq < LOWEST_PLAYABLE_HZ || input_freq > self.table.highest()
    }

    pub fn table(&self) -> &NoteTable {
        &self.table
    }
}

impl Default for PitchQuantizer {
    fn default() -> Self {
        PitchQuantizer::new(NoteTable::new())
    }
}
