//! Auto-Tune Engine — pitch correction with glide and strength blending.
//!
//! Converts a noisy raw frequency estimate into a musically quantized,
//! click-free pitch. The engine tracks three frequencies: the raw input it
//! last reacted to, the quantized note it is gliding toward, and the smoothed
//! frequency it currently outputs. Each call advances the glide by one step,
//! so callers must invoke it at a constant cadence (once per audio sample)
//! for reproducible glide times.

use super::note_table::REFERENCE_A4;
use super::quantizer::PitchQuantizer;

/// Input changes smaller than this (in Hz) do not retrigger the quantizer.
/// Keeps sub-Hz antenna jitter from hammering the note search.
const CHANGE_THRESHOLD_HZ: f64 = 1.0;

/// Stateful pitch corrector.
///
/// Owned and independently instantiable — one engine per voice, no shared
/// globals — so multiple instances and tests never interfere.
#[derive(Debug, Clone)]
pub struct AutoTuneEngine {
    quantizer: PitchQuantizer,
    /// The smoothed frequency currently being output.
    current_freq: f64,
    /// The quantized note being glided toward.
    target_freq: f64,
    /// Most recent raw input that retriggered the quantizer.
    last_input_freq: f64,
    /// Raw inputs that fell outside the playable range and were clamped.
    clamp_events: u64,
    /// Non-finite raw inputs replaced with the held target.
    invalid_inputs: u64,
}

impl AutoTuneEngine {
    pub fn new(quantizer: PitchQuantizer) -> Self {
        AutoTuneEngine {
            quantizer,
            current_freq: REFERENCE_A4,
            target_freq: REFERENCE_A4,
            last_input_freq: 0.0,
            clamp_events: 0,
            invalid_inputs: 0,
        }
    }

    /// Reset tracking state to the A4 reference.
    ///
    /// Call on session start and on every profile switch so the first glide
    /// of the new profile starts from a neutral pitch instead of wherever the
    /// previous profile left off.
    pub fn reset(&mut self) {
        self.current_freq = REFERENCE_A4;
        self.target_freq = REFERENCE_A4;
        self.last_input_freq = 0.0;
    }

    /// Process one raw frequency estimate and return the corrected frequency.
    ///
    /// - `input_freq`: raw estimate in Hz. Non-finite values are replaced
    ///   with the current target (the held note continues); negative values
    ///   are raised to zero. NaN never enters the tracking state.
    /// - `strength`: how much correction to apply, clamped to [0, 1].
    ///   0.0 outputs the raw input unchanged (internal state keeps gliding),
    ///   1.0 outputs the fully corrected frequency.
    /// - `glide_rate`: per-call fraction of the remaining distance to cover,
    ///   clamped to [0, 1]. 1.0 snaps to the target immediately, 0.0 freezes
    ///   the current frequency.
    ///
    /// Both parameters are clamped at this boundary, consistently with every
    /// other entry point; a NaN parameter acts as 0.
    pub fn process(&mut self, input_freq: f64, strength: f64, glide_rate: f64) -> f64 {
        let input_freq = self.sanitize(input_freq);
        let strength = clamp_unit(strength);
        let glide_rate = clamp_unit(glide_rate);

        // Retrigger the note search only on meaningful input changes.
        if (input_freq - self.last_input_freq).abs() > CHANGE_THRESHOLD_HZ {
            if self.quantizer.clamped(input_freq) {
                self.clamp_events += 1;
                log::debug!(
                    "raw frequency {input_freq:.2} Hz outside playable range, clamping"
                );
            }
            self.target_freq = self.quantizer.nearest(input_freq);
            self.last_input_freq = input_freq;
        }

        // One-pole exponential approach toward the target. Never overshoots
        // for glide_rate <= 1.
        let difference = self.target_freq - self.current_freq;
        self.current_freq += difference * glide_rate;

        // Blend corrected vs. raw by the strength factor.
        let correction = self.current_freq - input_freq;
        input_freq + correction * strength
    }

    /// Replace values the antenna side can feed us but the tracking state
    /// must never absorb.
    fn sanitize(&mut self, input_freq: f64) -> f64 {
        if !input_freq.is_finite() {
            self.invalid_inputs += 1;
            log::debug!("non-finite raw frequency, holding current target");
            return self.target_freq;
        }
        input_freq.max(0.0)
    }

    /// The smoothed frequency the engine is currently outputting.
    pub fn current_frequency(&self) -> f64 {
        self.current_freq
    }

    /// The quantized note currently being glided toward.
    pub fn target_frequency(&self) -> f64 {
        self.target_freq
    }

    /// Number of raw inputs that were clamped into the playable range.
    pub fn clamp_events(&self) -> u64 {
        self.clamp_events
    }

    /// Number of non-finite raw inputs that were replaced.
    pub fn invalid_inputs(&self) -> u64 {
        self.invalid_inputs
    }

    pub fn quantizer(&self) -> &PitchQuantizer {
        &self.quantizer
    }
}

impl Default for AutoTuneEngine {
    fn default() -> Self {
        AutoTuneEngine::new(PitchQuantizer::default())
    }
}

/// Clamp a parameter into [0, 1]; NaN collapses to 0 so it can never reach
/// the tracking state through the glide arithmetic.
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Convert an explicit glide time constant into a per-call rate.
///
/// `seconds` is the time for the glide to cover ~63% of the remaining
/// distance when [`AutoTuneEngine::process`] is called once per sample at
/// `sample_rate`. This decouples perceived glide speed from call cadence;
/// the per-call contract of `process` itself is unchanged. Non-positive or
/// non-finite time constants snap immediately (rate 1.0).
pub fn glide_rate_from_time(seconds: f64, sample_rate: f64) -> f64 {
    if !(seconds > 0.0) || !(sample_rate > 0.0) {
        return 1.0;
    }
    1.0 - (-1.0 / (seconds * sample_rate)).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_correction_converges_to_quantized_target() {
        let mut engine = AutoTuneEngine::default();
        let mut result = 0.0;
        for _ in 0..50 {
            result = engine.process(442.0, 1.0, 0.5);
        }
        assert!(
            (result - 440.0).abs() < 1.0,
            "442 Hz at full strength should converge to 440 Hz, got {result}"
        );
    }

    #[test]
    fn partial_correction_reaches_midpoint() {
        let mut engine = AutoTuneEngine::default();
        let mut result = 0.0;
        for _ in 0..100 {
            result = engine.process(442.0, 0.5, 0.5);
        }
        // Steady state: halfway between raw 442 and corrected 440
        assert!(
            (result - 441.0).abs() < 0.5,
            "50% strength should settle near 441 Hz, got {result}"
        );
    }

    #[test]
    fn zero_strength_outputs_raw_input() {
        let mut engine = AutoTuneEngine::default();
        for _ in 0..20 {
            let result = engine.process(442.0, 0.0, 0.5);
            assert!(
                (result - 442.0).abs() < 1e-9,
                "0% strength must pass the input through, got {result}"
            );
        }
    }

    #[test]
    fn full_glide_snaps_in_one_call() {
        let mut engine = AutoTuneEngine::default();
        let result = engine.process(523.0, 1.0, 1.0);
        // 523 Hz is within 1 Hz of C5 (523.25) but far from the initial
        // 440 Hz state, so the target retriggers and the glide snaps.
        assert!(
            (result - 523.25).abs() < 0.5,
            "glide_rate 1.0 should reach the target in one call, got {result}"
        );
    }

    #[test]
    fn slow_glide_does_not_snap() {
        let mut engine = AutoTuneEngine::default();
        let result = engine.process(523.0, 1.0, 0.01);
        let target = 523.25;
        assert!(
            (result - target).abs() > 10.0,
            "glide_rate 0.01 should not reach the target in one call"
        );
        // But it must have moved toward it from the 440 Hz reset state.
        assert!(
            engine.current_frequency() > 440.0,
            "glide should move toward the target"
        );
    }

    #[test]
    fn sudden_change_moves_without_jumping() {
        let mut engine = AutoTuneEngine::default();
        for _ in 0..100 {
            engine.process(440.0, 1.0, 0.3);
        }
        let before = engine.current_frequency();
        let after = engine.process(880.0, 1.0, 0.3);
        assert!(after > before, "output should move toward the new target");
        assert!(
            (after - 880.0).abs() > 10.0,
            "output should not jump straight to the new target"
        );
    }

    #[test]
    fn output_stays_in_playable_range() {
        let mut engine = AutoTuneEngine::default();
        let inputs = [70.0, 200.0, 441.0, 1999.0, 2090.0, 66.0, 1000.0];
        for &hz in inputs.iter().cycle().take(500) {
            let out = engine.process(hz, 1.0, 0.3);
            assert!(
                (60.0..=2100.0).contains(&out),
                "output {out} left the playable range for input {hz}"
            );
        }
    }

    #[test]
    fn glide_never_overshoots() {
        let mut engine = AutoTuneEngine::default();
        let mut prev = engine.current_frequency();
        for _ in 0..200 {
            engine.process(880.0, 1.0, 0.2);
            let now = engine.current_frequency();
            assert!(now >= prev, "upward glide must be monotonic");
            assert!(now <= 880.0 + 1e-9, "glide must not overshoot the target");
            prev = now;
        }
    }

    #[test]
    fn reset_returns_to_reference() {
        let mut engine = AutoTuneEngine::default();
        for _ in 0..50 {
            engine.process(880.0, 1.0, 0.5);
        }
        engine.reset();
        assert!((engine.current_frequency() - 440.0).abs() < 1e-9);
        assert!((engine.target_frequency() - 440.0).abs() < 1e-9);
    }

    #[test]
    fn sub_hertz_jitter_keeps_target() {
        let mut engine = AutoTuneEngine::default();
        engine.process(440.0, 1.0, 1.0);
        let target = engine.target_frequency();
        // Jitter below the 1 Hz threshold must not retrigger the search
        engine.process(440.4, 1.0, 1.0);
        engine.process(439.7, 1.0, 1.0);
        assert!(
            (engine.target_frequency() - target).abs() < 1e-9,
            "sub-Hz jitter should not change the target"
        );
    }

    #[test]
    fn nan_input_does_not_corrupt_state() {
        let mut engine = AutoTuneEngine::default();
        engine.process(442.0, 1.0, 0.5);
        let out = engine.process(f64::NAN, 1.0, 0.5);
        assert!(out.is_finite(), "NaN input must not produce NaN output");
        assert!(
            engine.current_frequency().is_finite(),
            "NaN must never enter the tracking state"
        );
        assert_eq!(engine.invalid_inputs(), 1);
        // The engine keeps playing the held note afterwards
        let next = engine.process(442.0, 1.0, 0.5);
        assert!(next.is_finite());
    }

    #[test]
    fn negative_input_clamps_to_range() {
        let mut engine = AutoTuneEngine::default();
        let out = engine.process(-100.0, 1.0, 1.0);
        assert!(
            (out - engine.quantizer().table().lowest_playable()).abs() < 0.01,
            "negative input should land on the lowest playable note, got {out}"
        );
    }

    #[test]
    fn out_of_range_parameters_behave_as_clamped() {
        let mut a = AutoTuneEngine::default();
        let mut b = AutoTuneEngine::default();
        let wild = a.process(442.0, 3.0, 7.0);
        let tame = b.process(442.0, 1.0, 1.0);
        assert!(
            (wild - tame).abs() < 1e-9,
            "strength/glide above 1.0 must clamp, got {wild} vs {tame}"
        );
    }

    #[test]
    fn nan_parameters_do_not_corrupt_state() {
        let mut engine = AutoTuneEngine::default();
        let out = engine.process(442.0, f64::NAN, f64::NAN);
        assert!(out.is_finite(), "NaN parameters must not produce NaN output");
        assert!(engine.current_frequency().is_finite());
        // NaN acts as zero: no correction applied
        assert!((out - 442.0).abs() < 1e-9);
    }

    #[test]
    fn clamp_counter_tracks_out_of_range_inputs() {
        let mut engine = AutoTuneEngine::default();
        engine.process(10.0, 1.0, 0.5);
        engine.process(5000.0, 1.0, 0.5);
        engine.process(440.0, 1.0, 0.5);
        assert_eq!(engine.clamp_events(), 2);
    }

    #[test]
    fn glide_time_constant_conversion() {
        let sr = 44100.0;
        let fast = glide_rate_from_time(0.001, sr);
        let slow = glide_rate_from_time(0.5, sr);
        assert!(fast > slow, "shorter time constants give larger rates");
        assert!(slow > 0.0 && slow < 1.0);
        assert!((glide_rate_from_time(0.0, sr) - 1.0).abs() < 1e-12);
        assert!((glide_rate_from_time(f64::NAN, sr) - 1.0).abs() < 1e-12);

        // Applying the rate once per sample for `seconds` worth of samples
        // covers ~63% of a step.
        let rate = glide_rate_from_time(0.1, sr);
        let mut level = 0.0;
        for _ in 0..(0.1 * sr) as usize {
            level += (1.0 - level) * rate;
        }
        assert!(
            (level - 0.632).abs() < 0.01,
            "one time constant should cover ~63% of the step, got {level}"
        );
    }
}
