//! Sound Profiles — named playing configurations.
//!
//! A profile bundles everything the pipeline needs to switch the instrument's
//! character at once: which waveform to synthesize, whether pitch correction
//! is active and how strong, and which effect slot the output feeds. Profiles
//! are plain serializable data so front ends can store and edit them as JSON.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Effect slot markers — the extension point for post-oscillator processing.
///
/// No effect DSP ships in this crate; a slot names which external processor
/// the pipeline output should feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectSlot {
    None,
    Reverb,
    Distortion,
    Delay,
}

impl Default for EffectSlot {
    fn default() -> Self {
        EffectSlot::None
    }
}

/// Pitch-correction parameters for a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoTuneParams {
    /// Correction amount [0, 1]: 0 = raw pitch, 1 = fully corrected.
    pub strength: f64,
    /// Per-sample glide fraction [0, 1]: 1 snaps, small values glide slowly.
    pub glide_rate: f64,
}

/// A named playing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Waveform name: "sine", "square", "sawtooth", "triangle".
    pub waveform: String,
    /// Pitch correction; `None` plays the natural pitch.
    pub autotune: Option<AutoTuneParams>,
    #[serde(default)]
    pub effect: EffectSlot,
}

impl Default for Profile {
    fn default() -> Self {
        // Profile 0: full auto-tune on a sine wave with a smooth glide
        Profile {
            name: "autotune".to_string(),
            waveform: "sine".to_string(),
            autotune: Some(AutoTuneParams {
                strength: 1.0,
                glide_rate: 0.3,
            }),
            effect: EffectSlot::None,
        }
    }
}

impl Profile {
    /// The instrument's built-in profile bank.
    ///
    /// Slot 0 is the auto-tuned sine; slots 1–3 play natural pitch into the
    /// reverb, distortion, and delay effect slots.
    pub fn default_bank() -> Vec<Profile> {
        vec![
            Profile::default(),
            Profile {
                name: "reverb".to_string(),
                waveform: "square".to_string(),
                autotune: None,
                effect: EffectSlot::Reverb,
            },
            Profile {
                name: "distortion".to_string(),
                waveform: "sawtooth".to_string(),
                autotune: None,
                effect: EffectSlot::Distortion,
            },
            Profile {
                name: "delay".to_string(),
                waveform: "triangle".to_string(),
                autotune: None,
                effect: EffectSlot::Delay,
            },
        ]
    }

    /// Deserialize a profile from JSON.
    pub fn from_json(json: &str) -> Result<Profile, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bank_shape() {
        let bank = Profile::default_bank();
        assert_eq!(bank.len(), 4);
        assert_eq!(bank[0].name, "autotune");
        assert!(bank[0].autotune.is_some());
        for profile in &bank[1..] {
            assert!(
                profile.autotune.is_none(),
                "only slot 0 corrects pitch, {} should not",
                profile.name
            );
            assert_ne!(profile.effect, EffectSlot::None);
        }
    }

    #[test]
    fn json_round_trip() {
        for profile in Profile::default_bank() {
            let json = profile.to_json().unwrap();
            let back = Profile::from_json(&json).unwrap();
            assert_eq!(back, profile);
        }
    }

    #[test]
    fn effect_slot_defaults_when_missing() {
        let json = r#"{
            "name": "plain",
            "waveform": "sine",
            "autotune": null
        }"#;
        let profile = Profile::from_json(json).unwrap();
        assert_eq!(profile.effect, EffectSlot::None);
    }

    #[test]
    fn garbage_json_is_an_error() {
        let result = Profile::from_json("{not json");
        assert!(matches!(result, Err(CoreError::ProfileParse(_))));
    }

    #[test]
    fn autotune_params_survive_serialization() {
        let json = Profile::default().to_json().unwrap();
        let back = Profile::from_json(&json).unwrap();
        let params = back.autotune.unwrap();
        assert!((params.strength - 1.0).abs() < 1e-12);
        assert!((params.glide_rate - 0.3).abs() < 1e-12);
    }
}
