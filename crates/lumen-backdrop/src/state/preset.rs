use serde::{Deserialize, Serialize};

use crate::math::Hex;

/// Waveform family selected by a preset
///
/// The animation vector carries this as a continuous ordinal so the grid can
/// blend between neighbouring families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveShape {
    /// Smooth travelling sine/cosine field
    Wave,
    /// Higher-frequency jittered field
    Jitter,
    /// Sharpened ridges (cubed grid waveform)
    Ridges,
}

impl WaveShape {
    /// Position on the continuous shape axis
    #[inline]
    pub fn ordinal(self) -> f32 {
        match self {
            WaveShape::Wave => 0.0,
            WaveShape::Jitter => 1.0,
            WaveShape::Ridges => 2.0,
        }
    }
}

/// A fixed bundle of visual parameters for one page section
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PresetState {
    pub color: Hex,
    pub emissive: Hex,
    pub roughness: f32,
    pub metalness: f32,
    pub wave_shape: WaveShape,
    /// Spatial/temporal frequency of the grid waves
    pub frequency: f32,
    /// Vertical amplitude of the grid waves
    pub amplitude: f32,
    pub bloom: f32,
    pub particles: f32,
    /// Drives the bubble overlay, dust and screen fx
    pub overlay: f32,
    pub suppress_grid: bool,
    pub show_network: bool,
}

/// Identifier of a preset in the catalogue
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetId {
    #[default]
    Hero,
    Quantum,
    Semi,
    Extreme,
    Value,
    Medical,
}

static PRESETS: [PresetState; 6] = [
    // Hero
    PresetState {
        color: Hex(0xffffff),
        emissive: Hex(0x000000),
        roughness: 0.1,
        metalness: 1.0,
        wave_shape: WaveShape::Wave,
        frequency: 0.2,
        amplitude: 1.0,
        bloom: 0.55,
        particles: 0.1,
        overlay: 0.0,
        suppress_grid: false,
        show_network: false,
    },
    // Quantum
    PresetState {
        color: Hex(0x220011),
        emissive: Hex(0xff0055),
        roughness: 0.0,
        metalness: 0.8,
        wave_shape: WaveShape::Jitter,
        frequency: 2.0,
        amplitude: 0.5,
        bloom: 0.6,
        particles: 0.18,
        overlay: 0.0,
        suppress_grid: false,
        show_network: false,
    },
    // Semi
    PresetState {
        color: Hex(0x001133),
        emissive: Hex(0x00ffff),
        roughness: 0.2,
        metalness: 0.9,
        wave_shape: WaveShape::Ridges,
        frequency: 0.8,
        amplitude: 0.4,
        bloom: 0.62,
        particles: 0.22,
        overlay: 0.0,
        suppress_grid: false,
        show_network: false,
    },
    // Extreme
    PresetState {
        color: Hex(0x221100),
        emissive: Hex(0xffaa00),
        roughness: 0.4,
        metalness: 0.6,
        wave_shape: WaveShape::Wave,
        frequency: 0.1,
        amplitude: 2.5,
        bloom: 0.58,
        particles: 0.2,
        overlay: 0.0,
        suppress_grid: false,
        show_network: false,
    },
    // Value
    PresetState {
        color: Hex(0x150b22),
        emissive: Hex(0x8b5cf6),
        roughness: 0.18,
        metalness: 0.75,
        wave_shape: WaveShape::Jitter,
        frequency: 1.1,
        amplitude: 0.6,
        bloom: 0.64,
        particles: 0.25,
        overlay: 0.0,
        suppress_grid: true,
        show_network: true,
    },
    // Medical
    PresetState {
        color: Hex(0x001408),
        emissive: Hex(0x35ff6a),
        roughness: 0.12,
        metalness: 0.08,
        wave_shape: WaveShape::Ridges,
        frequency: 0.7,
        amplitude: 0.35,
        bloom: 0.85,
        particles: 0.85,
        overlay: 1.0,
        suppress_grid: true,
        show_network: false,
    },
];

impl PresetId {
    /// Get all presets in catalogue order
    pub fn all() -> &'static [PresetId] {
        &[
            PresetId::Hero,
            PresetId::Quantum,
            PresetId::Semi,
            PresetId::Extreme,
            PresetId::Value,
            PresetId::Medical,
        ]
    }

    /// Get the string ID for this preset
    pub fn id(&self) -> &'static str {
        match self {
            PresetId::Hero => "hero",
            PresetId::Quantum => "quantum",
            PresetId::Semi => "semi",
            PresetId::Extreme => "extreme",
            PresetId::Value => "value",
            PresetId::Medical => "medical",
        }
    }

    /// Get the display name for this preset
    pub fn name(&self) -> &'static str {
        match self {
            PresetId::Hero => "Hero",
            PresetId::Quantum => "Quantum",
            PresetId::Semi => "Semiconductors",
            PresetId::Extreme => "Extreme Environments",
            PresetId::Value => "Value Network",
            PresetId::Medical => "Medical",
        }
    }

    /// Parse from string ID (case-insensitive, surrounding whitespace ignored)
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::all()
            .iter()
            .copied()
            .find(|preset| preset.id().eq_ignore_ascii_case(id))
    }

    /// Parse from string ID, falling back to the default preset
    pub fn resolve(id: &str) -> Self {
        Self::from_id(id).unwrap_or_default()
    }

    /// The preset's parameters
    #[inline]
    pub fn state(self) -> &'static PresetState {
        &PRESETS[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_default() {
        assert_eq!(PresetId::default(), PresetId::Hero);
    }

    #[test]
    fn test_preset_roundtrip() {
        for preset in PresetId::all() {
            assert_eq!(PresetId::from_id(preset.id()), Some(*preset));
        }
    }

    #[test]
    fn test_preset_from_id_case_insensitive() {
        assert_eq!(PresetId::from_id("MEDICAL"), Some(PresetId::Medical));
        assert_eq!(PresetId::from_id("  Value "), Some(PresetId::Value));
    }

    #[test]
    fn test_unknown_resolves_to_hero() {
        assert_eq!(PresetId::from_id("implantes"), None);
        assert_eq!(PresetId::resolve("implantes"), PresetId::Hero);
        assert_eq!(PresetId::resolve(""), PresetId::Hero);
    }

    #[test]
    fn test_catalogue_order_matches_ids() {
        assert_eq!(PresetId::Hero.state().emissive, Hex(0x000000));
        assert_eq!(PresetId::Quantum.state().emissive, Hex(0xff0055));
        assert_eq!(PresetId::Semi.state().emissive, Hex(0x00ffff));
        assert_eq!(PresetId::Extreme.state().emissive, Hex(0xffaa00));
        assert_eq!(PresetId::Value.state().emissive, Hex(0x8b5cf6));
        assert_eq!(PresetId::Medical.state().emissive, Hex(0x35ff6a));
    }

    #[test]
    fn test_flags() {
        assert!(PresetId::Medical.state().suppress_grid);
        assert!(PresetId::Value.state().suppress_grid);
        assert!(PresetId::Value.state().show_network);
        assert!(!PresetId::Hero.state().suppress_grid);
        assert_eq!(PresetId::Medical.state().overlay, 1.0);
    }

    #[test]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&PresetId::Medical).unwrap(), "\"medical\"");
        let parsed: PresetId = serde_json::from_str("\"semi\"").unwrap();
        assert_eq!(parsed, PresetId::Semi);
    }

    #[test]
    fn test_wave_shape_ordinals() {
        assert_eq!(WaveShape::Wave.ordinal(), 0.0);
        assert_eq!(WaveShape::Jitter.ordinal(), 1.0);
        assert_eq!(WaveShape::Ridges.ordinal(), 2.0);
    }
}
