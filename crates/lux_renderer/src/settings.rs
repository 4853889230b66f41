//! Render settings.
//!
//! Settings are a plain value handed to the integrator and the scheduler.
//! Every field has a default, so a settings file only needs the fields it
//! wants to change.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};

/// Visualization shortcuts that replace light transport at the first hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugMode {
    /// Normal path tracing
    #[default]
    Off,
    /// Material albedo of the first surface hit
    Albedo,
    /// Surface normal mapped from [-1, 1] to [0, 1]
    Normal,
    /// Grey ramp of the hit distance
    Depth,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Camera samples averaged per pixel
    pub samples_per_pixel: u32,
    /// Hard cutoff on path length
    pub max_bounces: u32,
    pub debug_mode: DebugMode,
    /// Cosine-weighted diffuse sampling (uniform hemisphere otherwise)
    pub cosine_hemisphere: bool,
    /// Render row bands in parallel
    pub multithreaded: bool,
    /// Base seed; each row band derives its own stream from it
    pub seed: u64,
    /// Gamma-encode pixels before they are clamped and stored
    pub gamma_correct: bool,
    /// Number of row bands (defaults to the worker thread count)
    pub bands: Option<usize>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            samples_per_pixel: 10,
            max_bounces: 10,
            debug_mode: DebugMode::Off,
            cosine_hemisphere: true,
            multithreaded: true,
            seed: 0,
            gamma_correct: false,
            bands: None,
        }
    }
}

impl RenderSettings {
    /// Check the settings describe a renderable pass.
    pub fn validate(&self) -> RenderResult<()> {
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidSettings(
                "samples_per_pixel must be at least 1".into(),
            ));
        }
        if self.bands == Some(0) {
            return Err(RenderError::InvalidSettings(
                "bands must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = RenderSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.debug_mode, DebugMode::Off);
        assert!(settings.cosine_hemisphere);
    }

    #[test]
    fn test_validate() {
        let zero_spp = RenderSettings {
            samples_per_pixel: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_spp.validate(),
            Err(RenderError::InvalidSettings(_))
        ));

        let zero_bands = RenderSettings {
            bands: Some(0),
            ..Default::default()
        };
        assert!(zero_bands.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "samples_per_pixel": 64, "debug_mode": "normal" }"#;
        let settings: RenderSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.samples_per_pixel, 64);
        assert_eq!(settings.debug_mode, DebugMode::Normal);
        assert_eq!(settings.max_bounces, 10);
        assert!(settings.multithreaded);
        assert_eq!(settings.bands, None);
    }

    #[test]
    fn test_unknown_debug_mode_is_rejected() {
        let json = r#"{ "debug_mode": "wireframe" }"#;
        assert!(serde_json::from_str::<RenderSettings>(json).is_err());
    }
}
