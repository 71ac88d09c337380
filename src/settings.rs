//! Tuning knobs for the transform tasks.

use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::Deserialize;

use crate::geometry::Ground;

/// Local-space center every settlement is normalized onto. Matches the frame
/// the reference settlement was authored in.
pub const LOCAL_TARGET_CENTER: Ground = Ground { x: 1250.0, z: -15.0 };

/// Settlement whose layout is the default stamping template.
pub const DEFAULT_REFERENCE_SETTLEMENT: i64 = 28;

fn default_variance_fraction() -> f64 {
    0.10
}

fn default_rotation_range_degrees() -> f64 {
    30.0
}

fn default_scale_min() -> f64 {
    0.8
}

fn default_scale_max() -> f64 {
    1.2
}

/// Random-transform ranges for the stamp task. Every field has a default, so
/// a settings file only names the knobs it wants to move.
#[derive(Debug, Clone, Deserialize)]
pub struct StampSettings {
    /// Per-axis jitter as a fraction of the offset's magnitude.
    #[serde(default = "default_variance_fraction")]
    pub variance_fraction: f64,
    /// One rotation per settlement, uniform in ± this many degrees.
    #[serde(default = "default_rotation_range_degrees")]
    pub rotation_range_degrees: f64,
    #[serde(default = "default_scale_min")]
    pub scale_min: f64,
    #[serde(default = "default_scale_max")]
    pub scale_max: f64,
}

impl Default for StampSettings {
    fn default() -> Self {
        Self {
            variance_fraction: default_variance_fraction(),
            rotation_range_degrees: default_rotation_range_degrees(),
            scale_min: default_scale_min(),
            scale_max: default_scale_max(),
        }
    }
}

impl StampSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings: Self = serde_yaml::from_str(&data)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        settings.validated()
    }

    pub fn validated(self) -> Result<Self> {
        ensure!(
            self.variance_fraction >= 0.0,
            "variance_fraction must not be negative"
        );
        ensure!(
            self.rotation_range_degrees >= 0.0,
            "rotation_range_degrees must not be negative"
        );
        ensure!(
            self.scale_min <= self.scale_max,
            "scale_min {} exceeds scale_max {}",
            self.scale_min,
            self.scale_max
        );
        Ok(self)
    }

    /// Height jitter runs at half the horizontal fraction.
    pub fn vertical_variance_fraction(&self) -> f64 {
        self.variance_fraction / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_documented_ranges() {
        let settings = StampSettings::default();
        assert_eq!(settings.variance_fraction, 0.10);
        assert_eq!(settings.rotation_range_degrees, 30.0);
        assert_eq!(settings.scale_min, 0.8);
        assert_eq!(settings.scale_max, 1.2);
        assert_eq!(settings.vertical_variance_fraction(), 0.05);
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let settings: StampSettings = serde_yaml::from_str("rotation_range_degrees: 10.0").unwrap();
        assert_eq!(settings.rotation_range_degrees, 10.0);
        assert_eq!(settings.variance_fraction, 0.10);
        assert_eq!(settings.scale_min, 0.8);
    }

    #[test]
    fn test_inverted_scale_range_is_rejected() {
        let settings = StampSettings {
            scale_min: 1.5,
            scale_max: 0.5,
            ..StampSettings::default()
        };
        assert!(settings.validated().is_err());
    }
}
