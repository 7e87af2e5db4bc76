//! Tuning values for the particle field
//!
//! Every constant the simulation uses lives here so a host can override
//! them from JSON. The defaults reproduce the portfolio background exactly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Spring physics parameters used to smooth pointer input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Displacement and speed below which the spring snaps to its target
    pub rest_threshold: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 25.0,
            mass: 1.0,
            rest_threshold: 0.0005,
        }
    }
}

/// Which way the hover nudge moves particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionMode {
    /// Pull particles toward the pointer
    #[default]
    Attract,
    /// Push particles away from the pointer
    Repel,
}

/// Opaque RGB colour; opacity travels separately with each draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Complete particle field configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub compact_particle_count: usize,
    /// Radius range in pixels, `[min, max)`
    pub size_range: (f64, f64),
    /// Each velocity component is drawn from `[-max_speed, max_speed)`
    pub max_speed: f64,
    /// Base opacity range, `[min, max)`
    pub alpha_range: (f64, f64),
    pub particle_color: Color,

    pub interaction_radius: f64,
    pub interaction_strength: f64,
    pub interaction_mode: InteractionMode,
    /// Multiplier applied to the base alpha of particles near the pointer. Not clamped.
    pub hover_alpha_boost: f64,

    pub link_distance: f64,
    pub link_opacity: f64,
    pub link_color: Color,
    pub link_width: f64,

    pub spring: SpringConfig,

    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 150,
            compact_particle_count: 50,
            size_range: (1.0, 3.0),
            max_speed: 0.15,
            alpha_range: (0.1, 0.6),
            particle_color: Color::WHITE,
            interaction_radius: 200.0,
            interaction_strength: 0.2,
            interaction_mode: InteractionMode::Attract,
            hover_alpha_boost: 2.0,
            link_distance: 100.0,
            link_opacity: 0.2,
            link_color: Color::rgb(99, 102, 241),
            link_width: 0.5,
            spring: SpringConfig::default(),
            seed: None,
        }
    }
}

impl FieldConfig {
    /// Parse a JSON document, filling missing keys from the defaults
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Number of particles for the given display mode
    pub fn particle_count_for(&self, compact: bool) -> usize {
        if compact {
            self.compact_particle_count
        } else {
            self.particle_count
        }
    }

    /// Use this configuration if it validates, otherwise the defaults (keeping the seed)
    pub fn validated_or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                tracing::warn!("{}; falling back to the default configuration", e);
                FieldConfig {
                    seed: self.seed,
                    ..FieldConfig::default()
                }
            }
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        fn range_ok((min, max): (f64, f64)) -> bool {
            min.is_finite() && max.is_finite() && min < max
        }

        if !range_ok(self.size_range) || self.size_range.0 < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "size range {:?} must be a non-negative, non-empty interval",
                self.size_range
            )));
        }
        if !range_ok(self.alpha_range) || self.alpha_range.0 < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "alpha range {:?} must be a non-negative, non-empty interval",
                self.alpha_range
            )));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max speed {} must be finite and non-negative",
                self.max_speed
            )));
        }
        if !(self.interaction_radius > 0.0 && self.link_distance > 0.0) {
            return Err(ConfigError::Invalid(
                "interaction radius and link distance must be positive".to_string(),
            ));
        }
        let spring = &self.spring;
        if !(spring.mass > 0.0 && spring.stiffness > 0.0 && spring.damping >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "spring needs positive mass and stiffness (mass={}, stiffness={}, damping={})",
                spring.mass, spring.stiffness, spring.damping
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_background_constants() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count_for(false), 150);
        assert_eq!(config.particle_count_for(true), 50);
        assert_eq!(config.interaction_radius, 200.0);
        assert_eq!(config.link_distance, 100.0);
        assert_eq!(config.spring.stiffness, 100.0);
        assert_eq!(config.spring.damping, 25.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = FieldConfig::from_json_str(
            r#"{ "particleCount": 80, "interactionMode": "repel", "spring": { "stiffness": 200 } }"#,
        )
        .unwrap();

        assert_eq!(config.particle_count, 80);
        assert_eq!(config.compact_particle_count, 50);
        assert_eq!(config.interaction_mode, InteractionMode::Repel);
        assert_eq!(config.spring.stiffness, 200.0);
        assert_eq!(config.spring.damping, 25.0);
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let broken = FieldConfig {
            seed: Some(9),
            spring: SpringConfig {
                mass: 0.0,
                ..SpringConfig::default()
            },
            ..FieldConfig::default()
        };
        let config = broken.validated_or_default();
        assert_eq!(config.spring, SpringConfig::default());
        assert_eq!(config.seed, Some(9));

        let tuned = FieldConfig {
            particle_count: 80,
            ..FieldConfig::default()
        };
        assert_eq!(tuned.clone().validated_or_default(), tuned);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = FieldConfig::from_json_str("{ particleCount: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_empty_ranges() {
        let err = FieldConfig::from_json_str(r#"{ "sizeRange": [3.0, 1.0] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = FieldConfig::from_json_str(r#"{ "spring": { "mass": 0.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
