//! Tuning constants for the chaos effect, optionally overridden from TOML

use chaos_core::{ChaosError, Result};
use std::f32::consts::PI;
use std::path::Path;

/// Simulation and appearance constants
#[derive(Debug, Clone, PartialEq)]
pub struct ChaosConfig {
    pub num_particles: usize,
    /// Palette distance advanced per generation
    pub generation_scale: f32,
    /// Respawn speed multiplier range
    pub speed_min: f32,
    pub speed_max: f32,
    /// Respawn heading rotation range, radians
    pub spin_min: f32,
    pub spin_max: f32,
    /// Particle radius relative to the model diameter
    pub relative_size: f32,
    /// Peak per-particle intensity
    pub intensity: f32,
    /// Exponent shaping the fade curve
    pub intensity_exp: f32,
    pub initial_speed: f32,
    /// Seconds of frame time per simulation step
    pub step_size: f32,
    /// Color cycle advance, radians per second
    pub color_rate: f32,
    /// Escape margin in multiples of the particle radius
    pub outside_margin: f32,
    /// Steps a particle lives before dying
    pub max_age: u32,
}

impl Default for ChaosConfig {
    fn default() -> Self {
        Self {
            num_particles: 700,
            generation_scale: 1.0 / 14.0,
            speed_min: 0.9,
            speed_max: 1.7,
            spin_min: PI / 6.0,
            spin_max: PI / 6.0 + PI * 0.05,
            relative_size: 0.25,
            intensity: 0.5,
            intensity_exp: 1.0 / 2.5,
            initial_speed: 0.005,
            step_size: 1.0 / 500.0,
            color_rate: 0.02,
            outside_margin: 8.0,
            max_age: 15000,
        }
    }
}

impl ChaosConfig {
    /// Read and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let table: toml::value::Table = toml::from_str(&contents)?;
        let config = Self::from_toml(&table);
        config.validate()?;
        log::info!("Loaded effect config {}", path.display());
        Ok(config)
    }

    /// Override defaults with any keys present in `table`
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut config = Self::default();

        if let Some(v) = table.get("num_particles") {
            config.num_particles = v.as_integer().unwrap_or(0).max(0) as usize;
        }
        if let Some(v) = table.get("generation_scale") {
            config.generation_scale = toml_f32(v, config.generation_scale);
        }
        if let Some(v) = table.get("speed_min") {
            config.speed_min = toml_f32(v, config.speed_min);
        }
        if let Some(v) = table.get("speed_max") {
            config.speed_max = toml_f32(v, config.speed_max);
        }
        if let Some(v) = table.get("spin_min") {
            config.spin_min = toml_f32(v, config.spin_min);
        }
        if let Some(v) = table.get("spin_max") {
            config.spin_max = toml_f32(v, config.spin_max);
        }
        if let Some(v) = table.get("relative_size") {
            config.relative_size = toml_f32(v, config.relative_size);
        }
        if let Some(v) = table.get("intensity") {
            config.intensity = toml_f32(v, config.intensity);
        }
        if let Some(v) = table.get("intensity_exp") {
            config.intensity_exp = toml_f32(v, config.intensity_exp);
        }
        if let Some(v) = table.get("initial_speed") {
            config.initial_speed = toml_f32(v, config.initial_speed);
        }
        if let Some(v) = table.get("step_size") {
            config.step_size = toml_f32(v, config.step_size);
        }
        if let Some(v) = table.get("color_rate") {
            config.color_rate = toml_f32(v, config.color_rate);
        }
        if let Some(v) = table.get("outside_margin") {
            config.outside_margin = toml_f32(v, config.outside_margin);
        }
        if let Some(v) = table.get("max_age") {
            config.max_age = v.as_integer().unwrap_or(0).clamp(0, u32::MAX as i64) as u32;
        }

        config
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<()> {
        if self.num_particles == 0 {
            return Err(ChaosError::ValidationError(
                "num_particles must be at least 1".into(),
            ));
        }
        if self.max_age == 0 {
            return Err(ChaosError::ValidationError(
                "max_age must be at least 1".into(),
            ));
        }
        if !(self.step_size > 0.0) {
            return Err(out_of_range("step_size", 0.0, f64::MAX, self.step_size));
        }
        if !(self.intensity_exp > 0.0) {
            return Err(out_of_range(
                "intensity_exp",
                0.0,
                f64::MAX,
                self.intensity_exp,
            ));
        }
        if self.speed_min > self.speed_max {
            return Err(ChaosError::ValidationError(format!(
                "speed_min ({}) exceeds speed_max ({})",
                self.speed_min, self.speed_max
            )));
        }
        if self.spin_min > self.spin_max {
            return Err(ChaosError::ValidationError(format!(
                "spin_min ({}) exceeds spin_max ({})",
                self.spin_min, self.spin_max
            )));
        }
        Ok(())
    }
}

fn out_of_range(field: &str, min: f64, max: f64, value: f32) -> ChaosError {
    ChaosError::ValueOutOfRange {
        field: field.to_string(),
        min,
        max,
        value: value as f64,
    }
}

// TOML floats may be written as integers (`outside_margin = 8`)
fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ChaosConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_particles, 700);
        assert_eq!(config.max_age, 15000);
        assert!((config.step_size - 0.002).abs() < 1e-9);
        assert!(config.spin_max > config.spin_min);
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r#"
num_particles = 64
outside_margin = 4
speed_max = 2.5
max_age = 900
"#;
        let table: toml::value::Table = toml::from_str(toml_str).unwrap();
        let config = ChaosConfig::from_toml(&table);
        assert_eq!(config.num_particles, 64);
        assert!((config.outside_margin - 4.0).abs() < 1e-6);
        assert!((config.speed_max - 2.5).abs() < 1e-6);
        assert_eq!(config.max_age, 900);
        // Untouched keys keep their defaults
        assert!((config.intensity - 0.5).abs() < 1e-6);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let zero_particles = ChaosConfig {
            num_particles: 0,
            ..Default::default()
        };
        assert!(zero_particles.validate().is_err());

        let bad_step = ChaosConfig {
            step_size: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            bad_step.validate(),
            Err(ChaosError::ValueOutOfRange { .. })
        ));

        let inverted_speed = ChaosConfig {
            speed_min: 2.0,
            speed_max: 1.0,
            ..Default::default()
        };
        assert!(inverted_speed.validate().is_err());
    }

    #[test]
    fn bundled_config_matches_defaults() {
        let table: toml::value::Table =
            toml::from_str(include_str!("../../../configs/default.toml")).unwrap();
        let config = ChaosConfig::from_toml(&table);
        let defaults = ChaosConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_particles, defaults.num_particles);
        assert_eq!(config.max_age, defaults.max_age);
        assert!((config.spin_max - defaults.spin_max).abs() < 1e-5);
        assert!((config.generation_scale - defaults.generation_scale).abs() < 1e-5);
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!("chaos-config-{}.toml", std::process::id()));
        std::fs::write(&path, "num_particles = 12\ncolor_rate = 0.5\n").unwrap();
        let config = ChaosConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.num_particles, 12);
        assert!((config.color_rate - 0.5).abs() < 1e-6);
    }
}
