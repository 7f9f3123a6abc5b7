//! Growth model constants and playback speed.
//!
//! The defaults reproduce the dashboard's 90-day potato cycle. A host may
//! load a different [`SimulationConfig`] (e.g. from JSON) and check it with
//! [`validate_config`] before building an engine.
//!
//! ```
//! use greenhouse_logic::config::{validate_config, SimulationConfig};
//!
//! let mut config = SimulationConfig::default();
//! config.horizon_days = 120;
//! assert!(validate_config(&config).is_empty());
//! ```

use crate::scoring::{self, GrowthStage, HORIZON_DAYS, MAX_GROWTH_CM, MAX_YIELD_KG, SEED_HEIGHT_CM};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Simulated days per wall-clock second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SpeedMultiplier {
    #[default]
    X1,
    X2,
    X5,
    X10,
}

impl SpeedMultiplier {
    pub const ALL: [SpeedMultiplier; 4] = [Self::X1, Self::X2, Self::X5, Self::X10];

    pub fn value(self) -> u32 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X5 => 5,
            Self::X10 => 10,
        }
    }

    /// Wall-clock time between two ticks.
    pub fn tick_interval(self) -> Duration {
        Duration::from_millis(1000 / self.value() as u64)
    }
}

/// Requested speed is not one of 1, 2, 5, 10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpeedError {
    #[error("unsupported speed multiplier {0}x (expected 1, 2, 5 or 10)")]
    Unsupported(u32),
}

impl TryFrom<u32> for SpeedMultiplier {
    type Error = SpeedError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::X1),
            2 => Ok(Self::X2),
            5 => Ok(Self::X5),
            10 => Ok(Self::X10),
            other => Err(SpeedError::Unsupported(other)),
        }
    }
}

impl From<SpeedMultiplier> for u32 {
    fn from(speed: SpeedMultiplier) -> Self {
        speed.value()
    }
}

/// Growth model constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Days in a full growth cycle; the run stops here.
    pub horizon_days: u32,
    /// Harvest at full maturity and full health, in kg.
    pub max_yield_kg: f32,
    /// Height of the seed sample on day 0, in cm.
    pub seed_height_cm: f32,
    /// Height gained over a full healthy cycle, in cm.
    pub max_growth_cm: f32,
    /// Playback speed a fresh engine starts with.
    pub speed: SpeedMultiplier,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon_days: HORIZON_DAYS,
            max_yield_kg: MAX_YIELD_KG,
            seed_height_cm: SEED_HEIGHT_CM,
            max_growth_cm: MAX_GROWTH_CM,
            speed: SpeedMultiplier::X1,
        }
    }
}

impl SimulationConfig {
    pub fn predicted_yield(&self, health: f32, day: u32) -> f32 {
        self.max_yield_kg * scoring::maturity(day, self.horizon_days) * (health / 100.0)
    }

    pub fn projected_height(&self, health: f32, day: u32) -> f32 {
        let fraction = day as f32 / self.horizon_days as f32;
        self.seed_height_cm + fraction * self.max_growth_cm * (health / 100.0)
    }

    pub fn growth_progress(&self, day: u32) -> f32 {
        scoring::growth_progress_for(day, self.horizon_days)
    }

    pub fn tuber_development(&self, day: u32) -> f32 {
        scoring::tuber_development_for(day, self.horizon_days)
    }

    /// Crop stage on `day`, with boundaries scaled to this horizon.
    pub fn stage(&self, day: u32) -> GrowthStage {
        GrowthStage::for_horizon(day, self.horizon_days)
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("horizon must be at least one day")]
    ZeroHorizon,
    #[error("max yield must be positive and finite, got {0}")]
    InvalidMaxYield(f32),
    #[error("seed height must be non-negative and finite, got {0}")]
    InvalidSeedHeight(f32),
    #[error("max growth must be non-negative and finite, got {0}")]
    InvalidMaxGrowth(f32),
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &SimulationConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.horizon_days == 0 {
        errors.push(ConfigError::ZeroHorizon);
    }
    if !config.max_yield_kg.is_finite() || config.max_yield_kg <= 0.0 {
        errors.push(ConfigError::InvalidMaxYield(config.max_yield_kg));
    }
    if !config.seed_height_cm.is_finite() || config.seed_height_cm < 0.0 {
        errors.push(ConfigError::InvalidSeedHeight(config.seed_height_cm));
    }
    if !config.max_growth_cm.is_finite() || config.max_growth_cm < 0.0 {
        errors.push(ConfigError::InvalidMaxGrowth(config.max_growth_cm));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_intervals() {
        assert_eq!(SpeedMultiplier::X1.tick_interval(), Duration::from_millis(1000));
        assert_eq!(SpeedMultiplier::X2.tick_interval(), Duration::from_millis(500));
        assert_eq!(SpeedMultiplier::X5.tick_interval(), Duration::from_millis(200));
        assert_eq!(SpeedMultiplier::X10.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_speed_from_u32() {
        for speed in SpeedMultiplier::ALL {
            assert_eq!(SpeedMultiplier::try_from(speed.value()), Ok(speed));
        }
        assert_eq!(SpeedMultiplier::try_from(3u32), Err(SpeedError::Unsupported(3)));
        assert_eq!(SpeedMultiplier::try_from(0u32), Err(SpeedError::Unsupported(0)));
    }

    #[test]
    fn test_default_config_valid() {
        assert!(validate_config(&SimulationConfig::default()).is_empty());
    }

    #[test]
    fn test_default_config_matches_scoring() {
        let cfg = SimulationConfig::default();
        for day in [0, 1, 45, 89, 90] {
            for health in [0.0, 55.0, 100.0] {
                assert_eq!(
                    cfg.predicted_yield(health, day),
                    scoring::predicted_yield(health, day)
                );
                assert!(
                    (cfg.projected_height(health, day) - scoring::projected_height(health, day))
                        .abs()
                        < 0.0001
                );
            }
            assert_eq!(cfg.growth_progress(day), scoring::growth_progress(day));
            assert_eq!(cfg.tuber_development(day), scoring::tuber_development(day));
            assert_eq!(cfg.stage(day), GrowthStage::from_day(day));
        }
    }

    #[test]
    fn test_validate_reports_every_error() {
        let cfg = SimulationConfig {
            horizon_days: 0,
            max_yield_kg: f32::NAN,
            seed_height_cm: -1.0,
            max_growth_cm: f32::INFINITY,
            speed: SpeedMultiplier::X1,
        };
        let errors = validate_config(&cfg);
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0], ConfigError::ZeroHorizon);
        assert_eq!(errors[2], ConfigError::InvalidSeedHeight(-1.0));
    }

    #[test]
    fn test_config_json_partial() {
        let cfg: SimulationConfig =
            serde_json::from_str(r#"{"horizon_days": 120, "speed": 5}"#).unwrap();
        assert_eq!(cfg.horizon_days, 120);
        assert_eq!(cfg.speed, SpeedMultiplier::X5);
        assert_eq!(cfg.max_yield_kg, 25.0);

        let bad = serde_json::from_str::<SimulationConfig>(r#"{"speed": 3}"#);
        assert!(bad.is_err());
    }
}
