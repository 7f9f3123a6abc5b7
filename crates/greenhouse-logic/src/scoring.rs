//! Pure scoring logic — plant health, yield projection, growth readouts.
//!
//! All functions here are stateless: they look only at the parameters and
//! day they are given, never at the growth history.

use crate::params::{Parameter, SimulationParameters};
use serde::{Deserialize, Serialize};

/// Length of the growth cycle in days.
pub const HORIZON_DAYS: u32 = 90;
/// Yield per plant at full maturity and full health, in kg.
pub const MAX_YIELD_KG: f32 = 25.0;
/// Plant height on day 0, in cm.
pub const SEED_HEIGHT_CM: f32 = 5.0;
/// Height gained over a full healthy cycle, in cm.
pub const MAX_GROWTH_CM: f32 = 45.0;

/// Health points lost per unit of deviation from optimal.
const TEMPERATURE_PENALTY: f32 = 3.0;
const HUMIDITY_PENALTY: f32 = 2.0;
const LIGHT_PENALTY: f32 = 1.5;
const CO2_PENALTY: f32 = 0.1;
const WATER_PENALTY: f32 = 2.0;

// Stage boundaries as fractions of the cycle: seedling up to 1/9 (day 10
// of 90), tuber onset after 1/3 (day 30 of 90).
const VEGETATIVE_DIVISOR: u32 = 9;
const TUBER_DIVISOR: u32 = 3;

/// Health points lost to a single parameter at `value`.
///
/// Temperature, humidity and CO2 are penalised on both sides of their
/// optimal band, proportional to the distance from the optimal value.
/// Light and water only have a floor: there is no penalty above max.
pub fn penalty(param: Parameter, value: f32) -> f32 {
    let range = param.optimal_range();
    match param {
        Parameter::Temperature | Parameter::Humidity | Parameter::Co2 => {
            if range.contains(value) {
                return 0.0;
            }
            let weight = match param {
                Parameter::Temperature => TEMPERATURE_PENALTY,
                Parameter::Humidity => HUMIDITY_PENALTY,
                _ => CO2_PENALTY,
            };
            (value - range.optimal).abs() * weight
        }
        Parameter::Light | Parameter::WaterLevel => {
            if value >= range.min {
                return 0.0;
            }
            let weight = if param == Parameter::Light {
                LIGHT_PENALTY
            } else {
                WATER_PENALTY
            };
            (range.min - value) * weight
        }
    }
}

/// Health score in [0, 100]: 100 minus the penalty of every parameter.
pub fn health_score(params: &SimulationParameters) -> f32 {
    let total: f32 = Parameter::ALL
        .iter()
        .map(|&p| penalty(p, params.get(p)))
        .sum();
    (100.0 - total).clamp(0.0, 100.0)
}

/// Fraction of the growth cycle completed, capped at 1.
pub(crate) fn maturity(day: u32, horizon_days: u32) -> f32 {
    if horizon_days == 0 {
        return 1.0;
    }
    (day as f32 / horizon_days as f32).min(1.0)
}

/// Projected harvest in kg for a plant at `health` on `day`.
pub fn predicted_yield(health: f32, day: u32) -> f32 {
    MAX_YIELD_KG * maturity(day, HORIZON_DAYS) * (health / 100.0)
}

/// Plant height in cm for a plant at `health` on `day`.
///
/// Linear ramp from the seed height, scaled by the health fraction.
pub fn projected_height(health: f32, day: u32) -> f32 {
    SEED_HEIGHT_CM + (day as f32 / HORIZON_DAYS as f32) * MAX_GROWTH_CM * (health / 100.0)
}

/// Percentage of the growth cycle elapsed.
pub fn growth_progress(day: u32) -> f32 {
    growth_progress_for(day, HORIZON_DAYS)
}

/// [`growth_progress`] for a cycle of `horizon_days`.
pub fn growth_progress_for(day: u32, horizon_days: u32) -> f32 {
    maturity(day, horizon_days) * 100.0
}

/// Percentage of tuber development; zero until tuber onset.
pub fn tuber_development(day: u32) -> f32 {
    tuber_development_for(day, HORIZON_DAYS)
}

/// [`tuber_development`] for a cycle of `horizon_days`.
///
/// Tubers start after the first third of the cycle and fill over the
/// remaining two thirds.
pub fn tuber_development_for(day: u32, horizon_days: u32) -> f32 {
    let day = day as u64 * TUBER_DIVISOR as u64;
    let horizon = horizon_days as u64;
    if day <= horizon {
        return 0.0;
    }
    ((day - horizon) as f32 / (2 * horizon) as f32 * 100.0).min(100.0)
}

/// Dashboard health band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    /// Score >= 80.
    Optimal,
    /// Score 60..80.
    Suboptimal,
    /// Score < 60.
    Critical,
}

impl HealthStatus {
    pub fn from_score(health: f32) -> Self {
        if health >= 80.0 {
            Self::Optimal
        } else if health >= 60.0 {
            Self::Suboptimal
        } else {
            Self::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Optimal => "Optimal",
            Self::Suboptimal => "Suboptimal",
            Self::Critical => "Critical",
        }
    }
}

/// Phenological stage of the crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GrowthStage {
    Seedling,
    Vegetative,
    Tuberization,
    Mature,
}

impl GrowthStage {
    pub fn from_day(day: u32) -> Self {
        Self::for_horizon(day, HORIZON_DAYS)
    }

    /// Stage on `day` of a cycle lasting `horizon_days`.
    pub fn for_horizon(day: u32, horizon_days: u32) -> Self {
        let scaled = day as u64;
        let horizon = horizon_days as u64;
        if scaled >= horizon {
            Self::Mature
        } else if scaled * TUBER_DIVISOR as u64 > horizon {
            Self::Tuberization
        } else if scaled * VEGETATIVE_DIVISOR as u64 > horizon {
            Self::Vegetative
        } else {
            Self::Seedling
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(t: f32, h: f32, l: f32, c: f32, w: f32) -> SimulationParameters {
        SimulationParameters {
            temperature: t,
            humidity: h,
            light: l,
            co2: c,
            water_level: w,
        }
    }

    #[test]
    fn test_defaults_score_full_health() {
        assert_eq!(health_score(&SimulationParameters::default()), 100.0);
    }

    #[test]
    fn test_inside_band_no_penalty() {
        // Edges of every optimal band are still inside.
        assert_eq!(health_score(&params(18.0, 75.0, 60.0, 450.0, 60.0)), 100.0);
        assert_eq!(health_score(&params(24.0, 60.0, 90.0, 350.0, 80.0)), 100.0);
    }

    #[test]
    fn test_temperature_penalty_measured_from_optimal() {
        // 30°C: |30 - 21| * 3 = 27
        let h = health_score(&params(30.0, 65.0, 75.0, 400.0, 70.0));
        assert!((h - 73.0).abs() < 0.001);
        // 17°C: |17 - 21| * 3 = 12
        let h = health_score(&params(17.0, 65.0, 75.0, 400.0, 70.0));
        assert!((h - 88.0).abs() < 0.001);
    }

    #[test]
    fn test_humidity_penalty() {
        // 90%: |90 - 68| * 2 = 44
        let h = health_score(&params(22.0, 90.0, 75.0, 400.0, 70.0));
        assert!((h - 56.0).abs() < 0.001);
    }

    #[test]
    fn test_light_floor_only() {
        assert_eq!(health_score(&params(22.0, 65.0, 100.0, 400.0, 70.0)), 100.0);
        // 40%: (60 - 40) * 1.5 = 30
        let h = health_score(&params(22.0, 65.0, 40.0, 400.0, 70.0));
        assert!((h - 70.0).abs() < 0.001);
    }

    #[test]
    fn test_co2_penalised_both_sides() {
        // 600 ppm: |600 - 400| * 0.1 = 20
        let h = health_score(&params(22.0, 65.0, 75.0, 600.0, 70.0));
        assert!((h - 80.0).abs() < 0.001);
        // 300 ppm: |300 - 400| * 0.1 = 10
        let h = health_score(&params(22.0, 65.0, 75.0, 300.0, 70.0));
        assert!((h - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_water_floor_only() {
        assert_eq!(health_score(&params(22.0, 65.0, 75.0, 400.0, 100.0)), 100.0);
        // 50%: (60 - 50) * 2 = 20
        let h = health_score(&params(22.0, 65.0, 75.0, 400.0, 50.0));
        assert!((h - 80.0).abs() < 0.001);
    }

    #[test]
    fn test_penalties_accumulate_and_clamp_at_zero() {
        let h = health_score(&params(35.0, 95.0, 0.0, 600.0, 0.0));
        assert_eq!(h, 0.0);
        let h = health_score(&params(10.0, 30.0, 0.0, 300.0, 0.0));
        assert_eq!(h, 0.0);
    }

    #[test]
    fn test_yield_zero_on_day_zero() {
        assert_eq!(predicted_yield(100.0, 0), 0.0);
        assert_eq!(predicted_yield(37.5, 0), 0.0);
    }

    #[test]
    fn test_yield_full_at_maturity() {
        assert!((predicted_yield(100.0, 90) - 25.0).abs() < f32::EPSILON);
        // Past the horizon the maturity factor stays capped.
        assert!((predicted_yield(100.0, 120) - 25.0).abs() < f32::EPSILON);
        assert!((predicted_yield(50.0, 90) - 12.5).abs() < 0.001);
    }

    #[test]
    fn test_yield_monotonic_in_day() {
        let mut prev = 0.0;
        for day in 0..=90 {
            let y = predicted_yield(80.0, day);
            assert!(y >= prev);
            prev = y;
        }
    }

    #[test]
    fn test_height_ramp() {
        assert_eq!(projected_height(100.0, 0), 5.0);
        assert!((projected_height(100.0, 90) - 50.0).abs() < 0.001);
        assert!((projected_height(50.0, 45) - 16.25).abs() < 0.001);
        assert_eq!(projected_height(0.0, 90), 5.0);
    }

    #[test]
    fn test_growth_progress() {
        assert_eq!(growth_progress(0), 0.0);
        assert!((growth_progress(45) - 50.0).abs() < 0.001);
        assert_eq!(growth_progress(90), 100.0);
    }

    #[test]
    fn test_tuber_development() {
        assert_eq!(tuber_development(0), 0.0);
        assert_eq!(tuber_development(30), 0.0);
        assert!((tuber_development(60) - 50.0).abs() < 0.001);
        assert_eq!(tuber_development(90), 100.0);
    }

    #[test]
    fn test_health_status_bands() {
        assert_eq!(HealthStatus::from_score(100.0), HealthStatus::Optimal);
        assert_eq!(HealthStatus::from_score(80.0), HealthStatus::Optimal);
        assert_eq!(HealthStatus::from_score(79.9), HealthStatus::Suboptimal);
        assert_eq!(HealthStatus::from_score(60.0), HealthStatus::Suboptimal);
        assert_eq!(HealthStatus::from_score(59.9), HealthStatus::Critical);
        assert_eq!(HealthStatus::Critical.label(), "Critical");
    }

    #[test]
    fn test_growth_stages() {
        assert_eq!(GrowthStage::from_day(0), GrowthStage::Seedling);
        assert_eq!(GrowthStage::from_day(10), GrowthStage::Seedling);
        assert_eq!(GrowthStage::from_day(11), GrowthStage::Vegetative);
        assert_eq!(GrowthStage::from_day(31), GrowthStage::Tuberization);
        assert_eq!(GrowthStage::from_day(89), GrowthStage::Tuberization);
        assert_eq!(GrowthStage::from_day(90), GrowthStage::Mature);
    }

    #[test]
    fn test_stages_scale_with_horizon() {
        assert_eq!(GrowthStage::for_horizon(1, 10), GrowthStage::Seedling);
        assert_eq!(GrowthStage::for_horizon(2, 10), GrowthStage::Vegetative);
        assert_eq!(GrowthStage::for_horizon(4, 10), GrowthStage::Tuberization);
        assert_eq!(GrowthStage::for_horizon(10, 10), GrowthStage::Mature);
        assert_eq!(GrowthStage::for_horizon(95, 120), GrowthStage::Tuberization);
        assert_eq!(GrowthStage::for_horizon(120, 120), GrowthStage::Mature);
    }

    #[test]
    fn test_progress_and_tubers_scale_with_horizon() {
        assert!((growth_progress_for(60, 120) - 50.0).abs() < 0.001);
        assert_eq!(growth_progress_for(10, 10), 100.0);
        assert_eq!(tuber_development_for(40, 120), 0.0);
        assert!((tuber_development_for(80, 120) - 50.0).abs() < 0.001);
        assert_eq!(tuber_development_for(120, 120), 100.0);
        assert_eq!(tuber_development_for(10, 10), 100.0);
    }
}
