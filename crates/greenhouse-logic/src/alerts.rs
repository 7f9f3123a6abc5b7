//! Parameter alerts shown above the simulator.
//!
//! Alerts are derived from the current parameters only. Each condition is
//! checked independently and the output order is fixed: temperature,
//! humidity, light, water level, CO2.
//!
//! CO2 only alerts when low. A high CO2 level still costs health points
//! in [`crate::scoring::health_score`], but raises no alert.

use crate::params::{Parameter, SimulationParameters};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertSeverity {
    Warning,
    /// Needs immediate operator action.
    Critical,
}

impl AlertSeverity {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Warning => "⚠️",
            Self::Critical => "🚨",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    HeatStress,
    ColdStress,
    FungalRisk,
    WaterStress,
    LowLight,
    WaterCritical,
    LowCo2,
}

impl AlertKind {
    pub fn parameter(self) -> Parameter {
        match self {
            Self::HeatStress | Self::ColdStress => Parameter::Temperature,
            Self::FungalRisk | Self::WaterStress => Parameter::Humidity,
            Self::LowLight => Parameter::Light,
            Self::WaterCritical => Parameter::WaterLevel,
            Self::LowCo2 => Parameter::Co2,
        }
    }

    pub fn severity(self) -> AlertSeverity {
        match self {
            Self::WaterCritical => AlertSeverity::Critical,
            _ => AlertSeverity::Warning,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::HeatStress => "Temperature too high - Risk of heat stress",
            Self::ColdStress => "Temperature too low - Slowed growth",
            Self::FungalRisk => "Humidity too high - Risk of fungal disease",
            Self::WaterStress => "Humidity too low - Increased water stress",
            Self::LowLight => "Insufficient light - Reduced photosynthesis",
            Self::WaterCritical => "Water level critical - Immediate action needed",
            Self::LowCo2 => "CO2 levels low - Growth may be limited",
        }
    }
}

/// A single alert line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: AlertSeverity,
}

impl Alert {
    pub fn new(kind: AlertKind) -> Self {
        Self {
            kind,
            severity: kind.severity(),
        }
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.icon(), self.message())
    }
}

/// All alerts raised by `params`, in display order.
pub fn alerts(params: &SimulationParameters) -> Vec<Alert> {
    let mut out = Vec::new();

    let temp = Parameter::Temperature.optimal_range();
    if params.temperature > temp.max {
        out.push(Alert::new(AlertKind::HeatStress));
    } else if params.temperature < temp.min {
        out.push(Alert::new(AlertKind::ColdStress));
    }

    let humidity = Parameter::Humidity.optimal_range();
    if params.humidity > humidity.max {
        out.push(Alert::new(AlertKind::FungalRisk));
    } else if params.humidity < humidity.min {
        out.push(Alert::new(AlertKind::WaterStress));
    }

    if params.light < Parameter::Light.optimal_range().min {
        out.push(Alert::new(AlertKind::LowLight));
    }

    if params.water_level < Parameter::WaterLevel.optimal_range().min {
        out.push(Alert::new(AlertKind::WaterCritical));
    }

    if params.co2 < Parameter::Co2.optimal_range().min {
        out.push(Alert::new(AlertKind::LowCo2));
    }

    out
}

/// Highest severity among `alerts`, if any.
pub fn worst_severity(alerts: &[Alert]) -> Option<AlertSeverity> {
    alerts.iter().map(|a| a.severity).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(p: &SimulationParameters) -> Vec<AlertKind> {
        alerts(p).into_iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_defaults_raise_nothing() {
        assert!(alerts(&SimulationParameters::default()).is_empty());
    }

    #[test]
    fn test_heat_stress_only() {
        let p = SimulationParameters {
            temperature: 30.0,
            ..Default::default()
        };
        let a = alerts(&p);
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].kind, AlertKind::HeatStress);
        assert_eq!(a[0].severity, AlertSeverity::Warning);
        assert_eq!(a[0].message(), "Temperature too high - Risk of heat stress");
    }

    #[test]
    fn test_cold_and_humidity_sides() {
        let p = SimulationParameters {
            temperature: 12.0,
            humidity: 90.0,
            ..Default::default()
        };
        assert_eq!(kinds(&p), vec![AlertKind::ColdStress, AlertKind::FungalRisk]);

        let p = SimulationParameters {
            humidity: 40.0,
            ..Default::default()
        };
        assert_eq!(kinds(&p), vec![AlertKind::WaterStress]);
    }

    #[test]
    fn test_all_lows_in_fixed_order() {
        let p = SimulationParameters {
            temperature: 35.0,
            humidity: 95.0,
            light: 10.0,
            co2: 300.0,
            water_level: 20.0,
        };
        assert_eq!(
            kinds(&p),
            vec![
                AlertKind::HeatStress,
                AlertKind::FungalRisk,
                AlertKind::LowLight,
                AlertKind::WaterCritical,
                AlertKind::LowCo2,
            ]
        );
    }

    #[test]
    fn test_high_co2_raises_no_alert() {
        let p = SimulationParameters {
            co2: 600.0,
            ..Default::default()
        };
        assert!(alerts(&p).is_empty());
        assert!(crate::scoring::health_score(&p) < 100.0);
    }

    #[test]
    fn test_band_edges_do_not_alert() {
        let p = SimulationParameters {
            temperature: 24.0,
            humidity: 60.0,
            light: 60.0,
            co2: 350.0,
            water_level: 60.0,
        };
        assert!(alerts(&p).is_empty());
    }

    #[test]
    fn test_water_critical_is_elevated() {
        let p = SimulationParameters {
            water_level: 30.0,
            light: 30.0,
            ..Default::default()
        };
        let a = alerts(&p);
        assert_eq!(worst_severity(&a), Some(AlertSeverity::Critical));
        assert_eq!(
            a[1].to_string(),
            "🚨 Water level critical - Immediate action needed"
        );
        assert!(a[0].to_string().starts_with("⚠️"));
        assert_eq!(worst_severity(&[]), None);
    }

    #[test]
    fn test_kind_maps_to_parameter() {
        assert_eq!(AlertKind::LowCo2.parameter(), Parameter::Co2);
        assert_eq!(AlertKind::FungalRisk.parameter(), Parameter::Humidity);
    }
}
