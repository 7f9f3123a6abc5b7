//! Environmental control parameters and their reference ranges.
//!
//! Each of the five controls has two ranges: the *valid* range a controller
//! may set (slider bounds on the dashboard), and the *optimal* range used by
//! scoring and alerts. Out-of-range input is clamped to the valid range, not
//! rejected. Only non-finite values are errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The five environmental controls, in scoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Parameter {
    Temperature,
    Humidity,
    Light,
    Co2,
    WaterLevel,
}

/// Settable bounds for a parameter, as exposed by the control sliders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterBounds {
    pub min: f32,
    pub max: f32,
    /// Slider increment. Informational only; values are not snapped.
    pub step: f32,
    pub default: f32,
}

/// Optimal band for a parameter: penalties and alerts trigger outside `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimalRange {
    pub min: f32,
    pub max: f32,
    pub optimal: f32,
}

impl OptimalRange {
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Parameter {
    pub const ALL: [Parameter; 5] = [
        Parameter::Temperature,
        Parameter::Humidity,
        Parameter::Light,
        Parameter::Co2,
        Parameter::WaterLevel,
    ];

    pub fn bounds(self) -> ParameterBounds {
        match self {
            Self::Temperature => ParameterBounds {
                min: 10.0,
                max: 35.0,
                step: 0.5,
                default: 22.0,
            },
            Self::Humidity => ParameterBounds {
                min: 30.0,
                max: 95.0,
                step: 1.0,
                default: 65.0,
            },
            Self::Light => ParameterBounds {
                min: 0.0,
                max: 100.0,
                step: 5.0,
                default: 75.0,
            },
            Self::Co2 => ParameterBounds {
                min: 300.0,
                max: 600.0,
                step: 10.0,
                default: 400.0,
            },
            Self::WaterLevel => ParameterBounds {
                min: 0.0,
                max: 100.0,
                step: 5.0,
                default: 70.0,
            },
        }
    }

    pub fn optimal_range(self) -> OptimalRange {
        match self {
            Self::Temperature => OptimalRange {
                min: 18.0,
                max: 24.0,
                optimal: 21.0,
            },
            Self::Humidity => OptimalRange {
                min: 60.0,
                max: 75.0,
                optimal: 68.0,
            },
            Self::Light => OptimalRange {
                min: 60.0,
                max: 90.0,
                optimal: 75.0,
            },
            Self::Co2 => OptimalRange {
                min: 350.0,
                max: 450.0,
                optimal: 400.0,
            },
            Self::WaterLevel => OptimalRange {
                min: 60.0,
                max: 80.0,
                optimal: 70.0,
            },
        }
    }

    /// Canonical name, matching the dashboard's field keys.
    pub fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Light => "light",
            Self::Co2 => "co2",
            Self::WaterLevel => "waterLevel",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::Humidity => "Humidity",
            Self::Light => "Light Intensity",
            Self::Co2 => "CO₂ Level",
            Self::WaterLevel => "Water Level",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "°C",
            Self::Humidity | Self::Light | Self::WaterLevel => "%",
            Self::Co2 => "ppm",
        }
    }

    /// Clamp `value` into the settable range. Non-finite input is an error.
    pub fn clamp(self, value: f32) -> Result<f32, ParameterError> {
        if !value.is_finite() {
            return Err(ParameterError::NotFinite {
                parameter: self,
                value,
            });
        }
        let b = self.bounds();
        Ok(value.clamp(b.min, b.max))
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temperature" => Ok(Self::Temperature),
            "humidity" => Ok(Self::Humidity),
            "light" => Ok(Self::Light),
            "co2" => Ok(Self::Co2),
            "waterLevel" | "water_level" => Ok(Self::WaterLevel),
            other => Err(ParameterError::UnknownParameter(other.to_string())),
        }
    }
}

/// Rejected parameter input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),
    #[error("{parameter} must be finite, got {value}")]
    NotFinite { parameter: Parameter, value: f32 },
}

/// Current settings of all five environmental controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParameters {
    /// Air temperature in °C.
    pub temperature: f32,
    /// Relative humidity in %.
    pub humidity: f32,
    /// Light intensity as % of maximum.
    pub light: f32,
    /// CO2 concentration in ppm.
    pub co2: f32,
    /// Reservoir water level as % of capacity.
    pub water_level: f32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            temperature: Parameter::Temperature.bounds().default,
            humidity: Parameter::Humidity.bounds().default,
            light: Parameter::Light.bounds().default,
            co2: Parameter::Co2.bounds().default,
            water_level: Parameter::WaterLevel.bounds().default,
        }
    }
}

impl SimulationParameters {
    pub fn get(&self, param: Parameter) -> f32 {
        match param {
            Parameter::Temperature => self.temperature,
            Parameter::Humidity => self.humidity,
            Parameter::Light => self.light,
            Parameter::Co2 => self.co2,
            Parameter::WaterLevel => self.water_level,
        }
    }

    /// Set a single field, clamping to its valid range.
    ///
    /// Returns the value actually stored.
    pub fn set(&mut self, param: Parameter, value: f32) -> Result<f32, ParameterError> {
        let clamped = param.clamp(value)?;
        if clamped != value {
            log::debug!("{} clamped from {} to {}", param, value, clamped);
        }
        let slot = match param {
            Parameter::Temperature => &mut self.temperature,
            Parameter::Humidity => &mut self.humidity,
            Parameter::Light => &mut self.light,
            Parameter::Co2 => &mut self.co2,
            Parameter::WaterLevel => &mut self.water_level,
        };
        *slot = clamped;
        Ok(clamped)
    }
}
