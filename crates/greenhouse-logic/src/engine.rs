//! Digital twin engine - owns the simulation state and steps it one day at a time.
//!
//! The engine never schedules anything itself. A host drives it by calling
//! [`DigitalTwin::tick`] from whatever timer it has (a UI interval, a game
//! loop, [`crate::clock::TickClock`], or a test calling it directly).

use crate::alerts::{self, Alert};
use crate::config::{validate_config, ConfigError, SimulationConfig, SpeedError, SpeedMultiplier};
use crate::params::{Parameter, ParameterError, SimulationParameters};
use crate::scoring::{self, GrowthStage, HealthStatus};
use serde::{Deserialize, Serialize};

/// One day of the recorded trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthSample {
    pub day: u32,
    /// Plant height in cm.
    pub height: f32,
    /// Health score, 0..100.
    pub health: f32,
    /// Projected yield in kg.
    #[serde(rename = "yield")]
    pub yield_kg: f32,
}

/// Full engine state, as handed out by [`DigitalTwin::state`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    pub current_day: u32,
    pub params: SimulationParameters,
    pub growth_history: Vec<GrowthSample>,
    pub is_running: bool,
    pub speed_multiplier: SpeedMultiplier,
}

/// Readouts for the dashboard header, computed from current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub day: u32,
    pub health: f32,
    pub status: HealthStatus,
    pub predicted_yield: f32,
    pub height: f32,
    /// Percent of the growth cycle elapsed.
    pub progress: f32,
    /// Percent of tuber development.
    pub tuber_development: f32,
    pub stage: GrowthStage,
    pub alerts: Vec<Alert>,
}

/// Single-session digital twin simulation.
#[derive(Debug, Clone)]
pub struct DigitalTwin {
    config: SimulationConfig,
    state: SimulationState,
    /// Bumped on every start and reset, so tick drivers can drop stale time.
    run_generation: u64,
}

impl Default for DigitalTwin {
    fn default() -> Self {
        Self::new()
    }
}

impl DigitalTwin {
    /// Create an engine with the default 90-day model.
    pub fn new() -> Self {
        Self::build(SimulationConfig::default())
    }

    /// Create an engine with a custom model. Fails on the first invalid field.
    pub fn with_config(config: SimulationConfig) -> Result<Self, ConfigError> {
        if let Some(err) = validate_config(&config).into_iter().next() {
            return Err(err);
        }
        Ok(Self::build(config))
    }

    fn build(config: SimulationConfig) -> Self {
        let state = SimulationState {
            current_day: 0,
            params: SimulationParameters::default(),
            growth_history: vec![Self::seed_sample(&config)],
            is_running: false,
            speed_multiplier: config.speed,
        };
        Self {
            config,
            state,
            run_generation: 0,
        }
    }

    fn seed_sample(config: &SimulationConfig) -> GrowthSample {
        GrowthSample {
            day: 0,
            height: config.seed_height_cm,
            health: 100.0,
            yield_kg: 0.0,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Owned snapshot of the current state.
    pub fn state(&self) -> SimulationState {
        self.state.clone()
    }

    pub fn current_day(&self) -> u32 {
        self.state.current_day
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.state.params
    }

    pub fn growth_history(&self) -> &[GrowthSample] {
        &self.state.growth_history
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn speed(&self) -> SpeedMultiplier {
        self.state.speed_multiplier
    }

    /// Changes whenever a run is started or the state is reset.
    pub fn run_generation(&self) -> u64 {
        self.run_generation
    }

    /// Whether the run has reached the end of the growth cycle.
    pub fn is_finished(&self) -> bool {
        self.state.current_day >= self.config.horizon_days
    }

    /// Set one parameter, clamped to its valid range. Takes effect on the next tick.
    pub fn set_parameter(&mut self, param: Parameter, value: f32) -> Result<f32, ParameterError> {
        self.state.params.set(param, value)
    }

    pub fn set_parameter_by_name(&mut self, name: &str, value: f32) -> Result<f32, ParameterError> {
        let param: Parameter = name.parse()?;
        self.set_parameter(param, value)
    }

    /// Replace all parameters at once. Every field is clamped.
    pub fn set_parameters(&mut self, params: SimulationParameters) -> Result<(), ParameterError> {
        let mut next = self.state.params;
        for p in Parameter::ALL {
            next.set(p, params.get(p))?;
        }
        self.state.params = next;
        Ok(())
    }

    pub fn start(&mut self) {
        if self.state.is_running {
            return;
        }
        log::info!(
            "Simulation started at day {} ({}x)",
            self.state.current_day,
            self.state.speed_multiplier.value()
        );
        self.state.is_running = true;
        self.run_generation += 1;
    }

    pub fn pause(&mut self) {
        if !self.state.is_running {
            return;
        }
        log::info!("Simulation paused at day {}", self.state.current_day);
        self.state.is_running = false;
    }

    /// Back to day 0 with default parameters. Speed is kept.
    pub fn reset(&mut self) {
        log::info!("Simulation reset (was at day {})", self.state.current_day);
        self.state.is_running = false;
        self.state.current_day = 0;
        self.state.growth_history.clear();
        self.state
            .growth_history
            .push(Self::seed_sample(&self.config));
        self.state.params = SimulationParameters::default();
        self.run_generation += 1;
    }

    pub fn set_speed(&mut self, speed: SpeedMultiplier) {
        self.state.speed_multiplier = speed;
    }

    pub fn set_speed_value(&mut self, multiplier: u32) -> Result<(), SpeedError> {
        self.set_speed(SpeedMultiplier::try_from(multiplier)?);
        Ok(())
    }

    /// Advance one simulated day.
    ///
    /// No-op when paused. At the horizon the run stops instead and no
    /// sample is recorded. Returns the sample appended, if any.
    pub fn tick(&mut self) -> Option<GrowthSample> {
        if !self.state.is_running {
            return None;
        }

        let next_day = self.state.current_day + 1;
        if next_day > self.config.horizon_days {
            log::info!(
                "Growth cycle complete at day {}, stopping",
                self.state.current_day
            );
            self.state.is_running = false;
            return None;
        }

        let health = scoring::health_score(&self.state.params);
        let sample = GrowthSample {
            day: next_day,
            height: self.config.projected_height(health, next_day),
            health,
            yield_kg: self.config.predicted_yield(health, next_day),
        };
        log::debug!(
            "Day {}: health={:.1} height={:.2}cm yield={:.2}kg",
            sample.day,
            sample.health,
            sample.height,
            sample.yield_kg
        );

        self.state.growth_history.push(sample);
        self.state.current_day = next_day;
        Some(sample)
    }

    /// Health score for the current parameters.
    pub fn health_score(&self) -> f32 {
        scoring::health_score(&self.state.params)
    }

    /// Yield projection for the current parameters and day.
    pub fn predicted_yield(&self) -> f32 {
        self.config
            .predicted_yield(self.health_score(), self.state.current_day)
    }

    pub fn alerts(&self) -> Vec<Alert> {
        alerts::alerts(&self.state.params)
    }

    pub fn metrics(&self) -> Metrics {
        let health = self.health_score();
        let day = self.state.current_day;
        Metrics {
            day,
            health,
            status: HealthStatus::from_score(health),
            predicted_yield: self.config.predicted_yield(health, day),
            height: self.config.projected_height(health, day),
            progress: self.config.growth_progress(day),
            tuber_development: self.config.tuber_development(day),
            stage: self.config.stage(day),
            alerts: self.alerts(),
        }
    }
}
