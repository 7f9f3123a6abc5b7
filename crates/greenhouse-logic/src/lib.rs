//! Pure simulation logic for the greenhouse digital twin.
//!
//! This crate holds the one piece of the greenhouse dashboard with real
//! dynamics: a deterministic, day-stepped growth model driven by five
//! environmental controls. It does no I/O and schedules nothing; a host
//! (UI timer, headless harness, test) calls [`engine::DigitalTwin::tick`].
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`alerts`] | Ordered parameter alerts with warning/critical severity |
//! | [`clock`] | Wall-clock accumulator that fires engine ticks at the current speed |
//! | [`config`] | Growth model constants, speed multiplier, config validation |
//! | [`engine`] | `DigitalTwin` state machine: start/pause/reset, day stepping, metrics |
//! | [`params`] | The five controls, valid and optimal ranges, clamping |
//! | [`scoring`] | Health score, yield and height projection, growth stage |
//!
//! # Example
//!
//! ```
//! use greenhouse_logic::engine::DigitalTwin;
//! use greenhouse_logic::params::Parameter;
//!
//! let mut twin = DigitalTwin::new();
//! twin.set_parameter(Parameter::Temperature, 26.0).unwrap();
//! twin.start();
//! while twin.is_running() {
//!     twin.tick();
//! }
//! assert_eq!(twin.growth_history().len(), 91);
//! ```

pub mod alerts;
pub mod clock;
pub mod config;
pub mod engine;
pub mod params;
pub mod scoring;
