//! Greenhouse Digital Twin Headless Simulation Harness
//!
//! Drives the digital twin through scripted scenarios entirely in-process:
//! no UI, no timers, no rendering. Prints a pass/fail table and exits
//! non-zero on any failure.
//!
//! Usage:
//!   cargo run -p greenhouse-simtest
//!   cargo run -p greenhouse-simtest -- --verbose
//!   cargo run -p greenhouse-simtest -- --json
//!   cargo run -p greenhouse-simtest -- --config model.json
//!
//! Set `RUST_LOG=debug` to trace every simulated day.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use greenhouse_logic::alerts::{self, AlertKind, AlertSeverity};
use greenhouse_logic::clock::TickClock;
use greenhouse_logic::config::{validate_config, SimulationConfig, SpeedMultiplier};
use greenhouse_logic::engine::DigitalTwin;
use greenhouse_logic::params::{Parameter, SimulationParameters};
use greenhouse_logic::scoring::{self, GrowthStage, HealthStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed seed so the randomized sweep is reproducible.
const SWEEP_SEED: u64 = 42;
const SWEEP_SAMPLES: usize = 5_000;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Parser)]
#[command(name = "greenhouse-simtest")]
#[command(about = "Headless scenario harness for the greenhouse digital twin")]
#[command(version)]
struct Cli {
    /// Print every check, not only failures
    #[arg(long)]
    verbose: bool,

    /// Dump the growth history of one full run as JSON and exit
    #[arg(long)]
    json: bool,

    /// Load the growth model from a JSON file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn load_config(path: &Path) -> anyhow::Result<SimulationConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: SimulationConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parsing config {}", path.display()))?;
    let errors = validate_config(&config);
    if !errors.is_empty() {
        let joined = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        bail!("invalid config {}: {}", path.display(), joined);
    }
    log::info!(
        "Loaded config {}: {} day horizon",
        path.display(),
        config.horizon_days
    );
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SimulationConfig::default(),
    };

    if cli.json {
        let mut twin = DigitalTwin::with_config(config)?;
        run_to_end(&mut twin);
        println!("{}", serde_json::to_string_pretty(twin.growth_history())?);
        return Ok(());
    }

    let verbose = cli.verbose;
    println!("=== Greenhouse Digital Twin Harness ===\n");

    let mut results = Vec::new();

    // 1. Scoring functions
    results.extend(validate_scoring(verbose));

    // 2. Alert generation
    results.extend(validate_alerts(verbose));

    // 3. Randomized parameter sweep
    results.extend(validate_parameter_sweep(verbose));

    // 4. Full growth cycle
    results.extend(validate_growth_cycle(&config, verbose)?);

    // 5. Run lifecycle (start/pause/reset)
    results.extend(validate_lifecycle(verbose));

    // 6. Timer-driven playback
    results.extend(validate_clock(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();
    log::info!("Harness finished: {} checks, {} failed", total, failed);

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn run_to_end(twin: &mut DigitalTwin) {
    twin.start();
    while twin.is_running() {
        twin.tick();
    }
}

// ── 1. Scoring ──────────────────────────────────────────────────────────

fn validate_scoring(verbose: bool) -> Vec<TestResult> {
    println!("--- Scoring ---");
    let mut results = Vec::new();

    let defaults = SimulationParameters::default();
    let h = scoring::health_score(&defaults);
    results.push(TestResult {
        name: "health_defaults_full".into(),
        passed: h == 100.0,
        detail: format!("defaults score {:.1}", h),
    });

    let heat = SimulationParameters {
        temperature: 30.0,
        ..defaults
    };
    let h = scoring::health_score(&heat);
    results.push(TestResult {
        name: "health_heat_penalty".into(),
        passed: (h - 73.0).abs() < 0.001,
        detail: format!("30°C scores {:.1} (expected 73.0)", h),
    });

    let worst = SimulationParameters {
        temperature: 35.0,
        humidity: 95.0,
        light: 0.0,
        co2: 600.0,
        water_level: 0.0,
    };
    let h = scoring::health_score(&worst);
    results.push(TestResult {
        name: "health_floor_zero".into(),
        passed: h == 0.0,
        detail: format!("worst case scores {:.1}", h),
    });

    let y0 = scoring::predicted_yield(100.0, 0);
    let y90 = scoring::predicted_yield(100.0, 90);
    results.push(TestResult {
        name: "yield_endpoints".into(),
        passed: y0 == 0.0 && (y90 - 25.0).abs() < f32::EPSILON,
        detail: format!("day 0 = {:.2}kg, day 90 = {:.2}kg", y0, y90),
    });

    let bands = [
        (95.0, HealthStatus::Optimal),
        (70.0, HealthStatus::Suboptimal),
        (30.0, HealthStatus::Critical),
    ];
    let bad_bands: Vec<_> = bands
        .iter()
        .filter(|(score, status)| HealthStatus::from_score(*score) != *status)
        .collect();
    results.push(TestResult {
        name: "health_status_bands".into(),
        passed: bad_bands.is_empty(),
        detail: format!("{} band mismatches", bad_bands.len()),
    });

    if verbose {
        for param in Parameter::ALL {
            let r = param.optimal_range();
            println!(
                "  {:<16} optimal {}{} (band {}..{})",
                param.label(),
                r.optimal,
                param.unit(),
                r.min,
                r.max
            );
        }
    }

    results
}

// ── 2. Alerts ───────────────────────────────────────────────────────────

fn validate_alerts(verbose: bool) -> Vec<TestResult> {
    println!("--- Alerts ---");
    let mut results = Vec::new();

    let defaults = SimulationParameters::default();
    let a = alerts::alerts(&defaults);
    results.push(TestResult {
        name: "alerts_defaults_empty".into(),
        passed: a.is_empty(),
        detail: format!("{} alerts at defaults", a.len()),
    });

    let heat = SimulationParameters {
        temperature: 30.0,
        ..defaults
    };
    let a = alerts::alerts(&heat);
    results.push(TestResult {
        name: "alerts_heat_only".into(),
        passed: a.len() == 1 && a[0].kind == AlertKind::HeatStress,
        detail: a.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(" | "),
    });

    let high_co2 = SimulationParameters {
        co2: 600.0,
        ..defaults
    };
    let a = alerts::alerts(&high_co2);
    results.push(TestResult {
        name: "alerts_no_high_co2".into(),
        passed: a.is_empty() && scoring::health_score(&high_co2) < 100.0,
        detail: "high CO2 costs health but raises no alert".into(),
    });

    let dry = SimulationParameters {
        water_level: 20.0,
        light: 10.0,
        ..defaults
    };
    let a = alerts::alerts(&dry);
    let worst = alerts::worst_severity(&a);
    results.push(TestResult {
        name: "alerts_water_critical".into(),
        passed: worst == Some(AlertSeverity::Critical) && a.len() == 2,
        detail: format!("{} alerts, worst {:?}", a.len(), worst),
    });

    if verbose {
        for alert in &a {
            println!("  {}", alert);
        }
    }

    results
}

// ── 3. Parameter sweep ──────────────────────────────────────────────────

fn validate_parameter_sweep(verbose: bool) -> Vec<TestResult> {
    println!("--- Parameter Sweep ---");
    log::info!("Sweeping {} samples with seed {}", SWEEP_SAMPLES, SWEEP_SEED);
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(SWEEP_SEED);

    let mut out_of_range = 0;
    let mut clamp_failures = 0;
    let mut min_health = f32::MAX;

    for _ in 0..SWEEP_SAMPLES {
        let mut p = SimulationParameters::default();
        for param in Parameter::ALL {
            let b = param.bounds();
            // Overshoot the slider bounds by half the range on both sides.
            let span = b.max - b.min;
            let raw = rng.gen_range((b.min - span / 2.0)..=(b.max + span / 2.0));
            match p.set(param, raw) {
                Ok(stored) if stored >= b.min && stored <= b.max => {}
                _ => clamp_failures += 1,
            }
        }
        let h = scoring::health_score(&p);
        if !(0.0..=100.0).contains(&h) {
            out_of_range += 1;
        }
        min_health = min_health.min(h);
    }

    results.push(TestResult {
        name: "sweep_health_bounded".into(),
        passed: out_of_range == 0,
        detail: format!(
            "{} samples, {} out of [0,100], min {:.1}",
            SWEEP_SAMPLES, out_of_range, min_health
        ),
    });

    results.push(TestResult {
        name: "sweep_clamped".into(),
        passed: clamp_failures == 0,
        detail: format!("{} values escaped their slider bounds", clamp_failures),
    });

    let mut p = SimulationParameters::default();
    let nan = p.set(Parameter::Humidity, f32::NAN);
    results.push(TestResult {
        name: "sweep_rejects_nan".into(),
        passed: nan.is_err() && p == SimulationParameters::default(),
        detail: match nan {
            Err(e) => e.to_string(),
            Ok(v) => format!("NaN stored as {}", v),
        },
    });

    if verbose {
        println!("  seed {} → min health {:.1}", SWEEP_SEED, min_health);
    }

    results
}

// ── 4. Growth cycle ─────────────────────────────────────────────────────

fn validate_growth_cycle(
    config: &SimulationConfig,
    verbose: bool,
) -> anyhow::Result<Vec<TestResult>> {
    println!("--- Growth Cycle ---");
    let mut results = Vec::new();
    let horizon = config.horizon_days;

    let mut twin = DigitalTwin::with_config(config.clone())?;
    run_to_end(&mut twin);
    let history = twin.growth_history();

    results.push(TestResult {
        name: "cycle_sample_count".into(),
        passed: history.len() == horizon as usize + 1,
        detail: format!("{} samples for a {}-day horizon", history.len(), horizon),
    });

    let contiguous = history
        .iter()
        .enumerate()
        .all(|(i, s)| s.day as usize == i);
    results.push(TestResult {
        name: "cycle_days_contiguous".into(),
        passed: contiguous,
        detail: "one sample per day, no gaps".into(),
    });

    results.push(TestResult {
        name: "cycle_stops_at_horizon".into(),
        passed: !twin.is_running() && twin.current_day() == horizon,
        detail: format!("stopped at day {}", twin.current_day()),
    });

    let m = twin.metrics();
    results.push(TestResult {
        name: "cycle_ends_mature".into(),
        passed: m.stage == GrowthStage::Mature
            && (m.progress - 100.0).abs() < 0.001
            && (m.tuber_development - 100.0).abs() < 0.001,
        detail: format!(
            "{:?}, progress {:.0}%, tubers {:.0}%",
            m.stage, m.progress, m.tuber_development
        ),
    });

    // Stressed run: height must still only go up.
    let mut stressed = DigitalTwin::with_config(config.clone())?;
    stressed.set_parameter(Parameter::Temperature, 28.0)?;
    stressed.set_parameter(Parameter::Light, 45.0)?;
    run_to_end(&mut stressed);
    let monotonic = stressed
        .growth_history()
        .windows(2)
        .all(|w| w[1].height >= w[0].height);
    let final_sample = stressed.growth_history().last().copied();
    results.push(TestResult {
        name: "cycle_height_monotonic".into(),
        passed: monotonic,
        detail: match final_sample {
            Some(s) => format!(
                "stressed run ends at {:.1}cm, {:.1}kg (health {:.1})",
                s.height, s.yield_kg, s.health
            ),
            None => "empty history".into(),
        },
    });

    if verbose {
        if let Some(last) = history.last() {
            println!(
                "  final: day {} height {:.1}cm yield {:.1}kg",
                last.day, last.height, last.yield_kg
            );
        }
    }

    Ok(results)
}

// ── 5. Lifecycle ────────────────────────────────────────────────────────

fn validate_lifecycle(verbose: bool) -> Vec<TestResult> {
    println!("--- Lifecycle ---");
    let mut results = Vec::new();

    let mut twin = DigitalTwin::new();
    twin.start();
    twin.pause();
    let ticked = twin.tick();
    results.push(TestResult {
        name: "lifecycle_pause_before_tick".into(),
        passed: ticked.is_none() && twin.growth_history().len() == 1,
        detail: format!("{} samples after start+pause", twin.growth_history().len()),
    });

    let mut twin = DigitalTwin::new();
    twin.set_speed(SpeedMultiplier::X10);
    let co2_set = twin.set_parameter(Parameter::Co2, 310.0).is_ok();
    twin.start();
    for _ in 0..25 {
        twin.tick();
    }
    twin.reset();
    let s = twin.state();
    results.push(TestResult {
        name: "lifecycle_reset".into(),
        passed: co2_set
            && s.current_day == 0
            && s.growth_history.len() == 1
            && s.params == SimulationParameters::default()
            && !s.is_running
            && s.speed_multiplier == SpeedMultiplier::X10,
        detail: format!(
            "day {}, {} samples, speed {}x",
            s.current_day,
            s.growth_history.len(),
            s.speed_multiplier.value()
        ),
    });

    let stale = twin.tick();
    results.push(TestResult {
        name: "lifecycle_no_stale_tick".into(),
        passed: stale.is_none() && twin.growth_history().len() == 1,
        detail: "tick after reset is a no-op".into(),
    });

    results.push(TestResult {
        name: "lifecycle_snapshot_idempotent".into(),
        passed: twin.state() == twin.state(),
        detail: "repeated state() calls agree".into(),
    });

    let bad_speed = twin.set_speed_value(3);
    results.push(TestResult {
        name: "lifecycle_rejects_speed".into(),
        passed: bad_speed.is_err() && twin.speed() == SpeedMultiplier::X10,
        detail: match bad_speed {
            Err(e) => e.to_string(),
            Ok(()) => "3x accepted".into(),
        },
    });

    if verbose {
        let m = twin.metrics();
        println!(
            "  metrics after reset: health {:.0}% ({}), yield {:.1}kg",
            m.health,
            m.status.label(),
            m.predicted_yield
        );
    }

    results
}

// ── 6. Clock ────────────────────────────────────────────────────────────

fn validate_clock(verbose: bool) -> Vec<TestResult> {
    println!("--- Clock ---");
    let mut results = Vec::new();

    for speed in SpeedMultiplier::ALL {
        let mut twin = DigitalTwin::new();
        let mut clock = TickClock::new();
        twin.set_speed(speed);
        twin.start();
        let fired = clock.advance(&mut twin, Duration::from_secs(3));
        let expected = 3 * speed.value();
        results.push(TestResult {
            name: format!("clock_rate_{}x", speed.value()),
            passed: fired == expected,
            detail: format!("{} ticks in 3s (expected {})", fired, expected),
        });
    }

    let mut twin = DigitalTwin::new();
    let mut clock = TickClock::new();
    twin.start();
    clock.advance(&mut twin, Duration::from_millis(950));
    twin.pause();
    twin.reset();
    twin.start();
    let fired = clock.advance(&mut twin, Duration::from_millis(100));
    results.push(TestResult {
        name: "clock_no_backlog_after_reset".into(),
        passed: fired == 0 && twin.growth_history().len() == 1,
        detail: format!("{} ticks fired from stale time", fired),
    });

    if verbose {
        println!("  pending after restart: {:?}", clock.pending());
    }

    results
}
