//! Pickpoint Headless Shift Harness
//!
//! Replays the counter scenarios and a seeded multi-minute shift without any
//! UI. Runs entirely in-process with no rendering and no input devices.
//!
//! Usage:
//!   cargo run -p pickpoint-simtest
//!   cargo run -p pickpoint-simtest -- --verbose --seed 7   (engine logs at debug)
//!   cargo run -p pickpoint-simtest -- --config data/shift_config.json

use pickpoint_core::prelude::*;
use pickpoint_core::settings::{self, SettingsError};
use pickpoint_logic::catalog::ParcelPolicy;
use pickpoint_logic::config::ShiftRules;
use pickpoint_logic::customer::{CustomerId, Mood};
use pickpoint_logic::notice::NoticeKind;
use pickpoint_logic::session::{transition, Event, Phase, SessionError, SessionState, View};
use pickpoint_logic::zone::{self, Position, SceneSupport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Stock config (same JSON shipped with the game) ──────────────────────
const CONFIG_JSON: &str = include_str!("../../../data/shift_config.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    seed: u64,
    config_path: Option<String>,
}

fn parse_args() -> Options {
    let args: Vec<String> = std::env::args().collect();
    let value_of = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .cloned()
    };
    Options {
        verbose: args.iter().any(|a| a == "--verbose"),
        seed: value_of("--seed")
            .and_then(|s| s.parse().ok())
            .unwrap_or(42),
        config_path: value_of("--config"),
    }
}

fn main() {
    let opts = parse_args();
    if opts.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .init();
    }
    println!("=== Pickpoint Shift Harness (seed {}) ===\n", opts.seed);

    let rules = match load_rules(&opts) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("cannot load config: {}", e);
            std::process::exit(2);
        }
    };

    let mut results = Vec::new();

    // 1. Shipped config
    results.extend(validate_stock_config(opts.verbose));

    // 2. Scan & handover scenarios
    results.extend(validate_counter_scenarios(&rules));

    // 3. Phase machine
    results.extend(validate_phases(&rules));

    // 4. Walking to the work marker
    results.extend(validate_work_zone(opts.verbose));

    // 5. Seeded shift with a scripted clerk
    results.extend(validate_seeded_shift(&rules, opts.seed, opts.verbose));

    // 6. Single-use parcels
    results.extend(validate_single_use(&rules, opts.seed));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
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
}

fn load_rules(opts: &Options) -> Result<ShiftRules, SettingsError> {
    match &opts.config_path {
        Some(path) => Ok(settings::load_config_file(path)?.rules),
        None => Ok(ShiftRules::default()),
    }
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

fn step(state: &SessionState, event: Event, rules: &ShiftRules) -> Result<SessionState, SessionError> {
    transition(state, &event, rules).map(|t| t.state)
}

/// A session at the counter with one customer waiting for `code`, selected.
fn serving(code: &str, mood: Mood, rules: &ShiftRules) -> Result<SessionState, SessionError> {
    let state = step(
        &SessionState::default(),
        Event::SelectCharacter {
            character_id: "female1".into(),
            scene: SceneSupport::FULL,
        },
        rules,
    )?;
    let state = step(&state, Event::EnterWorkZone, rules)?;
    let state = step(
        &state,
        Event::CustomerArrived {
            name: "Morozov".into(),
            order_code: code.into(),
            mood,
        },
        rules,
    )?;
    let id = state.queue.customers()[0].id;
    step(&state, Event::SelectCustomer(id), rules)
}

// ── 1. Stock Config ─────────────────────────────────────────────────────

fn validate_stock_config(verbose: bool) -> Vec<TestResult> {
    println!("--- Stock Config ---");
    let mut results = Vec::new();

    let config = match settings::load_config(CONFIG_JSON.as_bytes()) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult {
                name: "config_parse".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "config_matches_defaults".into(),
        passed: config == ShiftConfig::default(),
        detail: "shipped JSON equals the built-in defaults".into(),
    });

    if verbose {
        println!(
            "  periods: decay {}s, arrival {}s, aging {}s; queue cap {}",
            config.rules.decay_period_secs,
            config.rules.arrival_period_secs,
            config.rules.aging_period_secs,
            config.rules.queue_cap
        );
    }

    results
}

// ── 2. Counter Scenarios ────────────────────────────────────────────────

fn validate_counter_scenarios(rules: &ShiftRules) -> Vec<TestResult> {
    println!("--- Counter Scenarios ---");
    let mut results = Vec::new();

    results.push(scenario_scan_hit(rules));
    results.push(scenario_scan_miss(rules));
    results.push(scenario_handover("happy", Mood::Happy, 0.1 + 0.2, rules));
    results.push(scenario_handover("angry", Mood::Angry, 0.0, rules));
    results.push(scenario_mismatch(rules));

    results
}

fn scenario_scan_hit(rules: &ShiftRules) -> TestResult {
    let run = || -> Result<(bool, String), SessionError> {
        let state = serving("1234", Mood::Neutral, rules)?;
        let before = state.stats.energy;
        let next = step(&state, Event::Scan("1234".into()), rules)?;
        let cell = next.selected_order().map(|o| o.cell.clone());
        let ok = cell.as_deref() == Some("A-15") && close(next.stats.energy, before - rules.scan_energy_cost);
        Ok((ok, format!("cell={:?} energy {} → {}", cell, before, next.stats.energy)))
    };
    as_result("scan_hit_selects_a15", run())
}

fn scenario_scan_miss(rules: &ShiftRules) -> TestResult {
    let run = || -> Result<(bool, String), SessionError> {
        let mut state = serving("1234", Mood::Neutral, rules)?;
        state.stats.rating = 4.0;
        let next = step(&state, Event::Scan("0000".into()), rules)?;
        let ok = next.selected_order.is_none() && close(next.stats.rating, 4.0 - rules.scan_miss_penalty);
        Ok((ok, format!("rating 4.0 → {:.2}", next.stats.rating)))
    };
    as_result("scan_miss_penalised", run())
}

fn scenario_handover(label: &str, mood: Mood, expected_delta: f32, rules: &ShiftRules) -> TestResult {
    let run = || -> Result<(bool, String), SessionError> {
        let mut state = step(&serving("5678", mood, rules)?, Event::Scan("5678".into()), rules)?;
        state.stats.rating = 4.0;
        let energy = state.stats.energy;
        let next = step(&state, Event::Fulfill, rules)?;
        let ok = close(next.stats.rating, 4.0 + expected_delta)
            && close(next.stats.energy, energy - rules.handover_energy_cost)
            && next.queue.is_empty()
            && next.selected_order.is_none()
            && next.current_customer.is_none();
        Ok((
            ok,
            format!("rating 4.0 → {:.2}, queue {}", next.stats.rating, next.queue.len()),
        ))
    };
    as_result(&format!("handover_{}", label), run())
}

fn scenario_mismatch(rules: &ShiftRules) -> TestResult {
    let run = || -> Result<(bool, String), SessionError> {
        let mut state = step(&serving("5678", Mood::Happy, rules)?, Event::Scan("9012".into()), rules)?;
        state.stats.rating = 4.0;
        let t = transition(&state, &Event::Fulfill, rules)?;
        let ok = close(t.state.stats.rating, 4.0 - rules.mismatch_penalty)
            && t.state.queue.len() == 1
            && t.state.selected_order == state.selected_order
            && t.state.current_customer == state.current_customer
            && t.notice.map(|n| n.kind) == Some(NoticeKind::Error);
        Ok((ok, format!("rating 4.0 → {:.2}", t.state.stats.rating)))
    };
    as_result("handover_mismatch", run())
}

fn as_result(name: &str, outcome: Result<(bool, String), SessionError>) -> TestResult {
    match outcome {
        Ok((passed, detail)) => TestResult {
            name: name.into(),
            passed,
            detail,
        },
        Err(e) => TestResult {
            name: name.into(),
            passed: false,
            detail: format!("rejected: {}", e),
        },
    }
}

// ── 3. Phases ───────────────────────────────────────────────────────────

fn validate_phases(rules: &ShiftRules) -> Vec<TestResult> {
    println!("--- Phases ---");
    let mut results = Vec::new();

    let mobile = SceneSupport {
        webgl: true,
        mobile: true,
    };
    let direct = step(
        &SessionState::default(),
        Event::SelectCharacter {
            character_id: "male1".into(),
            scene: mobile,
        },
        rules,
    );
    results.push(TestResult {
        name: "phase_mobile_goes_straight_to_work".into(),
        passed: matches!(&direct, Ok(s) if s.phase == Phase::Working),
        detail: format!("{:?}", direct.as_ref().map(|s| s.phase)),
    });

    let unknown = step(
        &SessionState::default(),
        Event::SelectCharacter {
            character_id: "captain".into(),
            scene: SceneSupport::FULL,
        },
        rules,
    );
    results.push(TestResult {
        name: "phase_roster_enforced".into(),
        passed: matches!(unknown, Err(SessionError::UnknownCharacter(_))),
        detail: "ids outside the roster are rejected".into(),
    });

    let mut engine = ShiftEngine::with_rng(rules.clone(), StdRng::seed_from_u64(0));
    let cycle = engine
        .dispatch(Event::SelectCharacter {
            character_id: "female2".into(),
            scene: SceneSupport::FULL,
        })
        .and_then(|_| engine.dispatch(Event::EnterWorkZone))
        .and_then(|_| engine.dispatch(Event::ExitWork));
    let stopped = !engine.timers_running();
    let before = engine.snapshot();
    engine.update(120.0);
    let after = engine.snapshot();
    results.push(TestResult {
        name: "phase_exit_stops_timers".into(),
        passed: cycle.is_ok() && stopped && before.energy == after.energy && after.queue_len == 0,
        detail: format!(
            "timers stopped={} energy {} → {}",
            stopped, before.energy, after.energy
        ),
    });

    results
}

// ── 4. Work Zone ────────────────────────────────────────────────────────

fn validate_work_zone(verbose: bool) -> Vec<TestResult> {
    println!("--- Work Zone ---");
    let mut results = Vec::new();

    // Walk straight ahead (-z) at the scene's per-frame speed.
    let speed = 0.1;
    let mut pos = Position::spawn();
    let mut frames = 0;
    while !zone::in_work_zone(pos) && frames < 10_000 {
        pos = zone::clamp_to_grounds(Position::new(pos.x, pos.y, pos.z - speed));
        frames += 1;
    }
    results.push(TestResult {
        name: "zone_reached_from_spawn".into(),
        passed: zone::in_work_zone(pos) && (140..=150).contains(&frames),
        detail: format!("{} frames, z={:.2}", frames, pos.z),
    });

    let outside = zone::clamp_to_grounds(Position::new(200.0, 1.7, -200.0));
    results.push(TestResult {
        name: "zone_grounds_clamped".into(),
        passed: outside.x == 50.0 && outside.z == -50.0,
        detail: format!("({}, {})", outside.x, outside.z),
    });

    if verbose {
        println!(
            "  spawn distance to marker: {:.2}",
            zone::distance_to_work_zone(Position::spawn())
        );
    }

    results
}

// ── 5. Seeded Shift ─────────────────────────────────────────────────────

#[derive(Default)]
struct ShiftLog {
    served: u32,
    scan_misses: u32,
    max_queue: usize,
    mood_regressions: u32,
    meter_violations: u32,
    /// Sim time at which energy first hit zero.
    exhausted_at: Option<f64>,
}

fn validate_seeded_shift(rules: &ShiftRules, seed: u64, verbose: bool) -> Vec<TestResult> {
    println!("--- Seeded Shift (10 min) ---");
    let mut results = Vec::new();

    let log = run_clerk_shift(rules, seed, 600.0, verbose);
    let replay = run_clerk_shift(rules, seed, 600.0, false);

    results.push(TestResult {
        name: "shift_meters_in_range".into(),
        passed: log.meter_violations == 0,
        detail: format!("{} out-of-range readings", log.meter_violations),
    });
    results.push(TestResult {
        name: "shift_queue_capped".into(),
        passed: log.max_queue <= rules.queue_cap,
        detail: format!("max queue {} (cap {})", log.max_queue, rules.queue_cap),
    });
    results.push(TestResult {
        name: "shift_mood_monotonic".into(),
        passed: log.mood_regressions == 0,
        detail: format!("{} mood regressions", log.mood_regressions),
    });
    results.push(TestResult {
        name: "shift_customers_served".into(),
        passed: log.served > 0,
        detail: format!(
            "served {}, {} mistyped scans, {}",
            log.served,
            log.scan_misses,
            match log.exhausted_at {
                Some(t) => format!("clerk exhausted at {:.0}s", t),
                None => "clerk never exhausted".to_string(),
            }
        ),
    });
    results.push(TestResult {
        name: "shift_deterministic".into(),
        passed: log.served == replay.served
            && log.scan_misses == replay.scan_misses
            && log.exhausted_at == replay.exhausted_at,
        detail: "same seed, same shift".into(),
    });

    results
}

/// A clerk who serves the head of the queue, mistyping one scan in ten.
fn run_clerk_shift(rules: &ShiftRules, seed: u64, seconds: f32, verbose: bool) -> ShiftLog {
    let mut engine = ShiftEngine::with_rng(rules.clone(), StdRng::seed_from_u64(seed));
    let mut clerk = StdRng::seed_from_u64(seed ^ 0x5eed);
    let mut log = ShiftLog::default();
    let mut last_moods: Vec<(CustomerId, Mood)> = Vec::new();

    let _ = engine.dispatch(Event::SelectCharacter {
        character_id: "male1".into(),
        scene: SceneSupport::FULL,
    });
    let _ = engine.dispatch(Event::EnterWorkZone);

    let dt = 0.5;
    let mut t = 0.0;
    while t < seconds {
        engine.update(dt);
        t += dt;

        let state = engine.state();
        log.max_queue = log.max_queue.max(state.queue.len());
        if !(0.0..=100.0).contains(&state.stats.energy) || !(1.0..=5.0).contains(&state.stats.rating) {
            log.meter_violations += 1;
        }
        if log.exhausted_at.is_none() && state.stats.is_exhausted() {
            log.exhausted_at = Some(engine.sim_time());
        }
        for c in state.queue.customers() {
            if let Some((_, old)) = last_moods.iter().find(|(id, _)| *id == c.id) {
                if c.mood < *old {
                    log.mood_regressions += 1;
                }
            }
        }
        last_moods = state.queue.customers().iter().map(|c| (c.id, c.mood)).collect();

        // The clerk takes a few seconds per customer.
        let Some(customer) = state.queue.customers().first().cloned() else {
            continue;
        };
        if clerk.gen_bool(0.7) {
            continue;
        }
        let _ = engine.dispatch(Event::SelectCustomer(customer.id));
        if clerk.gen_bool(0.1) {
            let _ = engine.dispatch(Event::Scan("0000".into()));
            log.scan_misses += 1;
            continue;
        }
        let _ = engine.dispatch(Event::Scan(customer.order_code.clone()));
        if let Ok(Some(notice)) = engine.dispatch(Event::Fulfill) {
            if notice.kind == NoticeKind::Success {
                log.served += 1;
            }
        }
        if engine.state().view != View::Reception {
            let _ = engine.dispatch(Event::SwitchView(View::Reception));
        }
    }

    if verbose {
        let snapshot = engine.snapshot();
        println!(
            "  after {:.0}s: energy {:.1}, rating {:.2}, queue {}",
            snapshot.sim_time, snapshot.energy, snapshot.rating, snapshot.queue_len
        );
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("  final snapshot:\n{}", json),
            Err(e) => println!("  snapshot serialization failed: {}", e),
        }
    }

    log
}

// ── 6. Single-Use Parcels ───────────────────────────────────────────────

fn validate_single_use(rules: &ShiftRules, seed: u64) -> Vec<TestResult> {
    println!("--- Single-Use Parcels ---");
    let mut results = Vec::new();

    let rules = ShiftRules {
        parcel_policy: ParcelPolicy::SingleUse,
        arrival_chance: 1.0,
        ..rules.clone()
    };
    let mut engine = ShiftEngine::with_rng(rules, StdRng::seed_from_u64(seed));
    let _ = engine.dispatch(Event::SelectCharacter {
        character_id: "female1".into(),
        scene: SceneSupport::FULL,
    });
    let _ = engine.dispatch(Event::EnterWorkZone);

    let mut served = 0;
    for _ in 0..600 {
        engine.update(1.0);
        let Some(customer) = engine.state().queue.customers().first().cloned() else {
            continue;
        };
        let _ = engine.dispatch(Event::SelectCustomer(customer.id));
        if engine.dispatch(Event::Scan(customer.order_code.clone())).is_ok()
            && engine.state().selected_order().is_some()
            && engine.dispatch(Event::Fulfill).is_ok()
            && engine.state().current_customer.is_none()
        {
            served += 1;
        }
    }

    let shelves = engine.state().catalog.len();
    results.push(TestResult {
        name: "single_use_catalog_drains".into(),
        passed: shelves < 4 && served + shelves == 4,
        detail: format!("served {}, {} parcels left", served, shelves),
    });

    results
}
