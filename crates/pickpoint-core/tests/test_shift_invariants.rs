//! Integration tests: long seeded shifts with random player input.
//!
//! Each run interleaves timer updates with random scans, picks, customer
//! selections and handovers, and checks the meter, queue and mood
//! invariants after every step.

use std::collections::HashMap;

use pickpoint_core::prelude::*;
use pickpoint_logic::config::ShiftRules;
use pickpoint_logic::customer::{CustomerId, Mood};
use pickpoint_logic::session::{Event, Phase, View};
use pickpoint_logic::zone::SceneSupport;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Helpers ────────────────────────────────────────────────────────────

fn working_engine(seed: u64, rules: ShiftRules) -> ShiftEngine {
    let mut engine = ShiftEngine::with_rng(rules, StdRng::seed_from_u64(seed));
    engine
        .dispatch(Event::SelectCharacter {
            character_id: "male2".into(),
            scene: SceneSupport::FULL,
        })
        .expect("roster id");
    engine.dispatch(Event::EnterWorkZone).expect("exploring");
    engine
}

/// A random player action; many of them will be rejected, which is fine.
fn random_action(engine: &ShiftEngine, input: &mut StdRng) -> Event {
    let state = engine.state();
    match input.gen_range(0..7) {
        0 => Event::Scan(["1234", "5678", "9012", "3456", "0000", "42"][input.gen_range(0..6)].into()),
        1 => Event::PickOrder(input.gen_range(1..=5)),
        2 => match state.queue.customers().first() {
            Some(c) => Event::SelectCustomer(c.id),
            None => Event::SelectCustomer(999),
        },
        3 => Event::Fulfill,
        4 => Event::SwitchView(View::Warehouse),
        5 => Event::SwitchView(View::Reception),
        _ => Event::SwitchView(View::Customer),
    }
}

fn check_invariants(engine: &ShiftEngine, moods: &mut HashMap<CustomerId, Mood>) {
    let state = engine.state();
    assert!(
        (0.0..=100.0).contains(&state.stats.energy),
        "energy {}",
        state.stats.energy
    );
    assert!(
        (1.0..=5.0).contains(&state.stats.rating),
        "rating {}",
        state.stats.rating
    );
    assert!(state.queue.len() <= engine.rules().queue_cap);

    for customer in state.queue.customers() {
        if let Some(previous) = moods.insert(customer.id, customer.mood) {
            assert!(
                customer.mood >= previous,
                "customer {} went from {:?} to {:?}",
                customer.id,
                previous,
                customer.mood
            );
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────

#[test]
fn random_shifts_hold_invariants() {
    for seed in 0..20u64 {
        let mut engine = working_engine(seed, ShiftRules::default());
        let mut input = StdRng::seed_from_u64(seed + 1000);
        let mut moods = HashMap::new();

        for _ in 0..600 {
            engine.update(input.gen_range(0.1..1.5));
            check_invariants(&engine, &mut moods);

            if input.gen_bool(0.4) {
                let action = random_action(&engine, &mut input);
                let _ = engine.dispatch(action);
                check_invariants(&engine, &mut moods);
            }
        }
    }
}

#[test]
fn busy_counter_stays_capped() {
    let rules = ShiftRules {
        arrival_chance: 1.0,
        ..ShiftRules::default()
    };
    let mut engine = working_engine(5, rules);
    let mut moods = HashMap::new();
    for _ in 0..1000 {
        engine.update(0.7);
        check_invariants(&engine, &mut moods);
    }
    assert_eq!(engine.state().queue.len(), 3);
}

#[test]
fn idle_shift_drains_energy_to_zero() {
    let mut engine = working_engine(9, ShiftRules::default());
    // 100 energy / 0.5 per 5 s = 1000 s
    engine.update(1200.0);
    assert_eq!(engine.state().stats.energy, 0.0);
    assert!(engine.state().stats.is_exhausted());
    // rating is untouched by timers alone
    assert_eq!(engine.state().stats.rating, 5.0);
}

#[test]
fn serving_every_arrival_keeps_rating_high() {
    let rules = ShiftRules {
        arrival_chance: 1.0,
        ..ShiftRules::default()
    };
    let mut engine = working_engine(11, rules);
    let mut served = 0;

    for _ in 0..120 {
        engine.update(1.0);
        let next = engine.state().queue.customers().first().cloned();
        if let Some(customer) = next {
            engine.dispatch(Event::SelectCustomer(customer.id)).unwrap();
            engine.dispatch(Event::Scan(customer.order_code)).unwrap();
            engine.dispatch(Event::Fulfill).unwrap();
            served += 1;
        }
    }

    assert_eq!(served, 15);
    assert!(engine.state().queue.is_empty());
    assert!(engine.state().stats.rating >= 4.9);
}

#[test]
fn leaving_work_freezes_the_counter() {
    let mut engine = working_engine(3, ShiftRules::default());
    engine.update(30.0);
    engine.dispatch(Event::ExitWork).unwrap();
    assert_eq!(engine.state().phase, Phase::Exploring);

    let before = engine.snapshot();
    engine.update(300.0);
    let after = engine.snapshot();

    assert_eq!(before.energy, after.energy);
    assert_eq!(before.queue, after.queue);
    assert!(engine.drain_updates().iter().all(|u| u.snapshot.sim_time <= before.sim_time));
}
