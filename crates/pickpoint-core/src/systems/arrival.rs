//! Arrival system - decides whether a new customer walks in

use pickpoint_logic::config::ShiftRules;
use pickpoint_logic::customer::{CUSTOMER_NAMES, MOOD_POOL};
use pickpoint_logic::session::{Event, SessionState};
use rand::seq::SliceRandom;
use rand::Rng;

/// Roll one arrival timer firing against the latest state.
///
/// Returns `None` when the queue is at its cap, the coin flip fails or there
/// are no parcels left to ask for.
pub fn roll_arrival<R: Rng + ?Sized>(
    state: &SessionState,
    rules: &ShiftRules,
    rng: &mut R,
) -> Option<Event> {
    if !state.queue.has_room(rules.queue_cap) {
        return None;
    }

    let chance = if rules.arrival_chance.is_finite() {
        rules.arrival_chance.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if !rng.gen_bool(chance) {
        return None;
    }

    let order = state.catalog.orders().choose(rng)?;
    let name = CUSTOMER_NAMES.choose(rng)?;
    let mood = *MOOD_POOL.choose(rng)?;

    Some(Event::CustomerArrived {
        name: name.to_string(),
        order_code: order.code.clone(),
        mood,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pickpoint_logic::catalog::Catalog;
    use pickpoint_logic::customer::{Customer, Mood};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn always() -> ShiftRules {
        ShiftRules {
            arrival_chance: 1.0,
            ..ShiftRules::default()
        }
    }

    #[test]
    fn test_full_queue_never_rolls() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = SessionState::default();
        for id in 0..3 {
            state
                .queue
                .admit(Customer::new(id, "Ivanov", "1234", Mood::Happy), 3);
        }
        for _ in 0..50 {
            assert!(roll_arrival(&state, &always(), &mut rng).is_none());
        }
    }

    #[test]
    fn test_zero_chance() {
        let mut rng = StdRng::seed_from_u64(42);
        let rules = ShiftRules {
            arrival_chance: 0.0,
            ..ShiftRules::default()
        };
        let state = SessionState::default();
        for _ in 0..50 {
            assert!(roll_arrival(&state, &rules, &mut rng).is_none());
        }
    }

    #[test]
    fn test_arrival_asks_for_a_shelved_code() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = SessionState::default();
        for _ in 0..50 {
            match roll_arrival(&state, &always(), &mut rng) {
                Some(Event::CustomerArrived {
                    name, order_code, ..
                }) => {
                    assert!(state.catalog.find_by_code(&order_code).is_some());
                    assert!(CUSTOMER_NAMES.contains(&name.as_str()));
                }
                other => panic!("expected an arrival, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_empty_catalog_yields_nobody() {
        let mut rng = StdRng::seed_from_u64(7);
        let state = SessionState::new(Catalog::new(Vec::new()));
        assert!(roll_arrival(&state, &always(), &mut rng).is_none());
    }

    #[test]
    fn test_half_chance_is_roughly_half() {
        let mut rng = StdRng::seed_from_u64(1234);
        let state = SessionState::default();
        let rules = ShiftRules::default();
        let hits = (0..2000)
            .filter(|_| roll_arrival(&state, &rules, &mut rng).is_some())
            .count();
        assert!((800..1200).contains(&hits), "hits = {}", hits);
    }

    #[test]
    fn test_mood_distribution_favours_neutral() {
        let mut rng = StdRng::seed_from_u64(99);
        let state = SessionState::default();
        let mut neutral = 0;
        let mut happy = 0;
        for _ in 0..4000 {
            if let Some(Event::CustomerArrived { mood, .. }) = roll_arrival(&state, &always(), &mut rng) {
                match mood {
                    Mood::Neutral => neutral += 1,
                    Mood::Happy => happy += 1,
                    Mood::Angry => {}
                }
            }
        }
        assert!(neutral > happy);
    }
}
