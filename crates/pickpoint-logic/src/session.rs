//! Session state machine and parcel handover rules.
//!
//! A session moves `Selecting → Exploring → Working`, skipping straight from
//! `Selecting` to `Working` when the client cannot render the 3D scene.
//! `Working → Exploring` is the only way back.
//!
//! [`transition`] is a pure function: it never mutates its input, so a
//! rejected event leaves the caller's state exactly as it was. Callers always
//! feed it their *latest* state, which is what keeps timer firings and player
//! actions from overwriting each other.
//!
//! Two kinds of "failure" exist and they are deliberately different:
//!
//! - **Game outcomes** (unknown scan code, wrong parcel) succeed as
//!   transitions. They carry an error [`Notice`] and a rating penalty.
//! - **Rejections** ([`SessionError`]) are events the interface should never
//!   have sent: wrong phase, unknown ids, nothing to hand over. No penalty,
//!   no state change.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Order, OrderId, ParcelPolicy};
use crate::config::ShiftRules;
use crate::customer::{Customer, CustomerId, CustomerQueue, Mood};
use crate::economy::ShiftStats;
use crate::notice::Notice;
use crate::roster::{find_character, Character};
use crate::zone::SceneSupport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Selecting,
    Exploring,
    Working,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Selecting => "selecting",
            Phase::Exploring => "exploring",
            Phase::Working => "working",
        };
        f.write_str(name)
    }
}

/// Which counter screen is in front of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Reception,
    Warehouse,
    Customer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Morning,
    Day,
    Evening,
}

impl Shift {
    /// Opening hours shown on the shift badge.
    pub fn hours(self) -> &'static str {
        match self {
            Shift::Morning => "8:00-12:00",
            Shift::Day => "12:00-18:00",
            Shift::Evening => "18:00-22:00",
        }
    }
}

/// Everything the rules know about one play session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub phase: Phase,
    pub character: Option<&'static Character>,
    pub scene: SceneSupport,
    pub shift: Shift,
    pub view: View,
    pub stats: ShiftStats,
    pub catalog: Catalog,
    pub queue: CustomerQueue,
    /// Parcel currently in the clerk's hands.
    pub selected_order: Option<OrderId>,
    /// Customer being served, resolved against the live queue.
    pub current_customer: Option<CustomerId>,
    next_customer_id: CustomerId,
}

impl SessionState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            phase: Phase::Selecting,
            character: None,
            scene: SceneSupport::default(),
            shift: Shift::Morning,
            view: View::Reception,
            stats: ShiftStats::default(),
            catalog,
            queue: CustomerQueue::new(),
            selected_order: None,
            current_customer: None,
            next_customer_id: 1,
        }
    }

    pub fn selected_order(&self) -> Option<&Order> {
        self.selected_order.and_then(|id| self.catalog.find_by_id(id))
    }

    pub fn current_customer(&self) -> Option<&Customer> {
        self.current_customer.and_then(|id| self.queue.find(id))
    }

    /// `Some(true)` when the held parcel matches the customer's code,
    /// `None` when there is nothing to compare yet.
    pub fn codes_match(&self) -> Option<bool> {
        let customer = self.current_customer()?;
        let order = self.selected_order()?;
        Some(customer.order_code == order.code)
    }

    pub fn is_working(&self) -> bool {
        self.phase == Phase::Working
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

/// Inputs from the presentation layer and the interval timers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    SelectCharacter {
        character_id: String,
        scene: SceneSupport,
    },
    /// The avatar reached the work-start marker.
    EnterWorkZone,
    ExitWork,
    SwitchView(View),
    Scan(String),
    /// Clicked a parcel on the warehouse shelves.
    PickOrder(OrderId),
    SelectCustomer(CustomerId),
    Fulfill,
    DecayTick,
    AgingTick,
    CustomerArrived {
        name: String,
        order_code: String,
        mood: Mood,
    },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::SelectCharacter { .. } => "select_character",
            Event::EnterWorkZone => "enter_work_zone",
            Event::ExitWork => "exit_work",
            Event::SwitchView(_) => "switch_view",
            Event::Scan(_) => "scan",
            Event::PickOrder(_) => "pick_order",
            Event::SelectCustomer(_) => "select_customer",
            Event::Fulfill => "fulfill",
            Event::DecayTick => "decay_tick",
            Event::AgingTick => "aging_tick",
            Event::CustomerArrived { .. } => "customer_arrived",
        }
    }

    /// Events raised by the interval timers rather than the player.
    pub fn is_timer(&self) -> bool {
        matches!(
            self,
            Event::DecayTick | Event::AgingTick | Event::CustomerArrived { .. }
        )
    }
}

/// An event the interface should not have sent in the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    UnknownCharacter(String),
    UnknownOrder(OrderId),
    UnknownCustomer(CustomerId),
    WrongPhase { event: &'static str, phase: Phase },
    /// The customer counter is empty.
    EmptyQueue,
    QueueFull,
    /// Fulfill without both a parcel in hand and a customer selected.
    NoHandoverPending,
    /// Leaving work needs somewhere to go.
    ExplorationUnavailable,
    /// Timer events are raised by the engine, never by the interface.
    NotAPlayerEvent(&'static str),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::UnknownCharacter(id) => write!(f, "no character with id '{}'", id),
            SessionError::UnknownOrder(id) => write!(f, "no parcel with id {}", id),
            SessionError::UnknownCustomer(id) => write!(f, "no customer {} in the queue", id),
            SessionError::WrongPhase { event, phase } => {
                write!(f, "{} is not allowed while {}", event, phase)
            }
            SessionError::EmptyQueue => write!(f, "no customers waiting"),
            SessionError::QueueFull => write!(f, "customer queue is full"),
            SessionError::NoHandoverPending => {
                write!(f, "select a parcel and a customer before handing over")
            }
            SessionError::ExplorationUnavailable => {
                write!(f, "exploration is not supported on this client")
            }
            SessionError::NotAPlayerEvent(event) => {
                write!(f, "{} is raised by the shift timers only", event)
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub notice: Option<Notice>,
}

/// Apply `event` to `state`, returning the next state.
pub fn transition(
    state: &SessionState,
    event: &Event,
    rules: &ShiftRules,
) -> Result<Transition, SessionError> {
    let required = match event {
        Event::SelectCharacter { .. } => Phase::Selecting,
        Event::EnterWorkZone => Phase::Exploring,
        _ => Phase::Working,
    };
    if state.phase != required {
        return Err(SessionError::WrongPhase {
            event: event.name(),
            phase: state.phase,
        });
    }

    let mut next = state.clone();
    let notice = match event {
        Event::SelectCharacter {
            character_id,
            scene,
        } => {
            let character = find_character(character_id)
                .ok_or_else(|| SessionError::UnknownCharacter(character_id.clone()))?;
            next.character = Some(character);
            next.scene = *scene;
            if scene.supports_exploration() {
                next.phase = Phase::Exploring;
                Some(Notice::info(format!(
                    "{}, walk to the marker to start your shift",
                    character.name
                )))
            } else {
                next.phase = Phase::Working;
                Some(Notice::info("3D mode is unavailable, starting work right away"))
            }
        }
        Event::EnterWorkZone => {
            next.phase = Phase::Working;
            Some(Notice::success("Shift started! Good luck!"))
        }
        Event::ExitWork => {
            if !state.scene.supports_exploration() {
                return Err(SessionError::ExplorationUnavailable);
            }
            next.phase = Phase::Exploring;
            Some(Notice::info("Left the counter"))
        }
        Event::SwitchView(view) => {
            if *view == View::Customer && next.queue.is_empty() {
                return Err(SessionError::EmptyQueue);
            }
            next.view = *view;
            None
        }
        Event::Scan(code) => Some(scan(&mut next, code, rules)),
        Event::PickOrder(id) => {
            let order = next
                .catalog
                .find_by_id(*id)
                .ok_or(SessionError::UnknownOrder(*id))?;
            let notice = Notice::success(format!("Took the parcel from cell {}", order.cell));
            next.selected_order = Some(*id);
            next.stats.apply_energy_cost(rules.pick_energy_cost);
            Some(notice)
        }
        Event::SelectCustomer(id) => {
            if next.queue.is_empty() {
                return Err(SessionError::EmptyQueue);
            }
            if next.queue.find(*id).is_none() {
                return Err(SessionError::UnknownCustomer(*id));
            }
            next.current_customer = Some(*id);
            next.view = View::Customer;
            None
        }
        Event::Fulfill => Some(fulfill(&mut next, rules)?),
        Event::DecayTick => {
            next.stats.decay(rules.decay_energy_cost);
            None
        }
        Event::AgingTick => {
            next.queue
                .age_all(rules.neutral_after_secs, rules.angry_after_secs);
            None
        }
        Event::CustomerArrived {
            name,
            order_code,
            mood,
        } => {
            let customer = Customer::new(next.next_customer_id, name.clone(), order_code.clone(), *mood);
            if !next.queue.admit(customer, rules.queue_cap) {
                return Err(SessionError::QueueFull);
            }
            next.next_customer_id = next.next_customer_id.wrapping_add(1);
            None
        }
    };

    Ok(Transition {
        state: next,
        notice,
    })
}

fn scan(next: &mut SessionState, code: &str, rules: &ShiftRules) -> Notice {
    match next.catalog.find_by_code(code) {
        Some(order) => {
            let notice = Notice::success(format!("Parcel found: {}", order.customer_name));
            next.selected_order = Some(order.id);
            next.stats.apply_energy_cost(rules.scan_energy_cost);
            notice
        }
        None => {
            next.stats.apply_rating_delta(-rules.scan_miss_penalty);
            Notice::error(format!("Unknown code '{}'", code))
        }
    }
}

fn fulfill(next: &mut SessionState, rules: &ShiftRules) -> Result<Notice, SessionError> {
    let (Some(customer_id), Some(order_id)) = (next.current_customer, next.selected_order) else {
        return Err(SessionError::NoHandoverPending);
    };
    let customer = next
        .queue
        .find(customer_id)
        .ok_or(SessionError::UnknownCustomer(customer_id))?;
    let order = next
        .catalog
        .find_by_id(order_id)
        .ok_or(SessionError::UnknownOrder(order_id))?;

    if customer.order_code != order.code {
        let notice = Notice::error(format!(
            "Wrong parcel: customer wants {}, you are holding {}",
            customer.order_code, order.code
        ));
        next.stats.apply_rating_delta(-rules.mismatch_penalty);
        return Ok(notice);
    }

    let delta = rules.handover_rating_base + customer.mood.handover_bonus(rules);
    next.stats.apply_rating_delta(delta);
    next.stats.apply_energy_cost(rules.handover_energy_cost);
    next.queue.remove(customer_id);
    if rules.parcel_policy == ParcelPolicy::SingleUse {
        next.catalog.remove(order_id);
    }
    next.selected_order = None;
    next.current_customer = None;
    next.view = View::Reception;
    Ok(Notice::success("Parcel handed over! The customer is satisfied"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeKind;

    fn rules() -> ShiftRules {
        ShiftRules::default()
    }

    fn apply(state: &SessionState, event: Event) -> Transition {
        transition(state, &event, &rules()).unwrap()
    }

    fn working() -> SessionState {
        let state = SessionState::default();
        let state = apply(
            &state,
            Event::SelectCharacter {
                character_id: "male1".into(),
                scene: SceneSupport::FULL,
            },
        )
        .state;
        apply(&state, Event::EnterWorkZone).state
    }

    fn arrive(state: &SessionState, code: &str, mood: Mood) -> SessionState {
        apply(
            state,
            Event::CustomerArrived {
                name: "Novikova".into(),
                order_code: code.into(),
                mood,
            },
        )
        .state
    }

    #[test]
    fn test_select_character_enters_exploration() {
        let state = SessionState::default();
        let t = apply(
            &state,
            Event::SelectCharacter {
                character_id: "female2".into(),
                scene: SceneSupport::FULL,
            },
        );
        assert_eq!(t.state.phase, Phase::Exploring);
        assert_eq!(t.state.character.map(|c| c.name), Some("Anna"));
    }

    #[test]
    fn test_no_webgl_goes_straight_to_work() {
        let state = SessionState::default();
        let t = apply(
            &state,
            Event::SelectCharacter {
                character_id: "male2".into(),
                scene: SceneSupport {
                    webgl: false,
                    mobile: false,
                },
            },
        );
        assert_eq!(t.state.phase, Phase::Working);
        assert_eq!(t.notice.map(|n| n.kind), Some(NoticeKind::Info));
    }

    #[test]
    fn test_unknown_character_rejected() {
        let state = SessionState::default();
        let err = transition(
            &state,
            &Event::SelectCharacter {
                character_id: "ghost".into(),
                scene: SceneSupport::FULL,
            },
            &rules(),
        )
        .unwrap_err();
        assert_eq!(err, SessionError::UnknownCharacter("ghost".into()));
    }

    #[test]
    fn test_work_actions_gated_by_phase() {
        let state = SessionState::default();
        let err = transition(&state, &Event::Scan("1234".into()), &rules()).unwrap_err();
        assert_eq!(
            err,
            SessionError::WrongPhase {
                event: "scan",
                phase: Phase::Selecting
            }
        );
        assert!(transition(&state, &Event::DecayTick, &rules()).is_err());
    }

    #[test]
    fn test_exit_and_reenter_work() {
        let state = working();
        let exited = apply(&state, Event::ExitWork).state;
        assert_eq!(exited.phase, Phase::Exploring);
        let back = apply(&exited, Event::EnterWorkZone).state;
        assert_eq!(back.phase, Phase::Working);
    }

    #[test]
    fn test_exit_without_exploration_rejected() {
        let state = SessionState::default();
        let state = apply(
            &state,
            Event::SelectCharacter {
                character_id: "male1".into(),
                scene: SceneSupport {
                    webgl: true,
                    mobile: true,
                },
            },
        )
        .state;
        let err = transition(&state, &Event::ExitWork, &rules()).unwrap_err();
        assert_eq!(err, SessionError::ExplorationUnavailable);
    }

    #[test]
    fn test_customer_view_needs_queue() {
        let state = working();
        let err = transition(&state, &Event::SwitchView(View::Customer), &rules()).unwrap_err();
        assert_eq!(err, SessionError::EmptyQueue);
        let warehouse = apply(&state, Event::SwitchView(View::Warehouse)).state;
        assert_eq!(warehouse.view, View::Warehouse);
    }

    #[test]
    fn test_pick_costs_more_than_scan() {
        let state = working();
        let scanned = apply(&state, Event::Scan("9012".into())).state;
        let picked = apply(&state, Event::PickOrder(3)).state;
        assert_eq!(scanned.selected_order, picked.selected_order);
        assert!(picked.stats.energy < scanned.stats.energy);
        assert!((picked.stats.energy - 97.0).abs() < 1e-4);
    }

    #[test]
    fn test_pick_unknown_order_rejected() {
        let state = working();
        let err = transition(&state, &Event::PickOrder(99), &rules()).unwrap_err();
        assert_eq!(err, SessionError::UnknownOrder(99));
    }

    #[test]
    fn test_select_customer_switches_view() {
        let state = arrive(&working(), "1234", Mood::Happy);
        let id = state.queue.customers()[0].id;
        let t = apply(&state, Event::SelectCustomer(id));
        assert_eq!(t.state.view, View::Customer);
        assert_eq!(t.state.current_customer().map(|c| c.id), Some(id));
        let err = transition(&state, &Event::SelectCustomer(id + 100), &rules()).unwrap_err();
        assert_eq!(err, SessionError::UnknownCustomer(id + 100));
    }

    #[test]
    fn test_arrival_respects_cap() {
        let mut state = working();
        for _ in 0..3 {
            state = arrive(&state, "5678", Mood::Neutral);
        }
        let err = transition(
            &state,
            &Event::CustomerArrived {
                name: "Ivanov".into(),
                order_code: "1234".into(),
                mood: Mood::Happy,
            },
            &rules(),
        )
        .unwrap_err();
        assert_eq!(err, SessionError::QueueFull);
        assert_eq!(state.queue.len(), 3);
    }

    #[test]
    fn test_arrivals_get_distinct_ids() {
        let state = arrive(&arrive(&working(), "1234", Mood::Happy), "1234", Mood::Happy);
        let ids: Vec<_> = state.queue.customers().iter().map(|c| c.id).collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn test_fulfill_uses_latest_mood() {
        let state = arrive(&working(), "5678", Mood::Happy);
        let id = state.queue.customers()[0].id;
        let mut state = apply(&state, Event::SelectCustomer(id)).state;
        state = apply(&state, Event::Scan("5678".into())).state;
        for _ in 0..21 {
            state = apply(&state, Event::AgingTick).state;
        }
        assert_eq!(state.current_customer().unwrap().mood, Mood::Angry);
        state.stats.rating = 4.0;
        let served = apply(&state, Event::Fulfill).state;
        // arrived happy, but the angry bonus applies
        assert!((served.stats.rating - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_fulfill_without_selection_rejected() {
        let state = working();
        let err = transition(&state, &Event::Fulfill, &rules()).unwrap_err();
        assert_eq!(err, SessionError::NoHandoverPending);
    }

    #[test]
    fn test_single_use_policy_removes_parcel() {
        let mut rules = rules();
        rules.parcel_policy = ParcelPolicy::SingleUse;
        let state = arrive(&working(), "1234", Mood::Neutral);
        let id = state.queue.customers()[0].id;
        let state = transition(&state, &Event::SelectCustomer(id), &rules).unwrap().state;
        let state = transition(&state, &Event::Scan("1234".into()), &rules).unwrap().state;
        let served = transition(&state, &Event::Fulfill, &rules).unwrap().state;
        assert!(served.catalog.find_by_code("1234").is_none());
        assert_eq!(served.catalog.len(), 3);
    }

    #[test]
    fn test_reusable_policy_keeps_parcel() {
        let state = arrive(&working(), "1234", Mood::Neutral);
        let id = state.queue.customers()[0].id;
        let state = apply(&state, Event::SelectCustomer(id)).state;
        let state = apply(&state, Event::Scan("1234".into())).state;
        let served = apply(&state, Event::Fulfill).state;
        assert!(served.catalog.find_by_code("1234").is_some());
    }

    #[test]
    fn test_rejection_leaves_state_untouched() {
        let state = working();
        let snapshot = state.clone();
        let _ = transition(&state, &Event::PickOrder(42), &rules());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_shift_hours() {
        assert_eq!(Shift::Morning.hours(), "8:00-12:00");
        assert_eq!(SessionState::default().shift, Shift::Morning);
    }
}
