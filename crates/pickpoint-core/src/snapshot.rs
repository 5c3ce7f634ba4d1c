//! Read-only view of a session handed to the presentation layer.

use pickpoint_logic::catalog::Order;
use pickpoint_logic::customer::Customer;
use pickpoint_logic::session::{Phase, SessionState, Shift, View};
use serde::Serialize;

/// Everything a UI needs to redraw after a mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Session time in seconds.
    pub sim_time: f64,
    pub phase: Phase,
    pub character: Option<&'static str>,
    pub view: View,
    pub shift: Shift,
    pub shift_hours: &'static str,
    pub energy: f32,
    pub rating: f32,
    pub queue_len: usize,
    pub queue: Vec<Customer>,
    /// Shelf contents for the warehouse view.
    pub shelves: Vec<Order>,
    pub selected_order: Option<Order>,
    pub current_customer: Option<Customer>,
    /// Drives the enabled state of the handover button.
    pub codes_match: Option<bool>,
}

impl Snapshot {
    pub fn capture(state: &SessionState, sim_time: f64) -> Self {
        Self {
            sim_time,
            phase: state.phase,
            character: state.character.map(|c| c.id),
            view: state.view,
            shift: state.shift,
            shift_hours: state.shift.hours(),
            energy: state.stats.energy,
            rating: state.stats.rating,
            queue_len: state.queue.len(),
            queue: state.queue.customers().to_vec(),
            shelves: state.catalog.orders().to_vec(),
            selected_order: state.selected_order().cloned(),
            current_customer: state.current_customer().cloned(),
            codes_match: state.codes_match(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
