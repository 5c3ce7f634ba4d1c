//! Customer queue: waiting customers, their patience and their mood.
//!
//! Mood only ever escalates while a customer waits: happy → neutral → angry.
//! Nothing in the aging rule can calm a customer down again.

use serde::{Deserialize, Serialize};

use crate::config::ShiftRules;

pub type CustomerId = u32;

/// Surnames the arrival generator draws from.
pub const CUSTOMER_NAMES: [&str; 6] = [
    "Ivanov", "Petrova", "Sidorov", "Kozlova", "Morozov", "Novikova",
];

/// Weighted pool for a new customer's mood (neutral counts twice).
pub const MOOD_POOL: [Mood; 4] = [Mood::Happy, Mood::Neutral, Mood::Neutral, Mood::Angry];

/// Ordered by severity, so `max` picks the worse mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Neutral,
    Angry,
}

impl Mood {
    /// Mood after waiting `wait_secs`, never better than `self`.
    pub fn after_wait(self, wait_secs: u32, neutral_after: u32, angry_after: u32) -> Self {
        let floor = if wait_secs > angry_after {
            Mood::Angry
        } else if wait_secs > neutral_after {
            Mood::Neutral
        } else {
            Mood::Happy
        };
        self.max(floor)
    }

    /// Extra rating earned (or lost) when this customer is served.
    pub fn handover_bonus(self, rules: &ShiftRules) -> f32 {
        match self {
            Mood::Happy => rules.happy_bonus,
            Mood::Neutral => rules.neutral_bonus,
            Mood::Angry => rules.angry_bonus,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    /// Code of the parcel this customer came for.
    pub order_code: String,
    pub mood: Mood,
    /// Whole seconds spent in the queue.
    pub wait_secs: u32,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>, order_code: impl Into<String>, mood: Mood) -> Self {
        Self {
            id,
            name: name.into(),
            order_code: order_code.into(),
            mood,
            wait_secs: 0,
        }
    }

    /// One second of waiting.
    pub fn age(&mut self, neutral_after: u32, angry_after: u32) {
        self.wait_secs = self.wait_secs.saturating_add(1);
        self.mood = self.mood.after_wait(self.wait_secs, neutral_after, angry_after);
    }
}

/// Customers in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerQueue {
    customers: Vec<Customer>,
}

impl CustomerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_room(&self, cap: usize) -> bool {
        self.customers.len() < cap
    }

    /// Append a customer if the queue is below `cap`. Returns whether it was admitted.
    pub fn admit(&mut self, customer: Customer, cap: usize) -> bool {
        if !self.has_room(cap) {
            return false;
        }
        self.customers.push(customer);
        true
    }

    /// Age every waiting customer by one second.
    pub fn age_all(&mut self, neutral_after: u32, angry_after: u32) {
        for customer in &mut self.customers {
            customer.age(neutral_after, angry_after);
        }
    }

    pub fn find(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn remove(&mut self, id: CustomerId) -> Option<Customer> {
        let index = self.customers.iter().position(|c| c.id == id)?;
        Some(self.customers.remove(index))
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
