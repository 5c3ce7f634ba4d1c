//! Pure shift economy: the energy and rating meters.
//!
//! Every operation is total: amounts outside the meter range are absorbed by
//! clamping, never reported as errors.

use serde::{Deserialize, Serialize};

use crate::constants::{energy, rating};

/// The two meters shown in the header bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftStats {
    /// Stamina left for the shift, `0.0..=100.0`.
    pub energy: f32,
    /// Pickup-point customer rating, `1.0..=5.0`.
    pub rating: f32,
}

impl Default for ShiftStats {
    fn default() -> Self {
        Self {
            energy: energy::MAX,
            rating: rating::MAX,
        }
    }
}

impl ShiftStats {
    /// Spend energy; never goes below zero.
    pub fn apply_energy_cost(&mut self, amount: f32) {
        self.energy = clamp_energy(self.energy - amount);
    }

    /// Adjust rating by a signed delta, staying within `1.0..=5.0`.
    pub fn apply_rating_delta(&mut self, amount: f32) {
        self.rating = clamp_rating(self.rating + amount);
    }

    /// One firing of the fatigue timer.
    pub fn decay(&mut self, cost: f32) {
        self.apply_energy_cost(cost);
    }

    pub fn is_exhausted(&self) -> bool {
        self.energy <= energy::MIN
    }
}

fn clamp_energy(value: f32) -> f32 {
    value.clamp(energy::MIN, energy::MAX)
}

fn clamp_rating(value: f32) -> f32 {
    value.clamp(rating::MIN, rating::MAX)
}
