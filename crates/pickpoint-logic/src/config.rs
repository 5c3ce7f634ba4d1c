//! Shift configuration: every tunable number the rules read at runtime.
//!
//! The defaults reproduce the stock game. A partial JSON document only has to
//! name the fields it changes:
//!
//! ```
//! use pickpoint_logic::config::{validate_config, ShiftConfig};
//!
//! let mut config = ShiftConfig::default();
//! config.rules.queue_cap = 5;
//! config.seed = Some(7);
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog::ParcelPolicy;
use crate::constants::{energy, mood, queue, rating, timers};

/// Costs, penalties, limits and timer periods used by the transition rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftRules {
    pub scan_energy_cost: f32,
    pub pick_energy_cost: f32,
    pub handover_energy_cost: f32,
    pub decay_energy_cost: f32,

    pub scan_miss_penalty: f32,
    pub mismatch_penalty: f32,
    pub handover_rating_base: f32,
    pub happy_bonus: f32,
    pub neutral_bonus: f32,
    pub angry_bonus: f32,

    pub queue_cap: usize,
    pub arrival_chance: f64,
    pub neutral_after_secs: u32,
    pub angry_after_secs: u32,

    pub decay_period_secs: f32,
    pub arrival_period_secs: f32,
    pub aging_period_secs: f32,

    pub parcel_policy: ParcelPolicy,
}

impl Default for ShiftRules {
    fn default() -> Self {
        Self {
            scan_energy_cost: energy::SCAN_COST,
            pick_energy_cost: energy::PICK_COST,
            handover_energy_cost: energy::HANDOVER_COST,
            decay_energy_cost: energy::DECAY_COST,
            scan_miss_penalty: rating::SCAN_MISS_PENALTY,
            mismatch_penalty: rating::MISMATCH_PENALTY,
            handover_rating_base: rating::HANDOVER_BASE,
            happy_bonus: rating::HAPPY_BONUS,
            neutral_bonus: rating::NEUTRAL_BONUS,
            angry_bonus: rating::ANGRY_BONUS,
            queue_cap: queue::CAP,
            arrival_chance: queue::ARRIVAL_CHANCE,
            neutral_after_secs: mood::NEUTRAL_AFTER_SECS,
            angry_after_secs: mood::ANGRY_AFTER_SECS,
            decay_period_secs: timers::DECAY_PERIOD_SECS,
            arrival_period_secs: timers::ARRIVAL_PERIOD_SECS,
            aging_period_secs: timers::AGING_PERIOD_SECS,
            parcel_policy: ParcelPolicy::default(),
        }
    }
}

/// Top-level configuration handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftConfig {
    pub rules: ShiftRules,
    /// Seed for the random source (None = seed from entropy).
    pub seed: Option<u64>,
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A timer period is zero, negative or not finite.
    InvalidPeriod { timer: &'static str, secs: f32 },
    /// A cost or penalty is negative or not finite.
    NegativeAmount { field: &'static str, value: f32 },
    /// A signed rating adjustment is NaN or infinite.
    NonFiniteBonus { field: &'static str, value: f32 },
    /// Arrival chance outside `0.0..=1.0`.
    ChanceOutOfRange(f64),
    /// A queue that admits nobody.
    ZeroQueueCap,
    /// Angry threshold must come strictly after the neutral one.
    MoodThresholdsOutOfOrder { neutral: u32, angry: u32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPeriod { timer, secs } => {
                write!(f, "{} timer period must be positive, got {}", timer, secs)
            }
            ConfigError::NegativeAmount { field, value } => {
                write!(f, "{} must be a non-negative number, got {}", field, value)
            }
            ConfigError::NonFiniteBonus { field, value } => {
                write!(f, "{} must be a finite number, got {}", field, value)
            }
            ConfigError::ChanceOutOfRange(p) => {
                write!(f, "arrival chance must be within 0..=1, got {}", p)
            }
            ConfigError::ZeroQueueCap => write!(f, "queue cap must be at least 1"),
            ConfigError::MoodThresholdsOutOfOrder { neutral, angry } => write!(
                f,
                "angry threshold ({}s) must be greater than neutral threshold ({}s)",
                angry, neutral
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate a shift configuration, returning all errors found.
pub fn validate_config(config: &ShiftConfig) -> Vec<ConfigError> {
    let rules = &config.rules;
    let mut errors = Vec::new();

    for (timer, secs) in [
        ("decay", rules.decay_period_secs),
        ("arrival", rules.arrival_period_secs),
        ("aging", rules.aging_period_secs),
    ] {
        if !(secs.is_finite() && secs > 0.0) {
            errors.push(ConfigError::InvalidPeriod { timer, secs });
        }
    }

    // Costs and penalties are magnitudes; bonuses below are signed.
    for (field, value) in [
        ("scan_energy_cost", rules.scan_energy_cost),
        ("pick_energy_cost", rules.pick_energy_cost),
        ("handover_energy_cost", rules.handover_energy_cost),
        ("decay_energy_cost", rules.decay_energy_cost),
        ("scan_miss_penalty", rules.scan_miss_penalty),
        ("mismatch_penalty", rules.mismatch_penalty),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            errors.push(ConfigError::NegativeAmount { field, value });
        }
    }

    for (field, value) in [
        ("handover_rating_base", rules.handover_rating_base),
        ("happy_bonus", rules.happy_bonus),
        ("neutral_bonus", rules.neutral_bonus),
        ("angry_bonus", rules.angry_bonus),
    ] {
        if !value.is_finite() {
            errors.push(ConfigError::NonFiniteBonus { field, value });
        }
    }

    if !(0.0..=1.0).contains(&rules.arrival_chance) {
        errors.push(ConfigError::ChanceOutOfRange(rules.arrival_chance));
    }
    if rules.queue_cap == 0 {
        errors.push(ConfigError::ZeroQueueCap);
    }
    if rules.angry_after_secs <= rules.neutral_after_secs {
        errors.push(ConfigError::MoodThresholdsOutOfOrder {
            neutral: rules.neutral_after_secs,
            angry: rules.angry_after_secs,
        });
    }

    errors
}
