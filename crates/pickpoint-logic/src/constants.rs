//! Game constants: stat bounds, action costs, timer periods, queue limits.
//!
//! These are the default tuning values. [`crate::config::ShiftRules`] copies
//! them into a runtime-adjustable struct; nothing else should read them
//! directly except tests.

pub mod energy {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 100.0;
    /// Successful scan at the reception desk.
    pub const SCAN_COST: f32 = 2.0;
    /// Pulling a parcel straight off a warehouse shelf.
    pub const PICK_COST: f32 = 3.0;
    /// Handing a parcel to a customer.
    pub const HANDOVER_COST: f32 = 5.0;
    /// Applied on every decay timer firing.
    pub const DECAY_COST: f32 = 0.5;
}

pub mod rating {
    pub const MIN: f32 = 1.0;
    pub const MAX: f32 = 5.0;
    pub const SCAN_MISS_PENALTY: f32 = 0.1;
    pub const MISMATCH_PENALTY: f32 = 0.3;
    pub const HANDOVER_BASE: f32 = 0.1;
    pub const HAPPY_BONUS: f32 = 0.2;
    pub const NEUTRAL_BONUS: f32 = 0.0;
    pub const ANGRY_BONUS: f32 = -0.1;
}

pub mod queue {
    /// Admission cap checked by the arrival timer.
    pub const CAP: usize = 3;
    /// Probability that an arrival timer firing admits a customer.
    pub const ARRIVAL_CHANCE: f64 = 0.5;
}

pub mod mood {
    /// Waits strictly longer than this turn a happy customer neutral.
    pub const NEUTRAL_AFTER_SECS: u32 = 10;
    /// Waits strictly longer than this turn any customer angry.
    pub const ANGRY_AFTER_SECS: u32 = 20;
}

pub mod timers {
    pub const DECAY_PERIOD_SECS: f32 = 5.0;
    pub const ARRIVAL_PERIOD_SECS: f32 = 8.0;
    pub const AGING_PERIOD_SECS: f32 = 1.0;
}

pub mod zone {
    /// Centre of the work-start marker on the ground plane (x, z).
    pub const WORK_ZONE_X: f32 = 0.0;
    pub const WORK_ZONE_Z: f32 = -11.0;
    /// Player must be strictly closer than this to start work.
    pub const WORK_ZONE_RADIUS: f32 = 2.0;
    /// The walkable grounds span `-GROUNDS_HALF_EXTENT..=GROUNDS_HALF_EXTENT` on x and z.
    pub const GROUNDS_HALF_EXTENT: f32 = 50.0;
    pub const SPAWN: (f32, f32, f32) = (0.0, 1.7, 5.0);
}
