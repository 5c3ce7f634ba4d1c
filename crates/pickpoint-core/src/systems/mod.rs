//! Systems - the random half of the timer-driven rules

mod arrival;

pub use arrival::*;
