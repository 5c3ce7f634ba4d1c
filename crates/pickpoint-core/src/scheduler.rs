//! Interval timers for the working phase.
//!
//! Three independent fixed-period timers (decay, arrival, aging) advance on
//! simulated time. [`Scheduler::advance`] reports every firing that fell
//! inside the step, in the order they would have happened, so a single large
//! step behaves exactly like many small ones.

use pickpoint_logic::config::ShiftRules;

/// Which timer fired. Declaration order breaks ties between simultaneous firings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKind {
    /// Energy drain.
    Decay,
    /// Possible customer arrival.
    Arrival,
    /// Queue waiting-time tick.
    Aging,
}

#[derive(Debug, Clone)]
struct IntervalTimer {
    kind: TimerKind,
    period: f64,
    /// Seconds since the last firing.
    elapsed: f64,
}

impl IntervalTimer {
    fn new(kind: TimerKind, period_secs: f32) -> Self {
        Self {
            kind,
            period: period_secs as f64,
            elapsed: 0.0,
        }
    }

    fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Advance by `delta` seconds, pushing `(offset_into_step, kind)` per firing.
    fn advance(&mut self, delta: f64, out: &mut Vec<(f64, TimerKind)>) {
        if !(self.period.is_finite() && self.period > 0.0) {
            return;
        }
        let start = self.elapsed;
        let total = start + delta;
        let mut fired = 0u64;
        loop {
            let at = (fired + 1) as f64 * self.period;
            if at > total {
                break;
            }
            fired += 1;
            out.push((at - start, self.kind));
        }
        self.elapsed = total - fired as f64 * self.period;
    }
}

/// The three working-phase timers, armed and disarmed together.
#[derive(Debug, Clone)]
pub struct Scheduler {
    timers: [IntervalTimer; 3],
    running: bool,
}

impl Scheduler {
    pub fn new(rules: &ShiftRules) -> Self {
        Self {
            timers: [
                IntervalTimer::new(TimerKind::Decay, rules.decay_period_secs),
                IntervalTimer::new(TimerKind::Arrival, rules.arrival_period_secs),
                IntervalTimer::new(TimerKind::Aging, rules.aging_period_secs),
            ],
            running: false,
        }
    }

    /// Arm every timer from zero.
    pub fn start(&mut self) {
        for timer in &mut self.timers {
            timer.reset();
        }
        self.running = true;
    }

    /// Disarm every timer and drop any partial progress.
    pub fn stop(&mut self) {
        for timer in &mut self.timers {
            timer.reset();
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance simulated time and return the firings in chronological order.
    pub fn advance(&mut self, delta_seconds: f64) -> Vec<TimerKind> {
        if !self.running || !delta_seconds.is_finite() || delta_seconds <= 0.0 {
            return Vec::new();
        }

        let mut firings = Vec::new();
        for timer in &mut self.timers {
            timer.advance(delta_seconds, &mut firings);
        }
        firings.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        firings.into_iter().map(|(_, kind)| kind).collect()
    }
}
