//! Shift engine - owns the session and drives its timers

use log::{debug, info, warn};
use pickpoint_logic::catalog::Catalog;
use pickpoint_logic::config::{validate_config, ShiftConfig, ShiftRules};
use pickpoint_logic::notice::Notice;
use pickpoint_logic::session::{transition, Event, SessionError, SessionState, Transition};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::scheduler::{Scheduler, TimerKind};
use crate::settings::SettingsError;
use crate::snapshot::Snapshot;
use crate::systems::roll_arrival;

/// Longest stretch of simulated time a single [`ShiftEngine::update`] covers.
/// Longer steps are clamped so timer catch-up stays bounded (720 decay,
/// 450 arrival and 3600 aging firings at the stock periods).
pub const MAX_STEP_SECS: f64 = 3600.0;

/// One observable mutation, queued for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub snapshot: Snapshot,
    pub notice: Option<Notice>,
}

/// The single owner of a play session.
///
/// Player events go through [`ShiftEngine::dispatch`]; simulated time goes
/// through [`ShiftEngine::update`]. Both apply transitions to the latest
/// state, one at a time.
pub struct ShiftEngine<R: Rng = StdRng> {
    state: SessionState,
    rules: ShiftRules,
    scheduler: Scheduler,
    rng: R,
    /// Session time in seconds since the engine was created
    sim_time: f64,
    time_scale: f32,
    outbox: Vec<Update>,
}

impl ShiftEngine<StdRng> {
    /// Create an engine, seeding from `config.seed` or from entropy.
    ///
    /// The config is validated first, the same way
    /// [`load_config`](crate::settings::load_config) checks a file.
    pub fn new(config: ShiftConfig) -> Result<Self, SettingsError> {
        let errors = validate_config(&config);
        if !errors.is_empty() {
            return Err(SettingsError::Invalid(errors));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::with_rng(config.rules, rng))
    }
}

impl<R: Rng> ShiftEngine<R> {
    /// Create an engine with an injected random source. The rules are used
    /// as given; run them through `validate_config` when they come from outside.
    pub fn with_rng(rules: ShiftRules, rng: R) -> Self {
        Self {
            state: SessionState::new(Catalog::stock(0.0)),
            scheduler: Scheduler::new(&rules),
            rules,
            rng,
            sim_time: 0.0,
            time_scale: 1.0,
            outbox: Vec::new(),
        }
    }

    /// Apply a player event. Timer events are rejected; only [`update`](Self::update)
    /// raises those.
    pub fn dispatch(&mut self, event: Event) -> Result<Option<Notice>, SessionError> {
        if event.is_timer() {
            let e = SessionError::NotAPlayerEvent(event.name());
            warn!("Rejected {}: {}", event.name(), e);
            return Err(e);
        }
        self.apply(event)
    }

    /// Advance simulated time by `delta_seconds` (scaled by the time scale),
    /// at most [`MAX_STEP_SECS`] per call.
    pub fn update(&mut self, delta_seconds: f32) {
        let mut scaled = delta_seconds as f64 * self.time_scale as f64;
        if !scaled.is_finite() || scaled <= 0.0 {
            return;
        }
        if scaled > MAX_STEP_SECS {
            warn!("Clamping a {:.0}s step to {:.0}s", scaled, MAX_STEP_SECS);
            scaled = MAX_STEP_SECS;
        }
        self.sim_time += scaled;

        for kind in self.scheduler.advance(scaled) {
            let event = match kind {
                TimerKind::Decay => Some(Event::DecayTick),
                TimerKind::Aging => Some(Event::AgingTick),
                TimerKind::Arrival => roll_arrival(&self.state, &self.rules, &mut self.rng),
            };
            if let Some(event) = event {
                // Generated from the latest state; a rejection here is a rules bug.
                if let Err(e) = self.apply(event) {
                    warn!("Timer {:?} produced a rejected event: {}", kind, e);
                }
            }
        }
    }

    fn apply(&mut self, event: Event) -> Result<Option<Notice>, SessionError> {
        let was_working = self.state.is_working();
        let previous_phase = self.state.phase;
        let event_name = event.name();

        let Transition { state, notice } = match transition(&self.state, &event, &self.rules) {
            Ok(t) => t,
            Err(e) => {
                warn!("Rejected {}: {}", event_name, e);
                return Err(e);
            }
        };
        self.state = state;

        if self.state.phase != previous_phase {
            info!("Phase {} -> {} on {}", previous_phase, self.state.phase, event_name);
        }
        match &event {
            Event::CustomerArrived { name, order_code, mood } => {
                debug!("Customer {} arrived for {} ({:?})", name, order_code, mood);
            }
            Event::Fulfill => debug!("Handover attempt: {:?}", notice),
            _ => {}
        }

        self.sync_timers(was_working);
        self.outbox.push(Update {
            snapshot: self.snapshot(),
            notice: notice.clone(),
        });
        Ok(notice)
    }

    /// Start or stop the timers when the phase crosses the working boundary.
    fn sync_timers(&mut self, was_working: bool) {
        let working = self.state.is_working();
        if working && !was_working {
            self.scheduler.start();
            info!("Shift timers started at {:.1}s", self.sim_time);
        } else if was_working && !working {
            self.scheduler.stop();
            info!(
                "Shift timers stopped at {:.1}s, phase is now {}",
                self.sim_time, self.state.phase
            );
        }
    }

    /// Take every update recorded since the last drain.
    pub fn drain_updates(&mut self) -> Vec<Update> {
        std::mem::take(&mut self.outbox)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.sim_time)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn rules(&self) -> &ShiftRules {
        &self.rules
    }

    pub fn timers_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Set time scale (1.0 = real-time, 2.0 = 2x speed, etc.)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Session time in seconds
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }
}

impl Default for ShiftEngine<StdRng> {
    fn default() -> Self {
        Self::with_rng(ShiftRules::default(), StdRng::from_entropy())
    }
}
