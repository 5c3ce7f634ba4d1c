//! Pickpoint Core - session engine for the parcel-counter game
//!
//! Owns one play session: the state record, the three working-phase interval
//! timers and the random source behind customer arrivals. All rules live in
//! `pickpoint-logic`; this crate decides *when* they run.
//!
//! # Architecture
//!
//! - **Engine**: the single state owner; every mutation goes through it
//! - **Scheduler**: decay (5 s), arrival (8 s) and aging (1 s) timers on
//!   simulated time, armed only while the phase is `Working`
//! - **Systems**: the randomized arrival roll
//! - **Snapshot**: what the presentation layer redraws from
//!
//! # Example
//!
//! ```rust,no_run
//! use pickpoint_core::prelude::*;
//! use pickpoint_logic::session::Event;
//! use pickpoint_logic::zone::SceneSupport;
//!
//! let mut engine = ShiftEngine::new(ShiftConfig::default())?;
//! engine.dispatch(Event::SelectCharacter {
//!     character_id: "female1".into(),
//!     scene: SceneSupport::FULL,
//! })?;
//! engine.dispatch(Event::EnterWorkZone)?;
//!
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS
//!     for update in engine.drain_updates() {
//!         println!("{}", update.snapshot.to_json().unwrap_or_default());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod engine;
pub mod scheduler;
pub mod settings;
pub mod snapshot;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::engine::{ShiftEngine, Update};
    pub use crate::snapshot::Snapshot;
    pub use pickpoint_logic::config::ShiftConfig;
}
