//! Pure game rules for Pickpoint.
//!
//! Pickpoint is a casual parcel-counter game: pick a clerk, optionally walk
//! the warehouse grounds, then scan parcels, find them on the shelves and hand
//! them to a queue of impatient customers while energy and rating drift.
//!
//! This crate contains every rule and no clock. Functions take plain data and
//! return results, so they are unit-testable without timers, randomness or a
//! UI. The engine in `pickpoint-core` owns the state and drives the timers.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Parcels on the shelves, code lookup, parcel reuse policy |
//! | [`config`] | Runtime tuning values and their validation |
//! | [`constants`] | Default costs, bounds, thresholds and timer periods |
//! | [`customer`] | Customer records, mood escalation, the capped queue |
//! | [`economy`] | Energy and rating meters with clamping |
//! | [`notice`] | Toast-style feedback attached to transitions |
//! | [`roster`] | The four playable clerks |
//! | [`session`] | Phase machine, events and the handover matcher |
//! | [`zone`] | Exploration capability and the work-start marker |

pub mod catalog;
pub mod config;
pub mod constants;
pub mod customer;
pub mod economy;
pub mod notice;
pub mod roster;
pub mod session;
pub mod zone;
