#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Sweep operations for sweeper
//!
//! This crate walks configured locations, judges every file against its
//! location's age threshold and deletes or relocates the expired ones. All
//! reporting goes through the event sender in [`OpsCtx`].

mod actions;
mod context;
mod policy;
mod sweep;

pub use actions::{delete_file, execute_action, mirrored_path, move_file, ActionOutcome};
pub use context::{OpsContextBuilder, OpsCtx};
pub use policy::RetentionPolicy;
pub use sweep::{sweep_all, sweep_location};

pub use sweeper_events::SweepReport;
