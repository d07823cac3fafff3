//! Roster-level batch processing on top of `statcalc-core`.
//!
//! [`StatService`] owns the published [`GameData`](statcalc_core::GameData)
//! bundle and exposes both single-unit operations and the batch entry points
//! in [`batch`]. Batch results are attached to the input JSON records as
//! `stats` and, when requested, `gp` fields.
pub mod batch;
pub mod error;
pub mod service;

pub use batch::{GP_FIELD, RosterBatch, STATS_FIELD};
pub use error::{Result, RosterError};
pub use service::StatService;
