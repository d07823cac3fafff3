//! Loaders for the static game data bundle and calculation settings.
//!
//! This crate reads the files that feed `statcalc-core`:
//! - Game data bundle (JSON, exported by the data pipeline)
//! - Default calculation options (TOML)
//! - Stat-name tables per language (RON)
//!
//! Everything loaded here is read-only once built and is handed to the
//! calculators by reference.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ContentFactory, GameDataLoader, LanguageLoader, LoadResult, OptionsLoader};
