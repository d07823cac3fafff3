//! Content loaders for reading the data bundle and settings from files.
//!
//! The game data bundle is JSON (as exported by the data pipeline), default
//! calculation options are TOML, and stat-name tables are RON.

pub mod factory;
pub mod game_data;
pub mod language;
pub mod options;

pub use factory::ContentFactory;
pub use game_data::GameDataLoader;
pub use language::LanguageLoader;
pub use options::OptionsLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
