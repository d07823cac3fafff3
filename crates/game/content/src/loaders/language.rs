//! Stat-name table loader.

use std::path::Path;

use statcalc_core::Lookup;

use crate::loaders::{LoadResult, read_file};

/// Loader for a stat id → display name table in RON.
///
/// ```ron
/// {
///     1: "Health",
///     5: "Speed",
/// }
/// ```
pub struct LanguageLoader;

impl LanguageLoader {
    pub fn load(path: &Path) -> LoadResult<Lookup<String>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Lookup<String>> {
        Ok(ron::from_str(content)?)
    }
}
