//! Default calculation options loader.

use std::path::Path;

use statcalc_core::CalcOptions;

use crate::loaders::{LoadResult, read_file};

/// Loader for default [`CalcOptions`] from TOML.
///
/// Keys match the request options (`calcGP`, `withoutModCalc`, `gameStyle`,
/// ...). Absent keys keep their defaults.
pub struct OptionsLoader;

impl OptionsLoader {
    /// Load options from a TOML file.
    pub fn load(path: &Path) -> LoadResult<CalcOptions> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<CalcOptions> {
        Ok(toml::from_str(content)?)
    }
}
