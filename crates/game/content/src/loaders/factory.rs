//! Content factory for loading calculator inputs from a data directory.

use std::path::{Path, PathBuf};

use statcalc_core::{CalcOptions, GameData, Lookup};

use crate::loaders::{GameDataLoader, LanguageLoader, LoadResult, OptionsLoader};

/// Content factory that loads all calculator content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── game_data.json
/// ├── options.toml
/// └── languages/
///     ├── eng_us.ron
///     └── fre_fr.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load the definition bundle from `game_data.json`.
    pub fn load_game_data(&self) -> LoadResult<GameData> {
        let path = self.data_dir.join("game_data.json");
        GameDataLoader::load(&path)
    }

    /// Load default options from `options.toml`.
    ///
    /// A missing file yields the default options.
    pub fn load_options(&self) -> LoadResult<CalcOptions> {
        let path = self.data_dir.join("options.toml");
        if !path.exists() {
            return Ok(CalcOptions::default());
        }
        OptionsLoader::load(&path)
    }

    /// Load a stat-name table from `languages/{code}.ron`.
    ///
    /// # Arguments
    ///
    /// * `code` - Language code (file name without `.ron` extension)
    pub fn load_language(&self, code: &str) -> LoadResult<Lookup<String>> {
        let path = self.data_dir.join("languages").join(format!("{}.ron", code));
        LanguageLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
