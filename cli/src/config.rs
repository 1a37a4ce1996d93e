use std::path::{Path, PathBuf};

use catalog::CatalogPaths;
use serde::Deserialize;

/// Optional `trove.toml` configuration. Missing file or sections fall back
/// to built-in defaults; command-line flags override file values.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub print: PrintSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogSection {
    pub consumables: Option<PathBuf>,
    pub trinkets: Option<PathBuf>,
    pub leveled: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct PrintSection {
    #[serde(default = "default_include_project")]
    pub include_project: bool,
}

impl Default for PrintSection {
    fn default() -> Self {
        PrintSection {
            include_project: true,
        }
    }
}

fn default_include_project() -> bool {
    true
}

impl Config {
    /// Load a config file. A missing file at the default location is fine;
    /// an explicitly requested file must exist.
    pub fn load(path: &Path, explicit: bool) -> Result<Config, String> {
        if !path.exists() {
            if explicit {
                return Err(format!("config file '{}' not found", path.display()));
            }
            return Ok(Config::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
        toml::from_str(&text).map_err(|e| format!("invalid config '{}': {}", path.display(), e))
    }

    /// Catalog file locations, with config values over the defaults.
    pub fn catalog_paths(&self) -> CatalogPaths {
        let defaults = CatalogPaths::default();
        CatalogPaths {
            consumables: self
                .catalog
                .consumables
                .clone()
                .unwrap_or(defaults.consumables),
            trinkets: self.catalog.trinkets.clone().unwrap_or(defaults.trinkets),
            leveled: self.catalog.leveled.clone().unwrap_or(defaults.leveled),
        }
    }
}
