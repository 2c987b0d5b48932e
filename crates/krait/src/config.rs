//! Inliner settings, loaded once at startup from an optional JSON file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use serde::Deserialize;

/// Settings controlling which imports are skipped and where pre-installed
/// packages live on disk.
///
/// `IgnorablePackages` lists module names with no local source to inline
/// (standard library modules, vendored wheels); their import lines are left
/// untouched in the output. `InstallationPackages` maps a module name to a
/// known source location, overriding sibling-path resolution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(rename = "IgnorablePackages", default)]
    pub ignorable_packages: IndexSet<String>,
    #[serde(rename = "InstallationPackages", default)]
    pub installation_packages: IndexMap<String, PathBuf>,
}

impl Settings {
    /// Loads settings from `path`, or defaults when no path was given.
    ///
    /// A path pointing at a file that does not exist also yields defaults:
    /// running without a settings file is the common case and must not
    /// fail. A file that exists but cannot be read or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            warn!(
                "settings file {} not found, continuing with defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse settings file {}", path.display()))?;
        debug!(
            "loaded settings: {} ignorable packages, {} installation overrides",
            settings.ignorable_packages.len(),
            settings.installation_packages.len()
        );
        Ok(settings)
    }

    /// Whether imports of `module` should be skipped entirely.
    pub fn is_ignorable(&self, module: &str) -> bool {
        self.ignorable_packages.contains(module)
    }
}
