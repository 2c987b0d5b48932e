//! Resolution of an imported module name to the file defining it.

use std::path::{Path, PathBuf};

use log::debug;

use crate::config::Settings;

/// Resolves module names to source paths.
///
/// An installation override from the settings wins; otherwise the module is
/// expected to live next to the importing file, named after the module with
/// dots as path separators and a `.py` extension. Resolution never touches
/// the filesystem; the tree builder surfaces unreadable paths when it scans
/// them.
#[derive(Debug)]
pub struct PathResolver<'a> {
    settings: &'a Settings,
}

impl<'a> PathResolver<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Path of the file defining `module`, as imported from
    /// `importing_file`.
    pub fn resolve(&self, importing_file: &Path, module: &str) -> PathBuf {
        if let Some(target) = self.settings.installation_packages.get(module) {
            // Overrides may name the source file directly or point at a
            // package directory, whose source is then its __init__.py.
            let path = if target.extension().is_some_and(|ext| ext == "py") {
                target.clone()
            } else {
                target.join("__init__.py")
            };
            debug!("resolved {module} via installation override: {}", path.display());
            return path;
        }
        let mut path = importing_file
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .to_path_buf();
        for part in module.split('.') {
            path.push(part);
        }
        path.set_extension("py");
        debug!("resolved {module} next to {}: {}", importing_file.display(), path.display());
        path
    }
}
