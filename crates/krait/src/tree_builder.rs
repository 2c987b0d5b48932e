//! Recursive construction of the import dependency tree.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use indexmap::IndexSet;
use log::{debug, warn};

use crate::config::Settings;
use crate::import_parser::{self, ImportStatement};
use crate::import_tree::{ImportSpan, ImportTree, Package, PackageId};
use crate::resolver::PathResolver;
use crate::usage::UsageTracker;

/// Builds the dependency tree by scanning the entry file and, depth-first,
/// every resolved package source.
#[derive(Debug)]
pub struct TreeBuilder<'a> {
    settings: &'a Settings,
    resolver: PathResolver<'a>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            resolver: PathResolver::new(settings),
        }
    }

    /// Scans `entry` and every transitive import, returning the full tree.
    ///
    /// A dependency file that cannot be read is fatal, as is an import
    /// cycle: inlining a cycle would recurse forever, so it is rejected
    /// with the offending chain named.
    pub fn build(&self, entry: &Path) -> Result<ImportTree> {
        let mut tree = ImportTree::new();
        let mut active = Vec::new();
        self.scan_file(&mut tree, entry, None, &mut active)?;
        Ok(tree)
    }

    fn scan_file(
        &self,
        tree: &mut ImportTree,
        path: &Path,
        parent: Option<PackageId>,
        active: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let canonical = canonical_or_raw(path);
        if active.contains(&canonical) {
            bail!(
                "circular import involving {}: {}",
                path.display(),
                format_chain(active, &canonical)
            );
        }
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to open source file {}", path.display()))?;
        debug!("scanning {}", path.display());
        self.scan_lines(tree, &source, path, parent);
        active.push(canonical);
        // The level is fixed by now; grab the ids before recursing.
        let level: Vec<PackageId> = tree.level(parent).to_vec();
        for id in level {
            let child_path = tree.package(id).source_path.clone();
            self.scan_file(tree, &child_path, Some(id), active)?;
        }
        active.pop();
        Ok(())
    }

    /// Finds every import statement and package reference in one file.
    ///
    /// Lines belonging to an import construct are never usage-scanned; the
    /// parser reports how many it consumed so the counter skips them.
    fn scan_lines(
        &self,
        tree: &mut ImportTree,
        source: &str,
        path: &Path,
        parent: Option<PackageId>,
    ) {
        let lines: Vec<&str> = source.lines().collect();
        let mut tracker = UsageTracker::new();
        let mut index = 0;
        while index < lines.len() {
            let line = lines[index];
            if line.contains("import") {
                let parsed = import_parser::parse_import_at(&lines, index);
                if let Some(statement) = parsed.statement {
                    let span = ImportSpan::new(index, index + parsed.lines_consumed - 1);
                    self.register_import(tree, statement, span, path, parent);
                }
                index += parsed.lines_consumed;
            } else {
                tracker.observe_line(tree, parent, line, index);
                index += 1;
            }
        }
    }

    fn register_import(
        &self,
        tree: &mut ImportTree,
        statement: ImportStatement,
        span: ImportSpan,
        importing_file: &Path,
        parent: Option<PackageId>,
    ) {
        let (name, short_name, is_symbol_import, symbols) = match statement {
            ImportStatement::Symbols { module, symbols } => {
                (module.clone(), module, true, symbols)
            }
            ImportStatement::Module { module, alias } => {
                let short_name = alias.unwrap_or_else(|| module.clone());
                (module, short_name, false, Vec::new())
            }
        };
        if self.settings.is_ignorable(&name) {
            debug!("leaving ignorable import {name} alone");
            return;
        }
        if let Some(existing) = tree.find_sibling(parent, &short_name) {
            // Re-import under an already-known short name: take the union
            // of requested symbols, keep the first node and its span.
            let functions = &mut tree.package_mut(existing).functions;
            for symbol in symbols {
                functions.insert(symbol);
            }
            debug!("merged re-import of {short_name}");
            return;
        }
        let source_path = self.resolver.resolve(importing_file, &name);
        let functions: IndexSet<String> = symbols.into_iter().collect();
        debug!("registered package {name} as {short_name} -> {}", source_path.display());
        tree.add(Package {
            name,
            short_name,
            source_path,
            is_symbol_import,
            functions,
            usage_lines: Vec::new(),
            import_span: span,
            children: Vec::new(),
            parent,
        });
    }
}

/// Canonicalized path, or the raw path when canonicalization fails.
fn canonical_or_raw(path: &Path) -> PathBuf {
    match fs::canonicalize(path) {
        Ok(canonical) => canonical,
        Err(error) => {
            warn!("failed to canonicalize {}: {error}", path.display());
            path.to_path_buf()
        }
    }
}

fn format_chain(active: &[PathBuf], repeated: &Path) -> String {
    let mut chain: Vec<String> = active
        .iter()
        .map(|path| path.display().to_string())
        .collect();
    chain.push(repeated.display().to_string());
    chain.join(" imports ")
}
