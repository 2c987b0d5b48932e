//! Assembly of the inlined script: extracted functions in dependency
//! pre-order, then the entry file rewritten in place of its imports.

use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use cow_utils::CowUtils;
use log::debug;
use rustc_hash::FxHashSet;

use crate::extractor;
use crate::import_tree::{ImportTree, PackageId};

/// Writes the inlined script: every needed function definition exactly
/// once, in depth-first pre-order over the dependency tree, followed by the
/// entry file with import lines dropped and qualifiers stripped.
#[derive(Debug)]
pub struct OutputAssembler<'a> {
    tree: &'a ImportTree,
}

impl<'a> OutputAssembler<'a> {
    pub fn new(tree: &'a ImportTree) -> Self {
        Self { tree }
    }

    /// Runs both stages against `out`.
    pub fn assemble<W: Write>(&self, entry: &Path, out: &mut W) -> Result<()> {
        // One process-wide set: a function name is written at most once,
        // which treats same-named functions from different files as the
        // same function.
        let mut written = FxHashSet::default();
        for &root in self.tree.roots() {
            self.write_package(root, out, &mut written)?;
        }
        self.copy_entry(entry, out)
    }

    fn write_package<W: Write>(
        &self,
        id: PackageId,
        out: &mut W,
        written: &mut FxHashSet<String>,
    ) -> Result<()> {
        let package = self.tree.package(id);
        let source = fs::read_to_string(&package.source_path).with_context(|| {
            format!(
                "failed to read {} while extracting functions for {}",
                package.source_path.display(),
                package.name
            )
        })?;
        for block in extractor::extract_functions(&source, &package.functions) {
            if !written.insert(block.name.clone()) {
                debug!("skipping {}: a definition was already written", block.name);
                continue;
            }
            for line in &block.lines {
                let line = self.strip_qualifiers(line, &package.children, None);
                writeln!(out, "{line}")?;
            }
            writeln!(out)?;
        }
        for &child in &package.children {
            self.write_package(child, out, written)?;
        }
        Ok(())
    }

    /// Copies the entry file, dropping lines consumed by import statements
    /// and stripping qualifiers on exactly the recorded usage lines.
    fn copy_entry<W: Write>(&self, entry: &Path, out: &mut W) -> Result<()> {
        let source = fs::read_to_string(entry)
            .with_context(|| format!("failed to re-read entry file {}", entry.display()))?;
        for (index, line) in source.lines().enumerate() {
            if self.is_import_line(index) {
                continue;
            }
            let line = self.strip_qualifiers(line, self.tree.roots(), Some(index));
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    /// Whether `index` falls inside any entry-level import statement.
    fn is_import_line(&self, index: usize) -> bool {
        self.tree
            .roots()
            .iter()
            .any(|&id| self.tree.package(id).import_span.contains(index))
    }

    /// Removes `short_name.` qualifiers for the packages in `scope`.
    ///
    /// With a line index the rewrite is scoped to packages whose usage
    /// lines include it; without one (function bodies being inlined) it
    /// applies unconditionally.
    fn strip_qualifiers(&self, line: &str, scope: &[PackageId], index: Option<usize>) -> String {
        let mut current = Cow::Borrowed(line);
        for &id in scope {
            let package = self.tree.package(id);
            if index.is_some_and(|index| !package.usage_lines.contains(&index)) {
                continue;
            }
            let qualifier = format!("{}.", package.short_name);
            let replaced = match current.cow_replace(qualifier.as_str(), "") {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if let Some(replaced) = replaced {
                current = Cow::Owned(replaced);
            }
        }
        current.into_owned()
    }
}
