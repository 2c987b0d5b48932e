//! Arena of packages discovered while scanning import statements.
//!
//! Ownership is asymmetric: a parent owns its `children` list while a child
//! holds only a [`PackageId`] back-reference, used to answer the
//! reachability question during usage scanning. Node identity is an index
//! into the arena, so the back-reference never dangles and the tree stays
//! plain data.

use std::path::PathBuf;

use indexmap::IndexSet;

/// Identifier of a package node within an [`ImportTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackageId(u32);

impl PackageId {
    const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Inclusive range of physical line indices consumed by one import
/// statement, relative to the file it appeared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSpan {
    pub start: usize,
    pub end: usize,
}

impl ImportSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Whether the line at `index` falls inside the span.
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }
}

/// One imported module: where it lives, how call sites name it, and which
/// of its functions the importing file actually needs.
#[derive(Debug)]
pub struct Package {
    /// Module name as written after `import` / `from`.
    pub name: String,
    /// Name call sites use: the alias, or `name` when unaliased. Symbol
    /// imports reuse `name`, even though their call sites are unqualified.
    pub short_name: String,
    /// Resolved path of the file defining this module.
    pub source_path: PathBuf,
    /// True for the `from module import a, b` form.
    pub is_symbol_import: bool,
    /// Functions required from this package, in discovery order.
    pub functions: IndexSet<String>,
    /// Line indices of the importing file that reference `short_name`, one
    /// entry per occurrence.
    pub usage_lines: Vec<usize>,
    /// Physical lines consumed by the import statement itself.
    pub import_span: ImportSpan,
    /// Packages imported by this package's own source file.
    pub children: Vec<PackageId>,
    /// The importing package, or `None` for entry-file imports.
    pub parent: Option<PackageId>,
}

/// Arena holding every package discovered during dependency scanning.
#[derive(Debug, Default)]
pub struct ImportTree {
    packages: Vec<Package>,
    roots: Vec<PackageId>,
}

impl ImportTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `package`, linking it under its parent or as a root.
    pub fn add(&mut self, package: Package) -> PackageId {
        let id = PackageId(self.packages.len() as u32);
        let parent = package.parent;
        self.packages.push(package);
        match parent {
            Some(parent) => self.packages[parent.index()].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn package(&self, id: PackageId) -> &Package {
        &self.packages[id.index()]
    }

    pub fn package_mut(&mut self, id: PackageId) -> &mut Package {
        &mut self.packages[id.index()]
    }

    /// Packages imported directly by the entry file.
    pub fn roots(&self) -> &[PackageId] {
        &self.roots
    }

    /// Packages registered while scanning the file that `parent` identifies
    /// (the entry file for `None`).
    pub fn level(&self, parent: Option<PackageId>) -> &[PackageId] {
        match parent {
            Some(parent) => &self.package(parent).children,
            None => &self.roots,
        }
    }

    /// Package at the same scanning level already registered under
    /// `short_name`, if any.
    pub fn find_sibling(&self, parent: Option<PackageId>, short_name: &str) -> Option<PackageId> {
        self.level(parent)
            .iter()
            .copied()
            .find(|&id| self.package(id).short_name == short_name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
