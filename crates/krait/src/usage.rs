//! Scanning of non-import lines for references to known packages.

use crate::import_tree::{ImportTree, PackageId};
use crate::util;

/// Attributes package references to the function definition enclosing them.
///
/// The tracker carries one piece of state across a file: the name of the
/// most recently opened top-level `def`. That cursor decides reachability
/// for transitive imports, since a child package's function is only needed
/// when the function referencing it is itself needed by the parent package.
#[derive(Debug, Default)]
pub struct UsageTracker {
    enclosing_function: Option<String>,
}

impl UsageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans one non-import line at `line_index` against every package of
    /// the level owned by `parent`.
    pub fn observe_line(
        &mut self,
        tree: &mut ImportTree,
        parent: Option<PackageId>,
        line: &str,
        line_index: usize,
    ) {
        if let Some(name) = util::def_header_name(line) {
            self.enclosing_function = Some(name.to_string());
        }
        // Index-based walk: recording hits needs the tree mutably.
        for position in 0..tree.level(parent).len() {
            let id = tree.level(parent)[position];
            self.scan_for_package(tree, id, line, line_index);
        }
    }

    fn scan_for_package(
        &self,
        tree: &mut ImportTree,
        id: PackageId,
        line: &str,
        line_index: usize,
    ) {
        let short_name = tree.package(id).short_name.clone();
        if short_name.is_empty() {
            return;
        }
        let mut occurrences = 0usize;
        let mut referenced = Vec::new();
        let mut from = 0usize;
        while let Some(found) = line[from..].find(&short_name) {
            let after = from + found + short_name.len();
            occurrences += 1;
            // Only a dot right after the name marks a function reference;
            // a bare occurrence still counts as usage of the package.
            if let Some(rest) = line[after..].strip_prefix('.') {
                let name = util::name_before_paren(rest);
                if !name.is_empty() {
                    referenced.push(name.to_string());
                }
            }
            from = after;
        }
        if occurrences == 0 {
            return;
        }
        let reachable = self.is_reachable(tree, id);
        let package = tree.package_mut(id);
        for _ in 0..occurrences {
            package.usage_lines.push(line_index);
        }
        if reachable {
            for name in referenced {
                package.functions.insert(name);
            }
        }
    }

    /// Whether references made under the current cursor count as needed:
    /// always for entry-level packages, otherwise only when the enclosing
    /// function is itself needed by the parent package.
    fn is_reachable(&self, tree: &ImportTree, id: PackageId) -> bool {
        match tree.package(id).parent {
            None => true,
            Some(parent) => self
                .enclosing_function
                .as_deref()
                .is_some_and(|name| tree.package(parent).functions.contains(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use indexmap::IndexSet;

    use crate::import_tree::{ImportSpan, Package};

    use super::*;

    fn package(name: &str, short_name: &str, parent: Option<PackageId>) -> Package {
        Package {
            name: name.to_string(),
            short_name: short_name.to_string(),
            source_path: PathBuf::from(format!("{name}.py")),
            is_symbol_import: false,
            functions: IndexSet::new(),
            usage_lines: Vec::new(),
            import_span: ImportSpan::new(0, 0),
            children: Vec::new(),
            parent,
        }
    }

    #[test]
    fn qualified_call_records_line_and_function() {
        let mut tree = ImportTree::new();
        let id = tree.add(package("newlib", "nl", None));
        let mut tracker = UsageTracker::new();
        tracker.observe_line(&mut tree, None, "print(nl.addTwo(2, 3))", 4);
        assert_eq!(tree.package(id).usage_lines, vec![4]);
        assert!(tree.package(id).functions.contains("addTwo"));
    }

    #[test]
    fn bare_occurrence_records_usage_but_no_function() {
        let mut tree = ImportTree::new();
        let id = tree.add(package("newlib", "nl", None));
        let mut tracker = UsageTracker::new();
        tracker.observe_line(&mut tree, None, "thing = nl", 7);
        assert_eq!(tree.package(id).usage_lines, vec![7]);
        assert!(tree.package(id).functions.is_empty());
    }

    #[test]
    fn each_occurrence_counts_separately() {
        let mut tree = ImportTree::new();
        let id = tree.add(package("newlib", "nl", None));
        let mut tracker = UsageTracker::new();
        tracker.observe_line(&mut tree, None, "nl.addTwo(nl.addThree(1), 2)", 2);
        assert_eq!(tree.package(id).usage_lines, vec![2, 2]);
        let functions: Vec<_> = tree.package(id).functions.iter().cloned().collect();
        assert_eq!(functions, vec!["addTwo".to_string(), "addThree".to_string()]);
    }

    #[test]
    fn unreachable_child_reference_records_no_function() {
        let mut tree = ImportTree::new();
        let root = tree.add(package("alpha", "alpha", None));
        tree.package_mut(root).functions.insert("used".to_string());
        let child = tree.add(package("beta", "beta", Some(root)));

        let mut tracker = UsageTracker::new();
        tracker.observe_line(&mut tree, Some(root), "def dead():", 0);
        tracker.observe_line(&mut tree, Some(root), "    return beta.garbage()", 1);
        assert_eq!(tree.package(child).usage_lines, vec![1]);
        assert!(tree.package(child).functions.is_empty());
    }

    #[test]
    fn reachable_child_reference_records_the_function() {
        let mut tree = ImportTree::new();
        let root = tree.add(package("alpha", "alpha", None));
        tree.package_mut(root).functions.insert("used".to_string());
        let child = tree.add(package("beta", "beta", Some(root)));

        let mut tracker = UsageTracker::new();
        tracker.observe_line(&mut tree, Some(root), "def used():", 0);
        tracker.observe_line(&mut tree, Some(root), "    return beta.helper()", 1);
        assert!(tree.package(child).functions.contains("helper"));
    }

    #[test]
    fn module_level_child_reference_is_unreachable() {
        let mut tree = ImportTree::new();
        let root = tree.add(package("alpha", "alpha", None));
        tree.package_mut(root).functions.insert("used".to_string());
        let child = tree.add(package("beta", "beta", Some(root)));

        let mut tracker = UsageTracker::new();
        tracker.observe_line(&mut tree, Some(root), "beta.helper()", 0);
        assert_eq!(tree.package(child).usage_lines, vec![0]);
        assert!(tree.package(child).functions.is_empty());
    }

    #[test]
    fn cursor_updates_even_for_unneeded_definitions() {
        let mut tree = ImportTree::new();
        let root = tree.add(package("alpha", "alpha", None));
        tree.package_mut(root).functions.insert("used".to_string());
        let child = tree.add(package("beta", "beta", Some(root)));

        let mut tracker = UsageTracker::new();
        tracker.observe_line(&mut tree, Some(root), "def used():", 0);
        tracker.observe_line(&mut tree, Some(root), "def dead():", 2);
        tracker.observe_line(&mut tree, Some(root), "    return beta.garbage()", 3);
        assert!(tree.package(child).functions.is_empty());
    }

    #[test]
    fn name_without_dot_adds_no_function() {
        let mut tree = ImportTree::new();
        let id = tree.add(package("newlib", "nl", None));
        let mut tracker = UsageTracker::new();
        tracker.observe_line(&mut tree, None, "only(nl)", 1);
        assert_eq!(tree.package(id).usage_lines, vec![1]);
        assert!(tree.package(id).functions.is_empty());
    }
}
