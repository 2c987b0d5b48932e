//! Extraction of top-level function definition blocks from package sources.

use indexmap::IndexSet;
use log::warn;

use crate::util;

/// One extracted definition: the header line plus its indented body, in
/// original order and untouched. Qualifier rewriting happens at write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionBlock {
    pub name: String,
    pub lines: Vec<String>,
}

/// Captures every top-level `def` block in `source` whose name is in
/// `wanted`, in file order.
///
/// A block ends at the first blank line or the first unindented line; the
/// terminator is not part of the block and the scan resumes on it, so
/// back-to-back definitions are all seen. Wanted names that never match a
/// header are logged and omitted; the usage scan over-approximates, so a
/// miss is best-effort rather than an error.
pub fn extract_functions(source: &str, wanted: &IndexSet<String>) -> Vec<FunctionBlock> {
    let lines: Vec<&str> = source.lines().collect();
    let mut blocks: Vec<FunctionBlock> = Vec::new();
    let mut index = 0;
    while index < lines.len() {
        let header = util::def_header_name(lines[index]);
        let Some(name) = header.filter(|name| wanted.contains(*name)) else {
            index += 1;
            continue;
        };
        let mut block = FunctionBlock {
            name: name.to_string(),
            lines: vec![lines[index].to_string()],
        };
        index += 1;
        while index < lines.len() {
            let line = lines[index];
            if line.is_empty() || !util::is_indented(line) {
                break;
            }
            block.lines.push(line.to_string());
            index += 1;
        }
        blocks.push(block);
    }
    for name in wanted {
        if !blocks.iter().any(|block| &block.name == name) {
            warn!("no top-level definition found for {name}; it will be missing from the output");
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wanted(names: &[&str]) -> IndexSet<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn captures_header_and_indented_body() {
        let source = "def helper(x):\n    y = x + 1\n    return y\n\nprint(helper(1))\n";
        let blocks = extract_functions(source, &wanted(&["helper"]));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name, "helper");
        assert_eq!(
            blocks[0].lines,
            vec!["def helper(x):", "    y = x + 1", "    return y"],
        );
    }

    #[test]
    fn block_ends_at_blank_line() {
        let source = "def helper():\n    return 1\n\n    stray = 2\n";
        let blocks = extract_functions(source, &wanted(&["helper"]));
        assert_eq!(blocks[0].lines, vec!["def helper():", "    return 1"]);
    }

    #[test]
    fn block_ends_at_unindented_line() {
        let source = "def helper():\n    return 1\nTAIL = 3\n";
        let blocks = extract_functions(source, &wanted(&["helper"]));
        assert_eq!(blocks[0].lines, vec!["def helper():", "    return 1"]);
    }

    #[test]
    fn back_to_back_definitions_are_both_captured() {
        let source = "def first():\n    return 1\ndef second():\n    return 2\n";
        let blocks = extract_functions(source, &wanted(&["first", "second"]));
        let names: Vec<_> = blocks.iter().map(|block| block.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn unwanted_definitions_are_skipped() {
        let source = "def keep():\n    return 1\n\ndef drop():\n    return 2\n";
        let blocks = extract_functions(source, &wanted(&["keep"]));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name, "keep");
    }

    #[test]
    fn nested_definitions_never_match() {
        let source = "def outer():\n    def inner():\n        return 1\n    return inner\n";
        let blocks = extract_functions(source, &wanted(&["inner"]));
        assert!(blocks.is_empty());
    }

    #[test]
    fn blocks_come_back_in_file_order_not_wanted_order() {
        let source = "def a():\n    return 1\n\ndef b():\n    return 2\n";
        let blocks = extract_functions(source, &wanted(&["b", "a"]));
        let names: Vec<_> = blocks.iter().map(|block| block.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn missing_wanted_name_yields_no_block() {
        let source = "def present():\n    return 1\n";
        let blocks = extract_functions(source, &wanted(&["present", "phantom"]));
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn duplicate_definition_yields_two_blocks() {
        let source = "def twin():\n    return 1\n\ndef twin():\n    return 2\n";
        let blocks = extract_functions(source, &wanted(&["twin"]));
        assert_eq!(blocks.len(), 2);
    }
}
