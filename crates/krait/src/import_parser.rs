//! Parsing of a single import construct.
//!
//! A `from` import may parenthesize its symbol list and continue over
//! several physical lines. The parser consumes exactly the lines the
//! statement occupies and reports how many, so the caller can keep its line
//! counter aligned with the file.

use crate::util;

/// A recognized import statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatement {
    /// `from module import a, b`: named functions, unqualified call sites.
    Symbols { module: String, symbols: Vec<String> },
    /// `import module` / `import module as alias`: whole module, call
    /// sites qualified by the short name.
    Module { module: String, alias: Option<String> },
}

/// Outcome of consuming the import-like construct starting at one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImport {
    /// The recognized statement, or `None` when the line merely contained
    /// `import` somewhere without being either form.
    pub statement: Option<ImportStatement>,
    /// Physical lines consumed, at least 1.
    pub lines_consumed: usize,
}

impl ParsedImport {
    fn skip() -> Self {
        Self {
            statement: None,
            lines_consumed: 1,
        }
    }
}

/// Parses the import construct beginning at `lines[index]`.
///
/// Only lines that start with `from ` or `import ` at column zero are
/// statements; anything else containing the word is consumed as a single
/// ordinary line.
pub fn parse_import_at(lines: &[&str], index: usize) -> ParsedImport {
    let line = lines[index];
    if let Some(rest) = line.strip_prefix("from ") {
        return parse_from_import(rest, lines, index);
    }
    if let Some(rest) = line.strip_prefix("import ") {
        return parse_module_import(rest);
    }
    ParsedImport::skip()
}

fn parse_module_import(rest: &str) -> ParsedImport {
    let rest = rest.trim_start();
    let module = util::first_word(rest);
    if module.is_empty() {
        return ParsedImport::skip();
    }
    let mut tokens = rest.split_whitespace().skip(1);
    let alias = match tokens.next() {
        Some("as") => tokens.next().map(str::to_string),
        _ => None,
    };
    ParsedImport {
        statement: Some(ImportStatement::Module {
            module: module.to_string(),
            alias,
        }),
        lines_consumed: 1,
    }
}

fn parse_from_import(rest: &str, lines: &[&str], index: usize) -> ParsedImport {
    let rest = rest.trim_start();
    let module = util::first_word(rest);
    if module.is_empty() {
        return ParsedImport::skip();
    }
    // The import keyword sits after the module name; requiring it here
    // keeps module names containing "import" from confusing the parser.
    let after_module = rest[module.len()..].trim_start();
    let Some(symbol_text) = after_module.strip_prefix("import") else {
        return ParsedImport::skip();
    };
    let (symbols, lines_consumed) = collect_symbols(symbol_text, lines, index);
    ParsedImport {
        statement: Some(ImportStatement::Symbols {
            module: module.to_string(),
            symbols,
        }),
        lines_consumed,
    }
}

/// Collects symbol names from the text after the `import` keyword,
/// balancing a single level of parentheses across physical lines.
///
/// Commas, line breaks, and the closing parenthesis each terminate a
/// symbol; an open parenthesis restarts collection. The closing
/// parenthesis ends the statement outright, while an unparenthesized list
/// ends with its line, keeping whatever trails the last comma. A
/// parenthesis left open at end of file ends the statement with the
/// symbols gathered so far.
fn collect_symbols(first: &str, lines: &[&str], index: usize) -> (Vec<String>, usize) {
    let mut symbols = Vec::new();
    let mut segment = String::new();
    let mut consumed = 1;
    let mut open = false;
    let mut text = first;
    loop {
        for ch in text.chars() {
            match ch {
                '(' => {
                    open = true;
                    segment.clear();
                }
                ')' => {
                    push_symbol(&mut symbols, &mut segment);
                    return (symbols, consumed);
                }
                ',' => push_symbol(&mut symbols, &mut segment),
                _ => segment.push(ch),
            }
        }
        // The line break terminates a symbol just as a comma would.
        push_symbol(&mut symbols, &mut segment);
        if !open {
            return (symbols, consumed);
        }
        let Some(next) = lines.get(index + consumed).copied() else {
            return (symbols, consumed);
        };
        text = next;
        consumed += 1;
    }
}

fn push_symbol(symbols: &mut Vec<String>, segment: &mut String) {
    let symbol = util::strip_whitespace(segment);
    segment.clear();
    if !symbol.is_empty() {
        symbols.push(symbol);
    }
}
