//! Line-scanning token helpers shared by the import parser, the usage
//! tracker, and the function extractor. Everything here is cut-at-delimiter
//! slicing; no token is ever validated as a Python identifier.

/// Token from the start of `s` up to the first whitespace character.
pub fn first_word(s: &str) -> &str {
    s.find(char::is_whitespace).map_or(s, |at| &s[..at])
}

/// Token from the start of `s` up to the first opening parenthesis.
pub fn name_before_paren(s: &str) -> &str {
    s.find('(').map_or(s, |at| &s[..at])
}

/// Function name of a top-level `def` header, or `None` when the line is
/// not one. Indented headers are nested definitions and never match.
pub fn def_header_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("def ")?;
    let name = name_before_paren(rest);
    (!name.is_empty()).then_some(name)
}

/// `s` with every whitespace character removed, interior included.
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Whether the line begins with indentation of any kind.
pub fn is_indented(line: &str) -> bool {
    line.chars().next().is_some_and(char::is_whitespace)
}
