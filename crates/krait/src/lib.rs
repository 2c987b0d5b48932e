//! krait inlines a multi-file Python script into a single file.
//!
//! Given an entry script, it discovers every locally authored module the
//! script imports, directly or transitively, works out which functions are
//! actually referenced, extracts those definitions from their source files,
//! and emits one self-contained script: the needed functions first, then
//! the entry file with import lines removed and module qualifiers stripped
//! from call sites.
//!
//! The engine is deliberately line-oriented. Files are scanned once, top to
//! bottom, with no Python parsing beyond recognizing import statements and
//! `def` headers at column zero. That keeps it fast and predictable on the
//! deployment scripts it is meant for, at the cost of being fooled by
//! strings or comments that look like code.

pub mod config;
pub mod emitter;
pub mod extractor;
pub mod import_parser;
pub mod import_tree;
pub mod orchestrator;
pub mod resolver;
pub mod tree_builder;
pub mod usage;
pub mod util;
