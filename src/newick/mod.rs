//! Newick format parser for phylogenetic trees.
//!
//! This module provides [NewickParser] to parse a Newick format string
//! into a [Tree].
//!
//! # Quick API
//! For simple use cases:
//! * [`parse_str`] - parses a single string with default settings
//! * [`parse_str_with`] - parses a single string with optional filter and bootstrap mode
//! * [`parse_file`] - reads a file into memory and parses its content
//!
//! # Full API
//! For more control, configure a [NewickParser] and call
//! [`NewickParser::parse_str`].
//!
//! # Format
//! The parser reads the following grammar:
//! * `tree ::= [comment] node [';']`
//! * `node ::= leaf | clade`
//! * `clade ::= '(' node {',' node} ')' [name] [annotation] [':' branch_length]`
//! * `leaf ::= name [annotation] [':' branch_length]`
//!
//! Furthermore:
//! * Names may be quoted with `'` or `"`; a doubled quote inside stands for
//!   one literal quote. Whitespace in unquoted names is dropped.
//! * An annotation is a bracketed block `[...]`, may be nested, and is kept
//!   as raw text. A bracket right after a `.` does not count for nesting.
//! * Branch lengths are read like a decimal prefix; text without a number
//!   counts as `0.0`.
//! * Bracketed blocks before the first `(` form the tree comment.
//!
//! For a leaf:
//! * name \[annotation\] \[:branch_length\]
//!   - Example: `'Baillon''s Crake'[&pop_size=0.5]:2.1`
//!
//! For a clade (in bootstrap mode the name is read as support value):
//! * (children) \[name\] \[annotation\] \[:branch_length\]
//!   - Example: `(A,B)98:6.7`

mod defs;
mod frame;
pub mod parser;

pub use parser::NewickParser;

use crate::model::{LeafFilter, Tree};
use crate::parser::ParseError;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string to obtain a [Tree].
///
/// This is a convenience function for quick parsing of a single Newick string
/// using default settings and thus not requiring configuration of a parser.
///
/// # Arguments
/// * `newick` - The Newick format string to parse
///
/// # Returns
/// * [Tree] - Tree parsed from the string
/// * [ParseError] - If the string is not valid Newick format
///
/// # Example
/// ```
/// use cladeview::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));")?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParseError> {
    NewickParser::new().parse_str(newick)
}

/// Parses a single Newick string with an optional leaf filter and
/// optionally reading clade names as bootstrap values.
///
/// # Arguments
/// * `newick` - The Newick format string to parse
/// * `filter` - If given, only leaves accepted by it are kept
/// * `bootstrap_values` - Whether clade names are bootstrap values
///
/// # Example
/// ```
/// use cladeview::newick::parse_str_with;
///
/// let keep: &[&str] = &["Kea", "Kaka"];
/// let tree = parse_str_with("((Kea,Kaka)100,Kakapo);", Some(&keep), true)?;
/// assert_eq!(tree.num_leaves(), 2);
/// assert_eq!(tree.root().bootstrap_value(), None);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str_with<S: AsRef<str>>(
    newick: S,
    filter: Option<&dyn LeafFilter>,
    bootstrap_values: bool,
) -> Result<Tree, ParseError> {
    let mut parser = NewickParser::new();
    if let Some(filter) = filter {
        parser = parser.with_filter(filter);
    }
    if bootstrap_values {
        parser = parser.with_bootstrap_values();
    }
    parser.parse_str(newick)
}

/// Reads a file into memory and parses it as a single Newick string.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [Tree] - Tree parsed from the file content
/// * [ParseError] - If reading fails (kind `Io`) or the Newick format is invalid
///
/// # Example
/// ```no_run
/// use cladeview::newick::parse_file;
///
/// let tree = parse_file("anseriformes.nwk")?;
/// println!("Parsed tree with {} taxa", tree.num_leaves());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Tree, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_str(content)
}
