//! Error types for the Newick parser.
//!
//! This module provides [ParseError] and [ParseErrorKind] for representing
//! and reporting errors that occur while parsing phylogenetic trees.

use thiserror::Error;

/// Number of characters of context shown on each side of an error
pub const CONTEXT_WIDTH: usize = 20;

/// Marker placed between the two halves of the error context
const ERROR_MARKER: &str = "[ERROR HERE]";

// =#========================================================================#=
// PARSE ERROR KIND
// =#========================================================================#=
/// Error kinds that can occur during Newick parsing.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParseErrorKind {
    #[error("Unexpected '(' after a node name")]
    UnexpectedOpenParen,
    #[error("No open clade for ',' or ')'")]
    UnbalancedParenthesis,
    #[error("Quote in the middle of a name or branch length")]
    UnexpectedQuote,
    #[error("Second ':' for the same node")]
    DuplicateBranchLength,
    #[error("Second annotation block for the same node")]
    DuplicateAnnotation,
    #[error("Unclosed clade")]
    UnclosedClade,
    #[error("Unclosed quoted name")]
    UnclosedQuote,
    #[error("Unclosed annotation")]
    UnclosedAnnotation,
    #[error("IO error - {0}")]
    Io(String),
}

// =#========================================================================#=
// PARSE ERROR
// =#========================================================================#=
/// Parse error with contextual information (position and surrounding text).
///
/// `context_before` holds up to [CONTEXT_WIDTH] characters followed by the
/// offending character; `context_after` holds up to [CONTEXT_WIDTH]
/// characters following it.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} at position {position}: {context_before}[ERROR HERE]{context_after}")]
pub struct ParseError {
    kind: ParseErrorKind,
    position: usize,
    character: Option<char>,
    context_before: String,
    context_after: String,
}

impl ParseError {
    /// Creates a ParseError for the character at `position` of `input`.
    ///
    /// An out of bounds `position` yields no offending character and only
    /// the preceding context.
    ///
    /// # Arguments
    /// * `kind` - What went wrong
    /// * `input` - Characters of the parsed text
    /// * `position` - 0-based character offset of the offending character
    pub fn at(kind: ParseErrorKind, input: &[char], position: usize) -> Self {
        let end = (position + 1).min(input.len());
        let start = end.saturating_sub(CONTEXT_WIDTH + 1);
        let after_end = (end + CONTEXT_WIDTH).min(input.len());
        Self {
            kind,
            position,
            character: input.get(position).copied(),
            context_before: input[start..end].iter().collect(),
            context_after: input[end..after_end].iter().collect(),
        }
    }

    /// Creates a ParseError without parsing context (e.g. IO errors).
    pub fn without_context(kind: ParseErrorKind) -> Self {
        Self {
            kind,
            position: 0,
            character: None,
            context_before: String::new(),
            context_after: String::new(),
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Get the character offset where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the offending character, `None` without context
    pub fn character(&self) -> Option<char> {
        self.character
    }

    /// Get the text preceding the error, ending with the offending character
    pub fn context_before(&self) -> &str {
        &self.context_before
    }

    /// Get the text following the offending character
    pub fn context_after(&self) -> &str {
        &self.context_after
    }

    /// Get the full context window around the error
    pub fn context(&self) -> String {
        format!("{}{}", self.context_before, self.context_after)
    }

    /// Get the context window with the error marker inserted
    /// right after the offending character
    pub fn marked_context(&self) -> String {
        format!("{}{}{}", self.context_before, ERROR_MARKER, self.context_after)
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::without_context(ParseErrorKind::Io(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_context_includes_offending_char() {
        let input = chars("(Kea:1,Kaka:2;");
        let err = ParseError::at(ParseErrorKind::UnclosedClade, &input, 13);
        assert_eq!(err.character(), Some(';'));
        assert_eq!(err.context_before(), "(Kea:1,Kaka:2;");
        assert_eq!(err.context_after(), "");
        assert_eq!(err.context(), "(Kea:1,Kaka:2;");
        assert_eq!(err.marked_context(), "(Kea:1,Kaka:2;[ERROR HERE]");
    }

    #[test]
    fn test_context_window_is_bounded() {
        let text = format!("{}X{}", "a".repeat(30), "b".repeat(30));
        let input = chars(&text);
        let err = ParseError::at(ParseErrorKind::UnexpectedQuote, &input, 30);
        assert_eq!(err.context_before(), format!("{}X", "a".repeat(20)));
        assert_eq!(err.context_after(), "b".repeat(20));
    }

    #[test]
    fn test_display_mentions_kind_and_position() {
        let input = chars("A)B");
        let err = ParseError::at(ParseErrorKind::UnbalancedParenthesis, &input, 1);
        assert_eq!(
            err.to_string(),
            "No open clade for ',' or ')' at position 1: A)[ERROR HERE]B"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: ParseError = io.into();
        assert_eq!(err.kind(), &ParseErrorKind::Io("no such file".to_string()));
        assert_eq!(err.character(), None);
    }
}
