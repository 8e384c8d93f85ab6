//! Parsing infrastructure shared by tree format readers.
//!
//! This module provides error handling ([ParseError]) and low-level helpers
//! for reading values out of tree text.

pub mod parsing_error;
pub mod utils;

pub use parsing_error::{ParseError, ParseErrorKind};
