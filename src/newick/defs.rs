//! Constants and definitions for the Newick parser.

/// Characters that may delimit a quoted name
pub(crate) const NAME_QUOTES: [char; 2] = ['\'', '"'];

/// A bracket directly preceded by this character does not open or close
/// an annotation level
pub(crate) const BRACKET_ESCAPE: char = '.';

/// Default guess for number of nodes, when the input is too short to tell
pub(crate) const DEFAULT_NUM_NODES_GUESS: usize = 16;
