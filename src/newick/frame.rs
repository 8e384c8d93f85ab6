//! Per-node accumulators of the Newick automaton.

use crate::model::NodeId;

/// Text and children collected for one node while its definition is open.
///
/// The automaton keeps a stack of frames: the bottom frame is the root,
/// the top frame is the node currently being read. A frame is finished on
/// `,` or `)` and then turned into a node (or dropped, or elided).
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct CladeFrame {
    /// Name text (unquoted, whitespace outside quotes removed)
    pub(crate) name: String,
    /// Raw text after `:`
    pub(crate) branch_length: String,
    /// Text between the outer brackets of the annotation block
    pub(crate) annotation: String,
    pub(crate) colon_seen: bool,
    pub(crate) annotation_seen: bool,
    /// Opened by `(`
    pub(crate) is_clade: bool,
    /// Surviving children, already in the tree
    pub(crate) children: Vec<NodeId>,
}

impl CladeFrame {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing has been read for this node yet.
    pub(crate) fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.branch_length.is_empty()
            && self.annotation.is_empty()
            && !self.annotation_seen
    }

    /// Collects a character outside quotes and brackets.
    ///
    /// In branch length mode all characters are kept; otherwise
    /// whitespace is skipped.
    pub(crate) fn push_unquoted(&mut self, c: char, branch_length: bool) {
        if branch_length {
            self.branch_length.push(c);
        } else if !c.is_whitespace() {
            self.name.push(c);
        }
    }
}
