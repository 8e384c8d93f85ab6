//! Collapse and zoom control over a laid out tree.
//!
//! [TreeView] owns a [Tree] and keeps its layout current while clades are
//! collapsed, expanded, zoomed into and out of. A renderer reads the
//! layout of the nodes through [TreeView::tree] after each operation.

use crate::layout::{self, LayoutSummary};
use crate::model::{Node, NodeId, Tree};
use log::{debug, trace};
use serde::Serialize;
use thiserror::Error;

/// Errors of invalid [TreeView] operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ViewError {
    #[error("Node {0} does not exist")]
    UnknownNode(NodeId),
    #[error("Node {node} is not part of the subtree shown from node {display_root}")]
    OutsideDisplayRoot { node: NodeId, display_root: NodeId },
    #[error("Node {0} is a leaf or has no leaves to show")]
    NotZoomable(NodeId),
    #[error("No previous zoom level to go back to")]
    EmptyZoomHistory,
}

/// Display state saved when zooming into a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomFrame {
    /// Display root before zooming
    pub root: NodeId,
    /// Scroll offset before zooming
    pub scroll_offset: f64,
}

// =#========================================================================#=
// TREE VIEW
// =#========================================================================#=
/// Collapse controller of one tree.
///
/// Keeps a display root (the node the layout is computed for), a scroll
/// offset measured in rows, and a history of zoom levels.
///
/// # Example
/// ```
/// use cladeview::parse_newick_str;
/// use cladeview::view::TreeView;
///
/// let tree = parse_newick_str("((Kiwi,Moa)Ratites,(Duck,Goose)Waterfowl);").unwrap();
/// let mut view = TreeView::new(tree);
/// assert_eq!(view.summary().unwrap().ordering_upper_bound, 4.0);
///
/// let ratites = view.tree().root().children()[0];
/// view.toggle(ratites)?;
/// assert_eq!(view.summary().unwrap().ordering_upper_bound, 3.0);
///
/// view.zoom_to(ratites)?;
/// assert_eq!(view.display_root(), ratites);
/// assert!(!view.tree()[ratites].is_collapsed());
///
/// view.zoom_back()?;
/// assert!(view.is_full_tree_visible());
/// # Ok::<(), cladeview::view::ViewError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TreeView {
    tree: Tree,
    display_root: NodeId,
    scroll_offset: f64,
    history: Vec<ZoomFrame>,
}

// ============================================================================
// New, Getters (pub)
// ============================================================================
impl TreeView {
    /// Creates a view of the full tree and runs a full layout.
    pub fn new(mut tree: Tree) -> Self {
        let display_root = tree.root_index();
        layout::layout(&mut tree, display_root);
        TreeView {
            tree,
            display_root,
            scroll_offset: 0.0,
            history: Vec::new(),
        }
    }

    /// Returns the tree with its current layout.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Consumes the view and returns the tree.
    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Returns the node the layout is currently computed for.
    pub fn display_root(&self) -> NodeId {
        self.display_root
    }

    /// Returns the summary of the current layout.
    pub fn summary(&self) -> Option<&LayoutSummary> {
        self.tree.summary()
    }

    /// Returns the scroll offset (in rows).
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Sets the scroll offset (in rows), e.g. after the user scrolled.
    pub fn set_scroll_offset(&mut self, scroll_offset: f64) {
        self.scroll_offset = scroll_offset;
    }

    /// Returns whether [zoom_back](Self::zoom_back) is possible.
    pub fn has_zoom_history(&self) -> bool {
        !self.history.is_empty()
    }

    /// Returns the number of saved zoom levels.
    pub fn zoom_depth(&self) -> usize {
        self.history.len()
    }

    /// Returns the saved zoom levels, oldest first.
    pub fn zoom_history(&self) -> &[ZoomFrame] {
        &self.history
    }

    /// Returns whether the display root is the root of the tree.
    pub fn is_full_tree_visible(&self) -> bool {
        self.display_root == self.tree.root_index()
    }

    /// Returns the visible nodes (those with a row) in pre-order.
    pub fn visible_nodes(&self) -> Vec<NodeId> {
        layout::visible_nodes(&self.tree, self.display_root)
    }
}

impl From<Tree> for TreeView {
    fn from(tree: Tree) -> Self {
        TreeView::new(tree)
    }
}

// ============================================================================
// Collapsing (pub)
// ============================================================================
impl TreeView {
    /// Collapses an expanded clade or expands a collapsed one.
    ///
    /// The scroll offset moves by the change of the node's row, so the
    /// node stays at the same place on screen.
    ///
    /// # Returns
    /// * `Ok(true)` - if the clade was toggled
    /// * `Ok(false)` - if `node` is a leaf
    /// * [ViewError] - if `node` does not exist or is not below the display root
    pub fn toggle(&mut self, node: NodeId) -> Result<bool, ViewError> {
        if self.check_displayed(node)?.is_leaf() {
            return Ok(false);
        }

        let before = self.tree[node].layout().ordering_position;
        let collapsed = !self.tree[node].is_collapsed();
        self.tree.node_mut(node).set_collapsed(collapsed);
        layout::update_ordering(&mut self.tree, self.display_root);

        let after = self.tree[node].layout().ordering_position;
        if let (Some(before), Some(after)) = (before, after) {
            self.scroll_offset += after - before;
        }
        trace!(
            "Toggled node {} to {}",
            node,
            if collapsed { "collapsed" } else { "expanded" }
        );
        Ok(true)
    }

    /// Collapses every clade of the subtree rooted at `subtree_root`
    /// (default: the display root), the subtree root included.
    ///
    /// # Arguments
    /// * `labelled_only` - Collapse only clades carrying a name
    /// * `subtree_root` - Root of the affected subtree
    ///
    /// # Returns
    /// The number of clades that changed, or [ViewError] for an invalid subtree root
    pub fn collapse_all(
        &mut self,
        labelled_only: bool,
        subtree_root: Option<NodeId>,
    ) -> Result<usize, ViewError> {
        self.set_all_collapsed(true, labelled_only, subtree_root)
    }

    /// Expands every clade of the subtree rooted at `subtree_root`
    /// (default: the display root), the subtree root included.
    ///
    /// See [collapse_all](Self::collapse_all) for arguments and return value.
    pub fn expand_all(
        &mut self,
        labelled_only: bool,
        subtree_root: Option<NodeId>,
    ) -> Result<usize, ViewError> {
        self.set_all_collapsed(false, labelled_only, subtree_root)
    }

    fn set_all_collapsed(
        &mut self,
        collapsed: bool,
        labelled_only: bool,
        subtree_root: Option<NodeId>,
    ) -> Result<usize, ViewError> {
        let subtree_root = subtree_root.unwrap_or(self.display_root);
        self.check_displayed(subtree_root)?;

        let targets: Vec<NodeId> = self
            .tree
            .pre_order_iter_from(subtree_root)
            .filter(|n| !n.children().is_empty() && (!labelled_only || n.has_name()))
            .map(Node::index)
            .collect();
        let changed = targets
            .into_iter()
            .filter(|&index| self.tree.node_mut(index).set_collapsed(collapsed))
            .count();
        layout::update_ordering(&mut self.tree, self.display_root);

        debug!(
            "{} {} clades below node {}",
            if collapsed { "Collapsed" } else { "Expanded" },
            changed,
            subtree_root
        );
        Ok(changed)
    }
}

// ============================================================================
// Zooming (pub)
// ============================================================================
impl TreeView {
    /// Makes `node` the display root, remembering the current display root
    /// and scroll offset. The node gets expanded and the scroll offset reset.
    ///
    /// # Returns
    /// * `Ok(true)` - if zoomed in
    /// * `Ok(false)` - if `node` already is the display root
    /// * [ViewError] - if `node` does not exist, is not below the display root,
    ///   is a leaf, or has no leaves
    pub fn zoom_to(&mut self, node: NodeId) -> Result<bool, ViewError> {
        let target = self.check_displayed(node)?;
        if node == self.display_root {
            return Ok(false);
        }
        if target.is_leaf() || target.layout().not_shown {
            return Err(ViewError::NotZoomable(node));
        }

        self.history.push(ZoomFrame {
            root: self.display_root,
            scroll_offset: self.scroll_offset,
        });
        self.tree.node_mut(node).set_collapsed(false);
        self.display_root = node;
        self.scroll_offset = 0.0;
        layout::layout(&mut self.tree, node);

        debug!("Zoomed into node {} (zoom depth {})", node, self.history.len());
        Ok(true)
    }

    /// Returns to the previous zoom level; the subtree zoomed out of
    /// is left collapsed.
    ///
    /// # Returns
    /// The new display root, or [ViewError::EmptyZoomHistory]
    pub fn zoom_back(&mut self) -> Result<NodeId, ViewError> {
        let frame = self.history.pop().ok_or(ViewError::EmptyZoomHistory)?;

        self.tree.node_mut(self.display_root).set_collapsed(true);
        self.display_root = frame.root;
        self.scroll_offset = frame.scroll_offset;
        layout::layout(&mut self.tree, frame.root);

        debug!(
            "Zoomed back to node {} (zoom depth {})",
            frame.root,
            self.history.len()
        );
        Ok(frame.root)
    }

    /// Shows the full tree again, forgetting all zoom levels, and collapses
    /// all named clades.
    ///
    /// # Returns
    /// The number of clades that got collapsed
    pub fn zoom_to_full(&mut self) -> Result<usize, ViewError> {
        self.history.clear();
        self.display_root = self.tree.root_index();
        self.scroll_offset = 0.0;
        layout::layout(&mut self.tree, self.display_root);
        debug!("Zoomed out to full tree");

        self.collapse_all(true, None)
    }
}

// ============================================================================
// Helpers
// ============================================================================
impl TreeView {
    /// Returns `node` if it exists and lies below the display root.
    fn check_displayed(&self, node: NodeId) -> Result<&Node, ViewError> {
        let target = self.tree.get(node).ok_or(ViewError::UnknownNode(node))?;
        if !self.tree.is_in_subtree(node, self.display_root) {
            return Err(ViewError::OutsideDisplayRoot {
                node,
                display_root: self.display_root,
            });
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_newick_str;

    #[test]
    fn test_unknown_node_is_rejected() {
        let mut view = TreeView::new(parse_newick_str("(A,B);").unwrap());
        assert_eq!(view.toggle(17), Err(ViewError::UnknownNode(17)));
        assert_eq!(view.zoom_to(17), Err(ViewError::UnknownNode(17)));
        assert_eq!(view.collapse_all(false, Some(17)), Err(ViewError::UnknownNode(17)));
    }

    #[test]
    fn test_error_messages() {
        let err = ViewError::OutsideDisplayRoot {
            node: 1,
            display_root: 4,
        };
        assert_eq!(
            err.to_string(),
            "Node 1 is not part of the subtree shown from node 4"
        );
        assert_eq!(
            ViewError::EmptyZoomHistory.to_string(),
            "No previous zoom level to go back to"
        );
    }
}
