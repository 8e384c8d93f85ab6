//! Provides the tree representation.
//!
//! Provides core data structures for representing parsed phylogenetic trees:
//! * [Tree] - Main tree structure using the arena pattern on [Node]
//! * [PreOrderIter] and [PostOrderIter] - stack-based traversals of (sub)trees

use crate::layout::LayoutSummary;
use crate::model::name_table::{NameIndex, NameTable};
use crate::model::node::{Node, NodeId};
use std::fmt;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted phylogenetic tree represented using the arena pattern on [Node].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeId].
/// Aim is to avoid referencing troubles as well as to provide efficient
/// memory layout and cache locality for traversal operations.
///
/// # Structure
/// - All nodes (root, clades, and leaves) are stored in the arena.
/// - Children are stored before their parents; the root comes last.
/// - The root is always a clade, possibly without children.
/// - Names live in the tree's own [NameTable]; nodes refer to them by index.
///
/// # Construction
/// Trees are built bottom-up by the [Newick parser](crate::newick):
/// add leaves and clades one by one, then set the root.
/// Test validity with [`Tree::is_valid()`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,

    /// Index of the root of this tree
    root_index: NodeId,

    /// Names of nodes
    names: NameTable,

    /// Text of bracketed blocks before the first `(`
    tree_comment: String,

    /// Summary recorded by the last layout pass
    summary: Option<LayoutSummary>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new empty tree with capacity for `num_nodes` nodes.
    ///
    /// The tree has no root until one is added with [add_root](Self::add_root).
    pub fn with_capacity(num_nodes: usize) -> Self {
        Tree {
            nodes: Vec::with_capacity(num_nodes),
            root_index: 0,
            names: NameTable::with_capacity(num_nodes / 2 + 1),
            tree_comment: String::new(),
            summary: None,
        }
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `name_index` - Index into the tree's name table
    /// * `branch_length` - Length of incoming branch (non-finite values become `0.0`)
    pub fn add_leaf(&mut self, name_index: NameIndex, branch_length: f64) -> NodeId {
        let index = self.nodes.len();
        self.nodes
            .push(Node::new_leaf(index, name_index, branch_length));
        index
    }

    /// Adds a clade to the tree, assigning a unique index, which gets returned.
    ///
    /// Sets the parent of all `children` to the new clade.
    ///
    /// # Arguments
    /// * `children` - Ordered child indices, all already in the tree
    /// * `name_index` - Index into the tree's name table
    /// * `branch_length` - Length of incoming branch (non-finite values become `0.0`)
    ///
    /// # Panics
    /// Panics if a child index is out of bounds.
    pub fn add_clade(
        &mut self,
        children: Vec<NodeId>,
        name_index: NameIndex,
        branch_length: f64,
    ) -> NodeId {
        let index = self.nodes.len();
        for &child in &children {
            self.nodes[child].set_parent(index);
        }
        self.nodes
            .push(Node::new_clade(index, children, name_index, branch_length));
        index
    }

    /// Adds the root clade to the tree; see [add_clade](Self::add_clade).
    pub fn add_root(
        &mut self,
        children: Vec<NodeId>,
        name_index: NameIndex,
        branch_length: f64,
    ) -> NodeId {
        self.root_index = self.add_clade(children, name_index, branch_length);
        self.root_index
    }

    /// Returns whether the root of the tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.nodes
            .get(self.root_index)
            .is_some_and(|root| root.is_clade() && !root.has_parent())
    }

    /// Returns a reference to the root node.
    ///
    /// # Panics
    /// Panics if the tree has no nodes yet.
    pub fn root(&self) -> &Node {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> NodeId {
        self.root_index
    }

    /// Returns the node at the given index, or `None` if out of bounds.
    pub fn get(&self, index: NodeId) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Returns the names of nodes of this tree.
    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Returns the number of interned names.
    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// Returns the name of the node at `index`.
    ///
    /// # Returns
    /// `None` if the node is unnamed or the index out of bounds
    pub fn name_of(&self, index: NodeId) -> Option<&str> {
        let node = self.get(index)?;
        if !node.has_name() {
            return None;
        }
        self.names.name(node.name_index())
    }

    /// Returns the text of bracketed blocks before the first `(` (may be empty).
    pub fn tree_comment(&self) -> &str {
        &self.tree_comment
    }

    /// Returns the summary of the last layout pass, if any.
    pub fn summary(&self) -> Option<&LayoutSummary> {
        self.summary.as_ref()
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|&n| n.is_leaf()).count()
    }

    /// Returns the number of clades (internal nodes, root included) in this tree.
    pub fn num_clades(&self) -> usize {
        self.nodes.iter().filter(|&n| n.is_clade()).count()
    }

    /// Returns the number of nodes in this tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no leaves, e.g. when a filter
    /// shared no names with the input.
    pub fn is_empty(&self) -> bool {
        self.num_leaves() == 0
    }

    /// Returns `true` if `index` lies in the subtree rooted at `ancestor`
    /// (a node counts as being in its own subtree).
    pub fn is_in_subtree(&self, index: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(index);
        while let Some(i) = current {
            if i == ancestor {
                return true;
            }
            current = self.get(i).and_then(Node::parent);
        }
        false
    }

    /// Returns the sum of all branch lengths in the tree.
    pub fn total_branch_length(&self) -> f64 {
        self.nodes.iter().map(Node::branch_length).sum::<f64>()
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is valid and points to a clade without parent
    /// - All node indices match their position in the arena
    /// - All children are stored before their parent and point back to it
    /// - All non-root nodes have a parent listing them as a child
    /// - Only the root may have exactly one child
    /// - All name indices are valid
    /// - All branch lengths are finite
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if !self.is_root_set() {
            return false;
        }

        for (index, node) in self.nodes.iter().enumerate() {
            // Check node index matches its arena position
            if node.index() != index {
                return false;
            }

            // Check children references
            for &child in node.children() {
                if child >= index || self.nodes[child].parent() != Some(index) {
                    return false;
                }
            }

            // Check single-child clades have been elided
            if index != self.root_index && node.children().len() == 1 {
                return false;
            }

            // Check parent references
            if index == self.root_index {
                if node.has_parent() {
                    return false;
                }
            } else {
                match node.parent() {
                    None => return false,
                    Some(parent) => {
                        let listed = self
                            .nodes
                            .get(parent)
                            .is_some_and(|p| p.children().contains(&index));
                        if !listed {
                            return false;
                        }
                    }
                }
            }

            if node.name_index() > self.names.len() || !node.branch_length().is_finite() {
                return false;
            }
        }

        true
    }
}

// ============================================================================
// Mutation (crate)
// ============================================================================
impl Tree {
    pub(crate) fn names_mut(&mut self) -> &mut NameTable {
        &mut self.names
    }

    pub(crate) fn node_mut(&mut self, index: NodeId) -> &mut Node {
        &mut self.nodes[index]
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub(crate) fn push_tree_comment(&mut self, comment: &str) {
        self.tree_comment.push_str(comment);
    }

    pub(crate) fn set_summary(&mut self, summary: LayoutSummary) {
        self.summary = Some(summary);
    }
}

impl std::ops::Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index]
    }
}

// ============================================================================
// Printing (pub)
// ============================================================================
/// Visual representation of the tree.
///
/// # Example Output
/// ```text
/// Tree with 3 leaves (5 nodes total):
/// Root: node 4
/// [4] Clade
///   ├─ [2] Clade "Moa" (branch: 0.300)
///   │  ├─ [0] Leaf "Dinornis" (branch: 0.100)
///   │  └─ [1] Leaf "Emeus" (branch: 0.200)
///   └─ [3] Leaf "Apteryx" (branch: 0.400)
/// ```
impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Tree with {} leaves ({} nodes total):",
            self.num_leaves(),
            self.nodes.len()
        )?;

        if !self.is_root_set() {
            return writeln!(f, "(No root set)");
        }

        writeln!(f, "Root: node {}", self.root_index)?;
        // (index, prefix, is_last)
        let mut stack = vec![(self.root_index, String::new(), true)];
        while let Some((index, prefix, is_last)) = stack.pop() {
            let node = &self[index];
            let connector = if prefix.is_empty() {
                ""
            } else if is_last {
                "└─ "
            } else {
                "├─ "
            };
            let kind = if node.is_leaf() { "Leaf" } else { "Clade" };
            write!(f, "{}{}[{}] {}", prefix, connector, index, kind)?;
            if let Some(name) = self.name_of(index) {
                write!(f, " \"{}\"", name)?;
            }
            if node.has_parent() {
                write!(f, " (branch: {:.3})", node.branch_length())?;
            }
            if node.is_collapsed() {
                write!(f, " [collapsed]")?;
            }
            writeln!(f)?;

            let child_prefix = if prefix.is_empty() {
                "  ".to_string()
            } else {
                format!("{}{}  ", prefix, if is_last { " " } else { "│" })
            };
            let children = node.children();
            for (i, &child) in children.iter().enumerate().rev() {
                stack.push((child, child_prefix.clone(), i + 1 == children.len()));
            }
        }
        Ok(())
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl Tree {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Post-order traversal visits each node's children before visiting the node itself.
    /// This is useful for aggregating data from leaves upward.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        self.post_order_iter_from(self.root_index)
    }

    /// Returns an iterator over the subtree rooted at `start` in post-order.
    pub fn post_order_iter_from(&self, start: NodeId) -> PostOrderIter<'_> {
        PostOrderIter::new(self, start)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// Pre-order traversal visits each node before visiting its children.
    /// This is useful for propagating data from root to leaves.
    ///
    /// # Example
    /// ```
    /// use cladeview::parse_newick_str;
    ///
    /// let tree = parse_newick_str("((Kiwi,Moa),Emu);").unwrap();
    /// let names: Vec<_> = tree
    ///     .pre_order_iter()
    ///     .filter_map(|n| tree.name_of(n.index()))
    ///     .collect();
    /// assert_eq!(names, ["Kiwi", "Moa", "Emu"]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        self.pre_order_iter_from(self.root_index)
    }

    /// Returns an iterator over the subtree rooted at `start` in pre-order.
    pub fn pre_order_iter_from(&self, start: NodeId) -> PreOrderIter<'_> {
        PreOrderIter::new(self, start)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each node is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeId, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if start < tree.nodes.len() {
            stack.push((start, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let node = &self.tree[index];

            if children_visited || node.children().is_empty() {
                return Some(node);
            }

            self.stack.push((index, true));
            // Push children in reverse, so the first one is processed first
            for &child in node.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each node is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree, start: NodeId) -> Self {
        let mut stack = Vec::new();
        if start < tree.nodes.len() {
            stack.push(start);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.tree[index];

        // Push children in reverse, so the first one is processed first
        self.stack.extend(node.children().iter().rev());

        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kiwi_tree() -> Tree {
        let mut tree = Tree::with_capacity(5);
        let brown = tree.names_mut().intern("Brown kiwi");
        let spotted = tree.names_mut().intern("Spotted kiwi");
        let emu = tree.names_mut().intern("Emu");
        let a = tree.add_leaf(brown, 1.0);
        let b = tree.add_leaf(spotted, 2.0);
        let kiwis = tree.add_clade(vec![a, b], 0, 0.5);
        let c = tree.add_leaf(emu, 3.0);
        tree.add_root(vec![kiwis, c], 0, 0.0);
        tree
    }

    #[test]
    fn test_bottom_up_construction() {
        let tree = kiwi_tree();
        assert!(tree.is_valid());
        assert_eq!(tree.root_index(), 4);
        assert_eq!(tree.num_leaves(), 3);
        assert_eq!(tree.num_clades(), 2);
        assert_eq!(tree[0].parent(), Some(2));
        assert_eq!(tree[2].parent(), Some(4));
        assert_eq!(tree.name_of(3), Some("Emu"));
        assert_eq!(tree.name_of(2), None);
        assert!((tree.total_branch_length() - 6.5).abs() < 1e-12);
    }

    #[test]
    fn test_traversal_orders() {
        let tree = kiwi_tree();
        let pre: Vec<_> = tree.pre_order_iter().map(Node::index).collect();
        let post: Vec<_> = tree.post_order_iter().map(Node::index).collect();
        assert_eq!(pre, [4, 2, 0, 1, 3]);
        assert_eq!(post, [0, 1, 2, 3, 4]);

        let sub: Vec<_> = tree.pre_order_iter_from(2).map(Node::index).collect();
        assert_eq!(sub, [2, 0, 1]);
    }

    #[test]
    fn test_subtree_membership() {
        let tree = kiwi_tree();
        assert!(tree.is_in_subtree(0, 2));
        assert!(tree.is_in_subtree(2, 2));
        assert!(tree.is_in_subtree(3, 4));
        assert!(!tree.is_in_subtree(3, 2));
        assert!(!tree.is_in_subtree(99, 4));
    }

    #[test]
    fn test_single_child_clade_is_invalid() {
        let mut tree = Tree::with_capacity(3);
        let a = tree.add_leaf(0, 1.0);
        let lonely = tree.add_clade(vec![a], 0, 1.0);
        tree.add_root(vec![lonely], 0, 0.0);
        assert!(!tree.is_valid());
    }

    #[test]
    fn test_display_lists_all_nodes() {
        let tree = kiwi_tree();
        let text = tree.to_string();
        assert!(text.starts_with("Tree with 3 leaves (5 nodes total):"));
        assert!(text.contains("[0] Leaf \"Brown kiwi\" (branch: 1.000)"));
        assert!(text.contains("└─ [3] Leaf \"Emu\""));
    }
}
