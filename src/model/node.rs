//! Node module for phylogenetic tree representation.

use crate::model::name_table::{NameIndex, NO_NAME};
use serde::Serialize;

/// Index of a node in a tree (arena).
pub type NodeId = usize;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// Represents a node (vertex) in a phylogenetic tree.
///
/// A node is either:
/// - **Leaf**: parsed as a plain label, has no children
/// - **Clade**: opened by `(` in the Newick string; normally has at least two
///   children, but may have none left if all its leaves were filtered out
///
/// # Invariants
/// - `children` refer to nodes stored earlier in the arena (bottom-up construction)
/// - `parent` is `None` only for the root of the parsed tree
/// - `branch_length` is finite
/// - A clade never has exactly one child (such clades are elided while parsing)
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Index of this node in the tree arena
    index: NodeId,
    /// Index into the tree's name table ([NO_NAME] if unnamed)
    name_index: NameIndex,
    /// Ordered child indices
    children: Vec<NodeId>,
    /// Index of the parent node
    parent: Option<NodeId>,
    /// Distance to the parent node
    branch_length: f64,
    /// Raw text of the bracketed block attached to this node, brackets removed
    annotation: String,
    /// Bootstrap support read from the name position of a clade
    bootstrap_value: Option<String>,
    /// Whether the node was opened by `(`
    is_clade: bool,
    /// Whether the clade is drawn as a single row
    collapsed: bool,
    /// Values derived by the layout engine
    layout: NodeLayout,
}

impl Node {
    /// Creates a new leaf node.
    ///
    /// # Arguments
    /// * `index` - The unique index of this node in the tree (arena)
    /// * `name_index` - Index into the name table
    /// * `branch_length` - Distance to parent node (finite)
    pub fn new_leaf(index: NodeId, name_index: NameIndex, branch_length: f64) -> Self {
        Node {
            index,
            name_index,
            children: Vec::new(),
            parent: None,
            branch_length: finite_or_zero(branch_length),
            annotation: String::new(),
            bootstrap_value: None,
            is_clade: false,
            collapsed: false,
            layout: NodeLayout::default(),
        }
    }

    /// Creates a new clade node.
    ///
    /// # Arguments
    /// * `index` - The unique index of this node in the tree (arena)
    /// * `children` - Ordered child indices (may be empty after filtering)
    /// * `name_index` - Index into the name table
    /// * `branch_length` - Distance to parent node (finite)
    pub fn new_clade(
        index: NodeId,
        children: Vec<NodeId>,
        name_index: NameIndex,
        branch_length: f64,
    ) -> Self {
        Node {
            children,
            is_clade: true,
            ..Node::new_leaf(index, name_index, branch_length)
        }
    }

    /// Returns the index of this node.
    pub fn index(&self) -> NodeId {
        self.index
    }

    /// Returns the name index of this node ([NO_NAME] if unnamed).
    pub fn name_index(&self) -> NameIndex {
        self.name_index
    }

    /// Returns `true` if this node carries a name.
    pub fn has_name(&self) -> bool {
        self.name_index != NO_NAME
    }

    /// Returns the ordered child indices (empty for leaves).
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns `true` if this node has a parent set.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Returns the distance to the parent node.
    pub fn branch_length(&self) -> f64 {
        self.branch_length
    }

    /// Returns the raw annotation text (empty if none).
    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    /// Returns the bootstrap value, if parsed in bootstrap mode.
    pub fn bootstrap_value(&self) -> Option<&str> {
        self.bootstrap_value.as_deref()
    }

    /// Returns `true` if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        !self.is_clade
    }

    /// Returns `true` if this node was opened by `(`.
    pub fn is_clade(&self) -> bool {
        self.is_clade
    }

    /// Returns `true` if this clade is collapsed; always `false` for leaves.
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Returns the values derived by the last layout pass.
    pub fn layout(&self) -> &NodeLayout {
        &self.layout
    }

    /// Sets the collapse flag; ignored for leaves.
    ///
    /// # Returns
    /// `true` if the flag changed
    pub(crate) fn set_collapsed(&mut self, collapsed: bool) -> bool {
        if self.is_leaf() || self.collapsed == collapsed {
            return false;
        }
        self.collapsed = collapsed;
        true
    }

    pub(crate) fn set_annotation(&mut self, annotation: String) {
        self.annotation = annotation;
    }

    /// Stores a bootstrap value; ignored for leaves and empty values.
    pub(crate) fn set_bootstrap_value(&mut self, bootstrap_value: String) {
        if self.is_clade && !bootstrap_value.is_empty() {
            self.bootstrap_value = Some(bootstrap_value);
        }
    }

    pub(crate) fn set_parent(&mut self, parent: NodeId) {
        self.parent = Some(parent);
    }

    pub(crate) fn add_to_branch_length(&mut self, length: f64) {
        self.branch_length = finite_or_zero(self.branch_length + length);
    }

    pub(crate) fn layout_mut(&mut self) -> &mut NodeLayout {
        &mut self.layout
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

// =#========================================================================#=
// NODE LAYOUT
// =#========================================================================#=
/// Values derived for one node by the [layout](crate::layout) engine.
///
/// Distances and depths are relative to the display root of the last
/// layout pass. Nodes outside the display root keep their placement values
/// from earlier passes but have no ordering position and are not visible.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NodeLayout {
    /// Number of edges from the display root
    pub depth: usize,
    /// Sum of branch lengths from the display root
    pub cumulative_distance: f64,
    /// Range of cumulative distances within the subtree
    pub subtree_extent: Extent,
    /// Number of leaves in the subtree, regardless of collapse state
    pub descendant_leaf_count: usize,
    /// Row of this node; `None` if hidden or not shown
    pub ordering_position: Option<f64>,
    /// Clade without any leaf in its subtree
    pub not_shown: bool,
    /// Node is drawn: no collapsed ancestor below the display root and shown
    pub visible: bool,
}

// =#========================================================================#=
// EXTENT
// =#========================================================================#=
/// Closed range `[min, max]` of cumulative distances.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Extent {
    /// Smallest cumulative distance
    pub min: f64,
    /// Largest cumulative distance
    pub max: f64,
}

impl Extent {
    /// Creates the degenerate range `[value, value]`.
    pub fn point(value: f64) -> Self {
        Extent { min: value, max: value }
    }

    /// Grows this range to cover `other`.
    pub fn include(&mut self, other: Extent) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Returns `true` if `value` lies within this range.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Returns `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}
