//! Layout engine deriving drawing coordinates of tree nodes.
//!
//! A layout has two passes over the subtree below a display root:
//! * **Placement** (independent of collapsing): depth, cumulative distance,
//!   descendant leaf count, shown state and subtree extent of every node.
//! * **Ordering** (depends on collapsing): each leaf and each collapsed clade
//!   gets the next row, `1.0, 2.0, ...` in left-to-right order. An expanded
//!   clade sits at the mean row of its children. Nodes below a collapsed
//!   clade get no row and are not visible.
//!
//! [layout] runs both passes, [update_ordering] only the second one, which
//! is all that changes when clades are collapsed or expanded.
//! Both run in linear time and are idempotent.

use crate::model::{Extent, Node, NodeId, Tree};
use log::trace;
use serde::Serialize;

/// Results of a layout pass that concern the whole display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutSummary {
    /// Node the layout was computed for
    pub display_root: NodeId,
    /// Largest depth below the display root
    pub max_depth: usize,
    /// Number of rows, i.e. the largest ordering position (`0.0` if none)
    pub ordering_upper_bound: f64,
    /// Range of cumulative distances below the display root
    pub distance_extent: Extent,
}

// =#========================================================================#=
// LAYOUT (pub)
// =#========================================================================#=
/// Runs a full layout of the subtree rooted at `display_root`.
///
/// Does nothing if `display_root` is not a node of `tree`.
///
/// # Example
/// ```
/// use cladeview::layout;
/// use cladeview::parse_newick_str;
///
/// let mut tree = parse_newick_str("((Kiwi:1,Moa:2):1,Emu:1);").unwrap();
/// let root = tree.root_index();
/// layout::layout(&mut tree, root);
///
/// let kiwis = tree.root().children()[0];
/// assert_eq!(tree[kiwis].layout().ordering_position, Some(1.5));
/// assert_eq!(tree.summary().unwrap().ordering_upper_bound, 3.0);
/// assert_eq!(tree.summary().unwrap().distance_extent.max, 3.0);
/// ```
pub fn layout(tree: &mut Tree, display_root: NodeId) {
    if tree.get(display_root).is_none() {
        return;
    }
    let placement = place_nodes(tree, display_root);
    order_nodes(tree, display_root, placement.max_depth);
}

/// Reruns only the ordering pass of the subtree rooted at `display_root`.
///
/// Falls back to a full [layout] if the last layout was computed for
/// another display root (or none at all).
pub fn update_ordering(tree: &mut Tree, display_root: NodeId) {
    let known_max_depth = tree
        .summary()
        .filter(|summary| summary.display_root == display_root)
        .map(|summary| summary.max_depth);
    match known_max_depth {
        Some(max_depth) => order_nodes(tree, display_root, max_depth),
        None => layout(tree, display_root),
    }
}

/// Returns the nodes with an ordering position, in pre-order from
/// `display_root`.
pub fn visible_nodes(tree: &Tree, display_root: NodeId) -> Vec<NodeId> {
    tree.pre_order_iter_from(display_root)
        .filter(|node| node.layout().visible)
        .map(Node::index)
        .collect()
}

// =#========================================================================#=
// PLACEMENT PASS
// =#========================================================================#=
/// State carried through the placement pass.
struct PlacementContext {
    /// Subtree nodes in pre-order
    order: Vec<NodeId>,
    max_depth: usize,
}

/// Computes the collapse-independent fields below `display_root`.
fn place_nodes(tree: &mut Tree, display_root: NodeId) -> PlacementContext {
    let mut context = PlacementContext {
        order: tree
            .pre_order_iter_from(display_root)
            .map(Node::index)
            .collect(),
        max_depth: 0,
    };

    // Top-down: depth and distance
    for &index in &context.order {
        let (depth, distance) = match tree[index].parent() {
            Some(parent) if index != display_root => {
                let parent_layout = tree[parent].layout();
                (
                    parent_layout.depth + 1,
                    parent_layout.cumulative_distance + tree[index].branch_length(),
                )
            }
            _ => (0, 0.0),
        };
        context.max_depth = context.max_depth.max(depth);

        let layout = tree.node_mut(index).layout_mut();
        layout.depth = depth;
        layout.cumulative_distance = distance;
    }

    // Bottom-up: leaf counts and extents
    for &index in context.order.iter().rev() {
        let node = &tree[index];
        let mut leaf_count = usize::from(node.is_leaf());
        let mut extent = Extent::point(node.layout().cumulative_distance);
        for &child in node.children() {
            let child_layout = tree[child].layout();
            leaf_count += child_layout.descendant_leaf_count;
            if !child_layout.not_shown {
                extent.include(child_layout.subtree_extent);
            }
        }
        let not_shown = node.is_clade() && leaf_count == 0;

        let layout = tree.node_mut(index).layout_mut();
        layout.descendant_leaf_count = leaf_count;
        layout.subtree_extent = extent;
        layout.not_shown = not_shown;
    }

    trace!(
        "Placed {} nodes below {} (max depth {})",
        context.order.len(),
        display_root,
        context.max_depth
    );
    context
}

// =#========================================================================#=
// ORDERING PASS
// =#========================================================================#=
/// State carried through the ordering pass.
struct OrderingContext {
    /// Number of rows handed out so far
    rows: usize,
    /// Shown nodes not below a collapsed clade, in pre-order
    visible: Vec<NodeId>,
}

impl OrderingContext {
    fn new() -> Self {
        OrderingContext {
            rows: 0,
            visible: Vec::new(),
        }
    }

    /// Hands out the next row.
    fn next_position(&mut self) -> f64 {
        self.rows += 1;
        self.rows as f64
    }

    fn upper_bound(&self) -> f64 {
        self.rows as f64
    }
}

/// Computes rows and visibility below `display_root` and records the summary.
fn order_nodes(tree: &mut Tree, display_root: NodeId, max_depth: usize) {
    for node in tree.nodes_mut() {
        let layout = node.layout_mut();
        layout.ordering_position = None;
        layout.visible = false;
    }

    let mut context = OrderingContext::new();

    // Top-down: rows of leaves and collapsed clades, left to right
    let mut stack = vec![display_root];
    while let Some(index) = stack.pop() {
        let node = &tree[index];
        if node.layout().not_shown {
            continue;
        }
        context.visible.push(index);

        if node.is_leaf() || node.is_collapsed() {
            let position = context.next_position();
            tree.node_mut(index).layout_mut().ordering_position = Some(position);
        } else {
            stack.extend(node.children().iter().rev());
        }
    }

    // Bottom-up: expanded clades at the mean of their children
    for &index in context.visible.iter().rev() {
        let node = &tree[index];
        if node.is_clade() && !node.is_collapsed() {
            let positions: Vec<f64> = node
                .children()
                .iter()
                .filter_map(|&child| tree[child].layout().ordering_position)
                .collect();
            if !positions.is_empty() {
                let mean = positions.iter().sum::<f64>() / positions.len() as f64;
                tree.node_mut(index).layout_mut().ordering_position = Some(mean);
            }
        }
        let layout = tree.node_mut(index).layout_mut();
        layout.visible = layout.ordering_position.is_some();
    }

    let summary = LayoutSummary {
        display_root,
        max_depth,
        ordering_upper_bound: context.upper_bound(),
        distance_extent: tree[display_root].layout().subtree_extent,
    };
    trace!(
        "Ordered {} visible nodes below {} into {} rows",
        context.visible.len(),
        display_root,
        context.rows
    );
    tree.set_summary(summary);
}
