//! Data model for parsed phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Node]s referenced by [NodeId]. A node is either a leaf or a clade;
//! clades have two or more children, except for the root and for clades
//! whose leaves were all filtered out while parsing.
//!
//! # Names
//! Node names are interned into the tree's [NameTable] and referred to by
//! [NameIndex]; index [NO_NAME] marks unnamed nodes.
//!
//! # Filtering
//! The [LeafFilter] trait decides which leaves a parser keeps. It is
//! implemented for the usual collections of names and, through [FnFilter],
//! for closures.

pub mod filter;
pub mod name_table;
pub mod node;
pub mod tree;

pub use filter::{FnFilter, LeafFilter};
pub use name_table::{NO_NAME, NameIndex, NameTable};
pub use node::{Extent, Node, NodeId, NodeLayout};
pub use tree::{PostOrderIter, PreOrderIter, Tree};
