//! Cladeview is a library to parse phylogenetic trees from Newick strings
//! and lay them out for progressive, collapsible display.
//!
//! Core functionality provided:
//! - Newick: Parse a single Newick string with quoted names, nested
//!   annotations, branch lengths, optional bootstrap values and an optional
//!   leaf filter. Clades left with one child are elided.
//! - Tree model: [Tree] uses the arena pattern, so no direct node references
//!   are stored, only node indices. Names live in a per-tree
//!   [NameTable](model::NameTable). See [crate::model] for more details.
//! - Layout: Rows, depths, cumulative distances, leaf counts and extents of
//!   all nodes below a display root. See [crate::layout].
//! - View: [TreeView](view::TreeView) collapses, expands and zooms while
//!   keeping the layout current.
//!
//! Limitations:
//! - Only a single tree per string
//! - Annotations are kept as raw text
//! - No Newick writer
//!
//! # Usage patterns
//! 1. [parse_newick_str] and the functions of [crate::newick] parse with
//!    default settings.
//! 2. Configure a [NewickParser](newick::NewickParser) for filtering and
//!    bootstrap values.
//!
//! ## Example
//!
//! Parse a Newick string and collapse a clade:
//! ```
//! use cladeview::parse_newick_str;
//! use cladeview::view::TreeView;
//!
//! let tree = parse_newick_str("((A:0.1,B:0.2):0.3,C:0.4);").unwrap();
//! assert_eq!(tree.num_leaves(), 3);
//!
//! let mut view = TreeView::new(tree);
//! let clade = view.tree().root().children()[0];
//! view.toggle(clade).unwrap();
//! assert_eq!(view.visible_nodes().len(), 3); // root, collapsed clade, C
//! ```
//!
//! ## Example Parser Configuration
//! ```
//! use cladeview::newick::NewickParser;
//! use cladeview::model::FnFilter;
//!
//! let parser = NewickParser::new()
//!     .with_filter(FnFilter(|name: &str| name.starts_with("Anas")))
//!     .with_bootstrap_values();
//!
//! let tree = parser.parse_str("((Anas_crecca,Aythya_ferina)87,Anas_acuta);")?;
//! assert_eq!(tree.num_leaves(), 2);
//! # Ok::<(), cladeview::parser::ParseError>(())
//! ```

pub mod layout;
pub mod model;
pub mod newick;
pub mod parser;
pub mod view;

pub use model::Tree;
pub use newick::parse_file as parse_newick_file;
pub use newick::parse_str as parse_newick_str;
