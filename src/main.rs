use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cladeview::Tree;
use cladeview::layout::LayoutSummary;
use cladeview::model::{NodeId, NodeLayout};
use cladeview::newick::NewickParser;
use cladeview::view::TreeView;
use log::info;
use serde::Serialize;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "cladeview",
    about = "Parses a Newick tree and prints its collapsible layout."
)]
struct CliConfig {
    /// Newick file to load
    #[arg(value_name = "TREE_FILE")]
    tree_path: PathBuf,

    /// Keep only leaves with this name (repeatable)
    #[arg(short, long = "filter", value_name = "NAME")]
    filter: Vec<String>,

    /// Read clade names as bootstrap values
    #[arg(long)]
    bootstrap: bool,

    /// Collapse all named clades before printing
    #[arg(long)]
    collapse_labelled: bool,

    /// Print a JSON layout snapshot instead of the row listing
    #[arg(long)]
    json: bool,
}

fn main() {
    let _ = env_logger::builder().format_timestamp(None).try_init();

    let config = CliConfig::parse();
    if let Err(err) = run(&config) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(config: &CliConfig) -> Result<()> {
    let content = fs::read_to_string(&config.tree_path)
        .with_context(|| format!("failed to read {}", config.tree_path.display()))?;

    let filter: HashSet<String> = config.filter.iter().cloned().collect();
    let mut parser = NewickParser::new();
    if !filter.is_empty() {
        parser = parser.with_filter(&filter);
    }
    if config.bootstrap {
        parser = parser.with_bootstrap_values();
    }

    let tree = parser
        .parse_str(&content)
        .with_context(|| format!("failed to parse {}", config.tree_path.display()))?;
    if tree.is_empty() {
        bail!("tree has no leaves (no common entries with the filter?)");
    }
    info!(
        "Loaded tree with {} leaves and {} names",
        tree.num_leaves(),
        tree.name_count()
    );

    let mut view = TreeView::new(tree);
    if config.collapse_labelled {
        let collapsed = view.collapse_all(true, None)?;
        info!("Collapsed {collapsed} named clades");
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(&Snapshot::of(&view))?);
    } else {
        print_rows(&view);
    }
    Ok(())
}

/// Prints one line per visible node: row, indentation by depth, and label.
fn print_rows(view: &TreeView) {
    let tree = view.tree();
    for index in view.visible_nodes() {
        let node = &tree[index];
        let layout = node.layout();
        let marker = if node.is_leaf() {
            "-"
        } else if node.is_collapsed() {
            "+"
        } else {
            "\\"
        };
        let mut line = format!(
            "{:>7.1} {}{} {}",
            layout.ordering_position.unwrap_or_default(),
            "  ".repeat(layout.depth),
            marker,
            label(tree, index)
        );
        if let Some(support) = node.bootstrap_value() {
            line.push_str(&format!(" ({support})"));
        }
        if node.is_collapsed() {
            line.push_str(&format!(" [{} leaves]", layout.descendant_leaf_count));
        }
        println!("{line}");
    }
}

fn label(tree: &Tree, index: NodeId) -> &str {
    tree.name_of(index).unwrap_or("")
}

/// JSON view of the current layout.
#[derive(Serialize)]
struct Snapshot<'a> {
    summary: Option<&'a LayoutSummary>,
    name_count: usize,
    tree_comment: &'a str,
    nodes: Vec<NodeSnapshot<'a>>,
}

#[derive(Serialize)]
struct NodeSnapshot<'a> {
    id: NodeId,
    name: Option<&'a str>,
    bootstrap_value: Option<&'a str>,
    annotation: &'a str,
    is_clade: bool,
    collapsed: bool,
    branch_length: f64,
    layout: &'a NodeLayout,
}

impl<'a> Snapshot<'a> {
    fn of(view: &'a TreeView) -> Self {
        let tree = view.tree();
        let nodes = tree
            .pre_order_iter_from(view.display_root())
            .map(|node| NodeSnapshot {
                id: node.index(),
                name: tree.name_of(node.index()),
                bootstrap_value: node.bootstrap_value(),
                annotation: node.annotation(),
                is_clade: node.is_clade(),
                collapsed: node.is_collapsed(),
                branch_length: node.branch_length(),
                layout: node.layout(),
            })
            .collect();
        Snapshot {
            summary: view.summary(),
            name_count: tree.name_count(),
            tree_comment: tree.tree_comment(),
            nodes,
        }
    }
}
