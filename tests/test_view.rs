use cladeview::model::{NodeId, Tree};
use cladeview::newick::{NewickParser, parse_str};
use cladeview::view::{TreeView, ViewError, ZoomFrame};

// Kiwi0 Moa1 Ratites2 Duck3 Goose4 Anatidae5 Grebe6 clade7 Penguin8 root9
const BIRDS: &str = "((Kiwi,Moa)Ratites,((Duck,Goose)Anatidae,Grebe),Penguin);";
const RATITES: NodeId = 2;
const ANATIDAE: NodeId = 5;
const WATERBIRDS: NodeId = 7;
const ROOT: NodeId = 9;

fn birds() -> TreeView {
    TreeView::new(parse_str(BIRDS).unwrap())
}

fn position(view: &TreeView, index: NodeId) -> Option<f64> {
    view.tree()[index].layout().ordering_position
}

fn upper_bound(view: &TreeView) -> f64 {
    view.summary().unwrap().ordering_upper_bound
}

// --- TESTS TOGGLE ---
#[test]
fn test_new_view_shows_full_tree() {
    let view = birds();
    assert_eq!(view.display_root(), ROOT);
    assert!(view.is_full_tree_visible());
    assert!(!view.has_zoom_history());
    assert_eq!(view.scroll_offset(), 0.0);
    assert_eq!(upper_bound(&view), 6.0);
    assert_eq!(position(&view, WATERBIRDS), Some(4.25));
    assert_eq!(view.visible_nodes().len(), 10);
}

#[test]
fn test_toggle_collapses_and_expands() {
    let mut view = birds();
    assert_eq!(view.toggle(RATITES), Ok(true));
    assert!(view.tree()[RATITES].is_collapsed());
    assert_eq!(position(&view, RATITES), Some(1.0));
    assert_eq!(position(&view, 3), Some(2.0));
    assert_eq!(position(&view, 0), None);
    assert_eq!(upper_bound(&view), 5.0);

    assert_eq!(view.toggle(RATITES), Ok(true));
    assert!(!view.tree()[RATITES].is_collapsed());
    assert_eq!(position(&view, RATITES), Some(1.5));
    assert_eq!(upper_bound(&view), 6.0);
}

#[test]
fn test_toggle_shifts_scroll_by_row_change() {
    let mut view = birds();
    view.set_scroll_offset(2.0);

    view.toggle(ANATIDAE).unwrap();
    // Anatidae moves from 3.5 to 3.0
    assert_eq!(view.scroll_offset(), 1.5);

    view.toggle(ANATIDAE).unwrap();
    assert_eq!(view.scroll_offset(), 2.0);
}

#[test]
fn test_toggle_leaf_does_nothing() {
    let mut view = birds();
    let before = view.tree().clone();
    assert_eq!(view.toggle(0), Ok(false));
    assert_eq!(view.tree(), &before);
    assert_eq!(view.scroll_offset(), 0.0);
}

#[test]
fn test_toggle_hidden_clade_keeps_scroll() {
    let mut view = birds();
    view.toggle(WATERBIRDS).unwrap();
    let scroll = view.scroll_offset();

    // Anatidae is below a collapsed clade and has no row
    assert_eq!(view.toggle(ANATIDAE), Ok(true));
    assert_eq!(view.scroll_offset(), scroll);
    assert_eq!(position(&view, ANATIDAE), None);

    view.toggle(WATERBIRDS).unwrap();
    assert_eq!(position(&view, ANATIDAE), Some(3.0));
}

// --- TESTS COLLAPSE / EXPAND ALL ---
#[test]
fn test_collapse_all_includes_root() {
    let mut view = birds();
    assert_eq!(view.collapse_all(false, None), Ok(4));
    assert_eq!(view.visible_nodes(), vec![ROOT]);
    assert_eq!(position(&view, ROOT), Some(1.0));
    assert_eq!(upper_bound(&view), 1.0);

    assert_eq!(view.collapse_all(false, None), Ok(0));
    assert_eq!(view.expand_all(false, None), Ok(4));
    assert_eq!(upper_bound(&view), 6.0);
    assert_eq!(view.expand_all(false, None), Ok(0));
}

#[test]
fn test_collapse_all_labelled_only() {
    let mut view = birds();
    assert_eq!(view.collapse_all(true, None), Ok(2));
    assert!(view.tree()[RATITES].is_collapsed());
    assert!(view.tree()[ANATIDAE].is_collapsed());
    assert!(!view.tree()[WATERBIRDS].is_collapsed());
    assert!(!view.tree()[ROOT].is_collapsed());
    // Ratites, Anatidae, Grebe, Penguin
    assert_eq!(upper_bound(&view), 4.0);

    assert_eq!(view.expand_all(true, None), Ok(2));
    assert_eq!(upper_bound(&view), 6.0);
}

#[test]
fn test_collapse_all_of_subtree() {
    let mut view = birds();
    assert_eq!(view.collapse_all(false, Some(WATERBIRDS)), Ok(2));
    assert!(!view.tree()[RATITES].is_collapsed());
    assert_eq!(view.visible_nodes(), vec![ROOT, RATITES, 0, 1, WATERBIRDS, 8]);

    assert_eq!(view.expand_all(false, Some(ANATIDAE)), Ok(1));
    assert!(view.tree()[WATERBIRDS].is_collapsed());
}

#[test]
fn test_bootstrap_values_are_not_labels() {
    let tree = NewickParser::new()
        .with_bootstrap_values()
        .parse_str("((A,B)90,(C,D)75);")
        .unwrap();
    let mut view = TreeView::new(tree);
    assert_eq!(view.collapse_all(true, None), Ok(0));
    assert_eq!(view.collapse_all(false, None), Ok(3));
}

// --- TESTS ZOOM ---
#[test]
fn test_zoom_to_and_back() {
    let mut view = birds();
    view.set_scroll_offset(3.0);

    assert_eq!(view.zoom_to(ANATIDAE), Ok(true));
    assert_eq!(view.display_root(), ANATIDAE);
    assert!(!view.is_full_tree_visible());
    assert_eq!(view.scroll_offset(), 0.0);
    assert_eq!(view.zoom_depth(), 1);
    assert_eq!(
        view.zoom_history(),
        &[ZoomFrame {
            root: ROOT,
            scroll_offset: 3.0
        }]
    );
    assert_eq!(view.summary().unwrap().display_root, ANATIDAE);
    assert_eq!(upper_bound(&view), 2.0);
    assert_eq!(position(&view, 3), Some(1.0));
    assert_eq!(position(&view, 0), None);
    assert_eq!(view.tree()[3].layout().depth, 1);
    assert_eq!(view.visible_nodes(), vec![ANATIDAE, 3, 4]);

    assert_eq!(view.zoom_back(), Ok(ROOT));
    assert_eq!(view.display_root(), ROOT);
    assert_eq!(view.scroll_offset(), 3.0);
    assert!(!view.has_zoom_history());
    // The subtree zoomed out of stays collapsed
    assert!(view.tree()[ANATIDAE].is_collapsed());
    assert_eq!(position(&view, ANATIDAE), Some(3.0));
    assert_eq!(upper_bound(&view), 5.0);
    assert_eq!(view.tree()[3].layout().depth, 3);
}

#[test]
fn test_zoom_to_current_root_is_a_no_op() {
    let mut view = birds();
    assert_eq!(view.zoom_to(ROOT), Ok(false));
    view.zoom_to(WATERBIRDS).unwrap();
    assert_eq!(view.zoom_to(WATERBIRDS), Ok(false));
    assert_eq!(view.zoom_depth(), 1);
}

#[test]
fn test_zoom_expands_collapsed_clade() {
    let mut view = birds();
    view.toggle(RATITES).unwrap();
    view.zoom_to(RATITES).unwrap();
    assert!(!view.tree()[RATITES].is_collapsed());
    assert_eq!(position(&view, RATITES), Some(1.5));
}

#[test]
fn test_nested_zoom_and_zoom_to_full() {
    let mut view = birds();
    view.zoom_to(WATERBIRDS).unwrap();
    view.zoom_to(ANATIDAE).unwrap();
    assert_eq!(view.zoom_depth(), 2);

    assert_eq!(view.zoom_back(), Ok(WATERBIRDS));
    assert_eq!(view.display_root(), WATERBIRDS);
    view.zoom_to(ANATIDAE).unwrap();

    // Collapses Ratites and Anatidae
    assert_eq!(view.zoom_to_full(), Ok(2));
    assert!(view.is_full_tree_visible());
    assert_eq!(view.zoom_depth(), 0);
    assert_eq!(view.scroll_offset(), 0.0);
    assert_eq!(view.summary().unwrap().display_root, ROOT);
    assert_eq!(upper_bound(&view), 4.0);
    assert_eq!(view.zoom_back(), Err(ViewError::EmptyZoomHistory));
}

// --- TESTS ERRORS ---
#[test]
fn test_zoom_back_without_history() {
    let mut view = birds();
    assert_eq!(view.zoom_back(), Err(ViewError::EmptyZoomHistory));
}

#[test]
fn test_operations_outside_display_root_fail() {
    let mut view = birds();
    view.zoom_to(ANATIDAE).unwrap();
    let outside = ViewError::OutsideDisplayRoot {
        node: RATITES,
        display_root: ANATIDAE,
    };
    assert_eq!(view.toggle(RATITES), Err(outside.clone()));
    assert_eq!(view.zoom_to(RATITES), Err(outside.clone()));
    assert_eq!(view.collapse_all(false, Some(RATITES)), Err(outside));
    assert!(!view.tree()[RATITES].is_collapsed());
}

#[test]
fn test_leaves_and_empty_clades_are_not_zoomable() {
    let mut view = birds();
    assert_eq!(view.zoom_to(3), Err(ViewError::NotZoomable(3)));

    let keep = vec!["C".to_string(), "D".to_string()];
    let tree = NewickParser::new()
        .with_filter(keep)
        .parse_str("((A,B)inner,C,D);")
        .unwrap();
    let mut view = TreeView::new(tree);
    let empty = view.tree().root().children()[0];
    assert_eq!(view.zoom_to(empty), Err(ViewError::NotZoomable(empty)));
    assert!(!view.has_zoom_history());
}

// --- TESTS OWNERSHIP ---
#[test]
fn test_from_tree_and_into_tree() {
    let tree: Tree = parse_str(BIRDS).unwrap();
    let mut view: TreeView = tree.into();
    view.toggle(RATITES).unwrap();

    let tree = view.into_tree();
    assert!(tree[RATITES].is_collapsed());
    assert_eq!(tree.summary().unwrap().ordering_upper_bound, 5.0);
}
