use cladeview::model::{NO_NAME, NameTable};
use cladeview::newick::parse_str;

fn table_of(names: &[&str]) -> NameTable {
    let mut table = NameTable::new();
    for name in names {
        table.intern(name);
    }
    table
}

// --- TESTS INTERNING ---
#[test]
fn test_new_table_has_only_reserved_slot() {
    let table = NameTable::default();
    assert!(table.is_empty());
    assert_eq!(table.len(), 0);
    assert_eq!(table.name(NO_NAME), Some(""));
    assert_eq!(&table[NO_NAME], "");
    assert_eq!(table.iter().count(), 0);
}

#[test]
fn test_intern_appends_without_dedup() {
    let mut table = NameTable::with_capacity(4);
    assert_eq!(table.intern("Tui"), 1);
    assert_eq!(table.intern("Kaka"), 2);
    assert_eq!(table.intern("Tui"), 3);
    assert_eq!(table.intern(""), NO_NAME);
    assert_eq!(table.len(), 3);

    assert_eq!(table.name(3), Some("Tui"));
    assert_eq!(table.name(4), None);
    assert_eq!(&table[2], "Kaka");
    assert_eq!(table.index_of("Tui"), Some(1));
    assert_eq!(table.index_of("Kokako"), None);
    assert_eq!(table.index_of(""), None);
}

#[test]
fn test_iter_in_index_order() {
    let table = table_of(&["Kea", "Kaka", "Kakapo"]);
    let pairs: Vec<(usize, &str)> = table.iter().collect();
    assert_eq!(pairs, [(1, "Kea"), (2, "Kaka"), (3, "Kakapo")]);
}

#[test]
fn test_display() {
    let table = table_of(&["Tui", "Kaka"]);
    assert_eq!(table.to_string(), "NameTable (2 names):\n  [1] Tui\n  [2] Kaka\n");
}

// --- TESTS TRANSLATION LOOKUP ---
#[test]
fn test_translation_lookup() {
    let table = table_of(&["Tui", "Kaka", "Kea"]);
    let lookup = table.translation_lookup(&["Kea", "Kokako", "Tui"]);
    assert_eq!(lookup, [None, Some(2), None, Some(0)]);
}

#[test]
fn test_translation_lookup_duplicated_names_map_to_last_slot() {
    let table = table_of(&["Weka", "Pukeko", "Weka"]);
    let lookup = table.translation_lookup(&["Pukeko", "Weka"]);
    assert_eq!(lookup, [None, None, Some(0), Some(1)]);
}

#[test]
fn test_translation_lookup_later_positions_win() {
    let table = table_of(&["Weka"]);
    let names = vec!["Weka".to_string(), "Weka".to_string()];
    assert_eq!(table.translation_lookup(&names), [None, Some(1)]);
}

#[test]
fn test_translation_lookup_ignores_empty_names() {
    let table = table_of(&["Tui"]);
    assert_eq!(table.translation_lookup(&["", "Tui"]), [None, Some(1)]);
    assert_eq!(table.translation_lookup::<&str>(&[]), [None, None]);
}

#[test]
fn test_translation_lookup_of_parsed_tree() {
    let tree = parse_str("((Kiwi,Moa),Emu);").unwrap();
    let rows = ["Emu", "Kiwi", "Moa"];
    let lookup = tree.names().translation_lookup(&rows);

    for leaf in tree.pre_order_iter().filter(|n| n.is_leaf()) {
        let row = lookup[leaf.name_index()].unwrap();
        assert_eq!(tree.name_of(leaf.index()), Some(rows[row]));
    }
}
