//! Tests for copy and paste.

use crate::helpers::*;
use std::collections::HashSet;

#[test]
fn test_paste_creates_offset_copies_with_fresh_ids() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .with_attribute("Name", (200.0, 0.0))
        .with_connection(0, 1)
        .build();
    editor.diagram_mut().set_selection(ids.clone());
    let history_before = editor.diagram().history_len();

    assert!(shortcut(&mut editor, 'c'));
    assert!(shortcut(&mut editor, 'v'));

    assert_element_count(&editor, 4);
    assert_connection_count(&editor, 2);
    assert_eq!(editor.diagram().history_len(), history_before + 1);

    let originals: HashSet<_> = ids.iter().copied().collect();
    let pasted = editor.selection().ids();
    assert_eq!(pasted.len(), 2);
    assert!(pasted.iter().all(|id| !originals.contains(id)));

    let copy = editor
        .elements()
        .iter()
        .find(|el| pasted.contains(&el.id) && el.text == "Customer")
        .unwrap();
    assert_eq!((copy.x, copy.y), (20.0, 20.0));

    let new_conn = editor
        .connections()
        .iter()
        .find(|c| pasted.contains(&c.from))
        .unwrap();
    assert!(pasted.contains(&new_conn.to));
    assert!(!originals.contains(&new_conn.id));
    assert_integrity(&editor);
}

#[test]
fn test_connections_need_both_ends_selected() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .with_attribute("Name", (200.0, 0.0))
        .with_connection(0, 1)
        .build();
    editor.diagram_mut().select_only(ids[0]);

    editor.copy_selection();
    editor.paste();

    assert_element_count(&editor, 3);
    assert_connection_count(&editor, 1);
}

#[test]
fn test_repeated_paste_yields_independent_copies() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .build();
    editor.diagram_mut().select_only(ids[0]);
    editor.copy_selection();

    let first = editor.paste().unwrap();
    let second = editor.paste().unwrap();
    assert_ne!(first, second);
    assert_element_count(&editor, 3);
}

#[test]
fn test_empty_selection_does_not_touch_clipboard() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .build();
    assert!(!editor.copy_selection());
    assert!(editor.paste().is_none());

    editor.diagram_mut().select_only(ids[0]);
    assert!(editor.copy_selection());
    editor.diagram_mut().clear_selection();
    assert!(!editor.copy_selection());
    assert!(!editor.clipboard().is_empty());
}

#[test]
fn test_paste_survives_deleting_originals() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .with_relationship("Places", (200.0, 0.0))
        .with_connection(0, 1)
        .build();
    editor.diagram_mut().set_selection(ids.clone());
    editor.copy_selection();
    editor.delete_selection();
    assert_element_count(&editor, 0);

    editor.paste();
    assert_element_count(&editor, 2);
    assert_connection_count(&editor, 1);
    assert_integrity(&editor);
}

#[test]
fn test_undo_removes_pasted_batch() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .with_attribute("Name", (200.0, 0.0))
        .build();
    editor.diagram_mut().set_selection(ids.clone());
    editor.copy_selection();
    editor.paste();
    assert_element_count(&editor, 4);

    assert!(editor.undo());
    assert_element_count(&editor, 2);
    assert!(editor.selection().is_empty());
}
