//! Tests for import, explicit save, autosave restore and export sizing.

use crate::helpers::*;
use erboard::export::ExportQuality;
use erboard::notifications::ToastVariant;
use erboard::persistence::Storage;
use erboard::settings::Settings;
use erboard::{
    Cardinality, ConnectionPatch, EditorError, ElementKind, NewElement, Participation, Tool,
};
use tempfile::TempDir;

const LEGACY: &str = r#"{
    "elements": [
        {"id": 100, "type": "entity", "x": 0, "y": 0, "width": 120, "height": 60, "text": "Student"},
        {"id": 101, "type": "relationship", "x": 300, "y": 0, "width": 120, "height": 80, "text": "Enrolls"}
    ],
    "connections": [{
        "id": 102, "from": 100, "to": 101,
        "cardinality": {"from": "1", "to": "N"},
        "participation": {"from": "mandatory", "to": "optional"}
    }],
    "version": "1.0"
}"#;

#[test]
fn test_import_replaces_model() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Old", (0.0, 0.0))
        .build();
    editor.diagram_mut().select_only(ids[0]);
    let history_before = editor.diagram().history_len();

    editor.import_json(LEGACY).unwrap();

    assert_element_count(&editor, 2);
    assert_connection_count(&editor, 1);
    assert!(editor.selection().is_empty());
    assert_eq!(editor.diagram().history_len(), history_before + 1);
    let toast = editor.toasts().latest().unwrap();
    assert_eq!(toast.variant, ToastVariant::Success);
    assert_eq!(toast.message, "Diagram imported");

    assert!(editor.undo());
    assert_element_count(&editor, 1);
    assert_eq!(editor.elements()[0].text, "Old");
}

#[test]
fn test_ids_continue_above_imported_ones() {
    let mut editor = erboard::Editor::new();
    editor.import_json(LEGACY).unwrap();

    let id = editor
        .diagram_mut()
        .add_element(NewElement::new(ElementKind::Entity, 0.0, 300.0));
    assert_eq!(id, 103);
}

#[test]
fn test_legacy_connection_metadata_is_editable() {
    let mut editor = erboard::Editor::new();
    editor.import_json(LEGACY).unwrap();

    let conn = &editor.connections()[0];
    assert_eq!(conn.cardinality, Cardinality::One);
    assert_eq!(conn.participation, Participation::Mandatory);

    editor
        .update_connection(
            102,
            &ConnectionPatch {
                cardinality: Some(Cardinality::M),
                participation: Some(Participation::Optional),
            },
        )
        .unwrap();
    let json = serde_json::to_value(editor.snapshot_file()).unwrap();
    assert_eq!(json["connections"][0]["cardinality"], "M");
    assert_eq!(json["connections"][0]["participation"], "optional");
}

#[test]
fn test_malformed_import_leaves_editor_untouched() {
    let (mut editor, _) = TestDiagramBuilder::new()
        .with_entity("Keep", (0.0, 0.0))
        .build();
    let before = editor.snapshot_file();
    let history_before = editor.diagram().history_len();

    let result = editor.import_json(r#"{"elements": [{"id": 1, "type": "entity"}]}"#);
    assert!(matches!(result, Err(EditorError::MalformedImport(_))));

    assert_eq!(editor.snapshot_file(), before);
    assert_eq!(editor.diagram().history_len(), history_before);
    assert_eq!(editor.toasts().latest().unwrap().variant, ToastVariant::Error);
}

#[test]
fn test_import_rejects_ids_at_counter_limit() {
    let (mut editor, _) = TestDiagramBuilder::new()
        .with_entity("Keep", (0.0, 0.0))
        .build();
    let before = editor.snapshot_file();

    let result = editor
        .import_json(r#"{"elements":[{"id":18446744073709551615,"type":"entity","x":0,"y":0}]}"#);
    assert!(matches!(result, Err(EditorError::MalformedImport(_))));
    assert_eq!(editor.snapshot_file(), before);

    // Largest accepted id still leaves room for new elements
    editor
        .import_json(r#"{"elements":[{"id":9007199254740991,"type":"entity","x":0,"y":0}]}"#)
        .unwrap();
    let id = editor
        .diagram_mut()
        .add_element(NewElement::new(ElementKind::Entity, 0.0, 300.0));
    assert_eq!(id, 9_007_199_254_740_992);
}

#[test]
fn test_save_and_import_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("diagram.json");
    let (mut editor, _) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .with_key_attribute("Id", (200.0, 0.0))
        .with_connection(0, 1)
        .build();

    assert!(editor.save_to_file(&path));
    let saved = editor.snapshot_file();

    let mut other = erboard::Editor::new();
    assert!(other.import_file(&path));
    assert_eq!(other.snapshot_file(), saved);
}

#[test]
fn test_import_missing_file_reports_toast() {
    let dir = TempDir::new().unwrap();
    let mut editor = erboard::Editor::new();
    assert!(!editor.import_file(&dir.path().join("nope.json")));
    assert_eq!(editor.toasts().latest().unwrap().variant, ToastVariant::Error);
}

#[test]
fn test_autosave_restored_on_open() {
    let dir = TempDir::new().unwrap();
    let settings = Settings::default();

    {
        let mut editor = erboard::Editor::open(Storage::new(dir.path()), &settings);
        editor.set_tool(Tool::Entity);
        click_at(&mut editor, 100.0, 100.0);
    }

    let editor = erboard::Editor::open(Storage::new(dir.path()), &settings);
    assert_element_count(&editor, 1);
    assert_eq!(editor.elements()[0].kind, ElementKind::Entity);
}

#[test]
fn test_autosave_disabled_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path());
    let settings = Settings {
        autosave: false,
        ..Settings::default()
    };

    let mut editor = erboard::Editor::open(storage.clone(), &settings);
    editor.set_tool(Tool::Entity);
    click_at(&mut editor, 100.0, 100.0);
    assert!(!storage.autosave_path().exists());
}

#[test]
fn test_corrupt_autosave_starts_empty_with_toast() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path());
    std::fs::write(storage.autosave_path(), "garbage").unwrap();

    let editor = erboard::Editor::open(storage, &Settings::default());
    assert!(editor.diagram().is_empty());
    assert_eq!(editor.toasts().latest().unwrap().variant, ToastVariant::Error);
}

#[test]
fn test_unreadable_autosave_survives_next_edit() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path());
    let original = r#"{
        "elements": [
            {"id": 1, "type": "entity", "x": 0, "y": 0},
            {"id": 2, "type": "attribute", "x": 200, "y": 0}
        ],
        "connections": [{"id": 3, "from": 1, "to": 99}]
    }"#;
    std::fs::write(storage.autosave_path(), original).unwrap();

    let mut editor = erboard::Editor::open(storage.clone(), &Settings::default());
    assert!(editor.diagram().is_empty());
    editor.set_tool(Tool::Entity);
    click_at(&mut editor, 100.0, 100.0);

    let backup = std::fs::read_to_string(storage.autosave_backup_path()).unwrap();
    assert_eq!(backup, original);
    let saved = storage.load_autosave().unwrap().unwrap();
    assert_eq!(saved.elements.len(), 1);
}

#[test]
fn test_autosave_follows_live_settings() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path());
    let mut editor = erboard::Editor::open(storage.clone(), &Settings::default());
    editor.set_tool(Tool::Entity);

    editor.apply_settings(&Settings {
        autosave: false,
        ..Settings::default()
    });
    assert!(!editor.settings().autosave);
    click_at(&mut editor, 100.0, 100.0);
    assert!(!storage.autosave_path().exists());

    editor.apply_settings(&Settings::default());
    click_at(&mut editor, 100.0, 300.0);
    let saved = storage.load_autosave().unwrap().unwrap();
    assert_eq!(saved.elements.len(), 2);
}

#[test]
fn test_autosave_enabled_after_open() {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(dir.path());
    let off = Settings {
        autosave: false,
        ..Settings::default()
    };
    let mut editor = erboard::Editor::open(storage.clone(), &off);
    editor.set_tool(Tool::Entity);
    click_at(&mut editor, 100.0, 100.0);
    assert!(!storage.autosave_path().exists());

    editor.apply_settings(&Settings::default());
    click_at(&mut editor, 100.0, 300.0);
    assert!(storage.autosave_path().exists());
}

#[test]
fn test_export_request_covers_elements() {
    let empty = erboard::Editor::new();
    assert!(empty.export_request(ExportQuality::High).region.is_none());

    let (editor, _) = TestDiagramBuilder::new()
        .with_entity("A", (100.0, 100.0))
        .build();
    let request = editor.export_request(ExportQuality::High);
    let region = request.region.unwrap();
    assert_eq!(region.min, erboard::point(60.0, 60.0));
    assert_eq!((region.width(), region.height()), (200.0, 140.0));
    assert_eq!(request.pixel_size(), Some((600, 420)));
}
