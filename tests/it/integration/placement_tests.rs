//! Tests for placing elements with the shape tools and editing their labels.

use crate::helpers::*;
use erboard::settings::Settings;
use erboard::{Editor, ElementKind, ElementType, Point, Tool, point};

#[test]
fn test_entity_centered_on_click() {
    let mut editor = Editor::new();
    editor.set_tool(Tool::Entity);
    click_at(&mut editor, 100.0, 100.0);

    assert_element_count(&editor, 1);
    let el = &editor.elements()[0];
    assert_eq!(el.kind, ElementKind::Entity);
    assert_eq!((el.x, el.y), (40.0, 70.0));
    assert_eq!((el.width, el.height), (120.0, 60.0));
    assert_eq!(el.text, "Entity");
    assert_eq!(el.font_size, 16.0);

    // Placement hands control back to the select tool without selecting
    assert_eq!(editor.tool(), Tool::Select);
    assert!(editor.selection().is_empty());
    assert_eq!(editor.diagram().history_len(), 1);
}

#[test]
fn test_placement_under_zoom() {
    let mut editor = Editor::new();
    editor.set_zoom(2.0);
    assert_eq!(editor.screen_to_diagram(point(200.0, 200.0)), point(100.0, 100.0));

    editor.set_tool(Tool::Attribute);
    click_at(&mut editor, 200.0, 200.0);

    let el = &editor.elements()[0];
    assert_eq!(el.kind, ElementKind::Attribute { is_key: false });
    assert_eq!((el.x, el.y), (50.0, 75.0));
    assert_eq!((el.width, el.height), (100.0, 50.0));
}

#[test]
fn test_placement_respects_viewport_origin_and_scroll() {
    let mut editor = Editor::new();
    editor.set_viewport_origin(point(100.0, 50.0));
    editor.set_scroll(point(20.0, 10.0));
    assert_eq!(editor.screen_to_diagram(point(180.0, 140.0)), point(100.0, 100.0));
    assert_eq!(editor.diagram_to_screen(point(100.0, 100.0)), point(180.0, 140.0));

    editor.set_tool(Tool::Relationship);
    click_at(&mut editor, 180.0, 140.0);
    let el = &editor.elements()[0];
    assert_eq!(el.element_type(), ElementType::Relationship);
    assert_eq!((el.x, el.y), (40.0, 60.0));
}

#[test]
fn test_placement_centers_rendered_size() {
    let (mut editor, _) = TestDiagramBuilder::new().with_element_scale(2.0).build();
    editor.set_tool(Tool::Entity);
    click_at(&mut editor, 300.0, 300.0);

    let el = &editor.elements()[0];
    assert_eq!((el.x, el.y), (180.0, 240.0));
    // Stored size stays at base dimensions
    assert_eq!(el.width, 120.0);
    assert_eq!(el.center(2.0), point(300.0, 300.0));
}

#[test]
fn test_key_attribute_tool() {
    let mut editor = Editor::new();
    editor.set_tool(Tool::KeyAttribute);
    click_at(&mut editor, 50.0, 50.0);
    assert!(editor.elements()[0].kind.is_key());
}

#[test]
fn test_shape_tool_click_on_element_selects_it() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .build();
    editor.set_tool(Tool::Attribute);
    click_at(&mut editor, 60.0, 30.0);

    assert_element_count(&editor, 1);
    assert!(editor.selection().contains(ids[0]));
    assert_eq!(editor.tool(), Tool::Attribute);
}

#[test]
fn test_default_font_size_comes_from_settings() {
    let mut editor = Editor::new();
    editor.apply_settings(&Settings {
        default_font_size: 20.0,
        ..Settings::default()
    });
    editor.set_tool(Tool::Entity);
    click_at(&mut editor, 100.0, 100.0);
    assert_eq!(editor.elements()[0].font_size, 20.0);
}

#[test]
fn test_commit_text_widens_to_fit() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .build();
    editor.set_text_measurer(|_: &str, _: f32| 200.0);

    assert!(editor.commit_text(ids[0], "A very long entity name").unwrap());
    let el = editor.diagram().element(ids[0]).unwrap();
    assert_eq!(el.text, "A very long entity name");
    assert_eq!(el.width, 232.0);

    // Same text is a no-op
    let before = editor.diagram().history_len();
    assert!(!editor.commit_text(ids[0], "A very long entity name").unwrap());
    assert_eq!(editor.diagram().history_len(), before);
}

#[test]
fn test_commit_text_keeps_width_when_it_fits() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .build();
    editor.set_text_measurer(|_: &str, _: f32| 40.0);
    editor.commit_text(ids[0], "Order").unwrap();
    assert_eq!(editor.diagram().element(ids[0]).unwrap().width, 120.0);
}

#[test]
fn test_commit_text_unknown_element() {
    let mut editor = Editor::new();
    assert!(editor.commit_text(42, "x").is_err());
}

#[test]
fn test_kind_and_font_edits() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_attribute("Name", (0.0, 0.0))
        .with_entity("Customer", (200.0, 0.0))
        .build();

    editor
        .set_element_kind(ids[0], ElementKind::Attribute { is_key: true })
        .unwrap();
    assert!(editor.diagram().element(ids[0]).unwrap().kind.is_key());

    editor.set_font_size(ids[0], 100.0).unwrap();
    assert_eq!(editor.diagram().element(ids[0]).unwrap().font_size, 48.0);

    let before = editor.diagram().history_len();
    assert!(editor.apply_font_size_to_all(24.0));
    assert_eq!(editor.diagram().history_len(), before + 1);
    assert!(editor.elements().iter().all(|el| el.font_size == 24.0));

    assert!(!editor.apply_font_size_to_all(4.0));
    assert!(editor.elements().iter().all(|el| el.font_size == 24.0));
}

#[test]
fn test_visible_handles_only_for_select_tool() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .build();
    click_at(&mut editor, 60.0, 30.0);

    let handles = editor.visible_handles();
    assert_eq!(handles.len(), 4);
    assert!(handles.iter().all(|(id, _, _)| *id == ids[0]));
    assert!(handles
        .iter()
        .any(|(_, _, anchor)| *anchor == Point::new(120.0, 30.0)));

    editor.set_tool(Tool::Entity);
    assert!(editor.visible_handles().is_empty());
}
