//! Tests for creating connections by handle drag and click-to-click.

use crate::helpers::*;
use erboard::input::{Key, MouseDownEvent, MouseUpEvent};
use erboard::notifications::ToastVariant;
use erboard::{
    Cardinality, ConnectionConfig, ConnectionPatch, Participation, Tool, point,
};

fn toast_message(editor: &erboard::Editor) -> Option<String> {
    editor.toasts().latest().map(|t| t.message.clone())
}

#[test]
fn test_handle_drag_creates_configured_connection() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .with_relationship("Places", (300.0, 0.0))
        .build();
    click_at(&mut editor, 60.0, 30.0);

    editor.handle_mouse_down(&MouseDownEvent::left(point(120.0, 30.0)));
    assert!(editor.input_state().is_connecting());
    assert_eq!(editor.input_state().connection_source(), Some(ids[0]));

    move_to(&mut editor, 360.0, 40.0);
    assert_eq!(
        editor.rubber_band(),
        Some((point(120.0, 30.0), point(360.0, 40.0)))
    );

    let config = ConnectionConfig {
        cardinality: Cardinality::M,
        participation: Participation::Optional,
    };
    assert!(editor.set_live_connection_config(config));

    editor.handle_mouse_up(&MouseUpEvent::left(point(360.0, 40.0)));
    editor.handle_click(&erboard::input::ClickEvent::new(point(360.0, 40.0)));

    assert_connection_count(&editor, 1);
    let conn = &editor.connections()[0];
    assert_eq!((conn.from, conn.to), (ids[0], ids[1]));
    assert_eq!(conn.cardinality, Cardinality::M);
    assert_eq!(conn.participation, Participation::Optional);

    // The release click does not reselect the target
    assert_eq!(editor.selection().ids(), vec![ids[0]]);
    assert!(editor.input_state().is_idle());
    assert!(editor.rubber_band().is_none());
}

#[test]
fn test_handle_drag_between_entities_is_rejected() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("A", (0.0, 0.0))
        .with_entity("B", (300.0, 0.0))
        .build();
    click_at(&mut editor, 60.0, 30.0);

    drag(&mut editor, (120.0, 30.0), &[(360.0, 30.0)]);

    assert_connection_count(&editor, 0);
    let toast = editor.toasts().latest().unwrap();
    assert_eq!(toast.variant, ToastVariant::Error);
    assert_eq!(
        toast.message,
        "Invalid connection: Entities cannot connect directly to other entities"
    );
    assert!(editor.input_state().is_idle());
    assert_eq!(editor.selection().ids(), vec![ids[0]]);
}

#[test]
fn test_handle_drag_released_on_nothing() {
    let (mut editor, _) = TestDiagramBuilder::new()
        .with_entity("A", (0.0, 0.0))
        .build();
    click_at(&mut editor, 60.0, 30.0);

    drag(&mut editor, (120.0, 30.0), &[(500.0, 500.0)]);
    assert_connection_count(&editor, 0);
    assert_eq!(editor.toasts().count(), 0);

    // Released back on the source element
    drag(&mut editor, (120.0, 30.0), &[(60.0, 30.0)]);
    assert_connection_count(&editor, 0);
    assert!(editor.input_state().is_idle());
}

#[test]
fn test_live_config_requires_handle_drag() {
    let mut editor = TestDiagramBuilder::new().build().0;
    assert!(!editor.set_live_connection_config(ConnectionConfig::default()));
}

#[test]
fn test_click_to_click_connect() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .with_attribute("Name", (300.0, 0.0))
        .build();
    editor.set_tool(Tool::Connect);

    click_at(&mut editor, 60.0, 30.0);
    assert_eq!(editor.input_state().connection_source(), Some(ids[0]));
    assert!(editor.selection().contains(ids[0]));

    move_to(&mut editor, 200.0, 100.0);
    assert_eq!(
        editor.rubber_band(),
        Some((point(60.0, 30.0), point(200.0, 100.0)))
    );

    click_at(&mut editor, 350.0, 25.0);
    assert_connection_count(&editor, 1);
    let conn = &editor.connections()[0];
    assert_eq!((conn.from, conn.to), (ids[0], ids[1]));
    assert_eq!(conn.cardinality, Cardinality::One);
    assert_eq!(conn.participation, Participation::Mandatory);
    assert!(editor.input_state().is_idle());
    assert_eq!(editor.tool(), Tool::Connect);
}

#[test]
fn test_pending_connection_survives_pan() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .with_attribute("Name", (300.0, 0.0))
        .build();
    editor.set_tool(Tool::Connect);
    click_at(&mut editor, 60.0, 30.0);

    editor.handle_mouse_down(&MouseDownEvent::middle(point(500.0, 500.0)));
    assert!(editor.input_state().is_panning());
    move_to(&mut editor, 460.0, 500.0);
    assert_eq!(editor.scroll(), point(40.0, 0.0));
    editor.handle_mouse_up(&MouseUpEvent::middle(point(460.0, 500.0)));
    assert_eq!(editor.input_state().connection_source(), Some(ids[0]));

    // Diagram (350, 25) is now at device (310, 25)
    click_at(&mut editor, 310.0, 25.0);
    assert_connection_count(&editor, 1);
    let conn = &editor.connections()[0];
    assert_eq!((conn.from, conn.to), (ids[0], ids[1]));
    assert!(editor.input_state().is_idle());
}

#[test]
fn test_click_to_click_cancellations() {
    let (mut editor, _) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .with_attribute("Name", (300.0, 0.0))
        .build();
    editor.set_tool(Tool::Connect);

    // Same element twice
    click_at(&mut editor, 60.0, 30.0);
    click_at(&mut editor, 70.0, 40.0);
    assert!(editor.input_state().is_idle());

    // Empty space
    click_at(&mut editor, 60.0, 30.0);
    click_at(&mut editor, 600.0, 600.0);
    assert!(editor.input_state().is_idle());

    // Escape
    click_at(&mut editor, 60.0, 30.0);
    press(&mut editor, Key::Escape);
    assert!(editor.input_state().is_idle());

    // Tool switch
    click_at(&mut editor, 60.0, 30.0);
    editor.set_tool(Tool::Select);
    assert!(editor.input_state().is_idle());

    assert_connection_count(&editor, 0);
    assert_eq!(editor.toasts().count(), 0);
}

#[test]
fn test_click_to_click_invalid_pair() {
    let (mut editor, _) = TestDiagramBuilder::new()
        .with_attribute("Name", (0.0, 0.0))
        .with_relationship("Owns", (300.0, 0.0))
        .build();
    editor.set_tool(Tool::Connect);

    click_at(&mut editor, 50.0, 25.0);
    click_at(&mut editor, 360.0, 40.0);

    assert_connection_count(&editor, 0);
    assert_eq!(
        toast_message(&editor).as_deref(),
        Some("Invalid connection: Attributes can only connect to entities")
    );
    assert!(editor.input_state().is_idle());
}

#[test]
fn test_deleting_pending_source_cancels() {
    let (mut editor, _) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .with_attribute("Name", (300.0, 0.0))
        .build();
    editor.set_tool(Tool::Connect);
    click_at(&mut editor, 60.0, 30.0);

    press(&mut editor, Key::Delete);
    assert_element_count(&editor, 1);
    assert!(editor.input_state().is_idle());
    assert!(editor.rubber_band().is_none());
}

#[test]
fn test_connect_command_errors() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .build();
    assert!(editor.connect(ids[0], ids[0], ConnectionConfig::default()).is_err());
    assert!(editor.connect(ids[0], 999, ConnectionConfig::default()).is_err());
    assert_eq!(editor.toasts().count(), 2);
    assert_connection_count(&editor, 0);
}

#[test]
fn test_update_and_delete_connection() {
    let (mut editor, ids) = TestDiagramBuilder::new()
        .with_entity("Customer", (0.0, 0.0))
        .with_relationship("Places", (300.0, 0.0))
        .with_connection(0, 1)
        .build();
    let conn_id = editor.connections()[0].id;

    editor
        .update_connection(
            conn_id,
            &ConnectionPatch {
                cardinality: Some(Cardinality::N),
                participation: None,
            },
        )
        .unwrap();
    let conn = editor.diagram().connection(conn_id).unwrap();
    assert_eq!(conn.cardinality, Cardinality::N);
    assert_eq!(conn.participation, Participation::Mandatory);

    assert_eq!(
        editor.connection_midpoint(conn),
        Some(point((60.0 + 360.0) / 2.0, (30.0 + 40.0) / 2.0))
    );

    assert!(editor.delete_connection(conn_id));
    assert!(!editor.delete_connection(conn_id));
    assert_element_count(&editor, 2);

    assert!(editor.undo());
    assert_connection_count(&editor, 1);
    assert!(editor.undo());
    assert_eq!(
        editor.diagram().connection(conn_id).unwrap().cardinality,
        Cardinality::One
    );
    assert!(editor.diagram().contains_element(ids[1]));
    assert!(editor.update_connection(999, &ConnectionPatch::default()).is_err());
}
