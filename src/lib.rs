//! Editing engine for entity-relationship diagrams.
//!
//! The crate owns the diagram model (entities, attributes, relationships and
//! the connections between them), its undo history, the clipboard, and the
//! pointer/keyboard state machine that turns device input into model
//! mutations. Rendering is left to the host: it reads elements, connections,
//! handles and rubber-band lines from [`Editor`] and forwards input events.
//!
//! ```ignore
//! let mut editor = Editor::new();
//! editor.set_tool(Tool::Entity);
//! editor.handle_click(&ClickEvent::new(point(100.0, 100.0)));
//! assert_eq!(editor.elements().len(), 1);
//! ```

pub mod clipboard;
pub mod constants;
pub mod diagram;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod history;
pub mod hit_testing;
pub mod input;
pub mod logging;
pub mod notifications;
pub mod perf;
pub mod persistence;
pub mod selection;
pub mod settings;
pub mod settings_watcher;
pub mod spatial_index;
pub mod text;
pub mod types;
pub mod validation;

pub use diagram::{ChangeSet, Diagram};
pub use editor::Editor;
pub use error::{EditorError, EditorResult};
pub use geometry::{Handle, Point, Rect, point};
pub use types::{
    Cardinality, Connection, ConnectionConfig, ConnectionId, ConnectionPatch, Element, ElementId,
    ElementKind, ElementPatch, ElementType, NewConnection, NewElement, Participation, Tool,
};
