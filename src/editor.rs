//! The editor: diagram, clipboard, tools, viewport and gesture state.
//!
//! [`Editor`] is the single owner of everything the canvas manipulates.
//! Input handlers live in [`crate::input`] as further `impl Editor` blocks;
//! this file holds construction, read accessors and the command surface used
//! by toolbars, panels and shortcuts.
//!
//! Errors from commands are converted into toasts here and the gesture state
//! returns to idle, so a failed command never leaves the editor half-way
//! through an interaction.

use crate::clipboard::Clipboard;
use crate::constants::{MAX_ELEMENT_SCALE, MAX_FONT_SIZE, MIN_ELEMENT_SCALE, MIN_FONT_SIZE};
use crate::diagram::Diagram;
use crate::error::{EditorError, EditorResult};
use crate::export::{ExportQuality, ExportRequest};
use crate::geometry::{Handle, Point, Rect};
use crate::hit_testing::HitTester;
use crate::input::InputState;
use crate::input::coords::Viewport;
use crate::notifications::{Toast, ToastManager};
use crate::persistence::{self, DiagramFile, Storage};
use crate::selection::Selection;
use crate::settings::Settings;
use crate::settings_watcher::{SettingsEvent, SettingsWatcher};
use crate::text::{ApproximateMeasurer, TextMeasurer, fitted_base_width};
use crate::types::{
    Connection, ConnectionConfig, ConnectionId, ConnectionPatch, Element, ElementId, ElementKind,
    ElementPatch, NewConnection, Tool,
};
use crate::validation::check_connection;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, error, info, warn};

pub struct Editor {
    pub(crate) diagram: Diagram,
    pub(crate) clipboard: Clipboard,
    pub(crate) input_state: InputState,
    pub(crate) tool: Tool,
    pub(crate) viewport: Viewport,
    pub(crate) element_scale: f32,
    pub(crate) default_font_size: f32,
    pub(crate) wheel_zoom_step: f32,
    /// Shared with the autosave listener so settings changes apply live
    autosave: Rc<Cell<bool>>,
    /// Element under the pointer, for handle visibility
    pub(crate) hovered: Option<ElementId>,
    pub(crate) space_held: bool,
    /// A text field owns the keyboard
    pub(crate) text_focus: bool,
    /// Swallow the next click; cleared by the click itself or `next_frame`
    pub(crate) click_suppressed: bool,
    pub(crate) hit_tester: HitTester,
    measurer: Box<dyn TextMeasurer>,
    pub(crate) toasts: ToastManager,
    settings_watcher: Option<SettingsWatcher>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_diagram(Diagram::new())
    }

    pub fn with_diagram(diagram: Diagram) -> Self {
        let settings = Settings::default();
        Self {
            diagram,
            clipboard: Clipboard::new(),
            input_state: InputState::Idle,
            tool: Tool::Select,
            viewport: Viewport::default(),
            element_scale: settings.element_scale,
            default_font_size: settings.default_font_size,
            wheel_zoom_step: settings.wheel_zoom_step,
            autosave: Rc::new(Cell::new(settings.autosave)),
            hovered: None,
            space_held: false,
            text_focus: false,
            click_suppressed: false,
            hit_tester: HitTester::new(),
            measurer: Box::new(ApproximateMeasurer),
            toasts: ToastManager::new(),
            settings_watcher: None,
        }
    }

    /// Restore the autosave from `storage` and keep it updated while the
    /// `autosave` setting is on.
    ///
    /// An unreadable autosave is reported as a toast and the editor starts
    /// empty rather than failing. The unreadable file is moved aside first;
    /// if that fails, autosave stays off for this session so the next edit
    /// cannot overwrite it.
    pub fn open(storage: Storage, settings: &Settings) -> Self {
        let mut load_error = None;
        let mut can_autosave = true;
        let diagram = match storage.load_autosave() {
            Ok(Some(file)) => file.into_diagram(),
            Ok(None) => Diagram::new(),
            Err(e) => {
                error!("Failed to restore autosave: {:#}", e);
                match storage.move_autosave_aside() {
                    Ok(backup) => {
                        warn!(path = %backup.display(), "Unreadable autosave moved aside");
                    }
                    Err(move_err) => {
                        error!("Failed to move unreadable autosave aside: {:#}", move_err);
                        can_autosave = false;
                    }
                }
                load_error = Some(e);
                Diagram::new()
            }
        };

        let mut editor = Self::with_diagram(diagram);
        editor.apply_settings(settings);
        if can_autosave {
            editor
                .diagram
                .subscribe(storage.autosave_listener(Rc::clone(&editor.autosave)));
        } else {
            editor.toasts.push(Toast::warning(
                "Autosave is off until the unreadable autosave file is removed",
            ));
        }
        if let Some(e) = load_error {
            editor
                .toasts
                .push(Toast::error(format!("Could not restore diagram: {}", e)));
        }
        info!(
            elements = editor.diagram.elements().len(),
            autosave = editor.autosave.get() && can_autosave,
            "Editor opened"
        );
        editor
    }

    // ==================== Read Accessors ====================

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    /// Direct access for collaborators that mutate through the diagram API.
    pub fn diagram_mut(&mut self) -> &mut Diagram {
        &mut self.diagram
    }

    pub fn elements(&self) -> &[Element] {
        self.diagram.elements()
    }

    pub fn connections(&self) -> &[Connection] {
        self.diagram.connections()
    }

    pub fn selection(&self) -> &Selection {
        self.diagram.selection()
    }

    pub fn zoom(&self) -> f32 {
        self.viewport.zoom
    }

    pub fn element_scale(&self) -> f32 {
        self.element_scale
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn input_state(&self) -> &InputState {
        &self.input_state
    }

    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastManager {
        &mut self.toasts
    }

    // ==================== Modes ====================

    /// Switch tools. Any in-progress gesture is abandoned.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            self.cancel_gesture();
            self.tool = tool;
            debug!(?tool, "tool changed");
        }
    }

    /// Set the global element scale, clamped to [0.5, 2].
    pub fn set_element_scale(&mut self, scale: f32) {
        self.element_scale = scale.clamp(MIN_ELEMENT_SCALE, MAX_ELEMENT_SCALE);
    }

    pub fn set_text_focus(&mut self, focused: bool) {
        self.text_focus = focused;
    }

    pub fn set_text_measurer(&mut self, measurer: impl TextMeasurer + 'static) {
        self.measurer = Box::new(measurer);
    }

    /// Per-frame housekeeping: drop the click guard and expired toasts.
    pub fn next_frame(&mut self) {
        self.click_suppressed = false;
        self.toasts.prune_expired();
    }

    /// Abandon the current gesture without touching the model.
    pub fn cancel_gesture(&mut self) {
        if !self.input_state.is_idle() {
            debug!(state = ?self.input_state, "gesture cancelled");
            self.input_state.reset();
        }
    }

    /// Adjust the live configuration of a handle drag in progress.
    pub fn set_live_connection_config(&mut self, config: ConnectionConfig) -> bool {
        self.input_state.set_live_config(config)
    }

    // ==================== Commands ====================

    /// Validate and create a connection.
    ///
    /// Rejections are surfaced as an error toast and also returned.
    pub fn connect(
        &mut self,
        from: ElementId,
        to: ElementId,
        config: ConnectionConfig,
    ) -> EditorResult<ConnectionId> {
        let result = self.try_connect(from, to, config);
        if let Err(e) = &result {
            warn!(from, to, "connection refused: {}", e);
            self.toasts.push(Toast::error(e.to_string()));
            self.cancel_gesture();
        }
        result
    }

    fn try_connect(
        &mut self,
        from: ElementId,
        to: ElementId,
        config: ConnectionConfig,
    ) -> EditorResult<ConnectionId> {
        if from == to {
            return Err(EditorError::SelfConnection(from));
        }
        let from_type = self
            .diagram
            .element(from)
            .ok_or(EditorError::UnknownElement(from))?
            .element_type();
        let to_type = self
            .diagram
            .element(to)
            .ok_or(EditorError::UnknownElement(to))?
            .element_type();
        check_connection(from_type, to_type)?;
        self.diagram
            .add_connection(NewConnection::with_config(from, to, config))
    }

    pub fn update_connection(
        &mut self,
        id: ConnectionId,
        patch: &ConnectionPatch,
    ) -> EditorResult<()> {
        self.diagram.update_connection(id, patch)
    }

    pub fn delete_connection(&mut self, id: ConnectionId) -> bool {
        self.diagram.delete_connection(id)
    }

    /// Commit edited label text, widening the element if the text no longer fits.
    ///
    /// Returns false when the text is unchanged.
    pub fn commit_text(&mut self, id: ElementId, text: &str) -> EditorResult<bool> {
        let element = self
            .diagram
            .element(id)
            .ok_or(EditorError::UnknownElement(id))?;
        if element.text == text {
            return Ok(false);
        }

        let mut patch = ElementPatch::text(text);
        if let Some(width) = fitted_base_width(
            element.element_type(),
            text,
            element.font_size,
            element.width,
            self.measurer.as_ref(),
            self.element_scale,
        ) {
            debug!(id, width, "element widened to fit label");
            patch = patch.with_width(width);
        }
        self.diagram.update_element(id, &patch)?;
        Ok(true)
    }

    /// Switch an element between entity, (key) attribute and relationship.
    pub fn set_element_kind(&mut self, id: ElementId, kind: ElementKind) -> EditorResult<()> {
        self.diagram.update_element(id, &ElementPatch::kind(kind))
    }

    /// Set one element's font size, clamped to [8, 48].
    pub fn set_font_size(&mut self, id: ElementId, font_size: f32) -> EditorResult<()> {
        self.diagram.update_element(id, &ElementPatch::font_size(font_size))
    }

    /// Apply one font size to every element as a single history entry.
    ///
    /// Sizes outside [8, 48] are ignored.
    pub fn apply_font_size_to_all(&mut self, font_size: f32) -> bool {
        if !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&font_size) {
            return false;
        }
        let updates: Vec<(ElementId, ElementPatch)> = self
            .diagram
            .elements()
            .iter()
            .map(|el| (el.id, ElementPatch::font_size(font_size)))
            .collect();
        if updates.is_empty() {
            return false;
        }
        self.diagram.update_elements(&updates).is_ok()
    }

    /// Delete every selected element and its connections.
    pub fn delete_selection(&mut self) -> usize {
        let ids = self.diagram.selection().ids();
        if ids.is_empty() {
            return 0;
        }
        let removed = self.diagram.delete_elements(&ids);
        let stale = self
            .input_state
            .connection_source()
            .or(self.input_state.dragged_element())
            .is_some_and(|id| !self.diagram.contains_element(id));
        if stale {
            self.cancel_gesture();
        }
        removed
    }

    pub fn copy_selection(&mut self) -> bool {
        self.clipboard.copy(&self.diagram, self.diagram.selection())
    }

    pub fn paste(&mut self) -> Option<Vec<ElementId>> {
        self.clipboard.paste(&mut self.diagram)
    }

    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        self.diagram.undo()
    }

    /// Remove everything from the diagram (one history entry).
    pub fn clear(&mut self) -> bool {
        self.cancel_gesture();
        self.diagram.clear()
    }

    // ==================== Import / Export ====================

    /// Current model as a serializable payload.
    pub fn snapshot_file(&self) -> DiagramFile {
        DiagramFile::from_diagram(&self.diagram)
    }

    /// Replace the model with a previously serialized payload.
    ///
    /// On failure the editor is left untouched and an error toast is shown.
    pub fn import_json(&mut self, text: &str) -> EditorResult<()> {
        let file = match DiagramFile::from_json(text) {
            Ok(file) => file,
            Err(e) => {
                warn!("import rejected: {}", e);
                self.toasts.push(Toast::error(e.to_string()));
                return Err(e);
            }
        };
        self.cancel_gesture();
        let count = file.elements.len();
        self.diagram.replace_all(file.elements, file.connections);
        info!(elements = count, "Diagram imported");
        self.toasts.push(Toast::success("Diagram imported"));
        Ok(())
    }

    /// Import from a file on disk; failures become toasts.
    pub fn import_file(&mut self, path: &Path) -> bool {
        match std::fs::read_to_string(path) {
            Ok(text) => self.import_json(&text).is_ok(),
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                self.toasts
                    .push(Toast::error(format!("Could not open {}", path.display())));
                false
            }
        }
    }

    /// Write the current model to `path`; failures become toasts.
    pub fn save_to_file(&mut self, path: &Path) -> bool {
        match persistence::save_to_file(path, &self.snapshot_file()) {
            Ok(()) => {
                self.toasts.push(Toast::info("Diagram saved"));
                true
            }
            Err(e) => {
                error!("Save failed: {:#}", e);
                self.toasts.push(Toast::error(format!("Save failed: {}", e)));
                false
            }
        }
    }

    pub fn export_request(&self, quality: ExportQuality) -> ExportRequest {
        ExportRequest::for_elements(self.diagram.elements(), self.element_scale, quality)
    }

    // ==================== Render Helpers ====================

    /// Handles to draw: every handle of elements that are selected or hovered.
    pub fn visible_handles(&self) -> Vec<(ElementId, Handle, Point)> {
        if self.tool != Tool::Select {
            return Vec::new();
        }
        self.diagram
            .elements()
            .iter()
            .filter(|el| self.diagram.selection().contains(el.id) || self.hovered == Some(el.id))
            .flat_map(|el| {
                let bounds = el.bounds(self.element_scale);
                Handle::ALL
                    .into_iter()
                    .map(move |handle| (el.id, handle, handle.anchor(bounds)))
            })
            .collect()
    }

    /// Line from a connection's source centre to its target centre.
    pub fn connection_line(&self, connection: &Connection) -> Option<(Point, Point)> {
        let from = self.diagram.element(connection.from)?;
        let to = self.diagram.element(connection.to)?;
        Some((
            from.center(self.element_scale),
            to.center(self.element_scale),
        ))
    }

    /// Where the participation marker of a connection is drawn.
    pub fn connection_midpoint(&self, connection: &Connection) -> Option<Point> {
        self.connection_line(connection)
            .map(|(a, b)| (a + b) / 2.0)
    }

    /// Rubber-band line of a pending connection, in diagram space.
    pub fn rubber_band(&self) -> Option<(Point, Point)> {
        match self.input_state {
            InputState::AwaitingConnectionTarget { source, pointer } => {
                let el = self.diagram.element(source)?;
                Some((el.center(self.element_scale), pointer))
            }
            InputState::DraggingConnectionFromHandle {
                source,
                handle,
                pointer,
                ..
            } => {
                let el = self.diagram.element(source)?;
                Some((handle.anchor(el.bounds(self.element_scale)), pointer))
            }
            _ => None,
        }
    }

    pub fn marquee_rect(&self) -> Option<Rect> {
        self.input_state.marquee_rect()
    }

    // ==================== Settings ====================

    pub fn settings(&self) -> Settings {
        Settings {
            element_scale: self.element_scale,
            default_font_size: self.default_font_size,
            autosave: self.autosave.get(),
            wheel_zoom_step: self.wheel_zoom_step,
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        let settings = settings.clone().normalized();
        self.element_scale = settings.element_scale;
        self.default_font_size = settings.default_font_size;
        self.wheel_zoom_step = settings.wheel_zoom_step;
        if self.autosave.replace(settings.autosave) != settings.autosave {
            info!(enabled = settings.autosave, "Autosave toggled");
        }
    }

    /// Start watching a settings file for external edits.
    pub fn watch_settings(&mut self, path: PathBuf) -> notify::Result<()> {
        self.settings_watcher = Some(SettingsWatcher::new(path)?);
        Ok(())
    }

    /// Apply pending settings file changes. Returns true if settings were reloaded.
    pub fn check_settings_reload(&mut self) -> bool {
        let Some(watcher) = self.settings_watcher.as_mut() else {
            return false;
        };
        let Some(event) = watcher.poll() else {
            return false;
        };
        match event {
            SettingsEvent::Modified | SettingsEvent::Created => {
                let path = watcher.path().to_path_buf();
                match Settings::load_from(&path) {
                    Ok(settings) => {
                        info!("Settings file changed, reloading...");
                        self.apply_settings(&settings);
                        self.toasts.push(Toast::info("Settings reloaded"));
                        true
                    }
                    Err(e) => {
                        warn!("Settings reload failed: {:#}", e);
                        self.toasts
                            .push(Toast::warning("Settings file could not be read"));
                        false
                    }
                }
            }
            SettingsEvent::Deleted => {
                warn!("Settings file deleted");
                self.toasts.push(Toast::warning("Settings file deleted"));
                false
            }
            SettingsEvent::Error(e) => {
                error!("Settings watch error: {}", e);
                false
            }
        }
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("diagram", &self.diagram)
            .field("tool", &self.tool)
            .field("input_state", &self.input_state)
            .field("viewport", &self.viewport)
            .field("element_scale", &self.element_scale)
            .finish_non_exhaustive()
    }
}
