//! Editor-wide constants.
//!
//! Centralizes magic numbers and geometry defaults so the interaction code
//! reads in terms of intent rather than raw values.

// ============================================================================
// Element Defaults
// ============================================================================

/// Default font size for element labels
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Minimum font size accepted for element labels
pub const MIN_FONT_SIZE: f32 = 8.0;

/// Maximum font size accepted for element labels
pub const MAX_FONT_SIZE: f32 = 48.0;

/// Base size of a newly placed entity (rectangle)
pub const ENTITY_SIZE: (f32, f32) = (120.0, 60.0);

/// Base size of a newly placed attribute (oval)
pub const ATTRIBUTE_SIZE: (f32, f32) = (100.0, 50.0);

/// Base size of a newly placed relationship (diamond)
pub const RELATIONSHIP_SIZE: (f32, f32) = (120.0, 80.0);

// ============================================================================
// Text Fitting
// ============================================================================

/// Horizontal room an entity needs around its label
pub const ENTITY_TEXT_PADDING: f32 = 32.0;

/// Lateral growth factor for oval labels
pub const ATTRIBUTE_TEXT_FACTOR: f32 = 1.5;

/// Horizontal room an attribute needs around its (scaled) label
pub const ATTRIBUTE_TEXT_PADDING: f32 = 16.0;

/// Horizontal room a relationship diamond needs around its label
pub const RELATIONSHIP_TEXT_PADDING: f32 = 60.0;

/// Average glyph advance as a fraction of the font size (approximate measurer)
pub const APPROX_CHAR_WIDTH_RATIO: f32 = 0.6;

// ============================================================================
// History & Clipboard
// ============================================================================

/// Maximum undo history states to keep
pub const MAX_HISTORY_STATES: usize = 50;

/// Offset applied to pasted elements so copies are visibly distinct
pub const PASTE_OFFSET: (f32, f32) = (20.0, 20.0);

// ============================================================================
// Zoom & Scale
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f32 = 0.3;

/// Maximum zoom level
pub const MAX_ZOOM: f32 = 3.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Zoom step for ctrl/cmd + scroll wheel
pub const WHEEL_ZOOM_STEP: f32 = 0.02;

/// Zoom step for the zoom in/out buttons
pub const BUTTON_ZOOM_STEP: f32 = 0.1;

/// Minimum global element scale
pub const MIN_ELEMENT_SCALE: f32 = 0.5;

/// Maximum global element scale
pub const MAX_ELEMENT_SCALE: f32 = 2.0;

/// Default global element scale
pub const DEFAULT_ELEMENT_SCALE: f32 = 1.0;

// ============================================================================
// Input Handling
// ============================================================================

/// Minimum size (device pixels) for marquee selection to trigger
pub const MIN_MARQUEE_SIZE: f32 = 5.0;

/// Side length of a connection handle hit square (diagram units)
pub const HANDLE_SIZE: f32 = 8.0;

// ============================================================================
// Persistence & Export
// ============================================================================

/// Version tag written into every serialized diagram
pub const DIAGRAM_VERSION: &str = "1.0";

/// Directory name used under the platform config/data directories
pub const APP_DIR_NAME: &str = "erboard";

/// File name of the autosaved diagram
pub const AUTOSAVE_FILE_NAME: &str = "autosave.json";

/// Where an unreadable autosave is moved before autosave resumes
pub const AUTOSAVE_BACKUP_FILE_NAME: &str = "autosave.json.bak";

/// Largest element or connection id accepted from a payload (2^53 - 1).
/// Ids above this cannot round-trip through JavaScript numbers, and the
/// headroom keeps the id counter far from `u64::MAX`.
pub const MAX_ID: u64 = (1 << 53) - 1;

/// File name of the settings file
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Padding around the element bounding box when cropping an export
pub const EXPORT_PADDING: f32 = 40.0;
