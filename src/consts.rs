//! Shared numeric constants for the editor core.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width or height an element can be resized to, in canvas pixels.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

/// Where newly added elements land when no position is given.
pub const DEFAULT_ELEMENT_X: f64 = 400.0;
/// See [`DEFAULT_ELEMENT_X`].
pub const DEFAULT_ELEMENT_Y: f64 = 300.0;

/// Logical size of the slide surface. Elements may extend beyond it.
pub const CANVAS_WIDTH: f64 = 1000.0;
/// See [`CANVAS_WIDTH`].
pub const CANVAS_HEIGHT: f64 = 600.0;

// ── Viewport ────────────────────────────────────────────────────

/// Lowest zoom level, in percent.
pub const ZOOM_MIN_PERCENT: u16 = 10;

/// Highest zoom level, in percent.
pub const ZOOM_MAX_PERCENT: u16 = 300;

/// Increment applied by one wheel notch, button press or shortcut.
pub const ZOOM_STEP_PERCENT: u16 = 10;

/// Zoom level restored by a view reset.
pub const ZOOM_DEFAULT_PERCENT: u16 = 100;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space half extent of a resize handle's hit square.
pub const HANDLE_RADIUS_PX: f64 = 6.0;

// ── Floating toolbar ────────────────────────────────────────────

/// Vertical distance between an element's top edge and the toolbar anchor.
pub const TOOLBAR_OFFSET_Y: f64 = 60.0;

/// Half the nominal toolbar width; the panel is centred on its anchor.
pub const TOOLBAR_HALF_WIDTH: f64 = 150.0;

/// Minimum distance between the toolbar panel and the container edge.
pub const TOOLBAR_MARGIN: f64 = 10.0;

// ── Render layers ───────────────────────────────────────────────

/// Layer for the selected element, drawn above its siblings.
pub const LAYER_SELECTED: u8 = 10;

/// Layer for every other element.
pub const LAYER_DEFAULT: u8 = 1;
