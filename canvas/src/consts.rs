//! Shared numeric constants for the canvas crate.

// ── Page ────────────────────────────────────────────────────────

/// Width of the canonical portrait page (A4 in points).
pub const PAGE_WIDTH: f64 = 595.0;

/// Height of the canonical portrait page (A4 in points).
pub const PAGE_HEIGHT: f64 = 842.0;

/// Background image opacity for a freshly created page.
pub const DEFAULT_BACKGROUND_OPACITY: f64 = 1.0;

// ── Elements ────────────────────────────────────────────────────

/// Offset from the page origin at which new elements are placed.
pub const NEW_ELEMENT_OFFSET: f64 = 20.0;

/// Font used by every element type that does not override it.
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";

/// Script-style font for signature elements.
pub const SIGNATURE_FONT_FAMILY: &str = "Brush Script MT, cursive";

/// Default text color.
pub const DEFAULT_COLOR: &str = "#000000";

/// Default stamp ink (text and circular border).
pub const STAMP_COLOR: &str = "#C0392B";

// ── Interaction ─────────────────────────────────────────────────

/// Distance in page units under which a checkpoint snaps into alignment.
pub const SNAP_THRESHOLD: f64 = 5.0;

/// Arrow-key nudge distance in page units.
pub const NUDGE_STEP: f64 = 1.0;

/// Arrow-key nudge distance with Shift held.
pub const NUDGE_STEP_LARGE: f64 = 10.0;

/// Zoom limits for the page view.
pub const ZOOM_MIN: f64 = 0.1;
pub const ZOOM_MAX: f64 = 8.0;

/// Zoom factor per wheel pixel when zooming with Ctrl/Meta held.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.002;
