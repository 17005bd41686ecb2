//! Shared numeric constants for the engine crate.

// ── Pitch geometry (model units) ────────────────────────────────

/// Logical pitch width. The model coordinate space is fixed; screen size
/// never changes these.
pub const PITCH_WIDTH: f64 = 100.0;

/// Logical pitch height.
pub const PITCH_HEIGHT: f64 = 80.0;

/// Inset from the pitch edge applied to every written token position and
/// run waypoint.
pub const EDGE_MARGIN: f64 = 2.0;

/// Marking dimensions, scaled from a real pitch.
pub const CENTER_CIRCLE_RADIUS: f64 = 9.15;
pub const PENALTY_AREA_DEPTH: f64 = 16.5;
pub const PENALTY_AREA_WIDTH: f64 = 40.3;
pub const GOAL_AREA_DEPTH: f64 = 5.5;
pub const GOAL_AREA_WIDTH: f64 = 18.3;
pub const PENALTY_SPOT_DEPTH: f64 = 11.0;

/// Spacing of the optional alignment grid.
pub const GRID_STEP: f64 = 10.0;

// ── Viewport ────────────────────────────────────────────────────

/// Zoom range. `1.0` shows the whole pitch.
pub const MIN_ZOOM: f64 = 0.6;
pub const MAX_ZOOM: f64 = 2.5;

/// How far the visible window may extend past the pitch edge, as a fraction
/// of the pitch dimension on that axis.
pub const OVERSCROLL_FRACTION: f64 = 0.25;

/// Multiplicative step for the zoom-in/zoom-out buttons.
pub const ZOOM_STEP: f64 = 1.2;

/// Wheel delta → zoom factor exponent scale.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.0015;

// ── Tokens and hit-testing ──────────────────────────────────────

/// Token disc radius in model units.
pub const TOKEN_RADIUS: f64 = 2.2;

/// Extra model-unit slop around a token disc when hit-testing.
pub const TOKEN_HIT_SLOP: f64 = 0.6;

/// Screen-space radius in pixels for waypoint handles, both drawn and
/// hit-tested. Converted to model units at the current zoom.
pub const WAYPOINT_HANDLE_PX: f64 = 7.0;

// ── Drag trail ──────────────────────────────────────────────────

/// Maximum number of recent points kept in a token drag trail.
pub const TRAIL_MAX_POINTS: usize = 10;
