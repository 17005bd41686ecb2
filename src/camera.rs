#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    EDGE_MARGIN, MAX_ZOOM, MIN_ZOOM, OVERSCROLL_FRACTION, PITCH_HEIGHT, PITCH_WIDTH,
};

/// A point in either screen space (CSS pixels) or model space (pitch units).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point in the same space.
    #[must_use]
    pub fn dist(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Clamp into the pitch rectangle inset by [`EDGE_MARGIN`]. Every write
    /// of a token position or run waypoint goes through this.
    #[must_use]
    pub fn clamped_to_pitch(self) -> Point {
        Point {
            x: self.x.clamp(EDGE_MARGIN, PITCH_WIDTH - EDGE_MARGIN),
            y: self.y.clamp(EDGE_MARGIN, PITCH_HEIGHT - EDGE_MARGIN),
        }
    }
}

/// Viewport state for pan/zoom over the pitch.
///
/// `origin_x` / `origin_y` are the model-space coordinates of the top-left
/// visible corner. `zoom` is a scale factor: at 1.0 the visible window is the
/// whole pitch, at `z` it is `PITCH_WIDTH/z × PITCH_HEIGHT/z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin_x: f64,
    pub origin_y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { origin_x: 0.0, origin_y: 0.0, zoom: 1.0 }
    }
}

impl Viewport {
    /// Width of the visible model-space window.
    #[must_use]
    pub fn visible_width(&self) -> f64 {
        PITCH_WIDTH / self.zoom
    }

    /// Height of the visible model-space window.
    #[must_use]
    pub fn visible_height(&self) -> f64 {
        PITCH_HEIGHT / self.zoom
    }

    /// Screen pixels per model unit on the x axis, for a view `view_w` CSS
    /// pixels wide.
    #[must_use]
    pub fn scale_x(&self, view_w: f64) -> f64 {
        view_w * self.zoom / PITCH_WIDTH
    }

    /// Screen pixels per model unit on the y axis.
    #[must_use]
    pub fn scale_y(&self, view_h: f64) -> f64 {
        view_h * self.zoom / PITCH_HEIGHT
    }

    /// Model units per screen pixel on the x axis, or 0.0 when the view has
    /// no extent yet. Used to convert fixed-pixel radii (waypoint handles)
    /// into model space.
    #[must_use]
    pub fn model_per_px_x(&self, view_w: f64) -> f64 {
        if view_w <= 0.0 {
            return 0.0;
        }
        PITCH_WIDTH / (view_w * self.zoom)
    }

    /// Convert a screen-space point (CSS pixels) to model coordinates.
    ///
    /// Returns `Point::ZERO` when the view has no extent (canvas not mounted
    /// yet); callers tolerate the degenerate zero point during first frames.
    #[must_use]
    pub fn to_model(&self, screen: Point, view_w: f64, view_h: f64) -> Point {
        if view_w <= 0.0 || view_h <= 0.0 {
            return Point::ZERO;
        }
        Point {
            x: screen.x / self.scale_x(view_w) + self.origin_x,
            y: screen.y / self.scale_y(view_h) + self.origin_y,
        }
    }

    /// Convert a model-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn to_screen(&self, model: Point, view_w: f64, view_h: f64) -> Point {
        Point {
            x: (model.x - self.origin_x) * self.scale_x(view_w),
            y: (model.y - self.origin_y) * self.scale_y(view_h),
        }
    }

    /// Nearest legal viewport: zoom clamped into `[MIN_ZOOM, MAX_ZOOM]`
    /// first, then the origin clamped so the visible window stays within the
    /// overscroll band around the pitch. Idempotent and total, so every
    /// mutating operation pipes its result through here unconditionally.
    #[must_use]
    pub fn clamped(self) -> Viewport {
        let zoom = self.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        Viewport {
            origin_x: clamp_origin(self.origin_x, PITCH_WIDTH, zoom),
            origin_y: clamp_origin(self.origin_y, PITCH_HEIGHT, zoom),
            zoom,
        }
    }

    /// Pan by a model-space delta: the origin moves opposite the pointer so
    /// the content follows it. Result is clamped.
    #[must_use]
    pub fn panned_by(self, delta: Point) -> Viewport {
        Viewport {
            origin_x: self.origin_x - delta.x,
            origin_y: self.origin_y - delta.y,
            zoom: self.zoom,
        }
        .clamped()
    }

    /// Rescale zoom by `factor`, keeping `focal` (a model-space point) at the
    /// same screen position before and after. Result is clamped; when the
    /// origin clamp engages the anchor necessarily gives way.
    #[must_use]
    pub fn zoomed_at(self, focal: Point, factor: f64) -> Viewport {
        let zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        // Screen position of `focal` is (focal - origin) * scale and scale is
        // proportional to zoom, so holding it fixed gives:
        let ratio = self.zoom / zoom;
        Viewport {
            origin_x: focal.x - (focal.x - self.origin_x) * ratio,
            origin_y: focal.y - (focal.y - self.origin_y) * ratio,
            zoom,
        }
        .clamped()
    }
}

/// Clamp one origin axis so the visible window (`extent / zoom` long) stays
/// within `OVERSCROLL_FRACTION` of the pitch beyond either edge. Below the
/// zoom where the window outgrows that band the interval inverts; the origin
/// then centers the pitch in the window.
fn clamp_origin(origin: f64, extent: f64, zoom: f64) -> f64 {
    let overscroll = extent * OVERSCROLL_FRACTION;
    let min = -overscroll;
    let max = extent + overscroll - extent / zoom;
    if max < min {
        (min + max) / 2.0
    } else {
        origin.clamp(min, max)
    }
}
