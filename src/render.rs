//! Rendering: draws the pitch, runs and tokens to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives the scene and read-only engine state and produces pixels — it
//! does not mutate anything.
//!
//! Drawing happens in CSS pixel space: the context is scaled once by `dpr`,
//! and every model point is projected through the viewport individually. The
//! pitch's model-to-screen scale is anisotropic, so a context-level scale
//! would distort circles and line widths; projecting per point keeps discs
//! round at every zoom.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Point, Viewport};
use crate::consts::{
    CENTER_CIRCLE_RADIUS, GOAL_AREA_DEPTH, GOAL_AREA_WIDTH, GRID_STEP, PENALTY_AREA_DEPTH,
    PENALTY_AREA_WIDTH, PENALTY_SPOT_DEPTH, PITCH_HEIGHT, PITCH_WIDTH, TOKEN_RADIUS,
    WAYPOINT_HANDLE_PX,
};
use crate::doc::Token;
use crate::engine::{EngineCore, Scene};

/// Pitch surface fill.
const PITCH_FILL: &str = "#2e7d46";
/// Out-of-bounds apron visible through overscroll.
const APRON_FILL: &str = "#24313a";
/// Pitch marking paint.
const LINE_COLOR: &str = "rgba(255, 255, 255, 0.85)";
/// Alignment grid paint, fainter than the markings.
const GRID_COLOR: &str = "rgba(255, 255, 255, 0.16)";
/// Run polyline paint.
const RUN_COLOR: &str = "rgba(255, 216, 90, 0.95)";
/// Drag trail dot paint.
const TRAIL_COLOR: &str = "rgba(255, 255, 255, 0.35)";
/// Selection ring and waypoint handle accent.
const SELECTION_COLOR: &str = "#ffd54a";

/// Arrowhead length in screen pixels.
const ARROW_SIZE_PX: f64 = 10.0;
/// Arrowhead half-angle in radians (~30°).
const ARROW_ANGLE: f64 = PI / 6.0;
/// Selection dash segment length in screen pixels.
const SELECTION_DASH_PX: f64 = 4.0;

/// Draw the full scene.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, scene: Scene<'_>, core: &EngineCore) -> Result<(), JsValue> {
    let vp = core.viewport;
    let view_w = core.view_width;
    let view_h = core.view_height;

    // Layer 0: clear and scale device pixels to CSS pixels.
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.set_fill_style_str(APRON_FILL);
    ctx.fill_rect(0.0, 0.0, view_w, view_h);
    if view_w <= 0.0 || view_h <= 0.0 {
        return Ok(());
    }

    // Layer 1: pitch surface and markings.
    draw_pitch(ctx, vp, view_w, view_h)?;
    if scene.show_grid {
        draw_grid(ctx, vp, view_w, view_h);
    }

    // Layer 2: runs underneath their tokens.
    for token in &scene.play.tokens {
        if !token.run.is_empty() {
            draw_run(ctx, token, vp, view_w, view_h);
        }
    }

    // Layer 3: transient drag trails.
    draw_trails(ctx, core, vp, view_w, view_h);

    // Layer 4: tokens in document order (later entries on top).
    for token in &scene.play.tokens {
        draw_token(ctx, token, vp, view_w, view_h)?;
    }

    // Layer 5: selection ring and waypoint handles.
    if !scene.locked {
        if let Some(token) = scene.selection.and_then(|id| scene.play.token(id)) {
            draw_selection(ctx, token, vp, view_w, view_h)?;
        }
    }

    Ok(())
}

// =============================================================
// Pitch
// =============================================================

fn draw_pitch(ctx: &CanvasRenderingContext2d, vp: Viewport, view_w: f64, view_h: f64) -> Result<(), JsValue> {
    let (px, py, pw, ph) = model_rect(vp, view_w, view_h, 0.0, 0.0, PITCH_WIDTH, PITCH_HEIGHT);
    ctx.set_fill_style_str(PITCH_FILL);
    ctx.fill_rect(px, py, pw, ph);

    ctx.set_stroke_style_str(LINE_COLOR);
    ctx.set_line_width(1.5);

    // Boundary and halfway line.
    ctx.stroke_rect(px, py, pw, ph);
    let half_top = vp.to_screen(Point::new(PITCH_WIDTH / 2.0, 0.0), view_w, view_h);
    let half_bottom = vp.to_screen(Point::new(PITCH_WIDTH / 2.0, PITCH_HEIGHT), view_w, view_h);
    ctx.begin_path();
    ctx.move_to(half_top.x, half_top.y);
    ctx.line_to(half_bottom.x, half_bottom.y);
    ctx.stroke();

    // Center circle and spot.
    let center = vp.to_screen(Point::new(PITCH_WIDTH / 2.0, PITCH_HEIGHT / 2.0), view_w, view_h);
    let rx = CENTER_CIRCLE_RADIUS * vp.scale_x(view_w);
    let ry = CENTER_CIRCLE_RADIUS * vp.scale_y(view_h);
    ctx.begin_path();
    ctx.ellipse(center.x, center.y, rx, ry, 0.0, 0.0, 2.0 * PI)?;
    ctx.stroke();
    fill_dot(ctx, center, 2.0, LINE_COLOR);

    // Penalty and goal boxes at both ends.
    let boxes = [
        (0.0, PENALTY_AREA_DEPTH, PENALTY_AREA_WIDTH),
        (0.0, GOAL_AREA_DEPTH, GOAL_AREA_WIDTH),
        (PITCH_WIDTH - PENALTY_AREA_DEPTH, PENALTY_AREA_DEPTH, PENALTY_AREA_WIDTH),
        (PITCH_WIDTH - GOAL_AREA_DEPTH, GOAL_AREA_DEPTH, GOAL_AREA_WIDTH),
    ];
    for (x, depth, width) in boxes {
        let (bx, by, bw, bh) =
            model_rect(vp, view_w, view_h, x, (PITCH_HEIGHT - width) / 2.0, depth, width);
        ctx.stroke_rect(bx, by, bw, bh);
    }

    // Penalty spots and the arcs outside each box. The arc shares the center
    // circle radius, so the half-angle follows from the box depth.
    let arc_half = ((PENALTY_AREA_DEPTH - PENALTY_SPOT_DEPTH) / CENTER_CIRCLE_RADIUS).acos();
    let left_spot = vp.to_screen(Point::new(PENALTY_SPOT_DEPTH, PITCH_HEIGHT / 2.0), view_w, view_h);
    let right_spot = vp.to_screen(
        Point::new(PITCH_WIDTH - PENALTY_SPOT_DEPTH, PITCH_HEIGHT / 2.0),
        view_w,
        view_h,
    );
    fill_dot(ctx, left_spot, 2.0, LINE_COLOR);
    fill_dot(ctx, right_spot, 2.0, LINE_COLOR);

    ctx.begin_path();
    ctx.ellipse(left_spot.x, left_spot.y, rx, ry, 0.0, -arc_half, arc_half)?;
    ctx.stroke();
    ctx.begin_path();
    ctx.ellipse(right_spot.x, right_spot.y, rx, ry, 0.0, PI - arc_half, PI + arc_half)?;
    ctx.stroke();

    Ok(())
}

fn draw_grid(ctx: &CanvasRenderingContext2d, vp: Viewport, view_w: f64, view_h: f64) {
    ctx.save();
    ctx.set_stroke_style_str(GRID_COLOR);
    ctx.set_line_width(1.0);

    let mut x = GRID_STEP;
    while x < PITCH_WIDTH {
        let top = vp.to_screen(Point::new(x, 0.0), view_w, view_h);
        let bottom = vp.to_screen(Point::new(x, PITCH_HEIGHT), view_w, view_h);
        ctx.begin_path();
        ctx.move_to(top.x, top.y);
        ctx.line_to(bottom.x, bottom.y);
        ctx.stroke();
        x += GRID_STEP;
    }
    let mut y = GRID_STEP;
    while y < PITCH_HEIGHT {
        let left = vp.to_screen(Point::new(0.0, y), view_w, view_h);
        let right = vp.to_screen(Point::new(PITCH_WIDTH, y), view_w, view_h);
        ctx.begin_path();
        ctx.move_to(left.x, left.y);
        ctx.line_to(right.x, right.y);
        ctx.stroke();
        y += GRID_STEP;
    }

    ctx.restore();
}

// =============================================================
// Runs and trails
// =============================================================

fn draw_run(ctx: &CanvasRenderingContext2d, token: &Token, vp: Viewport, view_w: f64, view_h: f64) {
    let start = vp.to_screen(token.pos(), view_w, view_h);

    ctx.save();
    ctx.set_stroke_style_str(RUN_COLOR);
    ctx.set_line_width(2.0);

    ctx.begin_path();
    ctx.move_to(start.x, start.y);
    let mut prev = start;
    let mut last = start;
    for waypoint in &token.run {
        prev = last;
        last = vp.to_screen(*waypoint, view_w, view_h);
        ctx.line_to(last.x, last.y);
    }
    ctx.stroke();

    // Arrowhead on the final segment points the direction of the run.
    let angle = (last.y - prev.y).atan2(last.x - prev.x);
    ctx.set_fill_style_str(RUN_COLOR);
    draw_arrowhead(ctx, last.x, last.y, angle);

    ctx.restore();
}

fn draw_arrowhead(ctx: &CanvasRenderingContext2d, tip_x: f64, tip_y: f64, angle: f64) {
    let x1 = tip_x - ARROW_SIZE_PX * (angle - ARROW_ANGLE).cos();
    let y1 = tip_y - ARROW_SIZE_PX * (angle - ARROW_ANGLE).sin();
    let x2 = tip_x - ARROW_SIZE_PX * (angle + ARROW_ANGLE).cos();
    let y2 = tip_y - ARROW_SIZE_PX * (angle + ARROW_ANGLE).sin();

    ctx.begin_path();
    ctx.move_to(tip_x, tip_y);
    ctx.line_to(x1, y1);
    ctx.line_to(x2, y2);
    ctx.close_path();
    ctx.fill();
}

fn draw_trails(ctx: &CanvasRenderingContext2d, core: &EngineCore, vp: Viewport, view_w: f64, view_h: f64) {
    ctx.save();
    for point in core.trail_points() {
        let dot = vp.to_screen(point, view_w, view_h);
        fill_dot(ctx, dot, 2.0, TRAIL_COLOR);
    }
    ctx.restore();
}

// =============================================================
// Tokens and selection
// =============================================================

fn draw_token(ctx: &CanvasRenderingContext2d, token: &Token, vp: Viewport, view_w: f64, view_h: f64) -> Result<(), JsValue> {
    let center = vp.to_screen(token.pos(), view_w, view_h);
    let radius = TOKEN_RADIUS * vp.scale_x(view_w);

    ctx.save();
    ctx.begin_path();
    ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str(&token.color);
    ctx.fill();
    ctx.set_stroke_style_str("#fff");
    ctx.set_line_width(1.5);
    ctx.stroke();

    if !token.label.is_empty() {
        ctx.set_fill_style_str("#fff");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        let font_size = (radius * 0.9).clamp(9.0, 28.0);
        ctx.set_font(&format!("{font_size:.0}px sans-serif"));
        ctx.fill_text(&token.label, center.x, center.y)?;
    }

    ctx.restore();
    Ok(())
}

fn draw_selection(ctx: &CanvasRenderingContext2d, token: &Token, vp: Viewport, view_w: f64, view_h: f64) -> Result<(), JsValue> {
    let center = vp.to_screen(token.pos(), view_w, view_h);
    let ring_radius = TOKEN_RADIUS * vp.scale_x(view_w) + 3.0;

    ctx.save();
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(2.0);
    let dash_array = js_sys::Array::new();
    dash_array.push(&SELECTION_DASH_PX.into());
    dash_array.push(&SELECTION_DASH_PX.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.begin_path();
    ctx.arc(center.x, center.y, ring_radius, 0.0, 2.0 * PI)?;
    ctx.stroke();
    ctx.set_line_dash(&js_sys::Array::new())?;

    // Waypoint handles, fixed size on screen regardless of zoom.
    ctx.set_fill_style_str("#fff");
    ctx.set_line_width(1.5);
    for waypoint in &token.run {
        let handle = vp.to_screen(*waypoint, view_w, view_h);
        ctx.begin_path();
        ctx.arc(handle.x, handle.y, WAYPOINT_HANDLE_PX * 0.7, 0.0, 2.0 * PI)?;
        ctx.fill();
        ctx.stroke();
    }

    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Project a model-space rectangle to screen-space `(x, y, w, h)`.
fn model_rect(
    vp: Viewport,
    view_w: f64,
    view_h: f64,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
) -> (f64, f64, f64, f64) {
    let top_left = vp.to_screen(Point::new(x, y), view_w, view_h);
    (top_left.x, top_left.y, w * vp.scale_x(view_w), h * vp.scale_y(view_h))
}

/// Small solid dot; skipped silently if the arc call fails.
fn fill_dot(ctx: &CanvasRenderingContext2d, at: Point, radius: f64, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    if ctx.arc(at.x, at.y, radius, 0.0, 2.0 * PI).is_ok() {
        ctx.fill();
    }
}
