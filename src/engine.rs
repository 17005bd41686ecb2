//! Engine: ties together the viewport, hit-testing, per-pointer gestures,
//! update batching and rendering.
//!
//! The host owns the play, the selection and the view flags; it passes them
//! in as a [`Scene`] on every call and applies the [`Action`]s that come
//! back. [`EngineCore`] carries only gesture-lifetime state (viewport,
//! interactions, pending batch samples) and is separated from [`Engine`] so
//! it can be tested without WASM/browser dependencies.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use std::collections::HashMap;

use crate::batch::{BatchKey, UpdateBatcher};
use crate::camera::{Point, Viewport};
use crate::consts::{WAYPOINT_HANDLE_PX, WHEEL_ZOOM_SENSITIVITY, ZOOM_STEP};
use crate::doc::{Play, Token, TokenId};
use crate::hit::{self, DragLocks, Hit};
use crate::input::{Interaction, InteractionKind, PointerId};
use crate::{render, route};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Selection changed; `None` clears it.
    Select(Option<TokenId>),
    /// A token edit to apply to the play and persist.
    TokenUpdated(Token),
    /// Batched work is pending; the host should arrange one animation-frame
    /// callback that calls [`EngineCore::flush_frame`]. Requests may repeat
    /// before the frame fires — the host coalesces them.
    FrameRequested,
    /// Pointer cursor to show over the canvas.
    SetCursor(&'static str),
    /// The scene changed visually; redraw when convenient.
    RenderNeeded,
}

/// Host-owned state the engine reads on every call. Rebuilt per call, so a
/// re-render always reflects the host's latest play and selection.
#[derive(Clone, Copy)]
pub struct Scene<'a> {
    pub play: &'a Play,
    pub selection: Option<TokenId>,
    /// Read-only mode: presses only pan, taps never edit, handles hidden.
    pub locked: bool,
    pub show_grid: bool,
}

/// Core engine state — all logic that doesn't depend on the canvas element.
pub struct EngineCore {
    pub viewport: Viewport,
    /// Canvas size in CSS pixels; zero until the host mounts it.
    pub view_width: f64,
    pub view_height: f64,
    pub dpr: f64,
    /// Live gestures keyed by pointer id; absence is the idle state.
    interactions: HashMap<PointerId, Interaction>,
    batcher: UpdateBatcher,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            view_width: 0.0,
            view_height: 0.0,
            dpr: 1.0,
            interactions: HashMap::new(),
            batcher: UpdateBatcher::new(),
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Viewport ---

    /// Update the view dimensions (CSS pixels) and device pixel ratio.
    pub fn set_view_size(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.view_width = width_css;
        self.view_height = height_css;
        self.dpr = dpr;
    }

    /// Map a screen-space point to model space under the current viewport.
    /// `Point::ZERO` while the view is unmounted.
    #[must_use]
    pub fn to_model(&self, screen: Point) -> Point {
        self.viewport.to_model(screen, self.view_width, self.view_height)
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.zoom_by(ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.zoom_by(1.0 / ZOOM_STEP)
    }

    /// Back to the whole pitch: origin (0, 0), zoom 1.
    pub fn reset_viewport(&mut self) -> Vec<Action> {
        self.viewport = Viewport::default();
        vec![Action::RenderNeeded]
    }

    fn zoom_by(&mut self, factor: f64) -> Vec<Action> {
        let center = Point::new(self.view_width / 2.0, self.view_height / 2.0);
        let focal = self.to_model(center);
        self.viewport = self.viewport.zoomed_at(focal, factor);
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    /// Classify a press by what is under it and open an interaction for the
    /// pointer. The host captures the pointer id before calling in, so the
    /// rest of the gesture routes here even outside the canvas bounds.
    pub fn on_pointer_down(&mut self, scene: Scene, pointer: PointerId, screen: Point) -> Vec<Action> {
        let model = self.to_model(screen);
        let viewport = self.viewport;

        // A fresh press on a still-live pointer id replaces its gesture.
        if let Some(stale) = self.interactions.remove(&pointer) {
            if let Some(key) = stale.batch_key() {
                self.batcher.cancel(key);
            }
        }

        let hit = if scene.locked {
            None
        } else {
            hit::hit_test(
                model,
                scene.play,
                scene.selection,
                self.handle_hit_radius(),
                &self.drag_locks(),
            )
        };

        let mut actions = Vec::new();
        let kind = match hit {
            Some(Hit::Token(token)) => {
                if scene.selection != Some(token) {
                    actions.push(Action::Select(Some(token)));
                }
                InteractionKind::TokenDrag { token }
            }
            Some(Hit::Waypoint { token, index }) => InteractionKind::WaypointDrag { token, index },
            None => InteractionKind::Pan,
        };

        self.interactions.insert(pointer, Interaction::new(kind, model, viewport));
        actions.push(Action::SetCursor("grabbing"));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Drive the pointer's live gesture; events for idle pointer ids are
    /// ignored. Drags submit through the batcher; pans apply immediately.
    pub fn on_pointer_move(&mut self, scene: Scene, pointer: PointerId, screen: Point) -> Vec<Action> {
        let model = self.to_model(screen);
        let Some(interaction) = self.interactions.get_mut(&pointer) else {
            return Vec::new();
        };

        match interaction.kind {
            InteractionKind::TokenDrag { token } => {
                // Token removed externally mid-drag: the gesture goes dead.
                if scene.play.token(token).is_none() {
                    return Vec::new();
                }
                let target = model.clamped_to_pitch();
                interaction.has_moved = true;
                interaction.trail.push(target);

                let mut actions = Vec::new();
                if self.batcher.submit(BatchKey::Token(token), target) {
                    actions.push(Action::FrameRequested);
                }
                actions.push(Action::RenderNeeded);
                actions
            }
            InteractionKind::WaypointDrag { token, index } => {
                let index_live =
                    scene.play.token(token).is_some_and(|t| index < t.run.len());
                if !index_live {
                    return Vec::new();
                }
                let target = model.clamped_to_pitch();
                interaction.has_moved = true;

                let mut actions = Vec::new();
                if self.batcher.submit(BatchKey::Waypoint { token, index }, target) {
                    actions.push(Action::FrameRequested);
                }
                actions.push(Action::RenderNeeded);
                actions
            }
            InteractionKind::Pan => {
                // Deltas are computed against the anchor viewport, not the
                // live one, so the pan itself never feeds back into them.
                let here = interaction
                    .anchor_viewport
                    .to_model(screen, self.view_width, self.view_height);
                let delta = Point::new(
                    here.x - interaction.anchor_model.x,
                    here.y - interaction.anchor_model.y,
                );
                interaction.has_moved = true;
                self.viewport = interaction.anchor_viewport.panned_by(delta);
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Close the pointer's gesture. A pan that never moved is a tap: it
    /// extends the selected token's run when that token can carry one,
    /// otherwise it clears the selection.
    pub fn on_pointer_up(&mut self, scene: Scene, pointer: PointerId, screen: Point) -> Vec<Action> {
        let Some(interaction) = self.interactions.remove(&pointer) else {
            return Vec::new();
        };
        if let Some(key) = interaction.batch_key() {
            self.batcher.cancel(key);
        }

        let mut actions = Vec::new();
        let tapped =
            interaction.kind == InteractionKind::Pan && !interaction.has_moved && !scene.locked;
        if tapped {
            let tap = self.to_model(screen).clamped_to_pitch();
            if let Some(selected) = scene.selection {
                match scene.play.token(selected) {
                    Some(token) if token.kind.allows_runs() => {
                        actions.push(Action::TokenUpdated(route::append_waypoint(token, tap)));
                    }
                    // Selected token forbids runs, or no longer exists.
                    _ => actions.push(Action::Select(None)),
                }
            }
        }

        actions.push(Action::SetCursor("default"));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Close the pointer's gesture without any tap side effect (capture was
    /// lost, touch cancelled, etc.).
    pub fn on_pointer_cancel(&mut self, pointer: PointerId) -> Vec<Action> {
        let Some(interaction) = self.interactions.remove(&pointer) else {
            return Vec::new();
        };
        if let Some(key) = interaction.batch_key() {
            self.batcher.cancel(key);
        }
        vec![Action::SetCursor("default"), Action::RenderNeeded]
    }

    /// Wheel zoom around the pointer position. Independent of the pointer
    /// state machine.
    pub fn on_wheel(&mut self, screen: Point, delta_y: f64) -> Vec<Action> {
        let focal = self.to_model(screen);
        let factor = (-delta_y * WHEEL_ZOOM_SENSITIVITY).exp();
        self.viewport = self.viewport.zoomed_at(focal, factor);
        vec![Action::RenderNeeded]
    }

    // --- Frame flush ---

    /// Deliver the batched samples. Called by the host once per requested
    /// animation frame; each due key whose interaction is still live yields
    /// exactly one `TokenUpdated`. Samples whose token or waypoint vanished
    /// underneath the drag drop silently.
    pub fn flush_frame(&mut self, scene: Scene) -> Vec<Action> {
        let mut actions = Vec::new();
        for (key, point) in self.batcher.take_due() {
            let live = self.interactions.values().any(|i| i.batch_key() == Some(key));
            if !live {
                continue;
            }
            match key {
                BatchKey::Token(id) => {
                    if let Some(token) = scene.play.token(id) {
                        actions.push(Action::TokenUpdated(token.with_pos(point)));
                    }
                }
                BatchKey::Waypoint { token, index } => {
                    if let Some(updated) = scene
                        .play
                        .token(token)
                        .and_then(|t| route::move_waypoint(t, index, point))
                    {
                        actions.push(Action::TokenUpdated(updated));
                    }
                }
            }
        }
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Drop every live gesture and pending sample. Called when the host
    /// unmounts the canvas; nothing fires afterwards.
    pub fn teardown(&mut self) {
        self.interactions.clear();
        self.batcher.cancel_all();
    }

    // --- Queries ---

    /// The live interaction for a pointer id, if any.
    #[must_use]
    pub fn interaction(&self, pointer: PointerId) -> Option<&Interaction> {
        self.interactions.get(&pointer)
    }

    /// Number of concurrently live gestures.
    #[must_use]
    pub fn interaction_count(&self) -> usize {
        self.interactions.len()
    }

    /// Whether some pointer currently drags this token.
    #[must_use]
    pub fn is_token_dragging(&self, token: TokenId) -> bool {
        self.interactions
            .values()
            .any(|i| matches!(i.kind, InteractionKind::TokenDrag { token: t } if t == token))
    }

    /// Whether batched samples await a frame flush.
    #[must_use]
    pub fn has_pending_updates(&self) -> bool {
        self.batcher.has_pending()
    }

    /// Drag-trail points across all live gestures, for rendering.
    pub fn trail_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.interactions.values().flat_map(|i| i.trail.iter())
    }

    /// Waypoint-handle hit radius in model units at the current zoom; zero
    /// while unmounted, making handles unhittable.
    fn handle_hit_radius(&self) -> f64 {
        WAYPOINT_HANDLE_PX * self.viewport.model_per_px_x(self.view_width)
    }

    fn drag_locks(&self) -> DragLocks {
        let mut locks = DragLocks::default();
        for interaction in self.interactions.values() {
            match interaction.kind {
                InteractionKind::TokenDrag { token } => {
                    locks.tokens.insert(token);
                }
                InteractionKind::WaypointDrag { token, index } => {
                    locks.waypoints.insert((token, index));
                }
                InteractionKind::Pan => {}
            }
        }
        locks
    }
}

/// The full canvas engine. Wraps [`EngineCore`] and owns the browser canvas
/// element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, core: EngineCore::new() }
    }

    // --- Viewport ---

    /// Update view dimensions and size the canvas backing store in device
    /// pixels so output stays crisp on high-DPI displays.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_view_size(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_view_size(width_css, height_css, dpr);
        self.canvas.set_width((width_css * dpr).round().max(1.0) as u32);
        self.canvas.set_height((height_css * dpr).round().max(1.0) as u32);
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, scene: Scene, pointer: PointerId, screen: Point) -> Vec<Action> {
        self.core.on_pointer_down(scene, pointer, screen)
    }

    pub fn on_pointer_move(&mut self, scene: Scene, pointer: PointerId, screen: Point) -> Vec<Action> {
        self.core.on_pointer_move(scene, pointer, screen)
    }

    pub fn on_pointer_up(&mut self, scene: Scene, pointer: PointerId, screen: Point) -> Vec<Action> {
        self.core.on_pointer_up(scene, pointer, screen)
    }

    pub fn on_pointer_cancel(&mut self, pointer: PointerId) -> Vec<Action> {
        self.core.on_pointer_cancel(pointer)
    }

    pub fn on_wheel(&mut self, screen: Point, delta_y: f64) -> Vec<Action> {
        self.core.on_wheel(screen, delta_y)
    }

    pub fn flush_frame(&mut self, scene: Scene) -> Vec<Action> {
        self.core.flush_frame(scene)
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.core.zoom_in()
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.core.zoom_out()
    }

    pub fn reset_viewport(&mut self) -> Vec<Action> {
        self.core.reset_viewport()
    }

    pub fn teardown(&mut self) {
        self.core.teardown();
    }

    // --- Render ---

    /// Draw the current scene to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or any `Canvas2D` call
    /// fails.
    pub fn render(&self, scene: Scene) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas 2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, scene, &self.core)
    }
}
