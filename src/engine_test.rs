#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::consts::{MAX_ZOOM, MIN_ZOOM};
use crate::doc::TokenKind;

// =============================================================
// Helpers
// =============================================================

const EPSILON: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn attacker_at(x: f64, y: f64) -> Token {
    Token::new(TokenKind::Attacker, x, y, "9")
}

fn defender_at(x: f64, y: f64) -> Token {
    Token::new(TokenKind::Defender, x, y, "4")
}

fn play_with(tokens: Vec<Token>) -> Play {
    let mut play = Play::new("Corner Short");
    play.tokens = tokens;
    play
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Core mounted at 1000x800 CSS pixels: at zoom 1 one model unit is 10 px,
/// so model (x, y) sits at screen (10x, 10y).
fn mounted_core() -> EngineCore {
    let mut core = EngineCore::new();
    core.set_view_size(1000.0, 800.0, 1.0);
    core
}

fn scene(play: &Play) -> Scene<'_> {
    Scene { play, selection: None, locked: false, show_grid: false }
}

fn scene_with_selection(play: &Play, selection: TokenId) -> Scene<'_> {
    Scene { play, selection: Some(selection), locked: false, show_grid: false }
}

fn locked_scene(play: &Play) -> Scene<'_> {
    Scene { play, selection: None, locked: true, show_grid: false }
}

fn has_action<F>(actions: &[Action], pred: F) -> bool
where
    F: Fn(&Action) -> bool,
{
    actions.iter().any(pred)
}

fn has_render_needed(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::RenderNeeded))
}

fn has_frame_requested(actions: &[Action]) -> bool {
    has_action(actions, |a| matches!(a, Action::FrameRequested))
}

fn updated_tokens(actions: &[Action]) -> Vec<Token> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::TokenUpdated(t) => Some(t.clone()),
            _ => None,
        })
        .collect()
}

fn selections(actions: &[Action]) -> Vec<Option<TokenId>> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Select(s) => Some(*s),
            _ => None,
        })
        .collect()
}

// =============================================================
// Construction and defaults
// =============================================================

#[test]
fn core_new_has_identity_viewport() {
    let core = EngineCore::new();
    assert_eq!(core.viewport, Viewport::default());
}

#[test]
fn core_new_is_idle() {
    let core = EngineCore::new();
    assert_eq!(core.interaction_count(), 0);
    assert!(!core.has_pending_updates());
}

#[test]
fn core_new_view_is_unmounted() {
    let core = EngineCore::new();
    assert_eq!(core.view_width, 0.0);
    assert_eq!(core.view_height, 0.0);
    assert_eq!(core.dpr, 1.0);
}

// =============================================================
// set_view_size / to_model
// =============================================================

#[test]
fn set_view_size_stores_dimensions() {
    let mut core = EngineCore::new();
    core.set_view_size(1280.0, 720.0, 2.0);
    assert_eq!(core.view_width, 1280.0);
    assert_eq!(core.view_height, 720.0);
    assert_eq!(core.dpr, 2.0);
}

#[test]
fn to_model_maps_screen_to_pitch() {
    let core = mounted_core();
    let center = core.to_model(pt(500.0, 400.0));
    assert!(approx(center.x, 50.0));
    assert!(approx(center.y, 40.0));
    let corner = core.to_model(pt(0.0, 0.0));
    assert!(approx(corner.x, 0.0));
    assert!(approx(corner.y, 0.0));
}

#[test]
fn to_model_before_mount_is_zero() {
    let core = EngineCore::new();
    assert_eq!(core.to_model(pt(314.0, 42.0)), Point::ZERO);
}

// =============================================================
// Pointer down — classification
// =============================================================

#[test]
fn press_on_token_starts_drag_and_selects() {
    let mut core = mounted_core();
    let token = attacker_at(50.0, 40.0);
    let id = token.id;
    let play = play_with(vec![token]);

    let actions = core.on_pointer_down(scene(&play), 1, pt(500.0, 400.0));
    assert_eq!(core.interaction(1).unwrap().kind, InteractionKind::TokenDrag { token: id });
    assert_eq!(selections(&actions), vec![Some(id)]);
    assert!(has_action(&actions, |a| matches!(a, Action::SetCursor("grabbing"))));
    assert!(has_render_needed(&actions));
}

#[test]
fn press_on_selected_token_emits_no_select() {
    let mut core = mounted_core();
    let token = attacker_at(50.0, 40.0);
    let id = token.id;
    let play = play_with(vec![token]);

    let actions = core.on_pointer_down(scene_with_selection(&play, id), 1, pt(500.0, 400.0));
    assert!(selections(&actions).is_empty());
    assert_eq!(core.interaction(1).unwrap().kind, InteractionKind::TokenDrag { token: id });
}

#[test]
fn press_on_empty_pitch_starts_pan() {
    let mut core = mounted_core();
    let play = play_with(vec![attacker_at(50.0, 40.0)]);

    let actions = core.on_pointer_down(scene(&play), 1, pt(100.0, 100.0));
    assert_eq!(core.interaction(1).unwrap().kind, InteractionKind::Pan);
    assert!(selections(&actions).is_empty());
}

#[test]
fn press_on_handle_of_selected_token_starts_waypoint_drag() {
    let mut core = mounted_core();
    let mut token = attacker_at(20.0, 20.0);
    token.run = vec![pt(40.0, 40.0), pt(60.0, 20.0)];
    let id = token.id;
    let play = play_with(vec![token]);

    core.on_pointer_down(scene_with_selection(&play, id), 1, pt(400.0, 400.0));
    assert_eq!(
        core.interaction(1).unwrap().kind,
        InteractionKind::WaypointDrag { token: id, index: 0 }
    );
}

#[test]
fn waypoint_handles_require_selection() {
    let mut core = mounted_core();
    let mut token = attacker_at(20.0, 20.0);
    token.run = vec![pt(40.0, 40.0)];
    let play = play_with(vec![token]);

    // Same press, but the token is not selected: its handles are invisible.
    core.on_pointer_down(scene(&play), 1, pt(400.0, 400.0));
    assert_eq!(core.interaction(1).unwrap().kind, InteractionKind::Pan);
}

#[test]
fn token_on_top_of_handle_wins() {
    let mut core = mounted_core();
    let mut selected = attacker_at(10.0, 10.0);
    selected.run = vec![pt(40.0, 40.0)];
    let selected_id = selected.id;
    let cover = attacker_at(40.0, 40.0);
    let cover_id = cover.id;
    let play = play_with(vec![selected, cover]);

    // A token disc sits exactly on the selected token's handle.
    let actions =
        core.on_pointer_down(scene_with_selection(&play, selected_id), 1, pt(400.0, 400.0));
    assert_eq!(core.interaction(1).unwrap().kind, InteractionKind::TokenDrag { token: cover_id });
    assert_eq!(selections(&actions), vec![Some(cover_id)]);
}

#[test]
fn locked_scene_press_always_pans() {
    let mut core = mounted_core();
    let play = play_with(vec![attacker_at(50.0, 40.0)]);

    let actions = core.on_pointer_down(locked_scene(&play), 1, pt(500.0, 400.0));
    assert_eq!(core.interaction(1).unwrap().kind, InteractionKind::Pan);
    assert!(selections(&actions).is_empty());
}

#[test]
fn press_on_token_held_by_other_pointer_pans() {
    let mut core = mounted_core();
    let token = attacker_at(50.0, 40.0);
    let id = token.id;
    let play = play_with(vec![token]);

    core.on_pointer_down(scene(&play), 1, pt(500.0, 400.0));
    // Second finger lands on the same disc while the first still holds it.
    core.on_pointer_down(scene_with_selection(&play, id), 2, pt(498.0, 400.0));
    assert_eq!(core.interaction(2).unwrap().kind, InteractionKind::Pan);
    assert_eq!(core.interaction_count(), 2);
}

// =============================================================
// Pointer move — token drag
// =============================================================

#[test]
fn first_drag_move_requests_a_frame() {
    let mut core = mounted_core();
    let play = play_with(vec![attacker_at(50.0, 40.0)]);

    core.on_pointer_down(scene(&play), 1, pt(500.0, 400.0));
    let actions = core.on_pointer_move(scene(&play), 1, pt(520.0, 420.0));
    assert!(has_frame_requested(&actions));
    assert!(has_render_needed(&actions));
    assert!(core.has_pending_updates());
}

#[test]
fn further_moves_before_flush_do_not_rerequest() {
    let mut core = mounted_core();
    let play = play_with(vec![attacker_at(50.0, 40.0)]);

    core.on_pointer_down(scene(&play), 1, pt(500.0, 400.0));
    core.on_pointer_move(scene(&play), 1, pt(520.0, 420.0));
    let second = core.on_pointer_move(scene(&play), 1, pt(540.0, 440.0));
    let third = core.on_pointer_move(scene(&play), 1, pt(560.0, 460.0));
    assert!(!has_frame_requested(&second));
    assert!(!has_frame_requested(&third));
    assert!(has_render_needed(&second));
}

#[test]
fn moves_coalesce_to_one_update_per_frame() {
    let mut core = mounted_core();
    let token = attacker_at(50.0, 40.0);
    let id = token.id;
    let play = play_with(vec![token]);

    core.on_pointer_down(scene(&play), 1, pt(500.0, 400.0));
    core.on_pointer_move(scene(&play), 1, pt(520.0, 400.0));
    core.on_pointer_move(scene(&play), 1, pt(560.0, 400.0));
    core.on_pointer_move(scene(&play), 1, pt(400.0, 300.0));
    core.on_pointer_move(scene(&play), 1, pt(300.0, 200.0));
    core.on_pointer_move(scene(&play), 1, pt(320.0, 300.0));

    let actions = core.flush_frame(scene(&play));
    let updates = updated_tokens(&actions);
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].id, id);
    assert!(approx(updates[0].x, 32.0)); // only the last sample survives
    assert!(approx(updates[0].y, 30.0));
    assert!(has_render_needed(&actions));
    assert!(!core.has_pending_updates());
}

#[test]
fn drag_past_edge_commits_clamped_position() {
    let mut core = mounted_core();
    let token = attacker_at(95.0, 10.0);
    let id = token.id;
    let mut play = play_with(vec![token]);

    core.on_pointer_down(scene(&play), 1, pt(950.0, 100.0));
    // Pointer leaves the pitch: model (150, 10).
    core.on_pointer_move(scene(&play), 1, pt(1500.0, 100.0));

    let actions = core.flush_frame(scene(&play));
    let updates = updated_tokens(&actions);
    assert_eq!(updates.len(), 1);
    assert!(approx(updates[0].x, 98.0));
    assert!(approx(updates[0].y, 10.0));

    assert!(play.apply_token(updates[0].clone()));
    assert!(approx(play.token(id).unwrap().x, 98.0));
}

#[test]
fn drag_records_a_trail() {
    let mut core = mounted_core();
    let token = attacker_at(50.0, 40.0);
    let id = token.id;
    let play = play_with(vec![token]);

    core.on_pointer_down(scene(&play), 1, pt(500.0, 400.0));
    core.on_pointer_move(scene(&play), 1, pt(510.0, 400.0));
    core.on_pointer_move(scene(&play), 1, pt(520.0, 400.0));
    core.on_pointer_move(scene(&play), 1, pt(530.0, 400.0));

    assert!(core.is_token_dragging(id));
    assert_eq!(core.interaction(1).unwrap().trail.len(), 3);
    assert_eq!(core.trail_points().count(), 3);
}

#[test]
fn move_of_idle_pointer_is_ignored() {
    let mut core = mounted_core();
    let play = play_with(vec![]);
    let actions = core.on_pointer_move(scene(&play), 7, pt(100.0, 100.0));
    assert!(actions.is_empty());
}

#[test]
fn move_after_external_token_removal_is_inert() {
    let mut core = mounted_core();
    let play = play_with(vec![attacker_at(50.0, 40.0)]);

    core.on_pointer_down(scene(&play), 1, pt(500.0, 400.0));
    let emptied = play_with(vec![]);
    let actions = core.on_pointer_move(scene(&emptied), 1, pt(520.0, 420.0));
    assert!(actions.is_empty());
    assert!(!core.has_pending_updates());
}

// =============================================================
// Pointer move — waypoint drag
// =============================================================

#[test]
fn waypoint_flush_moves_only_that_waypoint() {
    let mut core = mounted_core();
    let mut token = attacker_at(20.0, 20.0);
    token.run = vec![pt(40.0, 40.0), pt(60.0, 20.0)];
    let id = token.id;
    let play = play_with(vec![token]);

    core.on_pointer_down(scene_with_selection(&play, id), 1, pt(400.0, 400.0));
    core.on_pointer_move(scene_with_selection(&play, id), 1, pt(450.0, 460.0));

    let actions = core.flush_frame(scene_with_selection(&play, id));
    let updates = updated_tokens(&actions);
    assert_eq!(updates.len(), 1);
    assert!(approx(updates[0].run[0].x, 45.0));
    assert!(approx(updates[0].run[0].y, 46.0));
    assert_eq!(updates[0].run[1], pt(60.0, 20.0)); // neighbor untouched
    assert!(approx(updates[0].x, 20.0)); // disc untouched
}

#[test]
fn waypoint_drag_clamps_to_pitch() {
    let mut core = mounted_core();
    let mut token = attacker_at(20.0, 20.0);
    token.run = vec![pt(40.0, 40.0)];
    let id = token.id;
    let play = play_with(vec![token]);

    core.on_pointer_down(scene_with_selection(&play, id), 1, pt(400.0, 400.0));
    core.on_pointer_move(scene_with_selection(&play, id), 1, pt(990.0, 790.0));

    let actions = core.flush_frame(scene_with_selection(&play, id));
    let updates = updated_tokens(&actions);
    assert!(approx(updates[0].run[0].x, 98.0));
    assert!(approx(updates[0].run[0].y, 78.0));
}

#[test]
fn waypoint_move_after_run_cleared_is_inert() {
    let mut core = mounted_core();
    let mut token = attacker_at(20.0, 20.0);
    token.run = vec![pt(40.0, 40.0)];
    let id = token.id;
    let play = play_with(vec![token]);

    core.on_pointer_down(scene_with_selection(&play, id), 1, pt(400.0, 400.0));
    let mut cleared = play.clone();
    cleared.tokens[0].run.clear();
    let actions = core.on_pointer_move(scene_with_selection(&cleared, id), 1, pt(450.0, 460.0));
    assert!(actions.is_empty());
}

#[test]
fn flush_drops_sample_for_vanished_waypoint() {
    let mut core = mounted_core();
    let mut token = attacker_at(20.0, 20.0);
    token.run = vec![pt(40.0, 40.0)];
    let id = token.id;
    let play = play_with(vec![token]);

    core.on_pointer_down(scene_with_selection(&play, id), 1, pt(400.0, 400.0));
    core.on_pointer_move(scene_with_selection(&play, id), 1, pt(450.0, 460.0));

    let mut cleared = play.clone();
    cleared.tokens[0].run.clear();
    let actions = core.flush_frame(scene_with_selection(&cleared, id));
    assert!(updated_tokens(&actions).is_empty());
    assert!(actions.is_empty());
}

// =============================================================
// Pointer move — pan
// =============================================================

#[test]
fn pan_moves_origin_opposite_the_drag() {
    let mut core = mounted_core();
    let play = play_with(vec![]);

    core.on_pointer_down(scene(&play), 1, pt(100.0, 100.0));
    let actions = core.on_pointer_move(scene(&play), 1, pt(200.0, 150.0));
    // Pointer moved +10/+5 model units, so the origin moves -10/-5.
    assert!(approx(core.viewport.origin_x, -10.0));
    assert!(approx(core.viewport.origin_y, -5.0));
    assert!(has_render_needed(&actions));
}

#[test]
fn pan_tracks_press_anchor_not_last_move() {
    let mut core = mounted_core();
    let play = play_with(vec![]);

    core.on_pointer_down(scene(&play), 1, pt(100.0, 100.0));
    core.on_pointer_move(scene(&play), 1, pt(200.0, 150.0));
    core.on_pointer_move(scene(&play), 1, pt(300.0, 150.0));
    assert!(approx(core.viewport.origin_x, -20.0));
    // Returning to the press point returns the viewport exactly.
    core.on_pointer_move(scene(&play), 1, pt(100.0, 100.0));
    assert!(approx(core.viewport.origin_x, 0.0));
    assert!(approx(core.viewport.origin_y, 0.0));
}

#[test]
fn pan_clamps_into_overscroll_band() {
    let mut core = mounted_core();
    let play = play_with(vec![]);

    core.on_pointer_down(scene(&play), 1, pt(700.0, 100.0));
    core.on_pointer_move(scene(&play), 1, pt(100.0, 100.0));
    // Raw origin would be +60; the band at zoom 1 ends at +25.
    assert!(approx(core.viewport.origin_x, 25.0));
}

#[test]
fn pan_under_zoom_uses_the_anchor_viewport() {
    let mut core = mounted_core();
    core.viewport = Viewport { origin_x: 25.0, origin_y: 20.0, zoom: 2.0 };
    let play = play_with(vec![]);

    // At zoom 2 one model unit is 20 px.
    core.on_pointer_down(scene(&play), 1, pt(500.0, 400.0));
    core.on_pointer_move(scene(&play), 1, pt(400.0, 300.0));
    assert!(approx(core.viewport.origin_x, 30.0)); // 25 - (-5)
    assert!(approx(core.viewport.origin_y, 25.0)); // 20 - (-5)
}

// =============================================================
// Pointer up
// =============================================================

#[test]
fn release_ends_the_gesture() {
    let mut core = mounted_core();
    let token = attacker_at(50.0, 40.0);
    let id = token.id;
    let play = play_with(vec![token]);

    core.on_pointer_down(scene(&play), 1, pt(500.0, 400.0));
    core.on_pointer_move(scene(&play), 1, pt(520.0, 420.0));
    let actions = core.on_pointer_up(scene(&play), 1, pt(520.0, 420.0));

    assert_eq!(core.interaction_count(), 0);
    assert!(!core.is_token_dragging(id));
    assert!(!core.has_pending_updates());
    assert!(has_action(&actions, |a| matches!(a, Action::SetCursor("default"))));
    assert!(has_render_needed(&actions));
}

#[test]
fn sample_pending_at_release_is_dropped() {
    let mut core = mounted_core();
    let play = play_with(vec![attacker_at(50.0, 40.0)]);

    core.on_pointer_down(scene(&play), 1, pt(500.0, 400.0));
    core.on_pointer_move(scene(&play), 1, pt(520.0, 420.0));
    core.on_pointer_up(scene(&play), 1, pt(520.0, 420.0));

    assert!(core.flush_frame(scene(&play)).is_empty());
}

#[test]
fn release_of_unknown_pointer_is_noop() {
    let mut core = mounted_core();
    let play = play_with(vec![]);
    let actions = core.on_pointer_up(scene(&play), 9, pt(100.0, 100.0));
    assert!(actions.is_empty());
}

#[test]
fn tap_appends_waypoint_to_selected_attacker() {
    let mut core = mounted_core();
    let token = attacker_at(20.0, 20.0);
    let id = token.id;
    let play = play_with(vec![token]);

    core.on_pointer_down(scene_with_selection(&play, id), 1, pt(500.0, 400.0));
    let actions = core.on_pointer_up(scene_with_selection(&play, id), 1, pt(500.0, 400.0));

    let updates = updated_tokens(&actions);
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].run, vec![pt(50.0, 40.0)]);
    assert!(approx(updates[0].x, 20.0)); // disc itself stays put
}

#[test]
fn tap_waypoint_is_clamped() {
    let mut core = mounted_core();
    let token = attacker_at(20.0, 20.0);
    let id = token.id;
    let play = play_with(vec![token]);

    core.on_pointer_down(scene_with_selection(&play, id), 1, pt(990.0, 10.0));
    let actions = core.on_pointer_up(scene_with_selection(&play, id), 1, pt(990.0, 10.0));

    let updates = updated_tokens(&actions);
    assert_eq!(updates[0].run, vec![pt(98.0, 2.0)]); // (99, 1) clamped
}

#[test]
fn tap_with_defender_selected_clears_selection() {
    let mut core = mounted_core();
    let token = defender_at(60.0, 60.0);
    let id = token.id;
    let play = play_with(vec![token]);

    core.on_pointer_down(scene_with_selection(&play, id), 1, pt(100.0, 100.0));
    let actions = core.on_pointer_up(scene_with_selection(&play, id), 1, pt(100.0, 100.0));

    assert_eq!(selections(&actions), vec![None]);
    assert!(updated_tokens(&actions).is_empty());
}

#[test]
fn tap_with_stale_selection_clears_it() {
    let mut core = mounted_core();
    let play = play_with(vec![]);
    let gone = Uuid::new_v4();

    core.on_pointer_down(scene_with_selection(&play, gone), 1, pt(100.0, 100.0));
    let actions = core.on_pointer_up(scene_with_selection(&play, gone), 1, pt(100.0, 100.0));

    assert_eq!(selections(&actions), vec![None]);
    assert!(updated_tokens(&actions).is_empty());
}

#[test]
fn tap_without_selection_is_inert() {
    let mut core = mounted_core();
    let play = play_with(vec![attacker_at(20.0, 20.0)]);

    core.on_pointer_down(scene(&play), 1, pt(500.0, 400.0));
    let actions = core.on_pointer_up(scene(&play), 1, pt(500.0, 400.0));

    assert!(selections(&actions).is_empty());
    assert!(updated_tokens(&actions).is_empty());
}

#[test]
fn moved_pan_is_not_a_tap() {
    let mut core = mounted_core();
    let token = attacker_at(20.0, 20.0);
    let id = token.id;
    let play = play_with(vec![token]);

    core.on_pointer_down(scene_with_selection(&play, id), 1, pt(500.0, 400.0));
    core.on_pointer_move(scene_with_selection(&play, id), 1, pt(520.0, 420.0));
    let actions = core.on_pointer_up(scene_with_selection(&play, id), 1, pt(520.0, 420.0));

    assert!(updated_tokens(&actions).is_empty());
    assert!(selections(&actions).is_empty());
}

#[test]
fn tap_in_locked_scene_never_edits() {
    let mut core = mounted_core();
    let token = attacker_at(20.0, 20.0);
    let id = token.id;
    let play = play_with(vec![token]);
    let viewing = Scene { play: &play, selection: Some(id), locked: true, show_grid: false };

    core.on_pointer_down(viewing, 1, pt(500.0, 400.0));
    let actions = core.on_pointer_up(viewing, 1, pt(500.0, 400.0));

    assert!(updated_tokens(&actions).is_empty());
    assert!(selections(&actions).is_empty());
}

#[test]
fn token_drag_release_is_not_a_tap() {
    let mut core = mounted_core();
    let token = attacker_at(50.0, 40.0);
    let id = token.id;
    let play = play_with(vec![token]);

    // Press on the selected disc and release without moving.
    core.on_pointer_down(scene_with_selection(&play, id), 1, pt(500.0, 400.0));
    let actions = core.on_pointer_up(scene_with_selection(&play, id), 1, pt(500.0, 400.0));

    assert!(updated_tokens(&actions).is_empty());
}

// =============================================================
// Pointer cancel
// =============================================================

#[test]
fn cancel_closes_gesture_without_tap() {
    let mut core = mounted_core();
    let token = attacker_at(20.0, 20.0);
    let id = token.id;
    let play = play_with(vec![token]);

    core.on_pointer_down(scene_with_selection(&play, id), 1, pt(500.0, 400.0));
    let actions = core.on_pointer_cancel(1);

    assert_eq!(core.interaction_count(), 0);
    assert!(updated_tokens(&actions).is_empty());
    assert!(has_action(&actions, |a| matches!(a, Action::SetCursor("default"))));
}

#[test]
fn cancel_discards_pending_sample() {
    let mut core = mounted_core();
    let play = play_with(vec![attacker_at(50.0, 40.0)]);

    core.on_pointer_down(scene(&play), 1, pt(500.0, 400.0));
    core.on_pointer_move(scene(&play), 1, pt(520.0, 420.0));
    core.on_pointer_cancel(1);

    assert!(core.flush_frame(scene(&play)).is_empty());
}

#[test]
fn cancel_of_unknown_pointer_is_noop() {
    let mut core = mounted_core();
    assert!(core.on_pointer_cancel(3).is_empty());
}

// =============================================================
// Multiple pointers
// =============================================================

#[test]
fn two_pointers_drag_independent_tokens() {
    let mut core = mounted_core();
    let a = attacker_at(20.0, 20.0);
    let b = attacker_at(60.0, 60.0);
    let (id_a, id_b) = (a.id, b.id);
    let play = play_with(vec![a, b]);

    core.on_pointer_down(scene(&play), 1, pt(200.0, 200.0));
    core.on_pointer_down(scene_with_selection(&play, id_a), 2, pt(600.0, 600.0));
    core.on_pointer_move(scene(&play), 1, pt(250.0, 250.0));
    core.on_pointer_move(scene(&play), 2, pt(650.0, 650.0));

    let actions = core.flush_frame(scene(&play));
    let updates = updated_tokens(&actions);
    assert_eq!(updates.len(), 2);
    let moved_a = updates.iter().find(|t| t.id == id_a).unwrap();
    let moved_b = updates.iter().find(|t| t.id == id_b).unwrap();
    assert!(approx(moved_a.x, 25.0));
    assert!(approx(moved_a.y, 25.0));
    assert!(approx(moved_b.x, 65.0));
    assert!(approx(moved_b.y, 65.0));
}

#[test]
fn flush_skips_tokens_released_before_the_frame() {
    let mut core = mounted_core();
    let a = attacker_at(20.0, 20.0);
    let b = attacker_at(60.0, 60.0);
    let (id_a, id_b) = (a.id, b.id);
    let play = play_with(vec![a, b]);

    core.on_pointer_down(scene(&play), 1, pt(200.0, 200.0));
    core.on_pointer_down(scene_with_selection(&play, id_a), 2, pt(600.0, 600.0));
    core.on_pointer_move(scene(&play), 1, pt(250.0, 250.0));
    core.on_pointer_move(scene(&play), 2, pt(650.0, 650.0));
    core.on_pointer_up(scene(&play), 2, pt(650.0, 650.0));

    let updates = updated_tokens(&core.flush_frame(scene(&play)));
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].id, id_a);
    assert!(updates.iter().all(|t| t.id != id_b));
}

#[test]
fn second_press_of_same_pointer_id_replaces_gesture() {
    let mut core = mounted_core();
    let play = play_with(vec![attacker_at(50.0, 40.0)]);

    core.on_pointer_down(scene(&play), 1, pt(500.0, 400.0));
    core.on_pointer_move(scene(&play), 1, pt(520.0, 420.0));
    // The browser never re-delivers pointerdown for a live id unless the
    // release was lost; the fresh press wins.
    core.on_pointer_down(scene(&play), 1, pt(100.0, 100.0));

    assert_eq!(core.interaction_count(), 1);
    assert_eq!(core.interaction(1).unwrap().kind, InteractionKind::Pan);
    assert!(!core.has_pending_updates());
}

// =============================================================
// Wheel and zoom controls
// =============================================================

#[test]
fn wheel_zoom_keeps_model_point_under_cursor() {
    let mut core = mounted_core();
    let screen = pt(700.0, 300.0);
    let before = core.to_model(screen);

    core.on_wheel(screen, -200.0);

    assert!(core.viewport.zoom > 1.0);
    let after = core.to_model(screen);
    assert!(approx(before.x, after.x));
    assert!(approx(before.y, after.y));
}

#[test]
fn wheel_scroll_down_zooms_out() {
    let mut core = mounted_core();
    core.on_wheel(pt(500.0, 400.0), 200.0);
    assert!(core.viewport.zoom < 1.0);
    assert!(core.viewport.zoom > MIN_ZOOM);
}

#[test]
fn wheel_zoom_clamps_at_max() {
    let mut core = mounted_core();
    core.viewport = Viewport { origin_x: 0.0, origin_y: 0.0, zoom: 2.4 };
    core.on_wheel(pt(500.0, 400.0), -3000.0);
    assert_eq!(core.viewport.zoom, MAX_ZOOM);
}

#[test]
fn wheel_zoom_at_min_centers_the_pitch() {
    let mut core = mounted_core();
    core.on_wheel(pt(500.0, 400.0), 3000.0);
    assert_eq!(core.viewport.zoom, MIN_ZOOM);
    // Window is larger than the band allows: origin centers the pitch.
    assert!(approx(core.viewport.origin_x, -100.0 / 3.0));
    assert!(approx(core.viewport.origin_y, -80.0 / 3.0));
}

#[test]
fn zoom_buttons_step_about_the_view_center() {
    let mut core = mounted_core();
    let center = pt(500.0, 400.0);

    let actions = core.zoom_in();
    assert!(approx(core.viewport.zoom, 1.2));
    assert!(has_render_needed(&actions));
    let focus = core.to_model(center);
    assert!(approx(focus.x, 50.0));
    assert!(approx(focus.y, 40.0));

    core.zoom_in();
    assert!(approx(core.viewport.zoom, 1.44));
    core.zoom_out();
    assert!(approx(core.viewport.zoom, 1.2));
    let focus = core.to_model(center);
    assert!(approx(focus.x, 50.0));
    assert!(approx(focus.y, 40.0));
}

#[test]
fn zoom_out_stops_at_the_floor() {
    let mut core = mounted_core();
    for _ in 0..5 {
        core.zoom_out();
    }
    assert_eq!(core.viewport.zoom, MIN_ZOOM);
}

#[test]
fn reset_viewport_restores_default() {
    let mut core = mounted_core();
    core.viewport = Viewport { origin_x: 12.0, origin_y: -3.0, zoom: 1.7 };
    let actions = core.reset_viewport();
    assert_eq!(core.viewport, Viewport::default());
    assert!(has_render_needed(&actions));
}

// =============================================================
// Frame flush
// =============================================================

#[test]
fn flush_with_nothing_pending_is_empty() {
    let mut core = mounted_core();
    let play = play_with(vec![]);
    assert!(core.flush_frame(scene(&play)).is_empty());
}

#[test]
fn flush_drops_sample_for_removed_token() {
    let mut core = mounted_core();
    let play = play_with(vec![attacker_at(50.0, 40.0)]);

    core.on_pointer_down(scene(&play), 1, pt(500.0, 400.0));
    core.on_pointer_move(scene(&play), 1, pt(520.0, 420.0));

    let emptied = play_with(vec![]);
    assert!(core.flush_frame(scene(&emptied)).is_empty());
}

// =============================================================
// Teardown
// =============================================================

#[test]
fn teardown_clears_everything() {
    let mut core = mounted_core();
    let play = play_with(vec![attacker_at(20.0, 20.0), attacker_at(60.0, 60.0)]);

    core.on_pointer_down(scene(&play), 1, pt(200.0, 200.0));
    core.on_pointer_down(scene(&play), 2, pt(600.0, 600.0));
    core.on_pointer_move(scene(&play), 1, pt(250.0, 250.0));
    core.teardown();

    assert_eq!(core.interaction_count(), 0);
    assert!(!core.has_pending_updates());
    assert!(core.flush_frame(scene(&play)).is_empty());
}
