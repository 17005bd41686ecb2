//! Run (path) editing operations.
//!
//! The host owns the play, so every operation here is pure: it takes the
//! current token (or play) by reference and returns updated copies for the
//! host to apply through its normal update path. Every written waypoint is
//! clamped to the pitch-minus-margin rectangle, the same bound token
//! positions get, so persisted plays never hold out-of-bounds geometry.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use crate::camera::Point;
use crate::doc::{Play, Token};
use crate::template::RunTemplate;

/// Copy of `token` with `point` appended to its run.
#[must_use]
pub fn append_waypoint(token: &Token, point: Point) -> Token {
    let mut updated = token.clone();
    updated.run.push(point.clamped_to_pitch());
    updated
}

/// Copy of `token` with the waypoint at `index` replaced by `point`.
///
/// Returns `None` when `index` is out of range for the token's current run —
/// a concurrent external edit may have shortened it since the drag started,
/// and the stale move must drop rather than fault.
#[must_use]
pub fn move_waypoint(token: &Token, index: usize, point: Point) -> Option<Token> {
    if index >= token.run.len() {
        return None;
    }
    let mut updated = token.clone();
    updated.run[index] = point.clamped_to_pitch();
    Some(updated)
}

/// Copy of `token` with its run emptied.
#[must_use]
pub fn clear_run(token: &Token) -> Token {
    let mut updated = token.clone();
    updated.run.clear();
    updated
}

/// Updated copies of every token in `play` that currently has a run, each
/// with the run emptied. Tokens without runs need no update and are omitted;
/// positions are untouched either way.
#[must_use]
pub fn clear_all_runs(play: &Play) -> Vec<Token> {
    play.tokens
        .iter()
        .filter(|t| !t.run.is_empty())
        .map(clear_run)
        .collect()
}

/// Copy of `token` with its run replaced wholesale by `template`'s shape,
/// mirrored toward the centerline from the token's half of the pitch.
#[must_use]
pub fn apply_template(token: &Token, template: RunTemplate) -> Token {
    let mut updated = token.clone();
    updated.run = template.waypoints(token.pos());
    updated
}
