#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use std::collections::HashSet;

use crate::camera::Point;
use crate::consts::{TOKEN_HIT_SLOP, TOKEN_RADIUS};
use crate::doc::{Play, TokenId};

/// What a model-space point lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A token disc.
    Token(TokenId),
    /// A waypoint handle on the selected token's run.
    Waypoint { token: TokenId, index: usize },
}

/// Targets currently held by live drags. Hit-testing skips them so a second
/// pointer can never grab what another pointer is already moving.
#[derive(Debug, Default)]
pub struct DragLocks {
    pub tokens: HashSet<TokenId>,
    pub waypoints: HashSet<(TokenId, usize)>,
}

/// Test what sits under `model_pt`, topmost first.
///
/// Token discs win over waypoint handles; handles exist only for the
/// currently selected token (that is all the renderer draws). Within each
/// layer, later entries are drawn on top and therefore tested first.
/// `handle_radius` is the handle hit radius already converted to model
/// units — zero when the view is unmounted, which makes handles unhittable.
#[must_use]
pub fn hit_test(
    model_pt: Point,
    play: &Play,
    selected: Option<TokenId>,
    handle_radius: f64,
    locks: &DragLocks,
) -> Option<Hit> {
    let token_radius = TOKEN_RADIUS + TOKEN_HIT_SLOP;
    for token in play.tokens.iter().rev() {
        if locks.tokens.contains(&token.id) {
            continue;
        }
        if model_pt.dist(token.pos()) <= token_radius {
            return Some(Hit::Token(token.id));
        }
    }

    let selected_token = selected.and_then(|id| play.token(id))?;
    if handle_radius <= 0.0 {
        return None;
    }
    for (index, waypoint) in selected_token.run.iter().enumerate().rev() {
        if locks.waypoints.contains(&(selected_token.id, index)) {
            continue;
        }
        if model_pt.dist(*waypoint) <= handle_radius {
            return Some(Hit::Waypoint { token: selected_token.id, index });
        }
    }

    None
}
