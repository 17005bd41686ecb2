//! Per-pointer interactions and the drag trail.
//!
//! An [`Interaction`] is one pointer's gesture session, created on press and
//! destroyed on release or cancel. The engine keeps them in a map keyed by
//! pointer id, so concurrently active pointers (touch) each drive their own
//! independent gesture; an absent entry is the idle state.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::VecDeque;

use crate::batch::BatchKey;
use crate::camera::{Point, Viewport};
use crate::consts::TRAIL_MAX_POINTS;
use crate::doc::TokenId;

/// Browser pointer id as delivered by pointer events.
pub type PointerId = i32;

/// What a pointer grabbed on press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Dragging a token disc.
    TokenDrag { token: TokenId },
    /// Dragging one waypoint handle of the selected token's run.
    WaypointDrag { token: TokenId, index: usize },
    /// Dragging the empty pitch: pans the viewport. A pan that never moves
    /// is a tap and may extend the selected token's run on release.
    Pan,
}

/// One pointer's gesture session, press to release/cancel.
///
/// The anchors are snapshots from the press: pan deltas are computed against
/// `anchor_viewport` rather than the live viewport so that moving the
/// viewport mid-gesture does not feed back into the delta.
#[derive(Debug, Clone)]
pub struct Interaction {
    pub kind: InteractionKind,
    pub anchor_model: Point,
    pub anchor_viewport: Viewport,
    pub has_moved: bool,
    /// Populated only for token drags; dropped with the interaction.
    pub trail: DragTrail,
}

impl Interaction {
    #[must_use]
    pub fn new(kind: InteractionKind, anchor_model: Point, anchor_viewport: Viewport) -> Self {
        Self {
            kind,
            anchor_model,
            anchor_viewport,
            has_moved: false,
            trail: DragTrail::default(),
        }
    }

    /// Batch slot this interaction submits to; pans are applied immediately
    /// and have none.
    #[must_use]
    pub fn batch_key(&self) -> Option<BatchKey> {
        match self.kind {
            InteractionKind::TokenDrag { token } => Some(BatchKey::Token(token)),
            InteractionKind::WaypointDrag { token, index } => {
                Some(BatchKey::Waypoint { token, index })
            }
            InteractionKind::Pan => None,
        }
    }
}

/// Recently visited model points during a token drag, drawn as transient
/// feedback. Bounded to [`TRAIL_MAX_POINTS`] entries, oldest dropped first.
#[derive(Debug, Clone, Default)]
pub struct DragTrail {
    points: VecDeque<Point>,
}

impl DragTrail {
    pub fn push(&mut self, point: Point) {
        if self.points.len() == TRAIL_MAX_POINTS {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }
}
