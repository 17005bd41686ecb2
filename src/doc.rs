//! Play model: the pitch artifact edited by the engine.
//!
//! A `Play` is a named list of `Token`s — player markers with an optional
//! planned run (an ordered waypoint list). The host application owns the
//! play; the engine reads it per call for hit-testing and rendering and hands
//! edits back as whole updated tokens, never mutating the play in place.
//! These types are also the persistence wire format (JSON in local storage).

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;

/// Unique identifier for a play.
pub type PlayId = Uuid;

/// Unique identifier for a token within a play.
pub type TokenId = Uuid;

/// The side a token belongs to. Runs can only be drawn for the attacking
/// side; defenders are static reference markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Attacking player; may carry a run.
    Attacker,
    /// Defending player; position only.
    Defender,
}

impl TokenKind {
    /// Whether tokens of this kind may carry run waypoints.
    #[must_use]
    pub fn allows_runs(self) -> bool {
        match self {
            TokenKind::Attacker => true,
            TokenKind::Defender => false,
        }
    }

    /// Disc color used until the user picks one.
    #[must_use]
    pub fn default_color(self) -> &'static str {
        match self {
            TokenKind::Attacker => "#d64545",
            TokenKind::Defender => "#27405e",
        }
    }
}

/// A player marker on the pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Unique identifier, stable across edits.
    pub id: TokenId,
    /// Attacking or defending side.
    pub kind: TokenKind,
    /// Disc center, model-space x.
    pub x: f64,
    /// Disc center, model-space y.
    pub y: f64,
    /// Disc fill as a CSS color string.
    pub color: String,
    /// Short text drawn on the disc (shirt number or role).
    pub label: String,
    /// Planned run as ordered waypoints; empty for most tokens.
    #[serde(default)]
    pub run: Vec<Point>,
}

impl Token {
    /// New token of `kind` at a position, with the kind's default color and
    /// no run. The position is clamped like any other write.
    #[must_use]
    pub fn new(kind: TokenKind, x: f64, y: f64, label: impl Into<String>) -> Self {
        let pos = Point::new(x, y).clamped_to_pitch();
        Self {
            id: Uuid::new_v4(),
            kind,
            x: pos.x,
            y: pos.y,
            color: kind.default_color().to_owned(),
            label: label.into(),
            run: Vec::new(),
        }
    }

    /// Disc center as a point.
    #[must_use]
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Copy of this token moved to `pos` (already clamped by the caller's
    /// write path).
    #[must_use]
    pub fn with_pos(&self, pos: Point) -> Token {
        let mut moved = self.clone();
        moved.x = pos.x;
        moved.y = pos.y;
        moved
    }
}

/// A named set piece: the persisted artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Play {
    /// Unique identifier, the persistence key.
    pub id: PlayId,
    /// Display name; also names exported files.
    pub name: String,
    /// Tokens in draw order (later entries draw on top).
    pub tokens: Vec<Token>,
    /// Last-modified wall clock, milliseconds since the epoch.
    #[serde(default)]
    pub updated_at_ms: f64,
}

impl Play {
    /// New empty play with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tokens: Vec::new(),
            updated_at_ms: 0.0,
        }
    }

    /// Look up a token by id.
    #[must_use]
    pub fn token(&self, id: TokenId) -> Option<&Token> {
        self.tokens.iter().find(|t| t.id == id)
    }

    /// Replace the token carrying `updated.id`. Returns `false` (leaving the
    /// play untouched) when no such token exists — updates for externally
    /// removed tokens drop silently.
    pub fn apply_token(&mut self, updated: Token) -> bool {
        match self.tokens.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    /// Remove a token (and its run) by id. Returns `false` if absent.
    pub fn remove_token(&mut self, id: TokenId) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t.id != id);
        self.tokens.len() != before
    }
}
