#[cfg(test)]
#[path = "plays_test.rs"]
mod plays_test;

use touchline::camera::Point;
use touchline::doc::{Play, PlayId, Token, TokenId, TokenKind};
use touchline::route;
use touchline::template::RunTemplate;

/// The play library: every saved set piece, plus the operations the UI
/// applies to them. Mutations stamp `updated_at_ms` from the caller's clock,
/// keeping the store itself clock-free and unit-testable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayStore {
    pub plays: Vec<Play>,
}

impl PlayStore {
    #[must_use]
    pub fn from_plays(plays: Vec<Play>) -> Self {
        Self { plays }
    }

    #[must_use]
    pub fn get(&self, id: PlayId) -> Option<&Play> {
        self.plays.iter().find(|p| p.id == id)
    }

    /// Plays ordered for the library: most recently edited first, name as
    /// the tie-breaker.
    #[must_use]
    pub fn recent_first(&self) -> Vec<Play> {
        let mut plays = self.plays.clone();
        plays.sort_by(|a, b| {
            b.updated_at_ms
                .total_cmp(&a.updated_at_ms)
                .then_with(|| a.name.cmp(&b.name))
        });
        plays
    }

    /// Create a play seeded with a small corner-kick arrangement and return
    /// its id.
    pub fn create(&mut self, name: &str, now_ms: f64) -> PlayId {
        let mut play = Play::new(name);
        play.tokens = starter_tokens();
        play.updated_at_ms = now_ms;
        let id = play.id;
        self.plays.push(play);
        id
    }

    pub fn rename(&mut self, id: PlayId, name: &str, now_ms: f64) {
        if let Some(play) = self.get_mut(id) {
            play.name = name.to_owned();
            play.updated_at_ms = now_ms;
        }
    }

    /// Copy a play under a fresh id and a "Copy of …" name. The copy stamps
    /// `now_ms`, so it sorts to the front of the library.
    pub fn duplicate(&mut self, id: PlayId, now_ms: f64) -> Option<PlayId> {
        let mut copy = self.get(id)?.clone();
        copy.id = PlayId::new_v4();
        copy.name = format!("Copy of {}", copy.name);
        copy.updated_at_ms = now_ms;
        let copy_id = copy.id;
        self.plays.push(copy);
        Some(copy_id)
    }

    /// Drop a play. Returns `false` if the id is unknown.
    pub fn remove(&mut self, id: PlayId) -> bool {
        let before = self.plays.len();
        self.plays.retain(|p| p.id != id);
        self.plays.len() != before
    }

    /// Replace one token of one play. `false` when the play or the token is
    /// gone; callers treat that as a silently dropped stale update.
    pub fn apply_token(&mut self, play_id: PlayId, token: Token, now_ms: f64) -> bool {
        let Some(play) = self.get_mut(play_id) else {
            return false;
        };
        let applied = play.apply_token(token);
        if applied {
            play.updated_at_ms = now_ms;
        }
        applied
    }

    /// Add a token of `kind` on the next ladder slot, labelled with the next
    /// free shirt number for that side.
    pub fn add_token(&mut self, play_id: PlayId, kind: TokenKind, now_ms: f64) -> Option<TokenId> {
        let play = self.get_mut(play_id)?;
        let slot = spawn_slot(play.tokens.len());
        let label = next_label(play, kind);
        let token = Token::new(kind, slot.x, slot.y, label);
        let id = token.id;
        play.tokens.push(token);
        play.updated_at_ms = now_ms;
        Some(id)
    }

    pub fn remove_token(&mut self, play_id: PlayId, token_id: TokenId, now_ms: f64) -> bool {
        let Some(play) = self.get_mut(play_id) else {
            return false;
        };
        let removed = play.remove_token(token_id);
        if removed {
            play.updated_at_ms = now_ms;
        }
        removed
    }

    fn get_mut(&mut self, id: PlayId) -> Option<&mut Play> {
        self.plays.iter_mut().find(|p| p.id == id)
    }
}

/// First-run library: one worked corner, so the app never opens onto an
/// empty page. Missing or unreadable storage lands here.
#[must_use]
pub fn sample_plays(now_ms: f64) -> Vec<Play> {
    let mut corner = Play::new("Near-post corner");
    corner.tokens = starter_tokens();
    if let Some(runner) = corner.tokens.get_mut(1) {
        *runner = route::apply_template(runner, RunTemplate::NearPost);
    }
    if let Some(runner) = corner.tokens.get_mut(2) {
        *runner = route::apply_template(runner, RunTemplate::FarPost);
    }
    corner.updated_at_ms = now_ms;
    vec![corner]
}

/// Corner-kick starting shape: a taker on the right corner, two runners near
/// the edge of the box, two markers goal-side of them.
fn starter_tokens() -> Vec<Token> {
    vec![
        Token::new(TokenKind::Attacker, 97.0, 77.0, "7"),
        Token::new(TokenKind::Attacker, 86.0, 43.0, "9"),
        Token::new(TokenKind::Attacker, 82.0, 32.0, "10"),
        Token::new(TokenKind::Defender, 90.0, 38.0, "4"),
        Token::new(TokenKind::Defender, 87.0, 47.0, "5"),
    ]
}

/// Ladder of spawn slots marching across midfield, so repeated adds land on
/// distinct visible spots instead of stacking.
#[allow(clippy::cast_precision_loss)]
fn spawn_slot(index: usize) -> Point {
    let col = (index % 7) as f64;
    let row = ((index / 7) % 5) as f64;
    Point::new(30.0 + 6.0 * col, 20.0 + 8.0 * row)
}

/// Next unused shirt number for `kind`. Non-numeric labels count as
/// unnumbered.
fn next_label(play: &Play, kind: TokenKind) -> String {
    let highest = play
        .tokens
        .iter()
        .filter(|t| t.kind == kind)
        .filter_map(|t| t.label.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    (highest + 1).to_string()
}
