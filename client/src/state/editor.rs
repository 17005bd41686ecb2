#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use touchline::doc::TokenId;

/// Per-session designer state. Nothing here persists; it resets whenever the
/// designer page changes plays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditorState {
    pub selection: Option<TokenId>,
    /// Read-only presentation mode: gestures only pan and edits are refused.
    pub locked: bool,
    pub show_grid: bool,
    /// Transient status line, cleared by a timer.
    pub status: Option<String>,
    /// Bumped per status message so a stale timer cannot clear a newer one.
    pub status_seq: u64,
}

impl EditorState {
    pub fn select(&mut self, token: Option<TokenId>) {
        self.selection = token;
    }

    /// Locking drops the selection so no editing chrome survives into the
    /// read-only view.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
        if locked {
            self.selection = None;
        }
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    /// Show a status message and return the sequence number its clear timer
    /// must present.
    pub fn set_status(&mut self, message: impl Into<String>) -> u64 {
        self.status_seq += 1;
        self.status = Some(message.into());
        self.status_seq
    }

    /// Clear the status line, but only if `seq` still names the message on
    /// display.
    pub fn clear_status(&mut self, seq: u64) {
        if self.status_seq == seq {
            self.status = None;
        }
    }
}
