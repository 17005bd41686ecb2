//! Frame-coalesced update batching.
//!
//! Pointer-move events fire much faster than the display refreshes. Rather
//! than pushing every sample to the host, drags submit here and the host is
//! asked for one animation-frame callback; when that frame fires the engine
//! drains the latest sample per key and emits exactly one update each. The
//! pending entry doubles as the "a callback is already scheduled" marker, so
//! a key arms at most one frame at a time.
//!
//! The batcher is plain state with no timer of its own — the host (or a
//! test) decides when a frame happens, which keeps the whole pipeline
//! deterministic off-browser.

#[cfg(test)]
#[path = "batch_test.rs"]
mod batch_test;

use std::collections::HashMap;

use crate::camera::Point;
use crate::doc::TokenId;

/// Target of a batched update: a token's position, or one waypoint of its
/// run. Concurrent interactions own disjoint keys, so their updates never
/// interfere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchKey {
    Token(TokenId),
    Waypoint { token: TokenId, index: usize },
}

/// Last-write-wins sample store, drained once per animation frame.
#[derive(Debug, Default)]
pub struct UpdateBatcher {
    pending: HashMap<BatchKey, Point>,
}

impl UpdateBatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest sample for `key`, overwriting any sample already
    /// pending this frame. Returns `true` when the key newly needs a frame
    /// callback (nothing was pending for it).
    pub fn submit(&mut self, key: BatchKey, point: Point) -> bool {
        self.pending.insert(key, point).is_none()
    }

    /// Drain every due key with its most recent sample. Called exactly once
    /// per animation frame by the owner.
    pub fn take_due(&mut self) -> Vec<(BatchKey, Point)> {
        self.pending.drain().collect()
    }

    /// Drop pending work for one key; its interaction ended before the frame
    /// fired.
    pub fn cancel(&mut self, key: BatchKey) {
        self.pending.remove(&key);
    }

    /// Drop everything. Called on controller teardown so no update fires
    /// afterwards.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
