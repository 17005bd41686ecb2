//! Advisory coach-notes client.
//!
//! The designer works fully offline; the notes endpoint is optional. The play
//! is posted as JSON and the service answers free text. Every failure mode
//! (no transport, non-2xx, unreadable body, blank body) collapses to one
//! fixed fallback line, so the panel always has something to show.

use gloo_net::http::Request;
use touchline::doc::Play;

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

const COACH_NOTES_URL: &str = "/api/coach-notes";

/// Shown whenever the notes service has no usable answer.
pub const FALLBACK_NOTE: &str =
    "Coach is unavailable. Check your spacing, the delivery angle and that at \
     least one runner attacks the ball.";

/// Ask the notes service to review a play. Never fails.
pub async fn fetch_coach_notes(play: &Play) -> String {
    note_or_fallback(request_notes(play).await)
}

/// A usable body passes through; anything else is the fallback line.
#[must_use]
pub fn note_or_fallback(body: Option<String>) -> String {
    match body {
        Some(text) if !text.trim().is_empty() => text,
        _ => FALLBACK_NOTE.to_owned(),
    }
}

async fn request_notes(play: &Play) -> Option<String> {
    let resp = Request::post(COACH_NOTES_URL)
        .json(play)
        .ok()?
        .send()
        .await
        .ok()?;
    if !resp.ok() {
        log::warn!("coach notes request failed with status {}", resp.status());
        return None;
    }
    resp.text().await.ok()
}
