//! Human-scale timestamps for the library cards.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

/// "just now" / "12m ago" / "3h ago" / "5d ago" rendering of an edit stamp.
/// Unstamped plays and ages beyond a month collapse to the same vague
/// answer.
#[must_use]
pub fn relative_age(then_ms: f64, now_ms: f64) -> String {
    if then_ms <= 0.0 {
        return "a while ago".to_owned();
    }
    let elapsed_ms = (now_ms - then_ms).max(0.0);
    let minutes = (elapsed_ms / 60_000.0).floor();
    if minutes < 1.0 {
        return "just now".to_owned();
    }
    if minutes < 60.0 {
        return format!("{minutes:.0}m ago");
    }
    let hours = (minutes / 60.0).floor();
    if hours < 24.0 {
        return format!("{hours:.0}h ago");
    }
    let days = (hours / 24.0).floor();
    if days <= 30.0 {
        return format!("{days:.0}d ago");
    }
    "a while ago".to_owned()
}
