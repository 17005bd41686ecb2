//! Play library persistence.
//!
//! The whole library lives under one versioned localStorage key as a JSON
//! array of plays. The codec is pure and tested natively; the browser-facing
//! wrappers degrade quietly: a missing or unreadable library falls back to
//! the sample plays, and a failed write costs at most the latest edit.

use touchline::doc::Play;

use crate::state::plays::sample_plays;

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

pub const STORAGE_KEY: &str = "touchline.plays.v1";

#[must_use]
pub fn encode_plays(plays: &[Play]) -> String {
    serde_json::to_string(plays).unwrap_or_else(|_| "[]".to_owned())
}

#[must_use]
pub fn decode_plays(raw: &str) -> Option<Vec<Play>> {
    serde_json::from_str(raw).ok()
}

/// The stored library; the sample plays when nothing usable is stored. An
/// empty stored array is a real library (the user deleted every play) and is
/// returned as-is.
#[must_use]
pub fn load_plays() -> Vec<Play> {
    let stored = local_storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten());
    match stored {
        Some(raw) => decode_plays(&raw).unwrap_or_else(|| {
            log::warn!("stored play library is unreadable; starting from the sample plays");
            sample_plays(js_sys::Date::now())
        }),
        None => sample_plays(js_sys::Date::now()),
    }
}

pub fn save_plays(plays: &[Play]) {
    let Some(storage) = local_storage() else {
        return;
    };
    if storage.set_item(STORAGE_KEY, &encode_plays(plays)).is_err() {
        log::warn!("saving the play library failed; the latest edit may be lost");
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}
