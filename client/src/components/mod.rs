//! UI pieces shared by the library and designer pages.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::state::editor::EditorState;

pub mod canvas_host;
pub mod notes_panel;
pub mod play_card;
pub mod token_editor;
pub mod toolbar;

/// How long a toolbar status message stays visible.
const STATUS_FLASH_MS: u32 = 2_500;

/// Show `message` in the toolbar status slot, then clear it after a short
/// delay unless a newer message has replaced it in the meantime.
pub fn flash_status(editor: RwSignal<EditorState>, message: &str) {
    let mut seq = 0;
    editor.update(|e| seq = e.set_status(message));
    Timeout::new(STATUS_FLASH_MS, move || {
        editor.update(|e| e.clear_status(seq));
    })
    .forget();
}
