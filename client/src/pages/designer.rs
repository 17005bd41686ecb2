//! Designer page: toolbar, pitch canvas and the side panels for one play.

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use touchline::doc::PlayId;

use crate::components::canvas_host::CanvasHost;
use crate::components::notes_panel::NotesPanel;
use crate::components::token_editor::TokenEditor;
use crate::components::toolbar::Toolbar;
use crate::state::editor::EditorState;
use crate::state::plays::PlayStore;

#[component]
pub fn DesignerPage() -> impl IntoView {
    let store = expect_context::<RwSignal<PlayStore>>();
    let editor = expect_context::<RwSignal<EditorState>>();
    let params = use_params_map();

    let play_id = Memo::new(move |_| {
        params.read().get("id").and_then(|raw| raw.parse::<PlayId>().ok())
    });

    // Selection and view flags are scoped to one play.
    Effect::new(move || {
        let _ = play_id.get();
        editor.set(EditorState::default());
    });

    // Gate mounting on existence, not on the play value, so per-frame store
    // updates never tear the canvas down.
    let play_exists = Memo::new(move |_| {
        play_id.get().is_some_and(|id| store.with(|s| s.get(id).is_some()))
    });

    view! {
        <div class="designer-page">
            {move || match (play_id.get(), play_exists.get()) {
                (Some(id), true) => {
                    view! {
                        <Toolbar play_id=id />
                        <div class="designer-page__main">
                            <CanvasHost play_id=id />
                            <aside class="designer-page__side">
                                <Show when=move || !editor.with(|e| e.locked)>
                                    <TokenEditor play_id=id />
                                </Show>
                                <NotesPanel play_id=id />
                            </aside>
                        </div>
                    }
                        .into_any()
                }
                _ => {
                    view! {
                        <div class="designer-page__missing">
                            <p>"This play does not exist."</p>
                            <a class="btn" href="/">
                                "Back to plays"
                            </a>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
