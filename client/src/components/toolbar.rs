//! Designer toolbar: play identity, roster edits, view toggles and export.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use wasm_bindgen::JsCast;

use touchline::doc::{PlayId, TokenKind};
use touchline::route;

use crate::components::flash_status;
use crate::state::editor::EditorState;
use crate::state::plays::PlayStore;
use crate::util::export;

#[component]
pub fn Toolbar(play_id: PlayId) -> impl IntoView {
    let store = expect_context::<RwSignal<PlayStore>>();
    let editor = expect_context::<RwSignal<EditorState>>();
    let navigate = use_navigate();

    let name =
        move || store.with(|s| s.get(play_id).map(|p| p.name.clone()).unwrap_or_default());
    let locked = move || editor.with(|e| e.locked);
    let show_grid = move || editor.with(|e| e.show_grid);
    let status = move || editor.with(|e| e.status.clone()).unwrap_or_default();

    let on_rename = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        store.update(|s| s.rename(play_id, &value, js_sys::Date::now()));
    };

    let add_token = move |kind: TokenKind, message: &str| {
        let mut added = None;
        store.update(|s| added = s.add_token(play_id, kind, js_sys::Date::now()));
        if let Some(token_id) = added {
            editor.update(|e| e.select(Some(token_id)));
            flash_status(editor, message);
        }
    };
    let on_add_attacker =
        move |_ev: leptos::ev::MouseEvent| add_token(TokenKind::Attacker, "Attacker added");
    let on_add_defender =
        move |_ev: leptos::ev::MouseEvent| add_token(TokenKind::Defender, "Defender added");

    let on_clear_runs = move |_ev: leptos::ev::MouseEvent| {
        let cleared = store.with_untracked(|s| s.get(play_id).map(route::clear_all_runs));
        let Some(cleared) = cleared else {
            return;
        };
        if cleared.is_empty() {
            flash_status(editor, "No runs to clear");
            return;
        }
        let now = js_sys::Date::now();
        store.update(|s| {
            for token in cleared {
                s.apply_token(play_id, token, now);
            }
        });
        flash_status(editor, "All runs cleared");
    };

    let on_toggle_lock = move |_ev: leptos::ev::MouseEvent| {
        let next = !editor.with_untracked(|e| e.locked);
        editor.update(|e| e.set_locked(next));
    };

    let on_toggle_grid = move |_ev: leptos::ev::MouseEvent| {
        editor.update(EditorState::toggle_grid);
    };

    let on_export = move |_ev: leptos::ev::MouseEvent| {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("designer-canvas")
            .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            return;
        };
        let play_name = store
            .with_untracked(|s| s.get(play_id).map(|p| p.name.clone()).unwrap_or_default());
        export::download_canvas_png(&canvas, &play_name);
        flash_status(editor, "PNG exported");
    };

    let on_delete = {
        let navigate = navigate.clone();
        move |_ev: leptos::ev::MouseEvent| {
            store.update(|s| {
                s.remove(play_id);
            });
            navigate("/", NavigateOptions::default());
        }
    };

    view! {
        <header class="toolbar">
            <a class="toolbar__back" href="/">
                "\u{2190} Plays"
            </a>
            <input
                class="toolbar__name-input"
                type="text"
                prop:value=name
                on:input=on_rename
                disabled=locked
            />
            <div class="toolbar__group">
                <button class="btn" on:click=on_add_attacker disabled=locked>
                    "+ Attacker"
                </button>
                <button class="btn" on:click=on_add_defender disabled=locked>
                    "+ Defender"
                </button>
                <button class="btn" on:click=on_clear_runs disabled=locked>
                    "Clear runs"
                </button>
            </div>
            <div class="toolbar__group">
                <button class="btn" class:btn--active=locked on:click=on_toggle_lock>
                    "Lock"
                </button>
                <button class="btn" class:btn--active=show_grid on:click=on_toggle_grid>
                    "Grid"
                </button>
            </div>
            <div class="toolbar__group">
                <button class="btn" on:click=on_export>
                    "Export PNG"
                </button>
                <button class="btn btn--danger" on:click=on_delete>
                    "Delete"
                </button>
            </div>
            <div class="toolbar__spacer"></div>
            <span class="toolbar__status">{status}</span>
        </header>
    }
}
