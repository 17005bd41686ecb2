//! Side-panel editor for the selected player.

use leptos::prelude::*;

use touchline::doc::{PlayId, Token, TokenKind};
use touchline::route;
use touchline::template::RunTemplate;

use crate::components::flash_status;
use crate::state::editor::EditorState;
use crate::state::plays::PlayStore;

fn token_form(
    store: RwSignal<PlayStore>,
    editor: RwSignal<EditorState>,
    play_id: PlayId,
    token: Token,
) -> impl IntoView {
    let apply = move |token: Token| {
        store.update(|s| {
            s.apply_token(play_id, token, js_sys::Date::now());
        });
    };

    let kind_label = match token.kind {
        TokenKind::Attacker => "Attacker",
        TokenKind::Defender => "Defender",
    };

    let label_token = token.clone();
    let on_label = move |ev: leptos::ev::Event| {
        let mut updated = label_token.clone();
        updated.label = event_target_value(&ev);
        apply(updated);
    };

    let color_token = token.clone();
    let on_color = move |ev: leptos::ev::Event| {
        let mut updated = color_token.clone();
        updated.color = event_target_value(&ev);
        apply(updated);
    };

    let run_section = token.kind.allows_runs().then(|| {
        let waypoints = token.run.len();
        let run_empty = token.run.is_empty();
        let template_token = token.clone();
        let clear_token = token.clone();
        let on_clear_run = move |_ev: leptos::ev::MouseEvent| {
            apply(route::clear_run(&clear_token));
            flash_status(editor, "Run cleared");
        };
        view! {
            <div class="token-editor__row">
                <span class="token-editor__label">"Templates"</span>
                <div class="token-editor__chips">
                    {RunTemplate::ALL
                        .into_iter()
                        .map(|template| {
                            let template_token = template_token.clone();
                            view! {
                                <button
                                    class="token-editor__chip"
                                    on:click=move |_| {
                                        apply(route::apply_template(&template_token, template));
                                        flash_status(
                                            editor,
                                            &format!("{} run applied", template.label()),
                                        );
                                    }
                                >
                                    {template.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
            <div class="token-editor__row">
                <span class="token-editor__label">"Run"</span>
                <span class="token-editor__meta">{format!("{waypoints} waypoints")}</span>
                <button class="btn" on:click=on_clear_run disabled=run_empty>
                    "Clear"
                </button>
            </div>
            <p class="token-editor__hint">"Tap the pitch to extend the run."</p>
        }
    });

    let remove_id = token.id;
    let on_remove = move |_ev: leptos::ev::MouseEvent| {
        store.update(|s| {
            s.remove_token(play_id, remove_id, js_sys::Date::now());
        });
        editor.update(|e| e.select(None));
        flash_status(editor, "Player removed");
    };

    view! {
        <div>
            <div class="token-editor__row">
                <span class="token-editor__label">"Shirt"</span>
                <input
                    class="token-editor__input"
                    type="text"
                    maxlength="4"
                    prop:value=token.label.clone()
                    on:input=on_label
                />
            </div>
            <div class="token-editor__row">
                <span class="token-editor__label">"Color"</span>
                <input
                    class="token-editor__color"
                    type="color"
                    prop:value=token.color.clone()
                    on:input=on_color
                />
            </div>
            <div class="token-editor__row">
                <span class="token-editor__label">"Role"</span>
                <span class="token-editor__meta">{kind_label}</span>
            </div>
            <div class="token-editor__row">
                <span class="token-editor__label">"Position"</span>
                <span class="token-editor__meta">
                    {format!("({:.0}, {:.0})", token.x, token.y)}
                </span>
            </div>
            {run_section}
            <div class="token-editor__actions">
                <button class="btn btn--danger" on:click=on_remove>
                    "Remove player"
                </button>
            </div>
        </div>
    }
}

#[component]
pub fn TokenEditor(play_id: PlayId) -> impl IntoView {
    let store = expect_context::<RwSignal<PlayStore>>();
    let editor = expect_context::<RwSignal<EditorState>>();

    let selected = Memo::new(move |_| {
        let selection = editor.with(|e| e.selection)?;
        store.with(|s| s.get(play_id).and_then(|p| p.token(selection)).cloned())
    });

    view! {
        <section class="token-editor">
            <h2 class="token-editor__title">"Player"</h2>
            {move || match selected.get() {
                Some(token) => token_form(store, editor, play_id, token).into_any(),
                None => {
                    view! {
                        <p class="token-editor__empty">"Press a player disc to select it."</p>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
