//! Play library: every saved play as a card, most recently edited first.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use touchline::doc::PlayId;

use crate::components::play_card::PlayCard;
use crate::state::plays::PlayStore;

#[component]
fn CreatePlayDialog(on_create: Callback<String>, on_cancel: Callback<()>) -> impl IntoView {
    let name = RwSignal::new(String::new());

    let submit = move || {
        let value = name.with_untracked(|n| n.trim().to_owned());
        if value.is_empty() {
            return;
        }
        on_create.run(value);
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=|ev| ev.stop_propagation()>
                <h2>"New play"</h2>
                <label class="dialog__label" for="play-name">
                    "Name"
                </label>
                <input
                    id="play-name"
                    class="dialog__input"
                    type="text"
                    placeholder="e.g. Short corner left"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            submit();
                        }
                    }
                />
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| submit()>
                        "Create"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn LibraryPage() -> impl IntoView {
    let store = expect_context::<RwSignal<PlayStore>>();
    let navigate = use_navigate();
    let show_create = RwSignal::new(false);

    let plays = Memo::new(move |_| store.with(PlayStore::recent_first));

    let on_create = {
        let navigate = navigate.clone();
        Callback::new(move |name: String| {
            let mut created = None;
            store.update(|s| created = Some(s.create(&name, js_sys::Date::now())));
            show_create.set(false);
            if let Some(id) = created {
                navigate(&format!("/play/{id}"), NavigateOptions::default());
            }
        })
    };
    let on_cancel = Callback::new(move |()| show_create.set(false));
    let on_duplicate = Callback::new(move |id: PlayId| {
        store.update(|s| {
            s.duplicate(id, js_sys::Date::now());
        });
    });
    let on_delete = Callback::new(move |id: PlayId| {
        store.update(|s| {
            s.remove(id);
        });
    });

    view! {
        <main class="library-page">
            <header class="library-page__header">
                <div>
                    <h1>"Touchline"</h1>
                    <p class="library-page__tagline">
                        "Design set pieces your squad can actually read."
                    </p>
                </div>
                <button class="btn btn--primary" on:click=move |_| show_create.set(true)>
                    "+ New play"
                </button>
            </header>
            <Show when=move || show_create.get()>
                <CreatePlayDialog on_create=on_create on_cancel=on_cancel />
            </Show>
            <Show
                when=move || !plays.get().is_empty()
                fallback=|| {
                    view! {
                        <p class="library-page__empty">
                            "No plays yet. Create one to start sketching."
                        </p>
                    }
                }
            >
                <div class="library-page__cards">
                    <For
                        each=move || plays.get()
                        key=|play| play.id
                        children=move |play| {
                            view! {
                                <PlayCard play=play on_duplicate=on_duplicate on_delete=on_delete />
                            }
                        }
                    />
                </div>
            </Show>
        </main>
    }
}
