//! Advisory review panel.
//!
//! Notes come from the optional coach-notes service; every failure collapses
//! to the fixed fallback line inside the API client, so the panel only deals
//! in text. Reviews run on demand: the snapshot is taken when the button is
//! pressed, not on every edit.

use leptos::prelude::*;

use touchline::doc::PlayId;

use crate::net::api;
use crate::state::plays::PlayStore;

#[component]
pub fn NotesPanel(play_id: PlayId) -> impl IntoView {
    let store = expect_context::<RwSignal<PlayStore>>();
    let requested = RwSignal::new(0_u64);

    let notes = LocalResource::new(move || {
        let seq = requested.get();
        let play = store.with_untracked(|s| s.get(play_id).cloned());
        async move {
            if seq == 0 {
                return None;
            }
            let play = play?;
            Some(api::fetch_coach_notes(&play).await)
        }
    });

    view! {
        <section class="notes-panel">
            <div class="notes-panel__header">
                <h2 class="notes-panel__title">"Coach notes"</h2>
                <button class="btn" on:click=move |_| requested.update(|n| *n += 1)>
                    "Review"
                </button>
            </div>
            <Suspense fallback=move || {
                view! { <p class="notes-panel__hint">"Reviewing..."</p> }
            }>
                {move || {
                    notes
                        .get()
                        .map(|outcome| match outcome {
                            None => {
                                view! {
                                    <p class="notes-panel__hint">
                                        "Run a review for quick feedback on the shape."
                                    </p>
                                }
                                    .into_any()
                            }
                            Some(text) => {
                                view! { <p class="notes-panel__body">{text}</p> }.into_any()
                            }
                        })
                }}
            </Suspense>
        </section>
    }
}
