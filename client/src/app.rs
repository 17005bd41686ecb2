//! Application shell: global state, persistence and routing.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::{ParamSegment, StaticSegment};

use crate::pages::designer::DesignerPage;
use crate::pages::library::LibraryPage;
use crate::state::editor::EditorState;
use crate::state::plays::PlayStore;
use crate::util::storage;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let store = RwSignal::new(PlayStore::from_plays(storage::load_plays()));
    let editor = RwSignal::new(EditorState::default());
    provide_context(store);
    provide_context(editor);

    // Every store change lands in local storage, so the library survives
    // reloads without a save button.
    Effect::new(move || {
        store.with(|s| storage::save_plays(&s.plays));
    });

    view! {
        <Title text="Touchline" />
        <Router>
            <Routes fallback=|| view! { <p>"Page not found."</p> }>
                <Route path=StaticSegment("") view=LibraryPage />
                <Route path=(StaticSegment("play"), ParamSegment("id")) view=DesignerPage />
            </Routes>
        </Router>
    }
}
