//! Canvas host component.
//!
//! Mounts [`Engine`] on the designer canvas, routes pointer and wheel events
//! through it, and applies the actions that come back to the page signals.
//! Batched drag updates arrive via [`Action::FrameRequested`]: the host
//! arranges exactly one animation-frame callback, coalescing repeated
//! requests, and delivers the flush against the play state current at flush
//! time.

use leptos::prelude::*;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use touchline::doc::PlayId;
use touchline::engine::{Action, Engine, Scene};

use crate::state::editor::EditorState;
use crate::state::plays::PlayStore;
use crate::util::input::{pointer_point, wheel_point};

type EngineCell = Rc<RefCell<Option<Engine>>>;

/// Run `f` against the live engine and the current scene. `None` when the
/// engine is unmounted or the play is gone.
fn with_scene<R>(
    engine: &EngineCell,
    store: RwSignal<PlayStore>,
    editor: RwSignal<EditorState>,
    play_id: PlayId,
    f: impl FnOnce(&mut Engine, Scene) -> R,
) -> Option<R> {
    let (selection, locked, show_grid) =
        editor.with_untracked(|e| (e.selection, e.locked, e.show_grid));
    store.with_untracked(|s| {
        let play = s.get(play_id)?;
        let mut guard = engine.borrow_mut();
        let eng = guard.as_mut()?;
        let scene = Scene { play, selection, locked, show_grid };
        Some(f(eng, scene))
    })
}

fn render_now(
    engine: &EngineCell,
    store: RwSignal<PlayStore>,
    editor: RwSignal<EditorState>,
    play_id: PlayId,
) {
    let _ = with_scene(engine, store, editor, play_id, |eng, scene| {
        let _ = eng.render(scene);
    });
}

/// Push the canvas CSS size and device pixel ratio into the engine. Resizing
/// the backing store clears the bitmap, so this only pushes on change.
fn sync_view(engine: &EngineCell, canvas_ref: NodeRef<leptos::html::Canvas>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(canvas) = canvas_ref.get() else {
        return;
    };
    let width = f64::from(canvas.client_width()).max(1.0);
    let height = f64::from(canvas.client_height()).max(1.0);
    let dpr = window.device_pixel_ratio().max(1.0);
    if let Some(eng) = engine.borrow_mut().as_mut() {
        let unchanged = (eng.core.view_width - width).abs() < 0.5
            && (eng.core.view_height - height).abs() < 0.5
            && (eng.core.dpr - dpr).abs() < f64::EPSILON;
        if !unchanged {
            eng.set_view_size(width, height, dpr);
        }
    }
}

/// Apply engine actions to the page. Token edits land in the store, which
/// persists and re-renders through the usual effects; cursor and frame
/// bookkeeping stay local to the host.
fn apply_actions(
    engine: &EngineCell,
    canvas_ref: NodeRef<leptos::html::Canvas>,
    store: RwSignal<PlayStore>,
    editor: RwSignal<EditorState>,
    play_id: PlayId,
    raf_pending: RwSignal<bool>,
    actions: Vec<Action>,
) {
    let mut should_render = false;
    for action in actions {
        match action {
            Action::Select(selection) => {
                editor.update(|e| e.select(selection));
            }
            Action::TokenUpdated(token) => {
                store.update(|s| {
                    s.apply_token(play_id, token, js_sys::Date::now());
                });
            }
            Action::FrameRequested => {
                schedule_flush(engine, canvas_ref, store, editor, play_id, raf_pending);
            }
            Action::SetCursor(cursor) => {
                if let Some(canvas) = canvas_ref.get() {
                    let _ = canvas.style().set_property("cursor", cursor);
                }
            }
            Action::RenderNeeded => should_render = true,
        }
    }
    if should_render {
        render_now(engine, store, editor, play_id);
    }
}

/// Arrange one animation-frame callback for the engine's batched samples.
/// Requests arriving before the frame fires coalesce on the guard signal;
/// without a window the flush runs inline so no update is lost.
fn schedule_flush(
    engine: &EngineCell,
    canvas_ref: NodeRef<leptos::html::Canvas>,
    store: RwSignal<PlayStore>,
    editor: RwSignal<EditorState>,
    play_id: PlayId,
    raf_pending: RwSignal<bool>,
) {
    if raf_pending.get_untracked() {
        return;
    }
    raf_pending.set(true);

    let Some(window) = web_sys::window() else {
        raf_pending.set(false);
        flush_now(engine, canvas_ref, store, editor, play_id, raf_pending);
        return;
    };

    let engine_for_cb = Rc::clone(engine);
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let cb = Closure::wrap(Box::new(move |_ts: f64| {
        raf_pending.set(false);
        flush_now(&engine_for_cb, canvas_ref, store, editor, play_id, raf_pending);
        holder_for_cb.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>);

    if window
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .is_ok()
    {
        *holder.borrow_mut() = Some(cb);
    } else {
        raf_pending.set(false);
        flush_now(engine, canvas_ref, store, editor, play_id, raf_pending);
    }
}

/// Deliver the engine's batched samples against the freshest play state.
fn flush_now(
    engine: &EngineCell,
    canvas_ref: NodeRef<leptos::html::Canvas>,
    store: RwSignal<PlayStore>,
    editor: RwSignal<EditorState>,
    play_id: PlayId,
    raf_pending: RwSignal<bool>,
) {
    let actions = with_scene(engine, store, editor, play_id, |eng, scene| {
        eng.flush_frame(scene)
    })
    .unwrap_or_default();
    apply_actions(engine, canvas_ref, store, editor, play_id, raf_pending, actions);
}

fn run_viewport_command(
    engine: &EngineCell,
    canvas_ref: NodeRef<leptos::html::Canvas>,
    store: RwSignal<PlayStore>,
    editor: RwSignal<EditorState>,
    play_id: PlayId,
    raf_pending: RwSignal<bool>,
    command: impl FnOnce(&mut Engine) -> Vec<Action>,
) {
    let actions = {
        let mut guard = engine.borrow_mut();
        let Some(eng) = guard.as_mut() else {
            return;
        };
        command(eng)
    };
    apply_actions(engine, canvas_ref, store, editor, play_id, raf_pending, actions);
}

/// Interactive pitch canvas for one play.
///
/// The page owns the play and the editor flags; this component owns the
/// engine and the frame loop.
#[component]
pub fn CanvasHost(play_id: PlayId) -> impl IntoView {
    let store = expect_context::<RwSignal<PlayStore>>();
    let editor = expect_context::<RwSignal<EditorState>>();
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let raf_pending = RwSignal::new(false);
    let engine: EngineCell = Rc::new(RefCell::new(None::<Engine>));

    {
        let engine = Rc::clone(&engine);
        Effect::new(move || {
            let Some(canvas) = canvas_ref.get() else {
                return;
            };
            if engine.borrow().is_some() {
                return;
            }
            *engine.borrow_mut() = Some(Engine::new(canvas));
            sync_view(&engine, canvas_ref);
            render_now(&engine, store, editor, play_id);
        });
    }

    {
        let engine = Rc::clone(&engine);
        Effect::new(move || {
            store.track();
            editor.track();
            sync_view(&engine, canvas_ref);
            render_now(&engine, store, editor, play_id);
        });
    }

    {
        let engine = Rc::clone(&engine);
        on_cleanup(move || {
            // Dropping the engine first: a frame callback still in flight
            // finds the cell empty and does nothing.
            if let Some(mut eng) = engine.borrow_mut().take() {
                eng.teardown();
            }
        });
    }

    let on_pointer_down = {
        let engine = Rc::clone(&engine);
        move |ev: leptos::ev::PointerEvent| {
            ev.prevent_default();
            if let Some(canvas) = canvas_ref.get() {
                let _ = canvas.set_pointer_capture(ev.pointer_id());
            }
            sync_view(&engine, canvas_ref);
            let point = pointer_point(&ev);
            let actions = with_scene(&engine, store, editor, play_id, |eng, scene| {
                eng.on_pointer_down(scene, ev.pointer_id(), point)
            })
            .unwrap_or_default();
            apply_actions(&engine, canvas_ref, store, editor, play_id, raf_pending, actions);
        }
    };

    let on_pointer_move = {
        let engine = Rc::clone(&engine);
        move |ev: leptos::ev::PointerEvent| {
            sync_view(&engine, canvas_ref);
            let point = pointer_point(&ev);
            let actions = with_scene(&engine, store, editor, play_id, |eng, scene| {
                eng.on_pointer_move(scene, ev.pointer_id(), point)
            })
            .unwrap_or_default();
            apply_actions(&engine, canvas_ref, store, editor, play_id, raf_pending, actions);
        }
    };

    let on_pointer_up = {
        let engine = Rc::clone(&engine);
        move |ev: leptos::ev::PointerEvent| {
            if let Some(canvas) = canvas_ref.get() {
                let _ = canvas.release_pointer_capture(ev.pointer_id());
            }
            sync_view(&engine, canvas_ref);
            let point = pointer_point(&ev);
            let actions = with_scene(&engine, store, editor, play_id, |eng, scene| {
                eng.on_pointer_up(scene, ev.pointer_id(), point)
            })
            .unwrap_or_default();
            apply_actions(&engine, canvas_ref, store, editor, play_id, raf_pending, actions);
        }
    };

    let on_pointer_cancel = {
        let engine = Rc::clone(&engine);
        move |ev: leptos::ev::PointerEvent| {
            let actions = {
                let mut guard = engine.borrow_mut();
                match guard.as_mut() {
                    Some(eng) => eng.on_pointer_cancel(ev.pointer_id()),
                    None => Vec::new(),
                }
            };
            apply_actions(&engine, canvas_ref, store, editor, play_id, raf_pending, actions);
        }
    };

    let on_wheel = {
        let engine = Rc::clone(&engine);
        move |ev: leptos::ev::WheelEvent| {
            ev.prevent_default();
            sync_view(&engine, canvas_ref);
            let point = wheel_point(&ev);
            let actions = {
                let mut guard = engine.borrow_mut();
                match guard.as_mut() {
                    Some(eng) => eng.on_wheel(point, ev.delta_y()),
                    None => Vec::new(),
                }
            };
            apply_actions(&engine, canvas_ref, store, editor, play_id, raf_pending, actions);
        }
    };

    let on_zoom_in = {
        let engine = Rc::clone(&engine);
        move |_ev: leptos::ev::MouseEvent| {
            run_viewport_command(
                &engine,
                canvas_ref,
                store,
                editor,
                play_id,
                raf_pending,
                Engine::zoom_in,
            );
        }
    };
    let on_zoom_out = {
        let engine = Rc::clone(&engine);
        move |_ev: leptos::ev::MouseEvent| {
            run_viewport_command(
                &engine,
                canvas_ref,
                store,
                editor,
                play_id,
                raf_pending,
                Engine::zoom_out,
            );
        }
    };
    let on_reset_view = {
        let engine = Rc::clone(&engine);
        move |_ev: leptos::ev::MouseEvent| {
            run_viewport_command(
                &engine,
                canvas_ref,
                store,
                editor,
                play_id,
                raf_pending,
                Engine::reset_viewport,
            );
        }
    };

    view! {
        <div class="canvas-host">
            <canvas
                id="designer-canvas"
                class="canvas-host__canvas"
                node_ref=canvas_ref
                on:pointerdown=on_pointer_down
                on:pointermove=on_pointer_move
                on:pointerup=on_pointer_up
                on:pointercancel=on_pointer_cancel
                on:wheel=on_wheel
            ></canvas>
            <div class="canvas-host__zoom">
                <button class="btn" title="Zoom in" on:click=on_zoom_in>
                    "+"
                </button>
                <button class="btn" title="Zoom out" on:click=on_zoom_out>
                    "\u{2212}"
                </button>
                <button class="btn" title="Whole pitch" on:click=on_reset_view>
                    "Fit"
                </button>
            </div>
        </div>
    }
}
