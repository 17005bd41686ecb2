//! Library card for one saved play: mini pitch preview, name and counts.

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::CanvasRenderingContext2d;

use std::f64::consts::PI;

use touchline::consts::{PITCH_HEIGHT, PITCH_WIDTH};
use touchline::doc::{Play, PlayId};

use crate::util::time::relative_age;

const PREVIEW_WIDTH: f64 = 220.0;
const PREVIEW_HEIGHT: f64 = 176.0;

/// Flat sketch of a play: green pitch, halfway line, one dot per token. The
/// full renderer wants an engine and a live viewport; cards only need a hint
/// of the shape.
fn draw_preview(canvas: &web_sys::HtmlCanvasElement, play: &Play) {
    let Ok(Some(obj)) = canvas.get_context("2d") else {
        return;
    };
    let Ok(ctx) = obj.dyn_into::<CanvasRenderingContext2d>() else {
        return;
    };

    ctx.set_fill_style_str("#2e7d46");
    ctx.fill_rect(0.0, 0.0, PREVIEW_WIDTH, PREVIEW_HEIGHT);

    ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
    ctx.set_line_width(1.0);
    ctx.begin_path();
    ctx.move_to(PREVIEW_WIDTH / 2.0, 0.0);
    ctx.line_to(PREVIEW_WIDTH / 2.0, PREVIEW_HEIGHT);
    ctx.stroke();

    let sx = PREVIEW_WIDTH / PITCH_WIDTH;
    let sy = PREVIEW_HEIGHT / PITCH_HEIGHT;
    for token in &play.tokens {
        ctx.set_fill_style_str(&token.color);
        ctx.begin_path();
        if ctx.arc(token.x * sx, token.y * sy, 4.0, 0.0, 2.0 * PI).is_ok() {
            ctx.fill();
        }
    }
}

#[component]
pub fn PlayCard(
    play: Play,
    on_duplicate: Callback<PlayId>,
    on_delete: Callback<PlayId>,
) -> impl IntoView {
    let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
    let play_id = play.id;
    let token_count = play.tokens.len();
    let run_count = play.tokens.iter().filter(|t| !t.run.is_empty()).count();
    let age = relative_age(play.updated_at_ms, js_sys::Date::now());
    let href = format!("/play/{play_id}");

    {
        let play = play.clone();
        Effect::new(move || {
            if let Some(canvas) = canvas_ref.get() {
                draw_preview(&canvas, &play);
            }
        });
    }

    view! {
        <article class="play-card">
            <a class="play-card__preview" href=href.clone()>
                <canvas width="220" height="176" node_ref=canvas_ref></canvas>
            </a>
            <div class="play-card__body">
                <a class="play-card__name" href=href>
                    {play.name.clone()}
                </a>
                <span class="play-card__meta">
                    {format!("{token_count} players, {run_count} runs, edited {age}")}
                </span>
                <div class="play-card__actions">
                    <button
                        class="play-card__action"
                        title="Duplicate play"
                        on:click=move |_| on_duplicate.run(play_id)
                    >
                        "\u{29c9}"
                    </button>
                    <button
                        class="play-card__action play-card__action--danger"
                        title="Delete play"
                        on:click=move |_| on_delete.run(play_id)
                    >
                        "\u{00d7}"
                    </button>
                </div>
            </div>
        </article>
    }
}
