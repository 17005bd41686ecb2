//! PNG export of the designer canvas.
//!
//! The canvas already holds the rendered play at device resolution, so export
//! is a data-URL snapshot handed to a temporary anchor element. Failure at any
//! step drops the export with a console warning.

use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

/// Builds a download name from a play name.
///
/// Keeps ASCII letters and digits (lowercased), folds everything else into
/// single dashes, and falls back to `play.png` when nothing usable survives.
#[must_use]
pub fn export_file_name(play_name: &str) -> String {
    let mut slug = String::new();
    for ch in play_name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "play.png".to_owned()
    } else {
        format!("{slug}.png")
    }
}

/// Snapshots the canvas bitmap and hands it to the browser as a download.
pub fn download_canvas_png(canvas: &HtmlCanvasElement, play_name: &str) {
    if try_download(canvas, play_name).is_none() {
        log::warn!("png export failed for {play_name:?}");
    }
}

fn try_download(canvas: &HtmlCanvasElement, play_name: &str) -> Option<()> {
    let url = canvas.to_data_url_with_type("image/png").ok()?;
    let document = web_sys::window()?.document()?;
    let anchor = document
        .create_element("a")
        .ok()?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .ok()?;
    anchor.set_href(&url);
    anchor.set_download(&export_file_name(play_name));
    anchor.click();
    Some(())
}

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;
