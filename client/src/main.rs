use leptos::prelude::*;

use touchline_client::app::App;

pub fn main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(|| view! { <App/> });
}
