use contact_portal_client::App;
use leptos::*;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        ::log::Level::Debug
    } else {
        ::log::Level::Info
    };
    if let Err(error) = console_log::init_with_level(level) {
        warn!("Could not start logging. {error}");
    }
    mount_to_body(|cx| view! { cx, <App/> })
}
