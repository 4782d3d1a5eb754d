mod api;
mod components;
mod scheduler;

use std::rc::Rc;

use common::config::BackendConfig;
use contact_portal_common::app::{AppState, ContactApp, View};
use leptos::*;
use leptos_meta::*;

pub use crate::{api::SupabaseClient, scheduler::TimeoutScheduler};
use crate::components::{AuthForm, ContactForm};

/// Controller shared by every event handler of the page
pub type AppHandle = Rc<ContactApp<SupabaseClient, TimeoutScheduler>>;

/// Classes of the page background
const PAGE_CLASS: &str = "min-h-screen bg-gradient-to-br from-blue-50 to-indigo-50 py-12 px-4 \
                          sm:px-6 lg:px-8";
/// Classes of the centered card holding either form
const CARD_CLASS: &str = "max-w-md mx-auto bg-white rounded-xl shadow-lg overflow-hidden";

#[component]
pub fn App(cx: Scope) -> impl IntoView {
    provide_meta_context(cx);

    let config = match BackendConfig::from_build_env() {
        Ok(config) => config,
        Err(error) => {
            log::error!("{error}");
            return view! { cx,
                <Title text="Contact Us"/>
                <div class=PAGE_CLASS>
                    <div class=CARD_CLASS>
                        <p class="px-6 py-8 text-red-600">
                            "The page is not configured correctly. " {error.to_string()}
                        </p>
                    </div>
                </div>
            }
            .into_view(cx);
        }
    };

    let (state, set_state) = create_signal(cx, AppState::default());
    let app: AppHandle = Rc::new(ContactApp::new(
        SupabaseClient::new(config),
        TimeoutScheduler,
        move |snapshot: &AppState| set_state.set(snapshot.clone()),
    ));

    {
        let app = app.clone();
        spawn_local(async move { app.init().await });
    }
    {
        let app = app.clone();
        on_cleanup(cx, move || app.teardown());
    }

    let view_kind = create_memo(cx, move |_| state.with(AppState::view));
    let page = move || match view_kind.get() {
        View::Auth => view! { cx, <AuthForm app=app.clone() state=state/> }.into_view(cx),
        View::Contact => view! { cx, <ContactForm app=app.clone() state=state/> }.into_view(cx),
    };

    view! { cx,
        <Title text="Contact Us"/>
        <div class=PAGE_CLASS>
            <div class=CARD_CLASS>
                <div class="px-6 py-8">{page}</div>
            </div>
        </div>
    }
    .into_view(cx)
}
