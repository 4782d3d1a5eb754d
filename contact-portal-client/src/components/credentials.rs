use contact_portal_common::{app::AppState, data::CredentialField};
use leptos::*;

use super::{
    NoticeBanner, INPUT_CLASS, LABEL_CLASS, PRIMARY_BUTTON_CLASS, SECONDARY_BUTTON_CLASS,
};
use crate::AppHandle;

/// Sign in / sign up form shown while there is no session
#[component]
pub fn AuthForm(cx: Scope, app: AppHandle, state: ReadSignal<AppState>) -> impl IntoView {
    let disabled = Signal::derive(cx, move || state.with(|s| s.auth_loading));
    let notice = Signal::derive(cx, move || state.with(|s| s.notice.clone()));

    let on_input = {
        let app = app.clone();
        move |field: CredentialField| {
            let app = app.clone();
            move |ev: ev::Event| app.update_credential(field, event_target_value(&ev))
        }
    };
    let sign_in = {
        let app = app.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            let app = app.clone();
            spawn_local(async move { app.sign_in().await });
        }
    };
    let sign_up = move |_: ev::MouseEvent| {
        let app = app.clone();
        spawn_local(async move { app.sign_up().await });
    };

    view! { cx,
        <div class="text-center mb-8">
            <h2 class="text-3xl font-bold text-gray-900">"Sign In"</h2>
            <p class="mt-2 text-gray-600">"Please sign in to submit a contact form"</p>
        </div>
        <NoticeBanner notice=notice/>
        <form class="space-y-6" on:submit=sign_in>
            <div>
                <label class=LABEL_CLASS for="auth-email">"Email"</label>
                <input
                    class=INPUT_CLASS
                    type="email"
                    id="auth-email"
                    required
                    placeholder="your@email.com"
                    prop:value=move || state.with(|s| s.credentials.email.clone())
                    on:input=on_input(CredentialField::Email)
                />
            </div>
            <div>
                <label class=LABEL_CLASS for="auth-password">"Password"</label>
                <input
                    class=INPUT_CLASS
                    type="password"
                    id="auth-password"
                    required
                    placeholder="••••••••"
                    prop:value=move || state.with(|s| s.credentials.password.clone())
                    on:input=on_input(CredentialField::Password)
                />
            </div>
            <div class="flex flex-col space-y-4">
                <button
                    class=PRIMARY_BUTTON_CLASS
                    type="submit"
                    prop:disabled=move || disabled.get()
                >
                    "Sign In"
                </button>
                <button
                    class=SECONDARY_BUTTON_CLASS
                    type="button"
                    prop:disabled=move || disabled.get()
                    on:click=sign_up
                >
                    "Sign Up"
                </button>
            </div>
        </form>
    }
}
