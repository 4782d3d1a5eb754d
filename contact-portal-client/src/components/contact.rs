use contact_portal_common::{app::AppState, data::FormField};
use leptos::*;

use super::{NoticeBanner, INPUT_CLASS, LABEL_CLASS, PRIMARY_BUTTON_CLASS};
use crate::AppHandle;

/// Single line input bound to one contact field
#[component]
fn ContactInput(
    cx: Scope,
    app: AppHandle,
    state: ReadSignal<AppState>,
    field: FormField,
    input_type: &'static str,
    placeholder: &'static str,
    #[prop(optional)] pattern: Option<&'static str>,
    #[prop(optional)] title: Option<&'static str>,
) -> impl IntoView {
    let id = format!("contact-{}", field.input_name());
    view! { cx,
        <div>
            <label class=LABEL_CLASS for=id.clone()>{field.label()}</label>
            <input
                class=INPUT_CLASS
                type=input_type
                id=id
                name=field.input_name()
                required
                pattern=pattern
                title=title
                placeholder=placeholder
                prop:value=move || state.with(|s| s.form.get(field).to_owned())
                on:input=move |ev| app.update_field(field, event_target_value(&ev))
            />
        </div>
    }
}

/// Contact form shown to a signed in user, with the sign out control and thank-you message
#[component]
pub fn ContactForm(cx: Scope, app: AppHandle, state: ReadSignal<AppState>) -> impl IntoView {
    let notice = Signal::derive(cx, move || state.with(|s| s.notice.clone()));
    let submitted = create_memo(cx, move |_| state.with(AppState::is_submitted));
    let submitting = Signal::derive(cx, move || state.with(AppState::is_submitting));

    let sign_out = {
        let app = app.clone();
        move |_: ev::MouseEvent| {
            let app = app.clone();
            spawn_local(async move { app.sign_out().await });
        }
    };

    let form = move || {
        if submitted.get() {
            return view! { cx,
                <div class="bg-green-50 p-4 rounded-lg text-center">
                    <p class="text-green-600 font-medium">"Thank you for your message!"</p>
                    <p class="text-green-500 text-sm mt-1">"We'll get back to you soon."</p>
                </div>
            }
            .into_view(cx);
        }
        let on_submit = {
            let app = app.clone();
            move |ev: ev::SubmitEvent| {
                ev.prevent_default();
                let app = app.clone();
                spawn_local(async move { app.submit().await });
            }
        };
        let on_message = {
            let app = app.clone();
            move |ev: ev::Event| app.update_field(FormField::Message, event_target_value(&ev))
        };
        view! { cx,
            <form class="space-y-6" on:submit=on_submit>
                <ContactInput app=app.clone() state=state field=FormField::Name
                    input_type="text" placeholder="John Doe"/>
                <ContactInput app=app.clone() state=state field=FormField::RollNumber
                    input_type="text" placeholder="123456"
                    pattern="[0-9]{6}" title="Please enter a 6-digit roll number"/>
                <ContactInput app=app.clone() state=state field=FormField::Email
                    input_type="email" placeholder="john@example.com"/>
                <ContactInput app=app.clone() state=state field=FormField::Phone
                    input_type="tel" placeholder="(123) 456-7890"/>
                <ContactInput app=app.clone() state=state field=FormField::Address
                    input_type="text" placeholder="123 Main St, City, Country"/>
                <div>
                    <label class="block text-sm font-medium text-gray-700 mb-1"
                        for="contact-message">"Message"</label>
                    <textarea
                        class=INPUT_CLASS
                        id="contact-message"
                        name=FormField::Message.input_name()
                        required
                        rows="4"
                        placeholder="Your message here..."
                        prop:value=move || state.with(|s| s.form.message.clone())
                        on:input=on_message
                    ></textarea>
                </div>
                <button
                    class=PRIMARY_BUTTON_CLASS
                    type="submit"
                    prop:disabled=move || submitting.get()
                >
                    {move || if submitting.get() { "Sending..." } else { "Send Message" }}
                </button>
            </form>
        }
        .into_view(cx)
    };

    view! { cx,
        <div class="flex justify-between items-center mb-8">
            <div>
                <h2 class="text-3xl font-bold text-gray-900">"Contact Us"</h2>
                <p class="mt-2 text-gray-600">"We'd love to hear from you!"</p>
            </div>
            <button class="text-sm text-gray-500 hover:text-gray-700" on:click=sign_out>
                "Sign Out"
            </button>
        </div>
        <NoticeBanner notice=notice/>
        {form}
    }
}
