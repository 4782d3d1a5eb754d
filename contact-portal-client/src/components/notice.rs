use contact_portal_common::app::Notice;
use leptos::*;

#[component]
pub fn NoticeBanner(cx: Scope, notice: Signal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|notice| {
            let (box_class, text_class) = if notice.is_error() {
                ("bg-red-50 p-4 rounded-lg text-center mb-6", "text-red-600 font-medium")
            } else {
                ("bg-blue-50 p-4 rounded-lg text-center mb-6", "text-blue-600 font-medium")
            };
            view! { cx,
                <div class=box_class role="alert">
                    <p class=text_class>{notice.message().to_owned()}</p>
                </div>
            }
        })
    }
}
