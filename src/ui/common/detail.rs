use leptos::prelude::*;

/// One label/value pair of a details modal
#[component]
pub fn Detail(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div>
            <dt class="text-gray-500">{label}</dt>
            <dd class="font-medium text-gray-800 break-words">{value}</dd>
        </div>
    }
}
