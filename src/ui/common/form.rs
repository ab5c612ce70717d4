use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

#[component]
fn FieldError(error: Option<Signal<Option<String>>>) -> impl IntoView {
    move || {
        error.and_then(|e| e.get()).map(|err| {
            view! {
                <div class="flex items-center text-sm text-red-600">
                    <Icon name=icons::ALERT_CIRCLE class="w-4 h-4 mr-1"/>
                    <span>{err}</span>
                </div>
            }
        })
    }
}

/// Generic form field component with label and input
#[component]
pub fn FormField(
    /// Field label text
    #[prop(into)]
    label: String,
    /// Whether field is required (shows red asterisk)
    #[prop(default = false)]
    required: bool,
    /// Input type (text, password, email, etc.)
    #[prop(default = "text")]
    input_type: &'static str,
    /// Placeholder text
    #[prop(default = String::new(), into)]
    placeholder: String,
    /// Current value signal
    #[prop(into)]
    value: Signal<String>,
    /// Input event callback
    on_input: Callback<String>,
    /// Whether field is disabled
    #[prop(optional, into)]
    disabled: Signal<bool>,
    /// Optional error message to display
    #[prop(optional)]
    error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div class="space-y-1.5">
            <label class="label">
                {label}
                {required.then(|| view! { <span class="text-red-500 ml-0.5">"*"</span> })}
            </label>
            <input
                type=input_type
                class="input-base"
                class:border-red-500=move || error.and_then(|e| e.get()).is_some()
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                disabled=move || disabled.get()
            />
            <FieldError error=error />
        </div>
    }
}

/// Text area form field component
#[component]
pub fn TextAreaField(
    /// Field label text
    #[prop(into)]
    label: String,
    /// Whether field is required (shows red asterisk)
    #[prop(default = false)]
    required: bool,
    /// Placeholder text
    #[prop(default = String::new(), into)]
    placeholder: String,
    /// Current value signal
    #[prop(into)]
    value: Signal<String>,
    /// Input event callback
    on_input: Callback<String>,
    /// Number of rows
    #[prop(default = 3)]
    rows: u32,
    /// Whether field is disabled
    #[prop(optional, into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="space-y-1.5">
            <label class="label">
                {label}
                {required.then(|| view! { <span class="text-red-500 ml-0.5">"*"</span> })}
            </label>
            <textarea
                class="input-base resize-none"
                placeholder=placeholder
                rows=rows
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                disabled=move || disabled.get()
            />
        </div>
    }
}

/// Select/dropdown form field component
#[component]
pub fn SelectField(
    /// Field label text
    #[prop(into)]
    label: String,
    /// Current value signal
    #[prop(into)]
    value: Signal<String>,
    /// Change event callback
    on_change: Callback<String>,
    /// Options as (value, display_text) pairs
    options: Vec<(String, String)>,
    /// Whether field is disabled
    #[prop(optional, into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="space-y-1.5">
            <label class="label">{label}</label>
            <select
                class="select-base"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
                disabled=move || disabled.get()
            >
                {options.into_iter().map(|(val, text)| {
                    view! { <option value=val>{text}</option> }
                }).collect_view()}
            </select>
        </div>
    }
}

/// Checkbox form field component
#[component]
pub fn CheckboxField(
    /// Field label text
    #[prop(into)]
    label: String,
    /// Current checked state
    #[prop(into)]
    checked: Signal<bool>,
    /// Change event callback
    on_change: Callback<bool>,
    /// Optional description text below checkbox
    #[prop(optional)]
    description: Option<String>,
) -> impl IntoView {
    view! {
        <div class="flex items-start gap-3">
            <input
                type="checkbox"
                class="mt-1 w-4 h-4 rounded border-gray-300 text-indigo-600 focus:ring-2 focus:ring-indigo-500"
                prop:checked=move || checked.get()
                on:change=move |ev| on_change.run(event_target_checked(&ev))
            />
            <div class="flex-1">
                <label class="label cursor-pointer">{label}</label>
                {description.map(|desc| view! {
                    <p class="text-sm text-gray-500 mt-0.5">{desc}</p>
                })}
            </div>
        </div>
    }
}

/// Two-way binding between a text input and one field of a form signal.
#[derive(Clone, Copy)]
pub struct Binding {
    pub value: Signal<String>,
    pub on_input: Callback<String>,
}

/// Bind the field reached by `read`/`write` on `form`.
///
/// ```ignore
/// let email = bind(form, |f| &f.email, |f, v| f.email = v);
/// view! { <FormField label="Email" value=email.value on_input=email.on_input /> }
/// ```
pub fn bind<F: Send + Sync + 'static>(
    form: RwSignal<F>,
    read: fn(&F) -> &String,
    write: fn(&mut F, String),
) -> Binding {
    Binding {
        value: Signal::derive(move || form.with(|f| read(f).clone())),
        on_input: Callback::new(move |value| form.update(|f| write(f, value))),
    }
}
