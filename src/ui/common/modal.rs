use super::message::ErrorMessage;
use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

#[cfg(not(feature = "ssr"))]
use leptos::wasm_bindgen::JsCast;

/// Base modal component with consistent structure
#[component]
pub fn BaseModal(
    /// Modal title
    #[prop(into)]
    title: Signal<String>,
    /// Optional subtitle/description
    #[prop(optional)]
    subtitle: Option<String>,
    /// Whether modal is open
    #[prop(into)]
    is_open: Signal<bool>,
    /// Callback to close modal
    on_close: Callback<()>,
    /// Modal content, rebuilt every time the modal opens
    children: ChildrenFn,
    /// Maximum width class (default: max-w-2xl)
    #[prop(default = "max-w-2xl")]
    max_width: &'static str,
    /// Whether clicking backdrop closes modal
    #[prop(default = true)]
    close_on_backdrop: bool,
) -> impl IntoView {
    // Close on Escape key
    #[cfg(not(feature = "ssr"))]
    {
        use leptos::ev::keydown;

        let handle_keydown = window_event_listener(keydown, move |ev| {
            if ev.key() == "Escape" && is_open.with_untracked(|v| *v) {
                on_close.run(());
            }
        });

        on_cleanup(move || drop(handle_keydown));
    }

    view! {
        <Show when=move || is_open.get()>
            <div
                class="modal-backdrop fixed inset-0 z-50 flex items-center justify-center bg-black/50 p-4"
                on:click=move |e| {
                    if close_on_backdrop {
                        #[cfg(not(feature = "ssr"))]
                        {
                            if let Some(element) = e.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok())
                                && element.class_list().contains("modal-backdrop")
                            {
                                on_close.run(());
                            }
                        }
                        #[cfg(feature = "ssr")]
                        {
                            let _ = e;
                        }
                    }
                }
            >
                <div class=format!("w-full {} card max-h-[90vh] overflow-y-auto", max_width)>
                    <div class="card-header">
                        <div>
                            <h3 class="title-lg">{move || title.get()}</h3>
                            {subtitle.clone().map(|s| view! { <p class="subtitle">{s}</p> })}
                        </div>
                        <button
                            class="btn-icon"
                            on:click=move |_| on_close.run(())
                            title="Close"
                            aria-label="Close modal"
                        >
                            <Icon name=icons::X class="w-5 h-5"/>
                        </button>
                    </div>

                    <div class="p-6">
                        {children()}
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// Confirmation dialog for destructive or state-changing actions.
///
/// The dialog stays open while `busy` is true; the caller closes it once
/// the server has confirmed.
#[component]
pub fn ConfirmDialog(
    /// Dialog title
    #[prop(into)]
    title: String,
    /// Dialog message
    #[prop(into)]
    message: Signal<String>,
    /// Whether dialog is open
    #[prop(into)]
    is_open: Signal<bool>,
    /// Callback when confirmed
    on_confirm: Callback<()>,
    /// Callback when cancelled
    on_cancel: Callback<()>,
    /// Confirm button text
    #[prop(default = "Confirm".to_string(), into)]
    confirm_text: String,
    /// Whether confirm action is destructive (uses danger button)
    #[prop(default = false)]
    is_destructive: bool,
    /// Request in flight; disables both buttons
    #[prop(optional, into)]
    busy: Signal<bool>,
    /// Failure from the last attempt
    #[prop(optional, into)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    let confirm_text = StoredValue::new(confirm_text);

    view! {
        <BaseModal
            title=title
            is_open=is_open
            on_close=on_cancel
            max_width="max-w-md"
        >
            <div class="space-y-4">
                <p class="text-gray-600">{move || message.get()}</p>

                <ErrorMessage error=error />

                <div class="flex items-center justify-end gap-2 border-t border-gray-200 pt-4">
                    <button
                        class="btn-secondary"
                        disabled=move || busy.get()
                        on:click=move |_| on_cancel.run(())
                    >
                        "Cancel"
                    </button>
                    <button
                        class=if is_destructive { "btn-danger" } else { "btn-primary" }
                        disabled=move || busy.get()
                        on:click=move |_| on_confirm.run(())
                    >
                        {move || if busy.get() { "Working...".to_string() } else { confirm_text.get_value() }}
                    </button>
                </div>
            </div>
        </BaseModal>
    }
}
