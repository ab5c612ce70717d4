use leptos::prelude::*;

/// Spinner size options
#[derive(Clone, Copy, PartialEq)]
pub enum SpinnerSize {
    Small,
    Medium,
    Large,
}

impl SpinnerSize {
    fn class(&self) -> &'static str {
        match self {
            SpinnerSize::Small => "w-4 h-4 border-2",
            SpinnerSize::Medium => "w-8 h-8 border-4",
            SpinnerSize::Large => "w-12 h-12 border-4",
        }
    }
}

/// Loading spinner component
#[component]
pub fn Spinner(
    /// Spinner size
    #[prop(default = SpinnerSize::Medium)]
    size: SpinnerSize,
) -> impl IntoView {
    view! {
        <div
            class=format!("{} animate-spin rounded-full border-indigo-200 border-t-indigo-600", size.class())
            role="status"
            aria-label="Loading"
        ></div>
    }
}

/// Centered spinner with a caption, used for whole-panel loading states
#[component]
pub fn LoadingSpinner(
    /// Text under the spinner
    #[prop(default = "Loading...")]
    message: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center gap-3 py-12">
            <Spinner size=SpinnerSize::Large />
            <p class="text-sm text-gray-500">{message}</p>
        </div>
    }
}
