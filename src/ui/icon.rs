use leptos::prelude::*;

#[component]
pub fn Icon(
    /// Icon name, without the `.svg` extension
    name: &'static str,
    /// CSS classes
    #[prop(default = "w-5 h-5")]
    class: &'static str,
) -> impl IntoView {
    let icon_path = format!("/icons/{}.svg", name);

    view! {
        <img
            src=icon_path
            class=class
            alt=name
            draggable=false
        />
    }
}

/// Icons shipped under `public/icons`
pub mod icons {
    pub const HOME: &str = "home";
    pub const BOOK: &str = "book";
    pub const ACTIVITY: &str = "activity";
    pub const TICKET: &str = "ticket";
    pub const USERS: &str = "users";
    pub const USER: &str = "user";
    pub const CHART: &str = "chart";
    pub const DOLLAR: &str = "dollar";
    pub const SETTINGS: &str = "settings";
    pub const LOGOUT: &str = "logout";
    pub const MENU: &str = "menu";
    pub const SEARCH: &str = "search";
    pub const PLUS: &str = "plus";
    pub const EDIT: &str = "edit";
    pub const TRASH: &str = "trash";
    pub const DOWNLOAD: &str = "download";
    pub const UPLOAD: &str = "upload";
    pub const CHECK: &str = "check";
    pub const X: &str = "x";
    pub const EYE: &str = "eye";
    pub const EYE_CLOSED: &str = "eye-closed";
    pub const CHEVRON_LEFT: &str = "chevron-left";
    pub const CHEVRON_RIGHT: &str = "chevron-right";
    pub const ALERT_CIRCLE: &str = "alert-circle";
    pub const DOCUMENT_TEXT: &str = "document-text";
}
