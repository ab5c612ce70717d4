//! Admin navigation: section links, the signed-in admin and logout.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::{use_location, use_navigate};

use crate::ui::auth::use_auth_context;
use crate::ui::icon::{Icon, icons};

/// One entry of the navigation list
struct NavItem {
    href: &'static str,
    label: &'static str,
    icon: &'static str,
}

const NAV_ITEMS: [NavItem; 9] = [
    NavItem { href: "/", label: "Dashboard", icon: icons::HOME },
    NavItem { href: "/manage-courses", label: "Manage Courses", icon: icons::BOOK },
    NavItem { href: "/track-activities", label: "Track Activities", icon: icons::ACTIVITY },
    NavItem { href: "/ticket-contact", label: "Tickets & Contacts", icon: icons::TICKET },
    NavItem { href: "/manage-instructor", label: "Instructors", icon: icons::USER },
    NavItem { href: "/manage-student", label: "Students", icon: icons::USERS },
    NavItem { href: "/memberships", label: "Memberships", icon: icons::CHART },
    NavItem { href: "/revenues-report", label: "Revenue", icon: icons::DOLLAR },
    NavItem { href: "/settings", label: "Settings", icon: icons::SETTINGS },
];

/// `/` only matches itself; other entries also match their sub-paths
fn is_active(href: &str, pathname: &str) -> bool {
    if href == "/" {
        pathname == "/"
    } else {
        pathname == href || pathname.starts_with(&format!("{href}/"))
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();
    let location = use_location();
    let (is_open, set_is_open) = signal(false);

    // close the drawer after navigating on narrow screens
    Effect::new(move |_| {
        location.pathname.track();
        set_is_open.set(false);
    });

    let user_name = move || auth.user().map(|u| u.full_name()).unwrap_or_default();
    let user_email = move || auth.user().map(|u| u.email).unwrap_or_default();
    let initials = move || auth.user().map(|u| u.initials()).unwrap_or_default();

    let on_logout = move |_| {
        auth.logout();
        navigate("/login", Default::default());
    };

    let links = NAV_ITEMS
        .iter()
        .map(|item| {
            let href = item.href;
            let link_class = move || {
                if is_active(href, &location.pathname.get()) {
                    "flex items-center gap-3 px-3 py-2 rounded-lg bg-indigo-50 text-indigo-700 font-medium"
                } else {
                    "flex items-center gap-3 px-3 py-2 rounded-lg text-gray-600 hover:bg-gray-100"
                }
            };
            view! {
                <li>
                    <A href=href attr:class=link_class>
                        <Icon name=item.icon class="w-5 h-5"/>
                        <span>{item.label}</span>
                    </A>
                </li>
            }
        })
        .collect_view();

    view! {
        // mobile header with the drawer toggle
        <div class="md:hidden flex items-center justify-between px-4 py-3 bg-white border-b border-gray-200">
            <span class="font-semibold text-gray-900">"LMS Admin"</span>
            <button
                class="btn-icon"
                aria-label="Toggle navigation"
                on:click=move |_| set_is_open.update(|open| *open = !*open)
            >
                <Icon name=icons::MENU class="w-6 h-6"/>
            </button>
        </div>

        <aside class=move || {
            let base = "fixed md:sticky top-0 left-0 z-40 h-screen w-64 flex flex-col bg-white border-r border-gray-200 transition-transform md:translate-x-0";
            if is_open.get() { format!("{base} translate-x-0") } else { format!("{base} -translate-x-full") }
        }>
            <div class="px-6 py-5 border-b border-gray-100">
                <span class="text-lg font-bold text-indigo-700">"LMS Admin"</span>
            </div>

            <nav class="flex-1 overflow-y-auto px-3 py-4" aria-label="Main">
                <ul class="space-y-1">{links}</ul>
            </nav>

            <div class="border-t border-gray-100 p-4 flex items-center gap-3">
                <div class="w-9 h-9 rounded-full bg-indigo-600 text-white flex items-center justify-center text-sm font-semibold">
                    {initials}
                </div>
                <div class="flex-1 min-w-0">
                    <p class="text-sm font-medium text-gray-900 truncate">{user_name}</p>
                    <p class="text-xs text-gray-500 truncate">{user_email}</p>
                </div>
                <button class="btn-icon" title="Log out" aria-label="Log out" on:click=on_logout>
                    <Icon name=icons::LOGOUT class="w-5 h-5"/>
                </button>
            </div>
        </aside>

        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-30 bg-black/30 md:hidden" on:click=move |_| set_is_open.set(false)></div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_link_matches_only_root() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/", "/settings"));
    }

    #[test]
    fn test_section_link_matches_sub_paths() {
        assert!(is_active("/manage-courses", "/manage-courses"));
        assert!(is_active("/manage-courses", "/manage-courses/42"));
        assert!(!is_active("/manage-courses", "/manage-course"));
    }
}
