use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Outlet, ParentRoute, Route, Router, Routes};
use leptos_router::path;

use crate::core::config::Config;
use crate::core::error::RENDER_FAILURE_MESSAGE;
use crate::ui::Sidebar;
use crate::ui::auth::{RequireAuth, provide_auth_context};
use crate::ui::notifications::{NotificationsContainer, provide_notifications};
use crate::ui::pages::{
    ActivitiesPage, CoursesPage, DashboardPage, InstructorsPage, LoginPage, MembershipsPage,
    NotFoundPage, RevenuePage, SettingsPage, StudentsPage, TicketContactPage,
};
use crate::ui::viewport::provide_viewport_context;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body class="bg-gray-50 text-gray-900">
                <App/>
            </body>
        </html>
    }
}

/// Sidebar plus the routed admin screen, behind the session gate
#[component]
fn AdminLayout() -> impl IntoView {
    view! {
        <RequireAuth>
            <div class="min-h-screen md:flex">
                <Sidebar/>
                <main class="flex-1 min-w-0">
                    <Outlet/>
                </main>
            </div>
        </RequireAuth>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let config = Config::bundled();
    provide_context(config.clone());
    provide_auth_context(&config);
    provide_notifications();
    provide_viewport_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/lms-admin.css"/>

        <Title text="LMS Admin Dashboard"/>

        <ErrorBoundary fallback=|errors| {
            errors.get().into_iter().for_each(|(_, err)| leptos::logging::error!("render failed: {err}"));
            view! {
                <div class="min-h-screen flex items-center justify-center p-6">
                    <p class="error-message">{RENDER_FAILURE_MESSAGE}</p>
                </div>
            }
        }>
            <Router>
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=path!("/login") view=LoginPage/>
                    <ParentRoute path=path!("") view=AdminLayout>
                        <Route path=path!("") view=DashboardPage/>
                        <Route path=path!("manage-courses") view=CoursesPage/>
                        <Route path=path!("track-activities") view=ActivitiesPage/>
                        <Route path=path!("ticket-contact") view=TicketContactPage/>
                        <Route path=path!("manage-instructor") view=InstructorsPage/>
                        <Route path=path!("manage-student") view=StudentsPage/>
                        <Route path=path!("memberships") view=MembershipsPage/>
                        <Route path=path!("revenues-report") view=RevenuePage/>
                        <Route path=path!("settings") view=SettingsPage/>
                    </ParentRoute>
                </Routes>
            </Router>
        </ErrorBoundary>

        <NotificationsContainer/>
    }
}
