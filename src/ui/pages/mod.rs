//! Application pages module
//!
//! One component per route. Tickets and contacts share the support page.

mod activities;
mod contacts;
mod courses;
mod dashboard;
mod enrollments;
mod instructors;
mod login;
mod memberships;
mod not_found;
mod revenue;
mod settings;
mod students;
mod support;
mod tickets;

pub use activities::ActivitiesPage;
pub use courses::CoursesPage;
pub use dashboard::DashboardPage;
pub use instructors::InstructorsPage;
pub use login::LoginPage;
pub use memberships::MembershipsPage;
pub use not_found::NotFoundPage;
pub use revenue::RevenuePage;
pub use settings::SettingsPage;
pub use students::StudentsPage;
pub use support::TicketContactPage;
