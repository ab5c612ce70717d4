pub mod auth;
pub mod auth_utils;
pub mod chart;
pub mod common;
pub mod fetch;
pub mod icon;
pub mod notifications;
pub mod pages;
pub mod selection;
pub mod sidebar;
pub mod transport;
pub mod upload;
pub mod viewport;

pub use icon::{Icon, icons};
pub use sidebar::Sidebar;
