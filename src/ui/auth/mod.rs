//! Authentication UI module
//!
//! Session context, the login form and the route gate for admin screens.

mod context;
mod guard;
mod login_form;

pub use context::{AuthContext, login, provide_auth_context, use_auth_context};
pub use guard::RequireAuth;
pub use login_form::LoginForm;
