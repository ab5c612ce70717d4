//! Common reusable UI components
//!
//! Building blocks shared by every admin screen: modals, form fields,
//! status badges, pagination, debounced search and the list state view.

pub mod avatar;
pub mod badge;
pub mod data_view;
pub mod detail;
pub mod form;
pub mod message;
pub mod modal;
pub mod pagination;
pub mod search;
pub mod spinner;

pub use avatar::Avatar;
pub use badge::StatusBadge;
pub use data_view::DataView;
pub use detail::Detail;
pub use form::{Binding, CheckboxField, FormField, SelectField, TextAreaField, bind};
pub use message::{ErrorMessage, SuccessMessage};
pub use modal::{BaseModal, ConfirmDialog};
pub use pagination::Pagination;
pub use search::SearchInput;
pub use spinner::{LoadingSpinner, Spinner, SpinnerSize};
