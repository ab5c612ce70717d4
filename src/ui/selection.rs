//! The record a page has opened in a modal.

use leptos::prelude::*;

use crate::ui::auth::use_auth_context;

/// Selected item for a details or edit modal.
///
/// Created with the page, cleared when the page unmounts or the session
/// ends, so a modal never outlives the data it was opened for.
pub struct Selection<T: Send + Sync + 'static>(RwSignal<Option<T>>);

impl<T: Send + Sync + 'static> Clone for Selection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for Selection<T> {}

impl<T: Clone + Send + Sync + 'static> Selection<T> {
    pub fn select(&self, item: T) {
        self.0.set(Some(item));
    }

    pub fn clear(&self) {
        self.0.try_set(None);
    }

    pub fn get(&self) -> Option<T> {
        self.0.get()
    }

    pub fn get_untracked(&self) -> Option<T> {
        self.0.get_untracked()
    }

    pub fn is_open(&self) -> bool {
        self.0.with(Option::is_some)
    }

    /// Edit the selected item in place, e.g. after a save.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.0.update(|selected| {
            if let Some(item) = selected.as_mut() {
                f(item);
            }
        });
    }

    /// Read a field of the selection, or `default` when nothing is open.
    pub fn map_or<U>(&self, default: U, f: impl FnOnce(&T) -> U) -> U {
        self.0.with(|selected| selected.as_ref().map(f).unwrap_or(default))
    }
}

pub fn use_selection<T: Clone + Send + Sync + 'static>() -> Selection<T> {
    let selection = Selection(RwSignal::new(None));
    let auth = use_auth_context();

    Effect::new(move |_| {
        if !auth.session.with(|s| s.is_authenticated()) {
            selection.clear();
        }
    });
    on_cleanup(move || selection.clear());

    selection
}
