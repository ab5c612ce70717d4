//! State machine behind every data-backed screen.
//!
//! A fetch goes `Idle → Loading → (Success | Error)`. Each start hands out a
//! [`Generation`]; results carrying an older generation are dropped so a
//! slow response can never overwrite a newer one.

use super::error::{ApiError, EMPTY_RESULTS_MESSAGE};
use super::listing::{PageWindow, Searchable, filter_items};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Ticket identifying one fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// What a resolved fetch did to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Newer data replaced the old.
    Applied,
    /// The fetch failed; the session must be dropped if `requires_login`.
    Failed { requires_login: bool },
    /// A newer fetch started meanwhile; nothing changed.
    Stale,
}

/// Which of the mutually exclusive views to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Error(String),
    Empty,
    Ready,
}

impl ViewState {
    /// Priority: loading, then error, then empty, then data.
    pub fn resolve(loading: bool, error: Option<&str>, is_empty: bool) -> Self {
        if loading {
            Self::Loading
        } else if let Some(message) = error {
            Self::Error(message.to_string())
        } else if is_empty {
            Self::Empty
        } else {
            Self::Ready
        }
    }

    pub fn empty_message() -> &'static str {
        EMPTY_RESULTS_MESSAGE
    }
}

/// A loaded payload that may still have nothing to draw, such as a report
/// with zero buckets.
pub trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for u64 {
    fn is_blank(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Lifecycle {
    phase: FetchPhase,
    generation: u64,
}

impl Lifecycle {
    fn start(&mut self) -> Generation {
        self.generation += 1;
        self.phase = FetchPhase::Loading;
        Generation(self.generation)
    }

    /// Bump the generation without starting a fetch; anything in flight
    /// becomes stale.
    fn invalidate(&mut self) {
        self.generation += 1;
    }

    fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.generation
    }
}

/// One page of results plus the backend's total count.
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> From<Vec<T>> for Paged<T> {
    fn from(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

/// Rows of a client-side paginated screen after search and slicing.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientPage<T> {
    pub rows: Vec<T>,
    pub window: PageWindow,
}

/// Model for a list screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewModel<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub search_term: String,
    pub page: usize,
    /// Total reported by the backend for server-side pagination.
    pub total: usize,
    lifecycle: Lifecycle,
}

impl<T> Default for ListViewModel<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            search_term: String::new(),
            page: 1,
            total: 0,
            lifecycle: Lifecycle::default(),
        }
    }
}

impl<T> ListViewModel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FetchPhase {
        self.lifecycle.phase
    }

    /// Start a fetch. Without a token the model goes straight to the error
    /// state and `None` is returned; no request may be sent.
    pub fn begin(&mut self, has_token: bool) -> Option<Generation> {
        if !has_token {
            self.lifecycle.invalidate();
            self.lifecycle.phase = FetchPhase::Error;
            self.loading = false;
            self.error = Some(ApiError::MissingToken.user_message(""));
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(self.lifecycle.start())
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.lifecycle.is_current(generation)
    }

    /// Apply a result. On error the previous items stay in place.
    pub fn resolve(
        &mut self,
        generation: Generation,
        result: Result<Paged<T>, ApiError>,
        fallback: &str,
    ) -> Resolution {
        if !self.is_current(generation) {
            return Resolution::Stale;
        }
        self.loading = false;
        match result {
            Ok(paged) => {
                self.items = paged.items;
                self.total = paged.total;
                self.error = None;
                self.lifecycle.phase = FetchPhase::Success;
                Resolution::Applied
            }
            Err(ApiError::Cancelled) => {
                self.lifecycle.phase = FetchPhase::Idle;
                Resolution::Stale
            }
            Err(err) => {
                self.error = Some(err.user_message(fallback));
                self.lifecycle.phase = FetchPhase::Error;
                Resolution::Failed {
                    requires_login: err.requires_login(),
                }
            }
        }
    }

    /// Changing the search term returns to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Insert a record created on the server at the top of the list.
    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
        self.total += 1;
    }

    /// Apply `update` to the first item matching `predicate`.
    pub fn update_where(&mut self, predicate: impl Fn(&T) -> bool, update: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|item| predicate(item)) {
            Some(item) => {
                update(item);
                true
            }
            None => false,
        }
    }

    pub fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> bool {
        let before = self.items.len();
        self.items.retain(|item| !predicate(item));
        let removed = before - self.items.len();
        self.total = self.total.saturating_sub(removed);
        removed > 0
    }

    /// View state for `visible` rows after filtering.
    pub fn view_state(&self, visible: usize) -> ViewState {
        ViewState::resolve(self.loading, self.error.as_deref(), visible == 0)
    }
}

impl<T: Searchable + Clone> ListViewModel<T> {
    /// Items matching the current search term.
    pub fn filtered(&self) -> Vec<T> {
        filter_items(&self.items, &self.search_term)
    }

    /// Search, then slice the current page.
    pub fn client_page(&self, page_size: usize) -> ClientPage<T> {
        let matched = self.filtered();
        let window = PageWindow::new(self.page, page_size, matched.len());
        ClientPage {
            rows: window.slice(&matched).to_vec(),
            window,
        }
    }
}

/// Model for a screen backed by a single payload (a report, a profile).
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    lifecycle: Lifecycle,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            lifecycle: Lifecycle::default(),
        }
    }
}

impl<T> ResourceState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FetchPhase {
        self.lifecycle.phase
    }

    pub fn begin(&mut self, has_token: bool) -> Option<Generation> {
        if !has_token {
            self.lifecycle.invalidate();
            self.lifecycle.phase = FetchPhase::Error;
            self.loading = false;
            self.error = Some(ApiError::MissingToken.user_message(""));
            return None;
        }
        self.loading = true;
        self.error = None;
        Some(self.lifecycle.start())
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.lifecycle.is_current(generation)
    }

    pub fn resolve(
        &mut self,
        generation: Generation,
        result: Result<T, ApiError>,
        fallback: &str,
    ) -> Resolution {
        if !self.is_current(generation) {
            return Resolution::Stale;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.lifecycle.phase = FetchPhase::Success;
                Resolution::Applied
            }
            Err(ApiError::Cancelled) => {
                self.lifecycle.phase = FetchPhase::Idle;
                Resolution::Stale
            }
            Err(err) => {
                self.error = Some(err.user_message(fallback));
                self.lifecycle.phase = FetchPhase::Error;
                Resolution::Failed {
                    requires_login: err.requires_login(),
                }
            }
        }
    }

}

impl<T: Blank> ResourceState<T> {
    /// Missing data and blank data both render the empty state.
    pub fn view_state(&self) -> ViewState {
        let is_empty = self.data.as_ref().is_none_or(Blank::is_blank);
        ViewState::resolve(self.loading, self.error.as_deref(), is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "Failed to fetch contacts.";

    impl Blank for String {
        fn is_blank(&self) -> bool {
            self.trim().is_empty()
        }
    }

    #[test]
    fn test_missing_token_goes_straight_to_error() {
        let mut model: ListViewModel<u32> = ListViewModel::new();

        assert_eq!(model.begin(false), None);
        assert_eq!(model.phase(), FetchPhase::Error);
        assert!(!model.loading);
        assert_eq!(
            model.error.as_deref(),
            Some("No authentication token found. Please log in.")
        );
    }

    #[test]
    fn test_success_replaces_items() {
        let mut model: ListViewModel<i32> = ListViewModel::new();
        let generation = model.begin(true).unwrap();
        assert!(model.loading);
        assert_eq!(model.view_state(0), ViewState::Loading);

        let outcome = model.resolve(generation, Ok(vec![1, 2, 3].into()), FALLBACK);

        assert_eq!(outcome, Resolution::Applied);
        assert_eq!(model.items, vec![1, 2, 3]);
        assert_eq!(model.total, 3);
        assert_eq!(model.phase(), FetchPhase::Success);
        assert_eq!(model.view_state(3), ViewState::Ready);
    }

    #[test]
    fn test_error_keeps_previous_items() {
        let mut model: ListViewModel<i32> = ListViewModel::new();
        let first = model.begin(true).unwrap();
        model.resolve(first, Ok(vec![7, 8].into()), FALLBACK);

        let second = model.begin(true).unwrap();
        let outcome = model.resolve(second, Err(ApiError::from_status(500, None)), FALLBACK);

        assert_eq!(outcome, Resolution::Failed { requires_login: false });
        assert_eq!(model.items, vec![7, 8]);
        assert_eq!(model.view_state(2), ViewState::Error(FALLBACK.to_string()));
    }

    #[test]
    fn test_first_load_error_leaves_items_empty() {
        let mut model: ListViewModel<u32> = ListViewModel::new();
        let generation = model.begin(true).unwrap();
        model.resolve(generation, Err(ApiError::NotFound), FALLBACK);

        assert!(model.items.is_empty());
        assert_eq!(model.error.as_deref(), Some("Resource not found."));
    }

    #[test]
    fn test_unauthorized_requires_login() {
        let mut model: ListViewModel<u32> = ListViewModel::new();
        let generation = model.begin(true).unwrap();
        let outcome = model.resolve(generation, Err(ApiError::Unauthorized), FALLBACK);

        assert_eq!(outcome, Resolution::Failed { requires_login: true });
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut model: ListViewModel<i32> = ListViewModel::new();
        let old = model.begin(true).unwrap();
        let new = model.begin(true).unwrap();

        assert_eq!(model.resolve(new, Ok(vec![2].into()), FALLBACK), Resolution::Applied);
        assert_eq!(model.resolve(old, Ok(vec![1].into()), FALLBACK), Resolution::Stale);
        assert_eq!(model.items, vec![2]);
    }

    #[test]
    fn test_missing_token_invalidates_in_flight_fetch() {
        let mut model: ListViewModel<i32> = ListViewModel::new();
        let in_flight = model.begin(true).unwrap();
        model.begin(false);

        assert_eq!(
            model.resolve(in_flight, Ok(vec![1].into()), FALLBACK),
            Resolution::Stale
        );
        assert!(model.items.is_empty());
    }

    #[test]
    fn test_cancelled_result_changes_nothing() {
        let mut model: ListViewModel<u32> = ListViewModel::new();
        let generation = model.begin(true).unwrap();

        assert_eq!(
            model.resolve(generation, Err(ApiError::Cancelled), FALLBACK),
            Resolution::Stale
        );
        assert!(model.error.is_none());
        assert!(!model.loading);
    }

    #[test]
    fn test_loading_hides_error_and_data() {
        let mut model: ListViewModel<i32> = ListViewModel::new();
        model.items = vec![1];
        model.error = Some("boom".into());
        model.loading = true;

        assert_eq!(model.view_state(1), ViewState::Loading);
    }

    #[test]
    fn test_empty_after_filter() {
        let model: ListViewModel<u32> = ListViewModel::new();
        assert_eq!(model.view_state(0), ViewState::Empty);
        assert_eq!(ViewState::empty_message(), "No results found.");
    }

    #[test]
    fn test_search_resets_page() {
        let mut model: ListViewModel<u32> = ListViewModel::new();
        model.set_page(4);
        model.set_search("ann");

        assert_eq!(model.page, 1);
        assert_eq!(model.search_term, "ann");
    }

    #[test]
    fn test_prepend_update_remove() {
        let mut model: ListViewModel<i32> = ListViewModel::new();
        let generation = model.begin(true).unwrap();
        model.resolve(generation, Ok(vec![2, 3].into()), FALLBACK);

        model.prepend(1);
        assert_eq!(model.items, vec![1, 2, 3]);
        assert_eq!(model.total, 3);

        assert!(model.update_where(|n| *n == 2, |n| *n = 20));
        assert!(!model.update_where(|n| *n == 99, |n| *n = 0));
        assert_eq!(model.items, vec![1, 20, 3]);

        assert!(model.remove_where(|n| *n == 3));
        assert_eq!(model.items, vec![1, 20]);
        assert_eq!(model.total, 2);
    }

    #[test]
    fn test_resource_state_lifecycle() {
        let mut state: ResourceState<String> = ResourceState::new();
        assert_eq!(state.view_state(), ViewState::Empty);

        let generation = state.begin(true).unwrap();
        assert_eq!(state.view_state(), ViewState::Loading);

        state.resolve(generation, Ok("report".into()), FALLBACK);
        assert_eq!(state.view_state(), ViewState::Ready);
        assert_eq!(state.data.as_deref(), Some("report"));
    }

    #[test]
    fn test_blank_resource_renders_empty_state() {
        let mut state: ResourceState<String> = ResourceState::new();
        let generation = state.begin(true).unwrap();
        state.resolve(generation, Ok("  ".into()), FALLBACK);

        assert_eq!(state.phase(), FetchPhase::Success);
        assert!(state.data.is_some());
        assert_eq!(state.view_state(), ViewState::Empty);
    }

    #[test]
    fn test_resource_state_without_token() {
        let mut state: ResourceState<String> = ResourceState::new();
        assert_eq!(state.begin(false), None);
        assert_eq!(
            state.view_state(),
            ViewState::Error("No authentication token found. Please log in.".into())
        );
    }
}
