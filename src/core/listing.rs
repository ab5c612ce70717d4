//! In-memory search, sort order and pagination for list screens.

use derive_more::Display;

/// Delay between the last keystroke and the filter update.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Records that take part in the search box.
pub trait Searchable {
    /// Text fields matched against the search term.
    fn search_fields(&self) -> Vec<&str>;
}

/// Case-insensitive substring match on any search field. A blank term
/// matches everything.
pub fn matches_search<T: Searchable>(item: &T, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    needle.is_empty()
        || item
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
}

pub fn filter_items<T: Searchable + Clone>(items: &[T], term: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| matches_search(*item, term))
        .cloned()
        .collect()
}

/// Creation-time ordering, pushed to the backend as a query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum SortOrder {
    #[default]
    #[display("Newest")]
    Newest,
    #[display("Oldest")]
    Oldest,
}

impl SortOrder {
    pub const ALL: [SortOrder; 2] = [SortOrder::Newest, SortOrder::Oldest];

    /// Value for the `sort` query parameter.
    pub fn query_value(&self) -> &'static str {
        match self {
            Self::Newest => "createdAt:desc",
            Self::Oldest => "createdAt:asc",
        }
    }

    /// Parse the `<select>` value produced by [`SortOrder::query_value`].
    pub fn from_query_value(value: &str) -> Self {
        match value {
            "createdAt:asc" => Self::Oldest,
            _ => Self::Newest,
        }
    }
}

/// A 1-based page over `total_items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl PageWindow {
    /// The page is clamped into range; an empty list has one empty page.
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        Self {
            page: page.clamp(1, total_pages),
            page_size,
            total_items,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    /// Index range of this page within the full list.
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        &items[range.start.min(items.len())..range.end.min(items.len())]
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// "Showing 11 to 20 of 43"
    pub fn summary(&self) -> String {
        let range = self.range();
        if range.is_empty() {
            return "Showing 0 results".to_string();
        }
        format!(
            "Showing {} to {} of {}",
            range.start + 1,
            range.end,
            self.total_items
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageButton {
    Page(usize),
    Ellipsis,
}

/// Page buttons with ellipsis compaction, e.g. `1 2 3 4 … 40`.
///
/// Up to seven pages are shown in full. Otherwise the first and last page
/// are always present along with the current page's neighbours.
pub fn page_buttons(current: usize, total_pages: usize) -> Vec<PageButton> {
    const FULL_LIMIT: usize = 7;

    if total_pages <= FULL_LIMIT {
        return (1..=total_pages).map(PageButton::Page).collect();
    }

    let current = current.clamp(1, total_pages);
    let (lo, hi) = if current <= 3 {
        (2, 4)
    } else if current >= total_pages - 2 {
        (total_pages - 3, total_pages - 1)
    } else {
        (current - 1, current + 1)
    };

    // a gap of exactly one page shows that page instead of an ellipsis
    let mut buttons = vec![PageButton::Page(1)];
    match lo {
        3 => buttons.push(PageButton::Page(2)),
        l if l > 3 => buttons.push(PageButton::Ellipsis),
        _ => {}
    }
    buttons.extend((lo..=hi).map(PageButton::Page));
    match total_pages - 1 - hi {
        1 => buttons.push(PageButton::Page(total_pages - 1)),
        gap if gap > 1 => buttons.push(PageButton::Ellipsis),
        _ => {}
    }
    buttons.push(PageButton::Page(total_pages));
    buttons
}
