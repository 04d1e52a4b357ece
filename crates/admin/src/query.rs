//! List query construction.
//!
//! Every admin list view fetches through the same query shape: a free
//! text search, zero or more categorical filters, and page/limit. The
//! backing API treats `"all"` and the empty string as "no filter", so
//! those values are omitted at build time rather than sent.

/// Sentinel filter value meaning "do not filter on this field".
pub const FILTER_ALL: &str = "all";

/// Default page size for admin list views.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// A canonical list query: filters in insertion order, then pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    filters: Vec<(String, String)>,
    page: u32,
    limit: u32,
}

impl ListQuery {
    /// Create a query for the given page and page size.
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        Self {
            filters: Vec::new(),
            page,
            limit,
        }
    }

    /// Add a categorical filter.
    ///
    /// Values equal to [`FILTER_ALL`] or the empty string are omitted;
    /// anything else is carried with its literal value. Insertion order
    /// is preserved in the rendered query string.
    #[must_use]
    pub fn filter(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() && value != FILTER_ALL {
            self.filters.push((key.to_owned(), value.to_owned()));
        }
        self
    }

    /// Current page number (1-based).
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Render the query string: filters in insertion order, then
    /// `page` and `limit`, which are always present.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut parts: Vec<String> = self
            .filters
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect();
        parts.push(format!("page={}", self.page));
        parts.push(format!("limit={}", self.limit));
        parts.join("&")
    }
}

/// Filter/query state owned by one mounted list view.
///
/// Changing any filter (including the search term) resets the page to
/// 1; changing only the page leaves the filters untouched. The state
/// lives for the lifetime of the view and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    search: String,
    filters: Vec<(String, String)>,
    page: u32,
    page_size: u32,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: Vec::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterState {
    /// Fresh state on page 1 with the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text search term and reset to page 1.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_owned();
        self.page = 1;
    }

    /// Set (or replace) a categorical filter and reset to page 1.
    ///
    /// The sentinel handling happens at build time; storing `"all"`
    /// here is allowed and simply builds to nothing.
    pub fn set_filter(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.filters.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_owned();
        } else {
            self.filters.push((key.to_owned(), value.to_owned()));
        }
        self.page = 1;
    }

    /// Move to another page without touching the filters.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Override the page size and reset to page 1.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Current page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Current search term.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Stored value of a categorical filter, if set.
    #[must_use]
    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Build the canonical [`ListQuery`] for the current state.
    ///
    /// The search term is carried as the `search` parameter and subject
    /// to the same omission rule as any other filter.
    #[must_use]
    pub fn to_query(&self) -> ListQuery {
        let mut query = ListQuery::new(self.page, self.page_size).filter("search", &self.search);
        for (key, value) in &self.filters {
            query = query.filter(key, value);
        }
        query
    }
}
