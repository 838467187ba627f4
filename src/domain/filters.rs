//! Filter state of the product and audit listings.
//!
//! The backend exposes one endpoint per filter dimension and cannot combine
//! them, so each listing keeps at most one active filter. Activating a filter
//! clears the others and rewinds pagination to the first page.

use serde::Serialize;

use crate::domain::audit::{AuditAction, AuditLog};
use crate::domain::page::PageResponse;
use crate::domain::product::Product;
use crate::domain::types::{CategoryId, ProductId};

/// Search terms shorter than this are not sent to the backend.
pub const MIN_SEARCH_LEN: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Builds a range only when both bounds are given and `max > min`.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Option<Self> {
        match (min, max) {
            (Some(min), Some(max)) if min.is_finite() && max.is_finite() && max > min => {
                Some(Self { min, max })
            }
            _ => None,
        }
    }
}

/// Which filter currently drives the product listing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActiveFilter<'a> {
    None,
    Search(&'a str),
    Category(&'a CategoryId),
    PriceRange(PriceRange),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    None,
    Search,
    Category,
    PriceRange,
}

impl ActiveFilter<'_> {
    pub fn kind(&self) -> FilterKind {
        match self {
            ActiveFilter::None => FilterKind::None,
            ActiveFilter::Search(_) => FilterKind::Search,
            ActiveFilter::Category(_) => FilterKind::Category,
            ActiveFilter::PriceRange(_) => FilterKind::PriceRange,
        }
    }
}

/// Filter state owned by a single rendering of the product list.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProductFilterState {
    pub search: String,
    pub category: Option<CategoryId>,
    pub price: Option<PriceRange>,
    /// Zero-based page index.
    pub page: usize,
}

impl ProductFilterState {
    pub fn apply_search(&mut self, query: &str) {
        self.search = query.trim().to_string();
        self.category = None;
        self.price = None;
        self.page = 0;
    }

    pub fn apply_category(&mut self, category: Option<CategoryId>) {
        self.category = category;
        self.search.clear();
        self.price = None;
        self.page = 0;
    }

    /// An invalid or incomplete range only resets the price filter.
    pub fn apply_price(&mut self, min: Option<f64>, max: Option<f64>) {
        match PriceRange::new(min, max) {
            Some(range) => {
                self.price = Some(range);
                self.search.clear();
                self.category = None;
                self.page = 0;
            }
            None => self.price = None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Active filter by precedence: search, category, price range.
    pub fn active(&self) -> ActiveFilter<'_> {
        if self.search.chars().count() >= MIN_SEARCH_LEN {
            ActiveFilter::Search(&self.search)
        } else if let Some(category) = &self.category {
            ActiveFilter::Category(category)
        } else if let Some(range) = self.price {
            ActiveFilter::PriceRange(range)
        } else {
            ActiveFilter::None
        }
    }

    pub fn has_filters(&self) -> bool {
        !self.search.is_empty() || self.category.is_some() || self.price.is_some()
    }
}

/// Outcome of one backend query as seen by the view.
#[derive(Clone, Debug, PartialEq)]
pub enum Fetch<T> {
    Loading,
    Ready(T),
    Failed(String),
}

/// The product query that was issued, tagged by the filter that drove it.
#[derive(Clone, Debug, PartialEq)]
pub enum ProductQueryResult {
    Unfiltered(Fetch<PageResponse<Product>>),
    Search(Fetch<PageResponse<Product>>),
    Category(Fetch<PageResponse<Product>>),
    PriceRange(Fetch<PageResponse<Product>>),
}

/// Page of products the listing renders.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisplayedProducts {
    pub filter: FilterKind,
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub total_elements: u64,
    /// Never below one so the pager always has a page to show.
    pub total_pages: usize,
    /// Zero-based page index.
    pub page: usize,
}

/// Picks the displayed page from the query result of the active filter.
pub fn select_displayed(result: ProductQueryResult, requested_page: usize) -> DisplayedProducts {
    let (filter, fetch) = match result {
        ProductQueryResult::Unfiltered(fetch) => (FilterKind::None, fetch),
        ProductQueryResult::Search(fetch) => (FilterKind::Search, fetch),
        ProductQueryResult::Category(fetch) => (FilterKind::Category, fetch),
        ProductQueryResult::PriceRange(fetch) => (FilterKind::PriceRange, fetch),
    };

    let mut displayed = DisplayedProducts {
        filter,
        products: Vec::new(),
        loading: false,
        error: None,
        total_elements: 0,
        total_pages: 1,
        page: requested_page,
    };

    match fetch {
        Fetch::Loading => displayed.loading = true,
        Fetch::Failed(message) => displayed.error = Some(message),
        Fetch::Ready(page) => {
            displayed.total_elements = page.total_elements;
            displayed.total_pages = page.total_pages.max(1);
            displayed.page = page.number;
            displayed.products = page.content;
        }
    }

    displayed
}

/// Where the audit listing takes its entries from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AuditSource<'a> {
    Product(&'a ProductId),
    Action(AuditAction),
    Latest,
}

/// Filter state owned by a single rendering of the audit trail.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AuditFilterState {
    pub action: Option<AuditAction>,
    pub product_id: Option<ProductId>,
    /// Free text typed in the product box; echoes the title once a product
    /// is picked.
    pub product_query: String,
}

impl AuditFilterState {
    pub fn select_product(&mut self, product_id: ProductId, title: &str) {
        self.product_id = Some(product_id);
        self.product_query = title.to_string();
        self.action = None;
    }

    pub fn change_action(&mut self, action: Option<AuditAction>) {
        self.action = action;
        self.product_id = None;
        self.product_query.clear();
    }

    /// Typing in the product box; emptying it drops the selected product.
    pub fn set_query(&mut self, query: &str) {
        self.product_query = query.to_string();
        if self.product_query.is_empty() {
            self.product_id = None;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Selected product wins over the action filter, which wins over the
    /// latest entries.
    pub fn source(&self) -> AuditSource<'_> {
        match (&self.product_id, self.action) {
            (Some(product_id), _) => AuditSource::Product(product_id),
            (None, Some(action)) => AuditSource::Action(action),
            (None, None) => AuditSource::Latest,
        }
    }

    /// Whether product suggestions should be fetched for the query.
    pub fn wants_suggestions(&self) -> bool {
        self.product_id.is_none() && self.product_query.chars().count() >= MIN_SEARCH_LEN
    }

    /// Text to filter the fetched entries by, if any.
    pub fn text_filter(&self) -> Option<&str> {
        if self.product_id.is_none() && !self.product_query.is_empty() {
            Some(&self.product_query)
        } else {
            None
        }
    }

    pub fn has_filters(&self) -> bool {
        self.product_id.is_some() || self.action.is_some() || !self.product_query.is_empty()
    }
}

/// Keeps entries whose historical title or product id contains `query`,
/// ignoring case.
pub fn filter_audit_by_text(logs: Vec<AuditLog>, query: &str) -> Vec<AuditLog> {
    let query = query.to_lowercase();
    logs.into_iter()
        .filter(|log| {
            log.historical_title()
                .is_some_and(|title| title.to_lowercase().contains(&query))
                || log.product_id.to_lowercase().contains(&query)
        })
        .collect()
}
