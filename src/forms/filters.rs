//! Query strings of the filterable listings.
//!
//! Every field is optional text so that empty inputs submitted by the filter
//! forms (`?min=&max=`) do not fail deserialization.

use serde::Deserialize;

use crate::domain::audit::AuditAction;
use crate::domain::filters::{AuditFilterState, PriceRange, ProductFilterState};
use crate::domain::types::{CategoryId, ProductId};

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_number(value: Option<String>) -> Option<f64> {
    non_empty(value).and_then(|value| value.replace(',', ".").parse().ok())
}

/// Filter change requested by the submit button that was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAction {
    Search,
    Category,
    Price,
    Clear,
}

impl FilterAction {
    fn parse(value: Option<String>) -> Option<Self> {
        match non_empty(value)?.as_str() {
            "search" => Some(FilterAction::Search),
            "category" => Some(FilterAction::Category),
            "price" => Some(FilterAction::Price),
            "clear" => Some(FilterAction::Clear),
            _ => None,
        }
    }
}

/// `GET /products` query string.
#[derive(Debug, Default, Deserialize)]
pub struct ProductFilterQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    /// 1-based page number as shown by the pager.
    pub page: Option<String>,
    pub apply: Option<String>,
}

impl ProductFilterQuery {
    /// Rebuilds the previous filter state from the query and applies the
    /// requested change on top of it.
    pub fn into_state(self) -> ProductFilterState {
        let search = non_empty(self.q).unwrap_or_default();
        let category = non_empty(self.category).and_then(|id| CategoryId::new(id).ok());
        let min = parse_number(self.min);
        let max = parse_number(self.max);
        let page = non_empty(self.page)
            .and_then(|page| page.parse::<usize>().ok())
            .unwrap_or(1)
            .saturating_sub(1);

        let mut state = ProductFilterState {
            search: search.clone(),
            category: category.clone(),
            price: PriceRange::new(min, max),
            page,
        };

        match FilterAction::parse(self.apply) {
            Some(FilterAction::Search) => state.apply_search(&search),
            Some(FilterAction::Category) => state.apply_category(category),
            Some(FilterAction::Price) => state.apply_price(min, max),
            Some(FilterAction::Clear) => state.clear(),
            None => {}
        }

        state
    }
}

/// `GET /audit` query string.
#[derive(Debug, Default, Deserialize)]
pub struct AuditFilterQuery {
    pub action: Option<String>,
    pub product_id: Option<String>,
    /// Text typed in the product box.
    pub product: Option<String>,
    pub apply: Option<String>,
}

impl AuditFilterQuery {
    pub fn into_state(self) -> AuditFilterState {
        let action = non_empty(self.action).and_then(|action| action.parse::<AuditAction>().ok());
        let product_id = non_empty(self.product_id).and_then(|id| ProductId::new(id).ok());
        let query = self.product.unwrap_or_default();

        let mut state = AuditFilterState::default();
        match self.apply.as_deref().map(str::trim) {
            Some("action") => state.change_action(action),
            Some("clear") => state.clear(),
            _ => {
                state.action = action;
                match product_id {
                    Some(product_id) => state.select_product(product_id, query.trim()),
                    None => state.set_query(query.trim()),
                }
            }
        }

        state
    }
}
