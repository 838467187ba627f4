//! Display label for a product referenced from an audit entry.
//!
//! Audit entries keep only a weak reference to their product. The live record
//! may still be loading, may be gone (soft-deleted or purged), or may resolve
//! normally; the label falls back to the title captured in the entry details
//! when the live record is not available.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::product::Product;
use crate::domain::types::ProductId;

/// Keys checked, in order, for a historical product title.
pub const HISTORICAL_TITLE_KEYS: [&str; 3] = ["title", "name", "productTitle"];

/// First non-empty historical title found in audit details.
pub fn historical_title(details: &Map<String, Value>) -> Option<&str> {
    HISTORICAL_TITLE_KEYS.iter().find_map(|key| {
        details
            .get(*key)
            .and_then(Value::as_str)
            .filter(|title| !title.is_empty())
    })
}

/// State of the live product lookup.
#[derive(Clone, Copy, Debug)]
pub enum ProductLookup<'a> {
    Loading,
    /// The lookup failed or the backend has no such product.
    Missing,
    Found(&'a Product),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    /// Bare loading indicator, nothing to show yet.
    Loading,
    /// Historical title shown while the live record loads.
    Optimistic,
    /// Historical title of a product that is no longer available.
    Archived,
    /// Nothing known beyond the identifier.
    Unknown,
    /// Live product title.
    Resolved,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProductLabel {
    pub mode: LabelMode,
    pub text: Option<String>,
    pub short_id: String,
}

impl ProductLabel {
    pub fn is_loading(&self) -> bool {
        matches!(self.mode, LabelMode::Loading | LabelMode::Optimistic)
    }
}

/// Chooses what to display for `product_id` given the live lookup state and
/// the historical title extracted from the audit details.
pub fn resolve_product_label(
    product_id: &ProductId,
    lookup: ProductLookup<'_>,
    historical: Option<&str>,
) -> ProductLabel {
    let short_id = product_id.short();
    let (mode, text) = match (lookup, historical) {
        (ProductLookup::Found(product), _) => (LabelMode::Resolved, Some(product.title.clone())),
        (ProductLookup::Loading, Some(title)) => (LabelMode::Optimistic, Some(title.to_string())),
        (ProductLookup::Loading, None) => (LabelMode::Loading, None),
        (ProductLookup::Missing, Some(title)) => (LabelMode::Archived, Some(title.to_string())),
        (ProductLookup::Missing, None) => (
            LabelMode::Unknown,
            Some(format!("Desconocido ({short_id}...)")),
        ),
    };

    ProductLabel {
        mode,
        text,
        short_id,
    }
}
