//! DTOs shaped for the product list, detail and form templates.

use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::filters::{DisplayedProducts, ProductFilterState};
use crate::domain::product::{Product, StockLevel};
use crate::domain::types::ProductId;
use crate::dto::audit::AuditRow;
use crate::forms::products::ProductForm;

/// Product with the derived values the tables display.
#[derive(Debug, Clone, Serialize)]
pub struct ProductRow {
    #[serde(flatten)]
    pub product: Product,
    pub stock_level: StockLevel,
    pub stock_badge: &'static str,
    pub inventory_value: f64,
    pub is_deleted: bool,
}

impl From<Product> for ProductRow {
    fn from(product: Product) -> Self {
        let stock_level = product.stock_level();
        Self {
            stock_level,
            stock_badge: stock_level.badge(),
            inventory_value: product.inventory_value(),
            is_deleted: product.is_deleted(),
            product,
        }
    }
}

/// Data required to render the product list.
#[derive(Debug)]
pub struct ProductsPageData {
    /// Filter state after applying the requested change.
    pub filters: ProductFilterState,
    pub displayed: DisplayedProducts,
    /// Options of the category filter; empty when they failed to load.
    pub categories: Vec<Category>,
}

/// Data required to render the product details page.
#[derive(Debug)]
pub struct ProductDetailsData {
    pub product: ProductRow,
    pub history: Vec<AuditRow>,
    pub history_error: Option<String>,
}

/// Data required to render the create and edit forms.
#[derive(Debug)]
pub struct ProductFormData {
    /// `None` when creating a product.
    pub product_id: Option<ProductId>,
    pub form: ProductForm,
    pub categories: Vec<Category>,
}
