use crate::domain::product::Product;
use crate::dto::audit::AuditRow;
use crate::dto::products::ProductRow;

/// Data required to render the dashboard. A panel whose backend call failed
/// holds `None` or an empty list.
#[derive(Debug, Default)]
pub struct DashboardData {
    pub total_products: Option<u64>,
    pub category_count: Option<usize>,
    pub audit_count: Option<usize>,
    /// Inventory value of the recent products only.
    pub inventory_value: Option<f64>,
    pub recent_products: Vec<ProductRow>,
    pub recent_audit: Vec<AuditRow>,
}

impl DashboardData {
    pub fn inventory_value_of(products: &[Product]) -> f64 {
        products.iter().map(Product::inventory_value).sum()
    }
}
