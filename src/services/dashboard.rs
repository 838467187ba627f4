use crate::dto::audit::AuditRow;
use crate::dto::main::DashboardData;
use crate::repository::{AuditReader, CategoryReader, ProductListQuery, ProductReader};

/// Number of recently added products shown on the dashboard.
pub const RECENT_PRODUCTS: usize = 5;
/// Number of audit entries shown on the dashboard.
pub const RECENT_AUDIT: usize = 10;

/// Loads the dashboard panels concurrently. A failing panel is logged and
/// left empty so the rest of the page still renders.
pub async fn load_dashboard<R>(repo: &R) -> DashboardData
where
    R: ProductReader + CategoryReader + AuditReader + ?Sized,
{
    let (products, categories, audit) = futures::join!(
        repo.list_products(ProductListQuery::all().paginate(0, RECENT_PRODUCTS)),
        repo.list_categories(),
        repo.list_latest_audit()
    );

    let mut data = DashboardData::default();

    match products {
        Ok(page) => {
            data.total_products = Some(page.total_elements);
            data.inventory_value = Some(DashboardData::inventory_value_of(&page.content));
            data.recent_products = page.content.into_iter().map(Into::into).collect();
        }
        Err(e) => log::error!("Failed to load recent products: {e}"),
    }

    match categories {
        Ok(categories) => data.category_count = Some(categories.len()),
        Err(e) => log::error!("Failed to load categories: {e}"),
    }

    match audit {
        Ok(logs) => {
            data.audit_count = Some(logs.len());
            data.recent_audit = logs.iter().take(RECENT_AUDIT).map(AuditRow::from).collect();
        }
        Err(e) => log::error!("Failed to load audit entries: {e}"),
    }

    data
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;

    use super::*;
    use crate::domain::audit::{AuditAction, AuditLog};
    use crate::domain::category::Category;
    use crate::domain::page::PageResponse;
    use crate::domain::product::Product;
    use crate::domain::types::{AuditLogId, CategoryId, ProductId};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn product(price: f64, stock: u32) -> Product {
        serde_json::from_value(json!({
            "id": format!("p-{price}-{stock}"),
            "title": "Item",
            "price": price,
            "stock": stock
        }))
        .unwrap()
    }

    #[actix_web::test]
    async fn aggregates_all_panels() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .withf(|query| {
                query
                    .pagination
                    .as_ref()
                    .is_some_and(|p| p.page == 0 && p.per_page == RECENT_PRODUCTS)
            })
            .returning(|_| {
                Ok(PageResponse {
                    content: vec![product(2.5, 4), product(10.0, 1)],
                    total_elements: 42,
                    total_pages: 9,
                    size: RECENT_PRODUCTS,
                    number: 0,
                })
            });
        repo.expect_list_categories().returning(|| {
            Ok(vec![Category {
                id: CategoryId::new("c1").unwrap(),
                name: "Hogar".into(),
                product_count: None,
            }])
        });
        repo.expect_list_latest_audit().returning(|| {
            Ok((0..12)
                .map(|i| AuditLog {
                    id: AuditLogId::new(format!("a{i}")).unwrap(),
                    product_id: ProductId::new("p1").unwrap(),
                    action: AuditAction::Create,
                    timestamp: Utc::now(),
                    details: None,
                })
                .collect())
        });

        let data = load_dashboard(&repo).await;

        assert_eq!(data.total_products, Some(42));
        assert_eq!(data.category_count, Some(1));
        assert_eq!(data.audit_count, Some(12));
        assert_eq!(data.inventory_value, Some(20.0));
        assert_eq!(data.recent_products.len(), 2);
        assert_eq!(data.recent_audit.len(), RECENT_AUDIT);
    }

    #[actix_web::test]
    async fn failed_panel_is_left_empty() {
        let mut repo = MockRepository::new();
        repo.expect_list_products()
            .returning(|_| Err(RepositoryError::ConnectionError("refused".into())));
        repo.expect_list_categories().returning(|| Ok(vec![]));
        repo.expect_list_latest_audit().returning(|| Ok(vec![]));

        let data = load_dashboard(&repo).await;

        assert_eq!(data.total_products, None);
        assert_eq!(data.inventory_value, None);
        assert_eq!(data.category_count, Some(0));
        assert!(data.recent_audit.is_empty());
    }
}
