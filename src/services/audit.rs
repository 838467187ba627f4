//! Audit trail listing and lazy product labels.

use crate::domain::audit::{AuditAction, AuditLog};
use crate::domain::display::{ProductLabel, ProductLookup, resolve_product_label};
use crate::domain::filters::{AuditFilterState, AuditSource, filter_audit_by_text};
use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::dto::audit::{AuditPageData, AuditRow};
use crate::repository::errors::RepositoryResult;
use crate::repository::{AuditReader, ProductListQuery, ProductReader};
use crate::services::ServiceResult;

/// Maximum number of products suggested in the product box.
pub const SUGGESTION_LIMIT: usize = 5;

/// Entries of the source selected by `filters`.
pub async fn list_audit_entries<R>(
    repo: &R,
    filters: &AuditFilterState,
) -> RepositoryResult<Vec<AuditLog>>
where
    R: AuditReader + ?Sized,
{
    match filters.source() {
        AuditSource::Product(product_id) => repo.list_audit_for_product(product_id).await,
        AuditSource::Action(action) => repo.list_audit_by_action(action).await,
        AuditSource::Latest => repo.list_latest_audit().await,
    }
}

async fn suggest_products<R>(repo: &R, filters: &AuditFilterState) -> Vec<Product>
where
    R: ProductReader + ?Sized,
{
    if !filters.wants_suggestions() {
        return Vec::new();
    }

    let query = ProductListQuery::search(filters.product_query.trim()).paginate(0, SUGGESTION_LIMIT);
    match repo.list_products(query).await {
        Ok(page) => page.content,
        Err(e) => {
            log::warn!("Failed to load product suggestions: {e}");
            Vec::new()
        }
    }
}

/// Loads the audit page. Rows carry the optimistic label; the resolved one
/// is fetched per row through [`resolve_label`].
pub async fn load_audit_page<R>(repo: &R, filters: AuditFilterState) -> ServiceResult<AuditPageData>
where
    R: AuditReader + ProductReader + ?Sized,
{
    let (entries, suggestions) = futures::join!(
        list_audit_entries(repo, &filters),
        suggest_products(repo, &filters)
    );

    let mut entries = entries?;
    if let Some(text) = filters.text_filter() {
        entries = filter_audit_by_text(entries, text);
    }

    Ok(AuditPageData {
        rows: entries.iter().map(AuditRow::from).collect(),
        suggestions,
        actions: AuditAction::ALL.into_iter().map(Into::into).collect(),
        filters,
    })
}

/// Resolves the label of `product_id` against the live catalog.
///
/// Backend failures are treated like a missing product, and so are
/// soft-deleted products.
pub async fn resolve_label<R>(
    repo: &R,
    product_id: &ProductId,
    historical_title: Option<&str>,
) -> ProductLabel
where
    R: ProductReader + ?Sized,
{
    let historical_title = historical_title.filter(|title| !title.is_empty());
    match repo.get_product_by_id(product_id).await {
        Ok(Some(product)) if !product.is_deleted() => resolve_product_label(
            product_id,
            ProductLookup::Found(&product),
            historical_title,
        ),
        Ok(_) => resolve_product_label(product_id, ProductLookup::Missing, historical_title),
        Err(e) => {
            log::warn!("Failed to resolve product {product_id}: {e}");
            resolve_product_label(product_id, ProductLookup::Missing, historical_title)
        }
    }
}
