//! Product listing and product mutations.

use crate::domain::category::Category;
use crate::domain::display::ProductLookup;
use crate::domain::filters::{
    ActiveFilter, Fetch, ProductFilterState, ProductQueryResult, select_displayed,
};
use crate::domain::product::{NewProduct, Product, UpdateStock};
use crate::domain::types::ProductId;
use crate::dto::audit::AuditRow;
use crate::dto::products::{ProductDetailsData, ProductFormData, ProductsPageData};
use crate::forms::products::{ProductForm, StockForm};
use crate::repository::{
    AuditReader, CategoryReader, ProductListQuery, ProductReader, ProductWriter,
};
use crate::services::{ServiceError, ServiceResult};

/// Query issued for the active filter of `state`.
pub fn product_query(state: &ProductFilterState, page_size: usize) -> ProductListQuery {
    let query = match state.active() {
        ActiveFilter::None => ProductListQuery::all(),
        ActiveFilter::Search(term) => ProductListQuery::search(term),
        ActiveFilter::Category(category_id) => ProductListQuery::category(category_id.clone()),
        ActiveFilter::PriceRange(range) => ProductListQuery::price_range(range),
    };
    query.paginate(state.page, page_size)
}

async fn load_categories<R>(repo: &R) -> Vec<Category>
where
    R: CategoryReader + ?Sized,
{
    match repo.list_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Vec::new()
        }
    }
}

/// Loads the product list for the given filter state.
///
/// Only the query of the active filter is issued. A failed query is rendered
/// inline instead of failing the page.
pub async fn load_products_page<R>(
    repo: &R,
    filters: ProductFilterState,
    page_size: usize,
) -> ProductsPageData
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let query = product_query(&filters, page_size);
    let (products, categories) = futures::join!(repo.list_products(query), load_categories(repo));

    let fetch = match products {
        Ok(page) => Fetch::Ready(page),
        Err(e) => {
            log::error!("Failed to list products: {e}");
            Fetch::Failed(e.to_string())
        }
    };

    let result = match filters.active() {
        ActiveFilter::None => ProductQueryResult::Unfiltered(fetch),
        ActiveFilter::Search(_) => ProductQueryResult::Search(fetch),
        ActiveFilter::Category(_) => ProductQueryResult::Category(fetch),
        ActiveFilter::PriceRange(_) => ProductQueryResult::PriceRange(fetch),
    };
    let displayed = select_displayed(result, filters.page);

    ProductsPageData {
        filters,
        displayed,
        categories,
    }
}

/// Fetches a product or fails with [`ServiceError::NotFound`].
pub async fn get_product<R>(repo: &R, product_id: &ProductId) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

/// Product together with its audit history.
pub async fn get_product_details<R>(
    repo: &R,
    product_id: &ProductId,
) -> ServiceResult<ProductDetailsData>
where
    R: ProductReader + AuditReader + ?Sized,
{
    let (product, history) = futures::join!(
        get_product(repo, product_id),
        repo.list_audit_for_product(product_id)
    );
    let product = product?;

    let lookup = if product.is_deleted() {
        ProductLookup::Missing
    } else {
        ProductLookup::Found(&product)
    };

    let (history, history_error) = match history {
        Ok(logs) => (
            logs.iter()
                .map(|log| AuditRow::with_lookup(log, lookup))
                .collect(),
            None,
        ),
        Err(e) => {
            log::error!("Failed to list audit history for product {product_id}: {e}");
            (Vec::new(), Some(e.to_string()))
        }
    };

    Ok(ProductDetailsData {
        product: product.into(),
        history,
        history_error,
    })
}

/// Data for the create form, or the edit form when `product_id` is given.
pub async fn load_product_form<R>(
    repo: &R,
    product_id: Option<&ProductId>,
) -> ServiceResult<ProductFormData>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    match product_id {
        Some(product_id) => {
            let (product, categories) =
                futures::join!(get_product(repo, product_id), load_categories(repo));
            Ok(ProductFormData {
                product_id: Some(product_id.clone()),
                form: ProductForm::from_product(&product?),
                categories,
            })
        }
        None => Ok(ProductFormData {
            product_id: None,
            form: ProductForm::default(),
            categories: load_categories(repo).await,
        }),
    }
}

pub async fn create_product<R>(repo: &R, form: ProductForm) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    let payload = NewProduct::try_from(form)?;
    repo.create_product(&payload).await?;
    Ok(())
}

pub async fn update_product<R>(
    repo: &R,
    product_id: &ProductId,
    form: ProductForm,
) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    let payload = NewProduct::try_from(form)?;
    repo.update_product(product_id, &payload).await?;
    Ok(())
}

pub async fn update_stock<R>(repo: &R, product_id: &ProductId, form: StockForm) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    let payload = UpdateStock::try_from(form)?;
    repo.update_stock(product_id, payload).await?;
    Ok(())
}

/// Soft-deletes the product; its audit trail stays available.
pub async fn delete_product<R>(repo: &R, product_id: &ProductId) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(product_id).await?;
    Ok(())
}
