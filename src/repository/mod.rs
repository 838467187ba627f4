//! Access to the catalog backend.
//!
//! Services depend on the reader/writer traits below; [`HttpRepository`]
//! implements all of them against the REST API.

use async_trait::async_trait;

use crate::domain::audit::{AuditAction, AuditLog};
use crate::domain::category::{Category, NewCategory};
use crate::domain::filters::PriceRange;
use crate::domain::page::PageResponse;
use crate::domain::product::{NewProduct, Product, UpdateProduct, UpdateStock};
use crate::domain::types::{CategoryId, ProductId};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use http::HttpRepository;

#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    /// Zero-based page index.
    pub page: usize,
    pub per_page: usize,
}

/// Listing endpoint to query. The backend serves each filter separately.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductListFilter {
    All,
    Search(String),
    Category(CategoryId),
    PriceRange(PriceRange),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductListQuery {
    pub filter: ProductListFilter,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn all() -> Self {
        Self {
            filter: ProductListFilter::All,
            pagination: None,
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self {
            filter: ProductListFilter::Search(query.into()),
            pagination: None,
        }
    }

    pub fn category(category_id: CategoryId) -> Self {
        Self {
            filter: ProductListFilter::Category(category_id),
            pagination: None,
        }
    }

    pub fn price_range(range: PriceRange) -> Self {
        Self {
            filter: ProductListFilter::PriceRange(range),
            pagination: None,
        }
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[async_trait]
pub trait CategoryReader {
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    async fn get_category_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>>;
}

#[async_trait]
pub trait CategoryWriter {
    async fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<()>;
    async fn update_category(&self, id: &CategoryId, updates: &NewCategory)
    -> RepositoryResult<()>;
    async fn delete_category(&self, id: &CategoryId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait ProductReader {
    async fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<PageResponse<Product>>;
    /// `Ok(None)` when the backend has no product with this id.
    async fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
}

#[async_trait]
pub trait ProductWriter {
    async fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<()>;
    async fn update_product(&self, id: &ProductId, updates: &UpdateProduct)
    -> RepositoryResult<()>;
    async fn update_stock(&self, id: &ProductId, stock: UpdateStock) -> RepositoryResult<()>;
    async fn delete_product(&self, id: &ProductId) -> RepositoryResult<()>;
}

#[async_trait]
pub trait AuditReader {
    async fn list_latest_audit(&self) -> RepositoryResult<Vec<AuditLog>>;
    async fn list_audit_for_product(&self, id: &ProductId) -> RepositoryResult<Vec<AuditLog>>;
    async fn list_audit_by_action(&self, action: AuditAction) -> RepositoryResult<Vec<AuditLog>>;
}
