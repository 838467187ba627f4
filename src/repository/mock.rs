//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::audit::{AuditAction, AuditLog};
use crate::domain::category::{Category, NewCategory};
use crate::domain::page::PageResponse;
use crate::domain::product::{NewProduct, Product, UpdateProduct, UpdateStock};
use crate::domain::types::{CategoryId, ProductId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AuditReader, CategoryReader, CategoryWriter, ProductListQuery, ProductReader, ProductWriter,
};

mock! {
    pub Repository {}

    #[async_trait]
    impl CategoryReader for Repository {
        async fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
        async fn get_category_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>>;
    }

    #[async_trait]
    impl CategoryWriter for Repository {
        async fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<()>;
        async fn update_category(
            &self,
            id: &CategoryId,
            updates: &NewCategory,
        ) -> RepositoryResult<()>;
        async fn delete_category(&self, id: &CategoryId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl ProductReader for Repository {
        async fn list_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<PageResponse<Product>>;
        async fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
    }

    #[async_trait]
    impl ProductWriter for Repository {
        async fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<()>;
        async fn update_product(
            &self,
            id: &ProductId,
            updates: &UpdateProduct,
        ) -> RepositoryResult<()>;
        async fn update_stock(&self, id: &ProductId, stock: UpdateStock) -> RepositoryResult<()>;
        async fn delete_product(&self, id: &ProductId) -> RepositoryResult<()>;
    }

    #[async_trait]
    impl AuditReader for Repository {
        async fn list_latest_audit(&self) -> RepositoryResult<Vec<AuditLog>>;
        async fn list_audit_for_product(&self, id: &ProductId) -> RepositoryResult<Vec<AuditLog>>;
        async fn list_audit_by_action(&self, action: AuditAction) -> RepositoryResult<Vec<AuditLog>>;
    }
}
