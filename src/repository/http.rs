//! REST implementation of the repository traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::domain::audit::{AuditAction, AuditLog};
use crate::domain::category::{Category, NewCategory};
use crate::domain::page::PageResponse;
use crate::domain::product::{NewProduct, Product, UpdateProduct, UpdateStock};
use crate::domain::types::{CategoryId, ProductId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    AuditReader, CategoryReader, CategoryWriter, ProductListFilter, ProductListQuery,
    ProductReader, ProductWriter,
};

/// Client for the catalog REST API rooted at `base_url` (e.g.
/// `http://localhost:8080/api`).
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: Url,
}

impl HttpRepository {
    pub fn new(base_url: &str, connect_timeout: Duration) -> RepositoryResult<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to build HTTP client: {e}")))?;
        Self::with_client(client, base_url)
    }

    /// Reuses an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: Client, base_url: &str) -> RepositoryResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RepositoryError::Unexpected(format!("Invalid backend url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RepositoryError::Unexpected(format!(
                "Backend url cannot be a base: {base_url}"
            )));
        }
        Ok(Self { client, base_url })
    }

    /// Appends percent-encoded path segments to the base url.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends the request and decodes the JSON payload.
    async fn fetch<T>(&self, request: RequestBuilder) -> RepositoryResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RepositoryError::from_response(status.as_u16(), &body));
        }

        decode_payload(status, &body)
    }

    /// Sends the request and only checks the status.
    async fn execute(&self, request: RequestBuilder) -> RepositoryResult<()> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(RepositoryError::from_response(status.as_u16(), &body))
    }
}

/// Decodes a successful response body.
///
/// `204 No Content` and empty bodies yield the empty payload. A body that is
/// not JSON at all is logged and treated as empty; JSON of the wrong shape is
/// an error.
pub fn decode_payload<T>(status: StatusCode, body: &str) -> RepositoryResult<T>
where
    T: DeserializeOwned + Default,
{
    if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
        return Ok(T::default());
    }

    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => {
            log::warn!("Backend response was not JSON: {body}");
            return Ok(T::default());
        }
    };

    serde_json::from_value(value)
        .map_err(|e| RepositoryError::Unexpected(format!("Unexpected backend payload: {e}")))
}

#[async_trait]
impl CategoryReader for HttpRepository {
    async fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        self.fetch(self.client.get(self.endpoint(&["categories"])))
            .await
    }

    async fn get_category_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>> {
        let request = self.client.get(self.endpoint(&["categories", id.as_str()]));
        match self.fetch(request).await {
            Err(RepositoryError::NotFound(_)) => Ok(None),
            other => other,
        }
    }
}

#[async_trait]
impl CategoryWriter for HttpRepository {
    async fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<()> {
        self.execute(
            self.client
                .post(self.endpoint(&["categories"]))
                .json(new_category),
        )
        .await
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        updates: &NewCategory,
    ) -> RepositoryResult<()> {
        self.execute(
            self.client
                .put(self.endpoint(&["categories", id.as_str()]))
                .json(updates),
        )
        .await
    }

    async fn delete_category(&self, id: &CategoryId) -> RepositoryResult<()> {
        self.execute(
            self.client
                .delete(self.endpoint(&["categories", id.as_str()])),
        )
        .await
    }
}

#[async_trait]
impl ProductReader for HttpRepository {
    async fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<PageResponse<Product>> {
        let request = match &query.filter {
            ProductListFilter::All => self.client.get(self.endpoint(&["products"])),
            ProductListFilter::Search(term) => self
                .client
                .get(self.endpoint(&["products", "search"]))
                .query(&[("q", term.as_str())]),
            ProductListFilter::Category(category_id) => self
                .client
                .get(self.endpoint(&["products", "category", category_id.as_str()])),
            ProductListFilter::PriceRange(range) => self
                .client
                .get(self.endpoint(&["products", "price-range"]))
                .query(&[("min", range.min), ("max", range.max)]),
        };

        let request = match &query.pagination {
            Some(pagination) => request.query(&[
                ("page", pagination.page),
                ("size", pagination.per_page),
            ]),
            None => request,
        };

        self.fetch(request).await
    }

    async fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        let request = self.client.get(self.endpoint(&["products", id.as_str()]));
        match self.fetch(request).await {
            Err(RepositoryError::NotFound(_)) => Ok(None),
            other => other,
        }
    }
}

#[async_trait]
impl ProductWriter for HttpRepository {
    async fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<()> {
        self.execute(
            self.client
                .post(self.endpoint(&["products"]))
                .json(new_product),
        )
        .await
    }

    async fn update_product(
        &self,
        id: &ProductId,
        updates: &UpdateProduct,
    ) -> RepositoryResult<()> {
        self.execute(
            self.client
                .put(self.endpoint(&["products", id.as_str()]))
                .json(updates),
        )
        .await
    }

    async fn update_stock(&self, id: &ProductId, stock: UpdateStock) -> RepositoryResult<()> {
        self.execute(
            self.client
                .patch(self.endpoint(&["products", id.as_str(), "stock"]))
                .json(&stock),
        )
        .await
    }

    async fn delete_product(&self, id: &ProductId) -> RepositoryResult<()> {
        self.execute(
            self.client
                .delete(self.endpoint(&["products", id.as_str()])),
        )
        .await
    }
}

#[async_trait]
impl AuditReader for HttpRepository {
    async fn list_latest_audit(&self) -> RepositoryResult<Vec<AuditLog>> {
        self.fetch(self.client.get(self.endpoint(&["audit", "products"])))
            .await
    }

    async fn list_audit_for_product(&self, id: &ProductId) -> RepositoryResult<Vec<AuditLog>> {
        self.fetch(
            self.client
                .get(self.endpoint(&["audit", "products", id.as_str()])),
        )
        .await
    }

    async fn list_audit_by_action(&self, action: AuditAction) -> RepositoryResult<Vec<AuditLog>> {
        self.fetch(
            self.client
                .get(self.endpoint(&["audit", "actions", action.as_str()])),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(base: &str) -> HttpRepository {
        HttpRepository::with_client(Client::new(), base).unwrap()
    }

    #[test]
    fn endpoints_append_encoded_segments() {
        let api = repo("http://localhost:8080/api");
        assert_eq!(
            api.endpoint(&["products", "a b", "stock"]).as_str(),
            "http://localhost:8080/api/products/a%20b/stock"
        );

        let trailing = repo("http://localhost/api/");
        assert_eq!(
            trailing.endpoint(&["categories"]).as_str(),
            "http://localhost/api/categories"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(HttpRepository::with_client(Client::new(), "not a url").is_err());
        assert!(HttpRepository::with_client(Client::new(), "mailto:admin@example.com").is_err());
    }

    #[test]
    fn empty_payloads_decode_to_default() {
        let list: Vec<Category> = decode_payload(StatusCode::NO_CONTENT, "").unwrap();
        assert!(list.is_empty());

        let page: PageResponse<Product> = decode_payload(StatusCode::OK, "  ").unwrap();
        assert_eq!(page, PageResponse::default());

        let product: Option<Product> = decode_payload(StatusCode::OK, "").unwrap();
        assert!(product.is_none());
    }

    #[test]
    fn non_json_success_is_treated_as_empty() {
        let list: Vec<AuditLog> = decode_payload(StatusCode::OK, "<html>ok</html>").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn wrong_json_shape_is_an_error() {
        let result: RepositoryResult<Vec<Category>> =
            decode_payload(StatusCode::OK, r#"{"unexpected": true}"#);
        assert!(matches!(result, Err(RepositoryError::Unexpected(_))));
    }
}
