use futures::future::join_all;

use crate::domain::category::{Category, CategoryWithCount, NewCategory};
use crate::domain::types::CategoryId;
use crate::forms::categories::CategoryForm;
use crate::repository::{CategoryReader, CategoryWriter, ProductListQuery, ProductReader};
use crate::services::{ServiceError, ServiceResult};

/// Number of products filed under `category_id`, read from the total of a
/// one-item page. `None` when the query fails.
async fn count_products<R>(repo: &R, category_id: &CategoryId) -> Option<u64>
where
    R: ProductReader + ?Sized,
{
    let query = ProductListQuery::category(category_id.clone()).paginate(0, 1);
    match repo.list_products(query).await {
        Ok(page) => Some(page.total_elements),
        Err(e) => {
            log::warn!("Failed to count products of category {category_id}: {e}");
            None
        }
    }
}

/// Lists categories with their product counts, counted concurrently.
pub async fn list_categories_with_counts<R>(repo: &R) -> ServiceResult<Vec<CategoryWithCount>>
where
    R: CategoryReader + ProductReader + ?Sized,
{
    let categories = repo.list_categories().await?;
    let counts = join_all(
        categories
            .iter()
            .map(|category| count_products(repo, &category.id)),
    )
    .await;

    Ok(categories
        .into_iter()
        .zip(counts)
        .map(|(category, product_count)| CategoryWithCount {
            product_count: product_count.or(category.product_count),
            category,
        })
        .collect())
}

pub async fn get_category<R>(repo: &R, category_id: &CategoryId) -> ServiceResult<Category>
where
    R: CategoryReader + ?Sized,
{
    repo.get_category_by_id(category_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

pub async fn create_category<R>(repo: &R, form: CategoryForm) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    let payload = NewCategory::try_from(form)?;
    repo.create_category(&payload).await?;
    Ok(())
}

pub async fn update_category<R>(
    repo: &R,
    category_id: &CategoryId,
    form: CategoryForm,
) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    let payload = NewCategory::try_from(form)?;
    repo.update_category(category_id, &payload).await?;
    Ok(())
}

pub async fn delete_category<R>(repo: &R, category_id: &CategoryId) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    repo.delete_category(category_id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::page::PageResponse;
    use crate::repository::ProductListFilter;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: name.to_string(),
            product_count: None,
        }
    }

    #[actix_web::test]
    async fn counts_products_per_category() {
        let mut repo = MockRepository::new();
        repo.expect_list_categories()
            .returning(|| Ok(vec![category("c1", "Hogar"), category("c2", "Oficina")]));
        repo.expect_list_products()
            .times(2)
            .returning(|query| match query.filter {
                ProductListFilter::Category(id) if id.as_str() == "c1" => Ok(PageResponse {
                    total_elements: 12,
                    total_pages: 12,
                    size: 1,
                    ..PageResponse::default()
                }),
                _ => Err(RepositoryError::ConnectionError("refused".into())),
            });

        let categories = list_categories_with_counts(&repo).await.unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].product_count, Some(12));
        assert_eq!(categories[1].product_count, None);
    }

    #[actix_web::test]
    async fn count_queries_ask_for_a_single_item() {
        let mut repo = MockRepository::new();
        repo.expect_list_categories()
            .returning(|| Ok(vec![category("c1", "Hogar")]));
        repo.expect_list_products()
            .withf(|query| {
                query
                    .pagination
                    .as_ref()
                    .is_some_and(|p| p.page == 0 && p.per_page == 1)
            })
            .times(1)
            .returning(|_| Ok(PageResponse::default()));

        let categories = list_categories_with_counts(&repo).await.unwrap();
        assert_eq!(categories[0].product_count, Some(0));
    }

    #[actix_web::test]
    async fn missing_category_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_category_by_id().returning(|_| Ok(None));

        let result = get_category(&repo, &CategoryId::new("c9").unwrap()).await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[actix_web::test]
    async fn invalid_name_is_a_form_error() {
        let mut repo = MockRepository::new();
        repo.expect_create_category().never();

        let result = create_category(
            &repo,
            CategoryForm {
                name: "x".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn rename_sends_trimmed_name() {
        let mut repo = MockRepository::new();
        repo.expect_update_category()
            .withf(|id, payload| id.as_str() == "c1" && payload.name.as_str() == "Jardín")
            .times(1)
            .returning(|_, _| Ok(()));

        update_category(
            &repo,
            &CategoryId::new("c1").unwrap(),
            CategoryForm {
                name: " Jardín ".to_string(),
            },
        )
        .await
        .unwrap();
    }
}
