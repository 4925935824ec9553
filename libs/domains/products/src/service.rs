use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, PageRequest, Product, ProductListRequest, ProductPage, UpdateProduct,
};
use crate::repository::ProductRepository;

/// Service layer for Product business logic
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

// Manual impl so the repository itself need not be Clone
impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product, the store assigns the id
    #[instrument(skip(self, input), fields(category = %input.category))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Overwrite the fields present in `input`
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;

        self.repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }

    /// Zero-based page of one category. Pages past the end are empty but
    /// carry the real totals.
    #[instrument(skip(self, request), fields(category = %request.category, page = request.page, size = request.size))]
    pub async fn list_by_category(&self, request: ProductListRequest) -> ProductResult<ProductPage> {
        let page = PageRequest::try_from(&request)?;

        self.repository
            .list_by_category(&request.category, page)
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> ProductResult<Vec<String>> {
        self.repository.list_categories().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_PAGE;
    use crate::repository::MockProductRepository;
    use mockall::predicate;

    fn product(id: i64, category: &str, name: &str) -> Product {
        Product {
            id,
            category: category.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_product_delegates_to_repository() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|input| Ok(product(1, &input.category, &input.name)));

        let service = ProductService::new(mock_repo);
        let created = service
            .create_product(CreateProduct {
                category: "c1".to_string(),
                name: "n1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(created, product(1, "c1", "n1"));
    }

    #[tokio::test]
    async fn test_create_product_rejects_blank_name() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .create_product(CreateProduct {
                category: "c1".to_string(),
                name: "  ".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ProductError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(predicate::eq(99))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.get_product(99).await;

        assert!(matches!(result, Err(ProductError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_update_product_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_update()
            .with(predicate::eq(5), predicate::always())
            .returning(|_, _| Ok(None));

        let service = ProductService::new(mock_repo);
        let result = service.update_product(5, UpdateProduct::default()).await;

        assert!(matches!(result, Err(ProductError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_update_product_rejects_oversized_category() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let input = UpdateProduct {
            category: Some("c".repeat(256)),
            name: None,
        };

        let result = service.update_product(1, input).await;
        assert!(matches!(result, Err(ProductError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_delete_product_twice() {
        let mut mock_repo = MockProductRepository::new();
        let mut seq = mockall::Sequence::new();
        mock_repo
            .expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        mock_repo
            .expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));

        let service = ProductService::new(mock_repo);

        assert!(service.delete_product(3).await.is_ok());
        assert!(matches!(
            service.delete_product(3).await,
            Err(ProductError::NotFound(3))
        ));
    }

    #[tokio::test]
    async fn test_list_by_category_passes_page_bounds() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list_by_category()
            .times(1)
            .returning(|category, page| {
                assert_eq!(category, "electronics");
                assert_eq!(page, PageRequest { page: 1, size: 10 });
                Ok(ProductPage::new(Vec::new(), 12, page))
            });

        let service = ProductService::new(mock_repo);
        let page = service
            .list_by_category(ProductListRequest::new("electronics", 1, 10))
            .await
            .unwrap();

        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page_number, 1);
    }

    #[tokio::test]
    async fn test_list_by_category_rejects_bad_bounds() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_list_by_category().never();

        let service = ProductService::new(mock_repo);

        for (page, size) in [
            (-1, 10),
            (0, 0),
            (0, 101),
            (MAX_PAGE + 1, 100),
            (i64::MAX, 100),
        ] {
            let result = service
                .list_by_category(ProductListRequest::new("c", page, size))
                .await;
            assert!(matches!(result, Err(ProductError::InvalidArgument(_))));
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_internal() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list_categories()
            .returning(|| Err(ProductError::Database(sea_orm::DbErr::Custom("down".into()))));

        let service = ProductService::new(mock_repo);
        let err = service.list_categories().await.unwrap_err();

        assert_eq!(err.kind(), "Internal");
    }
}
