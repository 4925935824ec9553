use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{CreateProduct, PageRequest, Product, ProductPage, UpdateProduct};

/// Repository trait for Product persistence. Performs no validation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product, the store assigns the id
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Apply the present fields atomically. `None` when the id is absent.
    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Option<Product>>;

    /// Delete a product by ID, `false` when the id is absent
    async fn delete(&self, id: i64) -> ProductResult<bool>;

    /// One page of products whose category equals `category` exactly,
    /// ordered by category then id
    async fn list_by_category(
        &self,
        category: &str,
        page: PageRequest,
    ) -> ProductResult<ProductPage>;

    /// Distinct categories in ascending order
    async fn list_categories(&self) -> ProductResult<Vec<String>>;
}

#[derive(Debug)]
struct Store {
    next_id: i64,
    products: BTreeMap<i64, Product>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            products: BTreeMap::new(),
        }
    }
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id += 1;

        let product = Product {
            id,
            category: input.category,
            name: input.name,
        };
        store.products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut store = self.store.write().await;

        let Some(product) = store.products.get_mut(&id) else {
            return Ok(None);
        };
        product.apply_update(input);

        tracing::info!(product_id = id, "Updated product");
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut store = self.store.write().await;
        let removed = store.products.remove(&id).is_some();

        if removed {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }

    async fn list_by_category(
        &self,
        category: &str,
        page: PageRequest,
    ) -> ProductResult<ProductPage> {
        let store = self.store.read().await;

        // BTreeMap iterates in id order, which is the tie-breaker within one category
        let matching: Vec<&Product> = store
            .products
            .values()
            .filter(|p| p.category == category)
            .collect();
        let total = matching.len() as u64;

        let items = matching
            .into_iter()
            .skip(
                page.offset()
                    .and_then(|offset| usize::try_from(offset).ok())
                    .unwrap_or(usize::MAX),
            )
            .take(usize::try_from(page.size).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(ProductPage::new(items, total, page))
    }

    async fn list_categories(&self) -> ProductResult<Vec<String>> {
        let store = self.store.read().await;

        let categories: BTreeSet<&str> = store
            .products
            .values()
            .map(|p| p.category.as_str())
            .collect();

        Ok(categories.into_iter().map(str::to_string).collect())
    }
}
