use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::{
    entity,
    error::ProductResult,
    models::{CreateProduct, PageRequest, Product, ProductPage, UpdateProduct},
    repository::ProductRepository,
};

/// The SeaORM store. Named for its production backend, Postgres; it runs on
/// any backend SeaORM supports and the tests drive it on SQLite.
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.product_id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Option<Product>> {
        // Dropping the transaction without commit rolls it back
        let txn = self.db.begin().await?;

        let Some(model) = entity::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        if input.is_empty() {
            txn.commit().await?;
            return Ok(Some(model.into()));
        }

        let mut active_model = model.into_active_model();
        if let Some(category) = input.category {
            active_model.category = Set(category);
        }
        if let Some(name) = input.name {
            active_model.name = Set(name);
        }

        let updated = active_model.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(product_id = id, "Updated product");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let txn = self.db.begin().await?;

        if entity::Entity::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(false);
        }

        let result = entity::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list_by_category(
        &self,
        category: &str,
        page: PageRequest,
    ) -> ProductResult<ProductPage> {
        let paginator = entity::Entity::find()
            .filter(entity::Column::Category.eq(category))
            .order_by_asc(entity::Column::Category)
            .order_by_asc(entity::Column::ProductId)
            .paginate(&self.db, page.size);

        let total = paginator.num_items().await?;

        // fetch_page multiplies page by size unchecked
        if page.offset().is_none() {
            return Ok(ProductPage::new(Vec::new(), total, page));
        }
        let models = paginator.fetch_page(page.page).await?;

        let items = models.into_iter().map(Into::into).collect();
        Ok(ProductPage::new(items, total, page))
    }

    async fn list_categories(&self) -> ProductResult<Vec<String>> {
        let categories = entity::Entity::find()
            .select_only()
            .column(entity::Column::Category)
            .distinct()
            .order_by_asc(entity::Column::Category)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;

        Ok(categories)
    }
}
