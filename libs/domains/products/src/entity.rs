use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{CreateProduct, Product};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub product_id: i64,
    pub category: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.product_id,
            category: model.category,
            name: model.name,
        }
    }
}

// The id is left to the store.
impl From<CreateProduct> for ActiveModel {
    fn from(input: CreateProduct) -> Self {
        ActiveModel {
            product_id: NotSet,
            category: Set(input.category),
            name: Set(input.name),
        }
    }
}
