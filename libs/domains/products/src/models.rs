use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::ProductError;

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;
/// Highest page number whose offset still fits a signed 64-bit `OFFSET`
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

/// Rejects values made only of whitespace
fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }
    Ok(())
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Assigned by the store on creation, never changes
    pub id: i64,
    pub category: String,
    pub name: String,
}

impl Product {
    /// Overwrite only the fields present in `update`.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
    }
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 255), custom(function = "not_blank"))]
    pub category: String,
    #[validate(length(min = 1, max = 255), custom(function = "not_blank"))]
    pub name: String,
}

/// DTO for updating a product; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 255), custom(function = "not_blank"))]
    pub category: Option<String>,
    #[validate(length(min = 1, max = 255), custom(function = "not_blank"))]
    pub name: Option<String>,
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.name.is_none()
    }
}

/// Update body of the legacy `/update/product` route, id carried inline
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LegacyUpdateProduct {
    pub id: i64,
    pub category: Option<String>,
    pub name: Option<String>,
}

impl LegacyUpdateProduct {
    pub fn into_parts(self) -> (i64, UpdateProduct) {
        (
            self.id,
            UpdateProduct {
                category: self.category,
                name: self.name,
            },
        )
    }
}

/// Category listing request. JSON body on the legacy surface, query string
/// on the resource surface.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ProductListRequest {
    /// Exact, case-sensitive category to match
    pub category: String,
    /// Zero-based page number
    #[serde(default)]
    #[validate(range(min = 0, max = MAX_PAGE))]
    pub page: i64,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = MAX_PAGE_SIZE))]
    pub size: i64,
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl ProductListRequest {
    pub fn new(category: impl Into<String>, page: i64, size: i64) -> Self {
        Self {
            category: category.into(),
            page,
            size,
        }
    }

}

/// Validated, zero-based page bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

/// Page bounds can only be built from a request that passes validation.
impl TryFrom<&ProductListRequest> for PageRequest {
    type Error = ProductError;

    fn try_from(request: &ProductListRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        let page =
            u64::try_from(request.page).map_err(|e| ProductError::Internal(e.to_string()))?;
        let size =
            u64::try_from(request.size).map_err(|e| ProductError::Internal(e.to_string()))?;
        Ok(Self { page, size })
    }
}

impl PageRequest {
    /// Row offset, `None` when it does not fit a signed 64-bit `OFFSET`.
    pub fn offset(&self) -> Option<u64> {
        self.page
            .checked_mul(self.size)
            .filter(|offset| *offset <= i64::MAX as u64)
    }

    pub fn total_pages(&self, total_elements: u64) -> u64 {
        total_elements.div_ceil(self.size)
    }
}

/// One page of products in a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total_pages: u64,
    pub total_elements: u64,
    pub page_number: u64,
}

impl ProductPage {
    pub fn new(items: Vec<Product>, total_elements: u64, request: PageRequest) -> Self {
        Self {
            items,
            total_pages: request.total_pages(total_elements),
            total_elements,
            page_number: request.page,
        }
    }
}
