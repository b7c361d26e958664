use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregate::Product;
use super::specifications::*;
use super::value_objects::ProductAvailabilityStatus;
use crate::config::PaginationConfig;
use crate::domain::value_objects::ValidationError;
use crate::domain::workflow::{resolve_sort, search_term};
use crate::shared::{AllOf, PageRequest, PaginationError, SortSpec};

pub const PRODUCT_SORT_FIELDS: [&str; 6] = [
    "name",
    "sku",
    "price_cents",
    "quantity",
    "created_at",
    "updated_at",
];

// ============================================================================
// Product List Filter
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub brand_id: Option<Uuid>,
    pub status: Option<ProductAvailabilityStatus>,
    pub is_service: Option<bool>,
    pub is_active: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_descending: bool,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl ProductFilter {
    pub fn specification(&self) -> AllOf<Product> {
        let mut spec = AllOf::new();
        if let Some(term) = search_term(self.search.as_deref()) {
            spec.push(ProductSearch::new(term));
        }
        if let Some(brand_id) = self.brand_id {
            spec.push(ProductByBrand(brand_id));
        }
        if let Some(status) = self.status {
            spec.push(ProductByAvailability(status));
        }
        if let Some(is_service) = self.is_service {
            spec.push(ProductByServiceFlag(is_service));
        }
        if let Some(is_active) = self.is_active {
            spec.push(ProductByActiveFlag(is_active));
        }
        spec
    }

    pub fn sort(&self) -> Result<SortSpec, ValidationError> {
        resolve_sort(self.sort_by.as_deref(), self.sort_descending, &PRODUCT_SORT_FIELDS, "name")
    }

    pub fn page_request(&self, config: &PaginationConfig) -> Result<PageRequest, PaginationError> {
        PageRequest::from_parts(
            self.page_number,
            self.page_size,
            config.default_page_size,
            config.max_page_size,
        )
    }
}
