use serde::{Deserialize, Serialize};

use super::aggregate::Brand;
use super::specifications::*;
use crate::config::PaginationConfig;
use crate::domain::value_objects::ValidationError;
use crate::domain::workflow::{resolve_sort, search_term};
use crate::shared::{AllOf, PageRequest, PaginationError, SortSpec};

pub const BRAND_SORT_FIELDS: [&str; 3] = ["name", "created_at", "updated_at"];

// ============================================================================
// Brand List Filter
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandFilter {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_descending: bool,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl BrandFilter {
    pub fn specification(&self) -> AllOf<Brand> {
        let mut spec = AllOf::new();
        if let Some(term) = search_term(self.search.as_deref()) {
            spec.push(BrandSearch::new(term));
        }
        if let Some(is_active) = self.is_active {
            spec.push(BrandByActiveFlag(is_active));
        }
        spec
    }

    pub fn sort(&self) -> Result<SortSpec, ValidationError> {
        resolve_sort(self.sort_by.as_deref(), self.sort_descending, &BRAND_SORT_FIELDS, "name")
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
