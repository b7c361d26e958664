use uuid::Uuid;

use super::aggregate::Product;
use super::value_objects::ProductAvailabilityStatus;
use crate::shared::{QueryFilter, Specification};

// ============================================================================
// Product Specifications
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct ProductByBrand(pub Uuid);

impl Specification<Product> for ProductByBrand {
    fn is_satisfied_by(&self, candidate: &Product) -> bool {
        candidate.brand_id() == Some(self.0)
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("brand_id", self.0))
    }
}

/// Products whose derived availability equals the given status
#[derive(Debug, Clone, Copy)]
pub struct ProductByAvailability(pub ProductAvailabilityStatus);

impl Specification<Product> for ProductByAvailability {
    fn is_satisfied_by(&self, candidate: &Product) -> bool {
        candidate.status() == self.0
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("availability_status", self.0.as_str()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveProducts;

impl Specification<Product> for ActiveProducts {
    fn is_satisfied_by(&self, candidate: &Product) -> bool {
        candidate.is_active()
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("is_active", true))
    }
}

/// Active flag equal to the given value; `ActiveProducts` is the `true` case
#[derive(Debug, Clone, Copy)]
pub struct ProductByActiveFlag(pub bool);

impl Specification<Product> for ProductByActiveFlag {
    fn is_satisfied_by(&self, candidate: &Product) -> bool {
        candidate.is_active() == self.0
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("is_active", self.0))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceProducts;

impl Specification<Product> for ServiceProducts {
    fn is_satisfied_by(&self, candidate: &Product) -> bool {
        candidate.is_service()
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("is_service", true))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProductByServiceFlag(pub bool);

impl Specification<Product> for ProductByServiceFlag {
    fn is_satisfied_by(&self, candidate: &Product) -> bool {
        candidate.is_service() == self.0
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("is_service", self.0))
    }
}

/// Case-insensitive substring match on name or SKU
#[derive(Debug, Clone)]
pub struct ProductSearch {
    term: String,
}

impl ProductSearch {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }
}

impl Specification<Product> for ProductSearch {
    fn is_satisfied_by(&self, candidate: &Product) -> bool {
        let needle = self.term.to_lowercase();
        candidate.name().to_lowercase().contains(&needle)
            || candidate
                .sku()
                .is_some_and(|sku| sku.to_lowercase().contains(&needle))
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::Or(vec![
            QueryFilter::contains("name", self.term.as_str()),
            QueryFilter::contains("sku", self.term.as_str()),
        ]))
    }
}
