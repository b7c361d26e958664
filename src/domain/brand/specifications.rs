use super::aggregate::Brand;
use crate::shared::{QueryFilter, Specification};

// ============================================================================
// Brand Specifications
// ============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveBrands;

impl Specification<Brand> for ActiveBrands {
    fn is_satisfied_by(&self, candidate: &Brand) -> bool {
        candidate.is_active()
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("is_active", true))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BrandByActiveFlag(pub bool);

impl Specification<Brand> for BrandByActiveFlag {
    fn is_satisfied_by(&self, candidate: &Brand) -> bool {
        candidate.is_active() == self.0
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("is_active", self.0))
    }
}

/// Case-insensitive substring match on the brand name
#[derive(Debug, Clone)]
pub struct BrandSearch {
    term: String,
}

impl BrandSearch {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }
}

impl Specification<Brand> for BrandSearch {
    fn is_satisfied_by(&self, candidate: &Brand) -> bool {
        candidate.name().to_lowercase().contains(&self.term.to_lowercase())
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::contains("name", self.term.as_str()))
    }
}
