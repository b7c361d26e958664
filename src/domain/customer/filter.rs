use serde::{Deserialize, Serialize};

use super::aggregate::Customer;
use super::specifications::*;
use super::value_objects::{CustomerStatus, CustomerType};
use crate::config::PaginationConfig;
use crate::domain::workflow::{resolve_sort, search_term};
use crate::domain::value_objects::ValidationError;
use crate::shared::{AllOf, PageRequest, PaginationError, SortSpec};

pub const CUSTOMER_SORT_FIELDS: [&str; 7] = [
    "first_name",
    "last_name",
    "email",
    "country",
    "customer_type",
    "created_at",
    "updated_at",
];

// ============================================================================
// Customer List Filter
// ============================================================================

/// Caller-facing list query for customers; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerFilter {
    pub search: Option<String>,
    pub customer_type: Option<CustomerType>,
    pub status: Option<CustomerStatus>,
    pub country: Option<String>,
    pub is_vip: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_descending: bool,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl CustomerFilter {
    pub fn specification(&self) -> AllOf<Customer> {
        let mut spec = AllOf::new();
        if let Some(term) = search_term(self.search.as_deref()) {
            spec.push(CustomerSearch::new(term));
        }
        if let Some(customer_type) = self.customer_type {
            spec.push(CustomerByType(customer_type));
        }
        if let Some(status) = self.status {
            spec.push(CustomerByStatus(status));
        }
        if let Some(country) = search_term(self.country.as_deref()) {
            spec.push(CustomerByCountry::new(country));
        }
        if let Some(is_vip) = self.is_vip {
            spec.push(CustomerByVipFlag(is_vip));
        }
        spec
    }

    pub fn sort(&self) -> Result<SortSpec, ValidationError> {
        resolve_sort(
            self.sort_by.as_deref(),
            self.sort_descending,
            &CUSTOMER_SORT_FIELDS,
            "last_name",
        )
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{Specification, QueryFilter};

    #[test]
    fn test_empty_filter_matches_everything_with_defaults() {
        let filter: CustomerFilter = serde_json::from_str("{}").unwrap();

        assert!(filter.specification().is_empty());
        assert_eq!(filter.sort().unwrap(), SortSpec::ascending("last_name"));

        let request = filter.page_request(&PaginationConfig::default()).unwrap();
        assert_eq!(request.page_number(), 1);
        assert_eq!(request.page_size(), 12);
    }

    #[test]
    fn test_filter_builds_conjunction() {
        let filter: CustomerFilter = serde_json::from_str(
            r#"{"search": "  mar ", "customer_type": "Client", "country": "France", "is_vip": true}"#,
        )
        .unwrap();

        let spec = filter.specification();
        assert_eq!(spec.len(), 4);

        let Some(QueryFilter::And(parts)) = spec.to_query() else {
            panic!("expected a conjunction");
        };
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[1], QueryFilter::equals("customer_type", "Client"));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = CustomerFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(filter.specification().is_empty());
    }

    #[test]
    fn test_page_size_bounds() {
        let config = PaginationConfig::default();

        let too_large = CustomerFilter { page_size: Some(101), ..Default::default() };
        assert_eq!(
            too_large.page_request(&config).unwrap_err(),
            PaginationError::PageSizeTooLarge { requested: 101, max: 100 }
        );

        let zero_page = CustomerFilter { page_number: Some(0), ..Default::default() };
        assert_eq!(zero_page.page_request(&config).unwrap_err(), PaginationError::PageNumberTooSmall);
    }

    #[test]
    fn test_unknown_sort_field_rejected() {
        let filter = CustomerFilter {
            sort_by: Some("notes".to_string()),
            ..Default::default()
        };
        assert!(matches!(filter.sort(), Err(ValidationError::NotAllowed { .. })));
    }
}
