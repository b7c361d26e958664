use super::aggregate::Customer;
use super::value_objects::{CustomerStatus, CustomerType};
use crate::shared::{QueryFilter, Specification};

// ============================================================================
// Customer Specifications
// ============================================================================

/// Customers whose address is in `country`. Exact, case-sensitive match.
#[derive(Debug, Clone)]
pub struct CustomerByCountry(pub String);

impl CustomerByCountry {
    pub fn new(country: impl Into<String>) -> Self {
        Self(country.into())
    }
}

impl Specification<Customer> for CustomerByCountry {
    fn is_satisfied_by(&self, candidate: &Customer) -> bool {
        candidate.address().country() == self.0
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("country", self.0.as_str()))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VipCustomers;

impl Specification<Customer> for VipCustomers {
    fn is_satisfied_by(&self, candidate: &Customer) -> bool {
        candidate.is_vip()
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("is_vip", true))
    }
}

/// VIP flag equal to the given value; `VipCustomers` is the `true` case
#[derive(Debug, Clone, Copy)]
pub struct CustomerByVipFlag(pub bool);

impl Specification<Customer> for CustomerByVipFlag {
    fn is_satisfied_by(&self, candidate: &Customer) -> bool {
        candidate.is_vip() == self.0
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("is_vip", self.0))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CustomerByType(pub CustomerType);

impl Specification<Customer> for CustomerByType {
    fn is_satisfied_by(&self, candidate: &Customer) -> bool {
        candidate.customer_type() == self.0
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("customer_type", self.0.as_str()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CustomerByStatus(pub CustomerStatus);

impl Specification<Customer> for CustomerByStatus {
    fn is_satisfied_by(&self, candidate: &Customer) -> bool {
        candidate.status() == self.0
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::equals("status", self.0.as_str()))
    }
}

/// Case-insensitive substring match on first name, last name or email
#[derive(Debug, Clone)]
pub struct CustomerSearch {
    term: String,
}

impl CustomerSearch {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }
}

impl Specification<Customer> for CustomerSearch {
    fn is_satisfied_by(&self, candidate: &Customer) -> bool {
        let needle = self.term.to_lowercase();
        [candidate.first_name(), candidate.last_name(), candidate.email().as_str()]
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(&needle))
    }

    fn to_query(&self) -> Option<QueryFilter> {
        Some(QueryFilter::Or(vec![
            QueryFilter::contains("first_name", self.term.as_str()),
            QueryFilter::contains("last_name", self.term.as_str()),
            QueryFilter::contains("email", self.term.as_str()),
        ]))
    }
}
