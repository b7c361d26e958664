use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::aggregate::Customer;
use super::commands::{CreateCustomer, CustomerCommand};
use super::filter::CustomerFilter;
use super::value_objects::CustomerType;
use crate::config::PaginationConfig;
use crate::domain::value_objects::{Address, AddressParts, Email, PhoneNumber};
use crate::domain::workflow::{add_new, execute_and_save, fetch_page, load};
use crate::error::{DomainError, Outcome};
use crate::metrics::Metrics;
use crate::shared::PagedResult;
use crate::store::{Entity, Repository};

// ============================================================================
// Customer Service
// ============================================================================
//
// Orchestrates: raw input → value objects → Customer command → repository
//
// ============================================================================

/// Raw input for a new customer
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: AddressParts,
    #[serde(default)]
    pub customer_type: CustomerType,
    #[serde(default)]
    pub is_vip: bool,
    pub notes: Option<String>,
}

/// Raw input replacing a customer's contact details
#[derive(Debug, Clone, Deserialize)]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

pub struct CustomerService {
    repository: Arc<dyn Repository<Customer>>,
    metrics: Arc<Metrics>,
    pagination: PaginationConfig,
}

impl CustomerService {
    pub fn new(
        repository: Arc<dyn Repository<Customer>>,
        metrics: Arc<Metrics>,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            repository,
            metrics,
            pagination,
        }
    }

    pub async fn create(&self, input: NewCustomer) -> Outcome<Customer> {
        let customer = Self::build(input).inspect_err(|e| self.reject(e))?;
        add_new(self.repository.as_ref(), &self.metrics, customer, "CustomerCreated").await
    }

    pub async fn get(&self, id: Uuid) -> Outcome<Customer> {
        load(self.repository.as_ref(), id).await
    }

    pub async fn list(&self, filter: &CustomerFilter) -> Outcome<PagedResult<Customer>> {
        let (sort, request) = filter
            .sort()
            .map_err(DomainError::from)
            .and_then(|sort| Ok((sort, filter.page_request(&self.pagination)?)))
            .inspect_err(|e| self.reject(e))?;

        let spec = filter.specification();
        fetch_page(self.repository.as_ref(), &self.metrics, &spec, &sort, request).await
    }

    pub async fn update_contact(&self, id: Uuid, details: ContactDetails) -> Outcome<Customer> {
        let command = Self::contact_command(details).inspect_err(|e| self.reject(e))?;
        self.execute(id, command).await
    }

    pub async fn change_address(&self, id: Uuid, address: AddressParts) -> Outcome<Customer> {
        let address = Address::try_from(address)
            .map_err(DomainError::from)
            .inspect_err(|e| self.reject(e))?;
        self.execute(id, CustomerCommand::ChangeAddress { address, at: Utc::now() })
            .await
    }

    pub async fn change_type(&self, id: Uuid, customer_type: CustomerType) -> Outcome<Customer> {
        self.execute(id, CustomerCommand::ChangeType { customer_type, at: Utc::now() })
            .await
    }

    pub async fn set_vip(&self, id: Uuid, is_vip: bool) -> Outcome<Customer> {
        self.execute(id, CustomerCommand::SetVip { is_vip, at: Utc::now() })
            .await
    }

    pub async fn deactivate(&self, id: Uuid, reason: Option<String>) -> Outcome<Customer> {
        self.execute(id, CustomerCommand::Deactivate { reason, at: Utc::now() })
            .await
    }

    pub async fn reactivate(&self, id: Uuid) -> Outcome<Customer> {
        self.execute(id, CustomerCommand::Reactivate { at: Utc::now() })
            .await
    }

    async fn execute(&self, id: Uuid, command: CustomerCommand) -> Outcome<Customer> {
        let (customer, _) =
            execute_and_save(self.repository.as_ref(), &self.metrics, id, &command).await?;
        Ok(customer)
    }

    fn build(input: NewCustomer) -> Outcome<Customer> {
        let command = CreateCustomer {
            customer_id: Uuid::new_v4(),
            email: Email::parse(&input.email)?,
            phone: input.phone.as_deref().map(PhoneNumber::parse).transpose()?,
            address: Address::try_from(input.address)?,
            first_name: input.first_name,
            last_name: input.last_name,
            customer_type: input.customer_type,
            is_vip: input.is_vip,
            notes: input.notes,
            at: Utc::now(),
        };
        Ok(Customer::create(&command)?)
    }

    fn contact_command(details: ContactDetails) -> Outcome<CustomerCommand> {
        Ok(CustomerCommand::UpdateContact {
            email: Email::parse(&details.email)?,
            phone: details.phone.as_deref().map(PhoneNumber::parse).transpose()?,
            first_name: details.first_name,
            last_name: details.last_name,
            notes: details.notes,
            at: Utc::now(),
        })
    }

    fn reject(&self, error: &DomainError) {
        self.metrics.record_failure(Customer::NAME, error);
        tracing::warn!(entity = Customer::NAME, error = %error, "Customer input rejected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::CustomerStatus;
    use crate::error::ErrorKind;
    use crate::store::InMemoryRepository;

    fn service() -> (CustomerService, Arc<Metrics>) {
        let metrics = Arc::new(Metrics::new().unwrap());
        let service = CustomerService::new(
            Arc::new(InMemoryRepository::<Customer>::new()),
            metrics.clone(),
            PaginationConfig::default(),
        );
        (service, metrics)
    }

    fn new_customer(first_name: &str, country: &str) -> NewCustomer {
        NewCustomer {
            first_name: first_name.to_string(),
            last_name: "Durand".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            phone: None,
            address: AddressParts {
                street: "2 Place Bellecour".to_string(),
                city: "Lyon".to_string(),
                zip_code: "69002".to_string(),
                country: country.to_string(),
            },
            customer_type: CustomerType::Prospect,
            is_vip: false,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (service, _) = service();

        let created = service.create(new_customer("Alice", "France")).await.unwrap();
        let loaded = service.get(created.id()).await.unwrap();

        assert_eq!(loaded, created);
        assert_eq!(loaded.customer_type(), CustomerType::Prospect);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_email_before_storing() {
        let (service, metrics) = service();
        let mut input = new_customer("Alice", "France");
        input.email = "alice-at-example.com".to_string();

        let err = service.create(input).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(metrics.validation_failures.with_label_values(&["Customer"]).get(), 1);

        let page = service.list(&CustomerFilter::default()).await.unwrap();
        assert_eq!(page.total_items, 0);
    }

    #[tokio::test]
    async fn test_missing_customer_is_not_found() {
        let (service, _) = service();
        let err = service.set_vip(Uuid::new_v4(), true).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_lifecycle_through_service() {
        let (service, metrics) = service();
        let id = service.create(new_customer("Alice", "France")).await.unwrap().id();

        service.change_type(id, CustomerType::Client).await.unwrap();
        service.set_vip(id, true).await.unwrap();
        let inactive = service.deactivate(id, Some("closed account".to_string())).await.unwrap();
        assert_eq!(inactive.status(), CustomerStatus::Inactive);

        let err = service.set_vip(id, false).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
        assert_eq!(metrics.rule_violations.with_label_values(&["Customer"]).get(), 1);

        let active = service.reactivate(id).await.unwrap();
        assert!(active.is_active());
        assert!(active.is_vip());
        assert_eq!(active.customer_type(), CustomerType::Client);
    }

    #[tokio::test]
    async fn test_update_contact_and_address() {
        let (service, _) = service();
        let id = service.create(new_customer("Alice", "France")).await.unwrap().id();

        let updated = service
            .update_contact(
                id,
                ContactDetails {
                    first_name: "Alicia".to_string(),
                    last_name: "Durand".to_string(),
                    email: "alicia@example.com".to_string(),
                    phone: Some("06 12 34 56 78".to_string()),
                    notes: Some("prefers email".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.first_name(), "Alicia");
        assert_eq!(updated.phone().map(PhoneNumber::as_str), Some("0612345678"));

        let err = service
            .change_address(
                id,
                AddressParts {
                    street: "".to_string(),
                    city: "Lyon".to_string(),
                    zip_code: "69002".to_string(),
                    country: "France".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_list_filters_sorts_and_pages() {
        let (service, metrics) = service();
        for name in ["Emma", "Alice", "Chloe", "Bruno"] {
            let customer = service.create(new_customer(name, "France")).await.unwrap();
            if name != "Bruno" {
                service.set_vip(customer.id(), true).await.unwrap();
            }
        }
        service.create(new_customer("Zoe", "Belgium")).await.unwrap();

        let filter = CustomerFilter {
            country: Some("France".to_string()),
            is_vip: Some(true),
            sort_by: Some("first_name".to_string()),
            page_size: Some(2),
            ..Default::default()
        };
        let first = service.list(&filter).await.unwrap();
        let names: Vec<_> = first.items.iter().map(Customer::first_name).collect();
        assert_eq!(names, vec!["Alice", "Chloe"]);
        assert_eq!(first.total_items, 3);
        assert_eq!(first.total_pages, 2);
        assert!(first.has_next_page());

        let second = service
            .list(&CustomerFilter { page_number: Some(2), ..filter.clone() })
            .await
            .unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].first_name(), "Emma");
        assert_eq!(metrics.page_queries.with_label_values(&["Customer"]).get(), 2);
    }

    #[tokio::test]
    async fn test_list_rejects_oversized_page() {
        let (service, _) = service();
        let filter = CustomerFilter { page_size: Some(500), ..Default::default() };

        let err = service.list(&filter).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
