use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::aggregate::Brand;
use super::commands::{BrandCommand, CreateBrand};
use super::filter::BrandFilter;
use crate::config::PaginationConfig;
use crate::domain::workflow::{add_new, execute_and_save, fetch_page, load};
use crate::error::{DomainError, Outcome};
use crate::metrics::Metrics;
use crate::shared::PagedResult;
use crate::store::{Entity, Repository};

// ============================================================================
// Brand Service
// ============================================================================

pub struct BrandService {
    repository: Arc<dyn Repository<Brand>>,
    metrics: Arc<Metrics>,
    pagination: PaginationConfig,
}

impl BrandService {
    pub fn new(
        repository: Arc<dyn Repository<Brand>>,
        metrics: Arc<Metrics>,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            repository,
            metrics,
            pagination,
        }
    }

    pub async fn create(&self, name: String, description: Option<String>) -> Outcome<Brand> {
        let command = CreateBrand {
            brand_id: Uuid::new_v4(),
            name,
            description,
            at: Utc::now(),
        };
        let brand = Brand::create(&command)
            .map_err(DomainError::from)
            .inspect_err(|e| self.reject(e))?;

        add_new(self.repository.as_ref(), &self.metrics, brand, "BrandCreated").await
    }

    pub async fn get(&self, id: Uuid) -> Outcome<Brand> {
        load(self.repository.as_ref(), id).await
    }

    pub async fn list(&self, filter: &BrandFilter) -> Outcome<PagedResult<Brand>> {
        let (sort, request) = filter
            .sort()
            .map_err(DomainError::from)
            .and_then(|sort| Ok((sort, filter.page_request(&self.pagination)?)))
            .inspect_err(|e| self.reject(e))?;

        let spec = filter.specification();
        fetch_page(self.repository.as_ref(), &self.metrics, &spec, &sort, request).await
    }

    pub async fn rename(&self, id: Uuid, name: String) -> Outcome<Brand> {
        self.execute(id, BrandCommand::Rename { name, at: Utc::now() })
            .await
    }

    /// Deactivated brands stay readable but can no longer be assigned to products
    pub async fn deactivate(&self, id: Uuid) -> Outcome<Brand> {
        self.execute(id, BrandCommand::Deactivate { at: Utc::now() })
            .await
    }

    pub async fn reactivate(&self, id: Uuid) -> Outcome<Brand> {
        self.execute(id, BrandCommand::Reactivate { at: Utc::now() })
            .await
    }

    async fn execute(&self, id: Uuid, command: BrandCommand) -> Outcome<Brand> {
        let (brand, _) =
            execute_and_save(self.repository.as_ref(), &self.metrics, id, &command).await?;
        Ok(brand)
    }

    fn reject(&self, error: &DomainError) {
        self.metrics.record_failure(Brand::NAME, error);
        tracing::warn!(entity = Brand::NAME, error = %error, "Brand input rejected");
    }
}
