use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::aggregate::Product;
use super::commands::{CreateProduct, ProductCommand};
use super::errors::ProductError;
use super::filter::ProductFilter;
use super::value_objects::{InventoryMovementType, ProductAvailabilityStatus};
use crate::config::{InventoryPolicy, PaginationConfig};
use crate::domain::brand::Brand;
use crate::domain::workflow::{add_new, execute_and_save, fetch_page, load};
use crate::error::{DomainError, Outcome};
use crate::metrics::Metrics;
use crate::shared::PagedResult;
use crate::store::{Entity, Repository};

// ============================================================================
// Product Service
// ============================================================================

/// Raw input for a new product
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub brand_id: Option<Uuid>,
    pub price_cents: i64,
    #[serde(default)]
    pub is_service: bool,
}

pub struct ProductService {
    products: Arc<dyn Repository<Product>>,
    brands: Arc<dyn Repository<Brand>>,
    metrics: Arc<Metrics>,
    inventory: InventoryPolicy,
    pagination: PaginationConfig,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn Repository<Product>>,
        brands: Arc<dyn Repository<Brand>>,
        metrics: Arc<Metrics>,
        inventory: InventoryPolicy,
        pagination: PaginationConfig,
    ) -> Self {
        Self {
            products,
            brands,
            metrics,
            inventory,
            pagination,
        }
    }

    /// Create a product, checking that its brand (if any) exists and is active
    pub async fn create(&self, input: NewProduct) -> Outcome<Product> {
        if let Some(brand_id) = input.brand_id {
            self.ensure_brand_active(brand_id).await?;
        }

        let command = CreateProduct {
            product_id: Uuid::new_v4(),
            name: input.name,
            sku: input.sku,
            description: input.description,
            brand_id: input.brand_id,
            price_cents: input.price_cents,
            is_service: input.is_service,
            low_stock_threshold: self.inventory.low_stock_threshold,
            at: Utc::now(),
        };
        let product = Product::create(&command)
            .map_err(DomainError::from)
            .inspect_err(|e| self.reject(e))?;

        add_new(self.products.as_ref(), &self.metrics, product, "ProductCreated").await
    }

    pub async fn get(&self, id: Uuid) -> Outcome<Product> {
        load(self.products.as_ref(), id).await
    }

    pub async fn list(&self, filter: &ProductFilter) -> Outcome<PagedResult<Product>> {
        let (sort, request) = filter
            .sort()
            .map_err(DomainError::from)
            .and_then(|sort| Ok((sort, filter.page_request(&self.pagination)?)))
            .inspect_err(|e| self.reject(e))?;

        let spec = filter.specification();
        fetch_page(self.products.as_ref(), &self.metrics, &spec, &sort, request).await
    }

    /// Record an inventory movement
    pub async fn adjust_stock(
        &self,
        id: Uuid,
        movement_type: InventoryMovementType,
        amount: u32,
        reason: Option<String>,
    ) -> Outcome<Product> {
        let command = ProductCommand::AdjustStock {
            movement_type,
            amount,
            reason,
            at: Utc::now(),
        };
        let product = self.execute(id, command).await?;
        self.metrics.record_movement(movement_type.as_str());

        match product.status() {
            ProductAvailabilityStatus::LowStock | ProductAvailabilityStatus::OutOfStock => {
                tracing::warn!(
                    product_id = %id,
                    quantity = product.quantity(),
                    threshold = product.low_stock_threshold(),
                    status = %product.status(),
                    "Stock below threshold"
                );
            }
            _ => {
                tracing::debug!(product_id = %id, quantity = product.quantity(), "Stock adjusted");
            }
        }

        Ok(product)
    }

    pub async fn discontinue(&self, id: Uuid) -> Outcome<Product> {
        self.execute(id, ProductCommand::Discontinue { at: Utc::now() })
            .await
    }

    pub async fn reprice(&self, id: Uuid, price_cents: i64) -> Outcome<Product> {
        self.execute(id, ProductCommand::Reprice { price_cents, at: Utc::now() })
            .await
    }

    pub async fn rename(&self, id: Uuid, name: String) -> Outcome<Product> {
        self.execute(id, ProductCommand::Rename { name, at: Utc::now() })
            .await
    }

    pub async fn assign_brand(&self, id: Uuid, brand_id: Option<Uuid>) -> Outcome<Product> {
        if let Some(brand_id) = brand_id {
            self.ensure_brand_active(brand_id).await?;
        }
        self.execute(id, ProductCommand::AssignBrand { brand_id, at: Utc::now() })
            .await
    }

    pub async fn change_threshold(&self, id: Uuid, low_stock_threshold: u32) -> Outcome<Product> {
        self.execute(
            id,
            ProductCommand::ChangeThreshold {
                low_stock_threshold,
                at: Utc::now(),
            },
        )
        .await
    }

    async fn execute(&self, id: Uuid, command: ProductCommand) -> Outcome<Product> {
        let (product, _) =
            execute_and_save(self.products.as_ref(), &self.metrics, id, &command).await?;
        Ok(product)
    }

    async fn ensure_brand_active(&self, brand_id: Uuid) -> Outcome {
        let brand = load(self.brands.as_ref(), brand_id).await?;
        if !brand.is_active() {
            let error = DomainError::from(ProductError::BrandInactive(brand_id));
            self.reject(&error);
            return Err(error);
        }
        Ok(())
    }

    fn reject(&self, error: &DomainError) {
        self.metrics.record_failure(Product::NAME, error);
        tracing::warn!(entity = Product::NAME, error = %error, "Product input rejected");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::brand::BrandService;
    use crate::error::ErrorKind;
    use crate::store::InMemoryRepository;

    struct Fixture {
        products: ProductService,
        brands: BrandService,
        metrics: Arc<Metrics>,
    }

    fn fixture() -> Fixture {
        let metrics = Arc::new(Metrics::new().unwrap());
        let brand_repo: Arc<dyn Repository<Brand>> = Arc::new(InMemoryRepository::<Brand>::new());
        let pagination = PaginationConfig::default();

        Fixture {
            products: ProductService::new(
                Arc::new(InMemoryRepository::<Product>::new()),
                brand_repo.clone(),
                metrics.clone(),
                InventoryPolicy { low_stock_threshold: 3 },
                pagination,
            ),
            brands: BrandService::new(brand_repo, metrics.clone(), pagination),
            metrics,
        }
    }

    fn new_product(name: &str, brand_id: Option<Uuid>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            sku: None,
            description: Some("Stainless steel".to_string()),
            brand_id,
            price_cents: 4500,
            is_service: false,
        }
    }

    #[tokio::test]
    async fn test_create_takes_threshold_from_policy() {
        let f = fixture();
        let product = f.products.create(new_product("Kettle", None)).await.unwrap();

        assert_eq!(product.low_stock_threshold(), 3);
        assert_eq!(f.products.get(product.id()).await.unwrap(), product);
    }

    #[tokio::test]
    async fn test_create_checks_brand() {
        let f = fixture();

        let missing = f.products.create(new_product("Kettle", Some(Uuid::new_v4()))).await.unwrap_err();
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let brand = f.brands.create("Acme".to_string(), None).await.unwrap();
        f.products.create(new_product("Kettle", Some(brand.id()))).await.unwrap();

        f.brands.deactivate(brand.id()).await.unwrap();
        let inactive = f.products.create(new_product("Toaster", Some(brand.id()))).await.unwrap_err();
        assert!(matches!(inactive, DomainError::Product(ProductError::BrandInactive(id)) if id == brand.id()));
        assert_eq!(inactive.kind(), ErrorKind::InvariantViolation);
    }

    #[tokio::test]
    async fn test_adjust_stock_flow() {
        let f = fixture();
        let id = f.products.create(new_product("Kettle", None)).await.unwrap().id();

        f.products
            .adjust_stock(id, InventoryMovementType::InitialStock, 10, Some("opening count".to_string()))
            .await
            .unwrap();
        let product = f.products
            .adjust_stock(id, InventoryMovementType::Outbound, 8, None)
            .await
            .unwrap();

        assert_eq!(product.quantity(), 2);
        assert_eq!(product.status(), ProductAvailabilityStatus::LowStock);
        assert_eq!(product.movements().len(), 2);
        assert_eq!(f.metrics.inventory_movements.with_label_values(&["Outbound"]).get(), 1);

        let err = f.products
            .adjust_stock(id, InventoryMovementType::Outbound, 5, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvariantViolation);
        assert_eq!(f.products.get(id).await.unwrap().quantity(), 2);
    }

    #[tokio::test]
    async fn test_discontinue_and_reprice() {
        let f = fixture();
        let id = f.products.create(new_product("Kettle", None)).await.unwrap().id();

        let repriced = f.products.reprice(id, 3900).await.unwrap();
        assert_eq!(repriced.price_cents(), 3900);

        let discontinued = f.products.discontinue(id).await.unwrap();
        assert_eq!(discontinued.status(), ProductAvailabilityStatus::Discontinued);

        let err = f.products.reprice(id, 100).await.unwrap_err();
        assert!(matches!(err, DomainError::Product(ProductError::Discontinued)));
    }

    #[tokio::test]
    async fn test_list_by_status() {
        let f = fixture();
        let stocked = f.products.create(new_product("Kettle", None)).await.unwrap().id();
        f.products.create(new_product("Toaster", None)).await.unwrap();
        f.products
            .adjust_stock(stocked, InventoryMovementType::InitialStock, 50, None)
            .await
            .unwrap();

        let filter = ProductFilter {
            status: Some(ProductAvailabilityStatus::OutOfStock),
            ..Default::default()
        };
        let page = f.products.list(&filter).await.unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].name(), "Toaster");
    }
}
