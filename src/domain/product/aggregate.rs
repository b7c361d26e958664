use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::commands::{CreateProduct, ProductCommand};
use super::errors::ProductError;
use super::events::*;
use super::value_objects::{InventoryMovement, InventoryMovementType, ProductAvailabilityStatus};
use crate::domain::value_objects::{optional_text, required_text, ValidationError};
use crate::shared::{Aggregate, FieldAccess, FieldValue};
use crate::store::Entity;

pub const PRODUCT_NAME_MAX_LEN: usize = 200;
pub const SKU_MAX_LEN: usize = 64;
pub const DESCRIPTION_MAX_LEN: usize = 2000;
pub const REASON_MAX_LEN: usize = 500;

// ============================================================================
// Product Aggregate - Business Logic
// ============================================================================
//
// Stock changes only through inventory movements. Each movement records the
// quantity it left behind, so `quantity` always equals the replay of
// `movements`.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    product_id: Uuid,
    version: i64,
    name: String,
    sku: Option<String>,
    description: Option<String>,
    brand_id: Option<Uuid>,
    price_cents: i64,
    is_service: bool,
    is_active: bool,
    quantity: u32,
    low_stock_threshold: u32,
    movements: Vec<InventoryMovement>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    pub fn create(command: &CreateProduct) -> Result<Self, ProductError> {
        let event = ProductEvent::Created(ProductCreated {
            product_id: command.product_id,
            name: required_text("name", &command.name, PRODUCT_NAME_MAX_LEN)?,
            sku: optional_text("sku", command.sku.as_deref(), SKU_MAX_LEN)?,
            description: optional_text("description", command.description.as_deref(), DESCRIPTION_MAX_LEN)?,
            brand_id: command.brand_id,
            price_cents: validate_price(command.price_cents)?,
            is_service: command.is_service,
            low_stock_threshold: command.low_stock_threshold,
            at: command.at,
        });
        Self::apply_first_event(&event)
    }

    pub fn id(&self) -> Uuid {
        self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> Option<&str> {
        self.sku.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn brand_id(&self) -> Option<Uuid> {
        self.brand_id
    }

    pub fn price_cents(&self) -> i64 {
        self.price_cents
    }

    pub fn is_service(&self) -> bool {
        self.is_service
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn low_stock_threshold(&self) -> u32 {
        self.low_stock_threshold
    }

    pub fn movements(&self) -> &[InventoryMovement] {
        &self.movements
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Availability derived from the current state; checked in this order
    pub fn status(&self) -> ProductAvailabilityStatus {
        if !self.is_active {
            ProductAvailabilityStatus::Discontinued
        } else if self.is_service {
            ProductAvailabilityStatus::InStock
        } else if self.quantity == 0 {
            ProductAvailabilityStatus::OutOfStock
        } else if self.quantity < self.low_stock_threshold {
            ProductAvailabilityStatus::LowStock
        } else {
            ProductAvailabilityStatus::InStock
        }
    }

    fn validate_active(&self) -> Result<(), ProductError> {
        if self.is_active {
            Ok(())
        } else {
            Err(ProductError::Discontinued)
        }
    }

    fn validate_movement(
        &self,
        movement_type: InventoryMovementType,
        amount: u32,
    ) -> Result<u32, ProductError> {
        if amount == 0 {
            return Err(ValidationError::OutOfRange {
                field: "amount",
                reason: "must be greater than zero".to_string(),
            }
            .into());
        }
        if self.is_service {
            return Err(ProductError::ServiceHasNoStock);
        }
        if !self.is_active && movement_type.is_replenishment() {
            return Err(ProductError::ReplenishmentRefused(movement_type));
        }
        if movement_type == InventoryMovementType::InitialStock && !self.movements.is_empty() {
            return Err(ProductError::InitialStockAlreadyRecorded);
        }

        movement_type.apply(self.quantity, amount).ok_or_else(|| {
            if movement_type.is_decrease() {
                ProductError::InsufficientStock {
                    requested: amount,
                    available: self.quantity,
                }
            } else {
                ProductError::StockOverflow { max: u32::MAX }
            }
        })
    }
}

fn validate_price(price_cents: i64) -> Result<i64, ValidationError> {
    if price_cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price",
            reason: "must not be negative".to_string(),
        });
    }
    Ok(price_cents)
}

impl Aggregate for Product {
    type Event = ProductEvent;
    type Command = ProductCommand;
    type Error = ProductError;

    fn apply_first_event(event: &Self::Event) -> Result<Self, Self::Error> {
        match event {
            ProductEvent::Created(e) => Ok(Self {
                product_id: e.product_id,
                version: 1,
                name: e.name.clone(),
                sku: e.sku.clone(),
                description: e.description.clone(),
                brand_id: e.brand_id,
                price_cents: e.price_cents,
                is_service: e.is_service,
                is_active: true,
                quantity: 0,
                low_stock_threshold: e.low_stock_threshold,
                movements: Vec::new(),
                created_at: e.at,
                updated_at: e.at,
            }),
            _ => Err(ProductError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error> {
        match event {
            ProductEvent::Created(_) => {
                // Already applied in apply_first_event
            }
            ProductEvent::Renamed(e) => {
                self.name = e.new_name.clone();
                self.updated_at = e.at;
            }
            ProductEvent::Repriced(e) => {
                self.price_cents = e.new_price_cents;
                self.updated_at = e.at;
            }
            ProductEvent::BrandAssigned(e) => {
                self.brand_id = e.brand_id;
                self.updated_at = e.at;
            }
            ProductEvent::ThresholdChanged(e) => {
                self.low_stock_threshold = e.low_stock_threshold;
                self.updated_at = e.at;
            }
            ProductEvent::StockAdjusted(e) => {
                self.quantity = e.movement.resulting_quantity;
                self.updated_at = e.movement.occurred_at;
                self.movements.push(e.movement.clone());
            }
            ProductEvent::Discontinued(e) => {
                self.is_active = false;
                self.updated_at = e.at;
            }
        }

        self.version += 1;
        Ok(())
    }

    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ProductCommand::AdjustStock {
                movement_type,
                amount,
                reason,
                at,
            } => {
                let resulting_quantity = self.validate_movement(*movement_type, *amount)?;

                Ok(vec![ProductEvent::StockAdjusted(ProductStockAdjusted {
                    movement: InventoryMovement {
                        id: Uuid::new_v4(),
                        movement_type: *movement_type,
                        quantity: *amount,
                        resulting_quantity,
                        reason: optional_text("reason", reason.as_deref(), REASON_MAX_LEN)?,
                        occurred_at: *at,
                    },
                })])
            }

            ProductCommand::Rename { name, at } => {
                self.validate_active()?;
                let new_name = required_text("name", name, PRODUCT_NAME_MAX_LEN)?;

                if new_name == self.name {
                    return Ok(vec![]); // No change
                }

                Ok(vec![ProductEvent::Renamed(ProductRenamed {
                    old_name: self.name.clone(),
                    new_name,
                    at: *at,
                })])
            }

            ProductCommand::Reprice { price_cents, at } => {
                self.validate_active()?;
                let new_price_cents = validate_price(*price_cents)?;

                if new_price_cents == self.price_cents {
                    return Ok(vec![]);
                }

                Ok(vec![ProductEvent::Repriced(ProductRepriced {
                    old_price_cents: self.price_cents,
                    new_price_cents,
                    at: *at,
                })])
            }

            ProductCommand::AssignBrand { brand_id, at } => {
                self.validate_active()?;

                if *brand_id == self.brand_id {
                    return Ok(vec![]);
                }

                Ok(vec![ProductEvent::BrandAssigned(ProductBrandAssigned {
                    brand_id: *brand_id,
                    at: *at,
                })])
            }

            ProductCommand::ChangeThreshold { low_stock_threshold, at } => {
                self.validate_active()?;

                if *low_stock_threshold == self.low_stock_threshold {
                    return Ok(vec![]);
                }

                Ok(vec![ProductEvent::ThresholdChanged(ProductThresholdChanged {
                    low_stock_threshold: *low_stock_threshold,
                    at: *at,
                })])
            }

            ProductCommand::Discontinue { at } => {
                if !self.is_active {
                    return Err(ProductError::AlreadyDiscontinued);
                }

                Ok(vec![ProductEvent::Discontinued(ProductDiscontinued { at: *at })])
            }
        }
    }

    fn aggregate_id(&self) -> Uuid {
        self.product_id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl FieldAccess for Product {
    fn field(&self, name: &str) -> Option<FieldValue> {
        let value: FieldValue = match name {
            "id" => self.product_id.into(),
            "name" => self.name.as_str().into(),
            "sku" => self.sku.as_deref()?.into(),
            "brand_id" => self.brand_id?.into(),
            "price_cents" => self.price_cents.into(),
            "is_service" => self.is_service.into(),
            "is_active" => self.is_active.into(),
            "quantity" => self.quantity.into(),
            "availability_status" => self.status().as_str().into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => return None,
        };
        Some(value)
    }
}

impl Entity for Product {
    const NAME: &'static str = "Product";
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::product::value_objects::fold_movements;
    use crate::error::ErrorKind;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use InventoryMovementType::*;

    pub(crate) fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 14, minute, 0).unwrap()
    }

    pub(crate) fn create_command(name: &str, is_service: bool) -> CreateProduct {
        CreateProduct {
            product_id: Uuid::new_v4(),
            name: name.to_string(),
            sku: Some(format!("SKU-{}", name.to_uppercase())),
            description: None,
            brand_id: None,
            price_cents: 1999,
            is_service,
            low_stock_threshold: 5,
            at: at(0),
        }
    }

    pub(crate) fn create_test_product() -> Product {
        Product::create(&create_command("Kettle", false)).unwrap()
    }

    fn adjust(product: &mut Product, movement_type: InventoryMovementType, amount: u32) -> Result<(), ProductError> {
        product
            .execute(&ProductCommand::AdjustStock {
                movement_type,
                amount,
                reason: None,
                at: at(1),
            })
            .map(|_| ())
    }

    #[test]
    fn test_new_product_is_out_of_stock() {
        let product = create_test_product();
        assert_eq!(product.quantity(), 0);
        assert_eq!(product.status(), ProductAvailabilityStatus::OutOfStock);
    }

    #[test]
    fn test_status_derivation() {
        let mut product = create_test_product();

        adjust(&mut product, InitialStock, 3).unwrap();
        assert_eq!(product.status(), ProductAvailabilityStatus::LowStock);

        adjust(&mut product, Inbound, 2).unwrap();
        assert_eq!(product.quantity(), 5);
        assert_eq!(product.status(), ProductAvailabilityStatus::InStock);

        adjust(&mut product, Outbound, 5).unwrap();
        assert_eq!(product.status(), ProductAvailabilityStatus::OutOfStock);

        product.execute(&ProductCommand::Discontinue { at: at(2) }).unwrap();
        assert_eq!(product.status(), ProductAvailabilityStatus::Discontinued);
    }

    #[test]
    fn test_service_product_is_always_in_stock_and_has_no_movements() {
        let mut service = Product::create(&create_command("Installation", true)).unwrap();
        assert_eq!(service.status(), ProductAvailabilityStatus::InStock);

        for movement_type in InventoryMovementType::ALL {
            assert_eq!(adjust(&mut service, movement_type, 1), Err(ProductError::ServiceHasNoStock));
        }
        assert!(service.movements().is_empty());
    }

    #[test]
    fn test_initial_stock_only_first() {
        let mut product = create_test_product();
        adjust(&mut product, Inbound, 4).unwrap();

        assert_eq!(
            adjust(&mut product, InitialStock, 10),
            Err(ProductError::InitialStockAlreadyRecorded)
        );
    }

    #[test]
    fn test_decrease_never_goes_negative() {
        let mut product = create_test_product();
        adjust(&mut product, InitialStock, 2).unwrap();
        let snapshot = product.clone();

        assert_eq!(
            adjust(&mut product, Outbound, 3),
            Err(ProductError::InsufficientStock { requested: 3, available: 2 })
        );
        assert!(adjust(&mut product, CorrectionDecrease, 3).is_err());
        assert_eq!(product, snapshot);
    }

    #[test]
    fn test_zero_amount_is_a_validation_error() {
        let mut product = create_test_product();
        let err = adjust(&mut product, Inbound, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_discontinued_product_movements() {
        let mut product = create_test_product();
        adjust(&mut product, InitialStock, 10).unwrap();
        product.execute(&ProductCommand::Discontinue { at: at(2) }).unwrap();

        assert_eq!(
            adjust(&mut product, Inbound, 1),
            Err(ProductError::ReplenishmentRefused(Inbound))
        );
        adjust(&mut product, Outbound, 4).unwrap();
        adjust(&mut product, Return, 1).unwrap();
        adjust(&mut product, CorrectionDecrease, 7).unwrap();

        assert_eq!(product.quantity(), 0);
        assert_eq!(product.status(), ProductAvailabilityStatus::Discontinued);
        assert_eq!(
            product.execute(&ProductCommand::Discontinue { at: at(3) }),
            Err(ProductError::AlreadyDiscontinued)
        );
        assert_eq!(
            product.execute(&ProductCommand::Reprice { price_cents: 10, at: at(3) }),
            Err(ProductError::Discontinued)
        );
    }

    #[test]
    fn test_movements_record_resulting_quantity() {
        let mut product = create_test_product();
        adjust(&mut product, InitialStock, 10).unwrap();
        adjust(&mut product, Outbound, 3).unwrap();
        adjust(&mut product, Return, 1).unwrap();

        let resulting: Vec<_> = product.movements().iter().map(|m| m.resulting_quantity).collect();
        assert_eq!(resulting, vec![10, 7, 8]);
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut command = create_command("Kettle", false);
        command.price_cents = -1;
        assert!(matches!(
            Product::create(&command),
            Err(ProductError::Validation(ValidationError::OutOfRange { field: "price", .. }))
        ));
    }

    #[test]
    fn test_rename_and_field_access() {
        let mut product = create_test_product();
        product
            .execute(&ProductCommand::Rename { name: "  Tea Kettle ".to_string(), at: at(4) })
            .unwrap();

        assert_eq!(product.name(), "Tea Kettle");
        assert_eq!(product.field("brand_id"), None);
        assert_eq!(
            product.field("availability_status"),
            Some(FieldValue::Text("OutOfStock".to_string()))
        );
    }

    fn movement_type() -> impl Strategy<Value = InventoryMovementType> {
        prop::sample::select(InventoryMovementType::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn quantity_always_equals_movement_fold(
            steps in prop::collection::vec((movement_type(), 0u32..20, any::<bool>()), 0..40)
        ) {
            let mut product = create_test_product();
            for (movement_type, amount, discontinue) in steps {
                let _ = adjust(&mut product, movement_type, amount);
                if discontinue && product.is_active() && amount % 7 == 0 {
                    product.execute(&ProductCommand::Discontinue { at: at(5) }).unwrap();
                }
                prop_assert_eq!(fold_movements(product.movements()), Some(product.quantity()));
                prop_assert_eq!(product.movements().last().map_or(0, |m| m.resulting_quantity), product.quantity());
            }
        }
    }
}
