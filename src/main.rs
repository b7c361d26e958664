use std::sync::Arc;

use commerce_core::domain::brand::{Brand, BrandService};
use commerce_core::domain::customer::{Customer, CustomerFilter, CustomerService, CustomerType, NewCustomer};
use commerce_core::domain::product::{InventoryMovementType, NewProduct, Product, ProductService};
use commerce_core::domain::user::{NewUser, User, UserService};
use commerce_core::domain::value_objects::AddressParts;
use commerce_core::notifications::TracingEmailSender;
use commerce_core::store::{InMemoryRepository, Repository};
use commerce_core::{CoreConfig, Metrics};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional .env file; real environment variables take precedence
    dotenvy::dotenv().ok();

    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,commerce_core=debug")),
        )
        .init();

    let config = CoreConfig::from_env()?;
    tracing::info!(
        max_failed_logins = config.lockout.max_failed_attempts,
        lockout_minutes = config.lockout.lockout_minutes,
        low_stock_threshold = config.inventory.low_stock_threshold,
        max_page_size = config.pagination.max_page_size,
        "Starting commerce core demo"
    );

    // === 1. Metrics and storage ===
    let metrics = Arc::new(Metrics::new()?);
    let brand_repo: Arc<dyn Repository<Brand>> = Arc::new(InMemoryRepository::<Brand>::new());

    let customers = CustomerService::new(
        Arc::new(InMemoryRepository::<Customer>::new()),
        metrics.clone(),
        config.pagination,
    );
    let brands = BrandService::new(brand_repo.clone(), metrics.clone(), config.pagination);
    let products = ProductService::new(
        Arc::new(InMemoryRepository::<Product>::new()),
        brand_repo,
        metrics.clone(),
        config.inventory,
        config.pagination,
    );
    let users = UserService::new(
        Arc::new(InMemoryRepository::<User>::new()),
        Arc::new(TracingEmailSender),
        metrics.clone(),
        config.lockout,
        config.pagination,
    );

    // === 2. Customers ===
    let customer = customers
        .create(NewCustomer {
            first_name: "Camille".to_string(),
            last_name: "Durand".to_string(),
            email: "Camille.Durand@Example.com".to_string(),
            phone: Some("+33 6 12 34 56 78".to_string()),
            address: AddressParts {
                street: "2 Place Bellecour".to_string(),
                city: "Lyon".to_string(),
                zip_code: "69002".to_string(),
                country: "France".to_string(),
            },
            customer_type: CustomerType::Prospect,
            is_vip: false,
            notes: None,
        })
        .await?;
    customers.set_vip(customer.id(), true).await?;

    if let Err(e) = customers.reactivate(customer.id()).await {
        tracing::info!(error = %e, kind = ?e.kind(), "Rejected as expected");
    }

    let page = customers
        .list(&CustomerFilter {
            country: Some("france".to_string()),
            is_vip: Some(true),
            ..Default::default()
        })
        .await?;
    println!("{}", serde_json::to_string_pretty(&page)?);

    // === 3. Brands and products ===
    let brand = brands.create("Acme".to_string(), Some("Kitchen hardware".to_string())).await?;
    let kettle = products
        .create(NewProduct {
            name: "Kettle".to_string(),
            sku: Some("KT-100".to_string()),
            description: None,
            brand_id: Some(brand.id()),
            price_cents: 4500,
            is_service: false,
        })
        .await?;
    products
        .adjust_stock(kettle.id(), InventoryMovementType::InitialStock, 20, None)
        .await?;
    let kettle = products
        .adjust_stock(kettle.id(), InventoryMovementType::Outbound, 17, Some("order batch".to_string()))
        .await?;
    tracing::info!(quantity = kettle.quantity(), status = %kettle.status(), "Kettle stock");

    // === 4. Users and lockout ===
    let user = users
        .register(NewUser {
            email: "ops@example.com".to_string(),
            first_name: "Sam".to_string(),
            last_name: "Martin".to_string(),
            role: Some("Manager".to_string()),
        })
        .await?;
    for _ in 0..config.lockout.max_failed_attempts {
        let outcome = users.record_login(user.id(), false).await?;
        tracing::info!(outcome = outcome.label(), "Login attempt");
    }
    if let Err(e) = users.record_login(user.id(), true).await {
        tracing::info!(error = %e, "Login refused while locked out");
    }

    // === 5. Metrics summary ===
    println!("{}", metrics.render()?);

    tracing::info!("Demo complete");
    Ok(())
}
