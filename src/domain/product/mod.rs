// ============================================================================
// Product Domain - Catalog and Inventory
// ============================================================================
//
// - Value objects (availability status, inventory movements)
// - Events and commands
// - Errors (ProductError enum)
// - Aggregate (Product with stock rules)
// - Specifications and the list filter
// - Service (ProductService)
//
// ============================================================================

pub mod aggregate;
pub mod commands;
pub mod errors;
pub mod events;
pub mod filter;
pub mod service;
pub mod specifications;
pub mod value_objects;

pub use aggregate::*;
pub use commands::*;
pub use errors::*;
pub use events::*;
pub use filter::*;
pub use service::*;
pub use specifications::*;
pub use value_objects::*;
