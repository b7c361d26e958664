// ============================================================================
// Customer Domain - Business Logic for the Customer Aggregate
// ============================================================================
//
// This module contains ALL Customer-specific code:
// - Value objects (CustomerType, CustomerStatus)
// - Events and commands
// - Errors (CustomerError enum)
// - Aggregate (Customer with its lifecycle rules)
// - Specifications and the list filter
// - Service (CustomerService)
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

// Re-export for convenience
pub use aggregate::*;
pub use commands::*;
pub use errors::*;
pub use events::*;
pub use filter::*;
pub use service::*;
pub use specifications::*;
pub use value_objects::*;
