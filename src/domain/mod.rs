// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each aggregate has its own subdirectory with:
// - Value objects
// - Events and commands
// - Errors
// - Aggregate implementation
// - Specifications and the list filter
// - Service
//
// Shared value objects (email, phone, address, role) live in value_objects.
//
// ============================================================================

pub mod brand;
pub mod customer;
pub mod product;
pub mod user;
pub mod value_objects;

pub(crate) mod workflow;
