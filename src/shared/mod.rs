// ============================================================================
// Shared Kernel - Generic Domain Infrastructure
// ============================================================================
//
// Reusable building blocks that every aggregate is built on:
// - Aggregate trait (command -> events -> apply, all-or-nothing)
// - Domain event naming
// - Declarative query filters and field access
// - Specifications and their composition
// - Sorting and pagination
//
// No domain-specific code (no Customer, Product, User, ...) lives here.
//
// ============================================================================

pub mod aggregate;
pub mod event;
pub mod pagination;
pub mod query;
pub mod sort;
pub mod specification;

pub use aggregate::Aggregate;
pub use event::{event_types, DomainEvent};
pub use pagination::{
    paginate, total_pages, PageRequest, PagedResult, PaginationError, DEFAULT_MAX_PAGE_SIZE,
    DEFAULT_PAGE_SIZE,
};
pub use query::{FieldAccess, FieldValue, Operator, QueryFilter};
pub use sort::{SortDirection, SortSpec};
pub use specification::{AllOf, And, FnSpecification, Specification, SpecificationExt};
