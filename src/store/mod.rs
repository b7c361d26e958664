// ============================================================================
// Storage Collaborator
// ============================================================================
//
// The `Repository` port the services depend on, plus an in-memory adapter
// used by tests and the demo binary.
//
// ============================================================================

mod memory;
mod repository;

pub use memory::InMemoryRepository;
pub use repository::{Entity, Repository, RepositoryError};
