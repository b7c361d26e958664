// ============================================================================
// Brand Domain
// ============================================================================
//
// Brands group products. A deactivated brand keeps its products but cannot
// be assigned to new ones.
//
// ============================================================================

pub mod aggregate;
pub mod commands;
pub mod errors;
pub mod events;
pub mod filter;
pub mod service;
pub mod specifications;

pub use aggregate::*;
pub use commands::*;
pub use errors::*;
pub use events::*;
pub use filter::*;
pub use service::*;
pub use specifications::*;
