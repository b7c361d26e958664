// ============================================================================
// User Domain - Accounts, Roles and Login Lockout
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
