// ============================================================================
// Shared Value Objects
// ============================================================================
//
// Immutable, validated values used across aggregates. Each one is built only
// through a validating constructor (also used by serde), so an instance is
// always valid.
//
// ============================================================================

pub mod address;
pub mod email;
pub mod errors;
pub mod phone;
pub mod role;

pub use address::{Address, AddressParts};
pub use email::Email;
pub use errors::{optional_text, required_text, ValidationError};
pub use phone::PhoneNumber;
pub use role::{Role, SystemRoles};
