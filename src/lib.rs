// ============================================================================
// Commerce Core - Domain Model for a Small Commerce Back Office
// ============================================================================
//
// Layers:
// - shared:        aggregate, specification, sorting and pagination kernel
// - domain:        Customer, Product, User and Brand aggregates and services
// - store:         repository port and in-memory adapter
// - notifications: outbound email port
// - metrics:       Prometheus counters for domain activity
// - config:        business policies read from the environment
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod notifications;
pub mod shared;
pub mod store;

pub use config::CoreConfig;
pub use error::{DomainError, ErrorKind, Outcome};
pub use metrics::Metrics;
