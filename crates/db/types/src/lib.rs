//! Database abstractions for the token bridge.
//!
//! Backends implement the traits in [`traits`]. The checked operations
//! report failed preconditions through the outcome types in [`types`].

pub mod errors;
pub mod mapping_helpers;
pub mod supply_helpers;
pub mod traits;
pub mod types;

#[cfg(feature = "stubs")]
pub mod stubs;

pub use errors::DbError;

pub type DbResult<T> = Result<T, DbError>;
