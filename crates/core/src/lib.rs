//! FinTrack Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for FinTrack, including the budget
//! recalculation engine. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod budgets;
pub mod categories;
pub mod errors;
pub mod forecast;
pub mod gamification;
pub mod transactions;
pub mod users;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
