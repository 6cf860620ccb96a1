//! SQLite storage implementation for FinTrack.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `fintrack-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for users, categories, budgets, transactions
//!   and gamification
//! - Database-specific model types (with Diesel derives)
//!
//! Reads go through the r2d2 pool. Every write goes through the single
//! writer actor, one immediate transaction per job.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod budgets;
pub mod categories;
pub mod gamification;
pub mod transactions;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use gamification::GamificationRepository;
pub use transactions::TransactionRepository;
pub use users::UserRepository;

// Re-export from fintrack-core for convenience
pub use fintrack_core::errors::{DatabaseError, Error, Result};
