//! SQLite storage implementation for users.

mod model;
mod repository;

pub use model::{NewUserDB, UserChangesDB, UserDB};
pub use repository::UserRepository;
