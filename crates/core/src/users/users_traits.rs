use async_trait::async_trait;

use super::users_model::{
    LoginInput, NewUser, ProfileUpdate, RegistrationInput, ResetPasswordInput, User, UserProfile,
};
use crate::errors::Result;

#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn get_by_id(&self, user_id: &str) -> Result<User>;

    /// Looks a user up by username or by email.
    fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>>;

    fn exists_with_username_or_email(&self, username: &str, email: &str) -> Result<bool>;

    async fn insert(&self, new_user: NewUser) -> Result<User>;

    /// Persists the profile fields and password hash of `user` and bumps `updated_at`.
    async fn update(&self, user: User) -> Result<User>;
}

/// Password hashing is kept behind a trait so the core stays free of crypto crates.
pub trait PasswordHasherTrait: Send + Sync {
    fn hash(&self, password: &str) -> Result<String>;

    /// `Ok(false)` for a wrong password; `Err` only when the hash itself is unusable.
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool>;
}

#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, input: RegistrationInput) -> Result<UserProfile>;

    /// Checks credentials and returns the matching user.
    fn authenticate(&self, input: &LoginInput) -> Result<UserProfile>;

    fn get_profile(&self, user_id: &str) -> Result<UserProfile>;

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<UserProfile>;

    /// Replaces the password of the account named by `input.identifier`.
    async fn reset_password(&self, input: ResetPasswordInput) -> Result<()>;
}
