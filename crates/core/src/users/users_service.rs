use log::{info, warn};
use std::sync::Arc;

use super::users_model::{
    LoginInput, NewUser, ProfileUpdate, RegistrationInput, ResetPasswordInput, User, UserProfile,
};
use super::users_traits::{PasswordHasherTrait, UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};

pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
    hasher: Arc<dyn PasswordHasherTrait>,
}

impl UserService {
    pub fn new(
        repository: Arc<dyn UserRepositoryTrait>,
        hasher: Arc<dyn PasswordHasherTrait>,
    ) -> Self {
        Self { repository, hasher }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, input: RegistrationInput) -> Result<UserProfile> {
        let input = input.normalize()?;

        if self
            .repository
            .exists_with_username_or_email(&input.username, &input.email)?
        {
            warn!("Attempt to register duplicate user '{}'", input.username);
            return Err(Error::ConstraintViolation(
                "Username or email already in use".to_string(),
            ));
        }

        let password_hash = self.hasher.hash(&input.password)?;
        let user = self
            .repository
            .insert(NewUser {
                username: input.username,
                email: input.email,
                password_hash,
            })
            .await?;
        info!("User {} registered", user.id);
        Ok(user.into())
    }

    fn authenticate(&self, input: &LoginInput) -> Result<UserProfile> {
        let identifier = input.identifier.trim();
        let Some(user) = self.repository.find_by_identifier(identifier)? else {
            warn!("Login failed: unknown identifier '{}'", identifier);
            return Err(Error::InvalidCredentials);
        };

        if !self.hasher.verify(&input.password, &user.password_hash)? {
            warn!("Login failed: wrong password for user {}", user.id);
            return Err(Error::InvalidCredentials);
        }
        Ok(user.into())
    }

    fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        self.repository.get_by_id(user_id).map(UserProfile::from)
    }

    async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<UserProfile> {
        let user = self.repository.get_by_id(user_id)?;
        let user = self.repository.update(update.apply_to(user)?).await?;
        info!("User {} updated their profile", user.id);
        Ok(user.into())
    }

    async fn reset_password(&self, input: ResetPasswordInput) -> Result<()> {
        input.validate()?;
        let identifier = input.identifier.trim();
        let Some(user) = self.repository.find_by_identifier(identifier)? else {
            warn!("Password reset for unknown identifier '{}'", identifier);
            return Err(Error::not_found("User not found"));
        };

        let password_hash = self.hasher.hash(&input.new_password)?;
        let user = self
            .repository
            .update(User {
                password_hash,
                ..user
            })
            .await?;
        info!("Password reset for user {}", user.id);
        Ok(())
    }
}
