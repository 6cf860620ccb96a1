//! Users module - account holders and credential checks.

mod users_model;
mod users_service;
mod users_traits;


pub use users_model::{
    LoginInput, NewUser, ProfileUpdate, RegistrationInput, ResetPasswordInput, User, UserProfile,
    DEFAULT_CURRENCY, DEFAULT_THEME,
};
pub use users_service::UserService;
pub use users_traits::{PasswordHasherTrait, UserRepositoryTrait, UserServiceTrait};
