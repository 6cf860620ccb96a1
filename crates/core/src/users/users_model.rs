//! User domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_THEME: &str = "light";
const MIN_PASSWORD_LEN: usize = 6;
const MAX_PASSWORD_LEN: usize = 100;

/// A registered account holder.
///
/// The password hash never leaves the service layer; responses use [`UserProfile`].
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub currency: String,
    pub notifications_enabled: bool,
    pub theme: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub currency: String,
    pub notifications_enabled: bool,
    pub theme: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            currency: user.currency,
            notifications_enabled: user.notifications_enabled,
            theme: user.theme,
        }
    }
}

/// Partial profile edit. Absent or blank fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub currency: Option<String>,
    pub notifications_enabled: Option<bool>,
    pub theme: Option<String>,
}

impl ProfileUpdate {
    /// Returns `user` with the provided fields applied.
    pub fn apply_to(self, mut user: User) -> Result<User> {
        if let Some(first_name) = non_blank("firstName", self.first_name, 50)? {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = non_blank("lastName", self.last_name, 50)? {
            user.last_name = Some(last_name);
        }
        if let Some(phone_number) = non_blank("phoneNumber", self.phone_number, 20)? {
            user.phone_number = Some(phone_number);
        }
        if let Some(currency) = non_blank("currency", self.currency, 10)? {
            user.currency = currency.to_uppercase();
        }
        if let Some(theme) = non_blank("theme", self.theme, 20)? {
            user.theme = theme;
        }
        if let Some(enabled) = self.notifications_enabled {
            user.notifications_enabled = enabled;
        }
        Ok(user)
    }
}

fn non_blank(field: &str, value: Option<String>, max_len: usize) -> Result<Option<String>> {
    let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > max_len {
        return Err(Error::invalid_input(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(Some(value))
}

fn check_password_len(password: &str) -> Result<()> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(Error::invalid_input(format!(
            "Password must be between {} and {} characters",
            MIN_PASSWORD_LEN, MAX_PASSWORD_LEN
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegistrationInput {
    /// Trims the username, lower-cases the email and checks field lengths.
    pub fn normalize(self) -> Result<RegistrationInput> {
        let username = self.username.trim().to_string();
        let email = self.email.trim().to_lowercase();

        let username_len = username.chars().count();
        if !(3..=50).contains(&username_len) {
            return Err(Error::invalid_input(
                "Username must be between 3 and 50 characters",
            ));
        }
        if email.len() > 100 || !is_plausible_email(&email) {
            return Err(Error::invalid_input("A valid email address is required"));
        }
        check_password_len(&self.password)?;

        Ok(RegistrationInput {
            username,
            email,
            password: self.password,
        })
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    /// Username or email.
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Sets a new password for the account matching `identifier`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordInput {
    /// Username or email.
    pub identifier: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetPasswordInput {
    pub fn validate(&self) -> Result<()> {
        if self.identifier.trim().is_empty() {
            return Err(Error::invalid_input("Identifier is required"));
        }
        check_password_len(&self.new_password)?;
        if self.new_password != self.confirm_password {
            return Err(Error::invalid_input("Passwords do not match"));
        }
        Ok(())
    }
}
