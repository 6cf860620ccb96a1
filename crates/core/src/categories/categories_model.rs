//! Category domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// A user-owned spending category. Names are unique per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
}

impl CategoryInput {
    /// Returns the trimmed name, or a validation error when it is empty or too long.
    pub fn normalized_name(&self) -> Result<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::invalid_input("Category name cannot be empty"));
        }
        if name.chars().count() > MAX_CATEGORY_NAME_LEN {
            return Err(Error::invalid_input(format!(
                "Category name cannot exceed {} characters",
                MAX_CATEGORY_NAME_LEN
            )));
        }
        Ok(name.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub user_id: String,
    pub name: String,
}

/// Outcome of a create call: the category and whether it already existed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpsert {
    pub category: Category,
    pub overwritten: bool,
}
