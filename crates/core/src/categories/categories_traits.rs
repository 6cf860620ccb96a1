use async_trait::async_trait;

use super::categories_model::{Category, CategoryInput, CategoryUpsert, NewCategory};
use crate::errors::Result;

#[async_trait]
pub trait CategoryRepositoryTrait: Send + Sync {
    /// Live category owned by `user_id`, or `NotFound`.
    fn get_by_id(&self, user_id: &str, category_id: &str) -> Result<Category>;

    fn find_by_name(&self, user_id: &str, name: &str) -> Result<Option<Category>>;

    fn list_for_user(&self, user_id: &str) -> Result<Vec<Category>>;

    async fn insert(&self, new_category: NewCategory) -> Result<Category>;

    /// Rewrites the name of an existing category and bumps `updated_at`.
    async fn rename(&self, category_id: &str, name: &str) -> Result<Category>;

    /// Marks the row deleted. Returns the number of affected rows.
    async fn soft_delete(&self, user_id: &str, category_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait CategoryServiceTrait: Send + Sync {
    fn get_categories(&self, user_id: &str) -> Result<Vec<Category>>;

    /// Creates a category, or returns the existing one with the same name.
    async fn create_category(&self, user_id: &str, input: CategoryInput)
        -> Result<CategoryUpsert>;

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()>;
}
