use log::info;
use std::sync::Arc;

use super::categories_model::{Category, CategoryInput, CategoryUpsert, NewCategory};
use super::categories_traits::{CategoryRepositoryTrait, CategoryServiceTrait};
use crate::errors::{Error, Result};

/// Rejects a category reference the caller does not own or that was deleted.
///
/// `None` stands for "uncategorized" and is always accepted.
pub fn ensure_category_usable(
    repository: &dyn CategoryRepositoryTrait,
    user_id: &str,
    category_id: Option<&str>,
) -> Result<()> {
    let Some(category_id) = category_id else {
        return Ok(());
    };
    match repository.get_by_id(user_id, category_id) {
        Ok(_) => Ok(()),
        Err(e) if e.is_not_found() => Err(Error::invalid_input(format!(
            "Category {} does not exist",
            category_id
        ))),
        Err(e) => Err(e),
    }
}

pub struct CategoryService {
    repository: Arc<dyn CategoryRepositoryTrait>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl CategoryServiceTrait for CategoryService {
    fn get_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        self.repository.list_for_user(user_id)
    }

    async fn create_category(
        &self,
        user_id: &str,
        input: CategoryInput,
    ) -> Result<CategoryUpsert> {
        let name = input.normalized_name()?;

        if let Some(existing) = self.repository.find_by_name(user_id, &name)? {
            let category = self.repository.rename(&existing.id, &name).await?;
            return Ok(CategoryUpsert {
                category,
                overwritten: true,
            });
        }

        let category = self
            .repository
            .insert(NewCategory {
                user_id: user_id.to_string(),
                name,
            })
            .await?;
        info!("Created category {} for user {}", category.id, user_id);
        Ok(CategoryUpsert {
            category,
            overwritten: false,
        })
    }

    async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<()> {
        let deleted = self.repository.soft_delete(user_id, category_id).await?;
        if deleted == 0 {
            return Err(Error::not_found(format!(
                "Category {} not found",
                category_id
            )));
        }
        Ok(())
    }
}
