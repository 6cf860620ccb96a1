#[cfg(test)]
mod tests {
    use crate::categories::{CategoryInput, CategoryService, CategoryServiceTrait};
    use crate::errors::Error;
    use crate::testing::InMemoryStore;
    use std::sync::Arc;

    fn service(store: &InMemoryStore) -> CategoryService {
        CategoryService::new(Arc::new(store.clone()))
    }

    fn named(name: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_category_trims_name() {
        let store = InMemoryStore::new();
        let upsert = service(&store)
            .create_category("u1", named("  Groceries "))
            .await
            .unwrap();

        assert!(!upsert.overwritten);
        assert_eq!(upsert.category.name, "Groceries");
        assert_eq!(upsert.category.user_id, "u1");
    }

    #[tokio::test]
    async fn test_duplicate_name_returns_existing_category() {
        let store = InMemoryStore::new();
        let svc = service(&store);
        let first = svc.create_category("u1", named("Rent")).await.unwrap();

        let second = svc.create_category("u1", named("Rent")).await.unwrap();

        assert!(second.overwritten);
        assert_eq!(second.category.id, first.category.id);
        assert_eq!(svc.get_categories("u1").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_names_are_scoped_per_user() {
        let store = InMemoryStore::new();
        let svc = service(&store);
        svc.create_category("u1", named("Rent")).await.unwrap();

        let other = svc.create_category("u2", named("Rent")).await.unwrap();

        assert!(!other.overwritten);
        assert_eq!(svc.get_categories("u1").unwrap().len(), 1);
        assert_eq!(svc.get_categories("u2").unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_names_are_rejected() {
        let store = InMemoryStore::new();
        let svc = service(&store);

        let blank = svc.create_category("u1", named("   ")).await;
        assert!(matches!(blank, Err(Error::Validation(_))));

        let long = svc.create_category("u1", named(&"x".repeat(51))).await;
        assert!(matches!(long, Err(Error::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_category() {
        let store = InMemoryStore::new();
        let svc = service(&store);
        let created = svc.create_category("u1", named("Fun")).await.unwrap();

        assert!(svc
            .delete_category("u2", &created.category.id)
            .await
            .unwrap_err()
            .is_not_found());
        svc.delete_category("u1", &created.category.id)
            .await
            .unwrap();

        assert!(svc.get_categories("u1").unwrap().is_empty());
        assert!(svc
            .delete_category("u1", &created.category.id)
            .await
            .unwrap_err()
            .is_not_found());
    }
}
