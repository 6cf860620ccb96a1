#[cfg(test)]
mod tests {
    use crate::gamification::{
        level_for_points, level_title, points_to_next_level, Activity, GamificationService,
        GamificationServiceTrait,
    };
    use crate::testing::InMemoryStore;
    use std::sync::Arc;

    fn service(store: &InMemoryStore) -> GamificationService {
        GamificationService::new(Arc::new(store.clone()))
    }

    // ==================== levels ====================

    #[test]
    fn test_level_thresholds() {
        for (points, level) in [
            (0, 1),
            (99, 1),
            (100, 2),
            (399, 2),
            (400, 3),
            (899, 3),
            (900, 4),
            (1599, 4),
            (10_000, 11),
        ] {
            assert_eq!(level_for_points(points), level, "{} points", points);
        }
    }

    #[test]
    fn test_level_titles() {
        assert_eq!(level_title(1), "Novice Saver");
        assert_eq!(level_title(2), "Budget Beginner");
        assert_eq!(level_title(3), "Money Manager");
        assert_eq!(level_title(10), "Money Maestro");
        assert_eq!(level_title(11), "Financial Legend");
        assert_eq!(level_title(0), "Novice Saver");
    }

    #[test]
    fn test_points_to_next_level() {
        assert_eq!(points_to_next_level(0), 100);
        assert_eq!(points_to_next_level(99), 1);
        assert_eq!(points_to_next_level(100), 300);
        assert_eq!(points_to_next_level(450), 450);
        assert_eq!(points_to_next_level(900), 700);
    }

    // ==================== summary ====================

    #[test]
    fn test_summary_for_new_user() {
        let store = InMemoryStore::new();
        let starter = store.seed_badge("Budget Beginner", 10);
        store.seed_badge("Savings Star", 100);
        store.seed_badge("Financial Wizard", 500);

        let summary = service(&store).get_summary("u1").unwrap();

        assert_eq!(summary.total_points, 0);
        assert_eq!(summary.level, 1);
        assert_eq!(summary.level_title, "Novice Saver");
        assert_eq!(summary.points_to_next_level, 100);
        assert!(summary.all_badges.is_empty());
        assert!(summary.recent_points.is_empty());
        let next: Vec<_> = summary.next_badges.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(next.len(), 2);
        assert_eq!(next[0], starter.id);
    }

    // ==================== record_activity ====================

    #[tokio::test]
    async fn test_activity_accrues_points_and_unlocks_badges_once() {
        let store = InMemoryStore::new();
        let starter = store.seed_badge("Budget Beginner", 10);
        store.seed_badge("Tracking Pro", 50);
        let svc = service(&store);

        let unlocked = svc
            .record_activity("u1", Activity::TransactionAdded)
            .await
            .unwrap();
        assert!(unlocked.is_empty());

        let unlocked = svc
            .record_activity("u1", Activity::BudgetCreated)
            .await
            .unwrap();
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].badge_id, starter.id);

        let unlocked = svc
            .record_activity("u1", Activity::BudgetCreated)
            .await
            .unwrap();
        assert!(unlocked.is_empty());

        let summary = svc.get_summary("u1").unwrap();
        assert_eq!(summary.total_points, 21);
        assert_eq!(summary.all_badges.len(), 1);
        assert_eq!(summary.recent_points.len(), 3);
        assert_eq!(summary.recent_points[0].activity_type, "budget_created");
        assert_eq!(summary.recent_points[2].activity_type, "transaction_added");
        assert!(summary.next_badges.iter().all(|b| b.id != starter.id));

        assert_eq!(svc.get_summary("u2").unwrap().total_points, 0);
    }

    #[tokio::test]
    async fn test_summary_caps_recent_lists() {
        let store = InMemoryStore::new();
        for threshold in [1, 2, 3, 4] {
            store.seed_badge(&format!("Badge {}", threshold), threshold);
        }
        let svc = service(&store);

        for _ in 0..12 {
            svc.record_activity("u1", Activity::TransactionAdded)
                .await
                .unwrap();
        }

        let summary = svc.get_summary("u1").unwrap();
        assert_eq!(summary.total_points, 12);
        assert_eq!(summary.all_badges.len(), 4);
        assert_eq!(summary.recent_badges.len(), 3);
        assert_eq!(summary.recent_badges[0].badge.name, "Badge 4");
        assert_eq!(summary.recent_points.len(), 10);
        assert!(summary.next_badges.is_empty());
    }
}
