#[cfg(test)]
mod tests {
    use crate::errors::Error;
    use crate::forecast::{ForecastRequest, ForecastService, ForecastServiceTrait};
    use crate::testing::{date, InMemoryStore};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn service(store: &InMemoryStore) -> ForecastService {
        ForecastService::new(Arc::new(store.clone()), Arc::new(store.clone()))
    }

    fn request(months_ahead: i32) -> ForecastRequest {
        ForecastRequest {
            category_id: None,
            months_ahead,
            start_date: Some("2025-07-01".to_string()),
        }
    }

    #[test]
    fn test_months_ahead_must_be_between_1_and_12() {
        let store = InMemoryStore::new();
        let svc = service(&store);

        for months in [0, -1, 13] {
            let result = svc.forecast_expenses("u1", &request(months));
            assert!(matches!(result, Err(Error::Validation(_))), "{}", months);
        }
        assert!(svc.forecast_expenses("u1", &request(12)).is_ok());
    }

    #[test]
    fn test_forecast_months_follow_start_date() {
        let store = InMemoryStore::new();
        let response = service(&store)
            .forecast_expenses("u1", &request(3))
            .unwrap();

        let months: Vec<_> = response
            .total_forecast
            .iter()
            .map(|p| p.month.as_str())
            .collect();
        assert_eq!(months, vec!["2025-07", "2025-08", "2025-09"]);
        assert!(response.category_forecasts.is_empty());
        assert!(response.total_forecast.iter().all(|p| p.amount == Decimal::ZERO));
    }

    #[test]
    fn test_total_forecast_tracks_monthly_average() {
        let store = InMemoryStore::new();
        store.seed_transaction("u1", None, dec!(100), date(2025, 4, 3));
        store.seed_transaction("u1", None, dec!(200), date(2025, 5, 3));
        store.seed_transaction("u1", None, dec!(300), date(2025, 6, 3));
        // Outside the six-month history window.
        store.seed_transaction("u1", None, dec!(5000), date(2024, 12, 31));

        let response = service(&store)
            .forecast_expenses("u1", &request(6))
            .unwrap();

        let first = &response.total_forecast[0];
        // Average 200 with at most 5% jitter in the first month.
        assert!(first.amount >= dec!(190) && first.amount <= dec!(210));
        assert_eq!(first.probability, 0.5);
        for pair in response.total_forecast.windows(2) {
            assert!(pair[1].probability <= pair[0].probability);
        }
    }

    #[test]
    fn test_category_forecasts_are_sorted_and_named() {
        let store = InMemoryStore::new();
        let rent = store.seed_category("u1", "Rent");
        store.seed_transaction("u1", Some(rent.id.as_str()), dec!(900), date(2025, 6, 1));
        store.seed_transaction("u1", Some("zz-deleted"), dec!(10), date(2025, 6, 2));
        store.seed_transaction("u1", None, dec!(10), date(2025, 6, 2));

        let response = service(&store)
            .forecast_expenses("u1", &request(1))
            .unwrap();

        assert_eq!(response.category_forecasts.len(), 2);
        assert_eq!(response.category_forecasts[0].category_id, rent.id);
        assert_eq!(response.category_forecasts[0].category_name, "Rent");
        assert_eq!(response.category_forecasts[1].category_name, "Unknown");
        // One month of data, capped by the category ceiling.
        let point = &response.category_forecasts[0].forecast[0];
        assert_eq!(point.probability, 0.17);
    }

    #[test]
    fn test_forecast_is_deterministic() {
        let store = InMemoryStore::new();
        store.seed_transaction("u1", None, dec!(123.45), date(2025, 5, 9));
        let svc = service(&store);

        let a = svc.forecast_expenses("u1", &request(4)).unwrap();
        let b = svc.forecast_expenses("u1", &request(4)).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_category_filter_limits_history() {
        let store = InMemoryStore::new();
        store.seed_transaction("u1", Some("food"), dec!(100), date(2025, 6, 1));
        store.seed_transaction("u1", Some("fun"), dec!(400), date(2025, 6, 1));

        let response = service(&store)
            .forecast_expenses(
                "u1",
                &ForecastRequest {
                    category_id: Some("food".to_string()),
                    ..request(1)
                },
            )
            .unwrap();

        assert_eq!(response.category_forecasts.len(), 1);
        assert_eq!(response.category_forecasts[0].category_id, "food");
        assert!(response.total_forecast[0].amount < dec!(150));
    }
}
