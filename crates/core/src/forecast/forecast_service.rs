use chrono::{NaiveDate, Utc};
use log::debug;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::forecast_model::{CategoryForecast, ForecastPoint, ForecastRequest, ForecastResponse};
use super::forecast_traits::ForecastServiceTrait;
use crate::categories::CategoryRepositoryTrait;
use crate::errors::{Error, Result};
use crate::transactions::{Transaction, TransactionFilter, TransactionRepositoryTrait};
use crate::utils::time_utils::{first_day_of_month, month_key, parse_optional_date, shift_months};

pub const MAX_MONTHS_AHEAD: i32 = 12;
const HISTORY_MONTHS: i32 = 6;
const UNKNOWN_CATEGORY: &str = "Unknown";

/// Shape of one forecast series.
struct Curve {
    max_confidence: f64,
    decay: f64,
    variance: f64,
    variance_growth: f64,
}

const TOTAL_CURVE: Curve = Curve {
    max_confidence: 1.0,
    decay: 0.95,
    variance: 0.1,
    variance_growth: 0.02,
};

const CATEGORY_CURVE: Curve = Curve {
    max_confidence: 0.9,
    decay: 0.9,
    variance: 0.15,
    variance_growth: 0.03,
};

/// Naive expense projection from the last six months of history.
pub struct ForecastService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    category_repository: Arc<dyn CategoryRepositoryTrait>,
}

impl ForecastService {
    pub fn new(
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        category_repository: Arc<dyn CategoryRepositoryTrait>,
    ) -> Self {
        Self {
            transaction_repository,
            category_repository,
        }
    }
}

impl ForecastServiceTrait for ForecastService {
    fn forecast_expenses(
        &self,
        user_id: &str,
        request: &ForecastRequest,
    ) -> Result<ForecastResponse> {
        if !(1..=MAX_MONTHS_AHEAD).contains(&request.months_ahead) {
            return Err(Error::invalid_input(format!(
                "monthsAhead must be between 1 and {}",
                MAX_MONTHS_AHEAD
            )));
        }
        let months_ahead = request.months_ahead as usize;
        let start = parse_optional_date("startDate", request.start_date.as_deref())?
            .unwrap_or_else(|| first_day_of_month(Utc::now().date_naive()));

        let filter = TransactionFilter {
            category_id: request.category_id.clone(),
            start_date: Some(shift_months(start, -HISTORY_MONTHS)),
            end_date: None,
        };
        let transactions = self.transaction_repository.list(user_id, &filter)?;
        debug!(
            "Forecasting {} months for user {} from {} transactions",
            months_ahead,
            user_id,
            transactions.len()
        );

        let names: HashMap<String, String> = self
            .category_repository
            .list_for_user(user_id)?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let total_forecast = project(
            &monthly_totals(transactions.iter())?,
            start,
            months_ahead,
            &TOTAL_CURVE,
        )?;

        let mut by_category: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
        for tx in &transactions {
            if let Some(category_id) = tx.category_id.as_deref() {
                by_category.entry(category_id).or_default().push(tx);
            }
        }
        let category_forecasts = by_category
            .into_iter()
            .map(|(category_id, txs)| {
                Ok(CategoryForecast {
                    category_id: category_id.to_string(),
                    category_name: names
                        .get(category_id)
                        .cloned()
                        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
                    forecast: project(
                        &monthly_totals(txs.into_iter())?,
                        start,
                        months_ahead,
                        &CATEGORY_CURVE,
                    )?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ForecastResponse {
            total_forecast,
            category_forecasts,
            message: format!(
                "Forecast generated for {} months based on your last {} months of transactions",
                months_ahead, HISTORY_MONTHS
            ),
        })
    }
}

fn out_of_range() -> Error {
    Error::Unexpected("Transaction totals are out of range for a forecast".to_string())
}

fn monthly_totals<'a>(
    transactions: impl Iterator<Item = &'a Transaction>,
) -> Result<BTreeMap<String, Decimal>> {
    let mut totals = BTreeMap::new();
    for tx in transactions {
        let total = totals
            .entry(month_key(tx.transaction_date))
            .or_insert(Decimal::ZERO);
        *total = total.checked_add(tx.amount).ok_or_else(out_of_range)?;
    }
    Ok(totals)
}

fn project(
    totals: &BTreeMap<String, Decimal>,
    start: NaiveDate,
    months_ahead: usize,
    curve: &Curve,
) -> Result<Vec<ForecastPoint>> {
    let (average, confidence) = if totals.is_empty() {
        (Decimal::ZERO, 0.5)
    } else {
        let sum = totals
            .values()
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
            .ok_or_else(out_of_range)?;
        let months = totals.len();
        (
            sum / Decimal::from(months),
            (months as f64 / HISTORY_MONTHS as f64).min(curve.max_confidence),
        )
    };

    (0..months_ahead)
        .map(|i| {
            let step = i as f64;
            let factor = 1.0 + jitter(i) * curve.variance * (1.0 + step * curve.variance_growth);
            let factor = Decimal::from_f64(factor).unwrap_or(Decimal::ONE);
            let amount = average.checked_mul(factor).ok_or_else(out_of_range)?;
            Ok(ForecastPoint {
                month: month_key(shift_months(start, i as i32)),
                amount: amount.round_dp(2),
                probability: round2(confidence * curve.decay.powi(i as i32)),
            })
        })
        .collect()
}

/// Deterministic perturbation in `[-0.5, 0.5]` keyed on the month offset.
fn jitter(index: usize) -> f64 {
    ((index as f64 + 1.0) * 0.7).sin() * 0.5
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jitter_stays_in_range() {
        for i in 0..12 {
            let j = jitter(i);
            assert!((-0.5..=0.5).contains(&j), "jitter({}) = {}", i, j);
        }
    }

    #[test]
    fn empty_history_projects_zero_with_medium_confidence() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let points = project(&BTreeMap::new(), start, 2, &TOTAL_CURVE).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].amount, Decimal::ZERO);
        assert_eq!(points[0].probability, 0.5);
        assert_eq!(points[1].month, "2025-02");
    }

    #[test]
    fn totals_past_decimal_range_are_rejected() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        let mut totals = BTreeMap::new();
        totals.insert("2024-11".to_string(), huge);
        totals.insert("2024-12".to_string(), huge);
        let err = project(&totals, start, 1, &TOTAL_CURVE).unwrap_err();
        assert!(matches!(err, Error::Unexpected(_)));
    }
}
