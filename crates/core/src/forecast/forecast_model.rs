use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    #[serde(default)]
    pub category_id: Option<String>,
    pub months_ahead: i32,
    /// `YYYY-MM-DD`; defaults to the first day of the current month.
    #[serde(default)]
    pub start_date: Option<String>,
}

/// Projected spending for a single month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// `YYYY-MM`
    pub month: String,
    pub amount: Decimal,
    /// Confidence in `[0, 1]`.
    pub probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForecast {
    pub category_id: String,
    pub category_name: String,
    pub forecast: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    pub total_forecast: Vec<ForecastPoint>,
    pub category_forecasts: Vec<CategoryForecast>,
    pub message: String,
}
