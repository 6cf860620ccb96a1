//! Expense forecasting from recent transaction history.

mod forecast_model;
mod forecast_service;
mod forecast_traits;

#[cfg(test)]
mod forecast_service_tests;

pub use forecast_model::{CategoryForecast, ForecastPoint, ForecastRequest, ForecastResponse};
pub use forecast_service::{ForecastService, MAX_MONTHS_AHEAD};
pub use forecast_traits::ForecastServiceTrait;
