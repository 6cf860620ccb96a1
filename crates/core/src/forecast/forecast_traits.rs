use super::forecast_model::{ForecastRequest, ForecastResponse};
use crate::errors::Result;

pub trait ForecastServiceTrait: Send + Sync {
    fn forecast_expenses(&self, user_id: &str, request: &ForecastRequest)
        -> Result<ForecastResponse>;
}
