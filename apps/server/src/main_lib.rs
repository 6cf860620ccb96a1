use std::sync::Arc;

use crate::{
    auth::{decode_secret_key, Argon2PasswordHasher, AuthConfig, AuthManager},
    config::Config,
};
use fintrack_core::{
    budgets::{BudgetRecalculator, BudgetRecalculatorTrait, BudgetService, BudgetServiceTrait},
    categories::{CategoryService, CategoryServiceTrait},
    forecast::{ForecastService, ForecastServiceTrait},
    gamification::{GamificationService, GamificationServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    users::{UserService, UserServiceTrait},
};
use fintrack_storage_sqlite::{
    db::{self, write_actor},
    BudgetRepository, CategoryRepository, GamificationRepository, TransactionRepository,
    UserRepository,
};
use rand::{rngs::OsRng, RngCore};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub category_service: Arc<dyn CategoryServiceTrait>,
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub forecast_service: Arc<dyn ForecastServiceTrait>,
    pub gamification_service: Arc<dyn GamificationServiceTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("FT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn jwt_secret(config: &Config) -> anyhow::Result<Vec<u8>> {
    match &config.jwt_secret {
        Some(raw) => decode_secret_key(raw),
        None => {
            tracing::warn!(
                "FT_JWT_SECRET is not set; using a random secret. Tokens will not survive a restart."
            );
            let mut secret = vec![0u8; 32];
            OsRng.fill_bytes(&mut secret);
            Ok(secret)
        }
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let category_repo = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let budget_repo = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let transaction_repo = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let gamification_repo = Arc::new(GamificationRepository::new(pool.clone(), writer.clone()));

    let recalculator = Arc::new(BudgetRecalculator::new(
        budget_repo.clone(),
        transaction_repo.clone(),
    ));

    // Cached remaining amounts may have drifted while the server was down.
    let report = recalculator.recalculate_all().await?;
    if report.is_clean() {
        tracing::info!("Startup recalculation refreshed {} budget(s)", report.recalculated);
    } else {
        tracing::warn!(
            "Startup recalculation refreshed {} budget(s), {} failed: {:?}",
            report.recalculated,
            report.failed.len(),
            report.failed
        );
    }

    let user_service = Arc::new(UserService::new(
        user_repo,
        Arc::new(Argon2PasswordHasher),
    ));
    let category_service = Arc::new(CategoryService::new(category_repo.clone()));
    let budget_service = Arc::new(BudgetService::new(
        budget_repo,
        category_repo.clone(),
        recalculator.clone(),
    ));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repo.clone(),
        category_repo.clone(),
        recalculator,
    ));
    let forecast_service = Arc::new(ForecastService::new(transaction_repo, category_repo));
    let gamification_service = Arc::new(GamificationService::new(gamification_repo));

    let auth = Arc::new(AuthManager::new(&AuthConfig {
        jwt_secret: jwt_secret(config)?,
        access_token_ttl: config.token_ttl,
    })?);

    Ok(Arc::new(AppState {
        user_service,
        category_service,
        budget_service,
        transaction_service,
        forecast_service,
        gamification_service,
        auth,
    }))
}
