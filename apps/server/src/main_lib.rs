use std::sync::Arc;

use rand::{rngs::OsRng, RngCore};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::AuthManager,
    config::{Config, LogFormat},
};
use finboard_core::{
    analytics::{AnalyticsService, AnalyticsServiceTrait},
    budgets::{BudgetService, BudgetServiceTrait},
    categories::{CategoryService, CategoryServiceTrait},
    transactions::{TransactionService, TransactionServiceTrait},
    users::{UserService, UserServiceTrait},
};
use finboard_storage_sqlite::{
    budgets::BudgetRepository,
    categories::CategoryRepository,
    db::{self, write_actor, DbPool},
    transactions::TransactionRepository,
    users::UserRepository,
};

pub struct AppState {
    pub category_service: Arc<dyn CategoryServiceTrait + Send + Sync>,
    pub transaction_service: Arc<dyn TransactionServiceTrait + Send + Sync>,
    pub budget_service: Arc<dyn BudgetServiceTrait + Send + Sync>,
    pub analytics_service: Arc<dyn AnalyticsServiceTrait + Send + Sync>,
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
    pub db_pool: Arc<DbPool>,
    pub db_path: String,
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

fn jwt_secret(config: &Config) -> Vec<u8> {
    match &config.jwt_secret {
        Some(secret) => secret.clone(),
        None => {
            tracing::warn!(
                "FB_JWT_SECRET is not set; using a random key, tokens will not survive a restart"
            );
            let mut secret = vec![0u8; 32];
            OsRng.fill_bytes(&mut secret);
            secret
        }
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let category_repository = Arc::new(CategoryRepository::new(pool.clone(), writer.clone()));
    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let budget_repository = Arc::new(BudgetRepository::new(pool.clone(), writer.clone()));
    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer));

    let auth = Arc::new(AuthManager::new(&jwt_secret(config), config.token_ttl));

    let category_service = Arc::new(CategoryService::new(category_repository.clone()));
    let created = category_service.ensure_default_categories().await?;
    if !created.is_empty() {
        tracing::info!("Created {} default categories", created.len());
    }

    let transaction_service = Arc::new(TransactionService::new(
        transaction_repository.clone(),
        category_repository.clone(),
    ));
    let budget_service = Arc::new(BudgetService::new(
        budget_repository,
        category_repository.clone(),
        transaction_repository.clone(),
    ));
    let analytics_service = Arc::new(AnalyticsService::new(
        transaction_repository,
        category_repository,
    ));
    let user_service = Arc::new(UserService::new(user_repository, auth.clone()));

    Ok(Arc::new(AppState {
        category_service,
        transaction_service,
        budget_service,
        analytics_service,
        user_service,
        auth,
        db_pool: pool,
        db_path,
    }))
}
