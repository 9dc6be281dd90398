use std::{fs::File, path::Path, sync::Arc};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{
        http::app_state::AppState,
        persistence::PostgresPersistence,
        table_store::{RestTableStore, UnconfiguredTableStore},
    },
    infra::{
        config::{AppConfig, TableStoreConfig},
        db::{init_db, run_migrations},
        error::InfraError,
        http_client::try_build_client,
        rate_limit::{DisabledRateLimiter, RateLimiterTrait, RedisRateLimiter},
    },
    use_cases::waitlist::{TableStore, WaitlistUseCases},
};

pub async fn init_app_state(config: AppConfig) -> Result<AppState, InfraError> {
    let store = table_store(&config.table_store).await?;

    let rate_limiter: Arc<dyn RateLimiterTrait> = match &config.redis_url {
        Some(redis_url) => Arc::new(
            RedisRateLimiter::new(
                redis_url,
                config.rate_limit_window_secs,
                config.rate_limit_per_ip,
            )
            .await?,
        ),
        None => {
            tracing::warn!("REDIS_URL not set, rate limiting is disabled");
            Arc::new(DisabledRateLimiter)
        }
    };

    let waitlist_use_cases = WaitlistUseCases::new(store, config.user_name_rule);

    Ok(AppState {
        config: Arc::new(config),
        waitlist_use_cases: Arc::new(waitlist_use_cases),
        rate_limiter,
    })
}

async fn table_store(config: &TableStoreConfig) -> Result<Arc<dyn TableStore>, InfraError> {
    tracing::info!(backend = config.backend_name(), "Initializing table store");

    let store: Arc<dyn TableStore> = match config {
        TableStoreConfig::Rest { url, api_key } => {
            let client = try_build_client().map_err(InfraError::HttpClient)?;
            Arc::new(RestTableStore::new(client, url.clone(), api_key.clone()))
        }
        TableStoreConfig::Postgres { database_url } => {
            let pool = init_db(database_url).await?;
            run_migrations(&pool).await?;
            Arc::new(PostgresPersistence::new(pool))
        }
        TableStoreConfig::Unconfigured => {
            tracing::warn!("Table store credentials missing, submissions will fail");
            Arc::new(UnconfiguredTableStore)
        }
    };

    Ok(store)
}

pub fn init_tracing(log_file: Option<&Path>) -> Result<(), InfraError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cafepass_api=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don’t show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs), only when LOG_FILE is set
    let json_layer = match log_file {
        Some(path) => {
            let file = File::create(path).map_err(InfraError::LogFile)?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(true)
                    .with_span_list(true),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();

    Ok(())
}
