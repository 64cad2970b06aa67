use std::sync::Arc;

use roster_config::{CorsConfig, DatabaseConfig, ServerConfig, StoreBackend};
use roster_db::{EntityStore, MemoryStore, PgStore, init_db_pool, run_migrations};

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>, cors_config: CorsConfig) -> Self {
        Self { store, cors_config }
    }
}

/// Opens the configured store. The Postgres backend runs pending
/// migrations before the store is handed out.
pub async fn init_store(backend: StoreBackend) -> anyhow::Result<Arc<dyn EntityStore>> {
    match backend {
        StoreBackend::Postgres => {
            let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
            run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");
            Ok(Arc::new(PgStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

pub async fn init_app_state(server: &ServerConfig) -> anyhow::Result<AppState> {
    Ok(AppState::new(
        init_store(server.store_backend).await?,
        CorsConfig::from_env(),
    ))
}
