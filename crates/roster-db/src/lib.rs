//! # Roster DB
//!
//! The persistence boundary of the roster API.
//!
//! - [`EntityStore`]: async trait over teachers, students and their association
//! - [`PgStore`]: Postgres implementation on a SQLx pool
//! - [`MemoryStore`]: in-process implementation for tests and local runs
//!
//! # Example
//!
//! ```ignore
//! use roster_config::DatabaseConfig;
//! use roster_db::{PgStore, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! let store = PgStore::new(pool);
//! ```

use std::str::FromStr;

use roster_config::{DatabaseConfig, DatabaseTarget};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::StoreError;
pub use memory::{MemoryStore, StoreStats};
pub use postgres::PgStore;
pub use sqlx::PgPool;
pub use store::EntityStore;

/// Opens a Postgres connection pool for `config`.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let options = match &config.target {
        DatabaseTarget::Url(url) => PgConnectOptions::from_str(url)?,
        DatabaseTarget::Parts {
            host,
            port,
            user,
            password,
            database,
        } => {
            let options = PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .database(database);
            match password {
                Some(password) => options.password(password),
                None => options,
            }
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    tracing::info!("Connected to database.");
    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}
