//! # Roster Config
//!
//! Configuration types for the roster API, loaded from environment variables.
//!
//! - [`server`]: bind address, store backend and metrics switch
//! - [`database`]: Postgres connection target
//! - [`cors`]: allowed CORS origins
//! - [`logging`]: log directory and default filter
//!
//! Every type has a `from_env()` constructor and a `from_lookup()` variant
//! taking a key lookup function, which is what the tests use.
//!
//! # Example
//!
//! ```ignore
//! use roster_config::{CorsConfig, DatabaseConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env()?;
//! let database = DatabaseConfig::from_env()?;
//! let cors = CorsConfig::from_env();
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod logging;
pub mod server;

pub use cors::CorsConfig;
pub use database::{DatabaseConfig, DatabaseTarget};
pub use error::ConfigError;
pub use logging::LogConfig;
pub use server::{ServerConfig, StoreBackend};
