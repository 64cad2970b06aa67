use std::env;

/// Where log files go and which filter applies when `RUST_LOG` is unset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogConfig {
    pub log_dir: String,
    pub default_filter: String,
    pub file_prefix: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            log_dir: lookup("LOG_DIR").unwrap_or_else(|| "storage/logs".to_string()),
            default_filter: "roster=info,tower_http=warn,axum::rejection=trace".to_string(),
            file_prefix: "roster".to_string(),
        }
    }
}
