use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl CorsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads `ALLOWED_ORIGINS`, a comma-separated list.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_origin() {
        assert_eq!(
            CorsConfig::default().allowed_origins,
            vec!["http://localhost:3000"]
        );
    }

    #[test]
    fn splits_and_trims_origins() {
        let config = CorsConfig::from_lookup(|_| Some(" https://a.test, ,https://b.test".into()));
        assert_eq!(config.allowed_origins, vec!["https://a.test", "https://b.test"]);
    }
}
