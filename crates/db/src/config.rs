//! Environment-based configuration.
//!
//! All fields have defaults suitable for local development; production
//! overrides via environment variables. A `.env` file is honored when
//! present.

/// Default per-page retention bound for stored diffs.
pub const DEFAULT_MAX_DIFFS: i64 = 50;

/// Database connection configuration.
///
/// | Env Var              | Default |
/// |----------------------|---------|
/// | `DATABASE_URL`       | (required) |
/// | `DB_MAX_CONNECTIONS` | `20`    |
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is unset or `DB_MAX_CONNECTIONS` is not a
    /// valid `u32`; both indicate a broken deployment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        Self {
            database_url,
            max_connections,
        }
    }
}

/// Revision-history tuning.
///
/// | Env Var             | Default |
/// |---------------------|---------|
/// | `REDLINE_MAX_DIFFS` | `50`    |
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum stored diffs per page; the oldest are evicted past this.
    pub max_diffs: i64,
}

impl HistoryConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let max_diffs: i64 = std::env::var("REDLINE_MAX_DIFFS")
            .unwrap_or_else(|_| DEFAULT_MAX_DIFFS.to_string())
            .parse()
            .expect("REDLINE_MAX_DIFFS must be a valid i64");

        Self { max_diffs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_retention_bound() {
        assert_eq!(DEFAULT_MAX_DIFFS, 50);
    }
}
