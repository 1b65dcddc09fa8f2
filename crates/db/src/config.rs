use std::time::Duration;

/// Connection pool configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
    /// How often the background task pings the pool.
    pub health_check_interval: Duration,
}

const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_MIN_CONNECTIONS: u32 = 2;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_MAX_LIFETIME_SECS: u64 = 3600;
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600;
const DEFAULT_HEALTH_CHECK_INTERVAL_SECS: u64 = 60;

impl DbConfig {
    /// Load pool configuration from environment variables.
    ///
    /// | Env Var                         | Required | Default |
    /// |---------------------------------|----------|---------|
    /// | `DATABASE_URL`                  | **yes**  | --      |
    /// | `DB_MAX_CONNECTIONS`            | no       | `20`    |
    /// | `DB_MIN_CONNECTIONS`            | no       | `2`     |
    /// | `DB_ACQUIRE_TIMEOUT_SECS`       | no       | `5`     |
    /// | `DB_MAX_LIFETIME_SECS`          | no       | `3600`  |
    /// | `DB_IDLE_TIMEOUT_SECS`          | no       | `600`   |
    /// | `DB_HEALTH_CHECK_INTERVAL_SECS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `DATABASE_URL` is missing or a numeric variable does not parse.
    pub fn from_env() -> Self {
        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in the environment");

        let max_connections = env_or("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS);
        let min_connections = env_or("DB_MIN_CONNECTIONS", DEFAULT_MIN_CONNECTIONS);
        assert!(
            min_connections <= max_connections,
            "DB_MIN_CONNECTIONS must not exceed DB_MAX_CONNECTIONS"
        );

        Self {
            database_url,
            max_connections,
            min_connections,
            acquire_timeout: secs("DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_ACQUIRE_TIMEOUT_SECS),
            max_lifetime: secs("DB_MAX_LIFETIME_SECS", DEFAULT_MAX_LIFETIME_SECS),
            idle_timeout: secs("DB_IDLE_TIMEOUT_SECS", DEFAULT_IDLE_TIMEOUT_SECS),
            health_check_interval: secs(
                "DB_HEALTH_CHECK_INTERVAL_SECS",
                DEFAULT_HEALTH_CHECK_INTERVAL_SECS,
            ),
        }
    }
}

fn env_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + ToString,
{
    std::env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or_else(|_| panic!("{name} must be a valid number"))
}

fn secs(name: &str, default: u64) -> Duration {
    Duration::from_secs(env_or(name, default))
}
