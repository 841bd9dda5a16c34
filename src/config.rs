use crate::error::{AppError, AppResult};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub database_url: String,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub database_min_connections: u32,
    #[serde(default = "default_connection_timeout")]
    pub database_connection_timeout: u64,

    #[serde(default = "default_host")]
    pub server_host: String,
    #[serde(default = "default_port")]
    pub server_port: u16,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_access_token_expires")]
    pub jwt_access_token_expires_in: u64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_expires_in: u64,
}

// Default value functions
fn default_max_connections() -> u32 {
    10
}
fn default_min_connections() -> u32 {
    1
}
fn default_connection_timeout() -> u64 {
    30
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_jwt_secret() -> String {
    "your-secret-key".to_string()
}
fn default_access_token_expires() -> u64 {
    // 8 hours, one working day
    28800
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_bcrypt_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_iter(std::env::vars())
    }

    /// Builds a config from explicit `KEY=value` pairs, with the same
    /// defaults and checks as [`Config::from_env`].
    pub fn from_iter<I>(vars: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| AppError::Config(format!("Failed to load config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.database_max_connections == 0 {
            return Err(AppError::Config(
                "DATABASE_MAX_CONNECTIONS must be > 0".to_string(),
            ));
        }

        if self.database_min_connections > self.database_max_connections {
            return Err(AppError::Config(
                "DATABASE_MIN_CONNECTIONS cannot be greater than DATABASE_MAX_CONNECTIONS"
                    .to_string(),
            ));
        }

        if self.jwt_secret == default_jwt_secret() || self.jwt_secret.len() < 16 {
            return Err(AppError::Config(
                "JWT_SECRET must be set to a secure value of at least 16 characters".to_string(),
            ));
        }

        if self.jwt_access_token_expires_in == 0 {
            return Err(AppError::Config(
                "JWT_ACCESS_TOKEN_EXPIRES_IN must be > 0".to_string(),
            ));
        }

        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(AppError::Config(
                "BCRYPT_COST must be between 4 and 31".to_string(),
            ));
        }

        if !matches!(self.log_format.as_str(), "json" | "pretty") {
            return Err(AppError::Config(
                "LOG_FORMAT must be either \"json\" or \"pretty\"".to_string(),
            ));
        }

        Ok(())
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn database(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            max_connections: self.database_max_connections,
            min_connections: self.database_min_connections,
            connection_timeout: self.database_connection_timeout,
        }
    }

    pub fn auth(&self) -> AuthConfig {
        AuthConfig {
            jwt_secret: self.jwt_secret.clone(),
            access_token_expires_in: self.jwt_access_token_expires_in,
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    const SECRET: (&str, &str) = ("JWT_SECRET", "a-very-long-test-secret");
    const DB: (&str, &str) = ("DATABASE_URL", "postgres://localhost/gecom");

    #[test]
    fn defaults_apply() {
        let config = Config::from_iter(vars(&[DB, SECRET])).unwrap();
        assert_eq!(config.server_address(), "127.0.0.1:8000");
        assert_eq!(config.log_format, "json");
        assert!(config.allows_any_origin());
        assert_eq!(config.database().max_connections, 10);
        assert_eq!(config.auth().access_token_expires_in, 28800);
    }

    #[test]
    fn reads_lists_and_numbers() {
        let config = Config::from_iter(vars(&[
            DB,
            SECRET,
            ("SERVER_PORT", "9090"),
            ("CORS_ORIGINS", "https://gecom.example.gov.br,http://localhost:5173"),
            ("LOG_FORMAT", "pretty"),
        ]))
        .unwrap();
        assert_eq!(config.server_port, 9090);
        assert_eq!(config.cors_origins.len(), 2);
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn rejects_placeholder_secret() {
        assert!(Config::from_iter(vars(&[DB])).is_err());
        assert!(Config::from_iter(vars(&[DB, ("JWT_SECRET", "short")])).is_err());
    }

    #[test]
    fn rejects_inconsistent_pool_and_cost() {
        assert!(
            Config::from_iter(vars(&[
                DB,
                SECRET,
                ("DATABASE_MIN_CONNECTIONS", "20"),
                ("DATABASE_MAX_CONNECTIONS", "5"),
            ]))
            .is_err()
        );
        assert!(Config::from_iter(vars(&[DB, SECRET, ("BCRYPT_COST", "3")])).is_err());
        assert!(Config::from_iter(vars(&[DB, SECRET, ("LOG_FORMAT", "xml")])).is_err());
    }

    #[test]
    fn missing_database_url_is_an_error() {
        assert!(matches!(
            Config::from_iter(vars(&[SECRET])),
            Err(AppError::Config(_))
        ));
    }
}
