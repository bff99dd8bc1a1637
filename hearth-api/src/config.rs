/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct assembled once at startup. Nothing reads
/// ambient environment after that point; the struct is passed explicitly to
/// the components that need it.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: SQLite connection string (default: sqlite://hearth.db)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `JWT_SECRET`: Secret key for session token signing (required)
/// - `FRONTEND_URL`: Frontend origin, used for magic links and CORS
///   (default: http://localhost:5173)
/// - `RUST_LOG`: Log level (default: info)
///
/// # Example
///
/// ```no_run
/// use hearth_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Session token configuration
    pub jwt: JwtConfig,

    /// Frontend integration configuration
    pub frontend: FrontendConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// Converts to the pool configuration consumed by `hearth_shared`
    pub fn pool_config(&self) -> hearth_shared::db::pool::DatabaseConfig {
        hearth_shared::db::pool::DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            ..Default::default()
        }
    }
}

/// Session token configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for session token signing
    ///
    /// IMPORTANT: This must be kept secret and must be at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`. A missing secret is a
    /// configuration error; a random per-process key would invalidate all
    /// sessions on restart.
    pub secret: String,
}

/// Frontend integration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Frontend origin; magic links point here
    pub url: String,
}

impl FrontendConfig {
    /// Origins allowed by CORS: the configured frontend plus local dev hosts
    pub fn cors_origins(&self) -> Vec<String> {
        let mut origins = vec![
            "http://localhost:5173".to_string(),
            "http://localhost:3000".to_string(),
        ];
        if !origins.contains(&self.url) {
            origins.insert(0, self.url.clone());
        }
        origins
    }

    /// Builds the magic link for a token
    pub fn magic_link(&self, token: &str) -> String {
        format!("{}?token={}", self.url, token)
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or
    /// have invalid values.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://hearth.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable is required"))?;

        if jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 characters long");
        }

        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:5173".to_string());

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            jwt: JwtConfig { secret: jwt_secret },
            frontend: FrontendConfig { url: frontend_url },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
            frontend: FrontendConfig {
                url: "http://localhost:5173".to_string(),
            },
        }
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_magic_link() {
        let config = test_config();
        assert_eq!(
            config.frontend.magic_link("abc123"),
            "http://localhost:5173?token=abc123"
        );
    }

    #[test]
    fn test_cors_origins_deduplicate_frontend() {
        let config = test_config();
        let origins = config.frontend.cors_origins();
        assert_eq!(
            origins
                .iter()
                .filter(|o| o.as_str() == "http://localhost:5173")
                .count(),
            1
        );
    }

    #[test]
    fn test_cors_origins_include_custom_frontend() {
        let mut config = test_config();
        config.frontend.url = "https://hearth.example.com".to_string();
        let origins = config.frontend.cors_origins();
        assert_eq!(origins[0], "https://hearth.example.com");
        assert!(origins.contains(&"http://localhost:3000".to_string()));
    }
}
