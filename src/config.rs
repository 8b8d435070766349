use anyhow::{Context, Result};
use secrecy::SecretString;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use uuid::Uuid;

/// Process configuration, built once in `main` and handed to `AppState`.
/// There is deliberately no global accessor; every component receives the
/// values it needs at construction.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub auth: AuthConfig,
    pub stripe: StripeConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub name: String,
    pub environment: Environment,
    pub default_organization_id: Uuid,
    pub default_page_size: i64,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub google_client_id: String,
}

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: SecretString,
    pub webhook_secret: SecretString,
    /// Maximum accepted age of a webhook signature timestamp, in seconds.
    pub webhook_tolerance_secs: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = env::var("SERVER_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse::<IpAddr>()
            .context("Failed to parse SERVER_HOST")?;

        let port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()
            .context("Failed to parse SERVER_PORT")?;

        let db_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let db_max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(val) => Some(
                val.parse()
                    .context("Failed to parse DATABASE_MAX_CONNECTIONS")?,
            ),
            Err(_) => Some(10),
        };
        let db_min_connections = match env::var("DATABASE_MIN_CONNECTIONS") {
            Ok(val) => Some(
                val.parse()
                    .context("Failed to parse DATABASE_MIN_CONNECTIONS")?,
            ),
            Err(_) => Some(1),
        };

        let environment = env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "development".to_string())
            .parse::<Environment>()
            .unwrap_or(Environment::Development);

        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "Tutoring Backend".to_string());

        let default_organization_id = env::var("DEFAULT_ORGANIZATION_ID")
            .context("DEFAULT_ORGANIZATION_ID must be set")?
            .parse::<Uuid>()
            .context("Failed to parse DEFAULT_ORGANIZATION_ID")?;

        let default_page_size = match env::var("DEFAULT_PAGE_SIZE") {
            Ok(val) => val.parse().context("Failed to parse DEFAULT_PAGE_SIZE")?,
            Err(_) => 100,
        };

        let google_client_id =
            env::var("GOOGLE_CLIENT_ID").context("GOOGLE_CLIENT_ID must be set")?;

        let stripe_secret_key: SecretString = env::var("STRIPE_API_KEY")
            .context("STRIPE_API_KEY must be set")?
            .into();
        let stripe_webhook_secret: SecretString = env::var("STRIPE_WEBHOOK_SECRET")
            .context("STRIPE_WEBHOOK_SECRET must be set")?
            .into();
        let webhook_tolerance_secs = match env::var("STRIPE_WEBHOOK_TOLERANCE_SECS") {
            Ok(val) => val
                .parse()
                .context("Failed to parse STRIPE_WEBHOOK_TOLERANCE_SECS")?,
            Err(_) => 300,
        };

        Ok(Config {
            server: ServerConfig { host, port },
            database: DatabaseConfig {
                url: db_url,
                max_connections: db_max_connections,
                min_connections: db_min_connections,
            },
            app: AppConfig {
                name: app_name,
                environment,
                default_organization_id,
                default_page_size,
            },
            auth: AuthConfig { google_client_id },
            stripe: StripeConfig {
                secret_key: stripe_secret_key,
                webhook_secret: stripe_webhook_secret,
                webhook_tolerance_secs,
            },
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server.host, self.server.port)
    }

    #[allow(unused)]
    pub fn is_production(&self) -> bool {
        self.app.environment == Environment::Production
    }

    #[allow(unused)]
    pub fn is_development(&self) -> bool {
        self.app.environment == Environment::Development
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "development" => Ok(Environment::Development),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}
