use anyhow::Result;
use dotenvy::dotenv;
use secrecy::Secret;
use std::env;
use std::time::Duration;

const DEFAULT_FMCSA_URL: &str = "https://mobile.fmcsa.dot.gov/qc/services";
const DEFAULT_FMCSA_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub fmcsa: FmcsaConfig,
    pub database: DatabaseConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub debug: bool,
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Secret the `X-API-Key` header must match. Absence is surfaced as a
    /// 500 by the gate, not at startup.
    pub api_secret_key: Option<Secret<String>>,
}

#[derive(Clone, Debug)]
pub struct FmcsaConfig {
    pub base_url: String,
    /// FMCSA webkey. Absence is surfaced per-request as an `error` result.
    pub webkey: Option<Secret<String>>,
    pub timeout: Duration,
}

/// Mongo settings are optional on purpose: the store validates them on
/// first use, not at startup.
#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: Option<Secret<String>>,
    pub db_name: Option<String>,
    pub loads_collection: Option<String>,
    pub carriers_calls_collection: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            db_name: None,
            loads_collection: None,
            carriers_calls_collection: "carriers_calls".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()?;
        let debug = env::var("DEBUG")
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(false);

        Ok(Self {
            server: ServerConfig { port, debug },
            auth: AuthConfig {
                api_secret_key: env::var("API_SECRET_KEY").ok().map(Secret::new),
            },
            fmcsa: FmcsaConfig {
                base_url: env::var("FMCSA_API_URL")
                    .unwrap_or_else(|_| DEFAULT_FMCSA_URL.to_string()),
                webkey: env::var("FMCSA_API_KEY").ok().map(Secret::new),
                timeout: DEFAULT_FMCSA_TIMEOUT,
            },
            database: DatabaseConfig {
                url: env::var("MONGODB_URL").ok().map(Secret::new),
                db_name: env::var("DATABASE_NAME").ok(),
                loads_collection: env::var("LOADS_COLLECTION_NAME").ok(),
                carriers_calls_collection: env::var("CARRIERS_CALLS_COLLECTION_NAME")
                    .unwrap_or_else(|_| "carriers_calls".to_string()),
            },
        })
    }
}
