//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_CATALOG_PATH: &str = "data/services.json";
const DEFAULT_WINTER_TIPS_PATH: &str = "data/winter_tips.json";
const DEFAULT_EXPERTS_PATH: &str = "data/experts.json";
const DEFAULT_SESSION_STORE_PATH: &str = "data/session.json";
const DEFAULT_GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Front-end origin allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Static service catalog (JSON array)
    pub catalog_path: PathBuf,
    /// Home page care tips (JSON array)
    pub winter_tips_path: PathBuf,
    /// Home page veterinary team (JSON array)
    pub experts_path: PathBuf,
    /// Local key-value file holding the persisted session
    pub session_store_path: PathBuf,
    /// OAuth client ID that Google ID tokens must be issued for
    pub google_client_id: String,
    /// Google signing keys endpoint
    pub google_jwks_url: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            port: 8080,
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            winter_tips_path: PathBuf::from(DEFAULT_WINTER_TIPS_PATH),
            experts_path: PathBuf::from(DEFAULT_EXPERTS_PATH),
            session_store_path: PathBuf::from(DEFAULT_SESSION_STORE_PATH),
            google_client_id: "test-client.apps.googleusercontent.com".to_string(),
            google_jwks_url: DEFAULT_GOOGLE_JWKS_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
            port,
            catalog_path: env::var("CATALOG_PATH")
                .unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string())
                .into(),
            winter_tips_path: env::var("WINTER_TIPS_PATH")
                .unwrap_or_else(|_| DEFAULT_WINTER_TIPS_PATH.to_string())
                .into(),
            experts_path: env::var("EXPERTS_PATH")
                .unwrap_or_else(|_| DEFAULT_EXPERTS_PATH.to_string())
                .into(),
            session_store_path: env::var("SESSION_STORE_PATH")
                .unwrap_or_else(|_| DEFAULT_SESSION_STORE_PATH.to_string())
                .into(),
            google_client_id: env::var("GOOGLE_CLIENT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            google_jwks_url: env::var("GOOGLE_JWKS_URL")
                .unwrap_or_else(|_| DEFAULT_GOOGLE_JWKS_URL.to_string()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
