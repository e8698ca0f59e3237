//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; a storefront with no webhooks configured runs
//! in simulated-delivery mode.
//!
//! - `GRINDCTRL_WEBHOOK_URL` - Endpoint receiving new-order payloads
//! - `GRINDCTRL_RETURN_WEBHOOK_URL` - Endpoint receiving return requests
//! - `GRINDCTRL_EXCHANGE_WEBHOOK_URL` - Endpoint receiving exchange requests
//! - `GRINDCTRL_STATE_DIR` - Directory for persisted state (default: `.grindctrl`)
//! - `GRINDCTRL_CATALOG` - Path to the catalog JSON file (default: `products.json`)

use std::path::PathBuf;

use thiserror::Error;

/// Sentinel value some deployments leave in place of a real webhook URL.
/// Treated the same as an unset variable.
pub const UNCONFIGURED_SENTINEL: &str = "WEBHOOK_URL_NOT_CONFIGURED";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Destination URLs for the delivery protocol.
///
/// `None` (or the [`UNCONFIGURED_SENTINEL`]) means the corresponding
/// submission is simulated rather than sent.
#[derive(Debug, Clone, Default)]
pub struct WebhookConfig {
    /// Endpoint receiving new-order payloads.
    pub order_url: Option<String>,
    /// Endpoint receiving return-request payloads.
    pub return_url: Option<String>,
    /// Endpoint receiving exchange-request payloads.
    pub exchange_url: Option<String>,
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Webhook destinations for orders, returns, and exchanges.
    pub webhooks: WebhookConfig,
    /// Directory holding the persisted cart, wishlist, and order log.
    pub state_dir: PathBuf,
    /// Path to the catalog JSON file.
    pub catalog_path: PathBuf,
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a configured webhook URL does not parse as a
    /// URL. Absent variables are not errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            webhooks: WebhookConfig {
                order_url: get_webhook_url("GRINDCTRL_WEBHOOK_URL")?,
                return_url: get_webhook_url("GRINDCTRL_RETURN_WEBHOOK_URL")?,
                exchange_url: get_webhook_url("GRINDCTRL_EXCHANGE_WEBHOOK_URL")?,
            },
            state_dir: PathBuf::from(get_env_or_default("GRINDCTRL_STATE_DIR", ".grindctrl")),
            catalog_path: PathBuf::from(get_env_or_default("GRINDCTRL_CATALOG", "products.json")),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Load a webhook URL, validating it parses when set.
///
/// Blank values and the sentinel placeholder are normalized to `None` so the
/// delivery protocol's simulated path kicks in.
fn get_webhook_url(key: &str) -> Result<Option<String>, ConfigError> {
    let Some(value) = get_optional_env(key) else {
        return Ok(None);
    };

    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == UNCONFIGURED_SENTINEL {
        return Ok(None);
    }

    url::Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    Ok(Some(trimmed.to_string()))
}
