//! LibreTranslate provider for machine translation
//!
//! Sends one `POST {base_url}/translate` per call with the JSON body
//! `{"q", "source", "target", "format": "text"}` (plus `api_key` when one is
//! configured) and reads `translatedText` from the response.
//!
//! A 2xx response without a string `translatedText` field is treated as a
//! degraded success: the call returns an empty string instead of failing.
//!
//! # Example
//!
//! ```ignore
//! use telephone_mt::{LibreTranslateConfig, LibreTranslateProvider, MachineTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LibreTranslateConfig {
//!         base_url: "http://localhost:5000".to_string(),
//!         ..Default::default()
//!     };
//!     let provider = LibreTranslateProvider::new(config)?;
//!     let result = provider.translate("Hello", "en", "de").await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use crate::error::{MtError, MtResult};
use crate::translator::MachineTranslator;
use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::warn;

fn default_base_url() -> String {
    "https://libretranslate.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Connection settings for a LibreTranslate instance
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibreTranslateConfig {
    /// Instance root, e.g. `https://libretranslate.com` or `http://localhost:5000`
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Required by the public instance, optional on self-hosted ones
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LibreTranslateConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for LibreTranslateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibreTranslateConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// LibreTranslate HTTP provider
#[derive(Clone)]
pub struct LibreTranslateProvider {
    client: reqwest::Client,
    /// Full URL of the `/translate` endpoint
    endpoint: Url,
    api_key: Option<String>,
}

impl LibreTranslateProvider {
    /// Create a provider from explicit settings
    ///
    /// # Arguments
    ///
    /// * `config` - Instance URL, optional API key and request timeout
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - Provider posting to `{base_url}/translate`
    /// * `Err(MtError)` - If the settings are unusable
    ///
    /// # Example
    ///
    /// ```ignore
    /// let provider = LibreTranslateProvider::new(LibreTranslateConfig {
    ///     base_url: "http://localhost:5000".to_string(),
    ///     ..Default::default()
    /// })?;
    /// ```
    ///
    /// # Errors
    ///
    /// * `MtError::ConfigError` - base URL does not parse or timeout is zero
    /// * `MtError::NetworkError` - HTTP client creation fails
    pub fn new(config: LibreTranslateConfig) -> MtResult<Self> {
        if config.timeout_secs == 0 {
            return Err(MtError::ConfigError(
                "Timeout must be at least one second".to_string(),
            ));
        }

        let endpoint = Self::endpoint_url(&config.base_url)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        let api_key = config.api_key.filter(|key| !key.trim().is_empty());

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Provider for the public `libretranslate.com` instance, no API key
    pub fn with_defaults() -> MtResult<Self> {
        Self::new(LibreTranslateConfig::default())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn endpoint_url(base_url: &str) -> MtResult<Url> {
        let base = base_url.trim();
        if base.is_empty() {
            return Err(MtError::ConfigError("Base URL cannot be empty".to_string()));
        }

        Url::parse(&format!("{}/translate", base.trim_end_matches('/')))
            .map_err(|e| MtError::ConfigError(format!("Invalid base URL '{}': {}", base, e)))
    }

    fn request_body(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> serde_json::Value {
        let mut body = json!({
            "q": text,
            "source": source_locale,
            "target": target_locale,
            "format": "text"
        });
        if let Some(key) = &self.api_key {
            body["api_key"] = json!(key);
        }
        body
    }
}

impl std::fmt::Debug for LibreTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibreTranslateProvider")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for LibreTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        let body = self.request_body(text, source_locale, target_locale);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            // LibreTranslate reports failures as {"error": "..."}
            let message = serde_json::from_str::<serde_json::Value>(&error_text)
                .ok()
                .and_then(|v| v["error"].as_str().map(str::to_string))
                .unwrap_or(error_text);

            return Err(MtError::ServiceError(format!(
                "LibreTranslate returned {}: {}",
                status, message
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            MtError::ServiceError(format!("Failed to parse LibreTranslate response: {}", e))
        })?;

        match json["translatedText"].as_str() {
            Some(translated) => Ok(translated.to_string()),
            None => {
                warn!(
                    source = source_locale,
                    target = target_locale,
                    "LibreTranslate response has no 'translatedText'; using empty text"
                );
                Ok(String::new())
            }
        }
    }

    fn provider_name(&self) -> &str {
        "LibreTranslate"
    }
}
