//! Machine translation provider trait
//!
//! `MachineTranslator` is the seam between the chain orchestrator and
//! whatever actually translates text: the LibreTranslate HTTP client in
//! production, `MockTranslator` in tests.
//!
//! # Example
//!
//! ```ignore
//! use telephone_mt::{MachineTranslator, LibreTranslateProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = LibreTranslateProvider::with_defaults()?;
//!     let result = provider.translate("Hello, world!", "en", "fr").await?;
//!     println!("{}", result); // "Bonjour, le monde !"
//!     Ok(())
//! }
//! ```

use crate::error::MtResult;
use async_trait::async_trait;

/// Generic trait for machine translation providers
///
/// Providers are shared across concurrent requests behind an `Arc`, so they
/// must be `Send + Sync` and must not keep per-request state.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate `text` from `source_locale` into `target_locale`
    ///
    /// Empty text is a valid input. Locale codes are passed through as given;
    /// checking them against a catalog is the caller's job.
    ///
    /// # Arguments
    ///
    /// * `text` - Text to translate
    /// * `source_locale` - Language `text` is written in
    /// * `target_locale` - Language to translate into
    ///
    /// # Returns
    ///
    /// The translated text
    ///
    /// # Example
    ///
    /// ```ignore
    /// let translator = MockTranslator::new(MockMode::Suffix);
    /// assert_eq!(translator.translate("hello", "en", "fr").await?, "hello_fr");
    /// ```
    ///
    /// # Errors
    ///
    /// * `MtError::NetworkError` - the request never got a response
    /// * `MtError::ServiceError` - the service responded with a failure or
    ///   an unreadable body
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String>;

    /// Name of this provider, for logging
    fn provider_name(&self) -> &str;
}
