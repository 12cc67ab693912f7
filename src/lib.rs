//! Chained machine translation
//!
//! Relays a piece of text through a sequence of intermediate languages before
//! translating it into the final language, so the drift introduced by each hop
//! can be observed (the "telephone game").
//!
//! # Workflow Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use telephone_mt::{ChainOrchestrator, LibreTranslateProvider, TranslationRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Pick a provider
//!     let provider = LibreTranslateProvider::with_defaults()?;
//!
//!     // 2. Build the orchestrator over the default catalog
//!     let orchestrator = ChainOrchestrator::new(Arc::new(provider));
//!
//!     // 3. en -> af -> am -> ar -> es
//!     let request = TranslationRequest::new("The quick brown fox", "en", "es", 4);
//!     let result = orchestrator.run(&request).await?;
//!
//!     for hop in &result.hops {
//!         println!("{}: {}", hop.step, hop.text);
//!     }
//!     println!("Result: {}", result.final_text);
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod libre_translate;
pub mod mock;
pub mod orchestrator;
pub mod planner;
pub mod translator;


// Re-export main types for convenient access
pub use catalog::{LIBRE_TRANSLATE_CODES, LanguageCatalog, LanguageCode};
pub use error::{MtError, MtResult};
pub use libre_translate::{LibreTranslateConfig, LibreTranslateProvider};
pub use mock::{MockCall, MockMode, MockTranslator};
pub use orchestrator::{
    ChainOrchestrator, HopRecord, MIN_HOP_COUNT, TranslationRequest, TranslationResult,
};
pub use planner::{ChainPlan, TranslationStep, plan};
pub use translator::MachineTranslator;
