//! Sequential execution of translation chains
//!
//! `ChainOrchestrator` validates a `TranslationRequest`, plans it once, then
//! runs each step through the `MachineTranslator`, feeding every hop's output
//! into the next hop. Steps are awaited one at a time; a step is never issued
//! before the previous one has returned.
//!
//! Any failing hop ends the run. The partially translated text and the trace
//! collected so far are dropped, and the error is returned unchanged.

use crate::catalog::{LanguageCatalog, LanguageCode};
use crate::error::{MtError, MtResult};
use crate::planner::{self, ChainPlan, TranslationStep};
use crate::translator::MachineTranslator;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Smallest hop count a request can carry; lower values are raised to it
pub const MIN_HOP_COUNT: usize = 4;

/// Immutable input for one chained translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    text: String,
    start_lang: LanguageCode,
    end_lang: LanguageCode,
    hop_count: usize,
}

impl TranslationRequest {
    /// Build a request, raising `hop_count` to `MIN_HOP_COUNT` when below it
    ///
    /// Takes a signed count since it usually comes straight from user input.
    pub fn new(
        text: impl Into<String>,
        start_lang: impl Into<LanguageCode>,
        end_lang: impl Into<LanguageCode>,
        hop_count: i64,
    ) -> Self {
        let hop_count = usize::try_from(hop_count)
            .unwrap_or(0)
            .max(MIN_HOP_COUNT);

        Self {
            text: text.into(),
            start_lang: start_lang.into(),
            end_lang: end_lang.into(),
            hop_count,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start_lang(&self) -> &LanguageCode {
        &self.start_lang
    }

    pub fn end_lang(&self) -> &LanguageCode {
        &self.end_lang
    }

    pub fn hop_count(&self) -> usize {
        self.hop_count
    }
}

/// Output of one hop
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HopRecord {
    #[serde(flatten)]
    pub step: TranslationStep,
    pub text: String,
}

/// Successful outcome of a chained translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationResult {
    pub final_text: String,
    pub plan: ChainPlan,
    /// One record per executed step, in execution order
    pub hops: Vec<HopRecord>,
}

/// Runs translation chains against a shared catalog and translator
///
/// Holds no per-request state, so one orchestrator can serve any number of
/// concurrent requests.
#[derive(Clone)]
pub struct ChainOrchestrator {
    translator: Arc<dyn MachineTranslator>,
    catalog: Arc<LanguageCatalog>,
    max_hops: Option<usize>,
}

impl ChainOrchestrator {
    /// Orchestrator over the default LibreTranslate catalog, no hop ceiling
    pub fn new(translator: Arc<dyn MachineTranslator>) -> Self {
        Self {
            translator,
            catalog: Arc::new(LanguageCatalog::default()),
            max_hops: None,
        }
    }

    pub fn with_catalog(mut self, catalog: Arc<LanguageCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Reject requests whose hop count is above `max_hops`
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = Some(max_hops);
        self
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    pub fn max_hops(&self) -> Option<usize> {
        self.max_hops
    }

    /// Validate `request` and build its plan without translating anything
    ///
    /// # Example
    ///
    /// ```ignore
    /// let request = TranslationRequest::new("", "af", "es", 4);
    /// let plan = orchestrator.plan(&request)?;
    /// assert_eq!(plan.len(), 3); // af -> am -> ar -> es
    /// ```
    ///
    /// # Errors
    ///
    /// * `MtError::InvalidLanguageCode` - start or end language not in the catalog
    /// * `MtError::HopLimitExceeded` - hop count above the configured ceiling
    pub fn plan(&self, request: &TranslationRequest) -> MtResult<ChainPlan> {
        self.catalog.validate(request.start_lang())?;
        self.catalog.validate(request.end_lang())?;

        if let Some(max) = self.max_hops {
            if request.hop_count() > max {
                return Err(MtError::HopLimitExceeded {
                    requested: request.hop_count(),
                    max,
                });
            }
        }

        Ok(planner::plan(
            request.start_lang(),
            request.end_lang(),
            request.hop_count(),
            &self.catalog,
        ))
    }

    /// Plan and execute `request`
    ///
    /// The plan is built once, then each step is awaited in order with the
    /// previous step's output as its input.
    ///
    /// # Arguments
    ///
    /// * `request` - Text, start and end language, and hop count
    ///
    /// # Returns
    ///
    /// * `Ok(TranslationResult)` - Final text, the executed plan and one
    ///   `HopRecord` per step
    /// * `Err(MtError)` - Validation failure, or the first failing hop's error
    ///
    /// # Example
    ///
    /// ```ignore
    /// let orchestrator = ChainOrchestrator::new(Arc::new(MockTranslator::new(MockMode::Suffix)));
    /// let request = TranslationRequest::new("hello", "en", "es", 4);
    /// let result = orchestrator.run(&request).await?;
    /// assert_eq!(result.final_text, "hello_af_am_ar_es");
    /// ```
    pub async fn run(&self, request: &TranslationRequest) -> MtResult<TranslationResult> {
        let plan = self.plan(request)?;

        info!(
            provider = self.translator.provider_name(),
            start = %request.start_lang(),
            end = %request.end_lang(),
            hop_count = request.hop_count(),
            steps = plan.len(),
            "Starting translation chain"
        );

        self.execute(plan, request.text()).await
    }

    /// Execute an already-built plan, starting from `text`
    ///
    /// Every step runs, including a final step whose source and target match.
    pub async fn execute(&self, plan: ChainPlan, text: &str) -> MtResult<TranslationResult> {
        let mut current = text.to_string();
        let mut hops = Vec::with_capacity(plan.len());

        for (index, step) in plan.iter().enumerate() {
            current = self
                .translator
                .translate(&current, step.source.as_str(), step.target.as_str())
                .await
                .map_err(|e| {
                    warn!(hop = index, step = %step, error = %e, "Translation chain aborted");
                    e
                })?;

            debug!(hop = index, step = %step, chars = current.chars().count(), "Hop complete");

            hops.push(HopRecord {
                step: step.clone(),
                text: current.clone(),
            });
        }

        info!(steps = hops.len(), "Translation chain finished");

        Ok(TranslationResult {
            final_text: current,
            plan,
            hops,
        })
    }
}

impl std::fmt::Debug for ChainOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainOrchestrator")
            .field("translator", &self.translator.provider_name())
            .field("catalog_len", &self.catalog.len())
            .field("max_hops", &self.max_hops)
            .finish()
    }
}
