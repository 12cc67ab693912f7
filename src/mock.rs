//! Mock Machine Translator for testing
//!
//! Deterministic, network-free translator for exercising chains without a
//! LibreTranslate instance. Every call is recorded, so tests can check the
//! exact order in which hops were issued.
//!
//! # Example
//!
//! ```ignore
//! use telephone_mt::{MachineTranslator, MockTranslator, MockMode};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("hello", "en", "fr").await.unwrap();
//!     assert_eq!(result, "hello_fr");
//! }
//! ```

use crate::error::{MtError, MtResult};
use crate::translator::MachineTranslator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append target suffix: "hello" → "hello_fr"
    Suffix,

    /// Use predefined mappings, falling back to `Suffix`
    /// (text, target_locale) → translation
    Mappings(HashMap<(String, String), String>),

    /// Return an empty string, as a service does on degraded success
    Empty,

    /// Fail every call with a service error
    Error(String),

    /// Fail the n-th call (0-based) with a network error, suffix otherwise
    FailOnCall(usize),

    /// No-op: return input unchanged
    NoOp,
}

/// A single recorded `translate` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub text: String,
    pub source: String,
    pub target: String,
}

/// Mock translator that simulates various translation scenarios
#[derive(Debug)]
pub struct MockTranslator {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    calls: Mutex<Vec<MockCall>>,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self::with_delay(mode, 0)
    }

    /// Create a MockTranslator with simulated network delay
    ///
    /// # Arguments
    ///
    /// * `mode` - How translations are produced
    /// * `delay_ms` - Sleep before answering each call, in milliseconds
    ///
    /// # Example
    ///
    /// ```ignore
    /// let slow = MockTranslator::with_delay(MockMode::Suffix, 50);
    /// ```
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay_ms,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Calls received so far, in order
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Record the call and return its 0-based index
    fn record(&self, text: &str, source: &str, target: &str) -> usize {
        let mut calls = match self.calls.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        calls.push(MockCall {
            text: text.to_string(),
            source: source.to_string(),
            target: target.to_string(),
        });
        calls.len() - 1
    }

    /// Apply translation logic based on the mode
    fn apply_translation(&self, index: usize, text: &str, target: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Empty => Ok(String::new()),
            MockMode::Error(msg) => Err(MtError::ServiceError(msg.clone())),
            MockMode::FailOnCall(n) if *n == index => Err(MtError::NetworkError(format!(
                "Simulated timeout on call {}",
                index
            ))),
            MockMode::FailOnCall(_) => Ok(format!("{}_{}", text, target)),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        let index = self.record(text, source_locale, target_locale);

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        self.apply_translation(index, text, target_locale)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
