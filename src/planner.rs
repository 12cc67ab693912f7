//! Chain planning
//!
//! Turns (start, end, hop count) into the ordered list of translation steps.
//! Planning is pure: no I/O, no randomness, and the same inputs always give
//! the same plan.
//!
//! Intermediate languages are taken from the catalog in order, indexed by the
//! hop number and wrapping at the end. A hop whose language equals the current
//! one is skipped. The final step to the end language is always emitted, even
//! when the chain is already sitting in that language.
//!
//! # Example
//!
//! ```ignore
//! use telephone_mt::{LanguageCatalog, plan};
//!
//! let catalog = LanguageCatalog::default();
//! let chain = plan(&"en".into(), &"es".into(), 4, &catalog);
//! // en -> af -> am -> ar -> es
//! assert_eq!(chain.len(), 4);
//! ```

use crate::catalog::{LanguageCatalog, LanguageCode};
use serde::Serialize;
use std::fmt;

/// One hop: translate from `source` into `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TranslationStep {
    pub source: LanguageCode,
    pub target: LanguageCode,
}

impl TranslationStep {
    pub fn new(source: impl Into<LanguageCode>, target: impl Into<LanguageCode>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Source and target are the same language
    pub fn is_same_language(&self) -> bool {
        self.source == self.target
    }
}

impl fmt::Display for TranslationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.source, self.target)
    }
}

/// Ordered, immutable sequence of steps for a single request
///
/// Never empty: every plan ends with the step into the end language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChainPlan {
    steps: Vec<TranslationStep>,
}

impl ChainPlan {
    pub fn steps(&self) -> &[TranslationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TranslationStep> {
        self.steps.iter()
    }

    /// The step into the end language
    pub fn final_step(&self) -> Option<&TranslationStep> {
        self.steps.last()
    }

    /// Every language the text passes through, start language first
    pub fn route(&self) -> Vec<&LanguageCode> {
        let mut route = Vec::with_capacity(self.steps.len() + 1);
        if let Some(first) = self.steps.first() {
            route.push(&first.source);
        }
        route.extend(self.steps.iter().map(|s| &s.target));
        route
    }
}

impl<'a> IntoIterator for &'a ChainPlan {
    type Item = &'a TranslationStep;
    type IntoIter = std::slice::Iter<'a, TranslationStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Build the chain of steps from `start` to `end`
///
/// Runs `hop_count - 1` intermediate iterations (none when `hop_count` is 0 or
/// 1). Iteration `i` proposes `catalog.code_at(i)`; it is skipped when equal to
/// the current language. The final `(current, end)` step is appended
/// unconditionally.
///
/// No floor is applied here. `TranslationRequest` raises the hop count to its
/// minimum before planning.
///
/// # Arguments
///
/// * `start` - Language the input text is written in
/// * `end` - Language of the final result
/// * `hop_count` - Number of hops requested, including the final one
/// * `catalog` - Ordered languages the intermediate hops cycle through
///
/// # Returns
///
/// A non-empty `ChainPlan` of at most `max(hop_count, 1)` steps
///
/// # Example
///
/// ```ignore
/// let catalog = LanguageCatalog::default();
/// let chain = plan(&"af".into(), &"es".into(), 4, &catalog);
/// // af is catalog[0], so that hop is skipped: af -> am -> ar -> es
/// assert_eq!(chain.len(), 3);
/// ```
pub fn plan(
    start: &LanguageCode,
    end: &LanguageCode,
    hop_count: usize,
    catalog: &LanguageCatalog,
) -> ChainPlan {
    let mut steps = Vec::with_capacity(hop_count.min(catalog.len() + 1).max(1));
    let mut current = start.clone();
    // Consecutive skipped hops
    let mut skipped = 0;

    for i in 0..hop_count.saturating_sub(1) {
        let next = catalog.code_at(i);
        if *next == current {
            skipped += 1;
            // A whole cycle of skips means every catalog entry is `current`
            if skipped >= catalog.len() {
                break;
            }
            continue;
        }
        skipped = 0;
        steps.push(TranslationStep::new(current, next.clone()));
        current = next.clone();
    }

    steps.push(TranslationStep::new(current, end.clone()));

    ChainPlan { steps }
}
