//! Guardrail contract shared by the experiment runners
//!
//! A guardrail inspects one entry (single-input experiments) or a pair of
//! entries (dual-input experiments) and returns a structured judgment that
//! the harness serializes to JSON.

use crate::errors::{GuardBenchError, GuardBenchResult};
use polars::prelude::AnyValue;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// String form of a benchmark cell, as fed to text-oriented guardrails.
/// Nulls become the empty string; non-string cells use their display form.
pub fn entry_text<'a>(value: &'a AnyValue<'_>) -> Cow<'a, str> {
    match value {
        AnyValue::String(s) => Cow::Borrowed(*s),
        AnyValue::StringOwned(s) => Cow::Borrowed(s.as_str()),
        AnyValue::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

/// Structured judgment produced by a guardrail for one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardrailOutput {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl GuardrailOutput {
    pub fn passed() -> Self {
        Self {
            valid: true,
            explanation: None,
            score: None,
        }
    }

    pub fn failed(explanation: impl Into<String>) -> Self {
        Self {
            valid: false,
            explanation: Some(explanation.into()),
            score: None,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

/// A keyed single-entry structure wrapping one benchmark cell for guardrails
/// expecting labeled input/output roles.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle<'a> {
    pub key: String,
    pub value: AnyValue<'a>,
}

impl<'a> Bundle<'a> {
    pub fn new(key: impl Into<String>, value: AnyValue<'a>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Argument shape of the two-entry validation operation.
///
/// The harness passes `Raw` when no input/output keys were supplied, and
/// `Keyed` (with a one-element `inputs` list) when both keys were supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum PairEntries<'a> {
    Raw(AnyValue<'a>, AnyValue<'a>),
    Keyed {
        inputs: Vec<Bundle<'a>>,
        output: Bundle<'a>,
    },
}

/// External validation component driven by the experiment runners.
///
/// Implementors provide the arity they support; the defaults report an
/// unsupported-operation validation error.
pub trait Guardrail {
    fn validate(&self, entry: &AnyValue<'_>) -> GuardBenchResult<GuardrailOutput> {
        let _ = entry;
        Err(GuardBenchError::ValidationError(
            "this guardrail does not support single-input validation".to_string(),
        ))
    }

    fn validate_pair(&self, entries: PairEntries<'_>) -> GuardBenchResult<GuardrailOutput> {
        let _ = entries;
        Err(GuardBenchError::ValidationError(
            "this guardrail does not support dual-input validation".to_string(),
        ))
    }
}
