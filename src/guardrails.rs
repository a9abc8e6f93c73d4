//! Reference guardrail implementations
//!
//! Small built-in guardrails so experiments run end to end without an
//! external validation library: regex and keyword checks for single-input
//! experiments, exact-match comparison for dual-input experiments.

use crate::errors::{GuardBenchError, GuardBenchResult};
use crate::guardrail::{entry_text, Guardrail, GuardrailOutput, PairEntries};
use polars::prelude::AnyValue;
use regex::Regex;

/// Passes entries whose string form matches the configured pattern.
#[derive(Debug)]
pub struct RegexGuardrail {
    pattern: Regex,
}

impl RegexGuardrail {
    pub fn new(pattern: &str) -> GuardBenchResult<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            GuardBenchError::ValidationError(format!("invalid pattern '{pattern}': {e}"))
        })?;
        Ok(Self { pattern })
    }
}

impl Guardrail for RegexGuardrail {
    fn validate(&self, entry: &AnyValue<'_>) -> GuardBenchResult<GuardrailOutput> {
        let text = entry_text(entry);
        if self.pattern.is_match(&text) {
            Ok(GuardrailOutput::passed())
        } else {
            Ok(GuardrailOutput::failed(format!(
                "entry does not match pattern '{}'",
                self.pattern
            )))
        }
    }
}

/// Fails entries containing any banned keyword (case-insensitive).
pub struct KeywordGuardrail {
    banned: Vec<String>,
}

impl KeywordGuardrail {
    pub fn new(banned: Vec<String>) -> Self {
        let banned = banned.into_iter().map(|k| k.to_lowercase()).collect();
        Self { banned }
    }
}

impl Guardrail for KeywordGuardrail {
    fn validate(&self, entry: &AnyValue<'_>) -> GuardBenchResult<GuardrailOutput> {
        let text = entry_text(entry).to_lowercase();
        match self.banned.iter().find(|k| text.contains(k.as_str())) {
            Some(hit) => Ok(GuardrailOutput::failed(format!(
                "entry contains banned keyword '{hit}'"
            ))),
            None => Ok(GuardrailOutput::passed()),
        }
    }
}

/// Passes pairs whose two entries have equal string forms.
pub struct ExactMatchGuardrail;

impl Guardrail for ExactMatchGuardrail {
    fn validate_pair(&self, entries: PairEntries<'_>) -> GuardBenchResult<GuardrailOutput> {
        let (left, right) = match &entries {
            PairEntries::Raw(left, right) => (entry_text(left), entry_text(right)),
            PairEntries::Keyed { inputs, output } => {
                let first = inputs.first().ok_or_else(|| {
                    GuardBenchError::ValidationError("empty input bundle list".to_string())
                })?;
                (entry_text(&first.value), entry_text(&output.value))
            }
        };
        if left == right {
            Ok(GuardrailOutput::passed())
        } else {
            Ok(GuardrailOutput::failed(format!(
                "entries differ: '{left}' vs '{right}'"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guardrail::Bundle;

    #[test]
    fn test_regex_guardrail() {
        let guardrail = RegexGuardrail::new(r"^\d+$").unwrap();
        assert!(guardrail.validate(&AnyValue::String("123")).unwrap().valid);
        assert!(!guardrail.validate(&AnyValue::String("12a")).unwrap().valid);
    }

    #[test]
    fn test_regex_guardrail_rejects_bad_pattern() {
        let err = RegexGuardrail::new("(unclosed").unwrap_err();
        assert!(matches!(err, GuardBenchError::ValidationError(_)));
    }

    #[test]
    fn test_keyword_guardrail_is_case_insensitive() {
        let guardrail = KeywordGuardrail::new(vec!["Secret".to_string()]);
        let output = guardrail
            .validate(&AnyValue::String("this is SECRET data"))
            .unwrap();
        assert!(!output.valid);
        assert!(output.explanation.unwrap().contains("secret"));
        assert!(guardrail.validate(&AnyValue::String("harmless")).unwrap().valid);
    }

    #[test]
    fn test_exact_match_raw_and_keyed() {
        let guardrail = ExactMatchGuardrail;

        let same = PairEntries::Raw(AnyValue::String("a"), AnyValue::String("a"));
        assert!(guardrail.validate_pair(same).unwrap().valid);

        let keyed = PairEntries::Keyed {
            inputs: vec![Bundle::new("question", AnyValue::String("a"))],
            output: Bundle::new("answer", AnyValue::String("b")),
        };
        assert!(!guardrail.validate_pair(keyed).unwrap().valid);
    }
}
