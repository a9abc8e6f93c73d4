use crate::errors::GuardBenchResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Experiment {
    pub guardrail: GuardrailSpec,
    pub benchmark: BenchmarkSpec,
    pub mode: Mode,
}

impl Experiment {
    pub fn from_path(path: &Path) -> GuardBenchResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}

/// Benchmark dataset location and the name used in test identifiers
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkSpec {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GuardrailSpec {
    Regex { name: String, pattern: String },
    Keyword { name: String, banned: Vec<String> },
    ExactMatch { name: String },
}

impl GuardrailSpec {
    pub fn name(&self) -> &str {
        match self {
            GuardrailSpec::Regex { name, .. } => name,
            GuardrailSpec::Keyword { name, .. } => name,
            GuardrailSpec::ExactMatch { name } => name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mode {
    SingleInput {
        target_columns: Vec<String>,
    },
    DualInput {
        target_columns: Vec<Vec<String>>,
        ground_truth: String,
        #[serde(default)]
        input_key: Option<String>,
        #[serde(default)]
        output_key: Option<String>,
    },
}
