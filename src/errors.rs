use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum GuardBenchError {
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code("GBENCH-001"),
        help("Please check your experiment YAML syntax and structure.")
    )]
    ConfigError(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code("GBENCH-002"),
        help("Check file paths and permissions.")
    )]
    IoError(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    #[diagnostic(
        code("GBENCH-003"),
        help("An error occurred while reading the benchmark dataset.")
    )]
    PolarsError(#[from] polars::error::PolarsError),

    #[error("Must have two, and only two, columns to compare, got {0}")]
    #[diagnostic(
        code("GBENCH-004"),
        help("Each dual-input target must name exactly two benchmark columns.")
    )]
    ColumnPairError(usize),

    #[error("Column length mismatch: {0}")]
    #[diagnostic(
        code("GBENCH-005"),
        help("Columns compared within one test must have the same row count.")
    )]
    LengthMismatch(String),

    #[error("Validation failed: {0}")]
    #[diagnostic(
        code("GBENCH-006"),
        help("The guardrail could not process the entry.")
    )]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    #[diagnostic(
        code("GBENCH-007"),
        help("Failed to serialize a guardrail output to JSON.")
    )]
    SerializeError(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code("GBENCH-000"))]
    Unknown(#[from] anyhow::Error),
}

pub type GuardBenchResult<T> = Result<T, GuardBenchError>;
