//! Experiment runners
//!
//! Feeds benchmark rows to a guardrail and records serialized outputs. Each
//! call builds a fresh result collection keyed by test identifier, writes it
//! to disk once after all targets are processed, and returns it. Matching
//! the original harness, the output file name derives from the LAST target's
//! identifier even though the file holds every target's results.

use crate::config::{Experiment, GuardrailSpec, Mode};
use crate::errors::{GuardBenchError, GuardBenchResult};
use crate::guardrail::{Bundle, Guardrail, PairEntries};
use crate::guardrails::{ExactMatchGuardrail, KeywordGuardrail, RegexGuardrail};
use crate::io;
use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

/// Mapping from test identifier to the serialized guardrail outputs for that
/// test, in row order.
pub type ResultCollection = BTreeMap<String, Vec<String>>;

/// Directory results files are written under, relative to the working
/// directory.
pub const DATA_DIR: &str = "data";

/// Run the guardrail's single-entry validation over every value of each
/// target column, in row order.
///
/// Results are keyed by `{guardrail_name}_{column}_{benchmark_name}`. The
/// collection is persisted under the last column's identifier and returned
/// in full. Per-column elapsed time is logged, not persisted.
pub fn execute_single_input_experiment<G: Guardrail + ?Sized>(
    guardrail: &G,
    guardrail_name: &str,
    benchmark: &DataFrame,
    benchmark_name: &str,
    target_columns: &[String],
) -> GuardBenchResult<ResultCollection> {
    let mut collected = ResultCollection::new();
    let mut last_test_name = None;

    for target in target_columns {
        let column = benchmark.column(target)?.as_materialized_series();
        let test_name = format!("{guardrail_name}_{target}_{benchmark_name}");

        let start = Instant::now();
        let mut results = Vec::with_capacity(column.len());
        for entry in column.iter() {
            let output = guardrail.validate(&entry)?;
            results.push(serde_json::to_string(&output)?);
        }
        info!(
            test = %test_name,
            rows = column.len(),
            elapsed_secs = start.elapsed().as_secs_f64(),
            "column validated"
        );

        collected.insert(test_name.clone(), results);
        last_test_name = Some(test_name);
    }

    if let Some(test_name) = &last_test_name {
        io::write_results(Path::new(DATA_DIR), test_name, &collected)?;
    }

    Ok(collected)
}

/// Run the guardrail's two-entry validation over aligned rows of each column
/// pair.
///
/// Each pair must name exactly two columns. Both columns and the
/// ground-truth column must have equal length; a mismatch aborts the pair
/// before any row is validated. When both `input_key` and `output_key` are
/// supplied, each row is reshaped into a one-element bundle list plus an
/// output bundle; otherwise the two raw values are passed. Ground-truth
/// labels stay aligned per row but are not forwarded to the guardrail in
/// either branch.
#[allow(clippy::too_many_arguments)]
pub fn execute_dual_input_experiment<G: Guardrail + ?Sized>(
    guardrail: &G,
    guardrail_name: &str,
    benchmark: &DataFrame,
    benchmark_name: &str,
    target_columns: &[Vec<String>],
    ground_truth: &str,
    input_key: Option<&str>,
    output_key: Option<&str>,
) -> GuardBenchResult<ResultCollection> {
    let mut collected = ResultCollection::new();
    let ground_truth_column = benchmark.column(ground_truth)?.as_materialized_series();
    let mut last_test_name = None;

    for pair in target_columns {
        let [first, second] = pair.as_slice() else {
            return Err(GuardBenchError::ColumnPairError(pair.len()));
        };
        let column1 = benchmark.column(first)?.as_materialized_series();
        let column2 = benchmark.column(second)?.as_materialized_series();
        ensure_aligned(
            (first.as_str(), column1.len()),
            (second.as_str(), column2.len()),
            (ground_truth, ground_truth_column.len()),
        )?;
        let test_name = format!("{guardrail_name}_{first}_{second}_{benchmark_name}");

        let start = Instant::now();
        let mut results = Vec::with_capacity(column1.len());
        for ((entry1, entry2), _gt_label) in column1
            .iter()
            .zip(column2.iter())
            .zip(ground_truth_column.iter())
        {
            let entries = match (input_key, output_key) {
                (Some(input_key), Some(output_key)) => PairEntries::Keyed {
                    inputs: vec![Bundle::new(input_key, entry1)],
                    output: Bundle::new(output_key, entry2),
                },
                _ => PairEntries::Raw(entry1, entry2),
            };
            let output = guardrail.validate_pair(entries)?;
            results.push(serde_json::to_string(&output)?);
        }
        info!(
            test = %test_name,
            rows = column1.len(),
            elapsed_secs = start.elapsed().as_secs_f64(),
            "column pair validated"
        );

        collected.insert(test_name.clone(), results);
        last_test_name = Some(test_name);
    }

    if let Some(test_name) = &last_test_name {
        io::write_results(Path::new(DATA_DIR), test_name, &collected)?;
    }

    Ok(collected)
}

fn ensure_aligned(
    first: (&str, usize),
    second: (&str, usize),
    ground_truth: (&str, usize),
) -> GuardBenchResult<()> {
    if first.1 != second.1 || first.1 != ground_truth.1 {
        return Err(GuardBenchError::LengthMismatch(format!(
            "'{}' has {} rows, '{}' has {} rows, ground truth '{}' has {} rows",
            first.0, first.1, second.0, second.1, ground_truth.0, ground_truth.1
        )));
    }
    Ok(())
}

/// Load an experiment description from YAML and run it: read the benchmark
/// (parquet by extension, CSV otherwise), build the configured guardrail,
/// and dispatch to the matching runner.
pub fn run_experiment(path: &Path) -> GuardBenchResult<ResultCollection> {
    let run_id = Uuid::new_v4();
    let _span = tracing::info_span!("experiment", run_id = %run_id).entered();

    let experiment = Experiment::from_path(path)?;
    info!("Reading benchmark: {:?}", experiment.benchmark.path);

    let lf = if experiment.benchmark.path.ends_with(".parquet") {
        io::read_parquet(&experiment.benchmark.path)?
    } else {
        io::read_csv(&experiment.benchmark.path)?
    };
    let benchmark = lf.collect()?;

    let guardrail = build_guardrail(&experiment.guardrail)?;
    match &experiment.mode {
        Mode::SingleInput { target_columns } => execute_single_input_experiment(
            guardrail.as_ref(),
            experiment.guardrail.name(),
            &benchmark,
            &experiment.benchmark.name,
            target_columns,
        ),
        Mode::DualInput {
            target_columns,
            ground_truth,
            input_key,
            output_key,
        } => execute_dual_input_experiment(
            guardrail.as_ref(),
            experiment.guardrail.name(),
            &benchmark,
            &experiment.benchmark.name,
            target_columns,
            ground_truth,
            input_key.as_deref(),
            output_key.as_deref(),
        ),
    }
}

fn build_guardrail(spec: &GuardrailSpec) -> GuardBenchResult<Box<dyn Guardrail>> {
    Ok(match spec {
        GuardrailSpec::Regex { pattern, .. } => Box::new(RegexGuardrail::new(pattern)?),
        GuardrailSpec::Keyword { banned, .. } => Box::new(KeywordGuardrail::new(banned.clone())),
        GuardrailSpec::ExactMatch { .. } => Box::new(ExactMatchGuardrail),
    })
}
