use crate::errors::{GuardBenchError, GuardBenchResult};
use crate::runner::ResultCollection;
use polars::prelude::*;
use serde::Serialize;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub fn read_csv<P: AsRef<Path>>(path: P) -> GuardBenchResult<LazyFrame> {
    LazyCsvReader::new(path)
        .finish()
        .map_err(GuardBenchError::PolarsError)
}

pub fn read_parquet<P: AsRef<Path>>(path: P) -> GuardBenchResult<LazyFrame> {
    LazyFrame::scan_parquet(path, Default::default()).map_err(GuardBenchError::PolarsError)
}

/// Path of the results file for a test identifier within `dir`.
pub fn results_path(dir: &Path, test_name: &str) -> PathBuf {
    dir.join(format!("{test_name}_results.json"))
}

/// Write the full result collection to `<dir>/<test_name>_results.json`,
/// pretty-printed with 4-space indentation. Overwrites any existing file.
pub fn write_results(
    dir: &Path,
    test_name: &str,
    results: &ResultCollection,
) -> GuardBenchResult<()> {
    std::fs::create_dir_all(dir)?;
    let file = std::fs::File::create(results_path(dir, test_name))?;
    serialize_pretty(BufWriter::new(file), results)
}

fn serialize_pretty<W: Write>(writer: W, results: &ResultCollection) -> GuardBenchResult<()> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    results.serialize(&mut serializer)?;
    // BufWriter's drop discards flush errors; flush here so they surface.
    serializer.into_inner().flush()?;
    Ok(())
}
