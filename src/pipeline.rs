// src/pipeline.rs

use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::process::{coerce_numeric, encode_target, validate_columns};
use crate::table::{read_csv, write_table};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

impl RunSummary {
    /// The one line printed on success.
    pub fn confirmation(&self) -> String {
        format!("Processed features saved to {}", self.output_path.display())
    }
}

/// load raw table → check columns → coerce dirty numerics → encode target → write.
///
/// Any failure aborts the whole run; nothing is retried.
#[instrument(level = "info", skip(config), fields(raw = %config.data.raw_path.display()))]
pub fn run(config: &Config) -> Result<RunSummary> {
    let start = Instant::now();
    let delimiter = config.delimiter_byte();

    // 1) raw table
    let mut dataset = read_csv(&config.data.raw_path, delimiter)?;

    // 2) gate
    validate_columns(&dataset, config)?;

    // 3) clean + encode in place
    for column in &config.cleaning.numeric_columns {
        coerce_numeric(&mut dataset, column)?;
    }
    encode_target(&mut dataset, &config.data.target, &config.data.labels)?;

    // 4) processed table
    write_table(&dataset, &config.data.processed_path, delimiter)?;

    let summary = RunSummary {
        output_path: config.data.processed_path.clone(),
        rows: dataset.num_rows(),
        columns: dataset.num_columns(),
    };
    info!(
        rows = summary.rows,
        columns = summary.columns,
        elapsed = ?start.elapsed(),
        "pipeline finished"
    );
    Ok(summary)
}
