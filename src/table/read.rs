// src/table/read.rs

use arrow::{
    compute::concat_batches,
    csv::ReaderBuilder,
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::{collections::HashSet, fs, io::Cursor, path::Path, sync::Arc};
use tracing::{debug, info, instrument};

use super::Dataset;
use crate::error::{PrepError, Result};

/// Rows per Arrow batch while parsing; batches are concatenated afterwards.
const BATCH_SIZE: usize = 8_192;

/// Load a delimited text table with a header row.
///
/// Every column is kept as nullable `Utf8` so columns the pipeline never touches are
/// written back exactly as they were read. Empty cells, and cells missing from the
/// end of a short row, load as null. Duplicate header names are rejected.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_csv<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Dataset> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| PrepError::io(path, e))?;

    // 1) Header row decides the column set
    let headers: Vec<String> = {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(bytes.as_slice());
        let record = rdr
            .headers()
            .map_err(|e| PrepError::table(path, format!("reading header row: {}", e)))?;
        record.iter().map(|h| h.to_string()).collect()
    };
    if headers.is_empty() {
        return Err(PrepError::table(path, "no header row"));
    }
    let mut seen = HashSet::with_capacity(headers.len());
    if let Some(dup) = headers.iter().find(|h| !seen.insert(h.as_str())) {
        return Err(PrepError::table(path, format!("duplicate column `{}` in header", dup)));
    }
    debug!(columns = headers.len(), "parsed header row");

    // 2) All-text schema, then let Arrow parse the records.
    //    Short rows are padded with nulls; long rows are still rejected.
    let fields: Vec<Field> = headers
        .iter()
        .map(|h| Field::new(h, DataType::Utf8, true))
        .collect();
    let schema = Arc::new(Schema::new(fields));

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .with_delimiter(delimiter)
        .with_truncated_rows(true)
        .with_batch_size(BATCH_SIZE)
        .build(Cursor::new(bytes))
        .map_err(|e| PrepError::table(path, e))?;

    let batches: Vec<RecordBatch> = reader
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| PrepError::table(path, e))?;

    // 3) One table, one batch
    let batch = concat_batches(&schema, &batches).map_err(|e| PrepError::table(path, e))?;
    info!(
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        "loaded raw table"
    );
    Ok(Dataset::new(batch))
}
