// src/table/write.rs

use arrow::csv::WriterBuilder;
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument};

use super::Dataset;
use crate::error::{PrepError, Result};

/// On-disk layout of the processed table, picked from the output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Delimited,
    Parquet,
}

impl OutputFormat {
    /// `.parquet` (any case) selects Parquet; everything else is delimited text.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => Self::Parquet,
            _ => Self::Delimited,
        }
    }
}

/// Write `dataset` to `path`, creating missing parent directories.
///
/// - header row, no index column
/// - nulls written as empty cells
/// - data goes to a hidden sibling `.tmp` file first, then is renamed over `path`
#[instrument(level = "info", skip(dataset, path), fields(path = %path.as_ref().display()))]
pub fn write_table<P: AsRef<Path>>(dataset: &Dataset, path: P, delimiter: u8) -> Result<()> {
    let path = path.as_ref();

    // 1) Make sure the destination directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PrepError::io(parent, e))?;
    }

    // 2) Write everything to the temp file
    let tmp_path = tmp_path_for(path)?;
    let format = OutputFormat::from_path(path);
    let written = match format {
        OutputFormat::Delimited => write_delimited(dataset, &tmp_path, delimiter),
        OutputFormat::Parquet => write_parquet(dataset, &tmp_path),
    };
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    // 3) Swap it into place
    fs::rename(&tmp_path, path).map_err(|e| PrepError::io(path, e))?;
    info!(
        ?format,
        rows = dataset.num_rows(),
        columns = dataset.num_columns(),
        "wrote processed table"
    );
    Ok(())
}

fn tmp_path_for(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PrepError::table(path, "output path has no file name"))?;
    Ok(path.with_file_name(format!(".{}.tmp", file_name)))
}

fn write_delimited(dataset: &Dataset, tmp_path: &Path, delimiter: u8) -> Result<()> {
    let file = File::create(tmp_path).map_err(|e| PrepError::io(tmp_path, e))?;
    let mut writer = WriterBuilder::new()
        .with_header(true)
        .with_delimiter(delimiter)
        .build(BufWriter::new(file));
    writer
        .write(dataset.batch())
        .map_err(|e| PrepError::table(tmp_path, e))?;

    let mut buf = writer.into_inner();
    buf.flush().map_err(|e| PrepError::io(tmp_path, e))?;
    debug!(tmp = %tmp_path.display(), "flushed delimited output");
    Ok(())
}

fn write_parquet(dataset: &Dataset, tmp_path: &Path) -> Result<()> {
    let file = File::create(tmp_path).map_err(|e| PrepError::io(tmp_path, e))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, dataset.batch().schema(), Some(props))
        .map_err(|e| PrepError::table(tmp_path, e))?;
    writer
        .write(dataset.batch())
        .map_err(|e| PrepError::table(tmp_path, e))?;
    writer
        .close()
        .map_err(|e| PrepError::table(tmp_path, e))?;
    debug!(tmp = %tmp_path.display(), "closed parquet output");
    Ok(())
}
