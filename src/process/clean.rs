use arrow::array::{Array, ArrayRef, Float64Array, Float64Builder, StringArray};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::Result;
use crate::process::utils::{column_as_text, parse_number};
use crate::table::Dataset;

/// Value written for cells that do not hold a number.
pub const DEFAULT_NUMERIC: f64 = 0.0;

/// Rewrite `column` as non-null `Float64`.
///
/// Parseable cells keep their value; empty, null and malformed cells become
/// [`DEFAULT_NUMERIC`]. Cell contents never cause an error, only a missing column does.
pub fn coerce_numeric(dataset: &mut Dataset, column: &str) -> Result<()> {
    let sarr = column_as_text(dataset, column)?;

    let (values, defaulted) = coerce_strings(&sarr);
    dataset.replace_column(column, Arc::new(values) as ArrayRef)?;

    if defaulted > 0 {
        info!(
            column,
            defaulted,
            "replaced unparseable values with {}",
            DEFAULT_NUMERIC
        );
    } else {
        debug!(column, "all values numeric");
    }
    Ok(())
}

/// Returns the numeric array and how many cells fell back to the default.
fn coerce_strings(sarr: &StringArray) -> (Float64Array, usize) {
    let mut b = Float64Builder::with_capacity(sarr.len());
    let mut defaulted = 0;
    for opt in sarr.iter() {
        let v = match opt.and_then(parse_number) {
            Some(v) => v,
            None => {
                defaulted += 1;
                DEFAULT_NUMERIC
            }
        };
        b.append_value(v);
    }
    (b.finish(), defaulted)
}
