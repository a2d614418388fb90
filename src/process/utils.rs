use arrow::{
    array::{Array, StringArray},
    compute::cast,
    datatypes::DataType,
};

use crate::error::{PrepError, Result};
use crate::table::Dataset;

/// Parse a cell as a float. Surrounding whitespace is ignored; empty, malformed
/// and NaN cells give `None`.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Text view of `column`, casting non-`Utf8` columns first.
pub fn column_as_text(dataset: &Dataset, column: &str) -> Result<StringArray> {
    let arr = dataset
        .column(column)
        .ok_or_else(|| PrepError::MissingColumn {
            column: column.to_string(),
        })?;

    let text = if arr.data_type() == &DataType::Utf8 {
        arr.clone()
    } else {
        cast(arr, &DataType::Utf8).map_err(|e| PrepError::Table {
            path: "<memory>".into(),
            reason: format!("reading `{}` as text: {}", column, e),
        })?
    };
    text.as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .ok_or_else(|| PrepError::Table {
            path: "<memory>".into(),
            reason: format!("column `{}` is not text after cast", column),
        })
}
