use std::collections::{BTreeSet, HashSet};
use tracing::debug;

use crate::config::Config;
use crate::error::{PrepError, Result};
use crate::table::Dataset;

/// Names in `expected` that `actual` lacks.
pub fn missing_columns<'a, I>(expected: I, actual: &[&str]) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: HashSet<&str> = actual.iter().copied().collect();
    expected
        .into_iter()
        .filter(|name| !present.contains(name))
        .map(str::to_string)
        .collect()
}

/// Gate: every configured numerical, categorical and target column must be present.
/// Extra columns are fine. Nothing is modified.
pub fn validate_columns(dataset: &Dataset, config: &Config) -> Result<()> {
    let missing = missing_columns(config.expected_columns(), &dataset.column_names());
    if !missing.is_empty() {
        return Err(PrepError::MissingColumns { missing });
    }
    debug!(
        expected = config.expected_columns().len(),
        present = dataset.num_columns(),
        "column check passed"
    );
    Ok(())
}
