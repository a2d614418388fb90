use arrow::array::{Array, ArrayRef, Int64Array, Int64Builder, StringArray};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::TargetLabels;
use crate::error::Result;
use crate::process::utils::column_as_text;
use crate::table::Dataset;

/// Map one label to its binary code. Anything but an exact match is `None`.
pub fn encode_label(value: &str, labels: &TargetLabels) -> Option<i64> {
    if value == labels.positive {
        Some(1)
    } else if value == labels.negative {
        Some(0)
    } else {
        None
    }
}

/// Rewrite the target column as nullable `Int64`: positive → 1, negative → 0.
///
/// Cells holding any other value (null included) become null. They are counted and
/// logged, never rejected.
pub fn encode_target(dataset: &mut Dataset, column: &str, labels: &TargetLabels) -> Result<()> {
    let sarr = column_as_text(dataset, column)?;

    let (codes, unknown) = encode_strings(&sarr, labels);
    dataset.replace_column(column, Arc::new(codes) as ArrayRef)?;

    if unknown > 0 {
        warn!(
            column,
            unknown,
            positive = %labels.positive,
            negative = %labels.negative,
            "values matched neither label; left empty"
        );
    } else {
        debug!(column, "target encoded");
    }
    Ok(())
}

fn encode_strings(sarr: &StringArray, labels: &TargetLabels) -> (Int64Array, usize) {
    let mut b = Int64Builder::with_capacity(sarr.len());
    let mut unknown = 0;
    for opt in sarr.iter() {
        let code = opt.and_then(|s| encode_label(s, labels));
        if code.is_none() {
            unknown += 1;
        }
        b.append_option(code);
    }
    (b.finish(), unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrepError;
    use arrow::{
        datatypes::{DataType, Field, Schema},
        record_batch::RecordBatch,
    };

    fn dataset(values: Vec<Option<&str>>) -> Dataset {
        let schema = Arc::new(Schema::new(vec![Field::new("Churn", DataType::Utf8, true)]));
        let batch = RecordBatch::try_new(
            schema,
            vec![Arc::new(StringArray::from(values)) as ArrayRef],
        )
        .unwrap();
        Dataset::new(batch)
    }

    fn codes(ds: &Dataset) -> Vec<Option<i64>> {
        ds.column("Churn")
            .unwrap()
            .as_any()
            .downcast_ref::<Int64Array>()
            .unwrap()
            .iter()
            .collect()
    }

    #[test]
    fn maps_yes_and_no() {
        let mut ds = dataset(vec![Some("Yes"), Some("No"), Some("No")]);
        encode_target(&mut ds, "Churn", &TargetLabels::default()).unwrap();
        assert_eq!(codes(&ds), vec![Some(1), Some(0), Some(0)]);
    }

    #[test]
    fn unknown_values_become_null() {
        let mut ds = dataset(vec![Some("Yes"), Some("yes"), Some(" No"), Some("Maybe"), None]);
        encode_target(&mut ds, "Churn", &TargetLabels::default()).unwrap();
        assert_eq!(codes(&ds), vec![Some(1), None, None, None, None]);
    }

    #[test]
    fn custom_labels() {
        let labels = TargetLabels {
            positive: "churned".into(),
            negative: "stayed".into(),
        };
        let mut ds = dataset(vec![Some("stayed"), Some("churned"), Some("Yes")]);
        encode_target(&mut ds, "Churn", &labels).unwrap();
        assert_eq!(codes(&ds), vec![Some(0), Some(1), None]);
    }

    #[test]
    fn encode_label_is_exact() {
        let labels = TargetLabels::default();
        assert_eq!(encode_label("Yes", &labels), Some(1));
        assert_eq!(encode_label("No", &labels), Some(0));
        assert_eq!(encode_label("YES", &labels), None);
        assert_eq!(encode_label("", &labels), None);
    }

    #[test]
    fn missing_target_is_an_error() {
        let mut ds = dataset(vec![Some("Yes")]);
        let err = encode_target(&mut ds, "Exited", &TargetLabels::default()).unwrap_err();
        assert!(matches!(err, PrepError::MissingColumn { .. }));
    }
}
