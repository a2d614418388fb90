// src/table/mod.rs

use arrow::{
    array::{Array, ArrayRef},
    datatypes::{Field, Schema},
    record_batch::RecordBatch,
};
use std::sync::Arc;

use crate::error::{PrepError, Result};

pub mod read;
pub mod write;

pub use read::read_csv;
pub use write::{write_table, OutputFormat};

/// One in-memory table: named columns, ordered rows.
///
/// Raw columns arrive as nullable `Utf8`; cleaning steps swap individual columns
/// for typed arrays in place via [`Dataset::replace_column`].
#[derive(Debug, Clone)]
pub struct Dataset {
    batch: RecordBatch,
}

impl Dataset {
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// Column names in file order.
    pub fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    /// Swap the column called `name` for `values`, keeping its position.
    /// The field type follows the new array.
    pub fn replace_column(&mut self, name: &str, values: ArrayRef) -> Result<()> {
        let schema = self.batch.schema();
        let idx = schema
            .index_of(name)
            .map_err(|_| PrepError::MissingColumn {
                column: name.to_string(),
            })?;

        let mut fields: Vec<Field> = schema.fields().iter().map(|f| (**f).clone()).collect();
        fields[idx] = Field::new(name, values.data_type().clone(), values.null_count() > 0);

        let mut columns: Vec<ArrayRef> = self.batch.columns().to_vec();
        columns[idx] = values;

        let schema = Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone()));
        self.batch = RecordBatch::try_new(schema, columns).map_err(|e| PrepError::Table {
            path: "<memory>".into(),
            reason: format!("replacing column `{}`: {}", name, e),
        })?;
        Ok(())
    }
}
