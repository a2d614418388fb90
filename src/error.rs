use std::{collections::BTreeSet, io, path::PathBuf};
use thiserror::Error;

/// Coarse classification of every failure the pipeline can hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Validation,
    Io,
}

#[derive(Debug, Error)]
pub enum PrepError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {path}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    #[error("invalid config {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    /// Expected columns absent from the raw table. `missing` is the exact set difference.
    #[error("Missing columns in raw data: {}", join_names(.missing))]
    MissingColumns { missing: BTreeSet<String> },

    #[error("column `{column}` not found in table")]
    MissingColumn { column: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was readable but its contents are not a well-formed table.
    #[error("malformed table {path}: {reason}")]
    Table { path: PathBuf, reason: String },
}

impl PrepError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigRead { .. } | Self::ConfigParse { .. } | Self::ConfigInvalid { .. } => {
                ErrorKind::Config
            }
            Self::MissingColumns { .. } | Self::MissingColumn { .. } => ErrorKind::Validation,
            Self::Io { .. } | Self::Table { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn table(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Table {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

fn join_names(names: &BTreeSet<String>) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n)).collect();
    format!("{{{}}}", quoted.join(", "))
}

pub type Result<T> = std::result::Result<T, PrepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_every_name() {
        let err = PrepError::MissingColumns {
            missing: ["tenure", "Churn"].iter().map(|s| s.to_string()).collect(),
        };
        assert_eq!(
            err.to_string(),
            "Missing columns in raw data: {'Churn', 'tenure'}"
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn table_errors_count_as_io() {
        let err = PrepError::table("raw.csv", "no header row");
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("raw.csv"));
    }
}
