// src/config.rs

use serde::Deserialize;
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::error::{PrepError, Result};

/// Where the binary looks for its settings, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "configs/config.yaml";

/// Root settings document. Read once at startup, then only borrowed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub features: FeatureConfig,
    #[serde(default)]
    pub cleaning: CleaningConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataConfig {
    /// Delimited text table to read.
    pub raw_path: PathBuf,
    /// Destination of the cleaned table. A `.parquet` extension switches the output format.
    pub processed_path: PathBuf,
    /// Label column, binary-encoded by the pipeline.
    pub target: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub labels: TargetLabels,
}

/// The two string values the target column is expected to hold.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetLabels {
    /// Encoded as 1.
    pub positive: String,
    /// Encoded as 0.
    pub negative: String,
}

impl Default for TargetLabels {
    fn default() -> Self {
        Self {
            positive: "Yes".into(),
            negative: "No".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeatureConfig {
    pub numerical: Vec<String>,
    pub categorical: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CleaningConfig {
    /// Columns holding numbers stored as text; unparseable cells become 0.
    #[serde(default = "default_numeric_columns")]
    pub numeric_columns: Vec<String>,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            numeric_columns: default_numeric_columns(),
        }
    }
}

fn default_delimiter() -> char {
    ','
}

fn default_numeric_columns() -> Vec<String> {
    vec!["TotalCharges".into()]
}

impl Config {
    /// Read and check the YAML document at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| PrepError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text, path)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse a YAML document; `origin` only labels errors.
    pub fn from_yaml(text: &str, origin: &Path) -> Result<Self> {
        let config: Config = serde_yaml::from_str(text).map_err(|e| PrepError::ConfigParse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.check().map_err(|reason| PrepError::ConfigInvalid {
            path: origin.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    /// numerical ∪ categorical ∪ {target}
    pub fn expected_columns(&self) -> BTreeSet<&str> {
        self.features
            .numerical
            .iter()
            .chain(&self.features.categorical)
            .chain(std::iter::once(&self.data.target))
            .map(String::as_str)
            .collect()
    }

    /// Delimiter as the byte the CSV reader and writer expect. Checked ASCII at load time.
    pub fn delimiter_byte(&self) -> u8 {
        self.data.delimiter as u8
    }

    fn check(&self) -> std::result::Result<(), String> {
        let named = [
            ("features.numerical", &self.features.numerical),
            ("features.categorical", &self.features.categorical),
            ("cleaning.numeric_columns", &self.cleaning.numeric_columns),
        ];
        for (key, names) in named {
            if let Some(idx) = names.iter().position(|n| n.trim().is_empty()) {
                return Err(format!("{}[{}] is an empty column name", key, idx));
            }
        }
        if self.data.target.trim().is_empty() {
            return Err("data.target is an empty column name".into());
        }

        let labels = &self.data.labels;
        if labels.positive.is_empty() || labels.negative.is_empty() {
            return Err("data.labels must both be non-empty".into());
        }
        if labels.positive == labels.negative {
            return Err(format!(
                "data.labels.positive and data.labels.negative are both `{}`",
                labels.positive
            ));
        }

        let d = self.data.delimiter;
        if !d.is_ascii() || matches!(d, '"' | '\n' | '\r') {
            return Err(format!("data.delimiter `{}` is not usable", d.escape_default()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
data:
  raw_path: data/raw/telco.csv
  processed_path: data/processed/telco.csv
  target: Churn
features:
  numerical: [tenure, MonthlyCharges, TotalCharges]
  categorical: [gender, Contract]
"#;

    fn origin() -> PathBuf {
        PathBuf::from("configs/config.yaml")
    }

    #[test]
    fn applies_defaults_for_optional_keys() {
        let cfg = Config::from_yaml(MINIMAL, &origin()).unwrap();
        assert_eq!(cfg.data.delimiter, ',');
        assert_eq!(cfg.data.labels, TargetLabels::default());
        assert_eq!(cfg.cleaning.numeric_columns, vec!["TotalCharges".to_string()]);
        assert_eq!(cfg.data.raw_path, PathBuf::from("data/raw/telco.csv"));
    }

    #[test]
    fn expected_columns_is_union_of_groups_and_target() {
        let cfg = Config::from_yaml(MINIMAL, &origin()).unwrap();
        let expected: Vec<&str> = cfg.expected_columns().into_iter().collect();
        assert_eq!(
            expected,
            vec!["Churn", "Contract", "MonthlyCharges", "TotalCharges", "gender", "tenure"]
        );
    }

    #[test]
    fn reads_optional_sections() {
        let text = r#"
data:
  raw_path: in.tsv
  processed_path: out.parquet
  target: label
  delimiter: "\t"
  labels:
    positive: churned
    negative: stayed
features:
  numerical: [amount]
  categorical: []
cleaning:
  numeric_columns: [amount]
"#;
        let cfg = Config::from_yaml(text, &origin()).unwrap();
        assert_eq!(cfg.delimiter_byte(), b'\t');
        assert_eq!(cfg.data.labels.positive, "churned");
        assert_eq!(cfg.cleaning.numeric_columns, vec!["amount".to_string()]);
    }

    #[test]
    fn missing_required_key_is_config_error() {
        let text = r#"
data:
  raw_path: in.csv
  processed_path: out.csv
features:
  numerical: []
  categorical: []
"#;
        let err = Config::from_yaml(text, &origin()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("target"), "{}", err);
    }

    #[test]
    fn rejects_empty_column_names() {
        let text = MINIMAL.replace("[gender, Contract]", "[gender, \"  \"]");
        let err = Config::from_yaml(&text, &origin()).unwrap_err();
        assert!(matches!(err, PrepError::ConfigInvalid { .. }));
        assert!(err.to_string().contains("features.categorical[1]"));
    }

    #[test]
    fn rejects_identical_labels() {
        let text = MINIMAL.replace(
            "  target: Churn\n",
            "  target: Churn\n  labels:\n    positive: \"Yes\"\n    negative: \"Yes\"\n",
        );
        let err = Config::from_yaml(&text, &origin()).unwrap_err();
        assert!(matches!(err, PrepError::ConfigInvalid { .. }));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, PrepError::ConfigRead { .. }));
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn load_reads_file_from_disk() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(MINIMAL.as_bytes())?;
        let cfg = Config::load(file.path())?;
        assert_eq!(cfg.data.target, "Churn");
        Ok(())
    }

    #[test]
    fn shipped_config_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH);
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.data.target, "Churn");
        assert!(cfg.features.numerical.contains(&"TotalCharges".to_string()));
    }

    #[test]
    fn malformed_yaml_is_config_error() {
        let err = Config::from_yaml("data: [unterminated", &origin()).unwrap_err();
        assert!(matches!(err, PrepError::ConfigParse { .. }));
    }
}
