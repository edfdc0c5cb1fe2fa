//! # ssas-doc - Tabular Model Documentation
//!
//! Reads a tabular semantic-model definition (`.bim` / TMSL JSON) and exports
//! its tables, columns, measures, relationships and translations as five flat
//! Excel reports.
//!
//! ## Modules
//!
//! - **model**: typed view of the model definition file
//! - **report**: row extraction and workbook export
//! - **config**: run configuration and pre-flight checks
//! - **error**: failure kinds and their exit codes
//!
//! ## Quick Start
//!
//! ```rust
//! use ssas_doc::model::ModelDocument;
//! use ssas_doc::report::ModelExtractor;
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let document: ModelDocument = serde_json::from_value(json!({
//!     "model": {
//!         "tables": [{
//!             "name": "Sales",
//!             "columns": [{"name": "Amount"}],
//!             "measures": [{"name": "Total", "expression": "SUM(Sales[Amount])"}]
//!         }],
//!         "relationships": [],
//!         "cultures": [{"translations": {"model": {"tables": []}}}]
//!     }
//! }))?;
//!
//! let report = ModelExtractor::new(&document).extract()?;
//! assert_eq!(report.table_data.len(), 2);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

pub mod config;
pub mod error;
pub mod model;
pub mod report;

pub use config::ReportConfig;
pub use error::ReportError;
pub use model::ModelDocument;
pub use report::{ModelExtractor, ModelReport, ReportWriter, WrittenReport};

const UTF8_BOM: &str = "\u{feff}";

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub output_dir: PathBuf,

    /// Written workbooks, in write order
    pub files: Vec<WrittenReport>,
}

/// Main entry point: validate paths, read the model and write all reports
pub fn generate_report(config: &ReportConfig) -> Result<ReportSummary, ReportError> {
    config.prepare()?;

    let document = load_model(&config.input)?;
    let report = ModelExtractor::new(&document).extract()?;

    log::debug!(
        "extracted {} table rows, {} relationships, {} table translations",
        report.table_data.len(),
        report.relationships.len(),
        report.table_translations.len()
    );

    let files = ReportWriter::new(&config.output_dir).write_report(&report)?;

    Ok(ReportSummary {
        output_dir: config.output_dir.clone(),
        files,
    })
}

/// Read and parse a model definition file
pub fn load_model(path: &Path) -> Result<ModelDocument, ReportError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReportError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    parse_model(&text).map_err(|source| ReportError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse model definition text, ignoring a leading byte-order mark
pub fn parse_model(text: &str) -> Result<ModelDocument, serde_json::Error> {
    serde_json::from_str(text.strip_prefix(UTF8_BOM).unwrap_or(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "model": {
            "tables": [{"name": "Sales", "columns": [{"name": "Amount"}]}],
            "relationships": [],
            "cultures": [{"translations": {"model": {"tables": []}}}]
        }
    }"#;

    #[test]
    fn test_parse_with_bom() {
        let text = format!("{}{}", UTF8_BOM, MINIMAL);
        let document = parse_model(&text).unwrap();
        assert_eq!(document.model.tables[0].name, "Sales");
    }

    #[test]
    fn test_parse_malformed() {
        assert!(parse_model("{\"model\": ").is_err());
        assert!(parse_model("{\"model\": {\"relationships\": []}}").is_err());
    }

    #[test]
    fn test_generate_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model.bim");
        std::fs::write(&input, MINIMAL).unwrap();
        let out = dir.path().join("out");

        let summary = generate_report(&ReportConfig::new(&input, &out)).unwrap();

        assert_eq!(summary.files.len(), 5);
        assert_eq!(summary.files[4].path, out.join("table_data.xlsx"));
        assert_eq!(summary.files[4].rows, 1);
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model.bim");
        std::fs::write(&input, [0xff, 0xfe, 0x00]).unwrap();

        let err = generate_report(&ReportConfig::new(&input, dir.path().join("out"))).unwrap_err();
        assert!(matches!(err, ReportError::ReadInput { .. }));
    }

    #[test]
    fn test_parse_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("model.bim");
        std::fs::write(&input, "not json").unwrap();
        let out = dir.path().join("out");

        let err = generate_report(&ReportConfig::new(&input, &out)).unwrap_err();
        assert!(matches!(err, ReportError::Parse { .. }));
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
    }
}
