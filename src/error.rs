use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a report run
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("could not create output directory {}: {source}", path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model definition {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing `{field}` on {object}")]
    MissingField { object: String, field: &'static str },

    #[error("failed to write workbook {}", path.display())]
    WriteWorkbook {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("failed to save workbook {}", path.display())]
    SaveWorkbook {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub fn missing(object: impl Into<String>, field: &'static str) -> Self {
        ReportError::MissingField {
            object: object.into(),
            field,
        }
    }

    /// Process exit code for this error.
    ///
    /// Pre-flight failures get their own codes; everything structural is 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            ReportError::InputNotFound { .. } => 2,
            ReportError::CreateOutputDir { .. } => 3,
            _ => 1,
        }
    }

    /// Whether the error is a pre-flight check failure reported as a single line
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            ReportError::InputNotFound { .. } | ReportError::CreateOutputDir { .. }
        )
    }
}
