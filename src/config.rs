use crate::error::ReportError;
use std::path::PathBuf;

/// Configuration for one report run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Model definition file to read
    pub input: PathBuf,

    /// Directory the workbooks are written to, created if absent
    pub output_dir: PathBuf,
}

impl ReportConfig {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        ReportConfig {
            input: input.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Pre-flight checks: the input must be a regular file, then the output
    /// directory is created with any missing parents.
    ///
    /// Nothing is created when the input check fails.
    pub fn prepare(&self) -> Result<(), ReportError> {
        if !self.input.is_file() {
            return Err(ReportError::InputNotFound {
                path: self.input.clone(),
            });
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|source| {
            ReportError::CreateOutputDir {
                path: self.output_dir.clone(),
                source,
            }
        })?;

        Ok(())
    }
}
