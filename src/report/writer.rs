use crate::error::ReportError;
use crate::report::records::{ModelReport, TabularRecord};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::path::{Path, PathBuf};

/// Rows written to one workbook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub path: PathBuf,
    pub rows: usize,
}

/// Writes each report as its own single-sheet `.xlsx` workbook in a directory
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    /// The directory must already exist
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        ReportWriter {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the workbook a record type is written to
    pub fn path_for<R: TabularRecord<N>, const N: usize>(&self) -> PathBuf {
        self.output_dir.join(format!("{}.xlsx", R::FILE_STEM))
    }

    /// Write all five reports, replacing existing files.
    ///
    /// Every workbook is rendered in memory before the first file is touched,
    /// so a cell Excel cannot store fails the run with nothing written.
    pub fn write_report(&self, report: &ModelReport) -> Result<Vec<WrittenReport>, ReportError> {
        let rendered = vec![
            self.render(&report.relationships)?,
            self.render(&report.table_translations)?,
            self.render(&report.column_translations)?,
            self.render(&report.measure_translations)?,
            self.render(&report.table_data)?,
        ];

        let mut written = Vec::with_capacity(rendered.len());
        for workbook in rendered {
            match Self::save(workbook) {
                Ok(report) => written.push(report),
                Err(err) => {
                    for report in &written {
                        let _ = std::fs::remove_file(&report.path);
                    }
                    return Err(err);
                }
            }
        }

        Ok(written)
    }

    /// Write one header row followed by one row per record
    pub fn write_records<R: TabularRecord<N>, const N: usize>(
        &self,
        records: &[R],
    ) -> Result<WrittenReport, ReportError> {
        Self::save(self.render(records)?)
    }

    fn render<R: TabularRecord<N>, const N: usize>(
        &self,
        records: &[R],
    ) -> Result<RenderedWorkbook, ReportError> {
        let path = self.path_for::<R, N>();

        let bytes = Self::build_workbook(records).map_err(|source| ReportError::WriteWorkbook {
            path: path.clone(),
            source,
        })?;

        log::debug!("rendered {} ({} bytes)", path.display(), bytes.len());

        Ok(RenderedWorkbook {
            path,
            rows: records.len(),
            bytes,
        })
    }

    fn save(workbook: RenderedWorkbook) -> Result<WrittenReport, ReportError> {
        std::fs::write(&workbook.path, &workbook.bytes).map_err(|source| {
            ReportError::SaveWorkbook {
                path: workbook.path.clone(),
                source,
            }
        })?;

        log::info!("wrote {} rows to {}", workbook.rows, workbook.path.display());

        Ok(WrittenReport {
            path: workbook.path,
            rows: workbook.rows,
        })
    }

    fn build_workbook<R: TabularRecord<N>, const N: usize>(
        records: &[R],
    ) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, header) in R::HEADERS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
        }

        for (idx, record) in records.iter().enumerate() {
            let row = idx as u32 + 1;
            for (col, cell) in record.cells().iter().enumerate() {
                // Empty strings stay as empty cells
                if !cell.is_empty() {
                    worksheet.write_string(row, col as u16, *cell)?;
                }
            }
        }

        workbook.save_to_buffer()
    }
}

/// A workbook built in memory, not yet on disk
struct RenderedWorkbook {
    path: PathBuf,
    rows: usize,
    bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::records::{ObjectKind, RelationshipRow, TableDataRow, TableTranslationRow};

    fn xlsx_files(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "xlsx"))
            .collect()
    }

    #[test]
    fn test_write_report_creates_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());

        let mut report = ModelReport::default();
        report.relationships.push(RelationshipRow {
            from_table: "Sales".into(),
            from_column: "ProductKey".into(),
            to_table: "Product".into(),
            to_column: "ProductKey".into(),
        });

        let written = writer.write_report(&report).unwrap();
        let names: Vec<_> = written
            .iter()
            .map(|w| w.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            names,
            vec![
                "relationships.xlsx",
                "table_translations.xlsx",
                "column_translations.xlsx",
                "measure_translations.xlsx",
                "table_data.xlsx",
            ]
        );
        assert_eq!(written[0].rows, 1);
        assert_eq!(written[4].rows, 0);
        assert!(written.iter().all(|w| w.path.is_file()));
    }

    #[test]
    fn test_existing_file_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());
        let path = writer.path_for::<TableTranslationRow, 2>();
        std::fs::write(&path, b"not a workbook").unwrap();

        writer
            .write_records(&[TableTranslationRow {
                table_name: "Sales".into(),
                translation: "Umsatz".into(),
            }])
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_missing_directory_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("does-not-exist"));

        let err = writer.write_records::<TableTranslationRow, 2>(&[]).unwrap_err();
        assert!(matches!(err, ReportError::SaveWorkbook { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_oversized_cell_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());

        let mut report = ModelReport::default();
        report.table_translations.push(TableTranslationRow {
            table_name: "Sales".into(),
            translation: "Umsatz".into(),
        });
        report.table_data.push(TableDataRow {
            table_name: "Sales".into(),
            table_type: String::new(),
            table_expression: String::new(),
            object_name: "Huge".into(),
            object_kind: ObjectKind::Measure,
            object_type: "Calculated".into(),
            object_expression: "x".repeat(40_000),
        });

        let err = writer.write_report(&report).unwrap_err();
        assert!(
            matches!(&err, ReportError::WriteWorkbook { path, .. } if path.ends_with("table_data.xlsx"))
        );
        assert!(xlsx_files(dir.path()).is_empty());
    }
}
