use crate::error::ReportError;
use crate::model::{Model, ModelDocument, Table, TranslatedTable, CALCULATED};
use crate::report::records::{
    ColumnTranslationRow, MeasureTranslationRow, ModelReport, ObjectKind, RelationshipRow,
    TableDataRow, TableTranslationRow, CALCULATED_LABEL,
};

/// Walks a model definition once and collects the rows of every report
pub struct ModelExtractor<'a> {
    model: &'a Model,
}

/// Table-level cells shared by every row of one table
struct TableFields {
    table_type: String,
    table_expression: String,
}

impl<'a> ModelExtractor<'a> {
    pub fn new(document: &'a ModelDocument) -> Self {
        ModelExtractor {
            model: &document.model,
        }
    }

    /// Build all five row collections, in source order
    pub fn extract(&self) -> Result<ModelReport, ReportError> {
        let mut report = ModelReport::default();

        for table in &self.model.tables {
            self.extract_table(table, &mut report.table_data)?;
        }

        report.relationships = self
            .model
            .relationships
            .iter()
            .map(|rel| RelationshipRow {
                from_table: rel.from_table.clone(),
                from_column: rel.from_column.clone(),
                to_table: rel.to_table.clone(),
                to_column: rel.to_column.clone(),
            })
            .collect();

        let translated_tables = self.translated_tables()?;
        for table in translated_tables {
            Self::extract_translations(table, &mut report);
        }

        Ok(report)
    }

    /// Emit one row per column, then one per measure
    fn extract_table(&self, table: &Table, rows: &mut Vec<TableDataRow>) -> Result<(), ReportError> {
        let fields = Self::table_fields(table)?;

        log::debug!(
            "table '{}': {} columns, {} measures{}",
            table.name,
            table.columns.len(),
            table.measures.len(),
            if fields.table_type.is_empty() { "" } else { " (calculated)" }
        );

        for column in &table.columns {
            let (object_type, object_expression) = if column.is_calculated() {
                let expression = column.expression.as_ref().ok_or_else(|| {
                    ReportError::missing(
                        format!("column '{}' in table '{}'", column.name, table.name),
                        "expression",
                    )
                })?;
                (CALCULATED_LABEL.to_string(), expression.to_text())
            } else {
                (String::new(), String::new())
            };

            rows.push(TableDataRow {
                table_name: table.name.clone(),
                table_type: fields.table_type.clone(),
                table_expression: fields.table_expression.clone(),
                object_name: column.name.clone(),
                object_kind: ObjectKind::Column,
                object_type,
                object_expression,
            });
        }

        for measure in &table.measures {
            let expression = measure.expression.as_ref().ok_or_else(|| {
                ReportError::missing(
                    format!("measure '{}' in table '{}'", measure.name, table.name),
                    "expression",
                )
            })?;

            rows.push(TableDataRow {
                table_name: table.name.clone(),
                table_type: fields.table_type.clone(),
                table_expression: fields.table_expression.clone(),
                object_name: measure.name.clone(),
                object_kind: ObjectKind::Measure,
                object_type: CALCULATED_LABEL.to_string(),
                object_expression: expression.to_text(),
            });
        }

        Ok(())
    }

    /// Classify a table by its first partition's source type
    fn table_fields(table: &Table) -> Result<TableFields, ReportError> {
        let Some(partition) = table.partitions.first() else {
            return Ok(TableFields {
                table_type: String::new(),
                table_expression: String::new(),
            });
        };

        let object = || format!("first partition of table '{}'", table.name);
        let source = partition
            .source
            .as_ref()
            .ok_or_else(|| ReportError::missing(object(), "source"))?;
        let source_type = source
            .source_type
            .as_deref()
            .ok_or_else(|| ReportError::missing(object(), "source.type"))?;

        // The expression is only read when the table produces rows.
        if source_type != CALCULATED || (table.columns.is_empty() && table.measures.is_empty()) {
            return Ok(TableFields {
                table_type: String::new(),
                table_expression: String::new(),
            });
        }

        let expression = source
            .expression
            .as_ref()
            .ok_or_else(|| ReportError::missing(object(), "source.expression"))?;

        Ok(TableFields {
            table_type: CALCULATED_LABEL.to_string(),
            table_expression: expression.to_text(),
        })
    }

    /// Translation tables of the first culture
    fn translated_tables(&self) -> Result<&'a [TranslatedTable], ReportError> {
        let cultures = &self.model.cultures;
        let culture = cultures
            .first()
            .ok_or_else(|| ReportError::missing("model", "cultures[0]"))?;

        if cultures.len() > 1 {
            log::warn!(
                "model defines {} cultures; only '{}' is reported",
                cultures.len(),
                culture.name.as_deref().unwrap_or("<unnamed>")
            );
        }

        Ok(&culture.translations.model.tables)
    }

    fn extract_translations(table: &TranslatedTable, report: &mut ModelReport) {
        report.table_translations.push(TableTranslationRow {
            table_name: table.name.clone(),
            translation: table.translated_caption.clone().unwrap_or_default(),
        });

        for column in &table.columns {
            report.column_translations.push(ColumnTranslationRow {
                column_name: column.name.clone(),
                translation: column.translated_caption.clone().unwrap_or_default(),
            });
        }

        for measure in &table.measures {
            report.measure_translations.push(MeasureTranslationRow {
                measure_name: measure.name.clone(),
                translation: measure.translated_caption.clone().unwrap_or_default(),
            });
        }
    }
}
