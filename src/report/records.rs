//! Row types for the five output reports
//!
//! Each report is a flat table. The column count and order are fixed by
//! `TabularRecord::HEADERS` and `TabularRecord::cells`, both of which share the
//! same const width so they cannot drift apart.

/// Cell value for calculated tables, columns and measures
pub const CALCULATED_LABEL: &str = "Calculated";

/// A record that can be laid out as one spreadsheet row
pub trait TabularRecord<const N: usize> {
    /// File name of the report, without extension
    const FILE_STEM: &'static str;

    /// Header row
    const HEADERS: [&'static str; N];

    /// Cell values in header order
    fn cells(&self) -> [&str; N];
}

/// Whether a `table_data` row describes a column or a measure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Column,
    Measure,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Column => "Column",
            ObjectKind::Measure => "Measure",
        }
    }
}

/// One column or measure together with its owning table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDataRow {
    pub table_name: String,

    /// `"Calculated"` for calculated tables, otherwise empty
    pub table_type: String,
    pub table_expression: String,
    pub object_name: String,
    pub object_kind: ObjectKind,

    /// `"Calculated"` for calculated columns and all measures, otherwise empty
    pub object_type: String,
    pub object_expression: String,
}

impl TabularRecord<7> for TableDataRow {
    const FILE_STEM: &'static str = "table_data";

    const HEADERS: [&'static str; 7] = [
        "Table Name",
        "Table Type",
        "Table Expression",
        "Column/Measure Name",
        "Column/Measure",
        "Column/Measure Type",
        "Column/Measure Expression",
    ];

    fn cells(&self) -> [&str; 7] {
        [
            &self.table_name,
            &self.table_type,
            &self.table_expression,
            &self.object_name,
            self.object_kind.as_str(),
            &self.object_type,
            &self.object_expression,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipRow {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
}

impl TabularRecord<4> for RelationshipRow {
    const FILE_STEM: &'static str = "relationships";

    const HEADERS: [&'static str; 4] = ["From Table", "From Column", "To Table", "To Column"];

    fn cells(&self) -> [&str; 4] {
        [
            &self.from_table,
            &self.from_column,
            &self.to_table,
            &self.to_column,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTranslationRow {
    pub table_name: String,
    pub translation: String,
}

impl TabularRecord<2> for TableTranslationRow {
    const FILE_STEM: &'static str = "table_translations";

    const HEADERS: [&'static str; 2] = ["Table Name", "Translation"];

    fn cells(&self) -> [&str; 2] {
        [&self.table_name, &self.translation]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTranslationRow {
    pub column_name: String,
    pub translation: String,
}

impl TabularRecord<2> for ColumnTranslationRow {
    const FILE_STEM: &'static str = "column_translations";

    const HEADERS: [&'static str; 2] = ["Column Name", "Translation"];

    fn cells(&self) -> [&str; 2] {
        [&self.column_name, &self.translation]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureTranslationRow {
    pub measure_name: String,
    pub translation: String,
}

impl TabularRecord<2> for MeasureTranslationRow {
    const FILE_STEM: &'static str = "measure_translations";

    const HEADERS: [&'static str; 2] = ["Measure Name", "Translation"];

    fn cells(&self) -> [&str; 2] {
        [&self.measure_name, &self.translation]
    }
}

/// All rows extracted from one model, ready to be written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelReport {
    pub table_data: Vec<TableDataRow>,
    pub relationships: Vec<RelationshipRow>,
    pub table_translations: Vec<TableTranslationRow>,
    pub column_translations: Vec<ColumnTranslationRow>,
    pub measure_translations: Vec<MeasureTranslationRow>,
}
