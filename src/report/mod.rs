//! Report extraction and export
//!
//! A model definition is walked once by `ModelExtractor`, producing a
//! `ModelReport` of typed rows. `ReportWriter` then writes each row collection
//! to its own spreadsheet.

pub mod extractor;
pub mod records;
pub mod writer;

pub use extractor::ModelExtractor;
pub use records::{
    ColumnTranslationRow, MeasureTranslationRow, ModelReport, ObjectKind, RelationshipRow,
    TableDataRow, TableTranslationRow, TabularRecord,
};
pub use writer::{ReportWriter, WrittenReport};
