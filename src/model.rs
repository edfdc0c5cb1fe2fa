//! Typed view of a tabular model definition (`.bim` / TMSL JSON)
//!
//! Only the parts of the document the reports consume are modelled here.
//! Anything else in the file is ignored by serde.

use serde::{Deserialize, Deserializer};

/// Partition source type that marks a table as calculated
pub const CALCULATED: &str = "calculated";

/// Root of a model definition file
#[derive(Debug, Clone, Deserialize)]
pub struct ModelDocument {
    pub model: Model,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Model {
    pub tables: Vec<Table>,
    pub relationships: Vec<Relationship>,

    /// Only the first culture is read when building translation reports
    #[serde(default)]
    pub cultures: Vec<Culture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Table {
    pub name: String,

    /// `null` reads the same as an absent list
    #[serde(default, deserialize_with = "null_as_empty")]
    pub partitions: Vec<Partition>,

    #[serde(default)]
    pub columns: Vec<Column>,

    #[serde(default)]
    pub measures: Vec<Measure>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A table's data-source definition
#[derive(Debug, Clone, Deserialize)]
pub struct Partition {
    pub source: Option<PartitionSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartitionSource {
    #[serde(rename = "type")]
    pub source_type: Option<String>,
    pub expression: Option<Expression>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Column {
    pub name: String,

    #[serde(rename = "type")]
    pub column_type: Option<String>,
    pub expression: Option<Expression>,
}

impl Column {
    pub fn is_calculated(&self) -> bool {
        self.column_type.as_deref() == Some(CALCULATED)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Measure {
    pub name: String,
    pub expression: Option<Expression>,
}

/// A directed edge between two table/column pairs
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Culture {
    pub name: Option<String>,
    pub translations: CultureTranslations,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CultureTranslations {
    pub model: TranslatedModel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslatedModel {
    pub tables: Vec<TranslatedTable>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedTable {
    pub name: String,
    pub translated_caption: Option<String>,

    #[serde(default)]
    pub columns: Vec<TranslatedObject>,

    #[serde(default)]
    pub measures: Vec<TranslatedObject>,
}

/// A translated column or measure
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedObject {
    pub name: String,
    pub translated_caption: Option<String>,
}

/// A DAX/M expression as stored in the model file.
///
/// Modeling tools write multi-line expressions as an array of lines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Expression {
    Text(String),
    Lines(Vec<String>),
}

impl Expression {
    /// The expression as a single string, lines joined with `\n`
    pub fn to_text(&self) -> String {
        match self {
            Expression::Text(text) => text.clone(),
            Expression::Lines(lines) => lines.join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expression_forms() {
        let single: Expression = serde_json::from_value(json!("SUM(Sales[Amount])")).unwrap();
        assert_eq!(single.to_text(), "SUM(Sales[Amount])");

        let lines: Expression =
            serde_json::from_value(json!(["VAR x = 1", "RETURN", "    x"])).unwrap();
        assert_eq!(lines.to_text(), "VAR x = 1\nRETURN\n    x");
    }

    #[test]
    fn test_optional_collections_default_empty() {
        let table: Table = serde_json::from_value(json!({"name": "Empty"})).unwrap();
        assert!(table.partitions.is_empty());
        assert!(table.columns.is_empty());
        assert!(table.measures.is_empty());
    }

    #[test]
    fn test_null_partitions() {
        let table: Table =
            serde_json::from_value(json!({"name": "Sales", "partitions": null})).unwrap();
        assert!(table.partitions.is_empty());

        let result: Result<Table, _> =
            serde_json::from_value(json!({"name": "Sales", "columns": null}));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let column: Column = serde_json::from_value(json!({
            "name": "Amount",
            "dataType": "decimal",
            "sourceColumn": "Amount",
            "formatString": "0.00"
        }))
        .unwrap();
        assert_eq!(column.name, "Amount");
        assert!(!column.is_calculated());
    }

    #[test]
    fn test_calculated_column() {
        let column: Column = serde_json::from_value(json!({
            "type": "calculated",
            "name": "Margin",
            "expression": "[Sales]-[Cost]"
        }))
        .unwrap();
        assert!(column.is_calculated());
        assert_eq!(column.expression, Some(Expression::Text("[Sales]-[Cost]".into())));
    }

    #[test]
    fn test_relationship_camel_case() {
        let rel: Relationship = serde_json::from_value(json!({
            "name": "a1b2",
            "fromTable": "Sales",
            "fromColumn": "ProductKey",
            "toTable": "Product",
            "toColumn": "ProductKey",
            "crossFilteringBehavior": "bothDirections"
        }))
        .unwrap();
        assert_eq!(rel.from_table, "Sales");
        assert_eq!(rel.to_column, "ProductKey");
    }

    #[test]
    fn test_missing_relationships_is_error() {
        let result: Result<ModelDocument, _> =
            serde_json::from_value(json!({"model": {"tables": []}}));
        assert!(result.is_err());
    }
}
