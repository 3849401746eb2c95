use log::{debug, info};
use serde_json::Value;
use std::path::Path;

use crate::error::AdjustError;
use crate::model::{Cell, Row, Sheet, Workbook};

/// Load a workbook exported as JSON: `{ "<sheet>": [ { "<column>": value } ] }`.
///
/// Sheet, row and column order are kept as written in the file.
pub async fn load_workbook(path: impl AsRef<Path>) -> Result<Workbook, AdjustError> {
    let path = path.as_ref();
    debug!("Reading workbook from {}", path.display());
    let content = tokio::fs::read_to_string(path).await?;
    let workbook = parse_workbook(&content)?;
    info!(
        "Loaded {} sheet(s) from {}",
        workbook.sheets.len(),
        path.display()
    );
    Ok(workbook)
}

/// Parse a JSON workbook export held in memory
pub fn parse_workbook(content: &str) -> Result<Workbook, AdjustError> {
    let Value::Object(sheets) = serde_json::from_str::<Value>(content)? else {
        return Err(AdjustError::DatasetError(
            "top level must be an object of sheets".to_string(),
        ));
    };

    let sheets = sheets
        .into_iter()
        .map(|(name, rows)| parse_sheet(name, rows))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Workbook::new(sheets))
}

fn parse_sheet(name: String, rows: Value) -> Result<Sheet, AdjustError> {
    let Value::Array(rows) = rows else {
        return Err(AdjustError::DatasetError(format!(
            "sheet '{}' must be an array of rows",
            name
        )));
    };

    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Object(cells) => Ok(cells
                .into_iter()
                .map(|(column, value)| (column, Cell::from(value)))
                .collect::<Row>()),
            _ => Err(AdjustError::DatasetError(format!(
                "row {} of sheet '{}' is not an object",
                index, name
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Sheet {:?}: {} row(s)", name, rows.len());
    Ok(Sheet::new(name, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workbook_keeps_sheet_and_column_order() {
        let workbook = parse_workbook(
            r#"{
                "Sweets": [{"name": "Kesari", "ingredients_en": "1 cup rava", "cooking": 20}],
                "Breakfast": [{"TamilName": "pongal", "name": "Pongal"}, {"cooking": null}]
            }"#,
        )
        .unwrap();

        let names: Vec<&str> = workbook.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Sweets", "Breakfast"]);

        let sweets = workbook.sheet("Sweets").unwrap();
        assert_eq!(sweets.columns, vec!["name", "ingredients_en", "cooking"]);
        assert_eq!(sweets.rows[0]["cooking"], Cell::Number(20.0));

        let breakfast = workbook.sheet("Breakfast").unwrap();
        assert_eq!(breakfast.columns, vec!["TamilName", "name", "cooking"]);
        assert_eq!(breakfast.rows[1]["cooking"], Cell::Empty);
    }

    #[test]
    fn test_parse_workbook_rejects_bad_shapes() {
        assert!(matches!(
            parse_workbook("[]"),
            Err(AdjustError::DatasetError(_))
        ));
        assert!(matches!(
            parse_workbook(r#"{"Sheet1": {"name": "x"}}"#),
            Err(AdjustError::DatasetError(_))
        ));
        assert!(matches!(
            parse_workbook(r#"{"Sheet1": ["x"]}"#),
            Err(AdjustError::DatasetError(_))
        ));
        assert!(matches!(parse_workbook("{"), Err(AdjustError::Json(_))));
    }

    #[tokio::test]
    async fn test_load_workbook_missing_file() {
        let result = load_workbook("does/not/exist.json").await;
        assert!(matches!(result, Err(AdjustError::Io(_))));
    }
}
