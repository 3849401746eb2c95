use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single spreadsheet cell as exported from the workbook
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl Cell {
    /// Numeric reading of the cell; text is trimmed and parsed as a decimal
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
            Cell::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{:.0}", n),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Cell::Empty,
            Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
            Value::String(s) => Cell::Text(s),
            Value::Bool(b) => Cell::Text(if b { "True" } else { "False" }.to_string()),
            other => Cell::Text(other.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

/// One recipe row: column identifier to cell, in authored column order
pub type Row = IndexMap<String, Cell>;

static EMPTY_CELL: Cell = Cell::Empty;

/// A named table of recipe rows (one workbook sheet)
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    /// Union of the rows' column identifiers in first-seen order
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        Sheet {
            name: name.into(),
            columns,
            rows,
        }
    }

    /// Cell at `column` in `row`; a column the row lacks reads as empty
    pub fn cell<'a>(&self, row: &'a Row, column: &str) -> &'a Cell {
        row.get(column).unwrap_or(&EMPTY_CELL)
    }
}

/// Every sheet of the dataset, in workbook order. Read-only once loaded.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Workbook { sheets }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// A parsed ingredient with its amount, unit and display amount
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientEntry {
    pub amount: f64,
    pub unit: String,
    pub name: String,
    #[serde(rename = "formattedAmount")]
    pub formatted_amount: String,
}

/// Outcome of one adjustment request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentResult {
    pub recipe: String,
    pub base_servings: u32,
    pub new_servings: u32,
    pub original_time: String,
    pub adjusted_time: String,
    pub ingredients: Vec<IngredientEntry>,
}

/// Request payload as received from the transport layer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdjustRequest {
    #[serde(default)]
    pub recipe_name: String,
    /// Raw servings value; coerced to a positive integer by the scaler
    #[serde(default)]
    pub servings: Option<Value>,
}
