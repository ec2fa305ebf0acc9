//! In-memory view over a columnar result set.
//!
//! The remote service returns cells as JSON scalars; INT64 columns may arrive
//! as JSON numbers or as integer-as-string, so the numeric accessors accept
//! both. Coercion failures are surfaced, never coerced to defaults.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultSchema {
    pub columns: Vec<ColumnSchema>,
}

/// A columnar result set: schema plus row-major cells.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultSet {
    pub schema: ResultSchema,
    pub rows: Vec<Vec<Value>>,
}

/// Resolved handle to a column, valid for the result set it came from.
#[derive(Debug, Clone)]
pub struct ColumnRef {
    index: usize,
    name: String,
}

#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("result set has no column named {0:?}")]
    MissingColumn(String),
    #[error("row {row} has {got} cells, schema has {expected} columns")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("column {column:?} row {row}: expected {expected}, got {value}")]
    TypeMismatch {
        column: String,
        row: usize,
        expected: &'static str,
        value: Value,
    },
}

impl ResultSet {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn column(&self, name: &str) -> Result<ColumnRef, TableError> {
        self.schema
            .columns
            .iter()
            .position(|c| c.name == name)
            .map(|index| ColumnRef {
                index,
                name: name.to_string(),
            })
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    fn cell(&self, row: usize, col: &ColumnRef) -> Result<&Value, TableError> {
        let cells = &self.rows[row];
        if cells.len() != self.schema.columns.len() {
            return Err(TableError::RowWidthMismatch {
                row,
                expected: self.schema.columns.len(),
                got: cells.len(),
            });
        }
        Ok(&cells[col.index])
    }

    fn mismatch(&self, row: usize, col: &ColumnRef, expected: &'static str) -> TableError {
        TableError::TypeMismatch {
            column: col.name.clone(),
            row,
            expected,
            value: self.rows[row][col.index].clone(),
        }
    }

    pub fn str_value(&self, row: usize, col: &ColumnRef) -> Result<&str, TableError> {
        match self.cell(row, col)? {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(row, col, "string")),
        }
    }

    pub fn i64_value(&self, row: usize, col: &ColumnRef) -> Result<i64, TableError> {
        match self.cell(row, col)? {
            Value::Number(n) => n.as_i64().ok_or_else(|| self.mismatch(row, col, "int64")),
            Value::String(s) => s
                .parse::<i64>()
                .map_err(|_| self.mismatch(row, col, "int64")),
            _ => Err(self.mismatch(row, col, "int64")),
        }
    }

    pub fn f64_value(&self, row: usize, col: &ColumnRef) -> Result<f64, TableError> {
        match self.cell(row, col)? {
            Value::Number(n) => n.as_f64().ok_or_else(|| self.mismatch(row, col, "float64")),
            Value::String(s) => s
                .parse::<f64>()
                .map_err(|_| self.mismatch(row, col, "float64")),
            _ => Err(self.mismatch(row, col, "float64")),
        }
    }

    /// Nullable boolean; a JSON null maps to None.
    pub fn opt_bool_value(&self, row: usize, col: &ColumnRef) -> Result<Option<bool>, TableError> {
        match self.cell(row, col)? {
            Value::Bool(b) => Ok(Some(*b)),
            Value::Null => Ok(None),
            _ => Err(self.mismatch(row, col, "bool")),
        }
    }

    /// Calendar date encoded as `YYYY-MM-DD`.
    pub fn date_value(&self, row: usize, col: &ColumnRef) -> Result<NaiveDate, TableError> {
        match self.cell(row, col)? {
            Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| self.mismatch(row, col, "date")),
            _ => Err(self.mismatch(row, col, "date")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ResultSet {
        serde_json::from_value(json!({
            "schema": {"columns": [
                {"name": "owner", "type": "STRING"},
                {"name": "balance", "type": "STRING"},
                {"name": "count", "type": "INT64"},
                {"name": "success", "type": "BOOL"},
                {"name": "date", "type": "DATE"},
            ]},
            "rows": [
                ["0xabc", "5000000000", 3, true, "2026-08-20"],
                ["0xdef", "12", null, null, "2026-08-21"],
            ]
        }))
        .unwrap()
    }

    #[test]
    fn column_lookup_and_accessors() {
        let rs = sample();
        let owner = rs.column("owner").unwrap();
        let balance = rs.column("balance").unwrap();
        let count = rs.column("count").unwrap();
        let success = rs.column("success").unwrap();
        let date = rs.column("date").unwrap();

        assert_eq!(rs.str_value(0, &owner).unwrap(), "0xabc");
        assert_eq!(rs.i64_value(0, &balance).unwrap(), 5_000_000_000);
        assert_eq!(rs.i64_value(0, &count).unwrap(), 3);
        assert_eq!(rs.opt_bool_value(0, &success).unwrap(), Some(true));
        assert_eq!(rs.opt_bool_value(1, &success).unwrap(), None);
        assert_eq!(
            rs.date_value(1, &date).unwrap(),
            NaiveDate::from_ymd_opt(2026, 8, 21).unwrap()
        );
    }

    #[test]
    fn missing_column_is_an_error() {
        let rs = sample();
        assert!(matches!(
            rs.column("nope"),
            Err(TableError::MissingColumn(_))
        ));
    }

    #[test]
    fn non_numeric_string_fails_int_coercion() {
        let rs = sample();
        let owner = rs.column("owner").unwrap();
        let err = rs.i64_value(0, &owner).unwrap_err();
        assert!(matches!(err, TableError::TypeMismatch { .. }));
        assert!(err.to_string().contains("owner"));
    }

    #[test]
    fn short_row_is_reported() {
        let mut rs = sample();
        rs.rows.push(vec![json!("0x1")]);
        let owner = rs.column("owner").unwrap();
        assert!(matches!(
            rs.str_value(2, &owner),
            Err(TableError::RowWidthMismatch { row: 2, .. })
        ));
    }
}
