use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::utils::dates::serial_to_datetime;

static EMPTY: Value = Value::Empty;

/// A single workbook cell after loading
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Empty,
    Number(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Text used both as dropdown label and as the value compared by filters
    pub fn display_text(&self) -> Option<String> {
        match self {
            Value::Empty => None,
            Value::Text(s) => Some(s.clone()),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            Value::Number(n) => Some(n.to_string()),
            Value::Timestamp(ts) => Some(ts.to_string()),
        }
    }

    /// Categorical equality against a selector value
    pub fn matches(&self, selected: &str) -> bool {
        match self {
            Value::Text(s) => s == selected,
            Value::Empty => false,
            other => other.display_text().is_some_and(|t| t == selected),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Cell at a column position; positions past the end read as empty
    pub fn get(&self, index: usize) -> &Value {
        self.values.get(index).unwrap_or(&EMPTY)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// An immutable measurement table loaded from one workbook sheet
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
    date_column: Option<usize>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.values.resize(width, Value::Empty);
                row
            })
            .collect();

        Self {
            name: name.into(),
            columns,
            rows,
            date_column: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    pub fn require_column(&self, column: &str) -> Result<usize> {
        self.column_index(column)
            .ok_or_else(|| DashboardError::ColumnNotFound {
                sheet: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn date_column(&self) -> Option<usize> {
        self.date_column
    }

    /// Columns whose non-empty cells are all numbers (the date column excluded)
    pub fn numeric_columns(&self) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|&idx| Some(idx) != self.date_column)
            .filter(|&idx| {
                let mut seen_number = false;
                for row in &self.rows {
                    match row.get(idx) {
                        Value::Number(_) => seen_number = true,
                        Value::Empty => {}
                        _ => return false,
                    }
                }
                seen_number
            })
            .collect()
    }

    /// Convert the named column from serial day counts to timestamps.
    ///
    /// A table carries at most one converted date column and conversion is
    /// refused a second time.
    pub fn with_serial_dates(mut self, column: &str) -> Result<Self> {
        if let Some(existing) = self.date_column {
            return Err(DashboardError::Config(format!(
                "Sheet '{}' already has date column '{}' converted",
                self.name, self.columns[existing]
            )));
        }

        let idx = self.require_column(column)?;

        for (row_number, row) in self.rows.iter_mut().enumerate() {
            let cell = &mut row.values[idx];
            let converted = match cell {
                Value::Empty | Value::Timestamp(_) => continue,
                Value::Number(serial) => serial_to_datetime(*serial),
                Value::Text(_) => None,
            };

            match converted {
                Some(ts) => *cell = Value::Timestamp(ts),
                None => {
                    return Err(DashboardError::InvalidDate {
                        sheet: self.name.clone(),
                        row: row_number + 1,
                        value: cell.display_text().unwrap_or_default(),
                    })
                }
            }
        }

        self.date_column = Some(idx);
        Ok(self)
    }

    /// Earliest and latest timestamp in the date column
    pub fn date_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let idx = self.date_column?;
        let mut timestamps = self.rows.iter().filter_map(|r| r.get(idx).as_timestamp());
        let first = timestamps.next()?;
        Some(timestamps.fold((first, first), |(min, max), ts| {
            (min.min(ts), max.max(ts))
        }))
    }

    /// View over every row of the table
    pub fn view(&self) -> TableView<'_> {
        TableView {
            table: self,
            rows: self.rows.iter().collect(),
        }
    }
}

/// A borrowed subset of a table's rows, in table order
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    table: &'a Table,
    rows: Vec<&'a Row>,
}

impl<'a> TableView<'a> {
    pub fn new(table: &'a Table, rows: Vec<&'a Row>) -> Self {
        Self { table, rows }
    }

    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn rows(&self) -> &[&'a Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
