use chrono::NaiveDate;
use std::collections::HashMap;

use super::Field;

/// A typed spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Missing,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl CellValue {
    /// Type a raw text cell: blank is missing, numeric text becomes a number.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    /// Keep a raw cell as text, only mapping blanks to missing.
    pub fn verbatim(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

/// One employee-month row of the payroll sheet.
#[derive(Debug, Clone, Default)]
pub struct Record {
    /// 1-based row number in the source sheet, header included
    pub row: usize,
    values: HashMap<Field, CellValue>,
}

impl Record {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            values: HashMap::new(),
        }
    }

    pub fn get(&self, field: Field) -> &CellValue {
        static MISSING: CellValue = CellValue::Missing;
        self.values.get(&field).unwrap_or(&MISSING)
    }

    pub fn set(&mut self, field: Field, value: CellValue) {
        if value.is_missing() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    /// Builder-style setter, handy when assembling records by hand
    pub fn with(mut self, field: Field, value: CellValue) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_blank(&self) -> bool {
        self.values.is_empty()
    }
}
