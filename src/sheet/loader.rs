use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDateTime;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

use super::{CellValue, Field, FieldKind, Record};
use crate::error::{PayslipError, Result};

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Load every non-blank row of a payroll sheet, in sheet order.
///
/// The first row is the header. All required columns must be present
/// before any record is produced; otherwise the load fails with the full
/// list of missing column names.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let records = if extension == "csv" {
        load_csv(path)?
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        load_workbook(path)?
    } else {
        return Err(PayslipError::UnsupportedFormat(path.to_path_buf()));
    };

    info!(path = %path.display(), records = records.len(), "loaded payroll sheet");
    Ok(records)
}

/// Map each header cell to its field and fail if any required field is absent.
pub fn resolve_columns<S: AsRef<str>>(headers: &[S]) -> Result<Vec<Option<Field>>> {
    let mut seen = HashSet::new();
    let columns: Vec<Option<Field>> = headers
        .iter()
        .map(|raw| {
            // A repeated header only counts the first time
            Field::from_header(raw.as_ref()).filter(|field| seen.insert(*field))
        })
        .collect();

    let missing: Vec<String> = Field::ALL
        .iter()
        .filter(|field| !seen.contains(*field))
        .map(|field| field.header().to_string())
        .collect();

    if !missing.is_empty() {
        return Err(PayslipError::MissingColumns(missing));
    }

    Ok(columns)
}

fn load_workbook(path: &Path) -> Result<Vec<Record>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PayslipError::EmptySheet(path.to_path_buf()))??;

    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| PayslipError::EmptySheet(path.to_path_buf()))?;
    let headers: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();
    let columns = resolve_columns(&headers)?;

    let mut records = Vec::new();
    for (idx, row) in rows.enumerate() {
        // +1 for the header, +1 for 1-based numbering
        let mut record = Record::new(first_row + idx + 2);
        for (cell, column) in row.iter().zip(&columns) {
            if let Some(field) = column {
                record.set(*field, workbook_cell(cell, field.kind()));
            }
        }
        if record.is_blank() {
            debug!(row = record.row, "skipping blank row");
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

fn workbook_cell(cell: &Data, kind: FieldKind) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(s) => typed_text(s, kind),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::Date(datetime.date()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match s.parse::<NaiveDateTime>() {
            Ok(datetime) => CellValue::Date(datetime.date()),
            Err(_) => CellValue::verbatim(s),
        },
        Data::DurationIso(s) => CellValue::verbatim(s),
    }
}

fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)?;

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    let columns = resolve_columns(&headers)?;

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        let mut record = Record::new(idx + 2);
        for (raw, column) in row.iter().zip(&columns) {
            if let Some(field) = column {
                record.set(*field, typed_text(raw, field.kind()));
            }
        }
        if record.is_blank() {
            debug!(row = record.row, "skipping blank row");
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

/// Amounts and day counts are promoted to numbers; identifiers, names and
/// dates stay textual so leading zeros and date spellings survive.
fn typed_text(raw: &str, kind: FieldKind) -> CellValue {
    match kind {
        FieldKind::Money | FieldKind::Count => CellValue::from_text(raw),
        FieldKind::Text | FieldKind::Identifier | FieldKind::Date => CellValue::verbatim(raw),
    }
}
