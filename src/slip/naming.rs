use std::path::{Path, PathBuf};

use super::format::render_field;
use crate::sheet::{Field, Record};

const ILLEGAL_CHARS: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

/// Replace characters that are illegal in file names with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if ILLEGAL_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// File name of a record's slip: `<MonthYear> <EmployeeCode> <Name>.pdf`, sanitized.
pub fn slip_file_name(record: &Record) -> String {
    sanitize_filename(&format!(
        "{} {} {}.pdf",
        render_field(record, Field::MonthYear),
        render_field(record, Field::EmployeeCode),
        render_field(record, Field::Name),
    ))
}

pub fn slip_path(output_dir: &Path, record: &Record) -> PathBuf {
    output_dir.join(slip_file_name(record))
}
