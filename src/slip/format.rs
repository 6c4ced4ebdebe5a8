use chrono::{Duration, NaiveDate};

use crate::sheet::{CellValue, Field, FieldKind, Record};

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y", "%Y/%m/%d"];

/// Whole numbers beyond this no longer fit an `i64`
const MAX_IDENTIFIER: f64 = 9.2e18;

/// Largest serial Excel accepts (9999-12-31)
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Render a record's field the way it is printed on the slip.
///
/// Missing values and values that cannot be read as the field's kind
/// render as an empty string; a bad cell never aborts the slip.
pub fn render_field(record: &Record, field: Field) -> String {
    let value = record.get(field);
    match (field, field.kind()) {
        (Field::MonthYear, _) => period_label(value),
        (Field::EsiNo, _) if is_zero_identifier(value) => String::new(),
        (_, FieldKind::Text) => plain_text(value),
        (_, FieldKind::Money) => money_amount(value).map(format_money).unwrap_or_default(),
        (_, FieldKind::Identifier) => identifier(value).unwrap_or_default(),
        (_, FieldKind::Count) => match value {
            CellValue::Date(_) => String::new(),
            other => plain_text(other),
        },
        (_, FieldKind::Date) => date_value(value)
            .map(|date| date.format("%d-%m-%Y").to_string())
            .unwrap_or_default(),
    }
}

/// True when a conditional line item has a present, non-zero amount.
pub fn has_amount(record: &Record, field: Field) -> bool {
    money_amount(record.get(field)).is_some_and(|amount| amount != 0.0)
}

/// Numeric value of a money cell. Text is accepted with thousands separators.
pub fn money_amount(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Text(s) => s
            .replace(',', "")
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Format an amount with thousands separators and two decimals: `12,345.60`.
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut out = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if value.is_sign_negative() && value != 0.0 {
        grouped.insert(0, '-');
    }
    format!("{grouped}.{frac}")
}

fn plain_text(value: &CellValue) -> String {
    match value {
        CellValue::Missing => String::new(),
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) => display_number(*n),
        CellValue::Date(d) => d.format("%d-%m-%Y").to_string(),
    }
}

fn period_label(value: &CellValue) -> String {
    match value {
        CellValue::Date(d) => d.format("%B-%Y").to_string(),
        other => plain_text(other),
    }
}

/// Integral numbers lose their `.0`; fractional ones print as-is.
fn display_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

fn identifier(value: &CellValue) -> Option<String> {
    match value {
        CellValue::Number(n) => whole_identifier(*n),
        CellValue::Text(s) if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) => {
            Some(s.clone())
        }
        CellValue::Text(s) => s.trim().parse::<f64>().ok().and_then(whole_identifier),
        _ => None,
    }
}

fn whole_identifier(n: f64) -> Option<String> {
    if n.is_finite() && n.abs() < MAX_IDENTIFIER {
        Some(format!("{}", n.trunc() as i64))
    } else {
        None
    }
}

/// ESI No is "not applicable" only when the cell holds exactly zero.
fn is_zero_identifier(value: &CellValue) -> bool {
    match value {
        CellValue::Number(n) => *n == 0.0,
        CellValue::Text(s) => {
            let s = s.trim();
            !s.is_empty() && s.parse::<f64>().is_ok_and(|n| n == 0.0)
        }
        _ => false,
    }
}

fn date_value(value: &CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Date(d) => Some(*d),
        CellValue::Text(s) => parse_date_text(s),
        CellValue::Number(n) => excel_serial_date(*n),
        CellValue::Missing => None,
    }
}

fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    // Drop any time component: "2021-04-01 00:00:00" or "2021-04-01T00:00:00"
    let date_part = raw.trim().split([' ', 'T']).next()?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

fn excel_serial_date(serial: f64) -> Option<NaiveDate> {
    if !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(field: Field, value: CellValue) -> Record {
        Record::new(2).with(field, value)
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(150.5), "150.50");
        assert_eq!(format_money(1234.5), "1,234.50");
        assert_eq!(format_money(1234567.891), "1,234,567.89");
        assert_eq!(format_money(-1000.0), "-1,000.00");
        assert_eq!(format_money(999.999), "1,000.00");
    }

    #[test]
    fn test_missing_renders_empty_for_every_field() {
        let record = Record::new(2);
        for field in Field::ALL {
            assert_eq!(render_field(&record, field), "", "field {:?}", field);
        }
    }

    #[test]
    fn test_money_field_rendering() {
        let record = record_with(Field::Basic, CellValue::Number(25000.0));
        assert_eq!(render_field(&record, Field::Basic), "25,000.00");

        let record = record_with(Field::Basic, CellValue::Text("25,000.5".into()));
        assert_eq!(render_field(&record, Field::Basic), "25,000.50");

        let record = record_with(Field::Basic, CellValue::Text("n/a".into()));
        assert_eq!(render_field(&record, Field::Basic), "");

        let record = record_with(Field::Basic, CellValue::Number(0.0));
        assert_eq!(render_field(&record, Field::Basic), "0.00");
    }

    #[test]
    fn test_identifier_rendering() {
        let record = record_with(Field::AccountNo, CellValue::Number(123456789012.0));
        assert_eq!(render_field(&record, Field::AccountNo), "123456789012");

        let record = record_with(Field::AccountNo, CellValue::Text("000123".into()));
        assert_eq!(render_field(&record, Field::AccountNo), "000123");

        let record = record_with(Field::UanNo, CellValue::Text("100200300.0".into()));
        assert_eq!(render_field(&record, Field::UanNo), "100200300");

        let record = record_with(Field::UanNo, CellValue::Text("pending".into()));
        assert_eq!(render_field(&record, Field::UanNo), "");

        // Too large to be a whole-number identifier
        let record = record_with(Field::AccountNo, CellValue::Number(1e20));
        assert_eq!(render_field(&record, Field::AccountNo), "");

        let record = record_with(Field::AccountNo, CellValue::Text("1e20".into()));
        assert_eq!(render_field(&record, Field::AccountNo), "");
    }

    #[test]
    fn test_esi_number_zero_is_not_applicable() {
        let record = record_with(Field::EsiNo, CellValue::Number(0.0));
        assert_eq!(render_field(&record, Field::EsiNo), "");

        let record = record_with(Field::EsiNo, CellValue::Text("0".into()));
        assert_eq!(render_field(&record, Field::EsiNo), "");

        let record = record_with(Field::EsiNo, CellValue::Text("000".into()));
        assert_eq!(render_field(&record, Field::EsiNo), "");

        let record = record_with(Field::EsiNo, CellValue::Number(3112345678.0));
        assert_eq!(render_field(&record, Field::EsiNo), "3112345678");

        // Not zero, so it is printed even though it truncates to 0
        let record = record_with(Field::EsiNo, CellValue::Number(0.4));
        assert_eq!(render_field(&record, Field::EsiNo), "0");
    }

    #[test]
    fn test_date_of_joining_rendering() {
        let date = NaiveDate::from_ymd_opt(2021, 4, 1).unwrap();
        let record = record_with(Field::DateOfJoining, CellValue::Date(date));
        assert_eq!(render_field(&record, Field::DateOfJoining), "01-04-2021");

        let record = record_with(Field::DateOfJoining, CellValue::Text("2021-04-01 00:00:00".into()));
        assert_eq!(render_field(&record, Field::DateOfJoining), "01-04-2021");

        let record = record_with(Field::DateOfJoining, CellValue::Text("01/04/2021".into()));
        assert_eq!(render_field(&record, Field::DateOfJoining), "01-04-2021");

        // Excel serial for 2021-04-01
        let record = record_with(Field::DateOfJoining, CellValue::Number(44287.0));
        assert_eq!(render_field(&record, Field::DateOfJoining), "01-04-2021");

        let record = record_with(Field::DateOfJoining, CellValue::Text("soon".into()));
        assert_eq!(render_field(&record, Field::DateOfJoining), "");
    }

    #[test]
    fn test_text_and_count_rendering() {
        let record = record_with(Field::EmployeeCode, CellValue::Number(7.0));
        assert_eq!(render_field(&record, Field::EmployeeCode), "7");

        let record = record_with(Field::MonthDays, CellValue::Number(31.0));
        assert_eq!(render_field(&record, Field::MonthDays), "31");

        let record = record_with(Field::PayableDays, CellValue::Number(30.5));
        assert_eq!(render_field(&record, Field::PayableDays), "30.5");

        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let record = record_with(Field::MonthYear, CellValue::Date(date));
        assert_eq!(render_field(&record, Field::MonthYear), "December-2024");
    }

    #[test]
    fn test_has_amount() {
        let record = Record::new(2)
            .with(Field::Arrear, CellValue::Number(0.0))
            .with(Field::Tds, CellValue::Number(1200.0))
            .with(Field::Esi, CellValue::Text("abc".into()));
        assert!(!has_amount(&record, Field::Arrear));
        assert!(has_amount(&record, Field::Tds));
        assert!(!has_amount(&record, Field::Esi));
        assert!(!has_amount(&record, Field::LeaveEncash));
    }
}
