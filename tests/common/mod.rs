#![allow(dead_code)]

use payslip::Field;
use std::path::Path;

/// A complete, well-typed payroll row in `Field::ALL` order.
pub fn sample_row(code: &str, name: &str, overrides: &[(Field, &str)]) -> Vec<String> {
    Field::ALL
        .iter()
        .map(|field| {
            if let Some((_, value)) = overrides.iter().find(|(f, _)| f == field) {
                return value.to_string();
            }
            match field {
                Field::MonthYear => "Dec 2024",
                Field::EmployeeCode => code,
                Field::Name => name,
                Field::Designation => "Engineer",
                Field::DateOfJoining => "2021-04-01",
                Field::AccountNo => "123456789012",
                Field::BankIfsc => "HDFC0001234",
                Field::PanNo => "ABCDE1234F",
                Field::UanNo => "100200300400",
                Field::PfNo => "GJ/VAD/12345",
                Field::EsiNo => "0",
                Field::MonthDays => "31",
                Field::PayableDays => "31",
                Field::LossOfPayDays => "0",
                Field::Basic => "25000",
                Field::Da => "12000",
                Field::Hra => "10000",
                Field::OtherAllowance => "3000",
                Field::PersonalPay => "500",
                Field::Arrear => "",
                Field::LeaveEncash => "",
                Field::ProvidentFund => "1800",
                Field::Esi => "0",
                Field::ContributionTotal => "1800",
                Field::ProfessionalTax => "200",
                Field::LeaveWithoutPay => "0",
                Field::Tds => "1500",
                Field::GrossPay => "50500",
                Field::GrossDeduction => "3500",
                Field::NetSalary => "47000",
            }
            .to_string()
        })
        .collect()
}

pub fn headers() -> Vec<String> {
    Field::ALL.iter().map(|f| f.header().to_string()).collect()
}

/// Write a CSV payroll sheet, optionally leaving one column out.
pub fn write_csv(path: &Path, rows: &[Vec<String>], skip: Option<Field>) {
    let keep: Vec<usize> = Field::ALL
        .iter()
        .enumerate()
        .filter(|(_, f)| Some(**f) != skip)
        .map(|(i, _)| i)
        .collect();

    let mut writer = csv::Writer::from_path(path).unwrap();
    let headers = headers();
    writer
        .write_record(keep.iter().map(|&i| headers[i].as_str()))
        .unwrap();
    for row in rows {
        writer
            .write_record(keep.iter().map(|&i| row[i].as_str()))
            .unwrap();
    }
    writer.flush().unwrap();
}

pub fn three_employees() -> Vec<Vec<String>> {
    vec![
        sample_row("E001", "Asha Rao", &[]),
        sample_row("E002", "Vikram Shah", &[(Field::Arrear, "1200")]),
        sample_row("E003", "Meera Iyer", &[(Field::Esi, "150.50")]),
    ]
}
