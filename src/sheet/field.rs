/// How a column's value is rendered on the slip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Money,
    /// Account-style numbers printed without a decimal point
    Identifier,
    Count,
    Date,
}

/// The fixed set of columns every payroll sheet must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    MonthYear,
    EmployeeCode,
    Name,
    Designation,
    DateOfJoining,
    AccountNo,
    BankIfsc,
    PanNo,
    UanNo,
    PfNo,
    EsiNo,
    MonthDays,
    PayableDays,
    LossOfPayDays,
    Basic,
    Da,
    Hra,
    OtherAllowance,
    PersonalPay,
    Arrear,
    LeaveEncash,
    ProvidentFund,
    Esi,
    ContributionTotal,
    ProfessionalTax,
    LeaveWithoutPay,
    Tds,
    GrossPay,
    GrossDeduction,
    NetSalary,
}

impl Field {
    pub const ALL: [Field; 30] = [
        Field::MonthYear,
        Field::EmployeeCode,
        Field::Name,
        Field::Designation,
        Field::DateOfJoining,
        Field::AccountNo,
        Field::BankIfsc,
        Field::PanNo,
        Field::UanNo,
        Field::PfNo,
        Field::EsiNo,
        Field::MonthDays,
        Field::PayableDays,
        Field::LossOfPayDays,
        Field::Basic,
        Field::Da,
        Field::Hra,
        Field::OtherAllowance,
        Field::PersonalPay,
        Field::Arrear,
        Field::LeaveEncash,
        Field::ProvidentFund,
        Field::Esi,
        Field::ContributionTotal,
        Field::ProfessionalTax,
        Field::LeaveWithoutPay,
        Field::Tds,
        Field::GrossPay,
        Field::GrossDeduction,
        Field::NetSalary,
    ];

    /// Canonical column header as it appears in payroll exports
    pub fn header(self) -> &'static str {
        match self {
            Field::MonthYear => "Month & Year",
            Field::EmployeeCode => "Employee Code",
            Field::Name => "Name",
            Field::Designation => "Designation",
            Field::DateOfJoining => "Date Of Joining",
            Field::AccountNo => "Account No",
            Field::BankIfsc => "Bank IFSC",
            Field::PanNo => "PAN No",
            Field::UanNo => "UAN No",
            Field::PfNo => "PF No",
            Field::EsiNo => "ESI No",
            Field::MonthDays => "Month Days",
            Field::PayableDays => "Actual Payable Days",
            Field::LossOfPayDays => "Loss Of Pay Days",
            Field::Basic => "Basic",
            Field::Da => "DA",
            Field::Hra => "HRA",
            Field::OtherAllowance => "Other Allowance",
            Field::PersonalPay => "Personal Pay",
            Field::Arrear => "Arrear",
            Field::LeaveEncash => "Leave Encash",
            Field::ProvidentFund => "Provident Fund",
            Field::Esi => "ESI",
            Field::ContributionTotal => "Contribution Total",
            Field::ProfessionalTax => "Professional Tax",
            Field::LeaveWithoutPay => "Leave without Pay",
            Field::Tds => "TDS",
            Field::GrossPay => "Gross Pay",
            Field::GrossDeduction => "Gross Deduction",
            Field::NetSalary => "Net Salary Payable (In Rs)",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::MonthYear
            | Field::EmployeeCode
            | Field::Name
            | Field::Designation
            | Field::BankIfsc
            | Field::PanNo
            | Field::PfNo => FieldKind::Text,
            Field::AccountNo | Field::UanNo | Field::EsiNo => FieldKind::Identifier,
            Field::DateOfJoining => FieldKind::Date,
            Field::MonthDays | Field::PayableDays | Field::LossOfPayDays => FieldKind::Count,
            _ => FieldKind::Money,
        }
    }

    /// Look up a field by a raw header cell, ignoring case and whitespace.
    pub fn from_header(raw: &str) -> Option<Field> {
        let key = normalize_header(raw);
        Field::ALL
            .iter()
            .copied()
            .find(|field| normalize_header(field.header()) == key)
    }
}

/// Trim, case-fold and drop all whitespace so "  pan  no" matches "PAN No".
pub fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{feff}')
        .flat_map(char::to_lowercase)
        .collect()
}
