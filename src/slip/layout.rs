//! Fixed slip geometry.
//!
//! All coordinates are PDF points. Horizontal positions are measured from
//! the left edge and vertical positions ("depth") downward from the top
//! edge; the PDF backend flips depth into the bottom-up PDF space.

use super::format::{has_amount, render_field};
use crate::config::Company;
use crate::sheet::{Field, Record};

/// ISO A4 in points
pub const PAGE_WIDTH: f32 = 595.2756;
pub const PAGE_HEIGHT: f32 = 841.8898;

/// Vertical step between consecutive line items
pub const ROW_HEIGHT: f32 = 15.0;

/// Page margin used by rules, the net box and the border
pub const MARGIN: f32 = 40.0;

/// Totals are anchored here no matter how many optional rows precede them.
pub const TOTALS_DEPTH: f32 = 520.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

/// A label/value column: where the label starts, where the value starts,
/// and what is printed between them.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub label_x: f32,
    pub value_x: f32,
    pub separator: &'static str,
    pub size: f32,
}

/// One field printed as a label/value pair at a fixed depth.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub field: Field,
    pub label: &'static str,
    pub depth: f32,
    pub font: Font,
    /// Drawn only when the amount is present and non-zero
    pub conditional: bool,
}

const fn slot(field: Field, label: &'static str, depth: f32) -> Slot {
    Slot {
        field,
        label,
        depth,
        font: Font::Regular,
        conditional: false,
    }
}

const fn optional(field: Field, label: &'static str, depth: f32) -> Slot {
    Slot {
        field,
        label,
        depth,
        font: Font::Regular,
        conditional: true,
    }
}

const fn bold(field: Field, label: &'static str, depth: f32) -> Slot {
    Slot {
        field,
        label,
        depth,
        font: Font::Bold,
        conditional: false,
    }
}

pub const EMPLOYEE_LEFT_COLUMN: Column = Column {
    label_x: 50.0,
    value_x: 150.0,
    separator: ":  ",
    size: 11.0,
};

pub const EMPLOYEE_RIGHT_COLUMN: Column = Column {
    label_x: 310.0,
    value_x: 385.0,
    separator: ":  ",
    size: 11.0,
};

pub const EARNINGS_COLUMN: Column = Column {
    label_x: 50.0,
    value_x: 210.0,
    separator: " ",
    size: 11.0,
};

pub const DEDUCTIONS_COLUMN: Column = Column {
    label_x: 310.0,
    value_x: 460.0,
    separator: " ",
    size: 11.0,
};

pub const EMPLOYEE_LEFT: [Slot; 5] = [
    slot(Field::EmployeeCode, "Employee Code", 210.0),
    slot(Field::Name, "Name", 230.0),
    slot(Field::Designation, "Designation", 250.0),
    slot(Field::DateOfJoining, "Date Of Joining", 270.0),
    slot(Field::AccountNo, "Account No", 290.0),
];

pub const EMPLOYEE_RIGHT: [Slot; 5] = [
    slot(Field::BankIfsc, "Bank IFSC", 210.0),
    slot(Field::PanNo, "PAN No", 230.0),
    slot(Field::UanNo, "UAN No", 250.0),
    slot(Field::PfNo, "PF No", 270.0),
    slot(Field::EsiNo, "ESI No", 290.0),
];

/// Earnings that are always printed; the last one seeds the optional-row cursor.
pub const EARNINGS_FIXED: [Slot; 5] = [
    slot(Field::Basic, "Basic", 410.0),
    slot(Field::Da, "DA", 425.0),
    slot(Field::Hra, "HRA", 440.0),
    slot(Field::OtherAllowance, "Other Allowance", 455.0),
    slot(Field::PersonalPay, "Personal Pay", 470.0),
];

/// Optional earnings stack under the fixed ones, one row height apart.
/// Their depth is assigned by the cursor, so the table leaves it at zero.
pub const EARNINGS_OPTIONAL: [Slot; 2] = [
    optional(Field::Arrear, "Arrear", 0.0),
    optional(Field::LeaveEncash, "Leave Encash", 0.0),
];

pub const GROSS_PAY: Slot = slot(Field::GrossPay, "GROSS PAY", TOTALS_DEPTH);

pub const DEDUCTIONS: [Slot; 6] = [
    slot(Field::ProvidentFund, "Provident Fund", 410.0),
    optional(Field::Esi, "ESI", 425.0),
    bold(Field::ContributionTotal, "Contribution Total", 440.0),
    slot(Field::ProfessionalTax, "Professional Tax", 470.0),
    slot(Field::LeaveWithoutPay, "Leave without Pay", 485.0),
    optional(Field::Tds, "TDS", 500.0),
];

pub const GROSS_DEDUCTION: Slot = slot(Field::GrossDeduction, "GROSS DEDUCTION", TOTALS_DEPTH);

/// Heading printed between the contributions and the tax lines
pub const TAXES_HEADING: (&str, f32) = ("Taxes & Deductions", 455.0);

pub const TITLE: (f32, f32, f32) = (50.0, 85.0, 16.0);
pub const COMPANY_NAME: (f32, f32) = (50.0, 100.0);
pub const COMPANY_ADDRESS_DEPTHS: [f32; 3] = [135.0, 150.0, 165.0];
pub const COMPANY_SIZE: f32 = 11.0;

pub const SALARY_HEADING: (&str, f32, f32, f32) = ("Salary Details", 50.0, 318.0, 14.0);

/// Attendance strip: (field, label, label x, value x)
pub const ATTENDANCE: [(Field, &str, f32, f32); 3] = [
    (Field::MonthDays, "Month Days", 75.0, 90.0),
    (Field::PayableDays, "Actual Payable Days", 250.0, 280.0),
    (Field::LossOfPayDays, "Loss Of Pay Days", 420.0, 450.0),
];
pub const ATTENDANCE_LABEL_DEPTH: f32 = 342.0;
pub const ATTENDANCE_VALUE_DEPTH: f32 = 359.0;

pub const COLUMN_HEADERS: [(&str, f32); 4] = [
    ("EARNINGS", 75.0),
    ("AMOUNT", 210.0),
    ("CONTRIBUTION", 320.0),
    ("AMOUNT", 465.0),
];
pub const COLUMN_HEADER_DEPTH: f32 = 385.0;

/// Full-width horizontal rules (depth, grey level, stroke width)
pub const HORIZONTAL_RULES: [(f32, f32, f32); 6] = [
    (190.0, 0.0, 1.0),
    (300.0, 0.0, 1.0),
    (330.0, 0.0, 1.0),
    (348.0, 0.8, 0.7),
    (390.0, 0.0, 1.0),
    (505.0, 0.0, 1.0),
];

/// Vertical rules (x, top depth, bottom depth)
pub const VERTICAL_RULES: [(f32, f32, f32); 4] = [
    (300.0, 190.0, 300.0),
    (170.0, 390.0, 505.0),
    (300.0, 390.0, 505.0),
    (425.0, 390.0, 505.0),
];

pub const NET_BOX_TOP: f32 = 620.0;
pub const NET_BOX_HEIGHT: f32 = 80.0;
pub const NET_BOX_GRAY: f32 = 0.9;
pub const NET_LABEL: (&str, f32, f32) = ("Net Salary Payable (In Rs)", 100.0, 665.0);
pub const NET_VALUE_X: f32 = 390.0;

pub const FOOTER: (&str, f32, f32) = (
    "**Note : This is a computer-generated document. No signature is required.",
    100.0,
    740.0,
);

pub const BORDER_TOP: f32 = 50.0;
pub const BORDER_HEIGHT: f32 = 730.0;

/// Logo box: width, height, right inset, bottom depth
pub const LOGO_BOX: (f32, f32, f32, f32) = (250.0, 190.0, 30.0, 200.0);

#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub x: f32,
    pub depth: f32,
    pub font: Font,
    pub size: f32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text(TextOp),
    Line {
        from: (f32, f32),
        to: (f32, f32),
        gray: f32,
        width: f32,
    },
    /// Rectangle whose top-left corner sits at (x, top)
    Rect {
        x: f32,
        top: f32,
        width: f32,
        height: f32,
        fill: Option<f32>,
        stroke: Option<f32>,
    },
    /// Placeholder for the logo image, bottom-left corner at (x, bottom)
    Logo {
        x: f32,
        bottom: f32,
        width: f32,
        height: f32,
    },
}

/// Everything drawn on one slip, in painting order.
#[derive(Debug, Clone, Default)]
pub struct SlipPlan {
    pub title: String,
    pub ops: Vec<DrawOp>,
}

impl SlipPlan {
    pub fn texts(&self) -> impl Iterator<Item = &TextOp> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(text) => Some(text),
            _ => None,
        })
    }

    /// First text operation whose content equals `text`
    pub fn find_text(&self, text: &str) -> Option<&TextOp> {
        self.texts().find(|op| op.text == text)
    }

    pub fn has_logo(&self) -> bool {
        self.ops.iter().any(|op| matches!(op, DrawOp::Logo { .. }))
    }

    fn text(&mut self, x: f32, depth: f32, font: Font, size: f32, text: impl Into<String>) {
        self.ops.push(DrawOp::Text(TextOp {
            x,
            depth,
            font,
            size,
            text: text.into(),
        }));
    }

    fn slot(&mut self, record: &Record, column: &Column, slot: &Slot, depth: f32) {
        let value = render_field(record, slot.field);
        self.text(column.label_x, depth, slot.font, column.size, slot.label);
        self.text(
            column.value_x,
            depth,
            slot.font,
            column.size,
            format!("{}{}", column.separator, value),
        );
    }
}

/// Lay out one record's slip.
pub fn plan_slip(record: &Record, company: &Company, with_logo: bool) -> SlipPlan {
    let period = render_field(record, Field::MonthYear);
    let mut plan = SlipPlan {
        title: format!("Salary Slip {period}"),
        ops: Vec::new(),
    };

    if with_logo {
        let (width, height, inset, bottom) = LOGO_BOX;
        plan.ops.push(DrawOp::Logo {
            x: PAGE_WIDTH - width - inset,
            bottom,
            width,
            height,
        });
    }

    let (title_x, title_depth, title_size) = TITLE;
    plan.text(title_x, title_depth, Font::Regular, title_size, format!("PAYSLIP {period}"));

    plan.text(COMPANY_NAME.0, COMPANY_NAME.1, Font::Regular, COMPANY_SIZE, company.name.as_str());
    for (line, depth) in company.address.iter().zip(COMPANY_ADDRESS_DEPTHS) {
        plan.text(COMPANY_NAME.0, depth, Font::Regular, COMPANY_SIZE, line.as_str());
    }

    for (depth, gray, width) in HORIZONTAL_RULES {
        plan.ops.push(DrawOp::Line {
            from: (MARGIN, depth),
            to: (PAGE_WIDTH - MARGIN, depth),
            gray,
            width,
        });
    }
    for (x, top, bottom) in VERTICAL_RULES {
        plan.ops.push(DrawOp::Line {
            from: (x, top),
            to: (x, bottom),
            gray: 0.0,
            width: 1.0,
        });
    }

    for slot in &EMPLOYEE_LEFT {
        plan.slot(record, &EMPLOYEE_LEFT_COLUMN, slot, slot.depth);
    }
    for slot in &EMPLOYEE_RIGHT {
        plan.slot(record, &EMPLOYEE_RIGHT_COLUMN, slot, slot.depth);
    }

    let (heading, heading_x, heading_depth, heading_size) = SALARY_HEADING;
    plan.text(heading_x, heading_depth, Font::Bold, heading_size, heading);

    for (field, label, label_x, value_x) in ATTENDANCE {
        plan.text(label_x, ATTENDANCE_LABEL_DEPTH, Font::Bold, 9.0, label);
        plan.text(
            value_x,
            ATTENDANCE_VALUE_DEPTH,
            Font::Regular,
            10.0,
            render_field(record, field),
        );
    }

    for (label, x) in COLUMN_HEADERS {
        plan.text(x, COLUMN_HEADER_DEPTH, Font::Bold, 11.0, label);
    }

    plan_earnings(&mut plan, record);
    plan_deductions(&mut plan, record);

    plan.ops.push(DrawOp::Rect {
        x: MARGIN,
        top: NET_BOX_TOP,
        width: PAGE_WIDTH - 2.0 * MARGIN,
        height: NET_BOX_HEIGHT,
        fill: Some(NET_BOX_GRAY),
        stroke: Some(NET_BOX_GRAY),
    });
    let (net_label, net_x, net_depth) = NET_LABEL;
    plan.text(net_x, net_depth, Font::Bold, 11.0, net_label);
    plan.text(
        NET_VALUE_X,
        net_depth,
        Font::Bold,
        11.0,
        format!(" {}", render_field(record, Field::NetSalary)),
    );

    let (footer, footer_x, footer_depth) = FOOTER;
    plan.text(footer_x, footer_depth, Font::Regular, 11.0, footer);

    plan.ops.push(DrawOp::Rect {
        x: MARGIN,
        top: BORDER_TOP,
        width: PAGE_WIDTH - 2.0 * MARGIN,
        height: BORDER_HEIGHT,
        fill: None,
        stroke: Some(0.0),
    });

    plan
}

fn plan_earnings(plan: &mut SlipPlan, record: &Record) {
    for slot in &EARNINGS_FIXED {
        plan.slot(record, &EARNINGS_COLUMN, slot, slot.depth);
    }

    // Optional rows follow a cursor so skipped rows leave no gap
    let mut cursor = EARNINGS_FIXED[EARNINGS_FIXED.len() - 1].depth;
    for slot in &EARNINGS_OPTIONAL {
        if has_amount(record, slot.field) {
            cursor += ROW_HEIGHT;
            plan.slot(record, &EARNINGS_COLUMN, slot, cursor);
        }
    }

    plan.slot(record, &EARNINGS_COLUMN, &GROSS_PAY, GROSS_PAY.depth);
}

fn plan_deductions(plan: &mut SlipPlan, record: &Record) {
    let (heading, heading_depth) = TAXES_HEADING;
    for slot in &DEDUCTIONS {
        if slot.conditional && !has_amount(record, slot.field) {
            continue;
        }
        plan.slot(record, &DEDUCTIONS_COLUMN, slot, slot.depth);
        if slot.field == Field::ContributionTotal {
            plan.text(
                DEDUCTIONS_COLUMN.label_x,
                heading_depth,
                Font::Bold,
                DEDUCTIONS_COLUMN.size,
                heading,
            );
        }
    }

    plan.slot(record, &DEDUCTIONS_COLUMN, &GROSS_DEDUCTION, GROSS_DEDUCTION.depth);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::CellValue;

    fn company() -> Company {
        Company {
            name: "Acme Payroll Pvt Ltd".to_string(),
            address: vec!["Line one".to_string(), "Line two".to_string()],
        }
    }

    fn base_record() -> Record {
        Record::new(2)
            .with(Field::MonthYear, CellValue::Text("Dec 2024".into()))
            .with(Field::EmployeeCode, CellValue::Text("E001".into()))
            .with(Field::Name, CellValue::Text("Asha Rao".into()))
            .with(Field::PersonalPay, CellValue::Number(500.0))
            .with(Field::GrossPay, CellValue::Number(30500.0))
            .with(Field::GrossDeduction, CellValue::Number(2000.0))
            .with(Field::NetSalary, CellValue::Number(28500.0))
    }

    #[test]
    fn test_optional_rows_stack_below_personal_pay() {
        let record = base_record()
            .with(Field::Arrear, CellValue::Number(100.0))
            .with(Field::LeaveEncash, CellValue::Number(200.0));
        let plan = plan_slip(&record, &company(), false);

        assert_eq!(plan.find_text("Arrear").unwrap().depth, 485.0);
        assert_eq!(plan.find_text("Leave Encash").unwrap().depth, 500.0);
    }

    #[test]
    fn test_skipped_arrear_shifts_leave_encash_up() {
        let record = base_record().with(Field::LeaveEncash, CellValue::Number(200.0));
        let plan = plan_slip(&record, &company(), false);

        assert!(plan.find_text("Arrear").is_none());
        assert_eq!(plan.find_text("Leave Encash").unwrap().depth, 485.0);
        assert_eq!(plan.find_text(" 200.00").unwrap().depth, 485.0);
    }

    #[test]
    fn test_arrear_alone_takes_first_optional_row() {
        let record = base_record().with(Field::Arrear, CellValue::Number(100.0));
        let plan = plan_slip(&record, &company(), false);

        assert_eq!(plan.find_text("Arrear").unwrap().depth, 485.0);
        assert_eq!(plan.find_text(" 100.00").unwrap().depth, 485.0);
        assert!(plan.find_text("Leave Encash").is_none());
    }

    #[test]
    fn test_gross_pay_is_pinned() {
        let without = plan_slip(&base_record(), &company(), false);
        let with = plan_slip(
            &base_record()
                .with(Field::Arrear, CellValue::Number(1.0))
                .with(Field::LeaveEncash, CellValue::Number(1.0)),
            &company(),
            false,
        );

        for plan in [&without, &with] {
            let label = plan.find_text("GROSS PAY").unwrap();
            assert_eq!(label.depth, TOTALS_DEPTH);
            assert_eq!(plan.find_text(" 30,500.00").unwrap().depth, TOTALS_DEPTH);
        }
    }

    #[test]
    fn test_deduction_rows_keep_fixed_slots() {
        let record = base_record()
            .with(Field::Esi, CellValue::Number(150.5))
            .with(Field::Tds, CellValue::Number(0.0));
        let plan = plan_slip(&record, &company(), false);

        assert_eq!(plan.find_text("ESI").unwrap().depth, 425.0);
        assert_eq!(plan.find_text(" 150.50").unwrap().x, DEDUCTIONS_COLUMN.value_x);
        assert!(plan.find_text("TDS").is_none());
        assert_eq!(plan.find_text("Taxes & Deductions").unwrap().depth, 455.0);
        assert_eq!(plan.find_text("GROSS DEDUCTION").unwrap().depth, TOTALS_DEPTH);
    }

    #[test]
    fn test_tds_has_its_own_slot() {
        let record = base_record().with(Field::Tds, CellValue::Number(1500.0));
        let plan = plan_slip(&record, &company(), false);

        let label = plan.find_text("TDS").unwrap();
        assert_eq!(label.depth, 500.0);
        assert_eq!(label.x, DEDUCTIONS_COLUMN.label_x);
        assert_eq!(plan.find_text(" 1,500.00").unwrap().depth, 500.0);
        assert!(plan.find_text("ESI").is_none());
    }

    #[test]
    fn test_company_block_and_title() {
        let plan = plan_slip(&base_record(), &company(), false);

        assert_eq!(plan.title, "Salary Slip Dec 2024");
        assert_eq!(plan.find_text("PAYSLIP Dec 2024").unwrap().size, 16.0);
        assert_eq!(plan.find_text("Acme Payroll Pvt Ltd").unwrap().depth, 100.0);
        assert_eq!(plan.find_text("Line two").unwrap().depth, 150.0);
    }

    #[test]
    fn test_logo_placement() {
        let plan = plan_slip(&base_record(), &company(), true);
        assert!(plan.has_logo());
        assert!(!plan_slip(&base_record(), &company(), false).has_logo());

        let logo = plan
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Logo { x, bottom, .. } => Some((*x, *bottom)),
                _ => None,
            })
            .unwrap();
        assert!((logo.0 - (PAGE_WIDTH - 280.0)).abs() < 0.001);
        assert_eq!(logo.1, 200.0);
    }

    #[test]
    fn test_border_is_painted_last() {
        let plan = plan_slip(&base_record(), &company(), false);
        match plan.ops.last() {
            Some(DrawOp::Rect { fill, top, height, .. }) => {
                assert!(fill.is_none());
                assert_eq!(*top, BORDER_TOP);
                assert_eq!(*height, BORDER_HEIGHT);
            }
            other => panic!("expected border rect, got {other:?}"),
        }
    }
}
