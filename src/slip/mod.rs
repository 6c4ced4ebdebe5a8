mod format;
pub mod layout;
mod naming;

pub use format::{format_money, has_amount, money_amount, render_field};
pub use layout::{plan_slip, DrawOp, Font, SlipPlan, TextOp};
pub use naming::{sanitize_filename, slip_file_name, slip_path};

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Company;
use crate::error::Result;
use crate::pdf::{write_slip, Logo};
use crate::sheet::Record;

/// Renders records into slip PDFs. Shared read-only across batch workers.
#[derive(Debug)]
pub struct SlipRenderer {
    company: Company,
    logo: Option<Logo>,
}

impl SlipRenderer {
    pub fn new(company: Company, logo: Option<Logo>) -> Self {
        Self { company, logo }
    }

    pub fn plan(&self, record: &Record) -> SlipPlan {
        plan_slip(record, &self.company, self.logo.is_some())
    }

    /// Render one record into `output_dir` and return the written path.
    pub fn render(&self, record: &Record, output_dir: &Path) -> Result<PathBuf> {
        let path = slip_path(output_dir, record);
        let plan = self.plan(record);
        write_slip(&plan, self.logo.as_ref(), &path)?;
        debug!(row = record.row, path = %path.display(), "rendered slip");
        Ok(path)
    }
}
