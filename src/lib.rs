pub mod batch;
pub mod config;
pub mod error;
pub mod pdf;
pub mod sheet;
pub mod slip;

pub use batch::{generate_slips, BatchOptions, DEFAULT_WORKERS};
pub use config::{Company, Config, SlipSettings};
pub use error::{PayslipError, Result};
pub use pdf::{Logo, LogoSource};
pub use sheet::{load_records, CellValue, Field, Record};
pub use slip::{sanitize_filename, slip_file_name, SlipRenderer};
