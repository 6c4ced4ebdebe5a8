mod field;
mod loader;
mod record;

pub use field::{normalize_header, Field, FieldKind};
pub use loader::{load_records, resolve_columns};
pub use record::{CellValue, Record};
