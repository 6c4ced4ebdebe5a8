mod logo;
mod writer;

pub use logo::{Logo, LogoSource};
pub use writer::{render_pdf, write_slip};
