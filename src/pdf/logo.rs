use printpdf::image_crate::{self, DynamicImage, GenericImageView};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use ureq::Agent;

use crate::config::expand_path;
use crate::error::{PayslipError, Result};

/// Where the company logo comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoSource {
    File(PathBuf),
    Url(String),
}

impl LogoSource {
    /// `http://` and `https://` references are fetched, anything else is a path.
    pub fn parse(reference: &str) -> Self {
        let reference = reference.trim();
        if reference.starts_with("http://") || reference.starts_with("https://") {
            LogoSource::Url(reference.to_string())
        } else {
            LogoSource::File(expand_path(reference))
        }
    }

    /// Read or download the image and decode it.
    pub fn load(&self, timeout: Duration) -> Result<Logo> {
        let bytes = self.fetch(timeout)?;
        let image = image_crate::load_from_memory(&bytes).map_err(|e| self.error(e))?;
        Ok(Logo {
            reference: self.to_string(),
            image,
        })
    }

    fn fetch(&self, timeout: Duration) -> Result<Vec<u8>> {
        match self {
            LogoSource::File(path) => std::fs::read(path).map_err(|e| self.error(e)),
            LogoSource::Url(url) => {
                let agent: Agent = Agent::config_builder()
                    .timeout_global(Some(timeout))
                    .build()
                    .into();

                let mut response = agent.get(url).call().map_err(|e| self.error(e))?;
                response
                    .body_mut()
                    .read_to_vec()
                    .map_err(|e| self.error(e))
            }
        }
    }

    fn error(&self, reason: impl fmt::Display) -> PayslipError {
        PayslipError::Logo {
            reference: self.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for LogoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogoSource::File(path) => write!(f, "{}", path.display()),
            LogoSource::Url(url) => f.write_str(url),
        }
    }
}

/// A decoded logo, shared by every slip of a batch.
#[derive(Clone)]
pub struct Logo {
    reference: String,
    image: DynamicImage,
}

impl Logo {
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Pixel dimensions (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

impl fmt::Debug for Logo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logo")
            .field("reference", &self.reference)
            .field("dimensions", &self.dimensions())
            .finish()
    }
}
